use colored::Color;

pub const PRIMARY: Color = Color::TrueColor {
    r: 214,
    g: 170,
    b: 255,
};
pub const ACCENT: Color = Color::TrueColor {
    r: 255,
    g: 200,
    b: 87,
};
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const SCORE_HIGH: Color = Color::Green;
pub const SCORE_MEDIUM: Color = Color::Yellow;
pub const SCORE_LOW: Color = Color::Red;
