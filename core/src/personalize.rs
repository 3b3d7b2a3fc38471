//! Personal extras attached to a finished reading.
//!
//! Nothing here can fail: a missing birth date or location simply leaves
//! the matching field empty.

use chrono::{Datelike, NaiveDate};
use palmist_common::config::ReadingSettings;
use palmist_common::reading::{AstrologyInsight, CulturalContext, Reading};
use palmist_common::user::UserData;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Element {
    pub fn arabic(&self) -> &'static str {
        match self {
            Self::Fire => "النار",
            Self::Earth => "التراب",
            Self::Air => "الهواء",
            Self::Water => "الماء",
        }
    }

    fn insight(&self) -> &'static str {
        match self {
            Self::Fire => "عنصر النار يمنحك الحماس والشجاعة، ويعزز ما تظهره خطوط كفك من طاقة.",
            Self::Earth => "عنصر التراب يمنحك الثبات والصبر، ويدعم الاستقرار الذي تشير إليه كفك.",
            Self::Air => "عنصر الهواء يمنحك سرعة التفكير والتواصل، ويتناغم مع قدراتك الذهنية.",
            Self::Water => "عنصر الماء يمنحك الحدس والعاطفة العميقة، ويقوي حساسية خط قلبك.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZodiacSign {
    pub name: &'static str,
    pub element: Element,
}

const fn sign(name: &'static str, element: Element) -> ZodiacSign {
    ZodiacSign { name, element }
}

const CAPRICORN: ZodiacSign = sign("الجدي", Element::Earth);

/// Last (month, day) of each sign, in calendar order.
const ZODIAC: [(u32, u32, ZodiacSign); 12] = [
    (1, 19, CAPRICORN),
    (2, 18, sign("الدلو", Element::Air)),
    (3, 20, sign("الحوت", Element::Water)),
    (4, 19, sign("الحمل", Element::Fire)),
    (5, 20, sign("الثور", Element::Earth)),
    (6, 20, sign("الجوزاء", Element::Air)),
    (7, 22, sign("السرطان", Element::Water)),
    (8, 22, sign("الأسد", Element::Fire)),
    (9, 22, sign("العذراء", Element::Earth)),
    (10, 22, sign("الميزان", Element::Air)),
    (11, 21, sign("العقرب", Element::Water)),
    (12, 21, sign("القوس", Element::Fire)),
];

pub fn zodiac_sign(date: NaiveDate) -> ZodiacSign {
    let day = (date.month(), date.day());
    ZODIAC
        .iter()
        .find(|(month, last, _)| day <= (*month, *last))
        .map(|(_, _, sign)| *sign)
        .unwrap_or(CAPRICORN)
}

pub fn astrology_insight(birth_date: NaiveDate) -> AstrologyInsight {
    let sign = zodiac_sign(birth_date);
    AstrologyInsight {
        sign: sign.name.to_string(),
        element: sign.element.arabic().to_string(),
        insight: sign.element.insight().to_string(),
    }
}

pub fn cultural_context(location: &str) -> CulturalContext {
    CulturalContext {
        location: location.to_string(),
        note: format!("تمت مواءمة قراءتك مع التقاليد والرموز الثقافية السائدة في {location}."),
    }
}

/// Attaches astrology and cultural context as far as the settings and the
/// user data allow.
pub fn personalize(reading: &mut Reading, user: &UserData, settings: &ReadingSettings) {
    if settings.astrology_enabled() {
        if let Some(birth_date) = user.birth_date {
            reading.astrology = Some(astrology_insight(birth_date));
        }
    }
    if settings.cultural_enabled() {
        if let Some(location) = user.location() {
            reading.cultural = Some(cultural_context(location));
        }
    }
    debug!(
        astrology = reading.astrology.is_some(),
        cultural = reading.cultural.is_some(),
        "personalization applied"
    );
}
