//! # Random Trait Generator
//!
//! Draws synthetic palm features. Each numeric field is one uniform draw
//! pushed through a fixed affine formula, so every value stays in `[0, 1]`:
//!
//! | field                | formula       |
//! |----------------------|---------------|
//! | line strength        | `U * 0.5 + 0.5` |
//! | line clarity         | `U * 0.6 + 0.4` |
//! | line length          | `U * 0.4 + 0.6` |
//! | mount influence      | `U * 0.6 + 0.4` |
//! | finger overall score | `U * 0.5 + 0.5` |

use palmist_common::image::Dimensions;
use palmist_common::palm::{
    FeatureKind, FeatureScore, FingerKind, FingerScore, Fingers, GeneratedFeature, LineKind,
    Lines, MountKind, MountScore, Mounts, PalmFeatures, PalmShape, ShapeKind,
};
use palmist_common::random::RandomSource;

use crate::content;

fn affine(random: &mut dyn RandomSource, scale: f64, offset: f64) -> f64 {
    random.next_unit() * scale + offset
}

fn owned(pool: &[&str]) -> Vec<String> {
    pool.iter().map(|s| s.to_string()).collect()
}

pub fn generate_feature(kind: FeatureKind, random: &mut dyn RandomSource) -> GeneratedFeature {
    match kind {
        FeatureKind::Line(kind) => GeneratedFeature::Line(generate_line(kind, random)),
        FeatureKind::Mount(kind) => GeneratedFeature::Mount(generate_mount(kind, random)),
        FeatureKind::Finger(kind) => GeneratedFeature::Finger(generate_finger(kind, random)),
    }
}

/// Draws strength, clarity and length, in that order.
pub fn generate_line(kind: LineKind, random: &mut dyn RandomSource) -> FeatureScore {
    let strength = affine(random, 0.5, 0.5);
    let clarity = affine(random, 0.6, 0.4);
    let length = affine(random, 0.4, 0.6);
    FeatureScore {
        kind,
        strength,
        clarity,
        length,
        traits: owned(content::line_traits(kind)),
    }
}

pub fn generate_mount(kind: MountKind, random: &mut dyn RandomSource) -> MountScore {
    MountScore {
        kind,
        influence: affine(random, 0.6, 0.4),
        meanings: owned(content::mount_meanings(kind)),
    }
}

pub fn generate_finger(kind: FingerKind, random: &mut dyn RandomSource) -> FingerScore {
    FingerScore {
        kind,
        overall_score: affine(random, 0.5, 0.5),
        meanings: owned(content::finger_meanings(kind)),
    }
}

pub fn generate_lines(random: &mut dyn RandomSource) -> Lines {
    Lines {
        heart_line: generate_line(LineKind::Heart, random),
        head_line: generate_line(LineKind::Head, random),
        life_line: generate_line(LineKind::Life, random),
        fate_line: generate_line(LineKind::Fate, random),
    }
}

pub fn generate_mounts(random: &mut dyn RandomSource) -> Mounts {
    Mounts {
        venus: generate_mount(MountKind::Venus, random),
        jupiter: generate_mount(MountKind::Jupiter, random),
        saturn: generate_mount(MountKind::Saturn, random),
        apollo: generate_mount(MountKind::Apollo, random),
        mercury: generate_mount(MountKind::Mercury, random),
        mars: generate_mount(MountKind::Mars, random),
    }
}

pub fn generate_fingers(random: &mut dyn RandomSource) -> Fingers {
    Fingers {
        thumb: generate_finger(FingerKind::Thumb, random),
        index: generate_finger(FingerKind::Index, random),
        middle: generate_finger(FingerKind::Middle, random),
        ring: generate_finger(FingerKind::Ring, random),
        pinky: generate_finger(FingerKind::Pinky, random),
    }
}

/// Classifies a length-over-width ratio.
pub fn shape_of(ratio: f64) -> ShapeKind {
    if ratio < 1.15 {
        ShapeKind::Earth
    } else if ratio < 1.3 {
        ShapeKind::Fire
    } else if ratio < 1.45 {
        ShapeKind::Air
    } else {
        ShapeKind::Water
    }
}

/// Uses the image proportions when known, otherwise draws a ratio in
/// `[1.0, 1.6)`. The ratio is rounded to two decimals.
pub fn generate_shape(dimensions: Option<Dimensions>, random: &mut dyn RandomSource) -> PalmShape {
    let ratio = dimensions
        .and_then(|dims| dims.aspect_ratio())
        .unwrap_or_else(|| affine(random, 0.6, 1.0));
    let ratio = (ratio * 100.0).round() / 100.0;
    PalmShape {
        kind: shape_of(ratio),
        ratio,
    }
}

/// Lines, then mounts, then fingers, then shape.
pub fn generate_features(
    dimensions: Option<Dimensions>,
    random: &mut dyn RandomSource,
) -> PalmFeatures {
    let lines = generate_lines(random);
    let mounts = generate_mounts(random);
    let fingers = generate_fingers(random);
    let shape = generate_shape(dimensions, random);
    PalmFeatures {
        lines,
        mounts,
        fingers,
        shape,
    }
}
