//! # Category Reading Composer
//!
//! One recipe table maps each life category to the three feature values it
//! averages. A single generic composer turns a recipe into a
//! [`CategoryResult`] by bucketing the score and picking texts from
//! [`content`].
//!
//! Randomness is only used to pick reading texts and lucky numbers. Within
//! one [`compose_reading`] call the draws happen in a fixed order: love,
//! career, money, health readings, the personality description, the
//! overall reading, then three lucky numbers.

use palmist_common::palm::{FeatureRef, FingerKind, LineKind, MountKind, PalmFeatures};
use palmist_common::random::RandomSource;
use palmist_common::reading::{
    Bucket, CategoryKind, CategoryResult, OverallResult, PersonalityResult, Reading,
};

use crate::content;

/// The three feature values averaged into a category score.
pub fn category_inputs(kind: CategoryKind) -> [FeatureRef; 3] {
    use FeatureRef::{FingerScore, LineStrength, MountInfluence};
    match kind {
        CategoryKind::Love => [
            LineStrength(LineKind::Heart),
            MountInfluence(MountKind::Venus),
            FingerScore(FingerKind::Ring),
        ],
        CategoryKind::Career => [
            LineStrength(LineKind::Head),
            MountInfluence(MountKind::Jupiter),
            FingerScore(FingerKind::Index),
        ],
        CategoryKind::Money => [
            LineStrength(LineKind::Fate),
            MountInfluence(MountKind::Jupiter),
            MountInfluence(MountKind::Saturn),
        ],
        CategoryKind::Health => [
            LineStrength(LineKind::Life),
            MountInfluence(MountKind::Mars),
            FingerScore(FingerKind::Thumb),
        ],
    }
}

pub fn category_score(kind: CategoryKind, features: &PalmFeatures) -> f64 {
    let [a, b, c] = category_inputs(kind).map(|input| features.value(input));
    (a + b + c) / 3.0
}

fn pick(pool: &content::Pool, random: &mut dyn RandomSource) -> String {
    pool[random.pick_index(pool.len())].to_string()
}

pub fn compose_category(
    kind: CategoryKind,
    features: &PalmFeatures,
    random: &mut dyn RandomSource,
) -> CategoryResult {
    let score = category_score(kind, features);
    let bucket = Bucket::of(score);
    let texts = content::category_texts(kind);
    CategoryResult {
        score,
        reading: pick(texts.readings.get(bucket), random),
        advice: texts.advice.get(bucket).to_string(),
        timeline: texts.timeline.get(bucket).to_string(),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Mean of the line-strength, mount-influence and finger-score means.
pub fn personality_score(features: &PalmFeatures) -> f64 {
    let lines = mean(features.lines.iter().map(|line| line.strength));
    let mounts = mean(features.mounts.iter().map(|mount| mount.influence));
    let fingers = mean(features.fingers.iter().map(|finger| finger.overall_score));
    (lines + mounts + fingers) / 3.0
}

/// Every trait and meaning, lines first, then mounts, then fingers, with
/// repeats dropped.
pub fn personality_traits(features: &PalmFeatures) -> Vec<String> {
    let lines = features.lines.iter().flat_map(|line| &line.traits);
    let mounts = features.mounts.iter().flat_map(|mount| &mount.meanings);
    let fingers = features.fingers.iter().flat_map(|finger| &finger.meanings);

    let mut unique: Vec<String> = Vec::new();
    for item in lines.chain(mounts).chain(fingers) {
        if !unique.contains(item) {
            unique.push(item.clone());
        }
    }
    unique
}

fn nth(traits: &[String], index: usize) -> &str {
    traits.get(index).map(String::as_str).unwrap_or_default()
}

fn joined(traits: &[String], from: usize, to: usize, separator: &str) -> String {
    let to = to.min(traits.len());
    traits.get(from..to).unwrap_or_default().join(separator)
}

const DESCRIPTION_TEMPLATES: usize = 4;

fn describe_personality(traits: &[String], template: usize) -> String {
    match template {
        0 => format!(
            "شخصيتك تتميز بـ {} و {}.",
            joined(traits, 0, 3, " و "),
            joined(traits, 3, 5, " و ")
        ),
        1 => format!(
            "أنت شخص {} و {}، وتتمتع بقدرات فريدة في {}.",
            nth(traits, 0),
            nth(traits, 1),
            nth(traits, 2)
        ),
        2 => format!(
            "صفاتك البارزة تشمل {} مما يجعلك شخصاً مميزاً.",
            joined(traits, 0, 4, "، ")
        ),
        _ => format!(
            "شخصيتك تجمع بين {} و {}، مع قدرة فائقة على {}.",
            nth(traits, 0),
            nth(traits, 1),
            nth(traits, 2)
        ),
    }
}

pub fn compose_personality(
    features: &PalmFeatures,
    random: &mut dyn RandomSource,
) -> PersonalityResult {
    let traits = personality_traits(features);
    let description = describe_personality(&traits, random.pick_index(DESCRIPTION_TEMPLATES));
    let strengths = traits.iter().take(3).cloned().collect();
    let weaknesses = content::WEAKNESSES[..2].iter().map(|s| s.to_string()).collect();
    PersonalityResult {
        score: personality_score(features),
        traits,
        description,
        strengths,
        weaknesses,
    }
}

fn lucky_numbers(random: &mut dyn RandomSource) -> Vec<u8> {
    (0..3)
        .map(|_| ((random.next_unit() * 9.0).floor() as u8).min(8) + 1)
        .collect()
}

/// `scores` are the love, career, money, health and personality scores.
pub fn compose_overall(scores: [f64; 5], random: &mut dyn RandomSource) -> OverallResult {
    let score = mean(scores.into_iter());
    let bucket = Bucket::of(score);
    let reading = pick(content::OVERALL.readings.get(bucket), random);
    OverallResult {
        score,
        reading,
        advice: content::OVERALL.advice.get(bucket).to_string(),
        lucky_numbers: lucky_numbers(random),
        lucky_colors: content::LUCKY_COLORS[..2].iter().map(|s| s.to_string()).collect(),
        lucky_days: content::LUCKY_DAYS[..2].iter().map(|s| s.to_string()).collect(),
    }
}

/// Composes the full local reading. Personal extras are left empty.
pub fn compose_reading(features: &PalmFeatures, random: &mut dyn RandomSource) -> Reading {
    let [love, career, money, health] =
        CategoryKind::ALL.map(|kind| compose_category(kind, features, random));
    let personality = compose_personality(features, random);
    let overall = compose_overall(
        [
            love.score,
            career.score,
            money.score,
            health.score,
            personality.score,
        ],
        random,
    );
    Reading {
        love,
        career,
        money,
        health,
        personality,
        overall,
        astrology: None,
        cultural: None,
    }
}
