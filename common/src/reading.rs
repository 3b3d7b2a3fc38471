//! # Reading Model
//!
//! The life-category results produced by the composer and consumed by
//! whatever renders the reading.

use serde::{Deserialize, Serialize};

pub const HIGH_THRESHOLD: f64 = 0.7;
pub const MEDIUM_THRESHOLD: f64 = 0.4;

/// Score band used to pick texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    High,
    Medium,
    Low,
}

impl Bucket {
    /// `> 0.7` is high, `> 0.4` is medium, anything else (NaN included) is low.
    pub fn of(score: f64) -> Self {
        if score > HIGH_THRESHOLD {
            Self::High
        } else if score > MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// The four life categories composed from a fixed triple of features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Love,
    Career,
    Money,
    Health,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 4] = [Self::Love, Self::Career, Self::Money, Self::Health];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Love => "love",
            Self::Career => "career",
            Self::Money => "money",
            Self::Health => "health",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResult {
    pub score: f64,
    pub reading: String,
    pub advice: String,
    pub timeline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityResult {
    pub score: f64,
    /// Unique traits in order of first occurrence.
    pub traits: Vec<String>,
    pub description: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallResult {
    pub score: f64,
    pub reading: String,
    pub advice: String,
    pub lucky_numbers: Vec<u8>,
    pub lucky_colors: Vec<String>,
    pub lucky_days: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AstrologyInsight {
    pub sign: String,
    pub element: String,
    pub insight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CulturalContext {
    pub location: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub love: CategoryResult,
    pub career: CategoryResult,
    pub money: CategoryResult,
    pub health: CategoryResult,
    pub personality: PersonalityResult,
    pub overall: OverallResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub astrology: Option<AstrologyInsight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cultural: Option<CulturalContext>,
}

impl Reading {
    pub fn category(&self, kind: CategoryKind) -> &CategoryResult {
        match kind {
            CategoryKind::Love => &self.love,
            CategoryKind::Career => &self.career,
            CategoryKind::Money => &self.money,
            CategoryKind::Health => &self.health,
        }
    }

    pub fn category_mut(&mut self, kind: CategoryKind) -> &mut CategoryResult {
        match kind {
            CategoryKind::Love => &mut self.love,
            CategoryKind::Career => &mut self.career,
            CategoryKind::Money => &mut self.money,
            CategoryKind::Health => &mut self.health,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_exclusive() {
        assert_eq!(Bucket::of(0.7), Bucket::Medium);
        assert_eq!(Bucket::of(0.700_000_1), Bucket::High);
        assert_eq!(Bucket::of(0.4), Bucket::Low);
        assert_eq!(Bucket::of(0.400_000_1), Bucket::Medium);
        assert_eq!(Bucket::of(f64::NAN), Bucket::Low);
    }

    #[test]
    fn exactly_one_bucket_per_score() {
        for step in 0..=10_000 {
            let score = step as f64 / 10_000.0;
            let high = score > 0.7;
            let medium = score > 0.4 && score <= 0.7;
            let low = score <= 0.4;
            assert_eq!([high, medium, low].iter().filter(|hit| **hit).count(), 1);

            let expected = if high {
                Bucket::High
            } else if medium {
                Bucket::Medium
            } else {
                Bucket::Low
            };
            assert_eq!(Bucket::of(score), expected, "score {score}");
        }
    }
}
