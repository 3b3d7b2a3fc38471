//! # Palm Feature Model
//!
//! The synthetic features a reading is built from:
//! * four **lines** scored by strength, clarity and length,
//! * six **mounts** scored by influence,
//! * five **fingers** scored by an overall score,
//! * the overall palm **shape**.
//!
//! All numeric scores live in `[0, 1]`, except the shape ratio.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Heart,
    Head,
    Life,
    Fate,
}

impl LineKind {
    pub const ALL: [LineKind; 4] = [Self::Heart, Self::Head, Self::Life, Self::Fate];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Heart => "heart",
            Self::Head => "head",
            Self::Life => "life",
            Self::Fate => "fate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MountKind {
    Venus,
    Jupiter,
    Saturn,
    Apollo,
    Mercury,
    Mars,
}

impl MountKind {
    pub const ALL: [MountKind; 6] = [
        Self::Venus,
        Self::Jupiter,
        Self::Saturn,
        Self::Apollo,
        Self::Mercury,
        Self::Mars,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Venus => "venus",
            Self::Jupiter => "jupiter",
            Self::Saturn => "saturn",
            Self::Apollo => "apollo",
            Self::Mercury => "mercury",
            Self::Mars => "mars",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerKind {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl FingerKind {
    pub const ALL: [FingerKind; 5] = [
        Self::Thumb,
        Self::Index,
        Self::Middle,
        Self::Ring,
        Self::Pinky,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Thumb => "thumb",
            Self::Index => "index",
            Self::Middle => "middle",
            Self::Ring => "ring",
            Self::Pinky => "pinky",
        }
    }
}

/// Any feature the generator knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Line(LineKind),
    Mount(MountKind),
    Finger(FingerKind),
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line(kind) => write!(f, "{} line", kind.name()),
            Self::Mount(kind) => write!(f, "{} mount", kind.name()),
            Self::Finger(kind) => write!(f, "{} finger", kind.name()),
        }
    }
}

/// Scores of one palm line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureScore {
    pub kind: LineKind,
    pub strength: f64,
    pub clarity: f64,
    pub length: f64,
    pub traits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountScore {
    pub kind: MountKind,
    pub influence: f64,
    pub meanings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerScore {
    pub kind: FingerKind,
    pub overall_score: f64,
    pub meanings: Vec<String>,
}

/// Output of the generator for a [`FeatureKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedFeature {
    Line(FeatureScore),
    Mount(MountScore),
    Finger(FingerScore),
}

impl GeneratedFeature {
    /// Every numeric field of the feature, in declaration order.
    pub fn numeric_fields(&self) -> Vec<f64> {
        match self {
            Self::Line(line) => vec![line.strength, line.clarity, line.length],
            Self::Mount(mount) => vec![mount.influence],
            Self::Finger(finger) => vec![finger.overall_score],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Earth,
    Fire,
    Air,
    Water,
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Earth => "earth",
            Self::Fire => "fire",
            Self::Air => "air",
            Self::Water => "water",
        }
    }
}

/// Palm proportions: `ratio` is length over width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PalmShape {
    pub kind: ShapeKind,
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lines {
    pub heart_line: FeatureScore,
    pub head_line: FeatureScore,
    pub life_line: FeatureScore,
    pub fate_line: FeatureScore,
}

impl Lines {
    pub fn get(&self, kind: LineKind) -> &FeatureScore {
        match kind {
            LineKind::Heart => &self.heart_line,
            LineKind::Head => &self.head_line,
            LineKind::Life => &self.life_line,
            LineKind::Fate => &self.fate_line,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureScore> {
        LineKind::ALL.into_iter().map(move |kind| self.get(kind))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mounts {
    pub venus: MountScore,
    pub jupiter: MountScore,
    pub saturn: MountScore,
    pub apollo: MountScore,
    pub mercury: MountScore,
    pub mars: MountScore,
}

impl Mounts {
    pub fn get(&self, kind: MountKind) -> &MountScore {
        match kind {
            MountKind::Venus => &self.venus,
            MountKind::Jupiter => &self.jupiter,
            MountKind::Saturn => &self.saturn,
            MountKind::Apollo => &self.apollo,
            MountKind::Mercury => &self.mercury,
            MountKind::Mars => &self.mars,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MountScore> {
        MountKind::ALL.into_iter().map(move |kind| self.get(kind))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fingers {
    pub thumb: FingerScore,
    pub index: FingerScore,
    pub middle: FingerScore,
    pub ring: FingerScore,
    pub pinky: FingerScore,
}

impl Fingers {
    pub fn get(&self, kind: FingerKind) -> &FingerScore {
        match kind {
            FingerKind::Thumb => &self.thumb,
            FingerKind::Index => &self.index,
            FingerKind::Middle => &self.middle,
            FingerKind::Ring => &self.ring,
            FingerKind::Pinky => &self.pinky,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FingerScore> {
        FingerKind::ALL.into_iter().map(move |kind| self.get(kind))
    }
}

/// Everything the composer needs to write a reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PalmFeatures {
    pub lines: Lines,
    pub mounts: Mounts,
    pub fingers: Fingers,
    pub shape: PalmShape,
}

/// A named scalar inside [`PalmFeatures`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureRef {
    LineStrength(LineKind),
    MountInfluence(MountKind),
    FingerScore(FingerKind),
}

impl PalmFeatures {
    pub fn value(&self, feature: FeatureRef) -> f64 {
        match feature {
            FeatureRef::LineStrength(kind) => self.lines.get(kind).strength,
            FeatureRef::MountInfluence(kind) => self.mounts.get(kind).influence,
            FeatureRef::FingerScore(kind) => self.fingers.get(kind).overall_score,
        }
    }
}
