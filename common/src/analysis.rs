//! # Analysis Result Model
//!
//! The root object returned by one analysis run, plus the vocabulary the
//! orchestrator uses to describe its progress and where each part of the
//! result came from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RemoteError;
use crate::palm::{FeatureScore, FingerScore, MountScore, PalmShape};
use crate::reading::Reading;

/// Stages of one run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    Idle,
    Preprocessing,
    VisionAnalysis,
    LineDetection,
    FeatureExtraction,
    ReadingGeneration,
    Personalization,
    Complete,
}

impl Stage {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Idle => "Waiting for a palm",
            Self::Preprocessing => "Preparing the palm image...",
            Self::VisionAnalysis => "Looking at the palm...",
            Self::LineDetection => "Tracing the major lines...",
            Self::FeatureExtraction => "Examining mounts and fingers...",
            Self::ReadingGeneration => "Writing the reading...",
            Self::Personalization => "Adding personal touches...",
            Self::Complete => "Reading complete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub description: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedObject {
    pub name: String,
    pub score: f64,
}

/// What the vision step saw in the image.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionAnalysis {
    pub labels: Vec<Label>,
    pub objects: Vec<LocalizedObject>,
    pub text: Option<String>,
    pub faces: usize,
    pub landmarks: Vec<String>,
    pub confidence: f64,
}

/// Why a remote provider was not used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FallbackReason {
    NotConfigured { provider: String },
    Failed { provider: String, message: String },
}

impl From<&RemoteError> for FallbackReason {
    fn from(err: &RemoteError) -> Self {
        match err {
            RemoteError::MissingKey { provider } => Self::NotConfigured {
                provider: provider.to_string(),
            },
            other => Self::Failed {
                provider: other.provider().to_string(),
                message: other.to_string(),
            },
        }
    }
}

/// Result of trying a remote provider: either its answer, or the reason
/// the caller has to generate the value locally.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteOutcome<T> {
    Remote(T),
    Fallback(FallbackReason),
}

impl<T> RemoteOutcome<T> {
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

/// Where a part of the result came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "camelCase")]
pub enum Origin {
    Remote,
    Local { reason: FallbackReason },
}

impl Origin {
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    pub vision: Origin,
    pub reading: Origin,
}

/// A score together with the text written for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interpreted<T> {
    #[serde(flatten)]
    pub score: T,
    pub interpretation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineReport {
    pub heart_line: Interpreted<FeatureScore>,
    pub head_line: Interpreted<FeatureScore>,
    pub life_line: Interpreted<FeatureScore>,
    pub fate_line: Interpreted<FeatureScore>,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub vision: VisionAnalysis,
    pub lines: LineReport,
    pub mounts: Vec<Interpreted<MountScore>>,
    pub fingers: Vec<Interpreted<FingerScore>>,
    pub shape: PalmShape,
    pub reading: Reading,
    pub provenance: Provenance,
    pub timestamp: DateTime<Utc>,
    pub confidence: f64,
}

impl AnalysisResult {
    /// `true` when every remote provider answered.
    pub fn is_fully_remote(&self) -> bool {
        self.provenance.vision.is_remote() && self.provenance.reading.is_remote()
    }
}
