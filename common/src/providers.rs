//! # Provider Ports
//!
//! Contracts for the optional remote services. The engine depends on these
//! traits only; concrete HTTP clients live in `palmist-core::remote`, and
//! tests plug in their own implementations.

use async_trait::async_trait;

use crate::analysis::VisionAnalysis;
use crate::error::RemoteError;
use crate::image::PreparedImage;

/// Labels an image.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn annotate(&self, image: &PreparedImage) -> Result<VisionAnalysis, RemoteError>;
}

/// The two messages sent to a chat-completion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativePrompt {
    pub system: String,
    pub user: String,
}

/// Writes a free-text reading from a prompt.
#[async_trait]
pub trait NarrativeProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns the text of the first completion choice.
    async fn narrate(&self, prompt: &NarrativePrompt) -> Result<String, RemoteError>;
}
