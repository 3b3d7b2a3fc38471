//! # Remote Analysis Adapter
//!
//! Optional remote providers in front of the local generators. Each `try_*`
//! call either returns the provider's answer or the reason the caller has
//! to fall back; remote failures never escape this module.
//!
//! A provider is only built when its API key is usable, so a missing key
//! short-circuits to [`FallbackReason::NotConfigured`] without any network
//! traffic.

use palmist_common::analysis::{FallbackReason, RemoteOutcome, VisionAnalysis};
use palmist_common::config::Config;
use palmist_common::error::RemoteError;
use palmist_common::image::PreparedImage;
use palmist_common::palm::PalmFeatures;
use palmist_common::providers::{NarrativeProvider, VisionProvider};
use palmist_common::user::UserData;
use tracing::{debug, warn};

use crate::narrative::{self, NarrativeSections};

pub mod google_vision;
pub mod openai;

use google_vision::GoogleVisionClient;
use openai::OpenAiClient;

pub const VISION_PROVIDER: &str = "googleVision";
pub const NARRATIVE_PROVIDER: &str = "openai";

/// What the local path reports in place of a vision answer.
pub fn local_vision() -> VisionAnalysis {
    VisionAnalysis {
        confidence: google_vision::DEFAULT_CONFIDENCE,
        ..VisionAnalysis::default()
    }
}

#[derive(Default)]
pub struct RemoteAnalysis {
    vision: Option<Box<dyn VisionProvider>>,
    narrator: Option<Box<dyn NarrativeProvider>>,
}

impl RemoteAnalysis {
    /// Builds the HTTP clients for every provider with a usable key.
    pub fn from_config(config: &Config) -> Self {
        let timeout = config.endpoints.timeout();
        let vision = config.api_keys.google_vision().and_then(|key| {
            let client = GoogleVisionClient::new(
                &config.endpoints.vision,
                key,
                timeout,
                config.ai.analysis.confidence_threshold,
            );
            usable(client).map(|c| Box::new(c) as Box<dyn VisionProvider>)
        });
        let narrator = config.api_keys.openai().and_then(|key| {
            let client = OpenAiClient::new(&config.endpoints.chat, key, timeout, &config.ai.reading);
            usable(client).map(|c| Box::new(c) as Box<dyn NarrativeProvider>)
        });
        Self { vision, narrator }
    }

    pub fn with_vision(mut self, vision: Box<dyn VisionProvider>) -> Self {
        self.vision = Some(vision);
        self
    }

    pub fn with_narrator(mut self, narrator: Box<dyn NarrativeProvider>) -> Self {
        self.narrator = Some(narrator);
        self
    }

    pub fn has_vision(&self) -> bool {
        self.vision.is_some()
    }

    pub fn has_narrator(&self) -> bool {
        self.narrator.is_some()
    }

    pub async fn try_remote_vision(&self, image: &PreparedImage) -> RemoteOutcome<VisionAnalysis> {
        let Some(vision) = &self.vision else {
            return not_configured(VISION_PROVIDER);
        };
        match vision.annotate(image).await {
            Ok(analysis) => {
                debug!(
                    provider = vision.name(),
                    labels = analysis.labels.len(),
                    "remote vision answered"
                );
                RemoteOutcome::Remote(analysis)
            }
            Err(err) => fallback(err),
        }
    }

    pub async fn try_remote_reading(
        &self,
        features: &PalmFeatures,
        user: &UserData,
    ) -> RemoteOutcome<NarrativeSections> {
        let Some(narrator) = &self.narrator else {
            return not_configured(NARRATIVE_PROVIDER);
        };
        let prompt = narrative::build_prompt(features, user);
        let reply = match narrator.narrate(&prompt).await {
            Ok(reply) => reply,
            Err(err) => return fallback(err),
        };
        match narrative::parse_sections(&reply) {
            Ok(sections) => {
                debug!(provider = narrator.name(), "remote reading parsed");
                RemoteOutcome::Remote(sections)
            }
            Err(missing) => fallback(RemoteError::Malformed {
                provider: narrator.name(),
                message: format!("reply is missing sections {missing:?}"),
            }),
        }
    }
}

fn usable<T>(client: Result<T, RemoteError>) -> Option<T> {
    client
        .inspect_err(|err| warn!("Could not build HTTP client: {err}"))
        .ok()
}

fn not_configured<T>(provider: &str) -> RemoteOutcome<T> {
    debug!(provider, "no API key, using local generation");
    RemoteOutcome::Fallback(FallbackReason::NotConfigured {
        provider: provider.to_string(),
    })
}

fn fallback<T>(err: RemoteError) -> RemoteOutcome<T> {
    warn!("{err}; falling back to local generation");
    RemoteOutcome::Fallback(FallbackReason::from(&err))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use palmist_common::image::{Dimensions, ImageFormat};
    use palmist_common::providers::NarrativePrompt;
    use palmist_common::random::SequenceSource;

    use super::*;
    use crate::generator;

    struct Failing;

    #[async_trait]
    impl VisionProvider for Failing {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn annotate(&self, _: &PreparedImage) -> Result<VisionAnalysis, RemoteError> {
            Err(RemoteError::Status {
                provider: "stub",
                status: 503,
            })
        }
    }

    struct Canned(&'static str);

    #[async_trait]
    impl NarrativeProvider for Canned {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn narrate(&self, _: &NarrativePrompt) -> Result<String, RemoteError> {
            Ok(self.0.to_string())
        }
    }

    fn image() -> PreparedImage {
        PreparedImage {
            source_format: ImageFormat::Jpeg,
            original: Dimensions::new(4, 4),
            target: Dimensions::new(4, 4),
            quality: 0.8,
            bytes: vec![0xFF, 0xD8, 0xFF],
        }
    }

    fn features() -> PalmFeatures {
        generator::generate_features(None, &mut SequenceSource::constant(0.5))
    }

    #[test]
    fn placeholder_keys_build_no_providers() {
        let config = Config::from_json_str(
            r#"{"apiKeys":{"googleVision":"YOUR_GOOGLE_VISION_KEY","openai":""}}"#,
        )
        .unwrap();
        let remote = RemoteAnalysis::from_config(&config);
        assert!(!remote.has_vision());
        assert!(!remote.has_narrator());
    }

    #[tokio::test]
    async fn missing_providers_fall_back_as_not_configured() {
        let remote = RemoteAnalysis::default();
        assert_eq!(
            remote.try_remote_vision(&image()).await,
            RemoteOutcome::Fallback(FallbackReason::NotConfigured {
                provider: VISION_PROVIDER.to_string()
            })
        );
        let reading = remote.try_remote_reading(&features(), &UserData::default()).await;
        assert!(!reading.is_remote());
    }

    #[tokio::test]
    async fn provider_errors_become_failed_fallbacks() {
        let remote = RemoteAnalysis::default().with_vision(Box::new(Failing));
        match remote.try_remote_vision(&image()).await {
            RemoteOutcome::Fallback(FallbackReason::Failed { provider, message }) => {
                assert_eq!(provider, "stub");
                assert!(message.contains("503"));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn unparseable_reply_is_malformed() {
        let remote = RemoteAnalysis::default().with_narrator(Box::new(Canned("no sections here")));
        match remote.try_remote_reading(&features(), &UserData::default()).await {
            RemoteOutcome::Fallback(FallbackReason::Failed { message, .. }) => {
                assert!(message.contains("malformed"));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn well_formed_reply_is_remote() {
        let reply = "1. a\nحب\n2. b\nعمل\n3. c\nصحة\n4. d\nمال\n5. e\nشخصية";
        let remote = RemoteAnalysis::default().with_narrator(Box::new(Canned(reply)));
        let outcome = remote.try_remote_reading(&features(), &UserData::default()).await;
        match outcome {
            RemoteOutcome::Remote(sections) => assert_eq!(sections.health, "صحة"),
            other => panic!("unexpected outcome {other:?}"),
        }
    }
}
