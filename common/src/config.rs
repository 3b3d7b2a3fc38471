//! # Configuration
//!
//! One JSON document in camelCase, every key optional:
//!
//! ```json
//! {
//!   "apiKeys": { "googleVision": "...", "openai": "..." },
//!   "ai": {
//!     "analysis": { "maxImageSize": 1024, "quality": 0.8 },
//!     "reading": { "maxTokens": 1500, "temperature": 0.7 }
//!   }
//! }
//! ```
//!
//! Keys can also come from `GOOGLE_VISION_API_KEY`, `OPENAI_API_KEY` and
//! `HUGGINGFACE_API_KEY`, which win over the file.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

pub const GOOGLE_VISION_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";
pub const OPENAI_CHAT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub api_keys: ApiKeys,
    pub ai: AiSettings,
    pub endpoints: Endpoints,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiKeys {
    pub google_vision: Option<String>,
    pub openai: Option<String>,
    /// Accepted for compatibility; no provider uses it yet.
    pub huggingface: Option<String>,
}

impl ApiKeys {
    /// The Google Vision key, unless absent, blank or a `YOUR_…` placeholder.
    pub fn google_vision(&self) -> Option<&str> {
        usable_key(self.google_vision.as_deref())
    }

    pub fn openai(&self) -> Option<&str> {
        usable_key(self.openai.as_deref())
    }

    pub fn huggingface(&self) -> Option<&str> {
        usable_key(self.huggingface.as_deref())
    }
}

fn usable_key(key: Option<&str>) -> Option<&str> {
    key.map(str::trim)
        .filter(|key| !key.is_empty() && !key.starts_with("YOUR_"))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiSettings {
    pub analysis: AnalysisSettings,
    pub reading: ReadingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisSettings {
    /// Longest side, in pixels, an image is analysed at.
    pub max_image_size: u32,
    /// Encoding quality hint for the analysed image.
    pub quality: f32,
    /// Vision labels scoring below this are dropped.
    pub confidence_threshold: f64,
    pub enable_cache: bool,
    /// Milliseconds a cached result stays valid.
    pub cache_timeout: u64,
    /// Artificial pause, in milliseconds, spent in every stage.
    pub stage_delay_ms: u64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            max_image_size: 1024,
            quality: 0.8,
            confidence_threshold: 0.6,
            enable_cache: true,
            cache_timeout: 300_000,
            stage_delay_ms: 0,
        }
    }
}

impl AnalysisSettings {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_timeout)
    }

    pub fn stage_delay(&self) -> Duration {
        Duration::from_millis(self.stage_delay_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonalizationLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadingSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub include_astrology: bool,
    pub include_cultural: bool,
    pub personalization_level: PersonalizationLevel,
}

impl Default for ReadingSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            max_tokens: 1500,
            temperature: 0.7,
            include_astrology: true,
            include_cultural: true,
            personalization_level: PersonalizationLevel::High,
        }
    }
}

impl ReadingSettings {
    pub fn astrology_enabled(&self) -> bool {
        self.include_astrology && self.personalization_level != PersonalizationLevel::Low
    }

    pub fn cultural_enabled(&self) -> bool {
        self.include_cultural && self.personalization_level == PersonalizationLevel::High
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Endpoints {
    pub vision: String,
    pub chat: String,
    pub timeout_secs: u64,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            vision: GOOGLE_VISION_ENDPOINT.to_string(),
            chat: OPENAI_CHAT_ENDPOINT.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Endpoints {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loading configuration from {}", path.display());
        Self::from_json_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies the provider key environment variables.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let slots = [
            ("GOOGLE_VISION_API_KEY", &mut self.api_keys.google_vision),
            ("OPENAI_API_KEY", &mut self.api_keys.openai),
            ("HUGGINGFACE_API_KEY", &mut self.api_keys.huggingface),
        ];
        for (name, slot) in slots {
            if let Some(value) = lookup(name).filter(|value| !value.trim().is_empty()) {
                debug!("{name} overrides the configured key");
                *slot = Some(value);
            }
        }
        self
    }

    /// Names of the configured providers that are missing a usable key.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_keys.google_vision().is_none() {
            missing.push("googleVision");
        }
        if self.api_keys.openai().is_none() {
            missing.push("openai");
        }
        missing
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
