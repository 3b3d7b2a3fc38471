//! Google Cloud Vision `images:annotate` client.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use palmist_common::analysis::{Label, LocalizedObject, VisionAnalysis};
use palmist_common::error::RemoteError;
use palmist_common::image::PreparedImage;
use palmist_common::providers::VisionProvider;
use serde::{Deserialize, Serialize};

const PROVIDER: &str = "googleVision";

/// Local vision confidence, also used when no label survives the threshold.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

const FEATURES: [(&str, u32); 5] = [
    ("LABEL_DETECTION", 10),
    ("OBJECT_LOCALIZATION", 10),
    ("TEXT_DETECTION", 10),
    ("FACE_DETECTION", 5),
    ("LANDMARK_DETECTION", 10),
];

#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: [ImageRequest; 1],
}

#[derive(Debug, Serialize)]
struct ImageRequest {
    image: ImageContent,
    features: Vec<FeatureRequest>,
}

#[derive(Debug, Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FeatureRequest {
    #[serde(rename = "type")]
    kind: &'static str,
    max_results: u32,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    responses: Vec<ImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ImageResponse {
    label_annotations: Vec<EntityAnnotation>,
    localized_object_annotations: Vec<ObjectAnnotation>,
    text_annotations: Vec<EntityAnnotation>,
    face_annotations: Vec<serde_json::Value>,
    landmark_annotations: Vec<EntityAnnotation>,
    error: Option<ApiStatus>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EntityAnnotation {
    description: String,
    score: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ObjectAnnotation {
    name: String,
    score: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiStatus {
    message: String,
}

pub struct GoogleVisionClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    confidence_threshold: f64,
}

impl GoogleVisionClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
        confidence_threshold: f64,
    ) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Transport {
                provider: PROVIDER,
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            confidence_threshold,
        })
    }

    fn request_body(image: &PreparedImage) -> AnnotateRequest {
        AnnotateRequest {
            requests: [ImageRequest {
                image: ImageContent {
                    content: STANDARD.encode(&image.bytes),
                },
                features: FEATURES
                    .iter()
                    .map(|(kind, max_results)| FeatureRequest {
                        kind: *kind,
                        max_results: *max_results,
                    })
                    .collect(),
            }],
        }
    }

    fn summarize(&self, response: ImageResponse) -> VisionAnalysis {
        let labels: Vec<Label> = response
            .label_annotations
            .into_iter()
            .filter(|label| label.score >= self.confidence_threshold)
            .map(|label| Label {
                description: label.description,
                score: label.score,
            })
            .collect();
        let confidence = if labels.is_empty() {
            DEFAULT_CONFIDENCE
        } else {
            labels.iter().map(|label| label.score).sum::<f64>() / labels.len() as f64
        };

        VisionAnalysis {
            labels,
            objects: response
                .localized_object_annotations
                .into_iter()
                .map(|object| LocalizedObject {
                    name: object.name,
                    score: object.score,
                })
                .collect(),
            // The first text annotation holds the full detected text.
            text: response
                .text_annotations
                .into_iter()
                .next()
                .map(|text| text.description)
                .filter(|text| !text.is_empty()),
            faces: response.face_annotations.len(),
            landmarks: response
                .landmark_annotations
                .into_iter()
                .map(|landmark| landmark.description)
                .collect(),
            confidence,
        }
    }
}

#[async_trait]
impl VisionProvider for GoogleVisionClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn annotate(&self, image: &PreparedImage) -> Result<VisionAnalysis, RemoteError> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&Self::request_body(image))
            .send()
            .await
            .map_err(|e| RemoteError::Transport {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
            });
        }

        let body: AnnotateResponse = response.json().await.map_err(|e| RemoteError::Malformed {
            provider: PROVIDER,
            message: e.to_string(),
        })?;
        let first = body
            .responses
            .into_iter()
            .next()
            .ok_or_else(|| RemoteError::Malformed {
                provider: PROVIDER,
                message: "empty responses array".to_string(),
            })?;
        if let Some(error) = &first.error {
            return Err(RemoteError::Malformed {
                provider: PROVIDER,
                message: error.message.clone(),
            });
        }

        Ok(self.summarize(first))
    }
}

#[cfg(test)]
mod tests {
    use palmist_common::image::{Dimensions, ImageFormat};

    use super::*;

    fn client(threshold: f64) -> GoogleVisionClient {
        GoogleVisionClient::new("http://127.0.0.1:9", "k", Duration::from_secs(1), threshold)
            .unwrap()
    }

    #[test]
    fn request_lists_all_features() {
        let image = PreparedImage {
            source_format: ImageFormat::Png,
            original: Dimensions::new(4, 4),
            target: Dimensions::new(4, 4),
            quality: 0.8,
            bytes: b"abc".to_vec(),
        };
        let body = serde_json::to_value(GoogleVisionClient::request_body(&image)).unwrap();
        let request = &body["requests"][0];
        assert_eq!(request["image"]["content"], "YWJj");
        assert_eq!(request["features"][0]["type"], "LABEL_DETECTION");
        assert_eq!(request["features"][3]["maxResults"], 5);
        assert_eq!(request["features"].as_array().map(Vec::len), Some(5));
    }

    #[test]
    fn drops_labels_below_threshold() {
        let response: ImageResponse = serde_json::from_value(serde_json::json!({
            "labelAnnotations": [
                {"description": "Hand", "score": 0.9},
                {"description": "Finger", "score": 0.7},
                {"description": "Nail", "score": 0.3}
            ],
            "textAnnotations": [{"description": "LINE"}],
            "faceAnnotations": [{}, {}]
        }))
        .unwrap();

        let vision = client(0.6).summarize(response);
        assert_eq!(vision.labels.len(), 2);
        assert!((vision.confidence - 0.8).abs() < 1e-12);
        assert_eq!(vision.text.as_deref(), Some("LINE"));
        assert_eq!(vision.faces, 2);
    }

    #[test]
    fn no_surviving_labels_means_default_confidence() {
        let vision = client(0.95).summarize(ImageResponse::default());
        assert!(vision.labels.is_empty());
        assert_eq!(vision.confidence, DEFAULT_CONFIDENCE);
    }
}
