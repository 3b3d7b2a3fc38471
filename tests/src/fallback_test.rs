use palmist_common::analysis::{AnalysisResult, FallbackReason, Origin, Stage};
use palmist_core::PalmAnalyzer;
use serde_json::Value;

use super::util::{StubReply, StubServer, chat_reply, key_paths, png, quiet_config, user};

fn failed_provider(origin: &Origin) -> Option<(&str, &str)> {
    match origin {
        Origin::Local {
            reason: FallbackReason::Failed { provider, message },
        } => Some((provider.as_str(), message.as_str())),
        _ => None,
    }
}

fn shape_without_provenance(result: &AnalysisResult) -> Vec<String> {
    let mut value = serde_json::to_value(result).unwrap();
    if let Value::Object(map) = &mut value {
        map.remove("provenance");
    }
    key_paths(&value)
}

/*************************************************************
                       Without any keys
**************************************************************/

#[tokio::test]
async fn zero_keys_produce_a_complete_local_reading() {
    let analyzer = PalmAnalyzer::new(quiet_config());

    let result = analyzer.analyze(png(800, 1200), &user()).await.unwrap();

    assert!((0.0..=1.0).contains(&result.confidence));
    assert_eq!(result.confidence, 0.55);
    assert_eq!(result.mounts.len(), 6);
    assert_eq!(result.fingers.len(), 5);
    assert_eq!(result.reading.overall.lucky_numbers.len(), 3);
    assert!(!result.reading.love.reading.is_empty());
    assert!(result.reading.astrology.is_some());
    assert!(result.reading.cultural.is_some());
    for origin in [&result.provenance.vision, &result.provenance.reading] {
        assert!(matches!(
            origin,
            Origin::Local {
                reason: FallbackReason::NotConfigured { .. }
            }
        ));
    }
    assert_eq!(analyzer.stage(), Stage::Complete);
    assert_eq!(analyzer.current_analysis(), Some(result));
}

/*************************************************************
                    Remote failures fall back
**************************************************************/

#[tokio::test]
async fn chat_server_error_falls_back_with_same_shape() {
    let server = StubServer::start(StubReply::status(500), StubReply::status(500));
    let analyzer = PalmAnalyzer::new(server.config(None, Some("sk-test")));

    let result = analyzer.analyze(png(800, 1200), &user()).await.unwrap();

    let (provider, message) = failed_provider(&result.provenance.reading).unwrap();
    assert_eq!(provider, "openai");
    assert!(message.contains("500"), "unexpected message: {message}");
    assert_eq!(server.requests("chat").len(), 1);

    let local = PalmAnalyzer::new(quiet_config())
        .analyze(png(800, 1200), &user())
        .await
        .unwrap();
    assert_eq!(shape_without_provenance(&result), shape_without_provenance(&local));
}

#[tokio::test]
async fn chat_reply_without_sections_falls_back() {
    let server = StubServer::start(
        StubReply::status(500),
        StubReply::ok(chat_reply("لا أستطيع قراءة هذه الصورة.")),
    );
    let analyzer = PalmAnalyzer::new(server.config(None, Some("sk-test")));

    let result = analyzer.analyze(png(800, 1200), &user()).await.unwrap();

    let (provider, message) = failed_provider(&result.provenance.reading).unwrap();
    assert_eq!(provider, "openai");
    assert!(message.contains("malformed"), "unexpected message: {message}");
    assert!(!result.reading.love.reading.is_empty());
}

#[tokio::test]
async fn chat_payload_without_choices_falls_back() {
    let server = StubServer::start(
        StubReply::status(500),
        StubReply::ok(serde_json::json!({ "unexpected": true })),
    );
    let analyzer = PalmAnalyzer::new(server.config(None, Some("sk-test")));

    let result = analyzer.analyze(png(800, 1200), &user()).await.unwrap();

    assert!(failed_provider(&result.provenance.reading).is_some());
    assert_eq!(analyzer.stage(), Stage::Complete);
}

#[tokio::test]
async fn vision_error_uses_local_confidence() {
    let server = StubServer::start(StubReply::status(503), StubReply::status(500));
    let analyzer = PalmAnalyzer::new(server.config(Some("vision-key"), None));

    let result = analyzer.analyze(png(800, 1200), &user()).await.unwrap();

    let (provider, _) = failed_provider(&result.provenance.vision).unwrap();
    assert_eq!(provider, "googleVision");
    assert_eq!(result.vision.confidence, 0.5);
    assert_eq!(result.confidence, 0.55);
    assert!(matches!(
        result.provenance.reading,
        Origin::Local {
            reason: FallbackReason::NotConfigured { .. }
        }
    ));
}
