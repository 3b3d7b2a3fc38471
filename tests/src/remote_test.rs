use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::GenericImageView;
use palmist_common::analysis::Origin;
use palmist_core::PalmAnalyzer;

use super::util::{SECTIONED_REPLY, StubReply, StubServer, chat_reply, png, user, vision_reply};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[tokio::test]
async fn remote_vision_and_narrative_are_used() -> anyhow::Result<()> {
    let server = StubServer::start(
        StubReply::ok(vision_reply(&[("Hand", 0.9), ("Finger", 0.7), ("Nail", 0.3)])),
        StubReply::ok(chat_reply(SECTIONED_REPLY)),
    );
    let analyzer = PalmAnalyzer::new(server.config(Some("vision-key"), Some("sk-test")));

    let result = analyzer.analyze(png(800, 1200), &user()).await?;

    assert_eq!(result.provenance.vision, Origin::Remote);
    assert_eq!(result.provenance.reading, Origin::Remote);
    assert!(result.is_fully_remote());

    // Labels under the 0.6 threshold are dropped before averaging.
    assert_eq!(result.vision.labels.len(), 2);
    assert!(close(result.vision.confidence, 0.8));
    assert!(close(result.confidence, 0.7));
    assert_eq!(result.vision.text.as_deref(), Some("LINES"));

    assert_eq!(result.reading.love.reading, "قلب دافئ ينتظر من يفهمه.");
    assert_eq!(result.reading.money.reading, "إدارة حكيمة تجلب الاستقرار.");
    assert_eq!(result.reading.personality.description, "هادئ ومتأمل وصادق.");
    assert_eq!(result.reading.overall.reading, "سنة مليئة بالفرص.");
    Ok(())
}

#[tokio::test]
async fn vision_request_carries_key_and_all_features() {
    let server = StubServer::start(
        StubReply::ok(vision_reply(&[("Hand", 0.9)])),
        StubReply::status(500),
    );
    let analyzer = PalmAnalyzer::new(server.config(Some("vision-key"), None));

    analyzer.analyze(png(800, 1200), &user()).await.unwrap();

    let requests = server.requests("vision");
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.query.get("key").map(String::as_str), Some("vision-key"));

    let image_request = &request.body["requests"][0];
    assert!(!image_request["image"]["content"].as_str().unwrap().is_empty());
    let kinds: Vec<&str> = image_request["features"]
        .as_array()
        .unwrap()
        .iter()
        .map(|feature| feature["type"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        [
            "LABEL_DETECTION",
            "OBJECT_LOCALIZATION",
            "TEXT_DETECTION",
            "FACE_DETECTION",
            "LANDMARK_DETECTION"
        ]
    );
    assert_eq!(image_request["features"][3]["maxResults"], 5);
}

#[tokio::test]
async fn chat_request_uses_bearer_key_and_settings() -> anyhow::Result<()> {
    let server = StubServer::start(StubReply::status(500), StubReply::ok(chat_reply(SECTIONED_REPLY)));
    let analyzer = PalmAnalyzer::new(server.config(None, Some("sk-test")));

    analyzer.analyze(png(800, 1200), &user()).await?;

    let requests = server.requests("chat");
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.authorization.as_deref(), Some("Bearer sk-test"));
    assert_eq!(request.body["model"], "gpt-4");
    assert_eq!(request.body["max_tokens"], 1500);
    assert_eq!(request.body["messages"][0]["role"], "system");
    assert_eq!(request.body["messages"][1]["role"], "user");
    assert!(request.body["messages"][1]["content"].as_str().unwrap().contains("Yara"));
    Ok(())
}

#[tokio::test]
async fn vision_payload_is_scaled_jpeg() {
    let server = StubServer::start(
        StubReply::ok(vision_reply(&[("Hand", 0.9)])),
        StubReply::status(500),
    );
    let mut config = server.config(Some("vision-key"), None);
    config.ai.analysis.max_image_size = 512;
    config.ai.analysis.quality = 0.3;
    let analyzer = PalmAnalyzer::new(config);

    analyzer.analyze(png(2000, 1500), &user()).await.unwrap();

    let requests = server.requests("vision");
    let content = requests[0].body["requests"][0]["image"]["content"].as_str().unwrap();
    let sent = STANDARD.decode(content).unwrap();
    assert_eq!(&sent[..3], &[0xFF, 0xD8, 0xFF]);
    let decoded = image::load_from_memory_with_format(&sent, image::ImageFormat::Jpeg).unwrap();
    assert_eq!(decoded.dimensions(), (512, 384));
}
