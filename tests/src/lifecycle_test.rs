use std::sync::Arc;

use async_trait::async_trait;
use palmist_common::analysis::{AnalysisResult, Stage};
use palmist_common::error::{AnalysisError, InputError, RemoteError};
use palmist_common::image::PalmImage;
use palmist_common::providers::{NarrativePrompt, NarrativeProvider};
use palmist_common::random::SequenceSource;
use palmist_core::PalmAnalyzer;
use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;

use super::util::{SECTIONED_REPLY, png, quiet_config, user};

/// Parks inside the reading stage until released.
struct GatedNarrator {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

#[async_trait]
impl NarrativeProvider for GatedNarrator {
    fn name(&self) -> &'static str {
        "gated"
    }

    async fn narrate(&self, _prompt: &NarrativePrompt) -> Result<String, RemoteError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(SECTIONED_REPLY.to_string())
    }
}

fn gated_analyzer() -> (Arc<PalmAnalyzer>, Arc<Notify>, Arc<Notify>) {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let narrator = GatedNarrator {
        entered: Arc::clone(&entered),
        release: Arc::clone(&release),
    };
    let analyzer = PalmAnalyzer::new(quiet_config()).with_narrator(Box::new(narrator));
    (Arc::new(analyzer), entered, release)
}

fn spawn_analysis(
    analyzer: &Arc<PalmAnalyzer>,
) -> JoinHandle<Result<AnalysisResult, AnalysisError>> {
    let analyzer = Arc::clone(analyzer);
    tokio::spawn(async move {
        let user = user();
        analyzer.analyze(png(800, 1200), &user).await
    })
}

/*************************************************************
                     One run at a time
**************************************************************/

#[tokio::test]
async fn second_request_is_rejected_while_running() {
    let (analyzer, entered, release) = gated_analyzer();

    let first = spawn_analysis(&analyzer);
    entered.notified().await;

    assert!(analyzer.is_analyzing());
    assert_eq!(analyzer.stage(), Stage::ReadingGeneration);
    let second = analyzer.analyze(png(800, 1200), &user()).await;
    assert!(matches!(second, Err(AnalysisError::AlreadyRunning)));

    // The rejection leaves the first run untouched.
    assert_eq!(analyzer.stage(), Stage::ReadingGeneration);
    release.notify_one();
    let result = first.await.unwrap().unwrap();
    assert!(result.provenance.reading.is_remote());
    assert!(!analyzer.is_analyzing());
    assert_eq!(analyzer.stage(), Stage::Complete);
}

#[tokio::test]
async fn rejection_during_feature_extraction_keeps_first_result() {
    let (stage_tx, mut stage_rx) = watch::channel(Stage::Idle);
    let mut config = quiet_config();
    config.ai.analysis.stage_delay_ms = 200;
    let analyzer = Arc::new(
        PalmAnalyzer::new(config)
            .with_random_source(SequenceSource::constant(0.5))
            .with_stage_observer(move |stage| {
                stage_tx.send_replace(stage);
            }),
    );

    let first = spawn_analysis(&analyzer);
    stage_rx
        .wait_for(|stage| *stage == Stage::FeatureExtraction)
        .await
        .unwrap();
    let second = analyzer.analyze(png(800, 1200), &user()).await;
    assert!(matches!(second, Err(AnalysisError::AlreadyRunning)));
    let result = first.await.unwrap().unwrap();

    let reference = PalmAnalyzer::new(quiet_config())
        .with_random_source(SequenceSource::constant(0.5))
        .analyze(png(800, 1200), &user())
        .await
        .unwrap();
    assert_eq!(result.lines, reference.lines);
    assert_eq!(result.mounts, reference.mounts);
    assert_eq!(result.reading, reference.reading);
    assert_eq!(result.confidence, reference.confidence);
}

#[tokio::test]
async fn cancelled_run_returns_to_idle_and_analyzer_is_reusable() {
    let (analyzer, entered, release) = gated_analyzer();

    let first = spawn_analysis(&analyzer);
    entered.notified().await;
    analyzer.cancel();

    let outcome = first.await.unwrap();
    assert!(matches!(outcome, Err(AnalysisError::Cancelled)));
    assert_eq!(analyzer.stage(), Stage::Idle);
    assert!(!analyzer.is_analyzing());
    assert!(analyzer.current_analysis().is_none());

    release.notify_one();
    let result = analyzer.analyze(png(800, 1200), &user()).await.unwrap();
    assert_eq!(analyzer.stage(), Stage::Complete);
    assert_eq!(analyzer.current_analysis(), Some(result));
}

#[tokio::test]
async fn cancel_without_a_run_is_ignored() {
    let analyzer = PalmAnalyzer::new(quiet_config());
    analyzer.cancel();

    let result = analyzer.analyze(png(640, 640), &user()).await;
    assert!(result.is_ok());
}

/*************************************************************
                         Bad input
**************************************************************/

#[tokio::test]
async fn invalid_image_fails_and_returns_to_idle() {
    let analyzer = PalmAnalyzer::new(quiet_config());

    let outcome = analyzer
        .analyze(PalmImage::from_bytes(b"definitely not a picture".to_vec()), &user())
        .await;
    assert!(matches!(
        outcome,
        Err(AnalysisError::Input(InputError::UnsupportedFormat))
    ));
    assert_eq!(analyzer.stage(), Stage::Idle);
    assert!(!analyzer.is_analyzing());

    let outcome = analyzer.analyze(PalmImage::from_bytes(Vec::new()), &user()).await;
    assert!(matches!(outcome, Err(AnalysisError::Input(InputError::EmptyImage))));
    assert!(analyzer.current_analysis().is_none());
}
