//! # Palm Analysis Orchestrator
//!
//! Runs one analysis through the fixed stage sequence
//! `Preprocessing → VisionAnalysis → LineDetection → FeatureExtraction →
//! ReadingGeneration → Personalization → Complete`.
//!
//! A run is all-or-nothing: on any error the stage drops back to `Idle` and
//! no result is stored. Only one run may be in flight per analyzer; a
//! second call is rejected with [`AnalysisError::AlreadyRunning`], never
//! queued. An in-flight run can be aborted with [`PalmAnalyzer::cancel`].

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use chrono::Utc;
use palmist_common::analysis::{AnalysisResult, LineReport, Origin, Provenance, RemoteOutcome, Stage};
use palmist_common::config::Config;
use palmist_common::error::AnalysisError;
use palmist_common::image::PalmImage;
use palmist_common::palm::PalmFeatures;
use palmist_common::providers::{NarrativeProvider, VisionProvider};
use palmist_common::random::{RandomSource, RngSource};
use palmist_common::user::UserData;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::interpret::{attach, interpret_finger, interpret_line, interpret_mount};
use crate::remote::{self, RemoteAnalysis};
use crate::{compose, generator, narrative, personalize, preprocess};

/// Confidence reported by local line detection.
pub const LINE_CONFIDENCE: f64 = 0.6;

type StageObserver = Box<dyn Fn(Stage) + Send + Sync>;

struct CacheEntry {
    stored_at: Instant,
    result: AnalysisResult,
}

pub struct PalmAnalyzer {
    config: Config,
    remote: RemoteAnalysis,
    random: Mutex<Box<dyn RandomSource>>,
    observer: Option<StageObserver>,
    busy: AtomicBool,
    stage: Mutex<Stage>,
    current: Mutex<Option<AnalysisResult>>,
    cache: Mutex<HashMap<u64, CacheEntry>>,
    cancel: watch::Sender<bool>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn origin_of<T>(outcome: RemoteOutcome<T>, local: impl FnOnce() -> T) -> (T, Origin) {
    match outcome {
        RemoteOutcome::Remote(value) => (value, Origin::Remote),
        RemoteOutcome::Fallback(reason) => (local(), Origin::Local { reason }),
    }
}

/// Clears the busy flag and any cancel request when a run ends, however it
/// ends.
struct RunGuard<'a> {
    analyzer: &'a PalmAnalyzer,
    completed: bool,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if !self.completed {
            self.analyzer.set_stage(Stage::Idle);
        }
        // Both cleared under the channel lock: a racing `cancel` lands in this
        // run or not at all.
        let busy = &self.analyzer.busy;
        self.analyzer.cancel.send_modify(|requested| {
            *requested = false;
            busy.store(false, Ordering::Release);
        });
    }
}

impl PalmAnalyzer {
    /// Remote providers are built from the configured keys; randomness is
    /// seeded from the OS.
    pub fn new(config: Config) -> Self {
        let remote = RemoteAnalysis::from_config(&config);
        let (cancel, _) = watch::channel(false);
        Self {
            config,
            remote,
            random: Mutex::new(Box::new(RngSource::from_entropy())),
            observer: None,
            busy: AtomicBool::new(false),
            stage: Mutex::new(Stage::Idle),
            current: Mutex::new(None),
            cache: Mutex::new(HashMap::new()),
            cancel,
        }
    }

    pub fn with_vision(mut self, vision: Box<dyn VisionProvider>) -> Self {
        self.remote = self.remote.with_vision(vision);
        self
    }

    pub fn with_narrator(mut self, narrator: Box<dyn NarrativeProvider>) -> Self {
        self.remote = self.remote.with_narrator(narrator);
        self
    }

    pub fn with_random_source(mut self, random: impl RandomSource + 'static) -> Self {
        self.random = Mutex::new(Box::new(random));
        self
    }

    /// Called with every stage the analyzer enters.
    pub fn with_stage_observer(mut self, observer: impl Fn(Stage) + Send + Sync + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stage(&self) -> Stage {
        *lock(&self.stage)
    }

    pub fn is_analyzing(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// The last completed result.
    pub fn current_analysis(&self) -> Option<AnalysisResult> {
        lock(&self.current).clone()
    }

    /// Aborts the run in flight, if any. The run fails with
    /// [`AnalysisError::Cancelled`].
    pub fn cancel(&self) {
        let requested = self.cancel.send_if_modified(|requested| {
            if *requested || !self.is_analyzing() {
                return false;
            }
            *requested = true;
            true
        });
        if requested {
            info!("Cancelling palm analysis");
        }
    }

    pub async fn analyze(
        &self,
        image: PalmImage,
        user: &UserData,
    ) -> Result<AnalysisResult, AnalysisError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Rejected palm analysis: another one is still running");
            return Err(AnalysisError::AlreadyRunning);
        }
        let mut guard = RunGuard {
            analyzer: self,
            completed: false,
        };
        let mut cancelled = self.cancel.subscribe();

        info!("Analysing palm image ({} bytes)", image.len());
        let key = cache_key(&image, user);
        if let Some(result) = self.cached(key) {
            info!("Serving palm reading from cache");
            self.finish(&result);
            guard.completed = true;
            return Ok(result);
        }

        let outcome = tokio::select! {
            biased;
            _ = cancelled.wait_for(|flag| *flag) => Err(AnalysisError::Cancelled),
            result = self.run(&image, user) => result,
        };

        match outcome {
            Ok(result) => {
                self.store(key, &result);
                self.finish(&result);
                guard.completed = true;
                info!(
                    confidence = result.confidence,
                    remote = result.is_fully_remote(),
                    "Palm analysis complete"
                );
                Ok(result)
            }
            Err(err) => {
                error!("Palm analysis aborted: {err}");
                Err(err)
            }
        }
    }

    async fn run(&self, image: &PalmImage, user: &UserData) -> Result<AnalysisResult, AnalysisError> {
        self.enter(Stage::Preprocessing).await;
        let prepared = preprocess::prepare(image, &self.config.ai.analysis)?;

        self.enter(Stage::VisionAnalysis).await;
        let (vision, vision_origin) =
            origin_of(self.remote.try_remote_vision(&prepared).await, remote::local_vision);

        self.enter(Stage::LineDetection).await;
        let lines = generator::generate_lines(self.random().as_mut());

        self.enter(Stage::FeatureExtraction).await;
        let features = {
            let mut random = self.random();
            let mounts = generator::generate_mounts(random.as_mut());
            let fingers = generator::generate_fingers(random.as_mut());
            let shape = generator::generate_shape(Some(prepared.original), random.as_mut());
            PalmFeatures {
                lines,
                mounts,
                fingers,
                shape,
            }
        };

        self.enter(Stage::ReadingGeneration).await;
        let mut reading = compose::compose_reading(&features, self.random().as_mut());
        let (sections, reading_origin) = match self.remote.try_remote_reading(&features, user).await {
            RemoteOutcome::Remote(sections) => (Some(sections), Origin::Remote),
            RemoteOutcome::Fallback(reason) => (None, Origin::Local { reason }),
        };
        if let Some(sections) = sections {
            narrative::apply_narrative(&mut reading, sections);
        }

        self.enter(Stage::Personalization).await;
        personalize::personalize(&mut reading, user, &self.config.ai.reading);

        let confidence = round2((LINE_CONFIDENCE + vision.confidence) / 2.0).clamp(0.0, 1.0);
        let PalmFeatures {
            lines,
            mounts,
            fingers,
            shape,
        } = features;
        Ok(AnalysisResult {
            vision,
            lines: LineReport {
                heart_line: attach(lines.heart_line, interpret_line),
                head_line: attach(lines.head_line, interpret_line),
                life_line: attach(lines.life_line, interpret_line),
                fate_line: attach(lines.fate_line, interpret_line),
                confidence: LINE_CONFIDENCE,
            },
            mounts: [
                mounts.venus,
                mounts.jupiter,
                mounts.saturn,
                mounts.apollo,
                mounts.mercury,
                mounts.mars,
            ]
            .into_iter()
            .map(|mount| attach(mount, interpret_mount))
            .collect(),
            fingers: [
                fingers.thumb,
                fingers.index,
                fingers.middle,
                fingers.ring,
                fingers.pinky,
            ]
            .into_iter()
            .map(|finger| attach(finger, interpret_finger))
            .collect(),
            shape,
            reading,
            provenance: Provenance {
                vision: vision_origin,
                reading: reading_origin,
            },
            timestamp: Utc::now(),
            confidence,
        })
    }

    fn random(&self) -> MutexGuard<'_, Box<dyn RandomSource>> {
        lock(&self.random)
    }

    fn set_stage(&self, stage: Stage) {
        *lock(&self.stage) = stage;
        if let Some(observer) = &self.observer {
            observer(stage);
        }
    }

    async fn enter(&self, stage: Stage) {
        debug!(?stage, "{}", stage.describe());
        self.set_stage(stage);
        let delay = self.config.ai.analysis.stage_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn finish(&self, result: &AnalysisResult) {
        *lock(&self.current) = Some(result.clone());
        self.set_stage(Stage::Complete);
    }

    fn cached(&self, key: u64) -> Option<AnalysisResult> {
        let settings = &self.config.ai.analysis;
        if !settings.enable_cache {
            return None;
        }
        let cache = lock(&self.cache);
        let entry = cache.get(&key)?;
        (entry.stored_at.elapsed() < settings.cache_ttl()).then(|| entry.result.clone())
    }

    fn store(&self, key: u64, result: &AnalysisResult) {
        let settings = &self.config.ai.analysis;
        if !settings.enable_cache {
            return;
        }
        let ttl = settings.cache_ttl();
        let mut cache = lock(&self.cache);
        cache.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        cache.insert(
            key,
            CacheEntry {
                stored_at: Instant::now(),
                result: result.clone(),
            },
        );
    }
}

fn cache_key(image: &PalmImage, user: &UserData) -> u64 {
    let mut hasher = DefaultHasher::new();
    image.hash(&mut hasher);
    user.hash(&mut hasher);
    hasher.finish()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
