//! Analysis session
//!
//! One session owns the receive → analyze → render pathway for a single
//! participant: the transport seams, the pose estimator, the background
//! consumer, and the connection health monitor. Sessions share nothing
//! with each other.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use tokio::sync::watch;

use reptrack_core::{AnalysisSnapshot, ReptrackResult, SessionId, VideoFrame};
use reptrack_exercise::{Exercise, ExerciseMachine};

use crate::conduit::{conduit, ConduitProducer};
use crate::consumer::{spawn_consumer, AnalysisJob, ConsumerHandle};
use crate::feedback::{FeedbackEnvelope, FeedbackEvent, FeedbackSender, FeedbackThrottle};
use crate::health::{ConnectionHealth, HealthConfig};
use crate::overlay::OverlayText;
use crate::store::SnapshotStore;
use crate::traits::{FrameSink, FrameSource, PoseEstimator};

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Starting exercise
    pub exercise: Exercise,
    /// Landmarks are sampled every Nth frame
    pub sample_interval: u64,
    /// Minimum spacing between outward feedback events
    pub feedback_interval: std::time::Duration,
    pub health: HealthConfig,
}

impl SessionConfig {
    pub fn new(exercise: Exercise) -> Self {
        SessionConfig {
            exercise,
            sample_interval: 5,
            feedback_interval: crate::feedback::DEFAULT_FEEDBACK_INTERVAL,
            health: HealthConfig::default(),
        }
    }

    pub fn with_sample_interval(mut self, interval: u64) -> Self {
        self.sample_interval = interval.max(1);
        self
    }

    pub fn with_feedback_interval(mut self, interval: std::time::Duration) -> Self {
        self.feedback_interval = interval;
        self
    }

    pub fn with_health(mut self, health: HealthConfig) -> Self {
        self.health = health;
        self
    }
}

/// Requests the session loop to stop
pub struct SessionCloser {
    tx: watch::Sender<bool>,
}

impl SessionCloser {
    pub fn close(&self) {
        let _ = self.tx.send(true);
    }
}

/// Outcome of one receive attempt
enum Received {
    Live(VideoFrame),
    Placeholder(VideoFrame),
}

/// One participant's analysis session
pub struct AnalysisSession<S, K, E> {
    id: SessionId,
    config: SessionConfig,
    source: S,
    sink: K,
    estimator: E,
    machine: Arc<Mutex<ExerciseMachine>>,
    producer: ConduitProducer<AnalysisJob>,
    consumer: Option<ConsumerHandle>,
    store: SnapshotStore,
    health: ConnectionHealth,
    throttle: FeedbackThrottle,
    feedback: Option<FeedbackSender>,
    last_overlay: OverlayText,
    frame_counter: u64,
    close_rx: watch::Receiver<bool>,
}

impl<S, K, E> AnalysisSession<S, K, E>
where
    S: FrameSource,
    K: FrameSink,
    E: PoseEstimator,
{
    /// Create a session and spawn its background consumer
    pub fn new(
        id: SessionId,
        config: SessionConfig,
        source: S,
        sink: K,
        estimator: E,
    ) -> (Self, SessionCloser) {
        let machine = Arc::new(Mutex::new(ExerciseMachine::for_exercise(config.exercise)));
        let (producer, jobs) = conduit();
        let store = SnapshotStore::new();
        let consumer = spawn_consumer(Arc::clone(&machine), jobs, store.clone());
        let (close_tx, close_rx) = watch::channel(false);

        let session = AnalysisSession {
            id,
            health: ConnectionHealth::with_config(config.health.clone()),
            throttle: FeedbackThrottle::new(config.feedback_interval),
            config,
            source,
            sink,
            estimator,
            machine,
            producer,
            consumer: Some(consumer),
            store,
            feedback: None,
            last_overlay: OverlayText::default(),
            frame_counter: 0,
            close_rx,
        };
        (session, SessionCloser { tx: close_tx })
    }

    /// Attach the outward feedback channel
    pub fn with_feedback(mut self, sender: FeedbackSender) -> Self {
        self.feedback = Some(sender);
        self
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Latest analysis snapshot
    pub fn snapshot(&self) -> AnalysisSnapshot {
        self.store.load()
    }

    /// Clonable handle to the snapshot store
    pub fn store(&self) -> SnapshotStore {
        self.store.clone()
    }

    /// Overlay for the most recently processed frame
    pub fn overlay(&self) -> OverlayText {
        self.last_overlay.clone()
    }

    pub fn health(&self) -> &ConnectionHealth {
        &self.health
    }

    /// Landmark sets dropped at the conduit
    pub fn dropped_jobs(&self) -> u64 {
        self.producer.dropped()
    }

    /// Replace the active exercise with a fresh machine
    ///
    /// All movement state and the published snapshot are discarded.
    pub fn swap_exercise(&mut self, exercise: Exercise) {
        {
            // Machine replacement and snapshot reset must be one atomic
            // step relative to the consumer, which publishes under this
            // same lock
            let mut machine = self.machine.lock();
            *machine = ExerciseMachine::for_exercise(exercise);
            self.store.replace(AnalysisSnapshot::initializing());
        }
        self.last_overlay = OverlayText::default();
        tracing::info!(session = ?self.id, exercise = exercise.name(), "exercise swapped");
    }

    /// Drive the session until closed
    ///
    /// Receive stalls degrade to placeholder frames; only outbound
    /// transport failures end the loop with an error.
    pub async fn run(&mut self) -> ReptrackResult<()> {
        let result = self.run_loop().await;
        if let Some(consumer) = self.consumer.take() {
            consumer.shutdown().await;
        }
        tracing::debug!(session = ?self.id, "session stopped");
        result
    }

    async fn run_loop(&mut self) -> ReptrackResult<()> {
        loop {
            let received = tokio::select! {
                _ = self.close_rx.changed() => break,
                received = Self::receive_next(&mut self.source, &mut self.health) => received,
            };

            let frame = match received {
                Received::Live(frame) => self.process_live(frame),
                Received::Placeholder(frame) => {
                    // Placeholders never enter the analysis conduit
                    self.last_overlay = OverlayText::status(self.health.status_text());
                    frame
                }
            };

            self.emit_feedback();
            self.sink.send(frame).await?;
        }
        Ok(())
    }

    async fn receive_next(source: &mut S, health: &mut ConnectionHealth) -> Received {
        let budget = health.receive_timeout();
        match tokio::time::timeout(budget, source.receive()).await {
            Ok(Ok(frame)) => {
                health.record_frame(frame.time);
                Received::Live(frame)
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "frame receive failed");
                health.record_stall();
                Received::Placeholder(health.placeholder_frame())
            }
            Err(_) => {
                tracing::warn!(phase = ?health.phase(), "frame receive timed out");
                health.record_stall();
                Received::Placeholder(health.placeholder_frame())
            }
        }
    }

    fn process_live(&mut self, frame: VideoFrame) -> VideoFrame {
        if !frame.is_well_formed() {
            tracing::warn!(frame = ?frame, "frame buffer mismatch, substituting blank");
            return VideoFrame::blank_default(frame.time);
        }

        self.frame_counter += 1;
        if self.frame_counter % self.config.sample_interval == 0 {
            match self.estimator.estimate(&frame) {
                Ok(landmarks) => {
                    self.producer.offer(landmarks);
                }
                // Estimator failures skip this sample; the next sampled
                // frame is the retry
                Err(e) => tracing::warn!(error = %e, "pose estimation failed"),
            }
        }

        self.last_overlay = OverlayText::from_snapshot(&self.store.load());
        frame
    }

    fn emit_feedback(&mut self) {
        let Some(sender) = &self.feedback else {
            return;
        };
        if !self.throttle.ready(Instant::now()) {
            return;
        }
        let event = FeedbackEvent::from_snapshot(&self.store.load());
        if sender.try_send(FeedbackEnvelope::new(event)).is_err() {
            tracing::debug!("feedback channel unavailable, emission skipped");
        }
    }
}
