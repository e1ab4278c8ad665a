//! Outward feedback emission
//!
//! A throttled, fire-and-forget liveness signal for the signaling layer:
//! at most one event per interval, skipped entirely when the outward
//! channel is full or gone. Delivery is never guaranteed and never
//! retried.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::mpsc;

use reptrack_core::AnalysisSnapshot;

/// Event name on the outward channel
pub const FEEDBACK_EVENT: &str = "exercise-feedback";

/// Default minimum spacing between emissions
pub const DEFAULT_FEEDBACK_INTERVAL: Duration = Duration::from_millis(500);

/// Nested form verdict of a feedback event
#[derive(Debug, Clone, Serialize)]
pub struct FormFeedback {
    pub form: String,
    pub accuracy: f32,
    pub position: Option<&'static str>,
}

/// Wire payload of one `exercise-feedback` event
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEvent {
    pub feedback: FormFeedback,
    pub rep_count: u32,
    pub angles: HashMap<String, f32>,
}

impl FeedbackEvent {
    pub fn from_snapshot(snapshot: &AnalysisSnapshot) -> Self {
        FeedbackEvent {
            feedback: FormFeedback {
                form: snapshot.form.clone(),
                accuracy: snapshot.accuracy,
                position: snapshot.position,
            },
            rep_count: snapshot.rep_count,
            angles: snapshot.angles.clone(),
        }
    }
}

/// One outward emission: the event name plus its payload
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackEnvelope {
    pub event: &'static str,
    pub data: FeedbackEvent,
}

impl FeedbackEnvelope {
    pub fn new(data: FeedbackEvent) -> Self {
        FeedbackEnvelope {
            event: FEEDBACK_EVENT,
            data,
        }
    }
}

/// Outward channel for feedback emissions
pub type FeedbackSender = mpsc::Sender<FeedbackEnvelope>;

/// Rate limiter for feedback emission
pub struct FeedbackThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl FeedbackThrottle {
    pub fn new(interval: Duration) -> Self {
        FeedbackThrottle {
            interval,
            last: None,
        }
    }

    /// Whether an emission may happen now; marks the slot when it may
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

impl Default for FeedbackThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_FEEDBACK_INTERVAL)
    }
}
