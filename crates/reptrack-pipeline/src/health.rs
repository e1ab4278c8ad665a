//! Connection health monitor
//!
//! Classifies session maturity from frame-arrival statistics and sizes
//! the per-attempt receive timeout accordingly: generous while the media
//! path is still negotiating, tight once frames have been flowing. On a
//! stall it synthesizes a placeholder frame stamped with the last known
//! timing so downstream consumers never observe non-monotonic
//! timestamps.

use std::time::Duration;

use reptrack_core::{MediaTime, VideoFrame};

/// Coarse session maturity; never regresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConnectionPhase {
    /// No monitor activity yet, negotiation jitter expected
    Initializing,
    /// At least one receive attempt has stalled before media flowed
    Connecting,
    /// Frames have been arriving; a stall now is a real problem
    Established,
}

/// Timeout budgets and the promotion threshold
#[derive(Debug, Clone)]
pub struct HealthConfig {
    pub initializing_timeout: Duration,
    pub connecting_timeout: Duration,
    pub established_timeout: Duration,
    /// Frames that must arrive before the session counts as established
    pub established_after: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        HealthConfig {
            initializing_timeout: Duration::from_secs(15),
            connecting_timeout: Duration::from_secs(10),
            established_timeout: Duration::from_secs(5),
            established_after: 5,
        }
    }
}

/// Per-session frame-arrival tracker
pub struct ConnectionHealth {
    config: HealthConfig,
    phase: ConnectionPhase,
    frames_received: u64,
    last_time: Option<MediaTime>,
}

impl ConnectionHealth {
    pub fn new() -> Self {
        Self::with_config(HealthConfig::default())
    }

    pub fn with_config(config: HealthConfig) -> Self {
        ConnectionHealth {
            config,
            phase: ConnectionPhase::Initializing,
            frames_received: 0,
            last_time: None,
        }
    }

    pub fn phase(&self) -> ConnectionPhase {
        self.phase
    }

    pub fn frames_received(&self) -> u64 {
        self.frames_received
    }

    /// Note a successfully received frame
    pub fn record_frame(&mut self, time: MediaTime) {
        self.frames_received += 1;
        self.last_time = Some(time);
        if self.frames_received > self.config.established_after
            && self.phase != ConnectionPhase::Established
        {
            tracing::debug!(frames = self.frames_received, "connection established");
            self.phase = ConnectionPhase::Established;
        }
    }

    /// Note a receive attempt that timed out or failed
    pub fn record_stall(&mut self) {
        if self.phase == ConnectionPhase::Initializing {
            self.phase = ConnectionPhase::Connecting;
        }
    }

    /// Budget for the next receive attempt
    pub fn receive_timeout(&self) -> Duration {
        match self.phase {
            ConnectionPhase::Initializing => self.config.initializing_timeout,
            ConnectionPhase::Connecting => self.config.connecting_timeout,
            ConnectionPhase::Established => self.config.established_timeout,
        }
    }

    /// Status line shown on placeholder frames for the current phase
    pub fn status_text(&self) -> &'static str {
        match self.phase {
            ConnectionPhase::Initializing => "Establishing connection...",
            ConnectionPhase::Connecting => "Waiting for video...",
            ConnectionPhase::Established => "Video timeout, reconnecting...",
        }
    }

    /// Synthesize a placeholder frame for a stalled receive
    ///
    /// Reuses the last known timing; before any frame has arrived the
    /// fallback time base applies.
    pub fn placeholder_frame(&self) -> VideoFrame {
        let time = self.last_time.unwrap_or_else(MediaTime::start);
        VideoFrame::blank_default(time)
    }
}

impl Default for ConnectionHealth {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reptrack_core::TimeBase;

    fn time(pts: i64) -> MediaTime {
        MediaTime::new(pts, TimeBase::new(1, 90000))
    }

    #[test]
    fn test_promotion_after_enough_frames() {
        let mut health = ConnectionHealth::new();
        assert_eq!(health.phase(), ConnectionPhase::Initializing);

        for pts in 0..5 {
            health.record_frame(time(pts));
        }
        assert_eq!(health.phase(), ConnectionPhase::Initializing);

        health.record_frame(time(5));
        assert_eq!(health.phase(), ConnectionPhase::Established);
    }

    #[test]
    fn test_phase_never_regresses() {
        let mut health = ConnectionHealth::new();
        for pts in 0..6 {
            health.record_frame(time(pts));
        }
        assert_eq!(health.phase(), ConnectionPhase::Established);

        health.record_stall();
        health.record_stall();
        assert_eq!(health.phase(), ConnectionPhase::Established);
    }

    #[test]
    fn test_stall_before_media_means_connecting() {
        let mut health = ConnectionHealth::new();
        health.record_stall();
        assert_eq!(health.phase(), ConnectionPhase::Connecting);
        assert_eq!(health.status_text(), "Waiting for video...");
    }

    #[test]
    fn test_timeout_shrinks_with_maturity() {
        let mut health = ConnectionHealth::new();
        let initializing = health.receive_timeout();

        health.record_stall();
        let connecting = health.receive_timeout();

        for pts in 0..6 {
            health.record_frame(time(pts));
        }
        let established = health.receive_timeout();

        assert!(initializing > connecting);
        assert!(connecting > established);
    }

    #[test]
    fn test_placeholder_reuses_last_timing() {
        let mut health = ConnectionHealth::new();
        health.record_frame(time(3000));

        let frame = health.placeholder_frame();
        assert_eq!(frame.time, time(3000));
        assert!(frame.is_well_formed());
    }

    #[test]
    fn test_placeholder_before_first_frame() {
        let health = ConnectionHealth::new();
        let frame = health.placeholder_frame();
        assert_eq!(frame.time, MediaTime::start());
    }
}
