//! Error types for reptrack

use thiserror::Error;

/// Core reptrack errors
#[derive(Error, Debug)]
pub enum ReptrackError {
    // Estimation errors
    #[error("Pose estimation failed: {0}")]
    PoseEstimation(String),

    // Transport errors
    #[error("Transport error: {0}")]
    TransportError(String),

    // Session errors
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),
}

/// Result type for reptrack operations
pub type ReptrackResult<T> = Result<T, ReptrackError>;
