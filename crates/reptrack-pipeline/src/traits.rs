//! Collaborator seams
//!
//! The pipeline talks to pose estimation and the media transport through
//! these traits so sessions can run against real collaborators or
//! scripted ones in tests.

use reptrack_core::{LandmarkSet, ReptrackResult, VideoFrame};

/// Pose estimation collaborator
///
/// `Ok(None)` means the estimator ran but found no body in the frame;
/// `Err` means the estimator itself failed and the frame is skipped.
pub trait PoseEstimator {
    fn estimate(&mut self, frame: &VideoFrame) -> ReptrackResult<Option<LandmarkSet>>;
}

/// Inbound media transport
#[allow(async_fn_in_trait)]
pub trait FrameSource {
    /// Receive the next frame; may suspend indefinitely, the caller
    /// applies the adaptive timeout
    async fn receive(&mut self) -> ReptrackResult<VideoFrame>;
}

/// Outbound media transport (the render path)
#[allow(async_fn_in_trait)]
pub trait FrameSink {
    async fn send(&mut self, frame: VideoFrame) -> ReptrackResult<()>;
}
