//! Reptrack Pipeline - asynchronous frame analysis
//!
//! Decouples the high-rate receive/render path from the slower analysis
//! path. Frames arrive through a transport seam, every Nth frame is run
//! through pose estimation, and the resulting landmark sets are handed
//! to a background consumer over a capacity-1 conduit that drops rather
//! than queues. The consumer drives the exercise state machine and
//! publishes whole snapshots; the render path reads the latest snapshot
//! and emits a throttled feedback event outward.

pub mod conduit;
pub mod consumer;
pub mod feedback;
pub mod health;
pub mod overlay;
pub mod session;
pub mod store;
pub mod traits;

pub use conduit::*;
pub use consumer::*;
pub use feedback::*;
pub use health::*;
pub use overlay::*;
pub use session::*;
pub use store::*;
pub use traits::*;
