//! Reptrack Core - Fundamental types and primitives
//!
//! This crate defines the core types used throughout reptrack:
//! - Identifiers (SessionId)
//! - Media timing (TimeBase, MediaTime)
//! - Body landmarks (LandmarkKind, LandmarkSet)
//! - Video frames and analysis snapshots
//! - Error types

pub mod error;
pub mod frame;
pub mod id;
pub mod landmark;
pub mod snapshot;
pub mod time;

pub use error::*;
pub use frame::*;
pub use id::*;
pub use landmark::*;
pub use snapshot::*;
pub use time::*;
