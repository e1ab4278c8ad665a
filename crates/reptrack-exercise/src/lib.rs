//! Reptrack Exercise - rep counting and form scoring over pose landmarks
//!
//! One generic state machine, five exercise configurations. Each exercise
//! supplies a gating joint angle, phase thresholds, hold-frame debounce,
//! a counting edge, and a table of weighted posture metrics; the
//! transition algorithm itself is exercise-agnostic.

pub mod angle;
pub mod config;
pub mod machine;
pub mod score;

pub use angle::*;
pub use config::*;
pub use machine::*;
pub use score::*;
