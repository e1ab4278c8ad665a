//! Analysis snapshots - the latest committed analysis result
//!
//! A snapshot is replaced wholesale on every analysis step, never
//! partially mutated, so a reader always observes an internally
//! consistent result.

use std::collections::HashMap;

/// Form message shown when no pose was found in the analyzed frame
pub const NO_POSE_MESSAGE: &str = "No pose detected";

/// Form message shown before the first analysis completes
pub const INITIALIZING_MESSAGE: &str = "Initializing...";

/// Qualitative form verdict derived from an accuracy score
///
/// Thresholds are identical across all exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormLabel {
    Poor,
    Improve,
    Good,
    Excellent,
}

impl FormLabel {
    /// Classify an accuracy score in [0,100]
    pub fn for_accuracy(accuracy: f32) -> Self {
        if accuracy < 50.0 {
            FormLabel::Poor
        } else if accuracy < 75.0 {
            FormLabel::Improve
        } else if accuracy < 90.0 {
            FormLabel::Good
        } else {
            FormLabel::Excellent
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormLabel::Poor => "Poor form, fix posture",
            FormLabel::Improve => "Improve form",
            FormLabel::Good => "Good form",
            FormLabel::Excellent => "Excellent form!",
        }
    }
}

/// Latest committed analysis result
///
/// Produced by the exercise state machine, consumed by the renderer and
/// the feedback emitter.
#[derive(Debug, Clone)]
pub struct AnalysisSnapshot {
    /// Form feedback message
    pub form: String,
    /// Accuracy of the last committed rep, [0,100]
    pub accuracy: f32,
    /// Current phase label ("up"/"down"), if committed
    pub position: Option<&'static str>,
    /// Completed repetitions, monotonically non-decreasing
    pub rep_count: u32,
    /// Joint angles observed this step, by metric name
    pub angles: HashMap<String, f32>,
}

impl AnalysisSnapshot {
    /// Snapshot shown before the first analysis step completes
    pub fn initializing() -> Self {
        Self {
            form: INITIALIZING_MESSAGE.to_string(),
            accuracy: 0.0,
            position: None,
            rep_count: 0,
            angles: HashMap::new(),
        }
    }

    /// Result for a frame where pose estimation found no body
    ///
    /// The rep count carries over unchanged; no state transition occurs.
    pub fn no_pose(rep_count: u32) -> Self {
        Self {
            form: NO_POSE_MESSAGE.to_string(),
            accuracy: 0.0,
            position: None,
            rep_count,
            angles: HashMap::new(),
        }
    }
}

impl Default for AnalysisSnapshot {
    fn default() -> Self {
        Self::initializing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_label_boundaries() {
        let cases = [
            (49.0, FormLabel::Poor),
            (50.0, FormLabel::Improve),
            (74.0, FormLabel::Improve),
            (75.0, FormLabel::Good),
            (89.0, FormLabel::Good),
            (90.0, FormLabel::Excellent),
        ];
        for (accuracy, expected) in cases {
            assert_eq!(FormLabel::for_accuracy(accuracy), expected, "at {accuracy}");
        }
    }

    #[test]
    fn test_no_pose_snapshot_keeps_reps() {
        let snap = AnalysisSnapshot::no_pose(7);
        assert_eq!(snap.form, NO_POSE_MESSAGE);
        assert_eq!(snap.accuracy, 0.0);
        assert_eq!(snap.position, None);
        assert_eq!(snap.rep_count, 7);
    }
}
