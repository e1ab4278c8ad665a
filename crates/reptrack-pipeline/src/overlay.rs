//! Per-frame overlay data
//!
//! Text lines derived from the latest snapshot for the renderer to draw
//! on each outgoing frame. Drawing itself is the renderer's concern.

use reptrack_core::AnalysisSnapshot;

/// Text lines overlaid on a rendered frame, top to bottom
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayText {
    pub lines: Vec<String>,
}

impl OverlayText {
    /// Overlay for a live frame: reps, form, accuracy, position
    pub fn from_snapshot(snapshot: &AnalysisSnapshot) -> Self {
        OverlayText {
            lines: vec![
                format!("Reps: {}", snapshot.rep_count),
                format!("Form: {}", snapshot.form),
                format!("Accuracy: {:.0}%", snapshot.accuracy),
                format!("Position: {}", snapshot.position.unwrap_or("-")),
            ],
        }
    }

    /// Single status line for a placeholder frame
    pub fn status(text: &str) -> Self {
        OverlayText {
            lines: vec![text.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_overlay_lines() {
        let mut snapshot = AnalysisSnapshot::initializing();
        snapshot.rep_count = 12;
        snapshot.form = "Excellent form!".to_string();
        snapshot.accuracy = 93.4;
        snapshot.position = Some("down");

        let overlay = OverlayText::from_snapshot(&snapshot);
        assert_eq!(
            overlay.lines,
            vec![
                "Reps: 12",
                "Form: Excellent form!",
                "Accuracy: 93%",
                "Position: down",
            ]
        );
    }

    #[test]
    fn test_missing_position_renders_dash() {
        let overlay = OverlayText::from_snapshot(&AnalysisSnapshot::no_pose(0));
        assert_eq!(overlay.lines[3], "Position: -");
    }

    #[test]
    fn test_status_overlay() {
        let overlay = OverlayText::status("Waiting for video...");
        assert_eq!(overlay.lines, vec!["Waiting for video..."]);
    }
}
