//! Exercise configuration registry
//!
//! Every recognized exercise is one entry in this table: a gating joint
//! with phase thresholds, hold-frame debounce, counting edge, rep scoring
//! strategy, and a weighted list of posture metrics. Adding an exercise
//! means adding a config entry, not new state-machine code.

use reptrack_core::{LandmarkKind, LandmarkSet, ReptrackError, ReptrackResult};

use crate::angle::{angle_between, angle_to_vertical, AngleConvention};

/// Recognized exercise types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exercise {
    PushUp,
    BicepCurl,
    Crunch,
    PullUp,
    Squat,
}

impl Exercise {
    pub fn all() -> &'static [Exercise] {
        &[
            Exercise::PushUp,
            Exercise::BicepCurl,
            Exercise::Crunch,
            Exercise::PullUp,
            Exercise::Squat,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Exercise::PushUp => "pushup",
            Exercise::BicepCurl => "bicepcurl",
            Exercise::Crunch => "crunch",
            Exercise::PullUp => "pullup",
            Exercise::Squat => "squat",
        }
    }

    /// Parse an exercise identifier as supplied by the session layer
    pub fn from_name(name: &str) -> ReptrackResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "pushup" => Ok(Exercise::PushUp),
            "bicepcurl" => Ok(Exercise::BicepCurl),
            "crunch" => Ok(Exercise::Crunch),
            "pullup" => Ok(Exercise::PullUp),
            "squat" => Ok(Exercise::Squat),
            other => Err(ReptrackError::UnknownExercise(other.to_string())),
        }
    }
}

/// A scalar posture metric derived from landmarks
#[derive(Debug, Clone, Copy)]
pub enum MetricKind {
    /// Angle at vertex `b` between rays toward `a` and `c`
    Angle {
        a: LandmarkKind,
        b: LandmarkKind,
        c: LandmarkKind,
    },
    /// Angle at `b` between the ray toward `a` and the upward vertical
    AngleToVertical { a: LandmarkKind, b: LandmarkKind },
    /// Normalized distance between two keypoints
    Distance { a: LandmarkKind, b: LandmarkKind },
}

impl MetricKind {
    /// Evaluate against a landmark set; `None` if a joint is missing
    pub fn evaluate(&self, convention: AngleConvention, landmarks: &LandmarkSet) -> Option<f32> {
        match *self {
            MetricKind::Angle { a, b, c } => {
                let pa = landmarks.position(a)?;
                let pb = landmarks.position(b)?;
                let pc = landmarks.position(c)?;
                Some(angle_between(convention, pa, pb, pc))
            }
            MetricKind::AngleToVertical { a, b } => {
                let pa = landmarks.position(a)?;
                let pb = landmarks.position(b)?;
                Some(angle_to_vertical(convention, pa, pb))
            }
            MetricKind::Distance { a, b } => {
                let pa = landmarks.position(a)?;
                let pb = landmarks.position(b)?;
                Some(pa.distance(&pb))
            }
        }
    }
}

/// Per-phase target values for a metric
#[derive(Debug, Clone, Copy)]
pub struct PhaseTargets {
    pub extended: f32,
    pub flexed: f32,
    pub neutral: f32,
}

impl PhaseTargets {
    /// Same target regardless of phase
    pub const fn uniform(target: f32) -> Self {
        PhaseTargets {
            extended: target,
            flexed: target,
            neutral: target,
        }
    }

    pub const fn per_phase(extended: f32, flexed: f32, neutral: f32) -> Self {
        PhaseTargets {
            extended,
            flexed,
            neutral,
        }
    }
}

/// One weighted posture metric
#[derive(Debug, Clone)]
pub struct ScoredMetric {
    pub name: &'static str,
    pub kind: MetricKind,
    pub targets: PhaseTargets,
    pub threshold: f32,
    pub steep_slope: f32,
    pub weight: f32,
}

/// The gating joint angle and its phase thresholds
///
/// The extended extreme is always the larger-angle side; comparisons are
/// inclusive (`>= extended_above`, `<= flexed_below`).
#[derive(Debug, Clone, Copy)]
pub struct GateSpec {
    pub a: LandmarkKind,
    pub b: LandmarkKind,
    pub c: LandmarkKind,
    pub extended_above: f32,
    pub flexed_below: f32,
}

/// Which cycle edge commits a repetition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleEdge {
    /// Rep counted when the flexed extreme is entered (curl, pull-up, crunch)
    EnterFlexed,
    /// Rep counted when the extended extreme is re-entered (push-up, squat)
    ReturnExtended,
}

/// How the accuracy of one completed rep is assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepScoring {
    /// Mean of the samples taken at the two extreme commits
    Checkpoints,
    /// Running average over the phase preceding the counting edge,
    /// meaned with the sample at the closing commit
    HeldAverage,
}

/// Static per-exercise configuration, loaded once per session
#[derive(Debug, Clone)]
pub struct ExerciseConfig {
    pub exercise: Exercise,
    pub convention: AngleConvention,
    pub gate: GateSpec,
    /// Consecutive samples required in an extreme before it may be left
    pub hold_frames: u32,
    pub count_on: CycleEdge,
    pub scoring: RepScoring,
    pub extended_label: &'static str,
    pub flexed_label: &'static str,
    pub metrics: Vec<ScoredMetric>,
}

impl ExerciseConfig {
    /// Configuration table for a recognized exercise
    pub fn for_exercise(exercise: Exercise) -> Self {
        match exercise {
            Exercise::PushUp => Self::pushup(),
            Exercise::BicepCurl => Self::bicep_curl(),
            Exercise::Crunch => Self::crunch(),
            Exercise::PullUp => Self::pullup(),
            Exercise::Squat => Self::squat(),
        }
    }

    fn pushup() -> Self {
        ExerciseConfig {
            exercise: Exercise::PushUp,
            convention: AngleConvention::SignedArctan,
            gate: GateSpec {
                a: LandmarkKind::LeftShoulder,
                b: LandmarkKind::LeftElbow,
                c: LandmarkKind::LeftWrist,
                extended_above: 160.0,
                flexed_below: 70.0,
            },
            hold_frames: 2,
            count_on: CycleEdge::ReturnExtended,
            scoring: RepScoring::HeldAverage,
            extended_label: "up",
            flexed_label: "down",
            metrics: vec![
                ScoredMetric {
                    name: "elbow_angle",
                    kind: MetricKind::Angle {
                        a: LandmarkKind::LeftShoulder,
                        b: LandmarkKind::LeftElbow,
                        c: LandmarkKind::LeftWrist,
                    },
                    targets: PhaseTargets::per_phase(170.0, 70.0, 90.0),
                    threshold: 20.0,
                    steep_slope: 3.0,
                    weight: 0.05,
                },
                ScoredMetric {
                    name: "hip_angle",
                    kind: MetricKind::Angle {
                        a: LandmarkKind::LeftShoulder,
                        b: LandmarkKind::LeftHip,
                        c: LandmarkKind::LeftKnee,
                    },
                    targets: PhaseTargets::uniform(170.0),
                    threshold: 20.0,
                    steep_slope: 3.0,
                    weight: 0.5,
                },
                ScoredMetric {
                    name: "knee_angle",
                    kind: MetricKind::Angle {
                        a: LandmarkKind::LeftHip,
                        b: LandmarkKind::LeftKnee,
                        c: LandmarkKind::LeftAnkle,
                    },
                    targets: PhaseTargets::uniform(170.0),
                    threshold: 20.0,
                    steep_slope: 3.0,
                    weight: 0.45,
                },
            ],
        }
    }

    fn bicep_curl() -> Self {
        ExerciseConfig {
            exercise: Exercise::BicepCurl,
            convention: AngleConvention::CosineLaw,
            gate: GateSpec {
                a: LandmarkKind::LeftShoulder,
                b: LandmarkKind::LeftElbow,
                c: LandmarkKind::LeftWrist,
                extended_above: 140.0,
                flexed_below: 80.0,
            },
            hold_frames: 1,
            count_on: CycleEdge::EnterFlexed,
            scoring: RepScoring::Checkpoints,
            extended_label: "down",
            flexed_label: "up",
            metrics: vec![
                ScoredMetric {
                    name: "elbow_angle",
                    kind: MetricKind::Angle {
                        a: LandmarkKind::LeftShoulder,
                        b: LandmarkKind::LeftElbow,
                        c: LandmarkKind::LeftWrist,
                    },
                    targets: PhaseTargets::per_phase(160.0, 70.0, 90.0),
                    threshold: 20.0,
                    steep_slope: 3.0,
                    weight: 0.2,
                },
                ScoredMetric {
                    name: "shoulder_angle",
                    kind: MetricKind::Angle {
                        a: LandmarkKind::LeftHip,
                        b: LandmarkKind::LeftShoulder,
                        c: LandmarkKind::LeftElbow,
                    },
                    targets: PhaseTargets::uniform(0.0),
                    threshold: 30.0,
                    steep_slope: 3.0,
                    weight: 0.4,
                },
                ScoredMetric {
                    name: "back_angle",
                    kind: MetricKind::AngleToVertical {
                        a: LandmarkKind::LeftHip,
                        b: LandmarkKind::LeftShoulder,
                    },
                    targets: PhaseTargets::uniform(180.0),
                    threshold: 20.0,
                    steep_slope: 3.0,
                    weight: 0.4,
                },
            ],
        }
    }

    fn crunch() -> Self {
        ExerciseConfig {
            exercise: Exercise::Crunch,
            convention: AngleConvention::SignedArctan,
            gate: GateSpec {
                a: LandmarkKind::LeftShoulder,
                b: LandmarkKind::LeftHip,
                c: LandmarkKind::LeftKnee,
                extended_above: 100.0,
                flexed_below: 40.0,
            },
            hold_frames: 3,
            count_on: CycleEdge::EnterFlexed,
            scoring: RepScoring::Checkpoints,
            extended_label: "down",
            flexed_label: "up",
            metrics: vec![
                ScoredMetric {
                    name: "knee_angle",
                    kind: MetricKind::Angle {
                        a: LandmarkKind::LeftAnkle,
                        b: LandmarkKind::LeftKnee,
                        c: LandmarkKind::LeftHip,
                    },
                    targets: PhaseTargets::uniform(30.0),
                    threshold: 20.0,
                    steep_slope: 3.0,
                    weight: 0.4,
                },
                ScoredMetric {
                    name: "hand_distance",
                    kind: MetricKind::Distance {
                        a: LandmarkKind::LeftWrist,
                        b: LandmarkKind::Nose,
                    },
                    targets: PhaseTargets::uniform(0.1),
                    threshold: 0.05,
                    steep_slope: 200.0,
                    weight: 0.3,
                },
                ScoredMetric {
                    name: "back_angle",
                    kind: MetricKind::Angle {
                        a: LandmarkKind::LeftShoulder,
                        b: LandmarkKind::LeftHip,
                        c: LandmarkKind::LeftKnee,
                    },
                    targets: PhaseTargets::per_phase(100.0, 40.0, 70.0),
                    threshold: 20.0,
                    steep_slope: 3.0,
                    weight: 0.3,
                },
            ],
        }
    }

    fn pullup() -> Self {
        ExerciseConfig {
            exercise: Exercise::PullUp,
            convention: AngleConvention::CosineLaw,
            gate: GateSpec {
                a: LandmarkKind::LeftShoulder,
                b: LandmarkKind::LeftElbow,
                c: LandmarkKind::LeftWrist,
                extended_above: 160.0,
                flexed_below: 50.0,
            },
            hold_frames: 5,
            count_on: CycleEdge::EnterFlexed,
            scoring: RepScoring::HeldAverage,
            extended_label: "down",
            flexed_label: "up",
            metrics: vec![
                ScoredMetric {
                    name: "elbow_angle",
                    kind: MetricKind::Angle {
                        a: LandmarkKind::LeftShoulder,
                        b: LandmarkKind::LeftElbow,
                        c: LandmarkKind::LeftWrist,
                    },
                    targets: PhaseTargets::per_phase(180.0, 50.0, 90.0),
                    threshold: 20.0,
                    steep_slope: 3.0,
                    weight: 0.5,
                },
                ScoredMetric {
                    name: "hip_angle",
                    kind: MetricKind::Angle {
                        a: LandmarkKind::LeftShoulder,
                        b: LandmarkKind::LeftHip,
                        c: LandmarkKind::LeftKnee,
                    },
                    targets: PhaseTargets::uniform(180.0),
                    threshold: 20.0,
                    steep_slope: 3.0,
                    weight: 0.5,
                },
            ],
        }
    }

    fn squat() -> Self {
        ExerciseConfig {
            exercise: Exercise::Squat,
            convention: AngleConvention::CosineLaw,
            gate: GateSpec {
                a: LandmarkKind::LeftHip,
                b: LandmarkKind::LeftKnee,
                c: LandmarkKind::LeftAnkle,
                extended_above: 160.0,
                flexed_below: 90.0,
            },
            hold_frames: 3,
            count_on: CycleEdge::ReturnExtended,
            scoring: RepScoring::HeldAverage,
            extended_label: "up",
            flexed_label: "down",
            metrics: vec![ScoredMetric {
                name: "knee_angle",
                kind: MetricKind::Angle {
                    a: LandmarkKind::LeftHip,
                    b: LandmarkKind::LeftKnee,
                    c: LandmarkKind::LeftAnkle,
                },
                targets: PhaseTargets::per_phase(170.0, 70.0, 90.0),
                threshold: 20.0,
                steep_slope: 3.0,
                weight: 1.0,
            }],
        }
    }

    /// Override the hold-frame debounce (primarily for testing and tuning)
    pub fn with_hold_frames(mut self, hold_frames: u32) -> Self {
        self.hold_frames = hold_frames;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_name_roundtrip() {
        for exercise in Exercise::all() {
            assert_eq!(Exercise::from_name(exercise.name()).unwrap(), *exercise);
        }
    }

    #[test]
    fn test_unknown_exercise_rejected() {
        assert!(Exercise::from_name("deadlift").is_err());
    }

    #[test]
    fn test_weights_sum_to_one() {
        for exercise in Exercise::all() {
            let config = ExerciseConfig::for_exercise(*exercise);
            let total: f32 = config.metrics.iter().map(|m| m.weight).sum();
            assert!(
                (total - 1.0).abs() < 1e-6,
                "{:?} weights sum to {total}",
                exercise
            );
        }
    }

    #[test]
    fn test_extended_side_is_larger_angle() {
        for exercise in Exercise::all() {
            let config = ExerciseConfig::for_exercise(*exercise);
            assert!(config.gate.extended_above > config.gate.flexed_below);
        }
    }

    #[test]
    fn test_angle_convention_per_exercise() {
        // Push-up and crunch use the arctangent form; the rest use the
        // law of cosines. Kept distinct on purpose.
        assert_eq!(
            ExerciseConfig::for_exercise(Exercise::PushUp).convention,
            AngleConvention::SignedArctan
        );
        assert_eq!(
            ExerciseConfig::for_exercise(Exercise::Crunch).convention,
            AngleConvention::SignedArctan
        );
        for exercise in [Exercise::BicepCurl, Exercise::PullUp, Exercise::Squat] {
            assert_eq!(
                ExerciseConfig::for_exercise(exercise).convention,
                AngleConvention::CosineLaw
            );
        }
    }

    #[test]
    fn test_metric_evaluation_missing_joint() {
        let config = ExerciseConfig::for_exercise(Exercise::Squat);
        let empty = reptrack_core::LandmarkSet::new();
        for metric in &config.metrics {
            assert!(metric.kind.evaluate(config.convention, &empty).is_none());
        }
    }
}
