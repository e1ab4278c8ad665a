//! Exercise state machine
//!
//! A three-phase machine (neutral, extended, flexed) driven by one gating
//! joint angle. The extended phase is always the larger-angle extreme.
//! Leaving a committed extreme requires the configured hold-frame count,
//! which debounces single-frame estimation jitter around the thresholds.
//! A repetition commits on the configured counting edge, and only when a
//! cycle was opened by committing the opposite extreme first.

use std::collections::HashMap;

use reptrack_core::{AnalysisSnapshot, FormLabel, LandmarkSet};

use crate::angle::angle_between;
use crate::config::{CycleEdge, Exercise, ExerciseConfig, RepScoring};
use crate::score::{deviation_score, weighted_accuracy};

/// Committed movement phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Between the thresholds; only ever committed before the first extreme
    Neutral,
    /// Gate angle at or above `extended_above`
    Extended,
    /// Gate angle at or below `flexed_below`
    Flexed,
}

/// Per-session rep counter and form scorer for one exercise
pub struct ExerciseMachine {
    config: ExerciseConfig,
    phase: Phase,
    frames_in_phase: u32,
    cycle_open: bool,
    rep_count: u32,
    last_rep_accuracy: Option<f32>,
    opening_sample: f32,
    held_sum: f32,
    held_count: u32,
}

impl ExerciseMachine {
    pub fn new(config: ExerciseConfig) -> Self {
        Self {
            config,
            phase: Phase::Neutral,
            frames_in_phase: 0,
            cycle_open: false,
            rep_count: 0,
            last_rep_accuracy: None,
            opening_sample: 0.0,
            held_sum: 0.0,
            held_count: 0,
        }
    }

    pub fn for_exercise(exercise: Exercise) -> Self {
        Self::new(ExerciseConfig::for_exercise(exercise))
    }

    pub fn exercise(&self) -> Exercise {
        self.config.exercise
    }

    pub fn rep_count(&self) -> u32 {
        self.rep_count
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Discard all movement state, keeping the configuration
    pub fn reset(&mut self) {
        self.phase = Phase::Neutral;
        self.frames_in_phase = 0;
        self.cycle_open = false;
        self.rep_count = 0;
        self.last_rep_accuracy = None;
        self.opening_sample = 0.0;
        self.held_sum = 0.0;
        self.held_count = 0;
    }

    /// The extreme whose commit opens a cycle; committing the opposite
    /// extreme counts the rep
    fn opening_extreme(&self) -> Phase {
        match self.config.count_on {
            CycleEdge::EnterFlexed => Phase::Extended,
            CycleEdge::ReturnExtended => Phase::Flexed,
        }
    }

    fn label_for(&self, phase: Phase) -> Option<&'static str> {
        match phase {
            Phase::Neutral => None,
            Phase::Extended => Some(self.config.extended_label),
            Phase::Flexed => Some(self.config.flexed_label),
        }
    }

    /// Advance the machine by one analyzed frame
    ///
    /// `None` (or an empty set) means pose estimation found no body: the
    /// machine does not transition and the rep count carries over.
    pub fn analyze(&mut self, landmarks: Option<&LandmarkSet>) -> AnalysisSnapshot {
        let landmarks = match landmarks {
            Some(set) if !set.is_empty() => set,
            _ => return AnalysisSnapshot::no_pose(self.rep_count),
        };

        let gate = &self.config.gate;
        let gate_angle = match (
            landmarks.position(gate.a),
            landmarks.position(gate.b),
            landmarks.position(gate.c),
        ) {
            (Some(a), Some(b), Some(c)) => angle_between(self.config.convention, a, b, c),
            // The gating joint itself is not visible; treat like no pose
            _ => return AnalysisSnapshot::no_pose(self.rep_count),
        };

        let candidate = if gate_angle >= gate.extended_above {
            Phase::Extended
        } else if gate_angle <= gate.flexed_below {
            Phase::Flexed
        } else {
            Phase::Neutral
        };

        let (frame_accuracy, angles) = self.score_frame(landmarks, candidate);
        let counted = self.transition(candidate, frame_accuracy);

        // Accumulate form over the opening phase for held-average scoring
        if !counted
            && self.cycle_open
            && candidate == self.opening_extreme()
            && self.phase == candidate
        {
            self.held_sum += frame_accuracy;
            self.held_count += 1;
        }

        let accuracy = self.last_rep_accuracy.unwrap_or(frame_accuracy);
        AnalysisSnapshot {
            form: FormLabel::for_accuracy(accuracy).as_str().to_string(),
            accuracy,
            position: self.label_for(self.phase),
            rep_count: self.rep_count,
            angles,
        }
    }

    /// Evaluate every configured metric against the candidate phase targets
    fn score_frame(
        &self,
        landmarks: &LandmarkSet,
        candidate: Phase,
    ) -> (f32, HashMap<String, f32>) {
        let mut angles = HashMap::with_capacity(self.config.metrics.len());
        let mut scored = Vec::with_capacity(self.config.metrics.len());

        for metric in &self.config.metrics {
            let target = match candidate {
                Phase::Extended => metric.targets.extended,
                Phase::Flexed => metric.targets.flexed,
                Phase::Neutral => metric.targets.neutral,
            };
            match metric.kind.evaluate(self.config.convention, landmarks) {
                Some(value) => {
                    angles.insert(metric.name.to_string(), value);
                    let score = deviation_score(value, target, metric.threshold, metric.steep_slope);
                    scored.push((score, metric.weight));
                }
                // Joint not visible this frame: the metric scores zero
                None => scored.push((0.0, metric.weight)),
            }
        }

        (weighted_accuracy(&scored), angles)
    }

    /// Resolve the phase transition; returns whether a rep was counted
    fn transition(&mut self, candidate: Phase, frame_accuracy: f32) -> bool {
        if candidate == self.phase {
            self.frames_in_phase = self.frames_in_phase.saturating_add(1);
            return false;
        }
        if candidate == Phase::Neutral {
            // Mid-movement; the committed extreme persists
            return false;
        }
        if self.phase != Phase::Neutral && self.frames_in_phase < self.config.hold_frames {
            // Extreme not held long enough, reject the transition
            return false;
        }

        self.phase = candidate;
        self.frames_in_phase = 1;

        if candidate == self.opening_extreme() {
            self.cycle_open = true;
            self.opening_sample = frame_accuracy;
            // Held accumulation restarts; analyze() adds this frame after
            // the transition resolves
            self.held_sum = 0.0;
            self.held_count = 0;
            return false;
        }

        // Counting extreme committed
        if !self.cycle_open {
            return false;
        }
        self.cycle_open = false;

        let rep_accuracy = match self.config.scoring {
            RepScoring::Checkpoints => (self.opening_sample + frame_accuracy) / 2.0,
            RepScoring::HeldAverage => {
                let held_avg = if self.held_count > 0 {
                    self.held_sum / self.held_count as f32
                } else {
                    frame_accuracy
                };
                (held_avg + frame_accuracy) / 2.0
            }
        };

        self.rep_count += 1;
        self.last_rep_accuracy = Some(rep_accuracy);
        true
    }
}
