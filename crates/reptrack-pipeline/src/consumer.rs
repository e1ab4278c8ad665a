//! Background analysis consumer
//!
//! One task per session. It takes sampled landmark sets off the conduit,
//! advances the exercise state machine, and replaces the shared snapshot.
//! The machine lock is held only for the analysis step so the session
//! can swap exercises between steps.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use reptrack_core::LandmarkSet;
use reptrack_exercise::ExerciseMachine;

use crate::conduit::ConduitConsumer;
use crate::store::SnapshotStore;

/// One analysis job: the sampled landmarks, or `None` when estimation
/// found no body
pub type AnalysisJob = Option<LandmarkSet>;

/// Handle to a running consumer task
pub struct ConsumerHandle {
    cancel: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl ConsumerHandle {
    /// Cancel the consumer and wait for it to stop
    ///
    /// Cancellation lands while the task is suspended at the conduit
    /// take, never mid-step.
    pub async fn shutdown(self) {
        let _ = self.cancel.send(true);
        let _ = self.handle.await;
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Spawn the analysis consumer for one session
pub fn spawn_consumer(
    machine: Arc<Mutex<ExerciseMachine>>,
    mut jobs: ConduitConsumer<AnalysisJob>,
    store: SnapshotStore,
) -> ConsumerHandle {
    let (cancel, mut cancelled) = watch::channel(false);

    let handle = tokio::spawn(async move {
        loop {
            let job = tokio::select! {
                _ = cancelled.changed() => break,
                job = jobs.take() => job,
            };
            let Some(landmarks) = job else {
                // Producer side gone, session is tearing down
                break;
            };

            {
                // Publish under the machine lock: an exercise swap must
                // never be interleaved between step and publish, or a
                // pre-swap snapshot could overwrite the swap's reset
                let mut machine = machine.lock();
                let snapshot = machine.analyze(landmarks.as_ref());
                store.replace(snapshot);
            }

            // Give the render path a turn before the next job
            tokio::task::yield_now().await;
        }
        tracing::debug!("analysis consumer stopped");
    });

    ConsumerHandle { cancel, handle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conduit::conduit;
    use reptrack_core::{LandmarkKind, Point2};
    use reptrack_exercise::Exercise;
    use std::time::Duration;

    fn elbow_pose(deg: f32) -> LandmarkSet {
        let shoulder = Point2::new(0.5, 0.3);
        let elbow = Point2::new(0.5, 0.5);
        let phi = (shoulder.y - elbow.y).atan2(shoulder.x - elbow.x);
        let theta = phi + deg.to_radians();
        LandmarkSet::new()
            .with(LandmarkKind::LeftShoulder, shoulder.x, shoulder.y)
            .with(LandmarkKind::LeftElbow, elbow.x, elbow.y)
            .with(
                LandmarkKind::LeftWrist,
                elbow.x + 0.2 * theta.cos(),
                elbow.y + 0.2 * theta.sin(),
            )
    }

    async fn wait_for_reps(store: &SnapshotStore, reps: u32) {
        for _ in 0..500 {
            if store.load().rep_count >= reps {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!(
            "consumer never reached {reps} reps (at {})",
            store.load().rep_count
        );
    }

    #[tokio::test]
    async fn test_consumer_drives_machine() {
        let machine = Arc::new(Mutex::new(ExerciseMachine::for_exercise(
            Exercise::BicepCurl,
        )));
        let (mut producer, jobs) = conduit();
        let store = SnapshotStore::new();
        let handle = spawn_consumer(machine, jobs, store.clone());

        for deg in [150.0, 60.0] {
            while !producer.offer(Some(elbow_pose(deg))) {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        }

        wait_for_reps(&store, 1).await;
        assert_eq!(store.load().position, Some("up"));
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_consumer_handles_no_pose_jobs() {
        let machine = Arc::new(Mutex::new(ExerciseMachine::for_exercise(Exercise::Squat)));
        let (mut producer, jobs) = conduit();
        let store = SnapshotStore::new();
        let handle = spawn_consumer(machine, jobs, store.clone());

        producer.offer(None);
        for _ in 0..500 {
            if store.load().form == reptrack_core::NO_POSE_MESSAGE {
                break;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        assert_eq!(store.load().form, reptrack_core::NO_POSE_MESSAGE);
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_while_idle() {
        let machine = Arc::new(Mutex::new(ExerciseMachine::for_exercise(Exercise::PushUp)));
        let (_producer, jobs) = conduit();
        let handle = spawn_consumer(machine, jobs, SnapshotStore::new());

        tokio::time::timeout(Duration::from_secs(1), handle.shutdown())
            .await
            .expect("shutdown hung");
    }

    #[tokio::test]
    async fn test_consumer_stops_when_producer_dropped() {
        let machine = Arc::new(Mutex::new(ExerciseMachine::for_exercise(Exercise::PushUp)));
        let (producer, jobs) = conduit::<AnalysisJob>();
        let handle = spawn_consumer(machine, jobs, SnapshotStore::new());

        drop(producer);
        for _ in 0..500 {
            if handle.is_finished() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("consumer kept running after producer drop");
    }
}
