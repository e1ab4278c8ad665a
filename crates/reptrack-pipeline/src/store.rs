//! Shared snapshot store
//!
//! The consumer replaces the snapshot wholesale after each analysis
//! step; the render path reads it on every frame. The write lock is held
//! only for the pointer swap, never across analysis.

use std::sync::Arc;

use parking_lot::RwLock;

use reptrack_core::AnalysisSnapshot;

/// Handle to the latest analysis snapshot, cheap to clone
#[derive(Clone)]
pub struct SnapshotStore {
    inner: Arc<RwLock<AnalysisSnapshot>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(AnalysisSnapshot::initializing())),
        }
    }

    /// Current snapshot
    pub fn load(&self) -> AnalysisSnapshot {
        self.inner.read().clone()
    }

    /// Replace the snapshot wholesale
    pub fn replace(&self, snapshot: AnalysisSnapshot) {
        *self.inner.write() = snapshot;
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reptrack_core::INITIALIZING_MESSAGE;

    #[test]
    fn test_starts_initializing() {
        let store = SnapshotStore::new();
        assert_eq!(store.load().form, INITIALIZING_MESSAGE);
    }

    #[test]
    fn test_clones_share_state() {
        let store = SnapshotStore::new();
        let reader = store.clone();

        let mut snapshot = AnalysisSnapshot::initializing();
        snapshot.rep_count = 4;
        store.replace(snapshot);

        assert_eq!(reader.load().rep_count, 4);
    }
}
