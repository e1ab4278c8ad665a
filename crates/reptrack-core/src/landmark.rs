//! Body landmarks - named keypoints produced by pose estimation
//!
//! A landmark is a named joint with a normalized 2-D position. The set of
//! landmarks for one analyzed frame is immutable once produced; the
//! pipeline owns it for the duration of a single analysis step.

/// Named body keypoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandmarkKind {
    Nose,

    // Left side
    LeftShoulder,
    LeftElbow,
    LeftWrist,
    LeftHip,
    LeftKnee,
    LeftAnkle,

    // Right side
    RightShoulder,
    RightElbow,
    RightWrist,
    RightHip,
    RightKnee,
    RightAnkle,
}

impl LandmarkKind {
    /// All landmark kinds in canonical order
    pub fn all() -> &'static [LandmarkKind] {
        &[
            LandmarkKind::Nose,
            LandmarkKind::LeftShoulder,
            LandmarkKind::LeftElbow,
            LandmarkKind::LeftWrist,
            LandmarkKind::LeftHip,
            LandmarkKind::LeftKnee,
            LandmarkKind::LeftAnkle,
            LandmarkKind::RightShoulder,
            LandmarkKind::RightElbow,
            LandmarkKind::RightWrist,
            LandmarkKind::RightHip,
            LandmarkKind::RightKnee,
            LandmarkKind::RightAnkle,
        ]
    }

    /// Number of landmark kinds
    pub fn count() -> usize {
        13
    }

    /// Index into the canonical ordering
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// 2D position in normalized image coordinates [0,1]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One named keypoint with position and optional visibility confidence
#[derive(Debug, Clone, Copy)]
pub struct Landmark {
    pub kind: LandmarkKind,
    pub position: Point2,
    pub visibility: Option<f32>,
}

impl Landmark {
    pub fn new(kind: LandmarkKind, position: Point2) -> Self {
        Self {
            kind,
            position,
            visibility: None,
        }
    }
}

/// Ordered set of landmarks for one analyzed frame
///
/// Storage is indexed by `LandmarkKind`; absent joints are `None` so a
/// partially visible body still yields a usable set.
#[derive(Debug, Clone, Default)]
pub struct LandmarkSet {
    slots: Vec<Option<Landmark>>,
}

impl LandmarkSet {
    /// Create an empty set with all slots unoccupied
    pub fn new() -> Self {
        Self {
            slots: vec![None; LandmarkKind::count()],
        }
    }

    /// Insert or replace a landmark
    pub fn set(&mut self, landmark: Landmark) {
        let idx = landmark.kind.index();
        if idx < self.slots.len() {
            self.slots[idx] = Some(landmark);
        }
    }

    /// Builder-style insertion of a bare position
    pub fn with(mut self, kind: LandmarkKind, x: f32, y: f32) -> Self {
        self.set(Landmark::new(kind, Point2::new(x, y)));
        self
    }

    /// Get a landmark by kind
    pub fn get(&self, kind: LandmarkKind) -> Option<&Landmark> {
        self.slots.get(kind.index()).and_then(|s| s.as_ref())
    }

    /// Position of a landmark, if present
    pub fn position(&self, kind: LandmarkKind) -> Option<Point2> {
        self.get(kind).map(|l| l.position)
    }

    /// Number of landmarks present
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_ordering_matches_index() {
        for (i, kind) in LandmarkKind::all().iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        assert_eq!(LandmarkKind::all().len(), LandmarkKind::count());
    }

    #[test]
    fn test_point_distance() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(0.3, 0.4);
        assert!((a.distance(&b) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_landmark_set_get() {
        let set = LandmarkSet::new()
            .with(LandmarkKind::LeftElbow, 0.4, 0.5)
            .with(LandmarkKind::LeftWrist, 0.4, 0.7);

        assert_eq!(set.len(), 2);
        assert!(set.get(LandmarkKind::LeftElbow).is_some());
        assert!(set.get(LandmarkKind::LeftKnee).is_none());

        let pos = set.position(LandmarkKind::LeftWrist).unwrap();
        assert_eq!(pos, Point2::new(0.4, 0.7));
    }

    #[test]
    fn test_empty_set() {
        let set = LandmarkSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }
}
