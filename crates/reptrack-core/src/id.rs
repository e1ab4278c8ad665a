//! Identity types for reptrack sessions

use std::fmt;

/// Session identity - one per active analysis session
///
/// Sessions never share mutable state; every pipeline, state machine,
/// and snapshot store is scoped to exactly one SessionId.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SessionId(pub u64);

impl SessionId {
    pub const ZERO: SessionId = SessionId(0);

    #[inline]
    pub fn new(id: u64) -> Self {
        SessionId(id)
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Session({:016x})", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_display() {
        let id = SessionId::new(0xDEAD_BEEF);
        assert_eq!(format!("{}", id), "00000000deadbeef");
        assert_eq!(format!("{:?}", id), "Session(00000000deadbeef)");
    }
}
