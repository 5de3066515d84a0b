//! Session identity for the companion sync protocol.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the synchronization session a snapshot or command belongs to.
///
/// A new id is issued every time the active conference changes. Commands
/// carrying any other id are stale and must be dropped. Ids are time-seeded
/// so a companion still holding a context from an earlier process run does
/// not accidentally match the current session.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(u64);

impl SessionId {
    /// Create a SessionId with the given value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the numeric value of this SessionId.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The id that follows this one at wall-clock time `now_millis`.
    ///
    /// Always strictly greater than `self` unless `self` is already
    /// `u64::MAX`, in which case it saturates.
    pub fn after(&self, now_millis: u64) -> Self {
        Self(now_millis.max(self.0.saturating_add(1)))
    }

    /// Read a session id the way the companion app sends it.
    ///
    /// Accepts a non-negative integral JSON number or a decimal string.
    /// Anything else yields `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let raw = match value {
            serde_json::Value::Number(n) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                    .map(|f| f as u64)
            }),
            serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        raw.map(Self)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}
