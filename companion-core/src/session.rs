//! Session rotation for the companion sync.
//!
//! The session id is the only thing that decides whether a command from the
//! companion device is current. It changes exactly once per distinct change of
//! the active conference (including leaving a conference), and never for
//! anything else.
//!
//! ```text
//! baseline: None        session 1000
//! observe:  room-a   →  session 1001   (rotated)
//! observe:  room-a   →  session 1001   (same value, no rotation)
//! observe:  None     →  session 1002   (rotated)
//! ```

use companion_types::SessionId;

/// Tracks the active conference and issues session ids.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// Last observed active-resource URL.
    last_seen: Option<String>,
    /// Current session.
    current: SessionId,
}

impl SessionManager {
    /// Create a manager whose baseline is `initial_url` in session `seed`.
    pub fn new(initial_url: Option<String>, seed: SessionId) -> Self {
        Self {
            last_seen: initial_url,
            current: seed,
        }
    }

    /// The current session id.
    pub fn current(&self) -> SessionId {
        self.current
    }

    /// Feed an observation of the active-resource URL.
    ///
    /// Returns the new session id if the URL differs from the previous
    /// observation, `None` otherwise. The caller publishes after a rotation.
    pub fn on_active_resource_changed(
        &mut self,
        url: Option<&str>,
        now_millis: u64,
    ) -> Option<SessionId> {
        if self.last_seen.as_deref() == url {
            return None;
        }
        self.last_seen = url.map(str::to_string);
        self.current = self.current.after(now_millis);
        Some(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM_A: &str = "https://meet.example/a";
    const ROOM_B: &str = "https://meet.example/b";

    #[test]
    fn repeated_value_does_not_rotate() {
        let mut manager = SessionManager::new(Some(ROOM_A.into()), SessionId::new(10));

        let observed = [Some(ROOM_A), Some(ROOM_B), Some(ROOM_B), None];
        let rotations = observed
            .iter()
            .filter_map(|url| manager.on_active_resource_changed(*url, 0))
            .count();

        // a→a no, a→b yes, b→b no, b→none yes
        assert_eq!(rotations, 2);
    }

    #[test]
    fn rotations_equal_adjacent_differences() {
        let sequence = [None, Some(ROOM_A), Some(ROOM_A), None, None, Some(ROOM_B), Some(ROOM_A)];
        let mut manager = SessionManager::new(sequence[0].map(str::to_string), SessionId::new(1));

        let rotations = sequence
            .iter()
            .filter_map(|url| manager.on_active_resource_changed(*url, 0))
            .count();
        let expected = sequence.windows(2).filter(|w| w[0] != w[1]).count();
        assert_eq!(rotations, expected);
        assert_eq!(rotations, 4);
    }

    #[test]
    fn leaving_a_conference_rotates() {
        let mut manager = SessionManager::new(Some(ROOM_A.into()), SessionId::new(5));
        let rotated = manager.on_active_resource_changed(None, 0);
        assert_eq!(rotated, Some(SessionId::new(6)));
        assert_eq!(manager.current(), SessionId::new(6));
    }

    #[test]
    fn ids_strictly_increase() {
        let mut manager = SessionManager::new(None, SessionId::new(1_000));
        let mut previous = manager.current();
        for (i, url) in [Some(ROOM_A), None, Some(ROOM_B), Some(ROOM_A)].iter().enumerate() {
            // Clock that sometimes lags behind the counter.
            let now = if i % 2 == 0 { 500 } else { 2_000 + i as u64 };
            let next = manager.on_active_resource_changed(*url, now).unwrap();
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn id_follows_clock_when_ahead() {
        let mut manager = SessionManager::new(None, SessionId::new(1_000));
        let next = manager
            .on_active_resource_changed(Some(ROOM_A), 1_700_000_000_000)
            .unwrap();
        assert_eq!(next, SessionId::new(1_700_000_000_000));
    }

    #[test]
    fn baseline_none_then_none_does_not_rotate() {
        let mut manager = SessionManager::new(None, SessionId::new(3));
        assert_eq!(manager.on_active_resource_changed(None, 99), None);
        assert_eq!(manager.current(), SessionId::new(3));
    }
}
