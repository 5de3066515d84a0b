//! Host-side state the companion sync reads.
//!
//! [`SyncState`] lives in the host's store for the lifetime of the process.
//! The host owns every field except `session_id`, which only the session
//! manager writes.

use companion_types::{RecentEntry, SessionId};

/// Everything the sync needs to know about the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncState {
    /// URL of the joined conference, `None` when no conference is active.
    pub active_resource_url: Option<String>,
    /// Whether the invite URL for the active conference is final.
    pub invite_url_ready: bool,
    /// Local microphone mute state.
    pub muted: bool,
    /// Recent conferences in chronological order (oldest first).
    pub recent_resources: Vec<RecentEntry>,
    /// Current synchronization session.
    pub session_id: SessionId,
    /// When the current conference was joined (epoch millis).
    pub conference_timestamp: Option<u64>,
}

impl SyncState {
    /// The active-resource slice: URL plus its readiness.
    pub fn active_resource(&self) -> ActiveResource {
        ActiveResource {
            url: self.active_resource_url.clone(),
            invite_url_ready: self.invite_url_ready,
        }
    }

    /// Whether a conference is currently active.
    pub fn has_active_resource(&self) -> bool {
        self.active_resource_url.is_some()
    }
}

impl Default for SyncState {
    fn default() -> Self {
        Self {
            active_resource_url: None,
            invite_url_ready: false,
            muted: false,
            recent_resources: Vec::new(),
            session_id: SessionId::new(0),
            conference_timestamp: None,
        }
    }
}

/// The active conference as observed by the publisher.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActiveResource {
    /// Conference URL.
    pub url: Option<String>,
    /// Invite readiness of that URL.
    pub invite_url_ready: bool,
}
