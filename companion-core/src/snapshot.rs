//! Snapshot derivation.
//!
//! Turns the host's [`SyncState`] into the [`Snapshot`] the companion device
//! receives. Two normalizations apply:
//!
//! - The conference URL is dropped while the invite URL is not ready, or when
//!   it ends in `/` (a base URL with no room name, seen mid-navigation).
//! - The recent list is cut to the newest `max_recent` entries and then
//!   reversed, so the companion gets newest first.

use companion_types::{RecentEntry, Snapshot};

use crate::state::SyncState;

/// Default number of recent conferences sent to the companion.
pub const DEFAULT_MAX_RECENT_URLS: usize = 10;

/// Canonical conference URL for publishing, or `None` if it must be hidden.
pub fn canonical_conference_url(url: Option<&str>, invite_url_ready: bool) -> Option<String> {
    let url = url?;
    if !invite_url_ready || url.ends_with('/') {
        return None;
    }
    Some(url.to_string())
}

/// The newest `max_recent` entries of a chronological list, newest first.
pub fn project_recent(entries: &[RecentEntry], max_recent: usize) -> Vec<RecentEntry> {
    let start = entries.len().saturating_sub(max_recent);
    entries[start..].iter().rev().cloned().collect()
}

/// Build the full snapshot for the current state.
pub fn build_snapshot(state: &SyncState, max_recent: usize) -> Snapshot {
    Snapshot {
        conference_timestamp: state.conference_timestamp,
        conference_url: canonical_conference_url(
            state.active_resource_url.as_deref(),
            state.invite_url_ready,
        ),
        mic_muted: state.muted,
        recent_urls: project_recent(&state.recent_resources, max_recent),
        session_id: state.session_id,
    }
}
