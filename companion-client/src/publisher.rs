//! Snapshot publishing.
//!
//! [`SnapshotPublisher`] derives the whole snapshot from the current state and
//! hands it to the transport. Publishing is best effort: encode or transport
//! failures are logged and swallowed, never retried here and never
//! propagated to the host. The companion simply stays stale until the next
//! successful publish.

use companion_core::{build_snapshot, SyncState};
use companion_types::Snapshot;
use std::fmt;
use std::sync::Arc;

use crate::transport::Transport;

/// What prompted a publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishReason {
    /// The recent-conference list changed.
    RecentResources,
    /// The mute flag changed.
    Muted,
    /// The active conference changed (URL or invite readiness).
    ActiveResource,
    /// The companion session became activated.
    Activated,
    /// The host joined a conference.
    ConferenceJoined,
    /// The engine started with an already activated link.
    Startup,
}

impl fmt::Display for PublishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RecentResources => "recent resources changed",
            Self::Muted => "mute changed",
            Self::ActiveResource => "active resource changed",
            Self::Activated => "companion activated",
            Self::ConferenceJoined => "conference joined",
            Self::Startup => "startup",
        };
        f.write_str(name)
    }
}

/// Result of one publish attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The snapshot was handed to the transport.
    Published(Snapshot),
    /// Encoding or the transport failed; already logged.
    Failed,
}

impl PublishOutcome {
    /// The published snapshot, if any.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            Self::Published(snapshot) => Some(snapshot),
            Self::Failed => None,
        }
    }
}

/// Pushes snapshots of the host state to the companion.
pub struct SnapshotPublisher<T: Transport> {
    transport: Arc<T>,
    max_recent_urls: usize,
}

impl<T: Transport> SnapshotPublisher<T> {
    /// Create a publisher sending at most `max_recent_urls` recent entries.
    pub fn new(transport: Arc<T>, max_recent_urls: usize) -> Self {
        Self {
            transport,
            max_recent_urls,
        }
    }

    /// Publish the snapshot for `state`.
    pub fn publish(&self, state: &SyncState, reason: PublishReason) -> PublishOutcome {
        let snapshot = build_snapshot(state, self.max_recent_urls);

        let bytes = match snapshot.to_bytes() {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Failed to encode companion context ({}): {}", reason, e);
                return PublishOutcome::Failed;
            }
        };

        match self.transport.publish_context(&bytes) {
            Ok(()) => {
                tracing::debug!(
                    "Published companion context ({}): session={} url={:?} muted={} recent={}",
                    reason,
                    snapshot.session_id,
                    snapshot.conference_url,
                    snapshot.mic_muted,
                    snapshot.recent_urls.len()
                );
                PublishOutcome::Published(snapshot)
            }
            Err(e) => {
                tracing::warn!("Failed to publish companion context ({}): {}", reason, e);
                PublishOutcome::Failed
            }
        }
    }
}
