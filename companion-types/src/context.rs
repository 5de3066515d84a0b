//! Outbound application context.
//!
//! A [`Snapshot`] is the whole state the companion device renders. It is
//! rebuilt and sent in full on every publish; the companion keeps no merge
//! logic and simply replaces its previous context.

use serde::{Deserialize, Serialize};

use crate::{SessionId, WireError};

/// One entry of the host's recent-conference history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentEntry {
    /// Conference URL.
    pub conference: String,
    /// When the conference was joined (epoch millis).
    pub date: u64,
    /// How long the user stayed (millis).
    pub duration: u64,
}

impl RecentEntry {
    /// Create a new entry.
    pub fn new(conference: impl Into<String>, date: u64, duration: u64) -> Self {
        Self {
            conference: conference.into(),
            date,
            duration,
        }
    }
}

/// Application context pushed to the companion device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// When the current conference was joined (epoch millis).
    #[serde(
        rename = "conferenceTimestamp",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub conference_timestamp: Option<u64>,
    /// Canonical URL of the active conference, absent when there is none.
    #[serde(
        rename = "conferenceURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub conference_url: Option<String>,
    /// Whether the local microphone is muted.
    #[serde(rename = "micMuted")]
    pub mic_muted: bool,
    /// Recent conferences, most recent first.
    #[serde(rename = "recentURLs")]
    pub recent_urls: Vec<RecentEntry>,
    /// Session the companion must echo back with its commands.
    #[serde(rename = "sessionID")]
    pub session_id: SessionId,
}

impl Snapshot {
    /// Serialize to JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, WireError> {
        serde_json::to_vec(self).map_err(WireError::Serialization)
    }

    /// Deserialize from JSON bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        serde_json::from_slice(bytes).map_err(WireError::Deserialization)
    }
}
