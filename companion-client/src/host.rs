//! The host application's side of the seam.
//!
//! Navigation, call joining and mute handling belong to the host. The sync
//! engine only asks for them through [`HostActions`], and learns about host
//! lifecycle moments through [`HostEvent`].

/// Actions the engine asks the host to perform.
///
/// Implementations typically dispatch into the host's own state management,
/// which in turn updates the [`Store`](crate::Store).
pub trait HostActions: Send + Sync {
    /// Navigate to a conference, or leave the current one when `url` is `None`.
    fn navigate_to(&self, url: Option<&str>);

    /// Set the local microphone mute state.
    ///
    /// `ensure_track` asks the host to create the local audio track if it
    /// does not exist yet.
    fn set_muted(&self, muted: bool, ensure_track: bool);
}

/// Host lifecycle events outside the watched store slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The host finished joining a conference.
    ConferenceJoined,
    /// Stop the engine's event loop.
    Shutdown,
}
