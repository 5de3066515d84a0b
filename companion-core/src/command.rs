//! Command evaluation.
//!
//! Every message from the companion device is untrusted. [`evaluate`] takes
//! the raw bytes and the current host state and decides what, if anything,
//! the host should do. It performs no I/O; `companion-client` logs the
//! decision and invokes the host action.
//!
//! # Protocol
//!
//! 1. Decode. Undecodable bytes are [`Rejection::Malformed`].
//! 2. Session check. A missing or different session id is
//!    [`Rejection::StaleSession`]. Only the single current id is accepted;
//!    there is no history of earlier sessions.
//! 3. Dispatch by command:
//!    - `HANG_UP` leaves the conference, if there is one.
//!    - `JOIN_CONFERENCE` navigates, unless already on that URL.
//!    - `SET_MUTED` sets the mute state.
//! 4. Unknown commands are ignored.

use companion_types::{Command, InboundMessage, SessionId, WireError};
use thiserror::Error;

use crate::state::SyncState;

/// Something the host must do in response to an accepted command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAction {
    /// Navigate to a conference, or away from any conference with `None`.
    NavigateTo(Option<String>),
    /// Set the local mute state.
    SetMuted {
        /// Desired mute state.
        muted: bool,
        /// Create the local audio track if it does not exist yet.
        ensure_track: bool,
    },
}

/// Why an accepted command produced no action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    /// `HANG_UP` with no active conference.
    NoActiveConference,
    /// `JOIN_CONFERENCE` for the conference already active.
    AlreadyInConference,
}

/// Why a message was dropped before dispatch.
#[derive(Debug, Error)]
pub enum Rejection {
    /// The message could not be decoded or its payload is unusable.
    #[error("malformed message: {0}")]
    Malformed(#[from] WireError),

    /// The message belongs to another session.
    #[error(
        "ignoring outdated {command} command: message session {}, current session {current_session}",
        display_session(.message_session)
    )]
    StaleSession {
        /// Command name as received.
        command: String,
        /// Session id carried by the message, if readable.
        message_session: Option<SessionId>,
        /// Session id the host is in.
        current_session: SessionId,
    },
}

/// Outcome of evaluating one inbound message.
#[derive(Debug)]
pub enum Decision {
    /// Perform the action.
    Execute(HostAction),
    /// Accepted, but nothing to do.
    NoOp {
        /// The accepted command.
        command: Command,
        /// Why nothing happens.
        reason: NoOpReason,
    },
    /// Dropped before dispatch.
    Reject(Rejection),
    /// Current session, but a command this host does not know.
    Ignore {
        /// The unknown command name.
        command: String,
    },
}

impl Decision {
    /// The action to perform, if any.
    pub fn action(&self) -> Option<&HostAction> {
        match self {
            Self::Execute(action) => Some(action),
            _ => None,
        }
    }

    /// Whether the message was dropped as stale or foreign.
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Reject(Rejection::StaleSession { .. }))
    }
}

/// Evaluate raw message bytes against the current state.
///
/// `ensure_track` is forwarded to [`HostAction::SetMuted`].
pub fn evaluate(bytes: &[u8], state: &SyncState, ensure_track: bool) -> Decision {
    let message = match InboundMessage::from_bytes(bytes) {
        Ok(message) => message,
        Err(e) => return Decision::Reject(e.into()),
    };

    if message.session_id != Some(state.session_id) {
        return Decision::Reject(Rejection::StaleSession {
            command: message.command,
            message_session: message.session_id,
            current_session: state.session_id,
        });
    }

    let command = match message.command() {
        Ok(command) => command,
        Err(e) => return Decision::Reject(e.into()),
    };

    match command {
        Command::HangUp => {
            if state.has_active_resource() {
                Decision::Execute(HostAction::NavigateTo(None))
            } else {
                Decision::NoOp {
                    command: Command::HangUp,
                    reason: NoOpReason::NoActiveConference,
                }
            }
        }
        Command::JoinConference { url } => {
            if state.active_resource_url.as_deref() == Some(url.as_str()) {
                Decision::NoOp {
                    command: Command::JoinConference { url },
                    reason: NoOpReason::AlreadyInConference,
                }
            } else {
                Decision::Execute(HostAction::NavigateTo(Some(url)))
            }
        }
        Command::SetMuted { muted } => Decision::Execute(HostAction::SetMuted {
            muted,
            ensure_track,
        }),
        Command::Unknown { name } => Decision::Ignore { command: name },
    }
}

fn display_session(session: &Option<SessionId>) -> String {
    match session {
        Some(id) => id.to_string(),
        None => "none".to_string(),
    }
}
