//! Command dispatch.
//!
//! [`CommandDispatcher`] is the single inbound trust boundary. It runs the
//! pure evaluation from `companion-core`, logs the outcome, and invokes the
//! host action for accepted commands. Nothing here fails: every rejected
//! message is logged and dropped.

use companion_core::{evaluate, Decision, HostAction, Rejection, SyncState};

use crate::host::HostActions;

/// Validates companion commands and forwards them to the host.
pub struct CommandDispatcher<H: HostActions> {
    host: H,
    ensure_track_on_mute: bool,
}

impl<H: HostActions> CommandDispatcher<H> {
    /// Create a dispatcher invoking actions on `host`.
    pub fn new(host: H, ensure_track_on_mute: bool) -> Self {
        Self {
            host,
            ensure_track_on_mute,
        }
    }

    /// The host this dispatcher drives.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Handle one raw message from the companion against `state`.
    ///
    /// Returns the decision that was acted on.
    pub fn handle(&self, bytes: &[u8], state: &SyncState) -> Decision {
        let decision = evaluate(bytes, state, self.ensure_track_on_mute);

        match &decision {
            Decision::Execute(action) => {
                tracing::info!(
                    "Companion command accepted in session {}: {:?}",
                    state.session_id,
                    action
                );
                self.apply(action);
            }
            Decision::NoOp { command, reason } => {
                tracing::debug!(
                    "Companion command {} needs no action: {:?}",
                    command.name(),
                    reason
                );
            }
            Decision::Reject(rejection @ Rejection::StaleSession { .. }) => {
                tracing::warn!("{}", rejection);
            }
            Decision::Reject(rejection @ Rejection::Malformed(_)) => {
                tracing::warn!("Dropping companion message: {}", rejection);
            }
            Decision::Ignore { command } => {
                tracing::debug!("Ignoring unknown companion command {}", command);
            }
        }

        decision
    }

    fn apply(&self, action: &HostAction) {
        match action {
            HostAction::NavigateTo(url) => self.host.navigate_to(url.as_deref()),
            HostAction::SetMuted {
                muted,
                ensure_track,
            } => self.host.set_muted(*muted, *ensure_track),
        }
    }
}
