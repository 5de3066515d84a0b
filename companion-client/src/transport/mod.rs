//! Transport abstraction for the companion link.
//!
//! This module provides a pluggable transport layer that abstracts the
//! mechanism actually moving bytes to and from the companion device
//! (a platform watch session, an in-process channel, a mock for testing).
//!
//! # Design
//!
//! The transport mirrors how companion links behave on real platforms:
//! - `publish_context()` replaces the companion's application context. It
//!   only enqueues; delivery is the transport's business.
//! - `next_event()` yields inbound command bytes and activation changes.
//! - `activation_state()` reports whether the link can currently deliver.
//!
//! Retries and reconnection are the transport's concern, not the caller's.
//!
//! # Example
//!
//! ```ignore
//! let (transport, mut companion) = ChannelTransport::pair();
//! companion.activate()?;
//! transport.publish_context(&snapshot.to_bytes()?)?;
//! let event = transport.next_event().await?;
//! ```

mod channel;
mod mock;

pub use channel::{ChannelTransport, CompanionEndpoint};
pub use mock::MockTransport;

use async_trait::async_trait;
use thiserror::Error;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The companion session is not activated.
    #[error("companion session not activated")]
    NotActivated,

    /// Publishing the application context failed.
    #[error("publish failed: {0}")]
    SendFailed(String),

    /// Receiving the next event failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(String),

    /// The link is gone for good.
    #[error("channel closed")]
    ChannelClosed,
}

/// Activation state of the companion session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivationState {
    /// Never activated (not paired, or the companion app is not installed).
    #[default]
    NotActivated,
    /// Was active, temporarily unable to deliver (e.g. switching devices).
    Inactive,
    /// Ready to deliver contexts and messages.
    Activated,
}

/// Something the transport received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Raw message bytes from the companion device.
    Message(Vec<u8>),
    /// The companion session changed activation state.
    ActivationChanged(ActivationState),
}

/// Transport trait for the companion link.
///
/// Implementations handle the underlying delivery mechanism.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Replace the companion's application context with `context`.
    ///
    /// Fire and forget: returns once the context is queued.
    fn publish_context(&self, context: &[u8]) -> Result<(), TransportError>;

    /// Wait for the next inbound event.
    ///
    /// Returns [`TransportError::ChannelClosed`] when no more events will
    /// ever arrive.
    async fn next_event(&self) -> Result<TransportEvent, TransportError>;

    /// Current activation state.
    fn activation_state(&self) -> ActivationState;
}
