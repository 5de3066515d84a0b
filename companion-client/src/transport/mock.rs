//! Mock transport for testing.
//!
//! Allows queueing inbound events and capturing published contexts for
//! verification.

use super::{ActivationState, Transport, TransportError, TransportEvent};
use async_trait::async_trait;
use companion_types::Snapshot;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock transport for testing.
///
/// Allows queueing inbound events and capturing published contexts for
/// verification.
#[derive(Debug, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

#[derive(Debug, Default)]
struct MockTransportInner {
    activation: ActivationState,
    published: Vec<Vec<u8>>,
    event_queue: VecDeque<TransportEvent>,
    fail_next_publish: Option<String>,
    fail_next_event: Option<String>,
}

impl MockTransport {
    /// Create a new, not yet activated mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock transport that is already activated.
    pub fn activated() -> Self {
        let transport = Self::new();
        transport.set_activation(ActivationState::Activated);
        transport
    }

    /// Change the activation state without queueing an event.
    pub fn set_activation(&self, state: ActivationState) {
        let mut inner = self.inner.lock().unwrap();
        inner.activation = state;
    }

    /// Change the activation state and queue the matching event.
    pub fn activate(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.activation = ActivationState::Activated;
        inner
            .event_queue
            .push_back(TransportEvent::ActivationChanged(ActivationState::Activated));
    }

    /// Queue raw message bytes to be returned by `next_event()`.
    pub fn queue_message(&self, data: Vec<u8>) {
        let mut inner = self.inner.lock().unwrap();
        inner.event_queue.push_back(TransportEvent::Message(data));
    }

    /// Queue an arbitrary event.
    pub fn queue_event(&self, event: TransportEvent) {
        let mut inner = self.inner.lock().unwrap();
        inner.event_queue.push_back(event);
    }

    /// Get all contexts that were published.
    pub fn published(&self) -> Vec<Vec<u8>> {
        let inner = self.inner.lock().unwrap();
        inner.published.clone()
    }

    /// Get all published contexts, decoded.
    pub fn published_snapshots(&self) -> Vec<Snapshot> {
        self.published()
            .iter()
            .map(|bytes| Snapshot::from_bytes(bytes).unwrap())
            .collect()
    }

    /// Get the last published context, decoded.
    pub fn last_snapshot(&self) -> Option<Snapshot> {
        self.published_snapshots().pop()
    }

    /// Number of contexts published so far.
    pub fn publish_count(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.published.len()
    }

    /// Cause the next publish_context() to fail with the given error.
    pub fn fail_next_publish(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_publish = Some(error.to_string());
    }

    /// Cause the next next_event() to fail with the given error.
    pub fn fail_next_event(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_event = Some(error.to_string());
    }

    /// Clear all state (contexts, queue, activation).
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        *inner = MockTransportInner::default();
    }
}

impl Clone for MockTransport {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn publish_context(&self, context: &[u8]) -> Result<(), TransportError> {
        let mut inner = self.inner.lock().unwrap();

        if inner.activation != ActivationState::Activated {
            return Err(TransportError::NotActivated);
        }

        // Check for forced failure
        if let Some(error) = inner.fail_next_publish.take() {
            return Err(TransportError::SendFailed(error));
        }

        inner.published.push(context.to_vec());
        Ok(())
    }

    async fn next_event(&self) -> Result<TransportEvent, TransportError> {
        let mut inner = self.inner.lock().unwrap();

        // Check for forced failure
        if let Some(error) = inner.fail_next_event.take() {
            return Err(TransportError::ReceiveFailed(error));
        }

        inner
            .event_queue
            .pop_front()
            .ok_or(TransportError::ChannelClosed)
    }

    fn activation_state(&self) -> ActivationState {
        let inner = self.inner.lock().unwrap();
        inner.activation
    }
}
