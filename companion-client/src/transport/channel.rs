//! In-process companion link built on tokio channels.
//!
//! [`ChannelTransport::pair`] returns the host side and a
//! [`CompanionEndpoint`] that plays the companion device: it receives the
//! published contexts, sends commands back and toggles activation. Useful for
//! embedding a simulated companion and for end-to-end tests.

use super::{ActivationState, Transport, TransportError, TransportEvent};
use async_trait::async_trait;
use companion_types::{InboundMessage, Snapshot};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Host side of an in-process companion link.
#[derive(Debug)]
pub struct ChannelTransport {
    contexts: mpsc::UnboundedSender<Vec<u8>>,
    events: tokio::sync::Mutex<mpsc::UnboundedReceiver<TransportEvent>>,
    activation: Arc<Mutex<ActivationState>>,
}

/// Companion side of an in-process companion link.
#[derive(Debug)]
pub struct CompanionEndpoint {
    contexts: mpsc::UnboundedReceiver<Vec<u8>>,
    events: mpsc::UnboundedSender<TransportEvent>,
    activation: Arc<Mutex<ActivationState>>,
}

impl ChannelTransport {
    /// Create a connected host/companion pair. The link starts not activated.
    pub fn pair() -> (Self, CompanionEndpoint) {
        let (context_tx, context_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let activation = Arc::new(Mutex::new(ActivationState::NotActivated));

        let transport = Self {
            contexts: context_tx,
            events: tokio::sync::Mutex::new(event_rx),
            activation: Arc::clone(&activation),
        };
        let endpoint = CompanionEndpoint {
            contexts: context_rx,
            events: event_tx,
            activation,
        };
        (transport, endpoint)
    }
}

#[async_trait]
impl Transport for ChannelTransport {
    fn publish_context(&self, context: &[u8]) -> Result<(), TransportError> {
        if self.activation_state() != ActivationState::Activated {
            return Err(TransportError::NotActivated);
        }
        self.contexts
            .send(context.to_vec())
            .map_err(|_| TransportError::SendFailed("companion endpoint dropped".into()))
    }

    async fn next_event(&self) -> Result<TransportEvent, TransportError> {
        let mut events = self.events.lock().await;
        events.recv().await.ok_or(TransportError::ChannelClosed)
    }

    fn activation_state(&self) -> ActivationState {
        *self.activation.lock().unwrap()
    }
}

impl CompanionEndpoint {
    /// Activate the link and tell the host.
    pub fn activate(&self) -> Result<(), TransportError> {
        self.set_activation(ActivationState::Activated)
    }

    /// Deactivate the link and tell the host.
    pub fn deactivate(&self) -> Result<(), TransportError> {
        self.set_activation(ActivationState::Inactive)
    }

    fn set_activation(&self, state: ActivationState) -> Result<(), TransportError> {
        *self.activation.lock().unwrap() = state;
        self.events
            .send(TransportEvent::ActivationChanged(state))
            .map_err(|_| TransportError::ChannelClosed)
    }

    /// Send a command to the host.
    pub fn send_command(&self, message: &InboundMessage) -> Result<(), TransportError> {
        let bytes = message
            .to_bytes()
            .map_err(|e| TransportError::SendFailed(e.to_string()))?;
        self.send_raw(bytes)
    }

    /// Send arbitrary bytes to the host.
    pub fn send_raw(&self, bytes: Vec<u8>) -> Result<(), TransportError> {
        self.events
            .send(TransportEvent::Message(bytes))
            .map_err(|_| TransportError::ChannelClosed)
    }

    /// Wait for the next context published by the host.
    pub async fn next_context(&mut self) -> Result<Snapshot, TransportError> {
        let bytes = self
            .contexts
            .recv()
            .await
            .ok_or(TransportError::ChannelClosed)?;
        Snapshot::from_bytes(&bytes).map_err(|e| TransportError::ReceiveFailed(e.to_string()))
    }

    /// Drain every pending context and keep only the newest.
    ///
    /// Application contexts overwrite each other, so this is what a real
    /// companion would end up showing.
    pub fn latest_context(&mut self) -> Result<Option<Snapshot>, TransportError> {
        let mut latest = None;
        while let Ok(bytes) = self.contexts.try_recv() {
            latest = Some(bytes);
        }
        latest
            .map(|bytes| Snapshot::from_bytes(&bytes))
            .transpose()
            .map_err(|e| TransportError::ReceiveFailed(e.to_string()))
    }
}
