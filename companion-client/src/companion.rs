//! CompanionSync - the composed engine.
//!
//! This module provides [`CompanionSync`], which wires the session manager,
//! the snapshot publisher and the command dispatcher to a host [`Store`], a
//! [`Transport`] and the host's [`HostActions`].
//!
//! # Architecture
//!
//! ```text
//! Store change ─→ SessionManager ─→ SnapshotPublisher ─→ Transport ─→ Companion
//!                                                                        │
//! HostActions ←── CommandDispatcher ←─────────────── Transport ←─────────┘
//! ```
//!
//! Every event is handled to completion on one task before the next one is
//! polled, so the session id written by the session manager is always
//! visible to the next publish and the next command check.
//!
//! # Example
//!
//! ```ignore
//! let store = Store::new(SyncState::default());
//! let Some(sync) = CompanionSync::attach(config, store.clone(), watch_transport, host) else {
//!     return; // no companion on this platform
//! };
//! let handle = sync.handle();
//! tokio::spawn(sync.run());
//! handle.conference_joined();
//! ```

use companion_core::{ActiveResource, SessionManager};
use companion_types::{RecentEntry, SessionId};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::mpsc;

use crate::config::CompanionConfig;
use crate::dispatcher::CommandDispatcher;
use crate::host::{HostActions, HostEvent};
use crate::publisher::{PublishOutcome, PublishReason, SnapshotPublisher};
use crate::store::{SliceWatch, Store};
use crate::transport::{ActivationState, Transport, TransportError, TransportEvent};

/// Sends host lifecycle events to a running [`CompanionSync`].
#[derive(Debug, Clone)]
pub struct CompanionHandle {
    events: mpsc::UnboundedSender<HostEvent>,
}

impl CompanionHandle {
    /// Tell the engine the host finished joining a conference.
    pub fn conference_joined(&self) {
        self.send(HostEvent::ConferenceJoined);
    }

    /// Stop the engine's event loop.
    pub fn shutdown(&self) {
        self.send(HostEvent::Shutdown);
    }

    fn send(&self, event: HostEvent) {
        if self.events.send(event).is_err() {
            tracing::debug!("Companion engine already stopped, dropping {:?}", event);
        }
    }
}

/// The companion sync engine.
pub struct CompanionSync<T: Transport, H: HostActions> {
    store: Store,
    transport: Arc<T>,
    sessions: SessionManager,
    publisher: SnapshotPublisher<T>,
    dispatcher: CommandDispatcher<H>,
    events: mpsc::UnboundedReceiver<HostEvent>,
    handle: CompanionHandle,
    active: SliceWatch<ActiveResource>,
    muted: SliceWatch<bool>,
    recent: SliceWatch<Vec<RecentEntry>>,
}

impl<T: Transport, H: HostActions> CompanionSync<T, H> {
    /// Create the engine if the companion capability is present.
    ///
    /// Hosts without a companion transport pass `None` and get nothing back;
    /// no engine exists, so nothing is published or accepted.
    pub fn attach(
        config: CompanionConfig,
        store: Store,
        transport: Option<T>,
        host: H,
    ) -> Option<Self> {
        match transport {
            Some(transport) => Some(Self::new(config, store, transport, host)),
            None => {
                tracing::info!("No companion transport available, companion sync disabled");
                None
            }
        }
    }

    /// Create the engine.
    ///
    /// Starts a fresh session (time-seeded) and records it in the store.
    /// The store slices are watched from here on, so changes made before
    /// [`run`](Self::run) starts are still seen.
    pub fn new(config: CompanionConfig, store: Store, transport: T, host: H) -> Self {
        let seed = store.select(|s| s.session_id).after(now_millis());
        store.update(|s| s.session_id = seed);
        let sessions = SessionManager::new(store.select(|s| s.active_resource_url.clone()), seed);

        let active = store.subscribe(|s| s.active_resource());
        let muted = store.subscribe(|s| s.muted);
        let recent = store.subscribe(|s| s.recent_resources.clone());

        let transport = Arc::new(transport);
        let publisher =
            SnapshotPublisher::new(Arc::clone(&transport), config.publisher.max_recent_urls);
        let dispatcher = CommandDispatcher::new(host, config.dispatcher.ensure_track_on_mute);

        let (tx, rx) = mpsc::unbounded_channel();

        tracing::info!("Companion sync attached (session {})", seed);

        Self {
            store,
            transport,
            sessions,
            publisher,
            dispatcher,
            events: rx,
            handle: CompanionHandle { events: tx },
            active,
            muted,
            recent,
        }
    }

    /// A handle for sending host lifecycle events.
    pub fn handle(&self) -> CompanionHandle {
        self.handle.clone()
    }

    /// The current session id.
    pub fn session_id(&self) -> SessionId {
        self.sessions.current()
    }

    /// The store this engine watches.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The transport this engine publishes on.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The host this engine drives.
    pub fn host(&self) -> &H {
        self.dispatcher.host()
    }

    /// React to a change of the active-resource slice.
    ///
    /// Rotates the session if the URL differs from the last one seen, then
    /// publishes. A readiness-only change publishes without rotating.
    pub fn on_active_resource_changed(&mut self) -> PublishOutcome {
        self.sync_session();
        self.publish(PublishReason::ActiveResource)
    }

    /// Rotate the session if the store's active URL is not the last one seen.
    fn sync_session(&mut self) {
        let url = self.store.select(|s| s.active_resource_url.clone());
        if let Some(session) = self
            .sessions
            .on_active_resource_changed(url.as_deref(), now_millis())
        {
            tracing::info!("Active conference changed to {:?}, new session {}", url, session);
            self.store.update(|s| s.session_id = session);
        }
    }

    /// Publish the current state.
    pub fn publish(&self, reason: PublishReason) -> PublishOutcome {
        self.publisher.publish(&self.store.state(), reason)
    }

    /// Handle one event from the transport.
    pub fn on_transport_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Message(bytes) => {
                let state = self.store.state();
                self.dispatcher.handle(&bytes, &state);
            }
            TransportEvent::ActivationChanged(ActivationState::Activated) => {
                tracing::info!("Companion session activated, republishing context");
                self.publish(PublishReason::Activated);
            }
            TransportEvent::ActivationChanged(state) => {
                tracing::debug!("Companion session activation changed: {:?}", state);
            }
        }
    }

    /// Handle one host lifecycle event. Returns `false` on shutdown.
    pub fn on_host_event(&mut self, event: HostEvent) -> bool {
        match event {
            HostEvent::ConferenceJoined => {
                let joined_at = now_millis();
                self.store
                    .update(|s| s.conference_timestamp = Some(joined_at));
                self.publish(PublishReason::ConferenceJoined);
                true
            }
            HostEvent::Shutdown => false,
        }
    }

    /// Run the event loop until shutdown or until the transport closes.
    pub async fn run(mut self) {
        // The store may have moved on since `new()`; the startup snapshot
        // must not pair a new URL with the old session.
        self.sync_session();

        if self.transport.activation_state() == ActivationState::Activated {
            self.publish(PublishReason::Startup);
        }

        loop {
            tokio::select! {
                biased;

                Some(_) = self.active.changed() => {
                    self.on_active_resource_changed();
                }
                Some(_) = self.muted.changed() => {
                    self.publish(PublishReason::Muted);
                }
                Some(_) = self.recent.changed() => {
                    self.publish(PublishReason::RecentResources);
                }
                event = self.events.recv() => {
                    // The engine holds a sender itself, so `None` cannot happen.
                    let Some(event) = event else { break };
                    if !self.on_host_event(event) {
                        tracing::info!("Companion sync shutting down");
                        break;
                    }
                }
                event = self.transport.next_event() => match event {
                    Ok(event) => self.on_transport_event(event),
                    Err(TransportError::ChannelClosed) => {
                        tracing::info!("Companion transport closed, stopping companion sync");
                        break;
                    }
                    Err(e) => {
                        tracing::warn!("Companion transport error: {}", e);
                    }
                },
            }
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
