//! # companion-client
//!
//! Host-side engine for the companion-device sync protocol.
//!
//! This is the library a host application embeds to keep a paired companion
//! device (for example a watch) in step with its call state.
//!
//! ## Features
//!
//! - **Snapshot Publishing**: Whole-state application context pushed whenever
//!   a watched slice of host state changes, or when the companion (re)activates
//! - **Session-Scoped Commands**: Commands from the companion are accepted only
//!   for the current session; everything else is dropped with a warning
//! - **Transport Abstraction**: Pluggable transport layer (in-process channel, mock)
//! - **Pure Core**: Uses companion-core for side-effect-free decisions
//!
//! ## Example
//!
//! ```ignore
//! use companion_client::{CompanionConfig, CompanionSync, Store, ChannelTransport};
//!
//! let store = Store::new(SyncState::default());
//! let (transport, endpoint) = ChannelTransport::pair();
//! let sync = CompanionSync::attach(CompanionConfig::default(), store.clone(), Some(transport), host)
//!     .expect("companion capability present");
//! let handle = sync.handle();
//! tokio::spawn(sync.run());
//!
//! // Host lifecycle
//! handle.conference_joined();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod companion;
pub mod config;
pub mod dispatcher;
pub mod host;
pub mod publisher;
pub mod store;
pub mod transport;

pub use companion::{CompanionHandle, CompanionSync};
pub use config::{CompanionConfig, ConfigError, DispatcherConfig, PublisherConfig};
pub use dispatcher::CommandDispatcher;
pub use host::{HostActions, HostEvent};
pub use publisher::{PublishOutcome, PublishReason, SnapshotPublisher};
pub use store::{SliceWatch, Store};
pub use transport::{
    ActivationState, ChannelTransport, CompanionEndpoint, MockTransport, Transport,
    TransportError, TransportEvent,
};

#[cfg(test)]
mod testing;
