//! # companion-core
//!
//! Pure logic for companion-device sync (no I/O, instant tests).
//!
//! This crate implements the session rules, snapshot derivation and command
//! evaluation without touching a transport or a host store.
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce output
//! without side effects. This enables:
//! - Instant unit tests (no mocks, no async)
//! - Deterministic behavior (same input → same output)
//! - Easy reasoning about which commands are accepted
//!
//! The actual I/O (publishing contexts, invoking host actions) is performed by
//! `companion-client`, which interprets the decisions produced here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod command;
pub mod session;
pub mod snapshot;
pub mod state;

pub use command::{evaluate, Decision, HostAction, NoOpReason, Rejection};
pub use session::SessionManager;
pub use snapshot::{
    build_snapshot, canonical_conference_url, project_recent, DEFAULT_MAX_RECENT_URLS,
};
pub use state::{ActiveResource, SyncState};
