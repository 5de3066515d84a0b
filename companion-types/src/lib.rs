//! # companion-types
//!
//! Wire format types for the companion-device sync protocol.
//!
//! This crate provides the foundational types shared by the other crates:
//! - [`SessionId`] - Scope identifier that decides whether a command is current
//! - [`Snapshot`] / [`RecentEntry`] - Outbound application context
//! - [`InboundMessage`] / [`Command`] - Commands sent back by the companion device
//! - [`WireError`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

mod context;
mod error;
mod ids;
mod messages;

pub use context::{RecentEntry, Snapshot};
pub use error::WireError;
pub use ids::SessionId;
pub use messages::{Command, InboundMessage, HANG_UP, JOIN_CONFERENCE, SET_MUTED};
