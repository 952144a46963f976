//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (HTTP, database, filesystem).
//!
//! # Structure
//!
//! - `update` - Update records published by the registry and release channels
//! - `client` - Locally persisted client identity and installed version
//! - `activity` - Append-only audit entries

mod activity;
mod client;
mod update;

pub use activity::{ActivityKind, ActivityLogEntry};
pub use client::{ClientId, ClientState};
pub use update::{UpdateChannel, UpdateRecord};
