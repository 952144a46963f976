//! HTTP adapters for themeup.
//!
//! - [`RestUpdateRegistry`]: reads the latest active update from a
//!   PostgREST-style registry table
//! - [`RestActivityLog`]: appends activity rows to the remote activity table
//! - [`RemoteApplyClient`]: asks the apply endpoint on the host to install a
//!   package
//!
//! All three implement ports from `themeup-core`; reqwest types never cross
//! that boundary.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod activity;
mod apply;
mod config;
mod endpoints;
mod error;
mod http;
mod registry;
mod wire;

// ============================================================================
// Public API
// ============================================================================

pub use activity::{DefaultActivityLog, RestActivityLog};
pub use apply::{DefaultApplyClient, RemoteApplyClient};
pub use config::RemoteClientConfig;
pub use error::{RemoteError, RemoteResult};
pub use registry::{DefaultUpdateRegistry, RestUpdateRegistry};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
