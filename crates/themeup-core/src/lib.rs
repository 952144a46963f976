//! Core of the themeup theme update agent.
//!
//! Domain types, the version comparator, port traits and the services that
//! run the update flow: poll the registry, surface a notification, resolve
//! it automatically, manually or by marking it applied. Adapters live in
//! `themeup-db`, `themeup-remote` and `themeup-cli`.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod events;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;
pub mod version;

// Re-export commonly used types for convenience
pub use domain::{
    ActivityKind, ActivityLogEntry, ClientId, ClientState, UpdateChannel, UpdateRecord,
};
pub use events::{MANUAL_INSTALL_STEPS, UpdateEvent};
pub use ports::{
    ActivityLogPort, ApplyEndpointPort, ApplyError, ApplyOutcome, ApplyRequest,
    ClientStateRepository, CompositeActivityLog, CoreError, NotificationSinkPort, RegistryError,
    RepositoryError, UnconfiguredRegistry, UpdateRegistryPort, UpdaterPorts,
};
pub use services::{
    AppliedUpdate, ClientStateService, ManualInstructions, NotificationBoard, PollOutcome,
    PollTrigger, UpdatePoller, UpdateResolver, UpdaterCore,
};
pub use settings::{SettingsError, UpdaterSettings, validate_settings};

// Re-export path utilities
pub use paths::{
    PathError, ResolvedPaths, data_root, database_path, env_file_path, persist_env_value,
};
