//! Startup configuration.
//!
//! ```text
//! Configuration::default()      compiled-in baseline
//!     -> loader::overlay        operator JSON laid over the baseline
//!     -> loader::validate       fields with no safe default
//!     -> paths::expand_path     backups.folder made absolute
//!     -> Configuration          immutable for the rest of the process
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_with_fingerprint, ConfigError, ValidationError};
pub use schema::{Backups, Configuration, KeyPair, Pgp, Reports, Scheduler, Smtp};
