//! Credential handling: password hashing, login verification and document
//! fingerprints. Each submodule covers one concern.

pub mod credentials;
pub mod integrity;
pub mod passwords;
