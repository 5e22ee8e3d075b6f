//! Administrative login check against a loaded configuration snapshot.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::Configuration;
use crate::crypto::passwords::verify_password;

/// Returns `true` only when `username` equals the configured account name and
/// `password` verifies against the configured hash. Every failure collapses
/// to `false` without saying which check failed.
pub fn authenticate(config: &Configuration, username: &str, password: &str) -> bool {
    let accepted = config.username == username && verify_password(password, &config.password);
    if !accepted {
        debug!("authentication rejected");
    }
    accepted
}

/// Runs [`authenticate`] on tokio's blocking pool. Verification costs tens to
/// hundreds of milliseconds of CPU and must not run on a reactor thread.
pub async fn authenticate_offloaded(config: Arc<Configuration>, username: String, password: String) -> bool {
    tokio::task::spawn_blocking(move || authenticate(&config, &username, &password))
        .await
        .unwrap_or_else(|err| {
            warn!(error = %err, "credential verification task failed");
            false
        })
}

impl Configuration {
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        authenticate(self, username, password)
    }
}
