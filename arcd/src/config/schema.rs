//! Typed configuration model and its compiled-in defaults.
//!
//! `Configuration::default()` is the baseline every loaded document is laid
//! over. Field names match the JSON keys operators write.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8443;
pub const DEFAULT_MAX_REQ_SIZE: u64 = 512 * 1024;
pub const DEFAULT_CERTIFICATE: &str = "arcd-tls-cert.pem";
pub const DEFAULT_KEY: &str = "arcd-tls-key.pem";
pub const DEFAULT_DATABASE: &str = "arc.db";
pub const DEFAULT_USERNAME: &str = "arc";
/// Argon2id hash of the default administrative password `arc`.
/// Operators are expected to replace it with `arcd-config hash-password`.
pub const DEFAULT_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=16384,t=3,p=1$dhkuK58PpshECeYn1aFNoQ$dVY864yujX5O3ZQVwdTwm+jGd8ouMWVdZSZTFyhm690";
pub const DEFAULT_TOKEN_DURATION: u64 = 60;
pub const DEFAULT_COMPRESSION: bool = true;
pub const DEFAULT_SCHEDULER_PERIOD: u64 = 15;
pub const DEFAULT_RATE_LIMIT: u32 = 60;

const REDACTED: &str = "<redacted>";

/// Root configuration snapshot. One instance per process, immutable once the
/// loader hands it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub address: String,
    pub port: u16,
    /// Maximum accepted request body, in bytes.
    pub max_req_size: u64,
    pub certificate: String,
    pub key: String,
    pub database: String,
    /// HMAC signing secret for session tokens. Has no default and must be
    /// supplied by the operator.
    pub secret: String,
    pub username: String,
    /// PHC-encoded password hash for `username`.
    pub password: String,
    /// Session token lifetime in minutes.
    pub token_duration: u64,
    pub compression: bool,
    pub check_expired: u64,
    pub scheduler: Scheduler,
    pub backups: Backups,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheduler {
    pub enabled: bool,
    /// Run period in minutes.
    pub period: u64,
    pub reports: Reports,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reports {
    pub enabled: bool,
    pub rate_limit: u32,
    pub filter: Vec<String>,
    pub to: String,
    pub pgp: Pgp,
    pub smtp: Smtp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pgp {
    pub enabled: bool,
    pub keys: KeyPair,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    pub public: String,
    pub private: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Smtp {
    pub address: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backups {
    pub enabled: bool,
    /// Run period in minutes; 0 leaves the cadence unset.
    pub period: u64,
    /// Destination folder. Normalized to an absolute path on load.
    pub folder: String,
    /// Command template executed by the backup runner.
    pub run: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            max_req_size: DEFAULT_MAX_REQ_SIZE,
            certificate: DEFAULT_CERTIFICATE.to_string(),
            key: DEFAULT_KEY.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            secret: String::new(),
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD_HASH.to_string(),
            token_duration: DEFAULT_TOKEN_DURATION,
            compression: DEFAULT_COMPRESSION,
            check_expired: 0,
            scheduler: Scheduler::default(),
            backups: Backups::default(),
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            enabled: true,
            period: DEFAULT_SCHEDULER_PERIOD,
            reports: Reports {
                rate_limit: DEFAULT_RATE_LIMIT,
                ..Reports::default()
            },
        }
    }
}

impl Configuration {
    /// Returns a copy safe to print: the signing secret, the password hash and
    /// the mail/PGP credentials are masked when set.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        mask(&mut copy.secret);
        mask(&mut copy.password);
        mask(&mut copy.scheduler.reports.smtp.password);
        mask(&mut copy.scheduler.reports.pgp.keys.private);
        copy
    }
}

fn mask(field: &mut String) {
    if !field.is_empty() {
        *field = REDACTED.to_string();
    }
}
