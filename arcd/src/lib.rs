//! Configuration resolver and credential verifier for the arcd daemon.
//! A configuration is built once at startup, validated, and then shared
//! read-only; credential checks only read the account fields of that snapshot.

pub mod config;
pub mod crypto;
pub mod paths;
