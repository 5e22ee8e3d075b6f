//! Filesystem path normalization for configuration values.
//!
//! Paths in the configuration may start with `~` for the invoking user's home
//! directory or be relative to the working directory. They are resolved to an
//! absolute, lexically clean form without touching the filesystem, so the
//! target does not have to exist yet.

use std::env;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PathError {
    #[error("cannot expand '{0}': home directory is not available")]
    HomeUnavailable(String),
    #[error("path contains characters invalid for this filesystem: {0:?}")]
    InvalidCharacters(String),
    #[error("current working directory unavailable: {0}")]
    CurrentDir(#[source] std::io::Error),
}

/// Expands `raw` to an absolute path using the process environment. An empty
/// input means "unset" and yields an empty string.
pub fn expand_path(raw: &str) -> Result<String, PathError> {
    if raw.is_empty() {
        return Ok(String::new());
    }
    let cwd = env::current_dir().map_err(PathError::CurrentDir)?;
    expand_path_with(raw, dirs::home_dir().as_deref(), &cwd)
}

/// Same as [`expand_path`] with the home and working directories supplied by
/// the caller.
pub fn expand_path_with(raw: &str, home: Option<&Path>, cwd: &Path) -> Result<String, PathError> {
    if raw.is_empty() {
        return Ok(String::new());
    }
    if raw.contains('\0') {
        return Err(PathError::InvalidCharacters(raw.to_string()));
    }

    let expanded = match home_relative(raw) {
        Some(rest) => {
            let home = home.ok_or_else(|| PathError::HomeUnavailable(raw.to_string()))?;
            home.join(rest)
        }
        None => PathBuf::from(raw),
    };

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        cwd.join(expanded)
    };

    let cleaned = clean(&absolute);
    let out = cleaned
        .into_os_string()
        .into_string()
        .map_err(|os| PathError::InvalidCharacters(os.to_string_lossy().into_owned()))?;
    debug!(input = raw, path = %out, "expanded path");
    Ok(out)
}

/// Returns the remainder after a leading `~` or `~/`. `~user` forms are not
/// shorthand and are left alone.
fn home_relative(raw: &str) -> Option<&str> {
    if raw == "~" {
        return Some("");
    }
    raw.strip_prefix("~/").map(|rest| rest.trim_start_matches('/'))
}

/// Lexical cleanup: drops `.` segments, resolves `..` against the preceding
/// segment and never climbs above the root.
fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(segment) => out.push(segment),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> PathBuf {
        PathBuf::from("/home/operator")
    }

    fn cwd() -> PathBuf {
        PathBuf::from("/srv/arcd")
    }

    #[test]
    fn empty_input_stays_unset() {
        assert_eq!(expand_path_with("", None, &cwd()).unwrap(), "");
        assert_eq!(expand_path("").unwrap(), "");
    }

    #[test]
    fn expands_home_shorthand() {
        let out = expand_path_with("~/backups", Some(&home()), &cwd()).unwrap();
        assert_eq!(out, "/home/operator/backups");

        let bare = expand_path_with("~", Some(&home()), &cwd()).unwrap();
        assert_eq!(bare, "/home/operator");
    }

    #[test]
    fn resolves_relative_against_working_dir() {
        let out = expand_path_with("data/./backups/../dumps", Some(&home()), &cwd()).unwrap();
        assert_eq!(out, "/srv/arcd/data/dumps");
    }

    #[test]
    fn tilde_user_form_is_not_shorthand() {
        let out = expand_path_with("~other/x", Some(&home()), &cwd()).unwrap();
        assert_eq!(out, "/srv/arcd/~other/x");
    }

    #[test]
    fn absolute_path_is_unchanged() {
        let out = expand_path_with("/var/lib/arc/backups", None, &cwd()).unwrap();
        assert_eq!(out, "/var/lib/arc/backups");
    }

    #[test]
    fn normalizing_twice_equals_once() {
        let once = expand_path_with("~/a/../b/./c", Some(&home()), &cwd()).unwrap();
        let twice = expand_path_with(&once, Some(&home()), &cwd()).unwrap();
        assert_eq!(once, "/home/operator/b/c");
        assert_eq!(once, twice);
    }

    #[test]
    fn parent_segments_stop_at_root() {
        let out = expand_path_with("/../../etc", None, &cwd()).unwrap();
        assert_eq!(out, "/etc");
    }

    #[test]
    fn missing_home_is_an_error() {
        let err = expand_path_with("~/backups", None, &cwd()).unwrap_err();
        assert!(matches!(err, PathError::HomeUnavailable(_)));
    }

    #[test]
    fn nul_byte_is_rejected() {
        let err = expand_path_with("/tmp/bad\0name", Some(&home()), &cwd()).unwrap_err();
        assert!(matches!(err, PathError::InvalidCharacters(_)));
    }

    #[test]
    fn process_environment_yields_absolute_paths() {
        let out = expand_path("relative/dir").unwrap();
        assert!(Path::new(&out).is_absolute());
        assert!(out.ends_with("relative/dir"));
    }
}
