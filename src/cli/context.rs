use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::core::errors::{Result, StratusError};

static WORKSPACE_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Initialize the global workspace directory path.
/// If `custom` is provided, uses that path; otherwise defaults to `.`.
pub fn init(custom: Option<&str>) {
    let dir = custom.map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    let _ = WORKSPACE_DIR.set(dir);
}

/// Get the current workspace directory path.
pub fn workspace_dir() -> &'static Path {
    WORKSPACE_DIR
        .get()
        .map(|p| p.as_path())
        .unwrap_or(Path::new("."))
}

/// The `.stratus` directory inside the workspace, holding the
/// directory file, local state and history.
pub fn stratus_dir() -> PathBuf {
    workspace_dir().join(".stratus")
}

/// Validate a project/application/environment/database name: lowercase
/// alphanumerics and hyphens, starting with a letter, at most 63 chars.
pub fn validate_name(value: &str, field: &str) -> Result<()> {
    let valid = !value.is_empty()
        && value.len() <= 63
        && value.chars().next().is_some_and(|c| c.is_ascii_lowercase())
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StratusError::Validation {
            field: field.to_string(),
            detail: format!(
                "'{value}' must start with a letter and contain only \
                 lowercase letters, digits and hyphens (max 63 chars)"
            ),
        })
    }
}

/// Validate an environment-variable-style secret name, e.g. `MY_SECRET`.
pub fn validate_secret_name(value: &str) -> Result<()> {
    let valid = !value.is_empty()
        && value
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StratusError::Validation {
            field: "secret name".to_string(),
            detail: format!(
                "'{value}' must look like an environment variable name \
                 (letters, digits and underscores, not starting with a digit)"
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names_pass() {
        for name in ["frontend", "dw-run", "a", "app-2"] {
            assert!(validate_name(name, "name").is_ok(), "{name}");
        }
    }

    #[test]
    fn invalid_names_fail() {
        for name in ["", "Frontend", "2app", "-app", "has space", "under_score"] {
            assert!(validate_name(name, "name").is_err(), "{name}");
        }
    }

    #[test]
    fn valid_secret_names_pass() {
        for name in ["MY_SECRET", "_private", "Db2Password"] {
            assert!(validate_secret_name(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn invalid_secret_names_fail() {
        for name in ["", "2FAST", "MY-SECRET", "has space"] {
            assert!(validate_secret_name(name).is_err(), "{name}");
        }
    }
}
