//! Shared test utilities.

use tempfile::TempDir;

pub mod runtime;

/// Creates a temporary directory for database tests.
///
/// # Panics
///
/// Panics if the temporary directory cannot be created.
pub fn create_temp_dir() -> TempDir {
    TempDir::new().unwrap_or_else(|error| panic!("failed to create temporary directory: {error}"))
}

/// Strips the quotes feature files put around string arguments.
pub fn unquote(value: &str) -> &str {
    value.trim_matches('"')
}

/// Splits `org/repo` into its parts.
///
/// # Panics
///
/// Panics when `value` has no `/`.
pub fn split_repository(value: &str) -> (String, String) {
    let (organization, repository) = unquote(value)
        .split_once('/')
        .unwrap_or_else(|| panic!("expected org/repo, got {value}"));
    (organization.to_owned(), repository.to_owned())
}
