//! Error types for admission components.

use thiserror::Error;

/// Errors produced when constructing admission components.
///
/// This is the only recoverable error class in the core: every runtime
/// operation (acquire, release, admit) is total over valid state. A slot
/// table that desynchronizes from the permit count is a broken invariant and
/// panics instead of surfacing here.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Configuration failed validation at construction time.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
