//! Typed domain error enums.
//!
//! Fetch failures are recovered at the generate command and never abort the
//! run; only a failed write of the destination file is fatal, and that path
//! uses `anyhow` context instead of a dedicated type.

use thiserror::Error;

/// Failure modes of the Terraform state query.
///
/// Every variant degrades to the empty output mapping at the call site,
/// identical to "infrastructure not yet provisioned".
#[derive(Debug, Error)]
pub enum FetchError {
    /// The terraform binary could not be spawned at all.
    #[error("cannot invoke '{program}': {message}")]
    Invocation { program: String, message: String },

    /// The query ran but exited non-zero (no state, not initialized, ...).
    #[error("terraform output failed: {stderr}")]
    CommandFailed { stderr: String },

    /// Stdout was not a JSON document of the expected shape.
    #[error("unparseable terraform output: {0}")]
    Parse(#[from] serde_json::Error),

    /// The bounded wait expired before the query completed.
    #[error("terraform output timed out after {secs}s")]
    TimedOut { secs: u64 },
}
