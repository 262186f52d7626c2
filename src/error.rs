//! Error types for the cachesim library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when a policy or simulator is configured with
//!   parameters that would make the adaptive arithmetic degenerate (e.g. zero
//!   capacity, which divides by zero in the ghost-ratio and filter formulas).
//! - [`InvariantError`]: Returned by `check_invariants` when a structural
//!   bound of the ARC lists is violated.
//! - [`TraceError`]: Trace file could not be read or contains a malformed line.
//! - [`SimError`]: Anything that aborts a simulator run.
//!
//! The replacement policies themselves never fail once constructed; a missing
//! eviction victim degrades to "no eviction" and the access still counts.
//!
//! ## Example Usage
//!
//! ```
//! use cachesim::error::ConfigError;
//! use cachesim::policy::arc::ArcCache;
//!
//! let cache: Result<ArcCache, ConfigError> = ArcCache::try_new(100);
//! assert!(cache.is_ok());
//!
//! let bad = ArcCache::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::path::PathBuf;

// ---------------------------------------------------------------------------
// InvariantError / ConfigError
// ---------------------------------------------------------------------------

/// A structural ARC bound that no longer holds, as reported by
/// [`ArcCore::check_invariants`](crate::policy::arc::ArcCore::check_invariants).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Rejected policy or simulator parameters.
///
/// # Example
///
/// ```
/// use cachesim::policy::marc::MarcCache;
///
/// let err = MarcCache::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }

    pub(crate) fn check_capacity(capacity: usize) -> Result<(), ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("cache capacity must be greater than zero"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TraceError / SimError
// ---------------------------------------------------------------------------

/// Failure while reading a trace.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// The trace file could not be opened or read.
    #[error("cannot read trace {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The underlying reader failed partway through.
    #[error("cannot read trace line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// A line is not `address,operation`.
    #[error("malformed trace line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Failure that aborts a simulator run.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Trace(#[from] TraceError),

    #[error("cannot write report: {0}")]
    Report(#[from] std::io::Error),

    #[error("cannot encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
