//! Trace input.
//!
//! A trace is a text file with one access per line:
//!
//! ```text
//!   # comment lines and blank lines are skipped
//!   1024,R
//!   1025,W
//!   77,Read
//! ```
//!
//! The address is an unsigned decimal block number; everything after the
//! first comma (trimmed) is the operation tag. Lines are numbered from 1 in
//! error messages.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::TraceError;
use crate::traits::{Access, Operation};

/// Parses one trace line.
///
/// Returns `Ok(None)` for blank and `#` comment lines.
///
/// # Errors
///
/// [`TraceError::Malformed`] when the line has no comma, a non-integer
/// address or an empty operation.
///
/// # Example
///
/// ```
/// use cachesim::trace::parse_line;
/// use cachesim::traits::{Access, Operation};
///
/// assert_eq!(parse_line("42,W", 1).unwrap(), Some(Access::new(42, Operation::Write)));
/// assert_eq!(parse_line("   ", 2).unwrap(), None);
/// assert!(parse_line("x,R", 3).is_err());
/// ```
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Access>, TraceError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let malformed = |reason: String| TraceError::Malformed {
        line: line_no,
        reason,
    };

    let (address, operation) = trimmed
        .split_once(',')
        .ok_or_else(|| malformed("expected `address,operation`".to_string()))?;

    let address = address.trim();
    let address: u64 = address
        .parse()
        .map_err(|_| malformed(format!("address {address:?} is not an unsigned integer")))?;

    let operation = operation.trim();
    if operation.is_empty() {
        return Err(malformed("missing operation".to_string()));
    }

    Ok(Some(Access::new(address, Operation::parse(operation))))
}

/// Reads every access from `reader`, in order.
///
/// # Errors
///
/// Stops at the first unreadable or malformed line.
pub fn read_trace<R: BufRead>(reader: R) -> Result<Vec<Access>, TraceError> {
    let mut accesses = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|source| TraceError::Read {
            line: line_no,
            source,
        })?;
        if let Some(access) = parse_line(&line, line_no)? {
            accesses.push(access);
        }
    }
    Ok(accesses)
}

/// Opens and reads a trace file.
///
/// # Errors
///
/// [`TraceError::Io`] if the file cannot be opened, otherwise as
/// [`read_trace`].
pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<Access>, TraceError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TraceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let accesses = read_trace(BufReader::new(file))?;
    tracing::debug!(path = %path.display(), accesses = accesses.len(), "trace loaded");
    Ok(accesses)
}
