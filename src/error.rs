use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure taxonomy for a generation run.
///
/// There is no partial-success mode: once any variant surfaces, the output
/// streams written so far are invalid and must be discarded by the caller.
#[derive(Error, Debug)]
pub enum RecoveryError {
    /// A required input or output file could not be opened/created.
    /// Raised before any sector is processed.
    #[error("cannot open or create {path}: {source}")]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The input stream yielded fewer bytes than the declared total length
    /// implies it should. The run aborts at the offending sector.
    #[error("input truncated at byte {position}: expected {expected} more bytes, got {got}")]
    Truncated {
        position: u64,
        expected: usize,
        got: usize,
    },
    /// Recovery slice buffers could not be allocated. Raised before any
    /// reading occurs.
    #[error("cannot allocate {slices} recovery slice buffers")]
    Allocation { slices: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
