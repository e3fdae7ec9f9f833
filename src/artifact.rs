//! High-level path-based API — the primary embedding surface.
//!
//! ```no_run
//! use rrgen::artifact::{generate_artifacts, RecoveryOptions};
//!
//! let manifest = generate_artifacts(
//!     "payload.bin".as_ref(),
//!     "payload.crcs".as_ref(),
//!     "payload.rr".as_ref(),
//!     None,
//!     &RecoveryOptions::default(),
//! )?;
//! assert_eq!(manifest.recovery_bytes, 2 * 512);
//! # Ok::<(), rrgen::RecoveryError>(())
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::checksum::RecordWidth;
use crate::error::RecoveryError;
use crate::generate::{generate, SectorEvent};
use crate::manifest::ArtifactManifest;

/// Default recovery slice count.
pub const DEFAULT_SLICE_COUNT: usize = 2;

// ── RecoveryOptions ───────────────────────────────────────────────────────────

/// Configuration for [`generate_artifacts`].
#[derive(Debug, Clone)]
pub struct RecoveryOptions {
    /// Recovery slice count N (≥ 1).
    pub slice_count:  usize,
    /// Declared input length.  `None` takes the input file's on-disk size;
    /// `Some(L)` is authoritative even when the file is larger or smaller
    /// (smaller fails the run with `Truncated`).
    pub declared_len: Option<u64>,
    /// Stored checksum record width.
    pub record_width: RecordWidth,
}

impl Default for RecoveryOptions {
    fn default() -> Self {
        Self {
            slice_count:  DEFAULT_SLICE_COUNT,
            declared_len: None,
            record_width: RecordWidth::default(),
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn open_input(path: &Path) -> Result<File, RecoveryError> {
    File::open(path).map_err(|source| RecoveryError::ResourceUnavailable {
        path: path.to_owned(),
        source,
    })
}

fn create_output(path: &Path) -> Result<File, RecoveryError> {
    File::create(path).map_err(|source| RecoveryError::ResourceUnavailable {
        path: path.to_owned(),
        source,
    })
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Generate both artifact streams (and optionally a manifest) for `input`.
///
/// Opens and creates all files before any sector is processed, so resource
/// failures surface up front.  On error the partially written outputs are
/// invalid; they are not removed.
pub fn generate_artifacts(
    input:        &Path,
    checksum_out: &Path,
    recovery_out: &Path,
    manifest_out: Option<&Path>,
    opts:         &RecoveryOptions,
) -> Result<ArtifactManifest, RecoveryError> {
    generate_artifacts_observed::<fn(&SectorEvent)>(
        input,
        checksum_out,
        recovery_out,
        manifest_out,
        opts,
        None,
    )
}

/// Same as [`generate_artifacts`] with a per-sector observer callback.
pub fn generate_artifacts_observed<F>(
    input:        &Path,
    checksum_out: &Path,
    recovery_out: &Path,
    manifest_out: Option<&Path>,
    opts:         &RecoveryOptions,
    observer:     Option<&mut F>,
) -> Result<ArtifactManifest, RecoveryError>
where
    F: FnMut(&SectorEvent),
{
    let source = open_input(input)?;
    let total_len = match opts.declared_len {
        Some(len) => len,
        None      => source.metadata()?.len(),
    };

    let mut reader    = BufReader::new(source);
    let mut checksums = BufWriter::new(create_output(checksum_out)?);
    let mut recovery  = BufWriter::new(create_output(recovery_out)?);

    let report = generate(
        &mut reader,
        total_len,
        opts.slice_count,
        opts.record_width,
        &mut checksums,
        &mut recovery,
        observer,
    )?;
    checksums.flush()?;
    recovery.flush()?;

    let manifest = ArtifactManifest::from_report(&report);
    if let Some(path) = manifest_out {
        let bytes = manifest.to_bytes()?;
        create_output(path)?.write_all(&bytes)?;
    }
    Ok(manifest)
}

/// Load a previously written manifest.
pub fn read_manifest(path: &Path) -> Result<ArtifactManifest, RecoveryError> {
    let bytes = std::fs::read(path).map_err(|source| RecoveryError::ResourceUnavailable {
        path: path.to_owned(),
        source,
    })?;
    Ok(ArtifactManifest::from_bytes(&bytes)?)
}
