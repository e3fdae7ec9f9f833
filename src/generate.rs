//! Generation engine — checksum stream + recovery slices in one pass.
//!
//! # Pipeline
//!
//! For each sector produced by [`SectorReader`], strictly in input order:
//!
//! 1. Compute the sector CRC-32 and truncate it to its low 16 bits.
//! 2. Append the record to the checksum sink ([`RecordWidth`] decides the
//!    stored width; always little-endian).
//! 3. XOR the sector into the recovery slice at the current rotation index
//!    and advance the rotation.
//!
//! When the declared length is exhausted, all N slices are flushed to the
//! recovery sink, in slice order, 512 bytes each.
//!
//! The steps are sequential by design: the rotation index and the slice
//! buffers form shared mutable state whose fold order determines which slice
//! can later reconstruct which sectors.  Any future parallel reader must
//! still serialize the folds in original sector order.
//!
//! # Observer
//!
//! `generate()` accepts an optional per-sector callback receiving a
//! [`SectorEvent`].  Pass `None` to disable.  This replaces any diagnostic
//! printing inside the engine — the engine itself never writes to stdout.
//!
//! # Failure
//!
//! Errors abort the run immediately.  Whatever was written to the sinks
//! before the error is incomplete and unusable; there is no rollback.

use std::io::{Read, Write};

use crate::checksum::{sector_crc32, truncate_crc, RecordWidth};
use crate::error::RecoveryError;
use crate::parity::SliceSet;
use crate::sector::{SectorReader, SECTOR_SIZE};

// ── Observer ──────────────────────────────────────────────────────────────────

/// Snapshot handed to the per-sector observer callback.
#[derive(Debug, Clone)]
pub struct SectorEvent {
    /// 0-based sector index.
    pub index:       u64,
    /// Recovery slice the sector was folded into (`index % slice_count`).
    pub slice:       usize,
    /// Full 32-bit checksum of the (padded) sector.
    pub crc32:       u32,
    /// Truncated record as written to the checksum stream.
    pub record:      u32,
    /// Real input bytes in the sector; `< SECTOR_SIZE` only for the tail.
    pub payload_len: usize,
}

// ── Report ────────────────────────────────────────────────────────────────────

/// Summary of a completed generation run.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    /// Sectors processed (`ceil(total_len / 512)`).
    pub sectors:        u64,
    /// Bytes consumed from the input (== declared total length).
    pub bytes_consumed: u64,
    /// Zero bytes appended to the final sector (0 when `total_len` is a
    /// multiple of 512).
    pub tail_padding:   usize,
    /// Slice count the run was configured with.
    pub slice_count:    usize,
    /// Record width used for the checksum stream.
    pub record_width:   RecordWidth,
    /// Bytes written to the checksum stream.
    pub checksum_bytes: u64,
    /// Bytes written to the recovery stream (`slice_count * 512`).
    pub recovery_bytes: u64,
    /// BLAKE3 digest of the raw input (padding excluded) — identifies which
    /// input the artifacts belong to.
    pub input_digest:   [u8; 32],
}

/// Sizes the two output streams will have for a given configuration, without
/// reading any data: `(checksum_bytes, recovery_bytes)`.
pub fn expected_sizes(total_len: u64, slice_count: usize, width: RecordWidth) -> (u64, u64) {
    let records = total_len.div_ceil(SECTOR_SIZE as u64);
    (
        records * width.byte_len() as u64,
        slice_count as u64 * SECTOR_SIZE as u64,
    )
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// Run one generation pass.
///
/// # Arguments
/// * `input`        — source stream; consumed, not restartable.
/// * `total_len`    — declared input length in bytes.  Authoritative: a
///                    stream shorter than this fails with `Truncated`.
/// * `slice_count`  — recovery slice count N, must be ≥ 1.
/// * `width`        — stored checksum record width.
/// * `checksums`    — sink for the checksum stream.
/// * `recovery`     — sink for the recovery stream.
/// * `observer`     — optional per-sector callback; pass `None` to disable.
pub fn generate<R, CW, PW, F>(
    input:        &mut R,
    total_len:    u64,
    slice_count:  usize,
    width:        RecordWidth,
    checksums:    &mut CW,
    recovery:     &mut PW,
    mut observer: Option<&mut F>,
) -> Result<GenerateReport, RecoveryError>
where
    R:  Read,
    CW: Write,
    PW: Write,
    F:  FnMut(&SectorEvent),
{
    let mut slices = SliceSet::new(slice_count)?;
    let mut digest = blake3::Hasher::new();

    let mut sectors      = 0u64;
    let mut tail_padding = 0usize;

    for item in SectorReader::new(input, total_len) {
        let sector = item?;
        digest.update(&sector.bytes[..sector.payload_len]);

        let crc    = sector_crc32(&sector.bytes);
        let record = truncate_crc(crc);
        width.write_record(&mut *checksums, record)?;

        let slice = slices.fold(&sector.bytes);

        if let Some(cb) = observer.as_mut() {
            cb(&SectorEvent {
                index: sector.index,
                slice,
                crc32: crc,
                record,
                payload_len: sector.payload_len,
            });
        }

        sectors      += 1;
        tail_padding  = sector.padding();
    }

    slices.write_to(&mut *recovery)?;

    let (checksum_bytes, recovery_bytes) = expected_sizes(total_len, slice_count, width);
    Ok(GenerateReport {
        sectors,
        bytes_consumed: total_len,
        tail_padding,
        slice_count,
        record_width: width,
        checksum_bytes,
        recovery_bytes,
        input_digest: digest.finalize().into(),
    })
}
