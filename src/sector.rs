//! Sector reader — fixed-size chunking of a bounded-length input stream.
//!
//! The reader is driven by a *declared* total length, never by end-of-stream:
//! the number of sectors is `ceil(total_len / 512)` regardless of what the
//! underlying stream does.  A stream that runs dry before the declared length
//! is satisfied is an error ([`RecoveryError::Truncated`]), not an early stop.
//!
//! The final sector is zero-padded from the count of bytes actually read up
//! to the 512-byte boundary, so every sector handed out is fully populated.

use std::io::Read;

use crate::error::RecoveryError;

/// Fixed sector size.  Every unit of work is exactly this many bytes.
pub const SECTOR_SIZE: usize = 512;

/// One fully populated sector.
#[derive(Debug, Clone)]
pub struct Sector {
    /// Sector payload; bytes past `payload_len` are zero padding.
    pub bytes: [u8; SECTOR_SIZE],
    /// 0-based position of this sector in the input.
    pub index: u64,
    /// Count of real input bytes in `bytes` (== `SECTOR_SIZE` except for a
    /// terminal partial sector).
    pub payload_len: usize,
}

impl Sector {
    /// Zero bytes appended to reach the sector boundary.
    pub fn padding(&self) -> usize {
        SECTOR_SIZE - self.payload_len
    }
}

/// Lazy, finite, non-restartable producer of [`Sector`]s over any [`Read`].
///
/// Yields exactly `ceil(total_len / 512)` sectors, then `None`.  After the
/// first error the iterator is fused and yields `None` forever.
pub struct SectorReader<R: Read> {
    inner:      R,
    total_len:  u64,
    pos:        u64,
    next_index: u64,
    failed:     bool,
}

impl<R: Read> SectorReader<R> {
    pub fn new(inner: R, total_len: u64) -> Self {
        Self {
            inner,
            total_len,
            pos:        0,
            next_index: 0,
            failed:     false,
        }
    }

    /// Bytes consumed from the input so far.
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Sectors this reader will yield in total.
    pub fn sector_count(&self) -> u64 {
        self.total_len.div_ceil(SECTOR_SIZE as u64)
    }

    fn read_sector(&mut self) -> Result<Sector, RecoveryError> {
        let remaining = self.total_len - self.pos;
        let want      = remaining.min(SECTOR_SIZE as u64) as usize;

        // Buffer starts zeroed, so the tail of a partial sector is already
        // padded once the first `want` bytes are filled in.
        let mut bytes = [0u8; SECTOR_SIZE];
        let mut filled = 0usize;
        while filled < want {
            let n = self.inner.read(&mut bytes[filled..want])?;
            if n == 0 {
                return Err(RecoveryError::Truncated {
                    position: self.pos + filled as u64,
                    expected: want - filled,
                    got:      filled,
                });
            }
            filled += n;
        }

        let sector = Sector {
            bytes,
            index: self.next_index,
            payload_len: want,
        };
        self.pos        += want as u64;
        self.next_index += 1;
        Ok(sector)
    }
}

impl<R: Read> Iterator for SectorReader<R> {
    type Item = Result<Sector, RecoveryError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.total_len {
            return None;
        }
        let item = self.read_sector();
        if item.is_err() {
            self.failed = true;
        }
        Some(item)
    }
}
