use std::io::{self, Write};

use crate::error::RecoveryError;
use crate::sector::SECTOR_SIZE;

/// The ring of recovery slices plus the rotation cursor.
///
/// Slice `i` holds the running XOR of every sector whose rotation index was
/// `i` when it was folded: sector `k` lands in slice `k mod N`.  The set is
/// owned for the whole run, mutated in place, and drained once at the end.
pub struct SliceSet {
    slices: Vec<[u8; SECTOR_SIZE]>,
    cursor: usize,
}

impl SliceSet {
    /// Allocate `slice_count` zeroed slices.  `slice_count` must be ≥ 1.
    pub fn new(slice_count: usize) -> Result<Self, RecoveryError> {
        if slice_count == 0 {
            return Err(RecoveryError::InvalidConfig(
                "slice count must be at least 1".to_string(),
            ));
        }
        let mut slices = Vec::new();
        slices
            .try_reserve_exact(slice_count)
            .map_err(|_| RecoveryError::Allocation { slices: slice_count })?;
        for _ in 0..slice_count {
            slices.push([0u8; SECTOR_SIZE]);
        }
        Ok(Self { slices, cursor: 0 })
    }

    pub fn slice_count(&self) -> usize {
        self.slices.len()
    }

    /// Rotation index the next fold will target.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn slice(&self, i: usize) -> &[u8; SECTOR_SIZE] {
        &self.slices[i]
    }

    /// XOR `sector` into the current slice, then advance the cursor with
    /// wraparound.  Returns the index of the slice that absorbed the sector.
    pub fn fold(&mut self, sector: &[u8; SECTOR_SIZE]) -> usize {
        let idx = self.cursor;
        let slice = &mut self.slices[idx];
        for (acc, byte) in slice.iter_mut().zip(sector.iter()) {
            *acc ^= *byte;
        }
        self.cursor = (self.cursor + 1) % self.slices.len();
        idx
    }

    /// Write all slices, in slice order, to `writer`: exactly
    /// `slice_count * 512` bytes.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for slice in &self.slices {
            writer.write_all(slice)?;
        }
        Ok(())
    }
}
