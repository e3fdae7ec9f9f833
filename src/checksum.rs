//! Per-sector checksum primitive and the on-disk record policy.
//!
//! The checksum is the standard CRC-32 idiom: accumulator preconditioned to
//! all-ones, folded with the standard polynomial, bitwise-complemented at the
//! end.  `crc32fast::Hasher` implements exactly this contract; it must be
//! preserved bit-for-bit for compatibility with consumers of the truncated
//! checksum stream.

use byteorder::{LittleEndian, WriteBytesExt};
use crc32fast::Hasher;
use std::io::{self, Write};

use crate::sector::SECTOR_SIZE;

/// Mask applied to the CRC-32 to form the stored checksum record.
pub const RECORD_MASK: u32 = 0xFFFF;

/// CRC-32 of one fully populated sector.
pub fn sector_crc32(sector: &[u8; SECTOR_SIZE]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(sector);
    hasher.finalize()
}

/// Low 16 bits of the CRC — the value that goes into the checksum stream.
#[inline]
pub fn truncate_crc(crc: u32) -> u32 {
    crc & RECORD_MASK
}

/// On-disk width of one checksum record.
///
/// The masked value fits in 16 bits, but the stored width must match what the
/// consuming format expects.  `Wide` stores the full machine word the
/// truncation produced (4 bytes LE); `Narrow` stores the 16-bit value itself
/// (2 bytes LE), which is what the RAR recovery-record layout uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordWidth {
    #[default]
    Wide,
    Narrow,
}

impl RecordWidth {
    /// Bytes one record occupies in the checksum stream.
    pub fn byte_len(self) -> usize {
        match self {
            RecordWidth::Wide   => 4,
            RecordWidth::Narrow => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RecordWidth::Wide   => "wide",
            RecordWidth::Narrow => "narrow",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "wide"   | "4" => Some(RecordWidth::Wide),
            "narrow" | "2" => Some(RecordWidth::Narrow),
            _              => None,
        }
    }

    /// Append one truncated checksum record to `writer`, little-endian.
    pub fn write_record<W: Write>(self, mut writer: W, record: u32) -> io::Result<()> {
        match self {
            RecordWidth::Wide   => writer.write_u32::<LittleEndian>(record),
            RecordWidth::Narrow => writer.write_u16::<LittleEndian>(record as u16),
        }
    }
}
