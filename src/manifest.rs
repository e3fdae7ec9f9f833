use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::generate::GenerateReport;

pub const MANIFEST_VERSION: u32 = 1;

/// JSON sidecar describing one finished generation run.
///
/// Stored next to the two artifact streams so a later consumer can tell
/// which input they belong to and how to interpret the checksum records.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ArtifactManifest {
    pub version:        u32,
    pub artifact_uuid:  Uuid,
    /// Unix timestamp of the run.
    pub created_at:     i64,
    pub input_len:      u64,
    /// Hex BLAKE3 of the raw input bytes (padding excluded).
    pub input_blake3:   String,
    pub sector_size:    u32,
    pub sector_count:   u64,
    pub slice_count:    u32,
    /// Bytes per checksum record ("wide" = 4, "narrow" = 2).
    pub record_bytes:   u8,
    pub checksum_bytes: u64,
    pub recovery_bytes: u64,
}

impl ArtifactManifest {
    pub fn from_report(report: &GenerateReport) -> Self {
        Self {
            version:        MANIFEST_VERSION,
            artifact_uuid:  Uuid::new_v4(),
            created_at:     Utc::now().timestamp(),
            input_len:      report.bytes_consumed,
            input_blake3:   hex::encode(report.input_digest),
            sector_size:    crate::sector::SECTOR_SIZE as u32,
            sector_count:   report.sectors,
            slice_count:    report.slice_count as u32,
            record_bytes:   report.record_width.byte_len() as u8,
            checksum_bytes: report.checksum_bytes,
            recovery_bytes: report.recovery_bytes,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
