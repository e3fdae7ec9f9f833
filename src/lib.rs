pub mod error;
pub mod sector;
pub mod checksum;
pub mod parity;
pub mod generate;
pub mod manifest;
pub mod artifact;

pub use error::RecoveryError;
pub use sector::{Sector, SectorReader, SECTOR_SIZE};
pub use checksum::{sector_crc32, truncate_crc, RecordWidth};
pub use parity::SliceSet;
pub use generate::{generate, expected_sizes, GenerateReport, SectorEvent};
pub use manifest::ArtifactManifest;
pub use artifact::{generate_artifacts, read_manifest, RecoveryOptions};
