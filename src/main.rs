use clap::{Parser, Subcommand};
use rrgen::artifact::{generate_artifacts_observed, read_manifest, RecoveryOptions, DEFAULT_SLICE_COUNT};
use rrgen::checksum::RecordWidth;
use rrgen::generate::{expected_sizes, SectorEvent};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rrgen", about = "Sector-level recovery record generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the checksum stream and recovery slices for a file
    Generate {
        input: PathBuf,
        /// Checksum stream output (default: <input>.crcs)
        #[arg(short, long)]
        checksums: Option<PathBuf>,
        /// Recovery stream output (default: <input>.rr)
        #[arg(short, long)]
        recovery: Option<PathBuf>,
        /// Recovery slice count N
        #[arg(short = 'n', long, default_value_t = DEFAULT_SLICE_COUNT)]
        slices: usize,
        /// Declared input length; defaults to the file size on disk
        #[arg(short, long)]
        length: Option<u64>,
        /// Checksum record width: wide (4-byte LE) or narrow (2-byte LE)
        #[arg(short = 'w', long, default_value = "wide")]
        width: String,
        /// Also write a JSON manifest next to the outputs (<input>.rrmeta.json)
        #[arg(short, long)]
        manifest: bool,
        /// Print one line per sector while generating
        #[arg(short, long)]
        verbose: bool,
    },
    /// Show a previously written manifest
    Info {
        manifest: PathBuf,
    },
    /// Print the artifact sizes a configuration implies, without reading data
    Expect {
        length: u64,
        #[arg(short = 'n', long, default_value_t = DEFAULT_SLICE_COUNT)]
        slices: usize,
        #[arg(short = 'w', long, default_value = "wide")]
        width: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    match Cli::parse().command {

        // ── Generate ─────────────────────────────────────────────────────────
        Commands::Generate { input, checksums, recovery, slices, length, width, manifest, verbose } => {
            let checksums = checksums.unwrap_or_else(|| with_suffix(&input, "crcs"));
            let recovery  = recovery.unwrap_or_else(|| with_suffix(&input, "rr"));
            let manifest_path = if manifest {
                Some(with_suffix(&input, "rrmeta.json"))
            } else {
                None
            };

            let opts = RecoveryOptions {
                slice_count:  slices,
                declared_len: length,
                record_width: parse_width(&width),
            };

            let mut per_sector = |ev: &SectorEvent| {
                println!(
                    "  sector {:>8}  slice {}  crc32 {:08x}  record {:04x}",
                    ev.index, ev.slice, ev.crc32, ev.record
                );
            };
            let observer = if verbose { Some(&mut per_sector) } else { None };

            let m = generate_artifacts_observed(
                &input,
                &checksums,
                &recovery,
                manifest_path.as_deref(),
                &opts,
                observer,
            )?;

            println!("Input     {} ({} B, blake3 {}…)", input.display(), m.input_len, &m.input_blake3[..12]);
            println!("Checksums {} ({} records, {} B)", checksums.display(), m.sector_count, m.checksum_bytes);
            println!("Recovery  {} ({} slices, {} B)", recovery.display(), m.slice_count, m.recovery_bytes);
            if let Some(p) = manifest_path {
                println!("Manifest  {}", p.display());
            }
        }

        // ── Info ─────────────────────────────────────────────────────────────
        Commands::Info { manifest } => {
            let m = read_manifest(&manifest)?;
            println!("── Recovery artifact manifest ───────────────────────────");
            println!("  UUID            {}", m.artifact_uuid);
            println!("  Created (unix)  {}", m.created_at);
            println!("  Input length    {} B", m.input_len);
            println!("  Input BLAKE3    {}", m.input_blake3);
            println!("  Sector size     {} B", m.sector_size);
            println!("  Sectors         {}", m.sector_count);
            println!("  Slices          {}", m.slice_count);
            println!("  Record width    {} B", m.record_bytes);
            println!("  Checksum bytes  {}", m.checksum_bytes);
            println!("  Recovery bytes  {}", m.recovery_bytes);
        }

        // ── Expect ───────────────────────────────────────────────────────────
        Commands::Expect { length, slices, width } => {
            let w = parse_width(&width);
            let (crc_bytes, rr_bytes) = expected_sizes(length, slices, w);
            println!("{} B input, {} slice(s), {} record(s):", length, slices, length.div_ceil(512));
            println!("  checksum stream  {} B", crc_bytes);
            println!("  recovery stream  {} B", rr_bytes);
        }
    }

    Ok(())
}

// ── helpers ──────────────────────────────────────────────────────────────────

fn with_suffix(path: &PathBuf, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

fn parse_width(s: &str) -> RecordWidth {
    RecordWidth::from_name(s).unwrap_or_else(|| {
        eprintln!("Unknown record width '{}', defaulting to wide", s);
        RecordWidth::Wide
    })
}
