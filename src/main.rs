//! Texel CLI - inspect and validate DDS texture containers.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use texel_dds::{DdsFile, HEADER_SIZE};

/// Texel - DDS texture container inspection tool
#[derive(Parser)]
#[command(name = "texel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print header fields and the mip-level layout of a DDS file
    Info {
        /// Path to the DDS file
        file: PathBuf,
    },

    /// Validate one or more DDS files end to end
    Check {
        /// Paths to the DDS files
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Info { file } => info(&file),
        Commands::Check { files } => check(&files),
    }
}

fn info(path: &Path) -> Result<()> {
    let dds = DdsFile::open(path).with_context(|| format!("failed to open {}", path.display()))?;

    println!("File:      {} ({} bytes)", path.display(), dds.data().len());
    println!(
        "Format:    {} ({} bytes per 4x4 block)",
        dds.format(),
        dds.format().block_size()
    );
    println!("Extent:    {}x{}", dds.width(), dds.height());
    println!("Mip count: {}", dds.mip_count());
    println!();
    println!("{:>5}  {:>11}  {:>10}  {:>10}", "level", "extent", "offset", "size");

    let mut offset = HEADER_SIZE;
    for level in dds.mip_levels() {
        let level = level.with_context(|| format!("failed to walk {}", path.display()))?;
        println!(
            "{:>5}  {:>11}  {:>10}  {:>10}",
            level.index,
            format!("{}x{}", level.width, level.height),
            offset,
            level.data.len()
        );
        offset += level.data.len();
    }

    let trailing = dds.data().len() - offset;
    if trailing > 0 {
        println!();
        println!("{trailing} trailing bytes after the last mip level");
    }

    Ok(())
}

fn check(paths: &[PathBuf]) -> Result<()> {
    if paths.is_empty() {
        bail!("no files given");
    }

    let mut failures = 0usize;
    for path in paths {
        match validate(path) {
            Ok(levels) => println!("{}: ok ({levels} mip levels)", path.display()),
            Err(err) => {
                println!("{}: {err:#}", path.display());
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} files failed validation", paths.len());
    }
    Ok(())
}

fn validate(path: &Path) -> Result<u32> {
    let dds = DdsFile::open(path)?;
    let mut levels = 0;
    for level in dds.mip_levels() {
        level?;
        levels += 1;
    }
    Ok(levels)
}
