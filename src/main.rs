//! Herodex CLI - Command-line tool for hero build catalogs and save strings.
//!
//! This is the main entry point for the Herodex command-line application.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use glob::{MatchOptions, Pattern};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use herodex::prelude::*;

/// Herodex - hero build catalog and save string decoder
#[derive(Parser)]
#[command(name = "herodex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Catalog file locations shared by every subcommand.
#[derive(Args)]
struct CatalogArgs {
    /// Path to the enhancement catalog
    #[arg(long, env = "HERODEX_ENH_DB")]
    enh_db: PathBuf,

    /// Path to the powers catalog
    #[arg(long, env = "HERODEX_POWERS_DB")]
    powers_db: PathBuf,
}

impl CatalogArgs {
    fn open(&self) -> Result<Catalog> {
        let start = Instant::now();
        let catalog = Catalog::open(&self.enh_db, &self.powers_db).with_context(|| {
            format!(
                "Failed to load catalogs {} and {}",
                self.enh_db.display(),
                self.powers_db.display()
            )
        })?;
        debug!(elapsed = ?start.elapsed(), "catalog loaded");
        Ok(catalog)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show catalog metadata and entity counts
    Catalog {
        #[command(flatten)]
        catalogs: CatalogArgs,
    },

    /// Decode a single save file
    Decode {
        #[command(flatten)]
        catalogs: CatalogArgs,

        /// Save file containing the save string
        input: PathBuf,

        /// Print the build as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode every matching save file in a directory
    Batch {
        #[command(flatten)]
        catalogs: CatalogArgs,

        /// Directory to scan recursively
        input: PathBuf,

        /// Filter pattern for file names (glob-style)
        #[arg(short, long, default_value = "*.mbd")]
        pattern: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Catalog { catalogs } => {
            cmd_catalog(&catalogs)?;
        }
        Commands::Decode {
            catalogs,
            input,
            json,
        } => {
            cmd_decode(&catalogs, &input, json)?;
        }
        Commands::Batch {
            catalogs,
            input,
            pattern,
        } => {
            cmd_batch(&catalogs, &input, &pattern)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_catalog(catalogs: &CatalogArgs) -> Result<()> {
    let start = Instant::now();
    let catalog = catalogs.open()?;
    let info = catalog.powers_db().info();
    let enh_db = catalog.enhancement_db();

    println!("Loaded catalogs in {:?}", start.elapsed());
    println!();
    println!("Powers catalog:      {}", info.header);
    println!("  Version:           {}", info.version);
    println!("  Date:              {}", info.date);
    println!("  Issue:             {}", info.issue);
    println!("  Page:              {} ({})", info.page_vol, info.page_vol_text);
    println!("  Classes:           {}", catalog.powers_db().classes().len());
    println!("  Powersets:         {}", catalog.powers_db().powersets().len());
    println!("  Powers:            {}", catalog.powers_db().powers().len());
    println!();
    println!("Enhancement catalog: {}", enh_db.header());
    println!("  Enhancements:      {}", enh_db.enhancements().len());
    println!("  Sets:              {}", enh_db.sets().len());

    Ok(())
}

fn cmd_decode(catalogs: &CatalogArgs, input: &Path, json: bool) -> Result<()> {
    let catalog = catalogs.open()?;
    let character = Character::from_file(&catalog, input)
        .with_context(|| format!("Failed to decode {}", input.display()))?;

    let summary = BuildSummary::new(&catalog, &character);
    if json {
        println!("{}", summary.to_json().context("Failed to serialize build")?);
    } else {
        print!("{}", summary);
    }

    Ok(())
}

fn cmd_batch(catalogs: &CatalogArgs, input: &Path, pattern: &str) -> Result<()> {
    let pattern =
        Pattern::new(pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))?;
    let catalog = Arc::new(catalogs.open()?);

    let files: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| name_matches(&pattern, &entry.file_name().to_string_lossy()))
        .map(|entry| entry.into_path())
        .collect();

    println!("Decoding {} files from {}...", files.len(), input.display());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let results: Vec<(PathBuf, Result<Character, herodex::save::Error>)> = files
        .into_par_iter()
        .map(|path| {
            let result = Character::from_file(&catalog, &path);
            pb.inc(1);
            (path, result)
        })
        .collect();
    pb.finish_with_message("Done");

    let mut decoded = 0;
    let mut lossy = 0;
    let mut errors = 0;
    for (path, result) in &results {
        match result {
            Ok(character) => {
                decoded += 1;
                if !character.stats.is_lossless() {
                    lossy += 1;
                    println!(
                        "{}: {} ({} powers, {} missing from catalog)",
                        path.display(),
                        character.name,
                        character.power_entries.len(),
                        character.stats.powers_dropped
                    );
                }
            }
            Err(e) => {
                eprintln!("Error decoding {}: {}", path.display(), e);
                errors += 1;
            }
        }
    }

    println!(
        "Decoded {} files in {:?} ({} with missing references, {} errors)",
        decoded,
        start.elapsed(),
        lossy,
        errors
    );

    Ok(())
}

/// Case-insensitive match of a file name against the batch pattern.
fn name_matches(pattern: &Pattern, name: &str) -> bool {
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };
    pattern.matches_with(name, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_matches() {
        let mbd = Pattern::new("*.mbd").unwrap();
        assert!(name_matches(&mbd, "Fire_Blaster.mbd"));
        assert!(name_matches(&Pattern::new("*.MBD").unwrap(), "fire_blaster.mbd"));
        assert!(!name_matches(&mbd, "notes.txt"));
        assert!(name_matches(&mbd, "a.mbd.mbd"));

        let prefix = Pattern::new("fire*").unwrap();
        assert!(name_matches(&prefix, "Fire_Blaster.mbd"));
        assert!(!name_matches(&prefix, "Old_Fire.mbd"));
        assert!(name_matches(&Pattern::new("*blast*").unwrap(), "Fire_Blaster.mbd"));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        assert!(Pattern::new("[*.mbd").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "herodex",
            "-v",
            "decode",
            "--enh-db",
            "EnhDB.mhd",
            "--powers-db",
            "I12.mhd",
            "build.mbd",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        assert!(matches!(cli.command, Commands::Decode { json: true, .. }));
    }
}
