//! Convert pipeline for translating a MySQL dump into PostgreSQL SQL.
//!
//! The whole input is read into memory, folded through the ordered rewrite
//! catalog in [`rules`], and written out behind a fixed warning banner.
//! There is no parsing and no semantic validation: unrecognized SQL passes
//! through unchanged, and output is only written after the full transform
//! has succeeded in memory.

pub mod rules;
mod warnings;

pub use rules::{transform, transform_with_report, Rule, RuleHit, Scope, RULES};
pub use warnings::{ConvertWarning, WarningCollector};

use crate::input;
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Configuration for one conversion run
#[derive(Debug, Default)]
pub struct ConvertConfig {
    /// Input SQL file (optionally .gz/.bz2/.xz/.zst compressed)
    pub input: PathBuf,
    /// Output SQL file (None for stdout)
    pub output: Option<PathBuf>,
    /// Dry run mode: transform but write nothing
    pub dry_run: bool,
    /// Show a spinner while converting
    pub progress: bool,
}

/// Statistics from one conversion run
#[derive(Debug, Default)]
pub struct ConvertStats {
    /// Decompressed input size in bytes
    pub bytes_read: usize,
    /// Output size in bytes, banner included (0 on dry run)
    pub bytes_written: usize,
    /// Rules that fired, in catalog order
    pub rule_hits: Vec<RuleHit>,
    /// Advisory warnings collected during the run
    pub warnings: Vec<ConvertWarning>,
}

impl ConvertStats {
    /// Total substitutions across all rules.
    pub fn replacements(&self) -> usize {
        self.rule_hits.iter().map(|h| h.count).sum()
    }
}

/// Run a conversion: read, transform, write banner + result.
pub fn run(config: ConvertConfig) -> anyhow::Result<ConvertStats> {
    let mut stats = ConvertStats::default();
    let mut warnings = WarningCollector::new();

    eprintln!("Reading {}...", config.input.display());
    let dump = input::read_dump(&config.input)?;
    stats.bytes_read = dump.bytes_read;

    if dump.bytes_dropped > 0 {
        warnings.add(ConvertWarning::InvalidBytesDropped {
            bytes: dump.bytes_dropped,
        });
    }
    detect_lossy_constructs(&dump.text, &mut warnings);

    let spinner = if config.progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message("Applying rewrite rules...");
        Some(pb)
    } else {
        None
    };

    eprintln!("Converting MySQL syntax to PostgreSQL...");
    let (converted, rule_hits) = transform_with_report(&dump.text);
    stats.rule_hits = rule_hits;

    if let Some(pb) = spinner {
        pb.finish_with_message(format!("Applied {} rewrites", stats.replacements()));
    }

    if !config.dry_run {
        if let Some(path) = &config.output {
            eprintln!("Writing {}...", path.display());
        }
    }
    stats.bytes_written = write_output(&config, &converted)?;
    stats.warnings.extend(warnings.warnings().iter().cloned());

    Ok(stats)
}

/// Write the banner and converted text to the configured destination.
///
/// Returns the number of bytes written (0 on dry run). The output file is
/// only created once the transform has already finished, so a failed run
/// never leaves partial output behind.
fn write_output(config: &ConvertConfig, converted: &str) -> anyhow::Result<usize> {
    if config.dry_run {
        return Ok(0);
    }

    let dest = match &config.output {
        Some(path) => path.display().to_string(),
        None => "stdout".to_string(),
    };

    let mut writer: Box<dyn Write> = match &config.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            let file = File::create(path)
                .with_context(|| format!("failed to create output file: {}", path.display()))?;
            Box::new(BufWriter::with_capacity(256 * 1024, file))
        }
        None => Box::new(BufWriter::new(std::io::stdout())),
    };

    let written = write_banner(&mut writer)
        .and_then(|n| {
            writer.write_all(converted.as_bytes())?;
            writer.flush()?;
            Ok(n + converted.len())
        })
        .with_context(|| format!("failed to write output to {}", dest))?;

    Ok(written)
}

/// Two fixed comment lines and a blank line, prepended to every output.
fn write_banner(writer: &mut dyn Write) -> std::io::Result<usize> {
    let banner = "-- Converted from MySQL to PostgreSQL\n-- WARNING: Review this file before importing!\n\n";
    writer.write_all(banner.as_bytes())?;
    Ok(banner.len())
}

static RE_ENUM_COLUMN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\benum\s*\(").unwrap());
static RE_UNSIGNED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bUNSIGNED\b").unwrap());

/// Scan the original text for constructs the catalog degrades or ignores.
fn detect_lossy_constructs(text: &str, warnings: &mut WarningCollector) {
    let enum_columns = RE_ENUM_COLUMN.find_iter(text).count();
    if enum_columns > 0 {
        warnings.add(ConvertWarning::EnumDegraded {
            columns: enum_columns,
        });
    }
    if RE_UNSIGNED.is_match(text) {
        warnings.add(ConvertWarning::UnsignedPassthrough);
    }
}
