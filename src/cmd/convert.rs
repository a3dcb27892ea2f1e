//! Convert command CLI handler.

use crate::convert::{self, ConvertConfig, ConvertStats};
use crate::input::Compression;
use anyhow::Context;
use std::path::{Path, PathBuf};

use super::fileset::{self, BatchOutcome};

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    progress: bool,
    dry_run: bool,
    fail_fast: bool,
) -> anyhow::Result<()> {
    let inputs = fileset::resolve_inputs(&file)?;

    if inputs.len() == 1 {
        run_single(inputs.into_iter().next().unwrap(), output, progress, dry_run)
    } else {
        let output_dir = match output {
            Some(dir) => dir,
            None => {
                anyhow::bail!(
                    "Output directory required when using glob patterns. Use --output <dir>"
                );
            }
        };

        run_batch(inputs, output_dir, dry_run, fail_fast)
    }
}

fn run_single(
    file: PathBuf,
    output: Option<PathBuf>,
    progress: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    let config = ConvertConfig {
        input: file,
        output,
        dry_run,
        progress,
    };

    let stats = convert::run(config)?;

    print_stats(&stats, dry_run, progress);
    eprintln!("Conversion complete.");

    Ok(())
}

fn run_batch(
    files: Vec<PathBuf>,
    output_dir: PathBuf,
    dry_run: bool,
    fail_fast: bool,
) -> anyhow::Result<()> {
    let total = files.len();
    let mut outcome = BatchOutcome::default();

    if !dry_run {
        std::fs::create_dir_all(&output_dir).with_context(|| {
            format!("failed to create output directory: {}", output_dir.display())
        })?;
    }

    eprintln!("Converting {} files to PostgreSQL...\n", total);

    for (idx, file) in files.iter().enumerate() {
        eprintln!("[{}/{}] Converting: {}", idx + 1, total, file.display());

        let output_file = if dry_run {
            None
        } else {
            Some(output_dir.join(output_name(file, idx)))
        };

        let config = ConvertConfig {
            input: file.clone(),
            output: output_file.clone(),
            dry_run,
            progress: false,
        };

        match convert::run(config) {
            Ok(stats) => {
                let warning_str = if stats.warnings.is_empty() {
                    String::new()
                } else {
                    format!(" ({} warnings)", stats.warnings.len())
                };

                eprintln!(
                    "  {} rewrites across {} rules{}",
                    stats.replacements(),
                    stats.rule_hits.len(),
                    warning_str
                );

                if let Some(out) = output_file {
                    eprintln!("  → {}", out.display());
                }
                eprintln!();

                outcome.record_success();
            }
            Err(e) => {
                eprintln!("  Error: {}\n", e);
                outcome.record_failure(file.clone(), e.to_string());
                if fail_fast {
                    break;
                }
            }
        }
    }

    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!("Conversion Summary:");
    eprintln!("  Total files: {}", total);
    eprintln!("  Succeeded: {}", outcome.succeeded);
    eprintln!("  Failed: {}", outcome.failed.len());

    if outcome.has_failures() {
        eprintln!();
        eprintln!("Failed files:");
        for (path, error) in &outcome.failed {
            eprintln!("  - {}: {}", path.display(), error);
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Output file name for a batch entry. Compressed inputs lose their
/// compression extension, since the converted output is plain text.
fn output_name(file: &Path, idx: usize) -> String {
    let name = match Compression::from_path(file) {
        Compression::None => file.file_name().map(|s| s.to_string_lossy().to_string()),
        _ => file.file_stem().map(|s| s.to_string_lossy().to_string()),
    };
    name.unwrap_or_else(|| format!("output_{}.sql", idx))
}

fn print_stats(stats: &ConvertStats, dry_run: bool, progress: bool) {
    if !progress && !dry_run {
        return;
    }

    eprintln!();
    eprintln!("Conversion Statistics:");
    eprintln!("  Bytes read: {}", stats.bytes_read);
    eprintln!("  Bytes written: {}", stats.bytes_written);
    eprintln!("  Total rewrites: {}", stats.replacements());
    for hit in &stats.rule_hits {
        eprintln!("    {:>6} × {}", hit.count, hit.name);
    }

    if !stats.warnings.is_empty() {
        eprintln!();
        eprintln!("Warnings ({}):", stats.warnings.len());
        for warning in &stats.warnings {
            eprintln!("  ⚠ {}", warning);
        }
    }

    if dry_run {
        eprintln!();
        eprintln!("(Dry run - no output written)");
    }
}
