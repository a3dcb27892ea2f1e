mod convert;
mod fileset;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mysql2pg")]
#[command(version)]
#[command(about = "Convert MySQL dump files into PostgreSQL-compatible SQL", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a MySQL dump to PostgreSQL-compatible SQL
    Convert {
        /// Input SQL file or glob pattern (e.g., *.sql, dumps/**/*.sql)
        /// Supports .gz, .bz2, .xz, .zst compression
        file: PathBuf,

        /// Output SQL file (default: stdout), or output directory for glob patterns
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show progress and conversion statistics
        #[arg(short, long)]
        progress: bool,

        /// Preview without writing files (dry run)
        #[arg(long)]
        dry_run: bool,

        /// Stop on first file that fails (for glob patterns)
        #[arg(long)]
        fail_fast: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Convert {
            file,
            output,
            progress,
            dry_run,
            fail_fast,
        } => convert::run(file, output, progress, dry_run, fail_fast),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "mysql2pg", &mut io::stdout());
            Ok(())
        }
    }
}
