//! Command-line interface for scaffold-remap.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **remap**: splice contigs back into a draft assembly from a mapping table
//!
//! ## Usage
//!
//! ```text
//! # Remap contigs onto a draft assembly
//! scaffold-remap remap mapping.paf assembly.fasta contigs.fasta
//!
//! # Insert full contigs instead of only their aligned spans
//! scaffold-remap remap mapping.paf assembly.fasta contigs.fasta --extend-contig
//!
//! # JSON run summary for scripting
//! scaffold-remap remap mapping.paf assembly.fasta contigs.fasta --format json
//! ```

use clap::{Parser, Subcommand};

pub mod remap;

#[derive(Parser)]
#[command(name = "scaffold-remap")]
#[command(version)]
#[command(about = "Splice assembled contigs back into draft scaffolds")]
#[command(
    long_about = "scaffold-remap corrects a draft assembly by replacing scaffold spans with the contigs that align onto them.\n\nIt reads a whole-contig mapping table, discards degenerate alignments, permanently excludes contigs that map more than once (repeats), and splices the surviving contigs into each scaffold honoring strand orientation and trimming overlaps between adjacent insertions. Scaffolds without a single valid placement are written to a rescue list."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for the run summary
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Remap contigs onto a draft assembly
    Remap(remap::RemapArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
