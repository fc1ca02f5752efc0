use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use noodles::fasta;
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::OutputFormat;
use crate::core::session::IngestionSession;
use crate::core::store::SequenceStore;
use crate::parsing::fasta::open_reader;
use crate::parsing::mapping;
use crate::remap::{planner, weaver};

#[derive(Args)]
pub struct RemapArgs {
    /// Whole-contig mapping table (whitespace-delimited, PAF field layout)
    #[arg(required = true)]
    pub mapping: PathBuf,

    /// Draft assembly FASTA to correct (.gz accepted)
    #[arg(required = true)]
    pub assembly: PathBuf,

    /// Contig FASTA providing the sequences to splice in (.gz accepted)
    #[arg(required = true)]
    pub contigs: PathBuf,

    /// Insert each contig's full length instead of only its aligned span
    #[arg(long)]
    pub extend_contig: bool,

    /// Remapped assembly output (default: next to the assembly, with a
    /// _remapped.fasta suffix)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Rescue-list output (default: next to the assembly, with a
    /// _scaff_to_rescue.dat suffix)
    #[arg(long)]
    pub rescue: Option<PathBuf>,
}

/// Counters reported at the end of a run
#[derive(Debug, Default, Serialize)]
pub struct RemapSummary {
    pub records_read: usize,
    pub placements_kept: usize,
    pub degenerate_records: usize,
    pub repeat_contigs: usize,
    pub scaffolds_spliced: usize,
    pub scaffolds_rescued: usize,
}

/// Execute the remap subcommand: ingest the mapping table, resolve oriented
/// contig sequences, then stream the assembly scaffold by scaffold.
///
/// # Errors
///
/// Returns an error on a malformed mapping record, an unreadable input, a
/// non-ACGT base during complementation, or a placement whose contig is
/// missing from the sequence file.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: RemapArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let mut session = IngestionSession::new();

    info!("reading mapping table");
    let stats = mapping::read_mapping_table(&args.mapping, &mut session)?;

    if verbose {
        eprintln!(
            "Ingested {} mapping records: {} placed, {} degenerate, {} repeat contig(s), {} known-repeat discard(s)",
            stats.records,
            stats.placed,
            stats.degenerate,
            session.invalid_contigs().len(),
            stats.known_repeats
        );
    }

    info!("resolving contig sequences");
    let store = SequenceStore::resolve(&args.contigs, &session)?;

    if verbose {
        eprintln!(
            "Resolved {} oriented sequence(s) for {} scaffold(s)",
            store.len(),
            session.scaffold_count()
        );
    }

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| sibling_path(&args.assembly, "_remapped.fasta"));
    let rescue_path = args
        .rescue
        .clone()
        .unwrap_or_else(|| sibling_path(&args.assembly, "_scaff_to_rescue.dat"));

    let mut summary = RemapSummary {
        records_read: stats.records,
        placements_kept: session.placement_count(),
        degenerate_records: stats.degenerate,
        repeat_contigs: session.invalid_contigs().len(),
        ..RemapSummary::default()
    };

    info!("processing scaffolds");
    let mut reader = open_reader(&args.assembly)?;
    let mut writer = fasta::io::Writer::new(BufWriter::new(File::create(&output_path)?));
    let mut rescue = BufWriter::new(File::create(&rescue_path)?);

    for result in reader.records() {
        let record = result?;
        let name = String::from_utf8_lossy(record.name()).to_string();

        if let Some(placements) = session.placements_for(&name) {
            debug!("splicing {} placement(s) into {}", placements.len(), name);
            let plan = planner::plan(placements, args.extend_contig);
            let spliced = weaver::weave(
                record.sequence().as_ref(),
                &plan,
                &store,
                args.extend_contig,
            )?;

            let out_record =
                fasta::Record::new(record.definition().clone(), fasta::record::Sequence::from(spliced));
            writer.write_record(&out_record)?;
            summary.scaffolds_spliced += 1;
        } else {
            debug!("no valid placement for {}, rescuing", name);
            writeln!(rescue, "{name}")?;
            summary.scaffolds_rescued += 1;
        }
    }

    rescue.flush()?;

    report(&summary, format)?;
    Ok(())
}

/// Derive an output path beside the assembly: strip the final extension and
/// append `suffix`.
fn sibling_path(assembly: &Path, suffix: &str) -> PathBuf {
    let stem = assembly
        .file_stem()
        .map_or_else(|| "assembly".to_string(), |s| s.to_string_lossy().to_string());
    assembly.with_file_name(format!("{stem}{suffix}"))
}

fn report(summary: &RemapSummary, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(summary)?),
        OutputFormat::Text => {
            println!("Mapping records read: {}", summary.records_read);
            println!("Placements kept:      {}", summary.placements_kept);
            println!("Degenerate records:   {}", summary.degenerate_records);
            println!("Repeat contigs:       {}", summary.repeat_contigs);
            println!("Scaffolds spliced:    {}", summary.scaffolds_spliced);
            println!("Scaffolds rescued:    {}", summary.scaffolds_rescued);
        }
    }
    Ok(())
}
