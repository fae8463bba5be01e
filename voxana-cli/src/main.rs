//! Command-line interface for per-event voxel and track analysis.
#![allow(
    clippy::uninlined_format_args,
    clippy::cast_precision_loss,
    clippy::too_many_lines
)]

use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use std::path::PathBuf;
use thiserror::Error;

use voxana_algorithms::{
    EdgeLengthSum, EndpointSpan, EnergyRedistributor, TrackSelector, VoxelTrackAssociator,
};
use voxana_core::units::{KEV, MM};
use voxana_core::{
    DiagnosticRecord, EventObserver, NullObserver, RecordingObserver, Track, TrackLength,
    VoxelData,
};
use voxana_io::{read_events, Event, SummaryRecord, SummaryWriter};

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("event file error: {0}")]
    VoxanaIo(#[from] voxana_io::Error),

    #[error("analysis error: {0}")]
    Core(#[from] voxana_core::Error),
}

/// Track-length model selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Length {
    /// Sum of Euclidean edge lengths over the track adjacency
    EdgeSum,
    /// Maximum node-pair distance
    Span,
}

impl Length {
    fn model(self) -> &'static dyn TrackLength {
        match self {
            Self::EdgeSum => &EdgeLengthSum,
            Self::Span => &EndpointSpan,
        }
    }
}

/// Per-event voxel and track analysis.
#[derive(Parser)]
#[command(name = "voxana")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Redistribute energies, associate voxels and select tracks
    Process {
        /// Input JSON event file
        input: PathBuf,

        /// Output file path for per-event summaries
        #[arg(short, long)]
        output: PathBuf,

        /// Track energy threshold (raw energy units, MeV by convention)
        #[arg(short, long)]
        threshold: f64,

        /// Track-length model
        #[arg(short, long, value_enum, default_value = "edge-sum")]
        length: Length,

        /// Abort on the first inconsistent event instead of skipping it
        #[arg(long)]
        strict: bool,

        /// Print per-decision diagnostics (keV / mm display units)
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show information about an event file
    Info {
        /// Input JSON event file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            output,
            threshold,
            length,
            strict,
            verbose,
        } => process(&input, &output, threshold, length, strict, verbose),
        Commands::Info { input } => info(&input),
    }
}

fn process(
    input: &PathBuf,
    output: &PathBuf,
    threshold: f64,
    length: Length,
    strict: bool,
    verbose: bool,
) -> Result<()> {
    let events = read_events(input)?;
    println!("Read {} events from {}", events.len(), input.display());

    let outcomes: Vec<(u64, Result<SummaryRecord>)> = if verbose {
        // Sequential so diagnostics interleave with their event.
        events
            .iter()
            .map(|event| (event.id, analyze_verbose(event, threshold, length.model())))
            .collect()
    } else {
        events
            .par_iter()
            .map(|event| {
                (
                    event.id,
                    analyze(event, threshold, length.model(), &mut NullObserver),
                )
            })
            .collect()
    };

    let mut summaries = Vec::with_capacity(outcomes.len());
    let mut skipped = 0_usize;
    for (event, outcome) in outcomes {
        match outcome {
            Ok(summary) => summaries.push(summary),
            Err(err) if strict => return Err(err),
            Err(err) => {
                eprintln!("warning: skipping event {}: {}", event, err);
                skipped += 1;
            }
        }
    }

    let mut writer = SummaryWriter::create(output)?;
    writer.write_summaries(&summaries)?;
    println!(
        "Wrote {} summaries to {} ({} events skipped)",
        summaries.len(),
        output.display(),
        skipped
    );
    Ok(())
}

/// Runs the three analysis steps on one event.
fn analyze(
    event: &Event,
    threshold: f64,
    length: &dyn TrackLength,
    observer: &mut dyn EventObserver,
) -> Result<SummaryRecord> {
    let new_energies = EnergyRedistributor::new().redistribute(&event.voxels, observer)?;
    let updated: Vec<VoxelData> = event
        .voxels
        .iter()
        .zip(&new_energies)
        .map(|(voxel, &energy)| voxel.with_energy(energy))
        .collect();

    let tracks: Vec<Track> = event
        .tracks
        .iter()
        .map(|topology| topology.materialize(&updated))
        .collect::<voxana_io::Result<_>>()?;

    let associations = VoxelTrackAssociator::new().associate(&updated, &tracks)?;
    let selected = TrackSelector::new(threshold).select(&tracks, length, observer)?;

    Ok(SummaryRecord {
        event: event.id,
        new_energies,
        associations,
        selected,
    })
}

fn analyze_verbose(
    event: &Event,
    threshold: f64,
    length: &dyn TrackLength,
) -> Result<SummaryRecord> {
    let mut observer = RecordingObserver::new();
    let summary = analyze(event, threshold, length, &mut observer);

    println!("Event {}", event.id);
    for record in observer.records() {
        match *record {
            DiagnosticRecord::EnergyRouted { from, energy, to } => println!(
                "    Negl. voxel {} with E: {:.1} keV  -->  voxel {}",
                from,
                energy / KEV,
                to
            ),
            DiagnosticRecord::TrackDiscarded { track, energy } => println!(
                "    Track {} with energy {:.1} keV  -->  discarded",
                track,
                energy / KEV
            ),
            DiagnosticRecord::TrackRanked {
                rank,
                energy,
                length,
            } => println!(
                "    Track rank {}  energy: {:.1} keV   length: {:.1} mm",
                rank,
                energy / KEV,
                length / MM
            ),
        }
    }

    summary
}

fn info(input: &PathBuf) -> Result<()> {
    let events = read_events(input)?;

    let voxel_count: usize = events.iter().map(|e| e.voxels.len()).sum();
    let negligible: usize = events
        .iter()
        .flat_map(|e| e.voxels.iter())
        .filter(|v| v.negligible)
        .count();
    let track_count: usize = events.iter().map(|e| e.tracks.len()).sum();
    let total_energy: f64 = events
        .iter()
        .flat_map(|e| e.voxels.iter())
        .map(|v| v.energy)
        .sum();

    println!("File: {}", input.display());
    println!("  Events:            {}", events.len());
    println!(
        "  Voxels:            {} ({} negligible)",
        voxel_count, negligible
    );
    println!("  Tracks:            {}", track_count);
    println!("  Total energy:      {:.1} keV", total_energy / KEV);
    Ok(())
}
