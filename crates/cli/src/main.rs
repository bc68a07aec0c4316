//! Wheel of Fate CLI - decide who does it next, weighted by who owes the most.

use std::path::PathBuf;
use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use fate_core::{Participant, ParticipantId};
use fate_ledger::{BalanceStore, ExpenseLedger, Snapshot};
use fate_selection::{
    arc_path, label_anchor, layout_sectors, FairnessSelector, Point, RandomSource, RngSource,
    SpinConfig, WeightPolicy, DEFAULT_FLOOR_WEIGHT,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fate")]
#[command(about = "Spin the wheel of fate over a group's balances", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SnapshotArgs {
    /// Group snapshot (participants, balances, expenses, settlements)
    #[arg(short, long)]
    file: PathBuf,

    /// Weight for participants who are not net debtors
    #[arg(long, default_value_t = DEFAULT_FLOOR_WEIGHT)]
    floor: f64,
}

#[derive(Subcommand)]
enum Commands {
    /// Show each participant's weight and chance of being picked
    Weights {
        #[command(flatten)]
        snapshot: SnapshotArgs,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Pick one participant
    Spin {
        #[command(flatten)]
        snapshot: SnapshotArgs,
        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,
        /// Only spin among these participant ids
        #[arg(long = "only", value_name = "ID")]
        only: Vec<String>,
        /// Fewest full turns of the wheel
        #[arg(long, default_value = "3")]
        min_spins: u32,
        /// Most full turns of the wheel
        #[arg(long, default_value = "4")]
        max_spins: u32,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show wheel sectors with label positions and SVG paths
    Sectors {
        #[command(flatten)]
        snapshot: SnapshotArgs,
        /// Wheel radius in SVG units
        #[arg(long, default_value = "140")]
        radius: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Weights { snapshot, json } => {
            let policy = WeightPolicy::new(snapshot.floor)?;
            let ledger = open(&snapshot).await?;
            let sheet = ledger.snapshot();
            let participants = ledger.participants();
            let weights = policy.weights_for(&participants, &sheet);
            let total: f64 = weights.iter().sum();

            if json {
                let rows: Vec<_> = participants
                    .iter()
                    .zip(&weights)
                    .map(|(p, w)| {
                        serde_json::json!({
                            "id": p.id,
                            "name": p.name,
                            "net": sheet.net(&p.id),
                            "weight": w,
                            "probability": w / total,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
                return Ok(());
            }

            println!("Weights ({} participants, floor {})", participants.len(), policy.floor());
            for (p, w) in participants.iter().zip(&weights) {
                println!("  {} | {:>16} | net {:>9.2} | weight {:>9.2} | {:>5.1}%",
                    p.id,
                    p.name,
                    sheet.net(&p.id),
                    w,
                    w / total * 100.0,
                );
            }
        }
        Commands::Spin { snapshot, seed, only, min_spins, max_spins, json } => {
            let config = SpinConfig::new()
                .with_weight_policy(WeightPolicy::new(snapshot.floor)?)
                .with_full_spins(min_spins, max_spins)?;
            let ledger = open(&snapshot).await?;
            let participants = pick_participants(&ledger, &only)?;

            let rng: Box<dyn RandomSource> = match seed {
                Some(seed) => {
                    debug!("Using seed {}", seed);
                    Box::new(RngSource::seeded(seed))
                }
                None => Box::new(RngSource::from_entropy()),
            };
            let mut selector = FairnessSelector::new(ledger, rng).with_config(config);
            let outcome = selector.spin_among(&participants)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
                return Ok(());
            }

            println!("Winner: {} ({})", outcome.winner.name, outcome.winner.id);
            println!("  Chance: {:.1}%", outcome.winner_sector().probability() * 100.0);
            println!("  Rotation: {:.1}° ({} full turns)", outcome.rotation_degrees, outcome.full_spins);
            println!("  Reveal after: {} ms", outcome.reveal_after_ms);
            for sector in &outcome.sectors {
                let marker = if sector.participant == outcome.winner.id { "*" } else { " " };
                println!(" {} {} | {:>7.2}° - {:>7.2}° | weight {:.2}",
                    marker,
                    sector.participant,
                    sector.start_angle,
                    sector.end_angle,
                    sector.weight,
                );
            }
        }
        Commands::Sectors { snapshot, radius } => {
            let policy = WeightPolicy::new(snapshot.floor)?;
            let ledger = open(&snapshot).await?;
            let participants = ledger.participants();
            let weights = policy.weights_for(&participants, &ledger.snapshot());
            let sectors = layout_sectors(&participants, &weights)?;

            let center = Point::new(radius + 10.0, radius + 10.0);
            for (participant, sector) in participants.iter().zip(&sectors) {
                let anchor = label_anchor(center, radius, sector);
                println!("{} ({})", participant.name, participant.id);
                println!("  Angles: {:.2}° - {:.2}° (mid {:.2}°)",
                    sector.start_angle, sector.end_angle, sector.mid_angle());
                println!("  Label: ({:.1}, {:.1})", anchor.x, anchor.y);
                println!("  Path: {}", arc_path(center, radius, sector));
            }
        }
    }

    Ok(())
}

async fn open(args: &SnapshotArgs) -> Result<ExpenseLedger> {
    let snapshot = Snapshot::load(&args.file).await?;
    let ledger = snapshot.into_ledger()?;
    info!("Loaded {} participants from {}", ledger.participants().len(), args.file.display());
    Ok(ledger)
}

fn pick_participants(ledger: &ExpenseLedger, only: &[String]) -> Result<Vec<Participant>> {
    let all = ledger.participants();
    if only.is_empty() {
        return Ok(all);
    }

    let mut picked = Vec::with_capacity(only.len());
    for id in only {
        let id = ParticipantId::from(id.as_str());
        let Some(participant) = all.iter().find(|p| p.id == id) else {
            bail!("Unknown participant: {}", id);
        };
        if picked.iter().any(|p: &Participant| p.id == id) {
            warn!("Ignoring repeated --only {}", id);
            continue;
        }
        picked.push(participant.clone());
    }
    Ok(picked)
}
