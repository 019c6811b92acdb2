//! Trail-Planer (CLI).
//!
//! Lädt ein Wegenetz, sucht ab einem Startpunkt einen Trail mit Ziel-Distanz
//! und gibt Länge, Höhenmeter und Node-Folge aus.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use glam::DVec2;
use trail_planner::{
    load_street_network, search_route, summarize_elevation, Heightmap, InitialBearing,
    PlannerOptions, SearchOutcome, StreetGraph, TrailExport,
};

#[derive(Parser, Debug)]
#[command(name = "trail-planner")]
#[command(about = "Sucht einen Trail mit Ziel-Distanz in einem Wegenetz")]
struct Cli {
    /// Wegenetz im AutoDrive-XML-Format
    #[arg(long)]
    network: PathBuf,
    /// Ziel-Distanz in Metern
    #[arg(long)]
    distance: f64,
    /// Start-Node-ID
    #[arg(long, conflicts_with_all = ["start_x", "start_y"])]
    start_node: Option<u64>,
    /// Start-Position Ost (Meter), wird auf den nächsten Node eingerastet
    #[arg(long, requires = "start_y")]
    start_x: Option<f64>,
    /// Start-Position Nord (Meter)
    #[arg(long, requires = "start_x")]
    start_y: Option<f64>,
    /// Begradigungs-Heuristik einschalten
    #[arg(long, conflicts_with = "no_straight")]
    straight: bool,
    /// Begradigungs-Heuristik ausschalten
    #[arg(long)]
    no_straight: bool,
    /// Seed für die Start-Peilung
    #[arg(long, conflicts_with = "bearing")]
    seed: Option<u64>,
    /// Feste Start-Peilung in Grad
    #[arg(long)]
    bearing: Option<f64>,
    /// Maximale Anzahl expandierter Frames
    #[arg(long)]
    max_expansions: Option<usize>,
    /// Maximale Suchdauer in Millisekunden
    #[arg(long)]
    time_limit_ms: Option<u64>,
    /// Heightmap (Graustufen-PNG) für Node-Höhen
    #[arg(long)]
    heightmap: Option<PathBuf>,
    /// Trail als JSON exportieren
    #[arg(long)]
    json: Option<PathBuf>,
    /// Optionen-Datei (Standard: trail_planner.toml neben der Binary)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Gibt `Ok(false)` zurück, wenn kein Trail gefunden wurde.
fn run(cli: Cli) -> Result<bool> {
    log::info!("Trail-Planer v{} startet...", env!("CARGO_PKG_VERSION"));

    let config_path = cli.config.clone().unwrap_or_else(PlannerOptions::config_path);
    let mut options = PlannerOptions::load_from_file(&config_path);
    apply_overrides(&mut options, &cli);

    let mut graph = load_street_network(&cli.network)?;
    if let Some(path) = &cli.heightmap {
        let heightmap = Heightmap::load(path)?;
        heightmap.apply_to_graph(&mut graph, options.height_scale);
    }

    let start = resolve_start(&graph, &cli, options.snap_radius)?;
    let mut config = options.search_config(cli.distance);
    if let Some(bearing) = cli.bearing {
        config.initial_bearing = InitialBearing::Fixed(bearing);
    }

    let trail = match search_route(&graph, start, &config)? {
        SearchOutcome::Found(trail) => trail,
        SearchOutcome::NotFound(stats) => {
            println!(
                "Kein Trail im Fenster gefunden ({} Frames untersucht)",
                stats.expanded
            );
            return Ok(false);
        }
        SearchOutcome::BudgetExhausted(stats) => {
            println!(
                "Suche nach {} Frames abgebrochen (Budget aufgebraucht)",
                stats.expanded
            );
            return Ok(false);
        }
    };

    let nodes = trail.node_sequence();
    let elevation = summarize_elevation(&graph, &nodes);
    println!("Trail ab Node {}: {} Abschnitte", trail.start, trail.steps);
    println!("  Länge:    {:.1} m", trail.length);
    println!("  Anstieg:  {:.1} m", elevation.gain);
    println!("  Abstieg:  {:.1} m", elevation.loss);
    println!(
        "  Nodes:    {}",
        nodes
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(" → ")
    );

    if let Some(path) = &cli.json {
        TrailExport::build(&graph, &trail)?.write_to_file(path)?;
    }

    Ok(true)
}

fn apply_overrides(options: &mut PlannerOptions, cli: &Cli) {
    if cli.straight {
        options.straighten = true;
    }
    if cli.no_straight {
        options.straighten = false;
    }
    if cli.seed.is_some() {
        options.seed = cli.seed;
    }
    if cli.max_expansions.is_some() {
        options.max_expansions = cli.max_expansions;
    }
    if cli.time_limit_ms.is_some() {
        options.time_limit_ms = cli.time_limit_ms;
    }
}

fn resolve_start(graph: &StreetGraph, cli: &Cli, snap_radius: f64) -> Result<u64> {
    match (cli.start_node, cli.start_x, cli.start_y) {
        (Some(id), _, _) => Ok(id),
        (None, Some(x), Some(y)) => graph
            .snap_to_node(DVec2::new(x, y), snap_radius)
            .context("Startposition konnte nicht aufgelöst werden"),
        _ => bail!("Start fehlt: --start-node oder --start-x/--start-y angeben"),
    }
}
