//! `scenegen` CLI: single scenes, seed batches, export inspection.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scene_core::{audit, SceneConfig};
use shape_models::ObjectKind;
use sim::batch::{run_batch, run_batch_with_scenes};
use sim::export::{inspect, load_scene, save_scene, SceneExport};
use sim::scenarios::{Scenario, ScenarioKind};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "scenegen", about = "Synthetic scene generator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one scene from a named scenario.
    Generate {
        #[arg(value_enum)]
        scenario: ScenarioKind,
        /// Random seed for reproducibility
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// JSON scene configuration overriding the scenario preset
        #[arg(long)]
        config: Option<PathBuf>,
        /// Save the scene export to a JSON file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Generate scenes over consecutive seeds and report summary counts.
    Batch {
        #[arg(value_enum)]
        scenario: ScenarioKind,
        /// Number of scenes
        #[arg(long, default_value_t = 10)]
        count: u64,
        /// First seed; scene i uses seed_start + i
        #[arg(long, default_value_t = 0)]
        seed_start: u64,
        /// JSON scene configuration overriding the scenario preset
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output the batch report to a JSON file
        #[arg(long)]
        output: Option<PathBuf>,
        /// Also save every scene export into this directory
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },
    /// Load a saved scene export and re-check it.
    Inspect {
        /// Path to scene JSON file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            scenario,
            seed,
            config,
            output,
        } => {
            run_generate(scenario, seed, config.as_deref(), output.as_deref())?;
        }
        Commands::Batch {
            scenario,
            count,
            seed_start,
            config,
            output,
            export_dir,
        } => {
            run_batch_cmd(
                scenario,
                count,
                seed_start,
                config.as_deref(),
                output.as_deref(),
                export_dir.as_deref(),
            )?;
        }
        Commands::Inspect { input } => {
            run_inspect(&input)?;
        }
    }

    Ok(())
}

fn load_scenario(kind: ScenarioKind, seed: u64, config_path: Option<&Path>) -> Result<Scenario> {
    let scenario = Scenario::build(kind, seed);
    match config_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let config = SceneConfig::from_json(&json)
                .with_context(|| format!("invalid config {}", path.display()))?;
            Ok(scenario.with_config(config))
        }
        None => Ok(scenario),
    }
}

fn run_generate(
    kind: ScenarioKind,
    seed: u64,
    config_path: Option<&Path>,
    output_path: Option<&Path>,
) -> Result<()> {
    let scenario = load_scenario(kind, seed, config_path)?;
    println!("Generating scenario '{}' (seed={})...", scenario.name, seed);

    let start = std::time::Instant::now();
    let scene = scenario.generate()?;
    let violations = audit(&scene);
    let elapsed = start.elapsed();

    for kind in ObjectKind::DYNAMIC {
        if let Some(stats) = scene.stats(kind) {
            println!(
                "{:<11} {}/{} placed, {} failed slots, {} attempts",
                kind.as_str(),
                stats.placed,
                stats.requested,
                stats.failed_slots,
                stats.attempts
            );
        }
    }
    println!(
        "Scatterers: {} total, audit violations: {}, elapsed={:.3}s",
        scene.point_count(),
        violations.len(),
        elapsed.as_secs_f64()
    );

    if let Some(opath) = output_path {
        save_scene(&SceneExport::from_scene(&scene, &scenario.config), opath)?;
        println!("Scene saved to {}", opath.display());
    }

    Ok(())
}

fn run_batch_cmd(
    kind: ScenarioKind,
    count: u64,
    seed_start: u64,
    config_path: Option<&Path>,
    output_path: Option<&Path>,
    export_dir: Option<&Path>,
) -> Result<()> {
    let scenario = load_scenario(kind, seed_start, config_path)?;
    let seeds: Vec<u64> = (seed_start..seed_start.saturating_add(count)).collect();
    println!(
        "Running batch '{}' ({} scenes, seeds {}..{})...",
        scenario.name,
        seeds.len(),
        seed_start,
        seed_start.saturating_add(count)
    );

    let start = std::time::Instant::now();
    let (report, scenes) = match export_dir {
        Some(_) => run_batch_with_scenes(scenario.config.clone(), &seeds)?,
        None => (run_batch(scenario.config.clone(), &seeds)?, Vec::new()),
    };
    let elapsed = start.elapsed();
    let summary = &report.summary;

    for tally in [&summary.vehicles, &summary.pedestrians] {
        println!(
            "{:<11} mean {:.2}/scene, range [{}, {}], fulfillment {:.1}%",
            tally.kind.as_str(),
            summary.mean_placed(tally.kind),
            tally.min_placed.unwrap_or(0),
            tally.max_placed.unwrap_or(0),
            tally.fulfillment_rate() * 100.0
        );
    }
    println!(
        "Scatterers: mean {:.0}/scene; partial scenes: {}; violations: {}; elapsed={:.2}s",
        summary.mean_scatterers(),
        summary.partial_scenes,
        summary.violations,
        elapsed.as_secs_f64()
    );

    if let Some(dir) = export_dir {
        std::fs::create_dir_all(dir)?;
        for (i, scene) in scenes.iter().enumerate() {
            let path = dir.join(format!("scene_{:03}.json", i + 1));
            save_scene(&SceneExport::from_scene(scene, &scenario.config), &path)?;
        }
        info!(scenes = scenes.len(), dir = %dir.display(), "scene exports written");
        println!("Scenes saved to {}", dir.display());
    }

    if let Some(opath) = output_path {
        std::fs::write(opath, serde_json::to_string_pretty(&report)?)?;
        println!("Report saved to {}", opath.display());
    }

    Ok(())
}

fn run_inspect(input: &Path) -> Result<()> {
    let export = load_scene(input).with_context(|| format!("loading {}", input.display()))?;
    let report = inspect(&export);
    let counts = report.counts;

    println!("Scene {} ({})", report.scene_id, input.display());
    println!(
        "Objects: {} vehicles, {} pedestrians, {} lights, {} barrier discs",
        counts.vehicles, counts.pedestrians, counts.lights, counts.barrier_discs
    );
    let [v, b, l, p] = report.cloud_rows;
    println!(
        "Scatterers: {} (vehicles {}, barrier {}, lights {}, pedestrians {})",
        counts.scatterers, v, b, l, p
    );
    for issue in &report.inconsistencies {
        println!("inconsistent: {issue}");
    }
    for violation in &report.violations {
        println!("violation: {violation:?}");
    }

    if report.is_clean() {
        println!("OK: no collisions, counts consistent");
        Ok(())
    } else {
        anyhow::bail!(
            "{} inconsistencies, {} violations",
            report.inconsistencies.len(),
            report.violations.len()
        )
    }
}
