// ─────────────────────────────────────────────────────────────────────
// FusionSim — Command-Line Driver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! `fusionsim`: load a configuration, run the simulation, write the final
//! population as CSV.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use fusion_core::particles::summarize_population;
use fusion_core::simulation::SimulationManager;
use fusion_core::snapshot::write_population_csv_file;
use fusion_types::config::{ReactionKind, SimulationConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "fusionsim")]
#[command(about = "N-body IEC fusor simulation with Monte-Carlo fusion sampling", long_about = None)]
struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Reaction channel (dd or dt)
    #[arg(long)]
    reaction: Option<ReactionKind>,

    /// Use the fusor field (true) or the Coulomb sphere map (false)
    #[arg(long)]
    fusor: Option<bool>,

    /// Total simulated time [s]
    #[arg(long, value_name = "SECONDS")]
    t_max: Option<f64>,

    /// Integration step [s]
    #[arg(long, value_name = "SECONDS")]
    dt: Option<f64>,

    /// Initial ion count
    #[arg(short = 'n', long)]
    particles: Option<usize>,

    /// Seeding temperature [K]
    #[arg(long, value_name = "KELVIN")]
    temperature: Option<f64>,

    /// Cathode potential [V]
    #[arg(long, value_name = "VOLTS", allow_hyphen_values = true)]
    voltage: Option<f64>,

    /// Chamber pressure [mbar]
    #[arg(long, value_name = "MBAR")]
    pressure: Option<f64>,

    /// Worker threads (default: hardware parallelism)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Enable grid/chamber thermal feedback
    #[arg(long)]
    thermal: Option<bool>,

    /// Ion number density used in the reaction probability [m^-3]
    #[arg(long, value_name = "M3")]
    density: Option<f64>,

    /// Pair-sampling collision radius [m]
    #[arg(long, value_name = "METRES")]
    collision_radius: Option<f64>,

    /// Master RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// CSV snapshot of the final population
    #[arg(short, long, default_value = "fusion_particles.csv")]
    output: PathBuf,

    /// Optional JSON run summary
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<SimulationConfig> {
        let mut cfg = match &self.config {
            Some(path) => {
                let path_str = path.to_string_lossy();
                SimulationConfig::from_file(&path_str)
                    .with_context(|| format!("loading config {}", path.display()))?
            }
            None => SimulationConfig::default(),
        };

        if let Some(v) = self.reaction {
            cfg.reaction = v;
        }
        if let Some(v) = self.fusor {
            cfg.fusor = v;
        }
        if let Some(v) = self.t_max {
            cfg.t_max_s = v;
        }
        if let Some(v) = self.dt {
            cfg.dt_s = v;
        }
        if let Some(v) = self.particles {
            cfg.particle_count = v;
        }
        if let Some(v) = self.temperature {
            cfg.temperature_k = v;
        }
        if let Some(v) = self.voltage {
            cfg.voltage_v = v;
        }
        if let Some(v) = self.pressure {
            cfg.pressure_mbar = v;
        }
        if self.threads.is_some() {
            cfg.threads = self.threads;
        }
        if let Some(v) = self.thermal {
            cfg.thermal = v;
        }
        if let Some(v) = self.density {
            cfg.particle_density_m3 = v;
        }
        if let Some(v) = self.collision_radius {
            cfg.collision_radius_m = v;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }

        cfg.validate().context("invalid configuration")?;
        Ok(cfg)
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.resolve_config()?;
    if cli.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let mut sim = SimulationManager::new(config).context("building simulation")?;
    if let Some(env) = sim.envelope() {
        log::info!(
            "operating envelope: mode {:?}, Paschen {:.0} V over {:.3} m, max ion energy {:.1} keV, grid equilibrium {:.0} K",
            env.operating_mode,
            env.paschen_breakdown_v,
            env.gap_m,
            env.max_ion_energy_kev,
            env.equilibrium_grid_temperature_k
        );
    }

    let summary = sim
        .run_with_observer(|r| {
            println!(
                "Progress: {:.1}% | t = {:.3e} s | particles: {} | reactions: {}",
                r.percent_complete, r.time_s, r.particle_count, r.reaction_count
            );
        })
        .context("simulation failed")?;

    println!(
        "Simulation complete: {} steps, {} reactions ({}), {} -> {} particles",
        summary.steps,
        summary.reaction_count,
        summary.reaction_name,
        summary.initial_particle_count,
        summary.final_particle_count
    );
    let population = summarize_population(sim.particles());
    log::info!(
        "final population: {} charged, {} neutral, mean energy {:.3} keV",
        population.charged_count,
        population.neutral_count,
        population.mean_kinetic_energy_kev
    );

    write_population_csv_file(&cli.output, sim.particles())
        .with_context(|| format!("writing snapshot {}", cli.output.display()))?;
    println!("Final particle data written to {}", cli.output.display());

    if let Some(path) = &cli.summary {
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing summary {}", path.display()))?;
    }
    Ok(())
}

/// Help and version requests succeed; any unparsable flag is a configuration error.
fn parse_error_status(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(parse_error_status(e.kind()));
        }
    };
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "fusionsim",
            "--reaction",
            "dt",
            "--voltage",
            "-40000",
            "-n",
            "12",
            "--seed",
            "5",
            "--thermal",
            "true",
        ]);
        let cfg = cli.resolve_config().unwrap();
        assert_eq!(cfg.reaction, ReactionKind::Dt);
        assert_eq!(cfg.voltage_v, -40_000.0);
        assert_eq!(cfg.particle_count, 12);
        assert_eq!(cfg.seed, Some(5));
        assert!(cfg.thermal);
        assert_eq!(cli.output, PathBuf::from("fusion_particles.csv"));
    }

    #[test]
    fn test_invalid_override_rejected() {
        let cli = Cli::parse_from(["fusionsim", "--dt", "0"]);
        let err = cli.resolve_config().expect_err("dt = 0 must fail");
        assert!(format!("{err:#}").contains("dt_s"));
    }

    #[test]
    fn test_unknown_reaction_exits_with_failure() {
        let err = Cli::try_parse_from(["fusionsim", "--reaction", "pb11"])
            .expect_err("pb11 is not a reaction channel");
        assert_eq!(parse_error_status(err.kind()), 1);

        let err = Cli::try_parse_from(["fusionsim", "--dt", "abc"]).expect_err("dt must be numeric");
        assert_eq!(parse_error_status(err.kind()), 1);
    }

    #[test]
    fn test_help_exits_with_success() {
        let err = Cli::try_parse_from(["fusionsim", "--help"]).expect_err("help short-circuits");
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(parse_error_status(err.kind()), 0);
    }

    #[test]
    fn test_config_file_then_flags() {
        let path = std::env::temp_dir().join(format!("fusionsim_cli_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "particle_count": 7, "fusor": false }"#).unwrap();
        let args: Vec<std::ffi::OsString> = vec![
            "fusionsim".into(),
            "--config".into(),
            path.clone().into_os_string(),
            "--particles".into(),
            "9".into(),
        ];
        let cli = Cli::parse_from(args);
        let cfg = cli.resolve_config().unwrap();
        assert!(!cfg.fusor);
        assert_eq!(cfg.particle_count, 9);
        let _ = std::fs::remove_file(&path);
    }
}
