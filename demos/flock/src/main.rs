//! flock — a standard self-propelled particle run after Vicsek et al.,
//! Phys. Rev. Lett. 75, 1226 (1995).
//!
//! Runs `--iterations` measurements of `--laps` steps each, printing the
//! order parameter after every measurement and recording it under
//! `<output>/spp_L-<W>_N-<N>_noise-<eta>/`.
//!
//! ```text
//! cargo run --release -p flock -- --grid-width 20 --agents 1600 --noise 0.5 --seed 7
//! RUST_LOG=debug cargo run -p flock -- --iterations 10
//! ```

use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use spp_core::{FlockConfig, FlockParams, Step};
use spp_output::{CsvWriter, FlockOutputObserver, OutputWriter};
use spp_sim::{Flock, FlockBuilder, FlockObserver, Frame};
use tracing::info;
use tracing_subscriber::EnvFilter;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Sqlite,
}

#[derive(Debug, Parser)]
#[command(name = "flock", version, about = "Standard SPP simulation based on Vicsek et al. (1995)")]
struct Cli {
    /// Width of the grid behind the system, in cells.
    #[arg(long, visible_alias = "system-size", default_value_t = FlockConfig::DEFAULT_GRID_WIDTH, allow_negative_numbers = true)]
    grid_width: i64,

    /// Number of agents in the flock.
    #[arg(long, visible_alias = "number-of-boids", default_value_t = FlockConfig::DEFAULT_AGENT_COUNT, allow_negative_numbers = true)]
    agents: i64,

    /// Magnitude of the angular noise, in radians.
    #[arg(long, default_value_t = FlockConfig::DEFAULT_NOISE_AMPLITUDE, allow_negative_numbers = true)]
    noise: f64,

    /// RNG seed.  Defaults to the current Unix time.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of order-parameter measurements.
    #[arg(long, default_value_t = 1_000)]
    iterations: u64,

    /// Steps between two measurements.
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    laps: u64,

    /// Record agent positions every N measurements (0 = never).
    #[arg(long, default_value_t = 0)]
    snapshot_every: u64,

    /// Directory the run directory is created in.
    #[arg(long, default_value = ".")]
    output: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Fail on out-of-range parameters instead of falling back to defaults.
    #[arg(long)]
    strict: bool,
}

impl Cli {
    fn to_config(&self) -> FlockConfig {
        FlockConfig {
            grid_width:        self.grid_width,
            agent_count:       self.agents,
            noise_amplitude:   self.noise,
            seed:              self.seed.unwrap_or_else(wall_clock_seed),
            total_steps:       self.iterations.saturating_mul(self.laps),
            measure_interval:  self.laps,
            snapshot_interval: self.snapshot_every.saturating_mul(self.laps),
            ..FlockConfig::default()
        }
    }
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// `spp_L-<W>_N-<N>_noise-<eta>`, from the parameters actually used.
fn run_dir_name(params: &FlockParams) -> String {
    format!(
        "spp_L-{}_N-{}_noise-{}",
        params.grid_width, params.agent_count, params.noise_amplitude
    )
}

// ── Console progress ──────────────────────────────────────────────────────────

/// Prints `t = i, v = value` per measurement and forwards every hook to the
/// output observer.
struct Progress<W: OutputWriter> {
    output: FlockOutputObserver<W>,
    laps:   u64,
}

impl<W: OutputWriter> FlockObserver for Progress<W> {
    fn on_measurement(&mut self, step: Step, order_parameter: f64) {
        let i = step.0 / self.laps - 1;
        println!("t = {i}, v = {order_parameter}");
        self.output.on_measurement(step, order_parameter);
    }

    fn on_snapshot(&mut self, step: Step, frame: &Frame<'_>) {
        self.output.on_snapshot(step, frame);
    }

    fn on_run_end(&mut self, final_step: Step) {
        self.output.on_run_end(final_step);
    }
}

fn run_with<W: OutputWriter>(flock: &mut Flock, writer: W, laps: u64) -> Result<()> {
    let mut progress = Progress {
        output: FlockOutputObserver::new(writer),
        laps,
    };
    flock.run(&mut progress);
    if let Some(e) = progress.output.take_error() {
        return Err(e).context("writing run output");
    }
    Ok(())
}

#[cfg(feature = "sqlite")]
fn run_sqlite(flock: &mut Flock, dir: &Path, laps: u64) -> Result<()> {
    run_with(flock, spp_output::SqliteWriter::new(dir)?, laps)
}

#[cfg(not(feature = "sqlite"))]
fn run_sqlite(_flock: &mut Flock, _dir: &Path, _laps: u64) -> Result<()> {
    anyhow::bail!("this binary was built without the `sqlite` feature")
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = cli.to_config();
    let mut flock = FlockBuilder::new(config)
        .strict(cli.strict)
        .build()
        .context("initializing flock")?;

    let dir = cli.output.join(run_dir_name(flock.params()));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;
    info!(dir = %dir.display(), seed = flock.params().seed, "writing run output");

    let t0 = Instant::now();
    match cli.format {
        Format::Csv    => run_with(&mut flock, CsvWriter::new(&dir)?, cli.laps)?,
        Format::Sqlite => run_sqlite(&mut flock, &dir, cli.laps)?,
    }

    info!(
        steps = flock.current_step().0,
        elapsed_s = t0.elapsed().as_secs_f64(),
        order = flock.order_parameter(),
        "run complete"
    );
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_flag_aliases_are_accepted() {
        let cli = Cli::try_parse_from([
            "flock", "--system-size", "20", "--number-of-boids", "400", "--noise", "0.5", "--seed", "3",
        ])
        .unwrap();
        assert_eq!((cli.grid_width, cli.agents, cli.noise, cli.seed), (20, 400, 0.5, Some(3)));
    }

    #[test]
    fn measurements_map_onto_steps() {
        let cli = Cli::try_parse_from([
            "flock", "--iterations", "10", "--laps", "50", "--snapshot-every", "2", "--seed", "1",
        ])
        .unwrap();
        let config = cli.to_config();
        assert_eq!(config.total_steps, 500);
        assert_eq!(config.measure_interval, 50);
        assert_eq!(config.snapshot_interval, 100);
    }

    #[test]
    fn zero_laps_rejected() {
        assert!(Cli::try_parse_from(["flock", "--laps", "0"]).is_err());
    }

    #[test]
    fn negative_values_reach_the_corrector() {
        let cli = Cli::try_parse_from(["flock", "--agents", "-4", "--seed", "0"]).unwrap();
        let (params, corrections) = cli.to_config().resolve();
        assert_eq!(params.agent_count, 100);
        assert_eq!(corrections.len(), 1);
    }

    #[test]
    fn run_dir_uses_resolved_parameters() {
        let config = FlockConfig { grid_width: 3, agent_count: 250, noise_amplitude: 0.5, ..FlockConfig::default() };
        let (params, _) = config.resolve();
        assert_eq!(run_dir_name(&params), "spp_L-10_N-250_noise-0.5");
    }
}
