use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;

use asteroid_belt_simulator::{
    IntegrationPolicy, LogSink, Report, SimulationConfig, StellarSystem,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    Snapshot,
    Sequential,
}

impl From<Policy> for IntegrationPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Snapshot => IntegrationPolicy::Snapshot,
            Policy::Sequential => IntegrationPolicy::Sequential,
        }
    }
}

/// Headless asteroid belt simulation. Statistics are written to the log.
#[derive(Parser, Debug)]
struct Args {
    /// YAML file overriding the default configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Stop after this many ticks
    #[arg(short, long, default_value_t = 1000)]
    ticks: u64,

    /// Overrides the integration policy of the configuration
    #[arg(short, long, value_enum)]
    policy: Option<Policy>,

    /// Log the statistics every n ticks
    #[arg(short, long, default_value_t = 100)]
    report_every: u64,
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_path(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(policy) = args.policy {
        config.integration = policy.into();
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = load_config(&args)?;

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut system = StellarSystem::new(config, &mut rng)?;
    let mut sink = LogSink::new(args.report_every);
    let ticks = system.run(Some(args.ticks), &mut rng, &mut sink)?;
    system.stop();

    log::info!(
        "finished after {} ticks, {:.2} years simulated\n{}",
        ticks,
        system.years_elapsed(),
        Report {
            tick: system.tick(),
            years_elapsed: system.years_elapsed(),
            statistics: system.statistics(),
        }
    );
    Ok(())
}
