use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use vs_sim::config::{load_config, save_config, RunConfig};
use vs_sim::Swarm;

/// Runs a small in-process swarm over a simulated virtual stigmergy bus.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of agents to simulate.
    #[arg(long)]
    agents: Option<u8>,

    /// Number of ticks to run.
    #[arg(long)]
    ticks: Option<u32>,

    /// Table capacity (VS_SIZE) each agent uses.
    #[arg(long)]
    vs_size: Option<u8>,

    /// Path to a saved run configuration (JSON). Loaded if present, written
    /// back with any CLI overrides applied.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path),
        None => RunConfig::default(),
    };
    if let Some(agents) = args.agents {
        config.agent_count = agents;
    }
    if let Some(ticks) = args.ticks {
        config.ticks = ticks;
    }
    if let Some(vs_size) = args.vs_size {
        config.vs_size = vs_size;
    }

    if let Some(path) = &args.config {
        if let Err(err) = save_config(path, &config) {
            eprintln!("failed to save run configuration: {err}");
        }
    }

    info!(?config, "starting virtual stigmergy simulation");

    let mut swarm = match Swarm::new(&config) {
        Ok(swarm) => swarm,
        Err(err) => {
            eprintln!("failed to build swarm: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = swarm.put(0, 5, 42) {
        eprintln!("failed to write initial tuple: {err}");
        std::process::exit(1);
    }
    swarm.run_ticks(config.ticks);

    for i in 0..config.agent_count as usize {
        let agent = swarm.agent(i);
        info!(
            agent = i,
            has_key_5 = agent.has(5),
            size = agent.size(),
            "final agent state"
        );
    }
}
