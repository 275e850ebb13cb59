use anyhow::Result;
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use thresholdem::gameplay::Engine;
use thresholdem::players::{Adaptive, Agent, Gambler, Parameters};
use thresholdem::Chips;

/// Train a self-calibrating hold'em agent against coin-flip opponents.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// matches to play before saving
    #[arg(long, default_value_t = 10)]
    matches: usize,
    /// seats at the table; one learner, the rest fixed policy
    #[arg(long, default_value_t = 4)]
    seats: usize,
    #[arg(long, default_value_t = thresholdem::BUYIN)]
    buyin: Chips,
    #[arg(long, default_value_t = thresholdem::S_BLIND)]
    sblind: Chips,
    #[arg(long, default_value_t = thresholdem::B_BLIND)]
    bblind: Chips,
    /// hands of uniform exploration before thresholds engage
    #[arg(long, default_value_t = thresholdem::MATURITY)]
    maturity: usize,
    /// outcome ledger capacity
    #[arg(long, default_value_t = thresholdem::MAX_MEMORY)]
    memory: usize,
    /// rate of the exploration noise added to mature decisions
    #[arg(long, default_value_t = thresholdem::RATIONALITY)]
    rationality: f32,
    /// Monte Carlo trials per decision
    #[arg(long, default_value_t = thresholdem::SAMPLES)]
    samples: usize,
    /// seed every agent for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// resume from a previously saved parameter bundle
    #[arg(long)]
    load: Option<PathBuf>,
    /// where to write the learned parameter bundle
    #[arg(long, default_value = "parameters.json")]
    save: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    thresholdem::log();
    let params = match &args.load {
        Some(path) => serde_json::from_reader(File::open(path)?)?,
        None => Parameters {
            maturity: args.maturity,
            max_memory: args.memory,
            rationality: args.rationality,
            samples: args.samples,
            ..Parameters::default()
        },
    };
    let mut learner = Adaptive::from(params);
    if let Some(seed) = args.seed {
        learner = learner.with_seed(seed);
    }
    let mut agents: Vec<Box<dyn Agent>> = vec![Box::new(learner)];
    for i in 1..args.seats {
        agents.push(Box::new(match args.seed {
            Some(seed) => Gambler::seeded(seed + i as u64),
            None => Gambler::new(),
        }));
    }
    let mut engine = Engine::new(agents)?;
    engine.run_matches(args.matches, args.buyin, args.sblind, args.bblind)?;
    let bundle = engine
        .agents()
        .iter()
        .find_map(|agent| agent.parameters())
        .expect("the learner carries parameters");
    serde_json::to_writer_pretty(File::create(&args.save)?, &bundle)?;
    log::info!("parameters saved to {}", args.save.display());
    Ok(())
}
