//! Self-calibrating No-Limit Texas Hold'em agents.
//!
//! The interesting part of this crate lives in [`players`]: a Monte Carlo
//! hand-strength estimator and an agent that learns two decision boundaries
//! (fold/call and call/raise) from its own realized outcomes. The [`cards`]
//! and [`gameplay`] modules provide the deck, showdown evaluation, and the
//! table that drives agents hand by hand.

pub mod cards;
pub mod gameplay;
pub mod players;

/// Stack sizes, bet amounts, and outcome deltas.
pub type Chips = i32;
/// Seat index around the table.
pub type Position = usize;
/// Win-rate fractions and sampling weights.
pub type Probability = f32;
/// The offset-adjusted strength estimate that decisions are thresholded on.
pub type Metric = f32;

/// Random instance generation for testing and Monte Carlo sampling.
pub trait Arbitrary {
    fn random() -> Self;
}

/// Default chips each seat buys in for.
pub const BUYIN: Chips = 500;
/// Default small blind.
pub const S_BLIND: Chips = 2;
/// Default big blind.
pub const B_BLIND: Chips = 5;

/// Hands an agent plays before it stops acting uniformly at random.
pub const MATURITY: usize = 1000;
/// Capacity cap for each outcome ledger.
pub const MAX_MEMORY: usize = 10_000;
/// Rate of the one-sided exponential bias added to the metric (mean 1/rate).
pub const RATIONALITY: f32 = 20.0;
/// Monte Carlo trials per hand-strength estimate.
pub const SAMPLES: usize = 1000;
/// Raise sizing window above the legal minimum once mature.
pub const RAISE_WINDOW: Chips = 10;
/// Smaller probe window used while exploring before maturity.
pub const PROBE_WINDOW: Chips = 5;

/// Failure taxonomy. Nothing here is transient: every variant is a broken
/// caller contract and is propagated unmodified, never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Orchestrator bug: no game bound, no hand running, out of turn,
    /// or too few agents to seat a table.
    Integrity(String),
    /// The engine rejected a submitted action outright.
    Illegal(String),
    /// The policy believed an action legal and the engine disagreed.
    Impossible(&'static str),
    /// Unknown name or malformed value in parameter get/set.
    Parameter(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Integrity(msg) => write!(f, "integrity violation: {}", msg),
            Self::Illegal(msg) => write!(f, "illegal action: {}", msg),
            Self::Impossible(msg) => write!(
                f,
                "{} (this should be impossible, the engine and policy disagree on legality)",
                msg
            ),
            Self::Parameter(msg) => write!(f, "parameter error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` and writes DEBUG level to file, INFO to terminal.
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
