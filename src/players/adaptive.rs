use super::estimator::Estimator;
use super::ledger::Ledger;
use super::params::Parameters;
use super::player::{call_or_check, check_integrity, raise_within, Agent, Family};
use crate::gameplay::action::Action;
use crate::gameplay::game::Game;
use crate::{Chips, Error, Metric, Position, PROBE_WINDOW, RAISE_WINDOW};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A self-calibrating two-threshold policy. Every decision is scored by a
/// Monte Carlo equity metric; while young it plays coin-flip poker to seed
/// its ledgers with unbiased observations, and once mature it folds below
/// `b1`, calls between the bounds, and raises above `b2`, with the bounds
/// recomputed each hand from the most profitable cutoffs in its history.
/// A noise term with tunable rationality keeps the mature policy from
/// freezing into a deterministic line.
pub struct Adaptive {
    seat: Position,
    adaptive: bool,
    maturity: usize,
    max_memory: usize,
    rationality: f32,
    estimator: Estimator,
    age: usize,
    b1: Metric,
    b2: Metric,
    calls: Ledger,
    raises: Ledger,
    call_recents: Vec<Metric>,
    raise_recents: Vec<Metric>,
    start_chips: Chips,
    rng: SmallRng,
}

impl Default for Adaptive {
    fn default() -> Self {
        Self::new()
    }
}

impl Adaptive {
    pub fn new() -> Self {
        Self::from(Parameters::default())
    }
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    pub fn age(&self) -> usize {
        self.age
    }
    pub fn bounds(&self) -> (Metric, Metric) {
        (self.b1, self.b2)
    }
    fn mature(&self) -> bool {
        self.age >= self.maturity
    }

    /// optimism noise, exponentially distributed with mean `1/rationality`
    fn bias(&mut self) -> Metric {
        -(1.0 - self.rng.gen::<f32>()).ln() / self.rationality
    }

    /// move each bound to the most profitable cutoff its ledger has seen
    fn calibrate(&mut self) {
        if let Some(b1) = self.calls.optimize() {
            self.b1 = b1;
        }
        if let Some(b2) = self.raises.optimize() {
            self.b2 = b2;
        }
        log::trace!("seat {} bounds ({:.3}, {:.3})", self.seat, self.b1, self.b2);
    }

    /// mature play: thresholds on the noised metric, raw metric recorded
    fn exploit(&mut self, game: &mut Game, metric: Metric) -> Result<(), Error> {
        let biased = metric + self.bias();
        if biased < self.b1 {
            // with no bet to call, folding is strictly worse than the free
            // check the engine offers instead
            if game.is_allowed(&Action::Fold) {
                game.take(Action::Fold)
            } else if game.is_allowed(&Action::Check) {
                game.take(Action::Check)
            } else {
                Err(Error::Impossible("cannot fold or check"))
            }
        } else if biased < self.b2 {
            call_or_check(game)?;
            self.call_recents.push(metric);
            Ok(())
        } else {
            match raise_within(game, RAISE_WINDOW, &mut self.rng)? {
                Family::Raise => self.raise_recents.push(metric),
                Family::Call => self.call_recents.push(metric),
            }
            Ok(())
        }
    }

    /// immature play: coin-flip between a small probing raise and a call,
    /// never a fold, so every observation gets an outcome
    fn explore(&mut self, game: &mut Game, metric: Metric) -> Result<(), Error> {
        let family = if self.rng.gen_bool(0.5) {
            raise_within(game, PROBE_WINDOW, &mut self.rng)?
        } else {
            call_or_check(game).map(|_| Family::Call)?
        };
        match family {
            Family::Raise => self.raise_recents.push(metric),
            Family::Call => self.call_recents.push(metric),
        }
        Ok(())
    }
}

impl From<Parameters> for Adaptive {
    fn from(params: Parameters) -> Self {
        Self {
            seat: 0,
            adaptive: params.adaptive,
            maturity: params.maturity,
            max_memory: params.max_memory,
            rationality: params.rationality,
            estimator: Estimator::new(params.samples),
            age: params.age,
            b1: params.b1,
            b2: params.b2,
            calls: params.calls,
            raises: params.raises,
            call_recents: Vec::new(),
            raise_recents: Vec::new(),
            start_chips: 0,
            rng: SmallRng::from_entropy(),
        }
    }
}

impl From<&Adaptive> for Parameters {
    fn from(agent: &Adaptive) -> Self {
        Self {
            b1: agent.b1,
            b2: agent.b2,
            adaptive: agent.adaptive,
            age: agent.age,
            maturity: agent.maturity,
            max_memory: agent.max_memory,
            rationality: agent.rationality,
            samples: agent.estimator.samples(),
            calls: agent.calls.clone(),
            raises: agent.raises.clone(),
        }
    }
}

impl Agent for Adaptive {
    fn bind(&mut self, seat: Position) {
        self.seat = seat;
    }
    fn seat(&self) -> Position {
        self.seat
    }

    fn hand_start(&mut self, chips: Chips) {
        self.start_chips = chips;
        if self.adaptive && self.mature() {
            self.calibrate();
        }
    }

    fn hand_end(&mut self, chips: Chips) {
        if self.adaptive {
            let outcome = chips - self.start_chips;
            self.calls
                .log(&self.call_recents, outcome, self.max_memory, &mut self.rng);
            self.raises
                .log(&self.raise_recents, outcome, self.max_memory, &mut self.rng);
        }
        self.call_recents.clear();
        self.raise_recents.clear();
        self.age += 1;
    }

    fn decide(&mut self, game: &mut Game) -> Result<(), Error> {
        check_integrity(game, self.seat)?;
        let rivals = game.lives() - 1;
        let metric = self
            .estimator
            .metric(game.hole(self.seat), game.board(), rivals, &mut self.rng);
        if self.mature() {
            self.exploit(game, metric)
        } else {
            self.explore(game, metric)
        }
    }

    fn parameters(&self) -> Option<Parameters> {
        Some(Parameters::from(self))
    }

    fn restore(&mut self, parameters: Parameters) {
        let seat = self.seat;
        let rng = self.rng.clone();
        *self = Self::from(parameters);
        self.seat = seat;
        self.rng = rng;
    }
}
