use crate::{Chips, Metric};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The outcome history for one betting family: a paired list of decision
/// metrics and the chip swings of the hands they occurred in, kept sorted
/// ascending by metric. Bounded by uniform random eviction so old and new
/// observations alike survive with equal odds.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    metrics: Vec<Metric>,
    outcomes: Vec<Chips>,
}

impl Ledger {
    pub fn len(&self) -> usize {
        self.metrics.len()
    }
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }
    pub fn outcomes(&self) -> &[Chips] {
        &self.outcomes
    }

    /// append one hand's decisions, each paired with the hand's shared
    /// outcome, restore metric order, then evict down to `cap`
    pub fn log<R: Rng>(&mut self, recents: &[Metric], outcome: Chips, cap: usize, rng: &mut R) {
        self.metrics.extend_from_slice(recents);
        self.outcomes.extend(std::iter::repeat(outcome).take(recents.len()));
        self.sort();
        self.evict(cap, rng);
    }

    fn sort(&mut self) {
        let mut order = (0..self.metrics.len()).collect::<Vec<usize>>();
        order.sort_by(|&a, &b| self.metrics[a].total_cmp(&self.metrics[b]));
        self.metrics = order.iter().map(|&i| self.metrics[i]).collect();
        self.outcomes = order.iter().map(|&i| self.outcomes[i]).collect();
    }

    fn evict<R: Rng>(&mut self, cap: usize, rng: &mut R) {
        if self.metrics.len() <= cap {
            return;
        }
        let excess = self.metrics.len() - cap;
        let mut doomed = rand::seq::index::sample(rng, self.metrics.len(), excess).into_vec();
        doomed.sort_unstable();
        let keep = |i: &usize| doomed.binary_search(i).is_err();
        self.metrics = std::mem::take(&mut self.metrics)
            .into_iter()
            .enumerate()
            .filter(|(i, _)| keep(i))
            .map(|(_, m)| m)
            .collect();
        self.outcomes = std::mem::take(&mut self.outcomes)
            .into_iter()
            .enumerate()
            .filter(|(i, _)| keep(i))
            .map(|(_, o)| o)
            .collect();
    }

    /// the metric whose suffix (itself and everything above it) has the
    /// greatest total outcome, i.e. the most profitable lower cutoff seen
    /// so far; lowest such metric on ties, None before any observation
    pub fn optimize(&self) -> Option<Metric> {
        if self.metrics.is_empty() {
            return None;
        }
        let mut best = 0;
        let mut sum = 0;
        let mut top = Chips::MIN;
        for i in (0..self.outcomes.len()).rev() {
            sum += self.outcomes[i];
            if sum >= top {
                top = sum;
                best = i;
            }
        }
        Some(self.metrics[best])
    }
}
