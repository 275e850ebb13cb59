use crate::cards::board::Board;
use crate::cards::deck::Deck;
use crate::cards::hand::Hand;
use crate::cards::hole::Hole;
use crate::cards::strength::Strength;
use crate::{Metric, Probability};
use rand::Rng;

/// Monte Carlo equity sampler. Each trial completes the board to five
/// cards and deals every live opponent a pocket from the unseen remainder,
/// then compares showdown strengths. A trial counts as a win only when the
/// hero strictly beats every opponent; chops count as losses, so the
/// estimate is deliberately conservative.
#[derive(Debug, Clone)]
pub struct Estimator {
    samples: usize,
}

impl Estimator {
    pub fn new(samples: usize) -> Self {
        assert!(samples > 0, "at least one sample required");
        Self { samples }
    }
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// fraction of sampled showdowns the hero wins outright
    pub fn equity<R: Rng>(
        &self,
        hole: Hole,
        board: Board,
        rivals: usize,
        rng: &mut R,
    ) -> Probability {
        assert!(rivals > 0, "at least one live opponent required");
        let pocket = Hand::from(hole);
        let community = Hand::from(board);
        let known = Hand::add(pocket, community);
        let mut wins = 0usize;
        for _ in 0..self.samples {
            let mut deck = Deck::from(known.complement());
            let mut full = community;
            while full.size() < 5 {
                full.insert(deck.draw(rng));
            }
            let hero = Strength::from(Hand::add(pocket, full));
            let best = (0..rivals)
                .map(|_| Strength::from(Hand::add(Hand::from(deck.hole(rng)), full)))
                .max()
                .expect("at least one rival");
            if hero > best {
                wins += 1;
            }
        }
        wins as Probability / self.samples as Probability
    }

    /// equity centered on the `rivals + 1`-way chance level, in [-1, 1]
    pub fn metric<R: Rng>(&self, hole: Hole, board: Board, rivals: usize, rng: &mut R) -> Metric {
        self.equity(hole, board, rivals, rng) - 1.0 / (rivals as Metric + 1.0)
    }
}
