use super::evaluator::Evaluator;
use super::hand::Hand;
use super::kicks::Kickers;
use super::ranking::Ranking;

/// A hand's total showdown value: shape first, kickers as tiebreak.
/// Strictly greater means strictly stronger; equality is a chopped pot.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Strength {
    ranking: Ranking,
    kicks: Kickers,
}

impl Strength {
    pub fn ranking(&self) -> Ranking {
        self.ranking
    }
}

impl From<(Ranking, Kickers)> for Strength {
    fn from((ranking, kicks): (Ranking, Kickers)) -> Self {
        Self { ranking, kicks }
    }
}

impl From<Hand> for Strength {
    fn from(hand: Hand) -> Self {
        Evaluator::from(hand).strength()
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<18}", self.ranking)
    }
}
