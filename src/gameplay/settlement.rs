use super::seat::State;
use crate::cards::strength::Strength;
use crate::Chips;

/// One seat's line in the end-of-hand accounting: what it put in, how it
/// finished, and what came back. Strength is absent for seats that were
/// never dealt in.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub reward: Chips,
    pub risked: Chips,
    pub status: State,
    pub strength: Option<Strength>,
}

impl Settlement {
    pub fn pnl(&self) -> Chips {
        self.reward - self.risked
    }
    /// still in contention at showdown
    pub fn contends(&self) -> bool {
        matches!(self.status, State::Betting | State::Shoving)
    }
}

impl std::fmt::Display for Settlement {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use colored::Colorize;
        let pnl = self.pnl();
        let chips = format!("{:>+5}", pnl);
        match pnl {
            x if x > 0 => write!(f, "{}", chips.green()),
            x if x < 0 => write!(f, "{}", chips.red()),
            _ => write!(f, "{}", chips.dimmed()),
        }
    }
}
