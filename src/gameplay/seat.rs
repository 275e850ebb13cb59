use crate::cards::hole::Hole;
use crate::Chips;
use colored::Colorize;

/// Where a seat stands within the current hand. `Waiting` seats busted
/// before the hand was dealt and are skipped entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Betting,
    Shoving,
    Folding,
    Waiting,
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            State::Betting => write!(f, "B"),
            State::Shoving => write!(f, "{}", "S".magenta()),
            State::Folding => write!(f, "{}", "F".red()),
            State::Waiting => write!(f, "{}", "W".dimmed()),
        }
    }
}

/// One position at the table: chips behind, chips staked this street,
/// chips spent this hand, private cards, and hand status.
#[derive(Debug, Clone, Copy)]
pub struct Seat {
    stack: Chips,
    stake: Chips,
    spent: Chips,
    hole: Hole,
    state: State,
}

impl From<Chips> for Seat {
    fn from(stack: Chips) -> Self {
        Self {
            stack,
            stake: 0,
            spent: 0,
            hole: Hole::empty(),
            state: State::Betting,
        }
    }
}

impl Seat {
    pub fn stack(&self) -> Chips {
        self.stack
    }
    pub fn stake(&self) -> Chips {
        self.stake
    }
    pub fn spent(&self) -> Chips {
        self.spent
    }
    pub fn hole(&self) -> Hole {
        self.hole
    }
    pub fn state(&self) -> State {
        self.state
    }

    /// move chips from behind into the pot
    pub fn bet(&mut self, chips: Chips) {
        assert!(chips <= self.stack);
        self.stack -= chips;
        self.stake += chips;
        self.spent += chips;
    }
    pub fn win(&mut self, chips: Chips) {
        self.stack += chips;
    }

    pub fn set_state(&mut self, state: State) {
        self.state = state;
    }
    pub fn set_hole(&mut self, hole: Hole) {
        self.hole = hole;
    }
    pub fn clear_stake(&mut self) {
        self.stake = 0;
    }
    /// fresh hand: cards wiped, nothing staked or spent yet
    pub fn reset(&mut self) {
        self.stake = 0;
        self.spent = 0;
        self.hole = Hole::empty();
        self.state = if self.stack > 0 {
            State::Betting
        } else {
            State::Waiting
        };
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{:<6}", self.state, self.stack)
    }
}
