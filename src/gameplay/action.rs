use crate::Chips;
use colored::Colorize;
use std::fmt::{Display, Formatter, Result};

/// A betting decision an agent submits on its turn. Blind posting and card
/// dealing are engine-internal and never come through here. Raise amounts
/// are chips added on top of the actor's current street stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fold,
    Check,
    Call,
    Raise(Chips),
    Shove,
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Action::Fold => write!(f, "{}", "FOLD".red()),
            Action::Check => write!(f, "{}", "CHECK".cyan()),
            Action::Call => write!(f, "{}", "CALL".yellow()),
            Action::Raise(amount) => write!(f, "{}", format!("RAISE {}", amount).green()),
            Action::Shove => write!(f, "{}", "SHOVE".magenta()),
        }
    }
}
