use super::params::Parameters;
use crate::gameplay::action::Action;
use crate::gameplay::game::Game;
use crate::{Chips, Error, Position};
use rand::Rng;

/// Which betting family a decision landed in. Policies that learn from
/// their decisions bucket them by family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Call,
    Raise,
}

/// Anything that can occupy a seat. The orchestrator binds each agent to a
/// position, notifies it at hand boundaries, and hands it the game exactly
/// once per turn; the agent must submit exactly one action before returning.
pub trait Agent {
    fn bind(&mut self, seat: Position);
    fn seat(&self) -> Position;

    /// chips held as the hand is dealt
    fn hand_start(&mut self, chips: Chips) {
        let _ = chips;
    }
    /// chips held after settlement
    fn hand_end(&mut self, chips: Chips) {
        let _ = chips;
    }

    fn decide(&mut self, game: &mut Game) -> Result<(), Error>;

    /// learned-state snapshot, for agents that carry one
    fn parameters(&self) -> Option<Parameters> {
        None
    }
    fn restore(&mut self, parameters: Parameters) {
        let _ = parameters;
    }
}

/// The orchestrator contract every policy checks before acting: a hand must
/// be live and it must actually be this seat's turn.
pub(crate) fn check_integrity(game: &Game, seat: Position) -> Result<(), Error> {
    if !game.is_hand_running() {
        Err(Error::Integrity(format!(
            "seat {} asked to act with no hand running",
            seat
        )))
    } else if game.actor() != seat {
        Err(Error::Integrity(format!(
            "seat {} asked to act on seat {}'s turn",
            seat,
            game.actor()
        )))
    } else {
        Ok(())
    }
}

/// Raise a uniformly random amount within `window` chips of the legal
/// minimum, capped by the stack. Falls back to a call or check when no
/// raise in the window is feasible.
pub(crate) fn raise_within<R: Rng>(
    game: &mut Game,
    window: Chips,
    rng: &mut R,
) -> Result<Family, Error> {
    let (min, stop) = game.raise_range();
    let max = (min + window).min(stop - 1);
    if min > max {
        return call_or_check(game).map(|_| Family::Call);
    }
    let chips = rng.gen_range(min..=max);
    if game.is_allowed(&Action::Raise(chips)) {
        game.take(Action::Raise(chips))?;
        Ok(Family::Raise)
    } else {
        Err(Error::Impossible("attempted raise is invalid"))
    }
}

pub(crate) fn call_or_check(game: &mut Game) -> Result<(), Error> {
    if game.is_allowed(&Action::Call) {
        game.take(Action::Call)
    } else if game.is_allowed(&Action::Check) {
        game.take(Action::Check)
    } else {
        Err(Error::Impossible("cannot call or check"))
    }
}
