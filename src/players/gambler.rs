use super::player::{call_or_check, check_integrity, raise_within, Agent};
use crate::gameplay::game::Game;
use crate::{Error, Position, RAISE_WINDOW};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A coin-flip opponent: half the time it raises a small random amount,
/// half the time it calls or checks. It never folds. Useful as a fixed
/// baseline to train against.
pub struct Gambler {
    seat: Position,
    rng: SmallRng,
}

impl Default for Gambler {
    fn default() -> Self {
        Self::new()
    }
}

impl Gambler {
    pub fn new() -> Self {
        Self {
            seat: 0,
            rng: SmallRng::from_entropy(),
        }
    }
    pub fn seeded(seed: u64) -> Self {
        Self {
            seat: 0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Agent for Gambler {
    fn bind(&mut self, seat: Position) {
        self.seat = seat;
    }
    fn seat(&self) -> Position {
        self.seat
    }
    fn decide(&mut self, game: &mut Game) -> Result<(), Error> {
        check_integrity(game, self.seat)?;
        if self.rng.gen_bool(0.5) {
            raise_within(game, RAISE_WINDOW, &mut self.rng).map(|_| ())
        } else {
            call_or_check(game)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::seat::State;

    #[test]
    fn never_folds() {
        for seed in 0..20 {
            let mut game = Game::new(500, 2, 5, 2).with_seed(seed);
            game.start_hand().unwrap();
            let seat = game.actor();
            let mut gambler = Gambler::seeded(seed);
            gambler.bind(seat);
            gambler.decide(&mut game).unwrap();
            assert_ne!(game.seats()[seat].state(), State::Folding);
        }
    }

    #[test]
    fn acting_out_of_turn_is_integrity_error() {
        let mut game = Game::new(500, 2, 5, 2).with_seed(1);
        game.start_hand().unwrap();
        let mut gambler = Gambler::seeded(1);
        gambler.bind(1 - game.actor());
        assert!(matches!(
            gambler.decide(&mut game),
            Err(Error::Integrity(_))
        ));
    }
}
