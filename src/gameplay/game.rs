use super::action::Action;
use super::seat::{Seat, State};
use super::settlement::Settlement;
use super::showdown::Showdown;
use crate::cards::board::Board;
use crate::cards::deck::Deck;
use crate::cards::hand::Hand;
use crate::cards::hole::Hole;
use crate::cards::street::Street;
use crate::cards::strength::Strength;
use crate::{Chips, Error, Position};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// An N-player no-limit hold'em table. Sole authority on legality, betting
/// rounds, pots and side pots. Agents read it through narrow queries and
/// mutate it only by submitting one action on their own turn via [`take`].
///
/// [`take`]: Game::take
#[derive(Debug, Clone)]
pub struct Game {
    seats: Vec<Seat>,
    board: Board,
    pot: Chips,
    dealer: Position,
    actor: Position,
    /// seats still owed a voluntary action this street
    queue: usize,
    playing: bool,
    sblind: Chips,
    bblind: Chips,
    rng: SmallRng,
}

impl Game {
    pub fn new(buyin: Chips, sblind: Chips, bblind: Chips, n: usize) -> Self {
        assert!(n >= 2, "at least two seats required");
        assert!(0 < sblind && sblind <= bblind && bblind < buyin);
        Self {
            seats: vec![Seat::from(buyin); n],
            board: Board::empty(),
            pot: 0,
            dealer: 0,
            actor: 0,
            queue: 0,
            playing: false,
            sblind,
            bblind,
            rng: SmallRng::from_entropy(),
        }
    }
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }
    pub fn with_stacks(mut self, stacks: Vec<Chips>) -> Self {
        assert!(stacks.len() == self.seats.len());
        self.seats = stacks.into_iter().map(Seat::from).collect();
        self
    }

    //
    // queries consumed by agents and the orchestrator
    //

    /// two or more seats still hold chips
    pub fn is_match_running(&self) -> bool {
        self.playing || self.seats.iter().filter(|s| s.stack() > 0).count() >= 2
    }
    pub fn is_hand_running(&self) -> bool {
        self.playing
    }
    pub fn actor(&self) -> Position {
        assert!(self.playing, "no hand running");
        self.actor
    }
    pub fn pot(&self) -> Chips {
        self.pot
    }
    pub fn board(&self) -> Board {
        self.board
    }
    pub fn street(&self) -> Street {
        self.board.street()
    }
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }
    pub fn stack(&self, seat: Position) -> Chips {
        self.seats[seat].stack()
    }
    pub fn hole(&self, seat: Position) -> Hole {
        self.seats[seat].hole()
    }
    /// seats neither folded nor eliminated
    pub fn lives(&self) -> usize {
        self.survivors()
    }

    /// legal raise amounts: inclusive minimum, exclusive stop
    pub fn raise_range(&self) -> (Chips, Chips) {
        (self.to_raise(), self.to_shove() + 1)
    }

    pub fn is_allowed(&self, action: &Action) -> bool {
        if !self.playing {
            return false;
        }
        match action {
            Action::Fold => self.may_fold(),
            Action::Check => self.may_check(),
            Action::Call => self.may_call(),
            Action::Shove => self.may_shove(),
            Action::Raise(chips) => {
                self.may_raise() && *chips >= self.to_raise() && *chips <= self.to_shove()
            }
        }
    }

    //
    // hand lifecycle
    //

    /// deal a fresh hand: rotate the button, wipe the board, deal pockets,
    /// post blinds, and open the preflop betting round
    pub fn start_hand(&mut self) -> Result<(), Error> {
        if self.playing {
            return Err(Error::Integrity("a hand is already running".into()));
        }
        if !self.is_match_running() {
            return Err(Error::Integrity("match has ended".into()));
        }
        self.pot = 0;
        self.board.clear();
        for seat in self.seats.iter_mut() {
            seat.reset();
        }
        let n = self.seats.len();
        self.dealer = (1..=n)
            .map(|k| (self.dealer + k) % n)
            .find(|p| self.seats[*p].state() == State::Betting)
            .expect("at least two funded seats");
        let mut deck = Deck::new();
        for seat in self.seats.iter_mut() {
            if seat.state() == State::Betting {
                seat.set_hole(deck.hole(&mut self.rng));
            }
        }
        // clockwise from the button, button itself last
        let order = (1..=n)
            .map(|k| (self.dealer + k) % n)
            .filter(|p| self.seats[*p].state() == State::Betting)
            .collect::<Vec<Position>>();
        let (sblind, bblind) = match order.len() {
            2 => (self.dealer, order[0]),
            _ => (order[0], order[1]),
        };
        self.post(sblind, self.sblind);
        self.post(bblind, self.bblind);
        self.playing = true;
        self.queue = self.betting();
        log::debug!("hand dealt, button at seat {}", self.dealer);
        if self.queue == 0 {
            // blinds put everyone all in
            self.conclude();
        } else {
            let first = match order.len() {
                2 => sblind,
                _ => order[2],
            };
            self.actor = self.betting_from(first);
        }
        Ok(())
    }

    /// submit the actor's decision; the single mutating entry point
    pub fn take(&mut self, action: Action) -> Result<(), Error> {
        if !self.playing {
            return Err(Error::Integrity("no hand is running".into()));
        }
        if !self.is_allowed(&action) {
            return Err(Error::Illegal(format!("{} by seat {}", action, self.actor)));
        }
        log::debug!("seat {} {}", self.actor, action);
        match action {
            Action::Fold => {
                self.seats[self.actor].set_state(State::Folding);
                self.queue -= 1;
            }
            Action::Check => {
                self.queue -= 1;
            }
            Action::Call => {
                let call = self.to_call().min(self.to_shove());
                self.bet(call);
                self.queue -= 1;
            }
            Action::Raise(chips) => {
                self.aggress(chips);
            }
            Action::Shove => {
                self.aggress(self.to_shove());
            }
        }
        self.proceed();
        Ok(())
    }

    //
    // betting internals
    //

    fn bet(&mut self, chips: Chips) {
        self.pot += chips;
        let seat = &mut self.seats[self.actor];
        seat.bet(chips);
        if seat.stack() == 0 {
            seat.set_state(State::Shoving);
        }
    }

    /// a bet beyond the effective stake reopens the action; an all-in for
    /// less is just a call and does not
    fn aggress(&mut self, chips: Chips) {
        let reopens = self.seats[self.actor].stake() + chips > self.effective_stake();
        self.bet(chips);
        if reopens {
            self.queue = self
                .seats
                .iter()
                .enumerate()
                .filter(|(i, s)| *i != self.actor && s.state() == State::Betting)
                .count();
        } else {
            self.queue -= 1;
        }
    }

    fn proceed(&mut self) {
        if self.survivors() <= 1 {
            return self.conclude();
        }
        if self.queue > 0 {
            self.actor = self.betting_from((self.actor + 1) % self.seats.len());
            return;
        }
        if self.street() == Street::Rive {
            return self.conclude();
        }
        if self.betting() <= 1 {
            // nobody left who can bet: run the board out
            return self.conclude();
        }
        self.reveal();
        self.open_street();
    }

    fn open_street(&mut self) {
        for seat in self.seats.iter_mut() {
            seat.clear_stake();
        }
        self.queue = self.betting();
        self.actor = self.betting_from((self.dealer + 1) % self.seats.len());
    }

    /// deal the next street's community cards from the unseen remainder
    fn reveal(&mut self) {
        let mut deck = self.deck();
        for _ in 0..self.street().n_revealed() {
            let card = deck.draw(&mut self.rng);
            self.board.add(card);
        }
        log::debug!("{}: {}", self.street(), self.board);
    }

    fn conclude(&mut self) {
        while self.survivors() > 1 && self.street() != Street::Rive {
            self.reveal();
        }
        let settlements = Showdown::from(self.ledger()).settle();
        for (i, (seat, settlement)) in self
            .seats
            .iter_mut()
            .zip(settlements.iter())
            .enumerate()
        {
            seat.win(settlement.reward);
            log::trace!("seat {} {} {:>6}", i, seat, settlement.pnl());
        }
        self.playing = false;
        log::debug!("hand over: {}", self);
    }

    fn ledger(&self) -> Vec<Settlement> {
        self.seats
            .iter()
            .map(|seat| Settlement {
                reward: 0,
                risked: seat.spent(),
                status: seat.state(),
                strength: self.strength(seat),
            })
            .collect()
    }

    fn strength(&self, seat: &Seat) -> Option<Strength> {
        match seat.state() {
            State::Waiting => None,
            _ => Some(Strength::from(Hand::add(
                Hand::from(seat.hole()),
                Hand::from(self.board),
            ))),
        }
    }

    /// everything not visible on the board or dealt to a pocket
    pub fn deck(&self) -> Deck {
        let mut known = Hand::from(self.board);
        for seat in self.seats.iter() {
            known = Hand::add(known, Hand::from(seat.hole()));
        }
        Deck::from(known.complement())
    }

    fn post(&mut self, seat: Position, blind: Chips) {
        let chips = blind.min(self.seats[seat].stack());
        self.pot += chips;
        self.seats[seat].bet(chips);
        if self.seats[seat].stack() == 0 {
            self.seats[seat].set_state(State::Shoving);
        }
    }

    //
    // counting and position helpers
    //

    fn survivors(&self) -> usize {
        self.seats
            .iter()
            .filter(|s| matches!(s.state(), State::Betting | State::Shoving))
            .count()
    }
    fn betting(&self) -> usize {
        self.seats
            .iter()
            .filter(|s| s.state() == State::Betting)
            .count()
    }
    fn betting_from(&self, start: Position) -> Position {
        let n = self.seats.len();
        (0..n)
            .map(|k| (start + k) % n)
            .find(|p| self.seats[*p].state() == State::Betting)
            .expect("a betting seat exists")
    }

    fn effective_stake(&self) -> Chips {
        self.seats
            .iter()
            .map(|s| s.stake())
            .max()
            .expect("non-empty seats")
    }

    //
    // legality
    //

    fn may_fold(&self) -> bool {
        self.to_call() > 0
    }
    fn may_check(&self) -> bool {
        self.to_call() == 0
    }
    fn may_call(&self) -> bool {
        self.to_call() > 0
    }
    fn may_raise(&self) -> bool {
        self.to_raise() <= self.to_shove()
    }
    fn may_shove(&self) -> bool {
        self.to_shove() > 0
    }

    pub fn to_call(&self) -> Chips {
        self.effective_stake() - self.seats[self.actor].stake()
    }
    pub fn to_shove(&self) -> Chips {
        self.seats[self.actor].stack()
    }
    /// minimum legal raise: match the largest stake, then raise by at least
    /// the last raise increment or the big blind
    pub fn to_raise(&self) -> Chips {
        let (most, next) = self
            .seats
            .iter()
            .filter(|s| s.state() != State::Folding)
            .map(|s| s.stake())
            .fold((0, 0), |(most, next), stake| {
                if stake > most {
                    (stake, most)
                } else if stake > next {
                    (most, stake)
                } else {
                    (most, next)
                }
            });
        let relative = most - self.seats[self.actor].stake();
        let marginal = most - next;
        relative + marginal.max(self.bblind)
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use colored::Colorize;
        for seat in self.seats.iter() {
            write!(f, "{}", seat)?;
        }
        write!(
            f,
            "{}",
            format!(" @ {:>6} {} {}", self.pot, self.board, self.street()).bright_green()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkdown(game: &mut Game) {
        while game.is_hand_running() {
            if game.is_allowed(&Action::Check) {
                game.take(Action::Check).unwrap();
            } else {
                game.take(Action::Call).unwrap();
            }
        }
    }

    #[test]
    fn blinds_posted() {
        let mut game = Game::new(500, 2, 5, 3).with_seed(7);
        game.start_hand().unwrap();
        assert_eq!(game.pot(), 7);
        assert_eq!(game.street(), Street::Pref);
        assert!(game.is_hand_running());
        assert_eq!(game.seats()[game.actor()].state(), State::Betting);
    }

    #[test]
    fn preflop_min_raise_matches_and_raises_a_blind() {
        let mut game = Game::new(500, 2, 5, 3).with_seed(7);
        game.start_hand().unwrap();
        // first to act owes the big blind plus at least another big blind
        assert_eq!(game.to_call(), 5);
        assert_eq!(game.raise_range().0, 10);
    }

    #[test]
    fn checkdown_reaches_showdown_and_conserves_chips() {
        let mut game = Game::new(500, 2, 5, 4).with_seed(11);
        game.start_hand().unwrap();
        checkdown(&mut game);
        assert!(!game.is_hand_running());
        assert_eq!(game.street(), Street::Rive);
        assert_eq!(game.seats().iter().map(|s| s.stack()).sum::<Chips>(), 2000);
    }

    #[test]
    fn instant_fold_awards_blinds() {
        let mut game = Game::new(500, 2, 5, 2).with_seed(3);
        game.start_hand().unwrap();
        let small = game.actor(); // heads up: button posts small and acts first
        game.take(Action::Fold).unwrap();
        assert!(!game.is_hand_running());
        assert_eq!(game.stack(small), 498);
        assert_eq!(game.stack(1 - small), 502);
    }

    #[test]
    fn raise_reopens_action() {
        let mut game = Game::new(500, 2, 5, 3).with_seed(5);
        game.start_hand().unwrap();
        let min = game.raise_range().0;
        game.take(Action::Raise(min)).unwrap();
        // both remaining players owe a response
        assert!(game.is_hand_running());
        assert_eq!(game.street(), Street::Pref);
        game.take(Action::Call).unwrap();
        game.take(Action::Call).unwrap();
        assert_eq!(game.street(), Street::Flop);
    }

    #[test]
    fn illegal_check_is_rejected() {
        let mut game = Game::new(500, 2, 5, 3).with_seed(5);
        game.start_hand().unwrap();
        // facing the big blind, check is not available
        assert!(matches!(
            game.take(Action::Check),
            Err(Error::Illegal(_))
        ));
    }

    #[test]
    fn action_out_of_hand_is_integrity_error() {
        let mut game = Game::new(500, 2, 5, 2);
        assert!(matches!(
            game.take(Action::Check),
            Err(Error::Integrity(_))
        ));
    }

    #[test]
    fn short_stack_all_in_builds_side_pot() {
        let mut game = Game::new(500, 2, 5, 3)
            .with_stacks(vec![60, 500, 500])
            .with_seed(13);
        game.start_hand().unwrap();
        // seat 0 shoves when its turn comes, others call everything
        while game.is_hand_running() {
            if game.actor() == 0 && game.is_allowed(&Action::Shove) {
                game.take(Action::Shove).unwrap();
            } else if game.is_allowed(&Action::Check) {
                game.take(Action::Check).unwrap();
            } else {
                game.take(Action::Call).unwrap();
            }
        }
        assert_eq!(game.seats().iter().map(|s| s.stack()).sum::<Chips>(), 1060);
    }

    #[test]
    fn busted_seat_sits_out_next_hand() {
        let mut game = Game::new(500, 2, 5, 3)
            .with_stacks(vec![0, 500, 500])
            .with_seed(17);
        game.start_hand().unwrap();
        assert_eq!(game.seats()[0].state(), State::Waiting);
        checkdown(&mut game);
        assert_eq!(game.stack(0), 0);
    }

    #[test]
    fn match_ends_when_one_stack_remains() {
        let game = Game::new(500, 2, 5, 2).with_stacks(vec![1000, 0]);
        assert!(!game.is_match_running());
    }
}
