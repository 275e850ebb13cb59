use super::game::Game;
use crate::players::player::Agent;
use crate::{Chips, Error};

/// Safety valve against matches that never converge to a single stack.
const HAND_CAP: usize = 10_000;

/// Runs matches between a table of agents. Owns the [`Game`] and relays
/// lifecycle notifications; agents act on the game directly when it is
/// their turn.
pub struct Engine {
    game: Option<Game>,
    agents: Vec<Box<dyn Agent>>,
    hands: usize,
}

impl Engine {
    pub fn new(agents: Vec<Box<dyn Agent>>) -> Result<Self, Error> {
        if agents.len() < 2 {
            return Err(Error::Integrity(format!(
                "a match requires at least two agents, got {}",
                agents.len()
            )));
        }
        Ok(Self {
            game: None,
            agents,
            hands: 0,
        })
    }

    pub fn agents(&self) -> &[Box<dyn Agent>] {
        &self.agents
    }
    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    /// seat everyone with a fresh stack
    pub fn start(&mut self, buyin: Chips, sblind: Chips, bblind: Chips) {
        for (seat, agent) in self.agents.iter_mut().enumerate() {
            agent.bind(seat);
        }
        self.game = Some(Game::new(buyin, sblind, bblind, self.agents.len()));
        log::info!(
            "match started: {} seats, {} buyin, {}/{} blinds",
            self.agents.len(),
            buyin,
            sblind,
            bblind
        );
    }

    /// play a single hand start to finish
    pub fn run_hand(&mut self) -> Result<(), Error> {
        let game = self
            .game
            .as_mut()
            .ok_or_else(|| Error::Integrity("no match started".into()))?;
        if !game.is_match_running() {
            return Err(Error::Integrity("match has ended".into()));
        }
        if game.is_hand_running() {
            return Err(Error::Integrity("a hand is already running".into()));
        }
        let before = (0..self.agents.len())
            .map(|seat| game.stack(seat))
            .collect::<Vec<Chips>>();
        game.start_hand()?;
        for (seat, agent) in self.agents.iter_mut().enumerate() {
            agent.hand_start(before[seat]);
        }
        while game.is_hand_running() {
            let actor = game.actor();
            self.agents[actor].decide(game)?;
        }
        for (seat, agent) in self.agents.iter_mut().enumerate() {
            agent.hand_end(game.stack(seat));
        }
        self.hands += 1;
        Ok(())
    }

    /// play hands until one agent holds every chip
    pub fn run_match(&mut self, buyin: Chips, sblind: Chips, bblind: Chips) -> Result<(), Error> {
        self.start(buyin, sblind, bblind);
        let mut hands = 0;
        while self.game.as_ref().expect("match started").is_match_running() {
            self.run_hand()?;
            hands += 1;
            if hands >= HAND_CAP {
                log::warn!("match abandoned after {} hands", hands);
                break;
            }
        }
        let game = self.game.as_ref().expect("match started");
        log::info!(
            "match over after {} hands, stacks: {:?}",
            hands,
            (0..self.agents.len())
                .map(|seat| game.stack(seat))
                .collect::<Vec<Chips>>()
        );
        Ok(())
    }

    pub fn run_matches(
        &mut self,
        count: usize,
        buyin: Chips,
        sblind: Chips,
        bblind: Chips,
    ) -> Result<(), Error> {
        for i in 0..count {
            log::info!("match {} of {}", i + 1, count);
            self.run_match(buyin, sblind, bblind)?;
        }
        log::info!("{} hands played in total", self.hands);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::gambler::Gambler;

    fn table(n: usize) -> Vec<Box<dyn Agent>> {
        (0..n)
            .map(|i| Box::new(Gambler::seeded(i as u64)) as Box<dyn Agent>)
            .collect()
    }

    #[test]
    fn rejects_solo_table() {
        assert!(matches!(Engine::new(table(1)), Err(Error::Integrity(_))));
    }

    #[test]
    fn hand_before_start_is_integrity_error() {
        let mut engine = Engine::new(table(2)).unwrap();
        assert!(matches!(engine.run_hand(), Err(Error::Integrity(_))));
    }

    #[test]
    fn hand_conserves_chips() {
        let mut engine = Engine::new(table(3)).unwrap();
        engine.start(500, 2, 5);
        engine.run_hand().unwrap();
        let game = engine.game().unwrap();
        let total = (0..3).map(|seat| game.stack(seat)).sum::<Chips>();
        assert_eq!(total, 1500);
    }

    #[test]
    fn match_runs_to_completion() {
        let mut engine = Engine::new(table(2)).unwrap();
        engine.run_match(100, 2, 5).unwrap();
        let game = engine.game().unwrap();
        assert!(!game.is_hand_running());
    }
}
