use super::card::Card;
use super::hand::Hand;
use super::hole::Hole;
use rand::Rng;

/// The cards still unseen from some point of view. Draws are uniform
/// without replacement: selecting the i-th set bit of the remaining mask
/// is equivalent to rejection-sampling the 52-card domain until an unseen
/// card comes up, without the wasted draws.
#[derive(Debug, Clone, Copy)]
pub struct Deck(Hand);

impl Deck {
    /// all 52 cards
    pub fn new() -> Self {
        Self(Hand::from(Hand::mask()))
    }

    pub fn size(&self) -> usize {
        self.0.size()
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.0.contains(card)
    }
    pub fn remove(&mut self, card: Card) {
        self.0.remove(card);
    }

    /// remove and return a uniformly random card
    pub fn draw<R: Rng>(&mut self, rng: &mut R) -> Card {
        assert!(self.size() > 0);
        let i = rng.gen_range(0..self.size());
        let mut bits = u64::from(self.0);
        for _ in 0..i {
            bits &= bits - 1;
        }
        let card = Card::from(bits.trailing_zeros() as u8);
        self.remove(card);
        card
    }

    /// remove and return two cards as a pocket
    pub fn hole<R: Rng>(&mut self, rng: &mut R) -> Hole {
        let a = self.draw(rng);
        let b = self.draw(rng);
        Hole::from((a, b))
    }
}

/// a deck is just a hand we take cards out of; usually built from the
/// complement of everything already visible
impl From<Hand> for Deck {
    fn from(hand: Hand) -> Self {
        Self(hand)
    }
}
impl From<Deck> for Hand {
    fn from(deck: Deck) -> Self {
        deck.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn draws_are_distinct_and_exhaustive() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut deck = Deck::new();
        let mut seen = Hand::empty();
        for _ in 0..52 {
            seen.insert(deck.draw(&mut rng));
        }
        assert_eq!(seen.size(), 52);
        assert_eq!(deck.size(), 0);
    }

    #[test]
    fn draws_respect_exclusions() {
        let mut rng = SmallRng::seed_from_u64(1);
        let known = Hand::try_from("Ac Kc Qc 2d 7h").unwrap();
        let mut deck = Deck::from(known.complement());
        for _ in 0..47 {
            let card = deck.draw(&mut rng);
            assert!(!known.contains(&card));
        }
    }

    #[test]
    fn seeded_draws_are_deterministic() {
        let a: Vec<Card> = {
            let mut rng = SmallRng::seed_from_u64(42);
            let mut deck = Deck::new();
            (0..10).map(|_| deck.draw(&mut rng)).collect()
        };
        let b: Vec<Card> = {
            let mut rng = SmallRng::seed_from_u64(42);
            let mut deck = Deck::new();
            (0..10).map(|_| deck.draw(&mut rng)).collect()
        };
        assert_eq!(a, b);
    }
}
