use super::card::Card;
use super::hand::Hand;
use super::street::Street;

/// The community cards. Street is derived from how many are showing.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Board(Hand);

impl Board {
    pub const fn empty() -> Self {
        Self(Hand::empty())
    }
    pub fn street(&self) -> Street {
        Street::from(self.0.size())
    }
    pub fn size(&self) -> usize {
        self.0.size()
    }
    pub fn add(&mut self, card: Card) {
        self.0.insert(card);
    }
    pub fn clear(&mut self) {
        self.0 = Hand::empty();
    }
}

impl From<Board> for Hand {
    fn from(board: Board) -> Self {
        board.0
    }
}
impl From<Hand> for Board {
    fn from(hand: Hand) -> Self {
        assert!(matches!(hand.size(), 0 | 3 | 4 | 5));
        Self(hand)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn street_tracks_size() {
        let mut board = Board::empty();
        assert_eq!(board.street(), Street::Pref);
        for card in Hand::try_from("2c 7d Jh").unwrap() {
            board.add(card);
        }
        assert_eq!(board.street(), Street::Flop);
        board.add(Card::try_from("As").unwrap());
        assert_eq!(board.street(), Street::Turn);
        board.add(Card::try_from("Ks").unwrap());
        assert_eq!(board.street(), Street::Rive);
    }
}
