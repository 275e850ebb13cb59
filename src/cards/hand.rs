use super::card::Card;
use super::suit::Suit;

/// An unordered set of cards, one bit per card in the 52 LSBs of a u64.
/// Zero allocation, and set algebra (union, complement, membership) is
/// a single bitwise op.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Hand(u64);

impl Hand {
    pub const fn empty() -> Self {
        Self(0)
    }
    pub const fn mask() -> u64 {
        0x000FFFFFFFFFFFFF
    }

    pub fn size(&self) -> usize {
        self.0.count_ones() as usize
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.0 & u64::from(*card) != 0
    }
    pub fn complement(&self) -> Self {
        Self(self.0 ^ Self::mask())
    }

    /// union of two disjoint sets
    pub fn add(lhs: Self, rhs: Self) -> Self {
        assert!(lhs.0 & rhs.0 == 0);
        Self(lhs.0 | rhs.0)
    }
    pub fn insert(&mut self, card: Card) {
        assert!(!self.contains(&card));
        self.0 |= u64::from(card);
    }
    pub fn remove(&mut self, card: Card) {
        self.0 &= !u64::from(card);
    }

    /// the cards of one suit, still at their deck positions
    pub fn suited(&self, suit: Suit) -> Self {
        Self(self.0 & u64::from(suit))
    }

    /// collapse to a 13-bit rank mask, suits ignored
    pub fn ranks(&self) -> u16 {
        let mut x = self.0;
        x |= x >> 1;
        x |= x >> 2;
        x &= 0x1111111111111;
        (0..13).fold(0u16, |acc, i| acc | (((x >> (i * 3)) & (1 << i)) as u16))
    }
}

/// iteration removes the lowest card until empty
impl Iterator for Hand {
    type Item = Card;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            None
        } else {
            let card = Card::from(self.0.trailing_zeros() as u8);
            self.remove(card);
            Some(card)
        }
    }
}

/// u64 isomorphism
impl From<u64> for Hand {
    fn from(n: u64) -> Self {
        Self(n & Self::mask())
    }
}
impl From<Hand> for u64 {
    fn from(h: Hand) -> Self {
        h.0
    }
}

impl From<Card> for Hand {
    fn from(c: Card) -> Self {
        Self(u64::from(c))
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards.into_iter().map(u64::from).fold(0, |a, b| a | b))
    }
}
impl From<Hand> for Vec<Card> {
    fn from(h: Hand) -> Self {
        h.into_iter().collect()
    }
}

/// whitespace-separated card strs, e.g. "Ac Td 2s"
impl TryFrom<&str> for Hand {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.split_whitespace()
            .map(Card::try_from)
            .collect::<Result<Vec<Card>, _>>()
            .map(Self::from)
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for card in *self {
            write!(f, "{} ", card)?;
        }
        Ok(())
    }
}

impl crate::Arbitrary for Hand {
    fn random() -> Self {
        let cards = rand::Rng::gen::<u64>(&mut rand::thread_rng());
        Self(cards & Self::mask())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;

    #[test]
    fn bijective_u64() {
        let hand = Hand::random();
        assert_eq!(hand, Hand::from(u64::from(hand)));
    }

    #[test]
    fn iterates_low_to_high() {
        let mut iter = Hand::try_from("Qd 7s 2c Qh").unwrap().into_iter();
        assert_eq!(iter.next(), Some(Card::try_from("2c").unwrap()));
        assert_eq!(iter.next(), Some(Card::try_from("7s").unwrap()));
        assert_eq!(iter.next(), Some(Card::try_from("Qd").unwrap()));
        assert_eq!(iter.next(), Some(Card::try_from("Qh").unwrap()));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn rank_mask() {
        let hand = Hand::try_from("2c 2d 9h As").unwrap();
        assert_eq!(hand.ranks(), 0b1000010000001);
    }

    #[test]
    fn suited_membership() {
        let hand = Hand::try_from("2c 9h Ah").unwrap();
        assert_eq!(hand.suited(Suit::Heart).size(), 2);
        assert_eq!(hand.suited(Suit::Spade).size(), 0);
    }

    #[test]
    fn complement_partitions_deck() {
        let hand = Hand::random();
        assert_eq!(hand.size() + hand.complement().size(), 52);
        assert_eq!(u64::from(hand) & u64::from(hand.complement()), 0);
    }
}
