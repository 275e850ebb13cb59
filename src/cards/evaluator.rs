use super::hand::Hand;
use super::kicks::Kickers;
use super::rank::Rank;
use super::ranking::Ranking;
use super::strength::Strength;
use super::suit::Suit;

/// rank mask of the five-high straight (wheel)
const WHEEL: u16 = 0b1000000001111;

/// Finds the best five-card value inside a Hand of any size, by searching
/// shapes from strongest to weakest over the bitset representation. No
/// lookup tables; every query is a handful of mask ops.
pub struct Evaluator(Hand);

impl From<Hand> for Evaluator {
    fn from(hand: Hand) -> Self {
        assert!(hand.size() > 0);
        Self(hand)
    }
}

impl Evaluator {
    pub fn strength(&self) -> Strength {
        let ranking = self.ranking();
        let kickers = self.kickers(ranking);
        Strength::from((ranking, kickers))
    }

    fn ranking(&self) -> Ranking {
        None.or_else(|| self.straight_flush())
            .or_else(|| self.quads())
            .or_else(|| self.full_house())
            .or_else(|| self.flush())
            .or_else(|| self.straight())
            .or_else(|| self.trips())
            .or_else(|| self.pairs())
            .or_else(|| self.high_card())
            .expect("at least one card")
    }

    fn kickers(&self, ranking: Ranking) -> Kickers {
        match ranking.n_kickers() {
            0 => Kickers::none(),
            n => {
                let mut ranks = self.0.ranks() & !ranking.used();
                while (ranks.count_ones() as usize) > n {
                    ranks &= ranks - 1;
                }
                Kickers::from(ranks)
            }
        }
    }

    fn straight_flush(&self) -> Option<Ranking> {
        self.flush_suit().and_then(|suit| {
            Self::straight_high(self.0.suited(suit).ranks()).map(Ranking::StraightFlush)
        })
    }
    fn quads(&self) -> Option<Ranking> {
        self.oak(4, None).map(Ranking::FourOAK)
    }
    fn full_house(&self) -> Option<Ranking> {
        self.oak(3, None).and_then(|triple| {
            self.oak(2, Some(triple))
                .map(|pair| Ranking::FullHouse(triple, pair))
        })
    }
    fn flush(&self) -> Option<Ranking> {
        self.flush_suit()
            .map(|suit| Ranking::Flush(Rank::from(self.0.suited(suit).ranks())))
    }
    fn straight(&self) -> Option<Ranking> {
        Self::straight_high(self.0.ranks()).map(Ranking::Straight)
    }
    fn trips(&self) -> Option<Ranking> {
        self.oak(3, None).map(Ranking::ThreeOAK)
    }
    fn pairs(&self) -> Option<Ranking> {
        self.oak(2, None).map(|hi| match self.oak(2, Some(hi)) {
            Some(lo) => Ranking::TwoPair(hi, lo),
            None => Ranking::OnePair(hi),
        })
    }
    fn high_card(&self) -> Option<Ranking> {
        self.oak(1, None).map(Ranking::HighCard)
    }

    /// highest rank held by at least n cards, optionally skipping one rank
    fn oak(&self, n: usize, skip: Option<Rank>) -> Option<Rank> {
        (0..13u8)
            .rev()
            .map(Rank::from)
            .filter(|rank| skip != Some(*rank))
            .find(|rank| {
                let held = u64::from(self.0) & u64::from(*rank);
                held.count_ones() as usize >= n
            })
    }

    /// top of the highest straight in a rank mask, wheel included
    fn straight_high(ranks: u16) -> Option<Rank> {
        let mut bits = ranks;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        if bits > 0 {
            Some(Rank::from(bits))
        } else if ranks & WHEEL == WHEEL {
            Some(Rank::Five)
        } else {
            None
        }
    }

    fn flush_suit(&self) -> Option<Suit> {
        Suit::all()
            .into_iter()
            .find(|suit| self.0.suited(*suit).size() >= 5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strength(s: &str) -> Strength {
        Strength::from(Hand::try_from(s).unwrap())
    }

    #[test]
    fn high_card_with_kickers() {
        let a = strength("Ad Jc 9h 7s 4c");
        let b = strength("Ah Jd 9c 7h 3s");
        assert!(matches!(a.ranking(), Ranking::HighCard(Rank::Ace)));
        assert!(a > b);
    }

    #[test]
    fn pair_beats_high_card() {
        assert!(strength("3c 3d Ah Kd 9s") > strength("Ac Kc Qd Jh 9d"));
    }

    #[test]
    fn pair_kicker_decides() {
        assert!(strength("8c 8d Ah 5d 2s") > strength("8h 8s Kh 5c 2d"));
    }

    #[test]
    fn two_pair_over_seven_cards() {
        let s = strength("Qc Qd 5h 5s Ah 9d 2c");
        assert_eq!(
            s.ranking(),
            Ranking::TwoPair(Rank::Queen, Rank::Five)
        );
    }

    #[test]
    fn three_pairs_keep_best_kicker() {
        // third pair's high card plays as the kicker
        let s = strength("Qc Qd 5h 5s 9d 9c Ah");
        assert_eq!(s.ranking(), Ranking::TwoPair(Rank::Queen, Rank::Nine));
        assert!(s > strength("Qh Qs 9h 9s 5c 5d Kh"));
    }

    #[test]
    fn trips() {
        assert_eq!(
            strength("7c 7d 7h Ad 2s").ranking(),
            Ranking::ThreeOAK(Rank::Seven)
        );
    }

    #[test]
    fn straight_and_wheel() {
        assert_eq!(
            strength("5c 6d 7h 8s 9c").ranking(),
            Ranking::Straight(Rank::Nine)
        );
        assert_eq!(
            strength("Ac 2d 3h 4s 5c").ranking(),
            Ranking::Straight(Rank::Five)
        );
        assert!(strength("2c 3d 4h 5s 6c") > strength("Ac 2d 3h 4s 5c"));
    }

    #[test]
    fn flush_beats_straight() {
        let s = strength("2h 5h 9h Jh Kh Ac");
        assert_eq!(s.ranking(), Ranking::Flush(Rank::King));
        assert!(s > strength("9c Tc Jd Qh Ks"));
    }

    #[test]
    fn full_house_from_two_trips() {
        let s = strength("4c 4d 4h 8c 8d 8h As");
        assert_eq!(s.ranking(), Ranking::FullHouse(Rank::Eight, Rank::Four));
    }

    #[test]
    fn full_house_beats_flush() {
        assert!(strength("2c 2d 2h 3c 3d") > strength("Ah Kh Qh Jh 9h"));
    }

    #[test]
    fn quads_with_kicker() {
        let s = strength("6c 6d 6h 6s Kd Qc");
        assert_eq!(s.ranking(), Ranking::FourOAK(Rank::Six));
        assert!(s > strength("6c 6d 6h 6s Qd"));
    }

    #[test]
    fn straight_flush_tops_everything() {
        let s = strength("5d 6d 7d 8d 9d Ac Ad");
        assert_eq!(s.ranking(), Ranking::StraightFlush(Rank::Nine));
        assert!(s > strength("Ac Ad Ah As Kc"));
    }

    #[test]
    fn steel_wheel() {
        assert_eq!(
            strength("As 2s 3s 4s 5s").ranking(),
            Ranking::StraightFlush(Rank::Five)
        );
    }

    #[test]
    fn board_plays_chops() {
        // both holes miss a broadway board: identical strength
        let a = strength("2c 3d Ah Kh Qh Jh Th");
        let b = strength("4s 5s Ah Kh Qh Jh Th");
        assert_eq!(a, b);
    }
}
