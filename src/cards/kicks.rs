use super::rank::Rank;

/// Tie-breaking side cards as a 13-bit rank mask. Numeric comparison of two
/// masks with the same popcount is exactly highest-card-first comparison,
/// so the derived Ord is the right one. Suits never matter here.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Kickers(u16);

impl Kickers {
    pub const fn none() -> Self {
        Self(0)
    }
}

impl From<u16> for Kickers {
    fn from(n: u16) -> Self {
        Self(n & Rank::mask())
    }
}
impl From<Kickers> for u16 {
    fn from(k: Kickers) -> Self {
        k.0
    }
}

impl From<Vec<Rank>> for Kickers {
    fn from(ranks: Vec<Rank>) -> Self {
        Self(ranks.iter().map(|r| u16::from(*r)).fold(0, |a, b| a | b))
    }
}
impl From<Kickers> for Vec<Rank> {
    fn from(k: Kickers) -> Self {
        (0..13u8)
            .rev()
            .filter(|i| k.0 & (1 << i) != 0)
            .map(Rank::from)
            .collect()
    }
}

impl std::fmt::Display for Kickers {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for rank in Vec::<Rank>::from(*self) {
            write!(f, "{} ", rank)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_kicker_wins() {
        let ace_high = Kickers::from(vec![Rank::Ace, Rank::Three]);
        let king_high = Kickers::from(vec![Rank::King, Rank::Queen]);
        assert!(ace_high > king_high);
    }

    #[test]
    fn vec_roundtrip_descends() {
        let kicks = Kickers::from(vec![Rank::Five, Rank::Jack]);
        assert_eq!(Vec::<Rank>::from(kicks), vec![Rank::Jack, Rank::Five]);
    }

    #[test]
    fn every_rank_decodes_at_its_own_bit() {
        let kicks = Kickers::from(Rank::mask());
        let ranks = Vec::<Rank>::from(kicks);
        assert_eq!(ranks.len(), 13);
        assert_eq!(ranks.first(), Some(&Rank::Ace));
        assert_eq!(ranks.last(), Some(&Rank::Two));
    }
}
