use super::settlement::Settlement;
use crate::cards::strength::Strength;
use crate::Chips;

/// Distributes the pot across main and side pots. Walks strength tiers from
/// strongest to weakest; within a tier, walks stake levels from lowest to
/// highest, paying each level's slice to the tier members who covered it.
/// Whatever no contender can claim returns to whoever staked it.
#[derive(Debug)]
pub struct Showdown {
    entries: Vec<Settlement>,
    /// strength tier currently being paid
    tier: Option<Strength>,
    /// stake level fully distributed so far
    prev: Chips,
    /// stake level being distributed
    next: Chips,
}

impl From<Vec<Settlement>> for Showdown {
    fn from(entries: Vec<Settlement>) -> Self {
        Self {
            entries,
            tier: None,
            prev: 0,
            next: 0,
        }
    }
}

impl Showdown {
    pub fn settle(mut self) -> Vec<Settlement> {
        self.tier = self.descend();
        while !self.is_complete() {
            match self.stake() {
                Some(stake) => {
                    self.next = stake;
                    self.distribute();
                    self.prev = stake;
                }
                None => match self.descend() {
                    Some(tier) => self.tier = Some(tier),
                    None => break,
                },
            }
        }
        self.refund();
        self.entries
    }

    /// every chip risked has been rewarded to someone
    fn is_complete(&self) -> bool {
        let risked = self.entries.iter().map(|e| e.risked).sum::<Chips>();
        let reward = self.entries.iter().map(|e| e.reward).sum::<Chips>();
        reward == risked
    }

    /// lowest stake level the current tier can still claim
    fn stake(&self) -> Option<Chips> {
        self.tier.and_then(|tier| {
            self.entries
                .iter()
                .filter(|e| e.contends())
                .filter(|e| e.strength == Some(tier))
                .filter(|e| e.risked > self.prev)
                .map(|e| e.risked)
                .min()
        })
    }

    /// strongest contending strength strictly below the current tier
    fn descend(&self) -> Option<Strength> {
        self.entries
            .iter()
            .filter(|e| e.contends())
            .filter_map(|e| e.strength)
            .filter(|s| match self.tier {
                Some(tier) => *s < tier,
                None => true,
            })
            .max()
    }

    /// chips claimable between the previous and current stake levels
    fn winnings(&self) -> Chips {
        self.entries
            .iter()
            .map(|e| e.risked.min(self.next))
            .map(|c| (c - self.prev).max(0))
            .sum()
    }

    /// split the slice among tier members who covered it; odd chips go to
    /// the earliest seat
    fn distribute(&mut self) {
        let winnings = self.winnings();
        let tier = self.tier;
        let prev = self.prev;
        let mut winners = self
            .entries
            .iter_mut()
            .filter(|e| e.contends())
            .filter(|e| e.strength == tier)
            .filter(|e| e.risked > prev)
            .collect::<Vec<&mut Settlement>>();
        let share = winnings / winners.len() as Chips;
        let change = winnings as usize % winners.len();
        for winner in winners.iter_mut() {
            winner.reward += share;
        }
        for winner in winners.iter_mut().take(change) {
            winner.reward += 1;
        }
    }

    /// uncalled chips above the last distributed level go back to their owner
    fn refund(&mut self) {
        let prev = self.prev;
        for entry in self.entries.iter_mut() {
            entry.reward += (entry.risked - prev).max(0);
        }
    }
}
