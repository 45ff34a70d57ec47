use serde::{Deserialize, Serialize};

use crate::engine::Outcome;

pub const DEFAULT_SPIN_FEE: i64 = 100;
pub const DEFAULT_WIN_PAYOUT: i64 = 300;

/// Coins charged and paid per spin. Lives outside the engine so the amounts
/// can change without touching grid logic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PayoutPolicy {
    pub spin_fee: i64,
    pub win_payout: i64,
}

impl Default for PayoutPolicy {
    fn default() -> Self {
        Self {
            spin_fee: DEFAULT_SPIN_FEE,
            win_payout: DEFAULT_WIN_PAYOUT,
        }
    }
}

impl PayoutPolicy {
    pub fn new(spin_fee: i64, win_payout: i64) -> Self {
        Self {
            spin_fee,
            win_payout,
        }
    }

    pub fn payout(&self, outcome: Outcome) -> i64 {
        if outcome.is_win() {
            self.win_payout
        } else {
            0
        }
    }

    /// Net balance change: the fee is always charged.
    pub fn delta(&self, outcome: Outcome) -> i64 {
        self.payout(outcome) - self.spin_fee
    }

    pub fn can_afford(&self, balance: i64) -> bool {
        balance >= self.spin_fee
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::Symbol;

    #[test]
    fn default_deltas() {
        let p = PayoutPolicy::default();
        assert_eq!(p.delta(Outcome::Win(Symbol::Bell)), 200);
        assert_eq!(p.delta(Outcome::Loss), -100);
    }

    #[test]
    fn affordability_is_inclusive() {
        let p = PayoutPolicy::default();
        assert!(p.can_afford(100));
        assert!(!p.can_afford(99));
        assert!(!p.can_afford(-5));
    }

    #[test]
    fn custom_amounts() {
        let p = PayoutPolicy::new(10, 25);
        assert_eq!(p.delta(Outcome::Win(Symbol::Cherry)), 15);
        assert_eq!(p.delta(Outcome::Loss), -10);
    }
}
