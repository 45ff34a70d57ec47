use serde::{Deserialize, Serialize};

pub const DEFAULT_STARTING_BALANCE: i64 = 1000;

/// One row of the `accounts` table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Account {
    pub user_id: i64,
    pub balance: i64,
    pub spins: i64,
    pub wins: i64,
}

/// Result of a guarded spin settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied(Account),
    /// Balance was below the fee when the statement ran; nothing changed.
    Rejected { balance: i64 },
}
