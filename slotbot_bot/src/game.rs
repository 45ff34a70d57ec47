use std::sync::{Mutex, PoisonError};

use slotbot_core::{spin_once, Grid, Outcome, PayoutPolicy, SpinOutcome, SymbolSource};
use slotbot_shared::{Account, Ledger, LedgerError, LedgerResult, Settlement};
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};

use crate::{commands::Command, reply};

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("balance {balance} is below the spin fee {fee}")]
    InsufficientFunds { balance: i64, fee: i64 },
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinReport {
    pub grid: Grid,
    pub outcome: Outcome,
    pub payout: i64,
    pub delta: i64,
    /// Account after settlement, as returned by the ledger.
    pub account: Account,
}

/// Command handlers over a ledger and a symbol source.
pub struct Game<L, S> {
    ledger: L,
    source: Mutex<S>,
    policy: PayoutPolicy,
}

impl<L, S> Game<L, S>
where
    L: Ledger,
    S: SymbolSource + Send,
{
    pub fn new(ledger: L, source: S, policy: PayoutPolicy) -> Self {
        Self {
            ledger,
            source: Mutex::new(source),
            policy,
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn policy(&self) -> PayoutPolicy {
        self.policy
    }

    pub async fn start(&self, user_id: i64) -> LedgerResult<i64> {
        self.ledger.get_or_create(user_id).await
    }

    /// Charges the fee, draws a grid and pays out on a middle-row match.
    ///
    /// The first balance check only avoids drawing for accounts that are
    /// clearly broke; the authoritative check is the guarded settlement,
    /// which rejects the spin if a concurrent one got there first.
    pub async fn spin(&self, user_id: i64) -> Result<SpinReport, GameError> {
        let fee = self.policy.spin_fee;
        let balance = self.ledger.get_or_create(user_id).await?;
        if !self.policy.can_afford(balance) {
            warn!(user_id, balance, fee, "spin rejected");
            return Err(GameError::InsufficientFunds { balance, fee });
        }

        let SpinOutcome { grid, outcome } = self.draw();
        let payout = self.policy.payout(outcome);
        let delta = self.policy.delta(outcome);

        match self
            .ledger
            .settle_spin(user_id, fee, delta, outcome.is_win())
            .await?
        {
            Settlement::Applied(account) => {
                info!(user_id, ?outcome, delta, balance = account.balance, "spin");
                Ok(SpinReport {
                    grid,
                    outcome,
                    payout,
                    delta,
                    account,
                })
            }
            Settlement::Rejected { balance } => {
                warn!(user_id, balance, fee, "spin rejected at settlement");
                Err(GameError::InsufficientFunds { balance, fee })
            }
        }
    }

    pub async fn stats(&self, user_id: i64) -> LedgerResult<Option<Account>> {
        self.ledger.get_stats(user_id).await
    }

    /// Runs `command` for `user_id` and renders the reply. Only store
    /// failures come back as errors.
    pub async fn handle(&self, user_id: i64, command: Command) -> LedgerResult<String> {
        let text = match command {
            Command::Start => reply::welcome(self.start(user_id).await?),
            Command::Spin => match self.spin(user_id).await {
                Ok(report) => reply::spin(&report),
                Err(GameError::InsufficientFunds { fee, .. }) => reply::insufficient_funds(fee),
                Err(GameError::Ledger(e)) => return Err(e),
            },
            Command::Stats => match self.stats(user_id).await? {
                Some(account) => reply::stats(&account),
                None => reply::no_stats(),
            },
            Command::Help => Command::descriptions().to_string(),
        };
        Ok(text)
    }

    // The lock is released before any await.
    fn draw(&self) -> SpinOutcome {
        let mut source = self.source.lock().unwrap_or_else(PoisonError::into_inner);
        spin_once(&mut *source)
    }
}
