use std::{str::FromStr, time::Duration};

use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use tracing::{debug, info};

use crate::{
    account::{Account, Settlement},
    error::{LedgerError, LedgerResult},
};

/// Per-identity coin balances and spin counters.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Stored balance, creating the account with the starting balance on
    /// first sight. Later calls never modify the row.
    async fn get_or_create(&self, user_id: i64) -> LedgerResult<i64>;

    /// balance += amount, spins += 1, wins += is_win.
    ///
    /// Fails with [`LedgerError::AccountNotFound`] if the account does not
    /// exist; it is never created here.
    async fn apply_delta(&self, user_id: i64, amount: i64, is_win: bool) -> LedgerResult<Account>;

    async fn get_stats(&self, user_id: i64) -> LedgerResult<Option<Account>>;

    /// Same effect as [`Ledger::apply_delta`], but only if the balance is
    /// still at least `fee` at the moment of the write. Check and write are
    /// a single statement, so concurrent spins on one identity cannot both
    /// pass the guard.
    async fn settle_spin(
        &self,
        user_id: i64,
        fee: i64,
        delta: i64,
        is_win: bool,
    ) -> LedgerResult<Settlement>;
}

#[derive(Debug, Clone)]
pub struct SqliteLedger {
    pool: SqlitePool,
    starting_balance: i64,
}

impl SqliteLedger {
    /// Opens (creating if missing) the database at `url` and runs migrations.
    pub async fn connect(url: &str, starting_balance: i64) -> LedgerResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        Self::with_pool(pool, starting_balance).await
    }

    /// Private in-memory database. One connection that never expires, since
    /// the data lives only as long as it does.
    pub async fn in_memory(starting_balance: i64) -> LedgerResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;
        Self::with_pool(pool, starting_balance).await
    }

    pub async fn with_pool(pool: SqlitePool, starting_balance: i64) -> LedgerResult<Self> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self {
            pool,
            starting_balance,
        })
    }

    pub fn starting_balance(&self) -> i64 {
        self.starting_balance
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Admin credit: adds `amount` to the balance without counting a spin.
    /// Creates the account first if needed.
    pub async fn credit(&self, user_id: i64, amount: i64) -> LedgerResult<Account> {
        self.get_or_create(user_id).await?;
        let account = sqlx::query_as::<_, Account>(
            "UPDATE accounts SET balance = balance + ? WHERE user_id = ? \
             RETURNING user_id, balance, spins, wins",
        )
        .bind(amount)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(LedgerError::AccountNotFound(user_id))?;
        info!(user_id, amount, balance = account.balance, "balance credited");
        Ok(account)
    }

    /// Richest accounts first.
    pub async fn top(&self, limit: i64) -> LedgerResult<Vec<Account>> {
        let rows = sqlx::query_as::<_, Account>(
            "SELECT user_id, balance, spins, wins FROM accounts \
             ORDER BY balance DESC, user_id ASC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn all(&self) -> LedgerResult<Vec<Account>> {
        let rows = sqlx::query_as::<_, Account>(
            "SELECT user_id, balance, spins, wins FROM accounts ORDER BY user_id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[async_trait]
impl Ledger for SqliteLedger {
    async fn get_or_create(&self, user_id: i64) -> LedgerResult<i64> {
        let inserted = sqlx::query(
            "INSERT INTO accounts (user_id, balance) VALUES (?, ?) ON CONFLICT(user_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(self.starting_balance)
        .execute(&self.pool)
        .await?;
        if inserted.rows_affected() == 1 {
            info!(user_id, balance = self.starting_balance, "account created");
        }
        let balance: i64 = sqlx::query_scalar("SELECT balance FROM accounts WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(balance)
    }

    async fn apply_delta(&self, user_id: i64, amount: i64, is_win: bool) -> LedgerResult<Account> {
        let account = sqlx::query_as::<_, Account>(
            "UPDATE accounts SET balance = balance + ?, spins = spins + 1, wins = wins + ? \
             WHERE user_id = ? RETURNING user_id, balance, spins, wins",
        )
        .bind(amount)
        .bind(i64::from(is_win))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(LedgerError::AccountNotFound(user_id))?;
        debug!(user_id, amount, is_win, balance = account.balance, "delta applied");
        Ok(account)
    }

    async fn get_stats(&self, user_id: i64) -> LedgerResult<Option<Account>> {
        let row = sqlx::query_as::<_, Account>(
            "SELECT user_id, balance, spins, wins FROM accounts WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn settle_spin(
        &self,
        user_id: i64,
        fee: i64,
        delta: i64,
        is_win: bool,
    ) -> LedgerResult<Settlement> {
        let applied = sqlx::query_as::<_, Account>(
            "UPDATE accounts SET balance = balance + ?, spins = spins + 1, wins = wins + ? \
             WHERE user_id = ? AND balance >= ? RETURNING user_id, balance, spins, wins",
        )
        .bind(delta)
        .bind(i64::from(is_win))
        .bind(user_id)
        .bind(fee)
        .fetch_optional(&self.pool)
        .await?;
        match applied {
            Some(account) => {
                debug!(user_id, delta, is_win, balance = account.balance, "spin settled");
                Ok(Settlement::Applied(account))
            }
            None => match self.get_stats(user_id).await? {
                Some(account) => Ok(Settlement::Rejected {
                    balance: account.balance,
                }),
                None => Err(LedgerError::AccountNotFound(user_id)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::DEFAULT_STARTING_BALANCE;

    async fn ledger() -> SqliteLedger {
        SqliteLedger::in_memory(DEFAULT_STARTING_BALANCE)
            .await
            .expect("in-memory ledger")
    }

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let l = ledger().await;
        assert_eq!(l.get_or_create(7).await.unwrap(), 1000);
        assert_eq!(l.get_or_create(7).await.unwrap(), 1000);
        assert_eq!(
            l.get_stats(7).await.unwrap(),
            Some(Account {
                user_id: 7,
                balance: 1000,
                spins: 0,
                wins: 0
            })
        );
    }

    #[tokio::test]
    async fn get_or_create_keeps_existing_balance() {
        let l = ledger().await;
        l.get_or_create(1).await.unwrap();
        l.apply_delta(1, -100, false).await.unwrap();
        assert_eq!(l.get_or_create(1).await.unwrap(), 900);
    }

    #[tokio::test]
    async fn apply_delta_updates_counters() {
        let l = ledger().await;
        l.get_or_create(1).await.unwrap();
        l.apply_delta(1, 200, true).await.unwrap();
        let acct = l.apply_delta(1, -100, false).await.unwrap();
        assert_eq!((acct.balance, acct.spins, acct.wins), (1100, 2, 1));
    }

    #[tokio::test]
    async fn apply_delta_on_unknown_account_fails() {
        let l = ledger().await;
        let err = l.apply_delta(99, -100, false).await.unwrap_err();
        assert!(matches!(err, LedgerError::AccountNotFound(99)));
        assert_eq!(l.get_stats(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn stats_for_unknown_account_is_none() {
        let l = ledger().await;
        assert_eq!(l.get_stats(12345).await.unwrap(), None);
    }

    #[tokio::test]
    async fn settle_spin_guards_on_fee() {
        let l = ledger().await;
        l.credit(5, -950).await.unwrap();
        let s = l.settle_spin(5, 100, -100, false).await.unwrap();
        assert_eq!(s, Settlement::Rejected { balance: 50 });
        let acct = l.get_stats(5).await.unwrap().unwrap();
        assert_eq!((acct.balance, acct.spins, acct.wins), (50, 0, 0));
    }

    #[tokio::test]
    async fn settle_spin_applies_when_affordable() {
        let l = ledger().await;
        l.credit(5, -900).await.unwrap();
        match l.settle_spin(5, 100, 200, true).await.unwrap() {
            Settlement::Applied(acct) => assert_eq!((acct.balance, acct.spins, acct.wins), (300, 1, 1)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn settle_spin_on_unknown_account_fails() {
        let l = ledger().await;
        assert!(matches!(
            l.settle_spin(3, 100, -100, false).await,
            Err(LedgerError::AccountNotFound(3))
        ));
    }

    #[tokio::test]
    async fn custom_starting_balance_and_top() {
        let l = SqliteLedger::in_memory(250).await.unwrap();
        assert_eq!(l.get_or_create(1).await.unwrap(), 250);
        l.credit(2, 100).await.unwrap();
        l.get_or_create(3).await.unwrap();
        let top: Vec<i64> = l.top(2).await.unwrap().iter().map(|a| a.user_id).collect();
        assert_eq!(top, vec![2, 1]);
        assert_eq!(l.all().await.unwrap().len(), 3);
    }
}
