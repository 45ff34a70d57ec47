#[derive(thiserror::Error, Debug)]
pub enum LedgerError {
    #[error("account {0} not found")]
    AccountNotFound(i64),
    #[error("store unavailable: {0}")]
    Store(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
