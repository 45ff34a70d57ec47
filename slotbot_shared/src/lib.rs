pub mod account;
pub mod error;
pub mod ledger;

pub use crate::account::{Account, Settlement, DEFAULT_STARTING_BALANCE};
pub use crate::error::{LedgerError, LedgerResult};
pub use crate::ledger::{Ledger, SqliteLedger};
