pub mod engine;
pub mod payout;
pub mod rng;
pub mod symbols;

pub use crate::engine::{evaluate, generate_grid, spin_once, Grid, Outcome, SpinOutcome, COLS, PAY_ROW, ROWS};
pub use crate::payout::{PayoutPolicy, DEFAULT_SPIN_FEE, DEFAULT_WIN_PAYOUT};
pub use crate::rng::{
    derive_floats, derive_hash_hex, RandSource, ScriptedSource, SeededRng, SeededSource, SymbolSource,
};
pub use crate::symbols::{Symbol, SYMBOL_COUNT};
