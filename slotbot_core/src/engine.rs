use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    rng::SymbolSource,
    symbols::{Symbol, SYMBOL_COUNT},
};

pub const ROWS: usize = 3;
pub const COLS: usize = 3;
/// The only line that pays.
pub const PAY_ROW: usize = 1;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Grid(pub [[Symbol; COLS]; ROWS]);

impl Grid {
    pub fn rows(&self) -> &[[Symbol; COLS]; ROWS] {
        &self.0
    }

    pub fn row(&self, r: usize) -> &[Symbol; COLS] {
        &self.0[r]
    }
}

impl fmt::Display for Grid {
    /// Three lines of three space-separated symbols.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.0.iter().enumerate() {
            if r > 0 {
                f.write_str("\n")?;
            }
            for (c, sym) in row.iter().enumerate() {
                if c > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{sym}")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Outcome {
    Win(Symbol),
    Loss,
}

impl Outcome {
    pub fn is_win(self) -> bool {
        matches!(self, Outcome::Win(_))
    }

    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Outcome::Win(s) => Some(s),
            Outcome::Loss => None,
        }
    }
}

/// Every cell is an independent uniform draw, row by row.
pub fn generate_grid<S: SymbolSource + ?Sized>(source: &mut S) -> Grid {
    let mut cells = [[Symbol::Cherry; COLS]; ROWS];
    for row in cells.iter_mut() {
        for cell in row.iter_mut() {
            *cell = Symbol::from_index(source.next_index(SYMBOL_COUNT));
        }
    }
    Grid(cells)
}

pub fn evaluate(grid: &Grid) -> Outcome {
    let [a, b, c] = *grid.row(PAY_ROW);
    if a == b && b == c {
        Outcome::Win(a)
    } else {
        Outcome::Loss
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinOutcome {
    pub grid: Grid,
    pub outcome: Outcome,
}

pub fn spin_once<S: SymbolSource + ?Sized>(source: &mut S) -> SpinOutcome {
    let grid = generate_grid(source);
    SpinOutcome {
        grid,
        outcome: evaluate(&grid),
    }
}
