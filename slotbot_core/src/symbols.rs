use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of distinct symbols on the machine.
pub const SYMBOL_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Symbol {
    Cherry,
    Lemon,
    Watermelon,
    Star,
    Bell,
}

impl Symbol {
    pub const ALL: [Symbol; SYMBOL_COUNT] = [
        Symbol::Cherry,
        Symbol::Lemon,
        Symbol::Watermelon,
        Symbol::Star,
        Symbol::Bell,
    ];

    pub fn from_index(i: usize) -> Self {
        match i % SYMBOL_COUNT {
            0 => Symbol::Cherry,
            1 => Symbol::Lemon,
            2 => Symbol::Watermelon,
            3 => Symbol::Star,
            _ => Symbol::Bell,
        }
    }

    pub fn to_index(self) -> usize {
        match self {
            Symbol::Cherry => 0,
            Symbol::Lemon => 1,
            Symbol::Watermelon => 2,
            Symbol::Star => 3,
            Symbol::Bell => 4,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Symbol::Cherry => "🍒",
            Symbol::Lemon => "🍋",
            Symbol::Watermelon => "🍉",
            Symbol::Star => "⭐️",
            Symbol::Bell => "🔔",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.emoji())
    }
}
