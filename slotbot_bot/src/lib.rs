pub mod commands;
pub mod config;
pub mod game;
pub mod reply;

pub use crate::commands::Command;
pub use crate::config::{Config, ConfigError};
pub use crate::game::{Game, GameError, SpinReport};
