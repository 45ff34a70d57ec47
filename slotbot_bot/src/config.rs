use clap::Parser;
use slotbot_core::{PayoutPolicy, DEFAULT_SPIN_FEE, DEFAULT_WIN_PAYOUT};
use slotbot_shared::DEFAULT_STARTING_BALANCE;

#[derive(Parser, Debug, Clone)]
#[command(name = "slotbot", about = "Telegram slot-machine bot")]
pub struct Config {
    /// Telegram bot token
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    pub bot_token: String,
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://slotbot.db")]
    pub database_url: String,
    /// Coins charged per spin
    #[arg(long, env = "SLOTBOT_SPIN_FEE", default_value_t = DEFAULT_SPIN_FEE)]
    pub spin_fee: i64,
    /// Coins paid on a winning spin
    #[arg(long, env = "SLOTBOT_WIN_PAYOUT", default_value_t = DEFAULT_WIN_PAYOUT)]
    pub win_payout: i64,
    /// Balance of a newly created account
    #[arg(long, env = "SLOTBOT_STARTING_BALANCE", default_value_t = DEFAULT_STARTING_BALANCE)]
    pub starting_balance: i64,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("spin fee must be positive, got {0}")]
    SpinFee(i64),
    #[error("win payout must not be negative, got {0}")]
    WinPayout(i64),
    #[error("starting balance must not be negative, got {0}")]
    StartingBalance(i64),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spin_fee <= 0 {
            return Err(ConfigError::SpinFee(self.spin_fee));
        }
        if self.win_payout < 0 {
            return Err(ConfigError::WinPayout(self.win_payout));
        }
        if self.starting_balance < 0 {
            return Err(ConfigError::StartingBalance(self.starting_balance));
        }
        Ok(())
    }

    pub fn payout_policy(&self) -> PayoutPolicy {
        PayoutPolicy::new(self.spin_fee, self.win_payout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("slotbot").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let cfg = parse(&["--bot-token", "t"]);
        assert_eq!(cfg.payout_policy(), PayoutPolicy::default());
        assert_eq!(cfg.starting_balance, 1000);
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn rejects_free_spins() {
        let cfg = parse(&["--bot-token", "t", "--spin-fee", "0"]);
        assert_eq!(cfg.validate(), Err(ConfigError::SpinFee(0)));
    }

    #[test]
    fn rejects_negative_payout() {
        let cfg = parse(&["--bot-token", "t", "--win-payout=-1"]);
        assert_eq!(cfg.validate(), Err(ConfigError::WinPayout(-1)));
    }
}
