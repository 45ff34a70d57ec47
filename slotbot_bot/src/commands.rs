use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Copy, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "SlotBot commands:")]
pub enum Command {
    #[command(description = "create your account and show your balance")]
    Start,
    #[command(description = "spend coins on one spin")]
    Spin,
    #[command(description = "show balance, spins and wins")]
    Stats,
    #[command(description = "show this help")]
    Help,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lowercase_commands() {
        assert!(matches!(Command::parse("/spin", "slotbot"), Ok(Command::Spin)));
        assert!(matches!(Command::parse("/start", "slotbot"), Ok(Command::Start)));
        assert!(matches!(Command::parse("/stats@slotbot", "slotbot"), Ok(Command::Stats)));
        assert!(Command::parse("/jackpot", "slotbot").is_err());
    }

    #[test]
    fn help_lists_every_command() {
        let help = Command::descriptions().to_string();
        for name in ["/start", "/spin", "/stats", "/help"] {
            assert!(help.contains(name), "{name} missing from {help}");
        }
    }
}
