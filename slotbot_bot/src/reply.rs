//! User-facing reply texts.

use slotbot_core::Outcome;
use slotbot_shared::Account;

use crate::game::SpinReport;

pub const STORE_FAILURE: &str = "⚠️ Something went wrong, please try again later.";

pub fn welcome(balance: i64) -> String {
    format!("🎰 Welcome to SlotBot!\nYour balance: {balance}🪙\nType /spin to play!")
}

pub fn spin(report: &SpinReport) -> String {
    let mut out = format!("🎰 SPINNING...\n\n{}", report.grid);
    match report.outcome {
        Outcome::Win(s) => out.push_str(&format!("\n\n🎉 YOU WIN! {s}{s}{s} +{}🪙", report.payout)),
        Outcome::Loss => out.push_str("\n\n😢 No win this time."),
    }
    out.push_str(&format!("\nBalance: {}🪙", report.account.balance));
    out
}

pub fn insufficient_funds(fee: i64) -> String {
    format!("❌ Not enough coins to spin. Each spin costs {fee}🪙.")
}

pub fn stats(account: &Account) -> String {
    format!(
        "📊 Stats:\nBalance: {}🪙\nSpins: {}\nWins: {}",
        account.balance, account.spins, account.wins
    )
}

pub fn no_stats() -> String {
    "No stats found. Try /start first.".to_string()
}
