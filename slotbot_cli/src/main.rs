use clap::{Parser, Subcommand};
use slotbot_core::{spin_once, PayoutPolicy, SeededSource, DEFAULT_SPIN_FEE, DEFAULT_WIN_PAYOUT};
use slotbot_shared::{Account, Ledger, SqliteLedger, DEFAULT_STARTING_BALANCE};

#[derive(Parser)]
#[command(name = "slotbot-cli", about = "Admin CLI for the slotbot ledger")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Database URL, default sqlite://slotbot.db
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://slotbot.db")]
    database_url: String,
    /// Balance given to accounts this tool creates
    #[arg(long, env = "SLOTBOT_STARTING_BALANCE", default_value_t = DEFAULT_STARTING_BALANCE)]
    starting_balance: i64,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one account
    Stats { user_id: i64 },
    /// List the N richest accounts
    Top {
        #[arg(default_value_t = 10)]
        n: i64,
    },
    /// Add (or with a negative amount, remove) coins without counting a spin
    Grant {
        user_id: i64,
        #[arg(allow_hyphen_values = true)]
        amount: i64,
    },
    /// Export all accounts to CSV path
    ExportCsv { path: String },
    /// Run spins against a seeded source and report hit rate and RTP
    Simulate {
        #[arg(long, default_value_t = 10_000)]
        spins: u64,
        #[arg(long, default_value = "simulation-server-seed")]
        server_seed: String,
        #[arg(long, default_value = "simulation-client-seed")]
        client_seed: String,
        #[arg(long, default_value_t = DEFAULT_SPIN_FEE)]
        spin_fee: i64,
        #[arg(long, default_value_t = DEFAULT_WIN_PAYOUT)]
        win_payout: i64,
    },
}

fn print_account(a: &Account, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(a)?);
    } else {
        println!(
            "#{:>12} balance={} spins={} wins={}",
            a.user_id, a.balance, a.spins, a.wins
        );
    }
    Ok(())
}

fn simulate(
    spins: u64,
    server_seed: String,
    client_seed: String,
    policy: PayoutPolicy,
    json: bool,
) -> anyhow::Result<()> {
    let mut source = SeededSource::new(server_seed, client_seed, 0);
    let mut wins = 0u64;
    let mut total_payout = 0i64;
    for _ in 0..spins {
        let out = spin_once(&mut source);
        if out.outcome.is_win() {
            wins += 1;
        }
        total_payout += policy.payout(out.outcome);
    }
    let total_bet = policy.spin_fee * spins as i64;
    let hit_rate = if spins == 0 { 0.0 } else { wins as f64 / spins as f64 };
    let rtp = if total_bet == 0 { 0.0 } else { total_payout as f64 / total_bet as f64 };
    if json {
        println!(
            "{}",
            serde_json::json!({
                "server_seed_hash": source.server_seed_hash_hex(),
                "spins": spins,
                "wins": wins,
                "hit_rate": hit_rate,
                "rtp": rtp,
                "net": total_payout - total_bet,
            })
        );
    } else {
        println!(
            "hash={} spins={} wins={} hit_rate={:.4} rtp={:.4} net={}",
            source.server_seed_hash_hex(),
            spins,
            wins,
            hit_rate,
            rtp,
            total_payout - total_bet
        );
    }
    Ok(())
}

async fn run(command: Commands, ledger: SqliteLedger, json: bool) -> anyhow::Result<()> {
    match command {
        Commands::Stats { user_id } => match ledger.get_stats(user_id).await? {
            Some(a) => print_account(&a, json)?,
            None => println!("No account for user {}", user_id),
        },
        Commands::Top { n } => {
            for a in ledger.top(n).await? {
                print_account(&a, json)?;
            }
        }
        Commands::Grant { user_id, amount } => {
            let a = ledger.credit(user_id, amount).await?;
            println!("Granted {} to {}. New balance: {}", amount, user_id, a.balance);
        }
        Commands::ExportCsv { path } => {
            let mut wtr = csv::Writer::from_path(&path)?;
            let rows = ledger.all().await?;
            for a in &rows {
                wtr.serialize(a)?;
            }
            wtr.flush()?;
            println!("Exported {} rows to {}", rows.len(), path);
        }
        Commands::Simulate { .. } => anyhow::bail!("simulate does not use the ledger"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            spins,
            server_seed,
            client_seed,
            spin_fee,
            win_payout,
        } => simulate(
            spins,
            server_seed,
            client_seed,
            PayoutPolicy::new(spin_fee, win_payout),
            cli.json,
        ),
        command => {
            let ledger = SqliteLedger::connect(&cli.database_url, cli.starting_balance).await?;
            run(command, ledger, cli.json).await
        }
    }
}
