use slotbot_core::{spin_once, PayoutPolicy, SeededSource};

fn main() {
    let mut source = SeededSource::new("example-server-seed", "example-client-seed", 1);
    let policy = PayoutPolicy::default();
    let out = spin_once(&mut source);
    println!(
        "server_seed_hash={} delta={}\n{}",
        source.server_seed_hash_hex(),
        policy.delta(out.outcome),
        out.grid
    );
}
