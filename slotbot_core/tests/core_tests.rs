use slotbot_core::{
    generate_grid, spin_once, PayoutPolicy, RandSource, SeededRng, SeededSource, Symbol, SYMBOL_COUNT,
};

#[test]
fn rng_repeatable() {
    let rng1 = SeededRng::new("s", "c", 42);
    let rng2 = SeededRng::new("s", "c", 42);
    assert_eq!(rng1.next_floats(10), rng2.next_floats(10));
}

#[test]
fn symbol_frequencies_roughly_uniform() {
    let mut source = RandSource::seed_from_u64(0x5107);
    let mut counts = [0usize; SYMBOL_COUNT];
    let grids = 20_000;
    for _ in 0..grids {
        for row in generate_grid(&mut source).rows() {
            for sym in row {
                counts[sym.to_index()] += 1;
            }
        }
    }
    let expected = (grids * 9) as f64 / SYMBOL_COUNT as f64;
    for (i, &n) in counts.iter().enumerate() {
        let dev = (n as f64 - expected).abs() / expected;
        assert!(dev < 0.03, "{:?} drawn {} times, expected ~{}", Symbol::from_index(i), n, expected);
    }
}

#[test]
fn seeded_source_roughly_uniform() {
    let mut source = SeededSource::new("server", "client", 0);
    let mut counts = [0usize; SYMBOL_COUNT];
    for _ in 0..10_000 {
        for row in generate_grid(&mut source).rows() {
            for sym in row {
                counts[sym.to_index()] += 1;
            }
        }
    }
    let expected = 90_000.0 / SYMBOL_COUNT as f64;
    assert!(counts.iter().all(|&n| ((n as f64 - expected).abs() / expected) < 0.05));
}

#[test]
fn rtp_simulation_smoke() {
    // P(win) = 5 * (1/5)^3 = 1/25, so RTP = 300 / 25 / 100 = 0.12
    let policy = PayoutPolicy::default();
    let mut source = SeededSource::new("server", "client", 0);
    let mut total_bet = 0i64;
    let mut total_payout = 0i64;
    let mut wins = 0u32;
    let spins = 50_000;
    for _ in 0..spins {
        let out = spin_once(&mut source);
        total_bet += policy.spin_fee;
        total_payout += policy.payout(out.outcome);
        if out.outcome.is_win() {
            wins += 1;
        }
    }
    let rtp = total_payout as f64 / total_bet as f64;
    let hit_rate = wins as f64 / spins as f64;
    assert!((0.09..0.15).contains(&rtp), "rtp {rtp}");
    assert!((0.03..0.05).contains(&hit_rate), "hit rate {hit_rate}");
}
