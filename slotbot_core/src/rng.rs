use hmac::{Hmac, Mac};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sha2::{Digest, Sha256};

use crate::symbols::Symbol;

pub type HmacSha256 = Hmac<Sha256>;

/// Source of uniformly distributed symbol indices.
///
/// The engine never touches a global RNG; every draw goes through one of
/// these so callers decide between entropy, a reproducible seed stream, or
/// a fixed script.
pub trait SymbolSource {
    /// Returns an index in `0..bound`. `bound` is never zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<S: SymbolSource + ?Sized> SymbolSource for Box<S> {
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}

/// Any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandSource<R>(pub R);

impl RandSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    pub fn seed_from_u64(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SymbolSource for RandSource<R> {
    fn next_index(&mut self, bound: usize) -> usize {
        self.0.gen_range(0..bound)
    }
}

pub fn derive_hash_hex(input: &[u8]) -> String {
    hex::encode(Sha256::digest(input))
}

pub fn derive_floats(hmac_bytes: &[u8], count: usize) -> Vec<f64> {
    // Successive 4-byte chunks -> u32 -> [0,1)
    let mut out = Vec::with_capacity(count);
    let mut buffer = hmac_bytes.to_vec();
    let mut i = 0usize;
    while out.len() < count {
        if i + 4 > buffer.len() {
            // extend deterministically by hashing the previous buffer
            buffer = Sha256::digest(&buffer).to_vec();
            i = 0;
            continue;
        }
        let chunk = &buffer[i..i + 4];
        let v = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        out.push(v as f64 / (u32::MAX as f64 + 1.0));
        i += 4;
    }
    out
}

/// HMAC-SHA256 stream: server_seed (secret) + client_seed + nonce -> floats in [0,1).
#[derive(Debug, Clone)]
pub struct SeededRng {
    pub server_seed: String,
    pub client_seed: String,
    pub nonce: u64,
}

impl SeededRng {
    pub fn new(server_seed: impl Into<String>, client_seed: impl Into<String>, nonce: u64) -> Self {
        Self {
            server_seed: server_seed.into(),
            client_seed: client_seed.into(),
            nonce,
        }
    }

    pub fn server_seed_hash_hex(&self) -> String {
        derive_hash_hex(self.server_seed.as_bytes())
    }

    pub fn hmac_bytes(&self) -> [u8; 32] {
        let mut mac = HmacSha256::new_from_slice(self.server_seed.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(format!("{}:{}", self.client_seed, self.nonce).as_bytes());
        let res = mac.finalize().into_bytes();
        let mut out = [0u8; 32];
        out.copy_from_slice(&res);
        out
    }

    pub fn next_floats(&self, count: usize) -> Vec<f64> {
        derive_floats(&self.hmac_bytes(), count)
    }
}

/// Reproducible source: one HMAC block per nonce, advancing the nonce
/// whenever the block is used up.
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: SeededRng,
    block: Vec<f64>,
    pos: usize,
}

impl SeededSource {
    const BLOCK: usize = 16;

    pub fn new(server_seed: impl Into<String>, client_seed: impl Into<String>, nonce: u64) -> Self {
        let rng = SeededRng::new(server_seed, client_seed, nonce);
        let block = rng.next_floats(Self::BLOCK);
        Self { rng, block, pos: 0 }
    }

    pub fn nonce(&self) -> u64 {
        self.rng.nonce
    }

    pub fn server_seed_hash_hex(&self) -> String {
        self.rng.server_seed_hash_hex()
    }
}

impl SymbolSource for SeededSource {
    fn next_index(&mut self, bound: usize) -> usize {
        if self.pos == self.block.len() {
            self.rng.nonce += 1;
            self.block = self.rng.next_floats(Self::BLOCK);
            self.pos = 0;
        }
        let f = self.block[self.pos];
        self.pos += 1;
        ((f * bound as f64).floor() as usize) % bound
    }
}

/// Replays a fixed list of indices, cycling when it runs out. Used to force
/// outcomes.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: Vec<usize>,
    pos: usize,
}

impl ScriptedSource {
    pub fn new(script: Vec<usize>) -> Self {
        Self {
            script,
            pos: 0,
        }
    }

    pub fn from_symbols(symbols: &[Symbol]) -> Self {
        Self::new(symbols.iter().map(|s| s.to_index()).collect())
    }

    /// Every cell is `symbol`, so every grid wins.
    pub fn always(symbol: Symbol) -> Self {
        Self::from_symbols(&[symbol])
    }

    /// Each row reads Cherry, Lemon, Watermelon, so no grid wins.
    pub fn never_wins() -> Self {
        Self::from_symbols(&[Symbol::Cherry, Symbol::Lemon, Symbol::Watermelon])
    }
}

impl SymbolSource for ScriptedSource {
    fn next_index(&mut self, bound: usize) -> usize {
        if self.script.is_empty() {
            return 0;
        }
        let i = self.script[self.pos % self.script.len()];
        self.pos = (self.pos + 1) % self.script.len();
        i % bound
    }
}
