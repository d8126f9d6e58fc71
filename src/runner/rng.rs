//! Seedable random source for spawn rolls.
//!
//! The session never reaches for an ambient RNG; it draws from whatever
//! `RandomSource` it was built with so spawn sequences replay exactly.

/// Uniform draws in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

/// 64-bit LCG (Knuth MMIX constants). Deterministic, not crypto secure.
#[derive(Clone, Debug)]
pub struct SimpleRng(u64);

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }
}

impl RandomSource for SimpleRng {
    fn next_f64(&mut self) -> f64 {
        // 31 significant bits; dividing by 2^31 keeps the result below 1.0
        self.next_u32() as f64 / (1u64 << 31) as f64
    }
}

/// Replays a fixed list of draws, then repeats `fallback` forever.
/// Handy for scripting exact spawn sequences.
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    draws: std::collections::VecDeque<f64>,
    fallback: f64,
}

impl ScriptedRng {
    pub fn new(draws: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            fallback,
        }
    }

    /// A source whose every draw is too high to pass any spawn roll.
    pub fn never_spawn() -> Self {
        Self::new([], 0.999)
    }

    pub fn push(&mut self, draw: f64) {
        self.draws.push_back(draw);
    }
}

impl RandomSource for ScriptedRng {
    fn next_f64(&mut self) -> f64 {
        self.draws.pop_front().unwrap_or(self.fallback)
    }
}
