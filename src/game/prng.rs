use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const HISTORICAL_SEED: u64 = 1_924_085_713;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid prng state {0:?}: expected a hexadecimal u64")]
pub struct PrngStateError(pub String);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prng {
    state: u64,
}

impl Prng {
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { HISTORICAL_SEED } else { seed };
        Self { state }
    }

    /// Restores a checkpointed state verbatim (no seed remapping).
    pub fn from_state(state: u64) -> Self {
        Self { state }
    }

    pub fn state(&self) -> u64 {
        self.state
    }

    fn step(&mut self) -> u64 {
        let seed = self.state;
        // multiply by 16417 without the multiplier
        let cong = seed.wrapping_add(seed << 5).wrapping_add(seed << 14);
        let mut shift = (seed >> 15) ^ seed;
        shift ^= shift << 17;
        self.state = cong ^ shift;
        self.state
    }

    /// Returns a value in `[1, max]`. Only the low 16 bits of the new state
    /// are used, scaled into the range.
    pub fn roll(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0, "die must have at least one side");
        let low = self.step() & 0xFFFF;
        ((low * u64::from(max)) >> 16) as u32 + 1
    }
}

impl fmt::Display for Prng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.state)
    }
}

impl FromStr for Prng {
    type Err = PrngStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u64::from_str_radix(s.trim(), 16)
            .map(Prng::from_state)
            .map_err(|_| PrngStateError(s.to_string()))
    }
}

impl Serialize for Prng {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Prng {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        hex.parse().map_err(serde::de::Error::custom)
    }
}

// Lets callers drive `rand` adapters (shuffles, ranges) from the same
// deterministic stream.
impl RngCore for Prng {
    fn next_u32(&mut self) -> u32 {
        (self.step() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.step()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Prng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Prng::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Prng::new(state)
    }
}
