//! Deterministic random streams for a career session.
//!
//! Each simulation domain draws from its own `SmallRng`, seeded from the
//! user seed through HMAC-SHA256 domain separation. Streams count their
//! draws so a saved session can be restored to the exact same position.

use hmac::{Hmac, Mac};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

const DAY_DOMAIN: &[u8] = b"day";
const TRANSITION_DOMAIN: &[u8] = b"transition";
const SELECTION_DOMAIN: &[u8] = b"selection";

/// Per-stream draw counts captured for persistence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngPositions {
    pub day: u64,
    pub transition: u64,
    pub selection: u64,
}

#[derive(Debug, Clone)]
pub struct RngBundle {
    seed: u64,
    day: CountingRng<SmallRng>,
    transition: CountingRng<SmallRng>,
    selection: CountingRng<SmallRng>,
}

impl RngBundle {
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            seed,
            day: CountingRng::new(derive_stream_seed(seed, DAY_DOMAIN)),
            transition: CountingRng::new(derive_stream_seed(seed, TRANSITION_DOMAIN)),
            selection: CountingRng::new(derive_stream_seed(seed, SELECTION_DOMAIN)),
        }
    }

    /// Rebuild the bundle and fast-forward every stream to `positions`.
    ///
    /// Positions count `next_u32` calls, which is the only draw the
    /// simulation makes.
    #[must_use]
    pub fn restore(seed: u64, positions: RngPositions) -> Self {
        let mut bundle = Self::from_user_seed(seed);
        bundle.day.skip(positions.day);
        bundle.transition.skip(positions.transition);
        bundle.selection.skip(positions.selection);
        bundle
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub const fn positions(&self) -> RngPositions {
        RngPositions {
            day: self.day.draws(),
            transition: self.transition.draws(),
            selection: self.selection.draws(),
        }
    }

    /// Daily pacing: applications and the transition gate.
    pub const fn day(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.day
    }

    /// Funnel transition attempts.
    pub const fn transition(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.transition
    }

    /// Scenario selection and offer details.
    pub const fn selection(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.selection
    }
}

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<SmallRng> {
    fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: rand::RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }

    fn skip(&mut self, draws: u64) {
        for _ in 0..draws {
            let _ = rand::RngCore::next_u32(self);
        }
    }
}

impl<R: rand::RngCore> rand::RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    // HMAC accepts keys of any length, so the fallback is unreachable in practice.
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()) else {
        return user_seed;
    };
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0_u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}
