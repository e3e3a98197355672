//! Deterministic random number generation for opponent move selection.
//!
//! The engine owns a single `GameRng` seeded from `EngineConfig::seed`, and
//! every strategy draws from it. The same seed and the same sequence of
//! human moves therefore reproduce a whole game, which is what the
//! end-to-end tests rely on.
//!
//! ```
//! use xox_engine::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.gen_index(100), b.gen_index(100));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this generator was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `0..len`.
    ///
    /// Returns 0 when `len` is 0 so callers that already checked for an
    /// empty candidate list never trip the range assertion.
    pub fn gen_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.inner.gen_range(0..len)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG position.
///
/// ChaCha8's word position makes capture and restore O(1) regardless of
/// how many values were drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
