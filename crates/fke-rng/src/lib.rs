//! Fast-key-erasure random number generation over AES-256.
//!
//! [`FastKeyErasureRng`] derives each output block together with its
//! successor key by encrypting two fixed plaintexts under the current key.
//! The key is replaced before output leaves the generator and each byte is
//! wiped as it is read, giving forward secrecy against later state capture.
//! Entropy is drawn from an injected [`EntropySource`] on the first request
//! and then every [`RESEED_INTERVAL`] block derivations.
//!
//! ```no_run
//! use fke_rng::{FastKeyErasureRng, OsEntropySource, RandomBits};
//!
//! let mut rng = FastKeyErasureRng::new(OsEntropySource)?;
//! let token = rng.next_bytes(32)?;
//! let roll = rng.u32_below(6)? + 1;
//! # let _ = (token, roll);
//! # Ok::<(), fke_rng::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod accessors;
mod constants;
mod engine;
mod entropy;
mod error;
mod generator;
mod version;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use accessors::RandomBits;
pub use constants::{Layout, OutputLayout};
pub use engine::{Aes256Ecb, BlockCipher, KEY_SIZE};
pub use entropy::{EntropySource, OsEntropySource};
pub use error::{CipherError, EntropyError, Error, Result};
pub use generator::{
    FastKeyErasureRng, GeneratorStats, WideFastKeyErasureRng, RESEED_INTERVAL, SEED_SIZE,
};
pub use version::{version, Version};
