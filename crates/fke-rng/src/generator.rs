//! Fast-key-erasure generator over a block cipher in ECB mode.
//!
//! Every block derivation encrypts two fixed plaintexts under the current
//! key: one becomes the next key, the other the next output block. The old
//! key is overwritten before any byte of the new block is handed out, and
//! each handed-out byte is zeroed in place, so a later snapshot of the state
//! holds nothing that was already emitted.

use core::fmt;

use serde::{Serialize, Serializer};
use zeroize::{Zeroize, Zeroizing};

use crate::accessors::RandomBits;
use crate::constants::{Layout, OutputLayout};
use crate::engine::{Aes256Ecb, BlockCipher, KEY_SIZE};
use crate::entropy::EntropySource;
use crate::error::{CipherError, Error, Result};

/// Block derivations allowed between two entropy reseeds.
pub const RESEED_INTERVAL: u32 = 257;

/// Largest seed accepted by [`FastKeyErasureRng::reseed_with`].
pub const SEED_SIZE: usize = KEY_SIZE;

/// Mixing rounds applied per seed.
const SEED_ROUNDS: usize = 2;

/// Counters exposed for tests through [`FastKeyErasureRng::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneratorStats {
    /// Output blocks derived since construction.
    pub blocks_derived: u64,
    /// Reseeds drawn from the entropy source since construction.
    pub reseeds: u64,
}

/// Forward-secure CSPRNG with `N`-byte output blocks.
///
/// The entropy source is injected; construct one instance per worker rather
/// than sharing one behind a lock. The first request always reseeds from the
/// entropy source, so nothing derived only from compiled-in constants is ever
/// returned.
pub struct FastKeyErasureRng<E, C = Aes256Ecb, const N: usize = 64> {
    entropy: E,
    cipher: C,
    output: [u8; N],
    cursor: usize,
    reseed_counter: u32,
    poisoned: bool,
    stats: GeneratorStats,
}

/// Generator with 96-byte output blocks.
pub type WideFastKeyErasureRng<E> = FastKeyErasureRng<E, Aes256Ecb, 96>;

impl<E: EntropySource> FastKeyErasureRng<E, Aes256Ecb, 64> {
    /// Creates a generator over AES-256 with 64-byte output blocks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the cipher cannot be keyed.
    pub fn new(entropy: E) -> Result<Self> {
        Self::with_cipher(entropy, Aes256Ecb::new())
    }
}

impl<E: EntropySource> FastKeyErasureRng<E, Aes256Ecb, 96> {
    /// Creates a generator over AES-256 with 96-byte output blocks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the cipher cannot be keyed.
    pub fn new_wide(entropy: E) -> Result<Self> {
        Self::with_cipher(entropy, Aes256Ecb::new())
    }
}

impl<E, C, const N: usize> FastKeyErasureRng<E, C, N>
where
    E: EntropySource,
    C: BlockCipher,
    Layout<N>: OutputLayout<N>,
{
    const PLAINTEXT_K: [u8; KEY_SIZE] = <Layout<N> as OutputLayout<N>>::PLAINTEXT_K;
    const PLAINTEXT_V: [u8; N] = <Layout<N> as OutputLayout<N>>::PLAINTEXT_V;

    /// Creates a generator over an arbitrary block cipher.
    ///
    /// The cipher is keyed with the layout's constant key. No entropy is
    /// drawn until the first request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the output size is not a whole
    /// number of cipher blocks or the cipher rejects the key.
    pub fn with_cipher(entropy: E, mut cipher: C) -> Result<Self> {
        if N == 0 || N % C::BLOCK_SIZE != 0 {
            return Err(Error::Configuration(CipherError::InvalidLength {
                len: N,
                block: C::BLOCK_SIZE,
            }));
        }

        let mut key = Zeroizing::new(Self::PLAINTEXT_K);
        cipher.rekey(&mut key).map_err(Error::Configuration)?;

        log::trace!("fast-key-erasure generator created with {N}-byte blocks");
        Ok(Self {
            entropy,
            cipher,
            output: [0u8; N],
            cursor: N,
            reseed_counter: RESEED_INTERVAL,
            poisoned: false,
            stats: GeneratorStats::default(),
        })
    }

    /// Returns `length` fresh bytes.
    ///
    /// # Errors
    ///
    /// Fails only on entropy or cipher failure; nothing is returned then.
    pub fn next_bytes(&mut self, length: usize) -> Result<Vec<u8>> {
        let mut bytes = vec![0u8; length];
        self.fill(&mut bytes)?;
        Ok(bytes)
    }

    /// Fills all of `dest` with fresh bytes.
    ///
    /// Output is staged and copied into `dest` only once the whole length
    /// has been produced.
    ///
    /// # Errors
    ///
    /// On failure `dest` is left exactly as it was.
    pub fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        let mut staging = Zeroizing::new(vec![0u8; dest.len()]);
        let mut done = 0;
        while done < staging.len() {
            self.ensure_block()?;
            let count = (N - self.cursor).min(staging.len() - done);
            let src = &mut self.output[self.cursor..self.cursor + count];
            staging[done..done + count].copy_from_slice(src);
            src.zeroize();
            self.cursor += count;
            done += count;
        }
        dest.copy_from_slice(&staging);
        Ok(())
    }

    /// Fills `dest[offset..offset + length]`, leaving the rest untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] without consuming output if the
    /// range does not fit in `dest`.
    pub fn fill_at(&mut self, dest: &mut [u8], offset: usize, length: usize) -> Result<()> {
        let end = offset
            .checked_add(length)
            .filter(|&end| end <= dest.len())
            .ok_or(Error::InvalidArgument("offset and length exceed the buffer"))?;
        self.fill(&mut dest[offset..end])
    }

    /// Returns the next byte, zeroing its slot in the output block.
    pub fn read_byte(&mut self) -> Result<u8> {
        self.ensure_block()?;
        let byte = core::mem::take(&mut self.output[self.cursor]);
        self.cursor += 1;
        Ok(byte)
    }

    /// Returns a 128-bit identifier built from two consecutive 64-bit draws.
    pub fn next_uuid(&mut self) -> Result<u128> {
        self.uuid()
    }

    /// Mixes `seed` into the key; `0` is ignored.
    ///
    /// The value is encoded as 8 big-endian bytes. Caller seeds supplement the
    /// entropy schedule and never postpone the next entropy reseed.
    pub fn set_seed(&mut self, seed: u64) -> Result<()> {
        if seed == 0 {
            return Ok(());
        }
        let bytes = Zeroizing::new(seed.to_be_bytes());
        self.reseed_with(&bytes[..])
    }

    /// Mixes 1 to 32 caller-provided bytes into the key.
    ///
    /// Unread bytes of the current block are discarded, so the next read
    /// derives a block under the mixed key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty or oversized seed.
    pub fn reseed_with(&mut self, seed: &[u8]) -> Result<()> {
        if seed.is_empty() || seed.len() > SEED_SIZE {
            return Err(Error::InvalidArgument("seed must be 1 to 32 bytes"));
        }
        self.ensure_usable()?;
        self.mix_seed(seed)
    }

    /// Reseeds immediately from the entropy source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Entropy`] if the source fails; the key is untouched
    /// and the next request retries.
    pub fn reseed(&mut self) -> Result<()> {
        self.ensure_usable()?;
        self.reseed_from_source()
    }

    /// Counters for block derivations and reseeds.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn stats(&self) -> GeneratorStats {
        self.stats
    }

    /// Position of the next unread byte in the output block.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Raw view of the output block, for checking erasure of consumed bytes.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn output_block(&self) -> &[u8; N] {
        &self.output
    }

    fn ensure_usable(&self) -> Result<()> {
        if self.poisoned {
            return Err(Error::Poisoned);
        }
        Ok(())
    }

    fn ensure_block(&mut self) -> Result<()> {
        if self.cursor >= N {
            self.derive_block()?;
        }
        Ok(())
    }

    fn derive_block(&mut self) -> Result<()> {
        self.ensure_usable()?;
        if self.reseed_counter >= RESEED_INTERVAL {
            self.reseed_from_source()?;
        }

        let mut next_key = Zeroizing::new([0u8; KEY_SIZE]);
        if let Err(err) = self.step(&mut next_key) {
            return Err(self.poison(err));
        }

        self.cursor = 0;
        self.reseed_counter += 1;
        self.stats.blocks_derived += 1;
        Ok(())
    }

    /// Derives the next key and output block under the current key, then
    /// installs the next key.
    fn step(&mut self, next_key: &mut [u8; KEY_SIZE]) -> Result<(), CipherError> {
        self.cipher.encrypt(&Self::PLAINTEXT_K, next_key)?;
        self.cipher.encrypt(&Self::PLAINTEXT_V, &mut self.output)?;
        self.cipher.rekey(next_key)
    }

    fn reseed_from_source(&mut self) -> Result<()> {
        let mut seed = Zeroizing::new([0u8; SEED_SIZE]);
        self.entropy.fill_bytes(&mut seed[..]).map_err(|err| {
            log::warn!("entropy source failed during reseed: {err}");
            Error::from(err)
        })?;
        self.mix_seed(&seed[..])?;
        self.reseed_counter = 0;
        self.stats.reseeds += 1;
        log::debug!(
            "reseeded from entropy source after {} blocks",
            self.stats.blocks_derived
        );
        Ok(())
    }

    fn mix_seed(&mut self, seed: &[u8]) -> Result<()> {
        for _ in 0..SEED_ROUNDS {
            let mut next_key = Zeroizing::new([0u8; KEY_SIZE]);
            if let Err(err) = self.mix_round(&mut next_key, seed) {
                return Err(self.poison(err));
            }
        }
        self.discard_block();
        Ok(())
    }

    fn mix_round(&mut self, next_key: &mut [u8; KEY_SIZE], seed: &[u8]) -> Result<(), CipherError> {
        self.cipher.encrypt(&Self::PLAINTEXT_K, next_key)?;
        next_key.iter_mut().zip(seed).for_each(|(k, s)| *k ^= s);
        self.cipher.rekey(next_key)
    }

    fn discard_block(&mut self) {
        self.output[self.cursor.min(N)..].zeroize();
        self.cursor = N;
    }

    fn poison(&mut self, err: CipherError) -> Error {
        log::error!("block cipher failed, generator poisoned: {err}");
        self.poisoned = true;
        self.output.zeroize();
        self.cursor = N;
        // Best effort: replace whatever key the cipher still holds.
        let _ = self.cipher.rekey(&mut [0u8; KEY_SIZE]);
        Error::CryptoOperation(err)
    }
}

impl<E, C, const N: usize> RandomBits for FastKeyErasureRng<E, C, N>
where
    E: EntropySource,
    C: BlockCipher,
    Layout<N>: OutputLayout<N>,
{
    fn next(&mut self, num_bits: u32) -> Result<u32> {
        if !(1..=32).contains(&num_bits) {
            return Err(Error::InvalidArgument("bit count must be within 1..=32"));
        }
        let num_bytes = num_bits.div_ceil(8);
        let mut value = 0u32;
        for _ in 0..num_bytes {
            value = (value << 8) | u32::from(self.read_byte()?);
        }
        Ok(value >> (num_bytes * 8 - num_bits))
    }
}

impl<E, C, const N: usize> rand::RngCore for FastKeyErasureRng<E, C, N>
where
    E: EntropySource,
    C: BlockCipher,
    Layout<N>: OutputLayout<N>,
{
    fn next_u32(&mut self) -> u32 {
        self.u32()
            .unwrap_or_else(|err| panic!("fast-key-erasure generator failed: {err}"))
    }

    fn next_u64(&mut self) -> u64 {
        self.u64()
            .unwrap_or_else(|err| panic!("fast-key-erasure generator failed: {err}"))
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(err) = self.fill(dest) {
            panic!("fast-key-erasure generator failed: {err}");
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand::Error> {
        self.fill(dest).map_err(rand::Error::new)
    }
}

impl<E, C, const N: usize> rand::CryptoRng for FastKeyErasureRng<E, C, N>
where
    E: EntropySource,
    C: BlockCipher,
    Layout<N>: OutputLayout<N>,
{
}

impl<E, C, const N: usize> Serialize for FastKeyErasureRng<E, C, N> {
    fn serialize<S: Serializer>(&self, _serializer: S) -> core::result::Result<S::Ok, S::Error> {
        use serde::ser::Error as _;

        log::warn!("refused to serialize fast-key-erasure generator state");
        Err(S::Error::custom(Error::NotSerializable))
    }
}

impl<E, C, const N: usize> fmt::Debug for FastKeyErasureRng<E, C, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FastKeyErasureRng")
            .field("block_size", &N)
            .field("cursor", &self.cursor)
            .field("reseed_counter", &self.reseed_counter)
            .field("poisoned", &self.poisoned)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl<E, C, const N: usize> Drop for FastKeyErasureRng<E, C, N> {
    fn drop(&mut self) {
        self.output.zeroize();
    }
}
