//! Deterministic and failure-injecting collaborators for tests.

use std::cell::Cell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::engine::{Aes256Ecb, BlockCipher, KEY_SIZE};
use crate::entropy::{EntropySource, OsEntropySource};
use crate::error::{CipherError, EntropyError};

/// Entropy source repeating a fixed byte pattern on every call.
#[derive(Debug, Clone)]
pub struct FixedEntropySource {
    pattern: Vec<u8>,
}

impl FixedEntropySource {
    /// Repeats `pattern` (must not be empty) to fill each request.
    pub fn new(pattern: &[u8]) -> Self {
        assert!(!pattern.is_empty(), "pattern must not be empty");
        Self {
            pattern: pattern.to_vec(),
        }
    }

    /// Pattern `00 01 02 .. 1f`.
    pub fn counting() -> Self {
        let pattern: Vec<u8> = (0..KEY_SIZE as u8).collect();
        Self::new(&pattern)
    }
}

impl EntropySource for FixedEntropySource {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        for (dst, src) in dest.iter_mut().zip(self.pattern.iter().cycle()) {
            *dst = *src;
        }
        Ok(())
    }
}

/// Reproducible entropy from a ChaCha20 stream.
#[derive(Debug)]
pub struct SeededEntropySource {
    rng: Mutex<ChaCha20Rng>,
}

impl SeededEntropySource {
    /// Creates a source whose stream depends only on `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::seed_from_u64(seed)),
        }
    }
}

impl EntropySource for SeededEntropySource {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        let mut rng = self.rng.lock().map_err(|_| EntropyError::Unavailable)?;
        rng.fill_bytes(dest);
        Ok(())
    }
}

/// Configurable behavior for [`MockEntropySource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockEntropySourceBehaviour {
    /// Normal operation (delegates to the operating system).
    None,
    /// Always fail.
    FailAlways,
    /// Fail on the Nth call (1-indexed).
    FailAtNthFillBytes(usize),
}

/// Entropy source counting calls and failing on demand.
#[derive(Debug)]
pub struct MockEntropySource {
    behaviour: MockEntropySourceBehaviour,
    calls: AtomicUsize,
}

impl MockEntropySource {
    /// Creates a mock with the given behaviour.
    pub fn new(behaviour: MockEntropySourceBehaviour) -> Self {
        Self {
            behaviour,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `fill_bytes` calls so far, failed ones included.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EntropySource for MockEntropySource {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        match self.behaviour {
            MockEntropySourceBehaviour::FailAlways => Err(EntropyError::Unavailable),
            MockEntropySourceBehaviour::FailAtNthFillBytes(n) if n == call => {
                Err(EntropyError::Unavailable)
            }
            _ => OsEntropySource.fill_bytes(dest),
        }
    }
}

/// Configurable behavior for [`MockCipher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockCipherBehaviour {
    /// Behave exactly like [`Aes256Ecb`].
    None,
    /// Fail the Nth `rekey` call (1-indexed).
    FailRekeyAt(usize),
    /// Fail the Nth `encrypt` call (1-indexed), before writing output.
    FailEncryptAt(usize),
}

/// AES-256 engine with injectable failures.
#[derive(Debug)]
pub struct MockCipher {
    inner: Aes256Ecb,
    behaviour: MockCipherBehaviour,
    rekeys: usize,
    encrypts: Cell<usize>,
}

impl MockCipher {
    /// Creates a mock with the given behaviour.
    pub fn new(behaviour: MockCipherBehaviour) -> Self {
        Self {
            inner: Aes256Ecb::new(),
            behaviour,
            rekeys: 0,
            encrypts: Cell::new(0),
        }
    }
}

impl BlockCipher for MockCipher {
    const BLOCK_SIZE: usize = Aes256Ecb::BLOCK_SIZE;

    fn rekey(&mut self, key: &mut [u8; KEY_SIZE]) -> Result<(), CipherError> {
        self.rekeys += 1;
        if self.behaviour == MockCipherBehaviour::FailRekeyAt(self.rekeys) {
            key.iter_mut().for_each(|b| *b = 0);
            return Err(CipherError::Unavailable("injected rekey failure"));
        }
        self.inner.rekey(key)
    }

    fn encrypt(&self, input: &[u8], output: &mut [u8]) -> Result<(), CipherError> {
        let call = self.encrypts.get() + 1;
        self.encrypts.set(call);
        if self.behaviour == MockCipherBehaviour::FailEncryptAt(call) {
            return Err(CipherError::Unavailable("injected encrypt failure"));
        }
        self.inner.encrypt(input, output)
    }
}
