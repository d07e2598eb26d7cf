//! Entropy sources used to reseed the generator.

use std::sync::Arc;

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::EntropyError;

/// Supplier of cryptographically strong seed bytes.
///
/// Implementations may block and must tolerate concurrent calls from many
/// generator instances.
pub trait EntropySource: Send + Sync {
    /// Fills `dest` entirely with fresh entropy.
    ///
    /// # Errors
    ///
    /// Returns [`EntropyError::Unavailable`] if the bytes cannot be produced.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError>;
}

impl<T: EntropySource + ?Sized> EntropySource for &T {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        (**self).fill_bytes(dest)
    }
}

impl<T: EntropySource + ?Sized> EntropySource for Arc<T> {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        (**self).fill_bytes(dest)
    }
}

impl<T: EntropySource + ?Sized> EntropySource for Box<T> {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        (**self).fill_bytes(dest)
    }
}

/// Operating-system CSPRNG (`getrandom` through [`OsRng`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropySource;

impl EntropySource for OsEntropySource {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        OsRng.try_fill_bytes(dest).map_err(|err| {
            log::error!("operating system entropy unavailable: {err}");
            EntropyError::Unavailable
        })
    }
}
