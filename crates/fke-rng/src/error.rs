//! Error types for the generator and its collaborators.

use thiserror::Error;

/// Failures reported by a [`crate::BlockCipher`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CipherError {
    /// Input and output lengths differ or are not whole blocks.
    #[error("ECB input of {len} bytes is not a whole number of {block}-byte blocks")]
    InvalidLength {
        /// Offending length in bytes.
        len: usize,
        /// Cipher block size in bytes.
        block: usize,
    },
    /// The primitive could not be keyed or used.
    #[error("block cipher unavailable: {0}")]
    Unavailable(&'static str),
}

/// Failures reported by an [`crate::EntropySource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EntropyError {
    /// The source could not produce the requested bytes.
    #[error("entropy source unavailable")]
    Unavailable,
}

/// Errors returned by [`crate::FastKeyErasureRng`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The cipher rejected the initial key; the generator was not created.
    #[error("cannot configure block cipher: {0}")]
    Configuration(#[source] CipherError),
    /// Bad offset, length, bit count or seed; state is unchanged.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The cipher failed after construction; the instance is now poisoned.
    #[error("block cipher operation failed: {0}")]
    CryptoOperation(#[source] CipherError),
    /// An earlier cipher failure left the instance unusable.
    #[error("generator is poisoned by an earlier cipher failure")]
    Poisoned,
    /// The entropy source failed during a reseed.
    #[error("reseed failed: {0}")]
    Entropy(#[from] EntropyError),
    /// Generator state must never be persisted.
    #[error("fast-key-erasure generator state is not serializable")]
    NotSerializable,
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
