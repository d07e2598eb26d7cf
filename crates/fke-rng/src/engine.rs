//! Block cipher seam and the AES-256 ECB engine behind it.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::Aes256;
use zeroize::Zeroize;

use crate::error::CipherError;

/// Key length consumed by every engine, in bytes.
pub const KEY_SIZE: usize = 32;

const AES_BLOCK_SIZE: usize = 16;

/// A keyed permutation applied block by block, without chaining.
pub trait BlockCipher {
    /// Cipher block size in bytes.
    const BLOCK_SIZE: usize;

    /// Installs `key` as the current key.
    ///
    /// `key` is wiped on every path, whether or not installation succeeds.
    fn rekey(&mut self, key: &mut [u8; KEY_SIZE]) -> Result<(), CipherError>;

    /// Encrypts `input` into `output` in ECB mode under the current key.
    ///
    /// Both slices must have the same length, a multiple of
    /// [`BlockCipher::BLOCK_SIZE`].
    fn encrypt(&self, input: &[u8], output: &mut [u8]) -> Result<(), CipherError>;
}

/// Checks an ECB request against `block` size.
pub(crate) fn check_ecb_lengths(
    input: &[u8],
    output: &[u8],
    block: usize,
) -> Result<(), CipherError> {
    if input.len() != output.len() || input.len() % block != 0 {
        return Err(CipherError::InvalidLength {
            len: input.len(),
            block,
        });
    }
    Ok(())
}

/// AES-256 in ECB mode, no padding.
///
/// Holds only the key schedule of the current key. Replacing or dropping the
/// schedule wipes it.
#[derive(Default)]
pub struct Aes256Ecb {
    cipher: Option<Aes256>,
}

impl Aes256Ecb {
    /// Creates an engine that refuses to encrypt until the first re-key.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlockCipher for Aes256Ecb {
    const BLOCK_SIZE: usize = AES_BLOCK_SIZE;

    fn rekey(&mut self, key: &mut [u8; KEY_SIZE]) -> Result<(), CipherError> {
        let cipher = Aes256::new_from_slice(&key[..]);
        key.zeroize();
        let cipher = cipher.map_err(|_| CipherError::Unavailable("AES-256 rejected the key"))?;
        self.cipher = Some(cipher);
        Ok(())
    }

    fn encrypt(&self, input: &[u8], output: &mut [u8]) -> Result<(), CipherError> {
        check_ecb_lengths(input, output, AES_BLOCK_SIZE)?;
        let cipher = self
            .cipher
            .as_ref()
            .ok_or(CipherError::Unavailable("AES-256 engine has no key"))?;
        for (src, dst) in input
            .chunks_exact(AES_BLOCK_SIZE)
            .zip(output.chunks_exact_mut(AES_BLOCK_SIZE))
        {
            cipher.encrypt_block_b2b(
                GenericArray::from_slice(src),
                GenericArray::from_mut_slice(dst),
            );
        }
        Ok(())
    }
}

impl core::fmt::Debug for Aes256Ecb {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Aes256Ecb(..)")
    }
}
