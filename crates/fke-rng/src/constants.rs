//! Fixed plaintext blocks encrypted under the current key.
//!
//! Each layout pairs a key-sized block (`PLAINTEXT_K`, encrypted to derive the
//! next key) with an output-sized block (`PLAINTEXT_V`, encrypted to derive
//! the next output block). The 16-byte words of one layout were chosen
//! offline: no two adjacent nibbles are equal, no aligned nibble pair repeats
//! within a word, and no two words share a nibble value at any position.
//! Among candidates meeting those rules the set with the largest minimum
//! pairwise Hamming distance was kept (68 bits for the 64-byte layout, 64
//! bits for the 96-byte one).

use crate::engine::KEY_SIZE;

/// Key-derivation plaintext for the 64-byte layout.
pub const PLAINTEXT_K_64: [u8; KEY_SIZE] = [
    0x57, 0xc3, 0xeb, 0xfc, 0x21, 0xe4, 0x7f, 0xe0, 0xcd, 0x1e, 0x21, 0x59, 0x5c, 0x92, 0x3c, 0x19,
    0xa0, 0xbd, 0xc8, 0xb0, 0x94, 0x9a, 0xb0, 0x9e, 0x7c, 0xe0, 0xa6, 0xb7, 0x4f, 0x4c, 0x61, 0x9d,
];

/// Output-derivation plaintext for the 64-byte layout.
pub const PLAINTEXT_V_64: [u8; 64] = [
    0x92, 0x12, 0xdc, 0xd8, 0xdb, 0x73, 0x47, 0x49, 0x82, 0xc3, 0xf3, 0xc0, 0x6a, 0x6d, 0x90, 0xfc,
    0x2c, 0x37, 0x97, 0x61, 0xa0, 0xd2, 0x05, 0xd7, 0xae, 0x2f, 0x95, 0x68, 0xa5, 0xa0, 0xa6, 0xc5,
    0x63, 0xf4, 0x79, 0x45, 0x13, 0x8c, 0x89, 0x62, 0xb8, 0xf7, 0xbe, 0xa6, 0x78, 0xf9, 0xdf, 0x6a,
    0xfd, 0x4c, 0x2e, 0x2a, 0x76, 0x0b, 0xa2, 0xc3, 0x0f, 0x71, 0x7a, 0x0b, 0xe0, 0xd6, 0x58, 0xb7,
];

/// Key-derivation plaintext for the 96-byte layout.
pub const PLAINTEXT_K_96: [u8; KEY_SIZE] = [
    0x5a, 0xcf, 0xd8, 0x35, 0xc4, 0xb2, 0xe6, 0xeb, 0xe1, 0x5d, 0x37, 0x82, 0xd3, 0x65, 0x70, 0x1a,
    0xdc, 0x94, 0x65, 0xfc, 0xbf, 0x67, 0x57, 0x89, 0x76, 0x4c, 0x6f, 0xc0, 0xad, 0x0f, 0x1e, 0x79,
];

/// Output-derivation plaintext for the 96-byte layout.
pub const PLAINTEXT_V_96: [u8; 96] = [
    0x9e, 0x2a, 0x20, 0x83, 0x8d, 0x0b, 0x7e, 0xb5, 0x87, 0xf7, 0x13, 0x2a, 0xf8, 0xd4, 0x35, 0xe3,
    0x24, 0xd2, 0x1e, 0xa4, 0x17, 0xe6, 0x24, 0x71, 0x04, 0xb6, 0xe6, 0x06, 0x97, 0x30, 0x97, 0xd0,
    0xb5, 0x7c, 0x7b, 0xcd, 0x0e, 0xa9, 0xd8, 0xae, 0xce, 0x10, 0x42, 0xae, 0x34, 0xa8, 0xab, 0x8c,
    0xf0, 0x4d, 0xc2, 0x7e, 0xda, 0x24, 0x91, 0xf6, 0x3b, 0x62, 0xf0, 0xd5, 0x8e, 0x5a, 0xf3, 0xcb,
    0x87, 0x83, 0xb1, 0xb2, 0xe0, 0x1e, 0x89, 0x4f, 0x43, 0xd4, 0xc8, 0x43, 0x16, 0xb7, 0xd2, 0x9d,
    0x1b, 0x05, 0xaf, 0xe7, 0x63, 0x98, 0x6c, 0x67, 0x2a, 0x7b, 0x7d, 0xe1, 0x2b, 0xc9, 0x84, 0x6f,
];

/// Marker type selecting an output block size of `N` bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Layout<const N: usize>;

/// Constants tied to one output block size.
pub trait OutputLayout<const N: usize> {
    /// Plaintext encrypted to derive the next key.
    const PLAINTEXT_K: [u8; KEY_SIZE];
    /// Plaintext encrypted to derive the next output block.
    const PLAINTEXT_V: [u8; N];
}

impl OutputLayout<64> for Layout<64> {
    const PLAINTEXT_K: [u8; KEY_SIZE] = PLAINTEXT_K_64;
    const PLAINTEXT_V: [u8; 64] = PLAINTEXT_V_64;
}

impl OutputLayout<96> for Layout<96> {
    const PLAINTEXT_K: [u8; KEY_SIZE] = PLAINTEXT_K_96;
    const PLAINTEXT_V: [u8; 96] = PLAINTEXT_V_96;
}
