//! The secret table and the ways callers perturb it.
//!
//! The default 192-byte secret is public constant data. A seed never replaces
//! it: short inputs add/subtract the seed from the secret words they read,
//! long inputs use [`derive_secret`], which applies the same add/subtract to
//! every 16-byte pair of the table.

#![allow(clippy::indexing_slicing)] // Fixed 16-byte rounds over a fixed-size table

use crate::{
  error::SecretError,
  util::read_u64_le,
};

/// Smallest secret the algorithm can consume.
pub const SECRET_SIZE_MIN: usize = 136;

/// Size of the built-in secret.
pub const DEFAULT_SECRET_SIZE: usize = 192;

/// The published XXH3 secret.
pub const DEFAULT_SECRET: [u8; DEFAULT_SECRET_SIZE] = [
  0xb8, 0xfe, 0x6c, 0x39, 0x23, 0xa4, 0x4b, 0xbe, 0x7c, 0x01, 0x81, 0x2c, 0xf7, 0x21, 0xad, 0x1c, //
  0xde, 0xd4, 0x6d, 0xe9, 0x83, 0x90, 0x97, 0xdb, 0x72, 0x40, 0xa4, 0xa4, 0xb7, 0xb3, 0x67, 0x1f, //
  0xcb, 0x79, 0xe6, 0x4e, 0xcc, 0xc0, 0xe5, 0x78, 0x82, 0x5a, 0xd0, 0x7d, 0xcc, 0xff, 0x72, 0x21, //
  0xb8, 0x08, 0x46, 0x74, 0xf7, 0x43, 0x24, 0x8e, 0xe0, 0x35, 0x90, 0xe6, 0x81, 0x3a, 0x26, 0x4c, //
  0x3c, 0x28, 0x52, 0xbb, 0x91, 0xc3, 0x00, 0xcb, 0x88, 0xd0, 0x65, 0x8b, 0x1b, 0x53, 0x2e, 0xa3, //
  0x71, 0x64, 0x48, 0x97, 0xa2, 0x0d, 0xf9, 0x4e, 0x38, 0x19, 0xef, 0x46, 0xa9, 0xde, 0xac, 0xd8, //
  0xa8, 0xfa, 0x76, 0x3f, 0xe3, 0x9c, 0x34, 0x3f, 0xf9, 0xdc, 0xbb, 0xc7, 0xc7, 0x0b, 0x4f, 0x1d, //
  0x8a, 0x51, 0xe0, 0x4b, 0xcd, 0xb4, 0x59, 0x31, 0xc8, 0x9f, 0x7e, 0xc9, 0xd9, 0x78, 0x73, 0x64, //
  0xea, 0xc5, 0xac, 0x83, 0x34, 0xd3, 0xeb, 0xc3, 0xc5, 0x81, 0xa0, 0xff, 0xfa, 0x13, 0x63, 0xeb, //
  0x17, 0x0d, 0xdd, 0x51, 0xb7, 0xf0, 0xda, 0x49, 0xd3, 0x16, 0x55, 0x26, 0x29, 0xd4, 0x68, 0x9e, //
  0x2b, 0x16, 0xbe, 0x58, 0x7d, 0x47, 0xa1, 0xfc, 0x8f, 0xf8, 0xb8, 0xd1, 0x7a, 0xd0, 0x31, 0xce, //
  0x45, 0xcb, 0x3a, 0x8f, 0x95, 0x16, 0x04, 0x28, 0xaf, 0xd7, 0xfb, 0xca, 0xbb, 0x4b, 0x40, 0x7e, //
];

/// A validated secret of at least [`SECRET_SIZE_MIN`] bytes.
///
/// The secret is borrowed; hashing with it never copies or retains it.
///
/// ```
/// use xxh3::{Secret, xxh3_64, xxh3_64_with_secret, DEFAULT_SECRET};
///
/// let secret = Secret::new(&DEFAULT_SECRET)?;
/// assert_eq!(xxh3_64_with_secret(b"abc", secret), xxh3_64(b"abc", 0));
/// # Ok::<(), xxh3::SecretError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secret<'a> {
  bytes: &'a [u8],
}

impl<'a> Secret<'a> {
  /// Validate `bytes` as a secret.
  ///
  /// # Errors
  ///
  /// [`SecretError::TooShort`] if `bytes` is shorter than [`SECRET_SIZE_MIN`].
  #[inline]
  pub const fn new(bytes: &'a [u8]) -> Result<Self, SecretError> {
    if bytes.len() < SECRET_SIZE_MIN {
      return Err(SecretError::TooShort {
        len: bytes.len(),
        min: SECRET_SIZE_MIN,
      });
    }
    Ok(Self { bytes })
  }

  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &'a [u8] {
    self.bytes
  }

  /// Secret length in bytes (always `>= SECRET_SIZE_MIN`).
  #[inline]
  #[must_use]
  pub const fn size(&self) -> usize {
    self.bytes.len()
  }
}

impl Secret<'static> {
  /// The built-in table.
  #[inline]
  #[must_use]
  pub const fn default_secret() -> Self {
    Self { bytes: &DEFAULT_SECRET }
  }
}

impl Default for Secret<'static> {
  #[inline]
  fn default() -> Self {
    Self::default_secret()
  }
}

impl<'a> TryFrom<&'a [u8]> for Secret<'a> {
  type Error = SecretError;

  #[inline]
  fn try_from(bytes: &'a [u8]) -> Result<Self, Self::Error> {
    Self::new(bytes)
  }
}

/// Secret used by long inputs hashed with `seed`.
///
/// Seed 0 returns [`DEFAULT_SECRET`] unchanged.
#[must_use]
pub fn derive_secret(seed: u64) -> [u8; DEFAULT_SECRET_SIZE] {
  if seed == 0 {
    return DEFAULT_SECRET;
  }

  let mut derived = [0u8; DEFAULT_SECRET_SIZE];
  for (round, out) in derived.chunks_exact_mut(16).enumerate() {
    let lo = read_u64_le(&DEFAULT_SECRET, round * 16).wrapping_add(seed);
    let hi = read_u64_le(&DEFAULT_SECRET, round * 16 + 8).wrapping_sub(seed);
    out[..8].copy_from_slice(&lo.to_le_bytes());
    out[8..].copy_from_slice(&hi.to_le_bytes());
  }
  derived
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rejects_short_secrets() {
    let bytes = [0u8; SECRET_SIZE_MIN];
    assert!(Secret::new(&bytes[..SECRET_SIZE_MIN - 1]).is_err());
    assert_eq!(Secret::new(&bytes).map(|s| s.size()), Ok(SECRET_SIZE_MIN));
    assert_eq!(
      Secret::try_from(&bytes[..0]),
      Err(SecretError::TooShort { len: 0, min: SECRET_SIZE_MIN })
    );
  }

  #[test]
  fn seed_zero_keeps_default_table() {
    assert_eq!(derive_secret(0), DEFAULT_SECRET);
    assert_eq!(Secret::default().as_bytes(), &DEFAULT_SECRET[..]);
  }

  #[test]
  fn derived_secret_shifts_each_pair() {
    let seed = 0x0123_4567_89ab_cdef;
    let derived = derive_secret(seed);
    for round in 0..DEFAULT_SECRET_SIZE / 16 {
      let lo = read_u64_le(&derived, round * 16);
      let hi = read_u64_le(&derived, round * 16 + 8);
      assert_eq!(lo.wrapping_sub(seed), read_u64_le(&DEFAULT_SECRET, round * 16));
      assert_eq!(hi.wrapping_add(seed), read_u64_le(&DEFAULT_SECRET, round * 16 + 8));
    }
  }
}
