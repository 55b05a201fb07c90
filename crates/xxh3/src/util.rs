//! Word reads and the multiply/xorshift building blocks every regime shares.

#![allow(clippy::indexing_slicing)] // Offsets are fixed by the format and checked by slice bounds

// xxh32 primes
pub(crate) const PRIME32_1: u32 = 0x9E37_79B1;
pub(crate) const PRIME32_2: u32 = 0x85EB_CA77;
pub(crate) const PRIME32_3: u32 = 0xC2B2_AE3D;

// xxh64 primes
pub(crate) const PRIME64_1: u64 = 0x9E37_79B1_85EB_CA87;
pub(crate) const PRIME64_2: u64 = 0xC2B2_AE3D_27D4_EB4F;
pub(crate) const PRIME64_3: u64 = 0x1656_67B1_9E37_79F9;
pub(crate) const PRIME64_4: u64 = 0x85EB_CA77_C2B2_AE63;
pub(crate) const PRIME64_5: u64 = 0x27D4_EB2F_1656_67C5;

const PRIME_MX1: u64 = 0x1656_6791_9E37_79F9;
const PRIME_MX2: u64 = 0x9FB2_1C65_1E98_DF25;

#[inline(always)]
pub(crate) fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
  let mut word = [0u8; 4];
  word.copy_from_slice(&bytes[offset..offset + 4]);
  u32::from_le_bytes(word)
}

#[inline(always)]
pub(crate) fn read_u64_le(bytes: &[u8], offset: usize) -> u64 {
  let mut word = [0u8; 8];
  word.copy_from_slice(&bytes[offset..offset + 8]);
  u64::from_le_bytes(word)
}

#[inline(always)]
pub(crate) const fn mult32_to64(left: u32, right: u32) -> u64 {
  (left as u64).wrapping_mul(right as u64)
}

#[inline(always)]
pub(crate) const fn xorshift64(value: u64, shift: u32) -> u64 {
  value ^ (value >> shift)
}

/// Full 64x64 -> 128 multiply, returned as (low, high).
#[inline(always)]
pub(crate) const fn mul64_to128(left: u64, right: u64) -> (u64, u64) {
  let product = (left as u128).wrapping_mul(right as u128);
  (product as u64, (product >> 64) as u64)
}

#[inline(always)]
pub(crate) const fn mul128_fold64(left: u64, right: u64) -> u64 {
  let (low, high) = mul64_to128(left, right);
  low ^ high
}

/// XXH3 finalizer used by the 9+ byte regimes.
#[inline(always)]
pub(crate) const fn avalanche(mut value: u64) -> u64 {
  value = xorshift64(value, 37);
  value = value.wrapping_mul(PRIME_MX1);
  xorshift64(value, 32)
}

/// "rrmxmx" finalizer for the 4..=8 byte regime; folds the length in.
#[inline(always)]
pub(crate) const fn rrmxmx(mut value: u64, len: u64) -> u64 {
  value ^= value.rotate_left(49) ^ value.rotate_left(24);
  value = value.wrapping_mul(PRIME_MX2);
  value ^= (value >> 35).wrapping_add(len);
  value = value.wrapping_mul(PRIME_MX2);
  xorshift64(value, 28)
}

/// XXH64's finalizer, reused for the 0..=3 byte regimes.
#[inline(always)]
pub(crate) const fn xxh64_avalanche(mut value: u64) -> u64 {
  value ^= value >> 33;
  value = value.wrapping_mul(PRIME64_2);
  value ^= value >> 29;
  value = value.wrapping_mul(PRIME64_3);
  value ^ (value >> 32)
}

/// The second half of the 4..=8 byte 128-bit finalizer.
#[inline(always)]
pub(crate) const fn mx_fold(mut value: u64) -> u64 {
  value = xorshift64(value, 35).wrapping_mul(PRIME_MX2);
  xorshift64(value, 28)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn reads_are_little_endian() {
    let bytes = [1u8, 2, 3, 4, 5, 6, 7, 8, 9];
    assert_eq!(read_u32_le(&bytes, 0), 0x0403_0201);
    assert_eq!(read_u64_le(&bytes, 1), 0x0908_0706_0504_0302);
  }

  #[test]
  fn fold_multiply_splits_product() {
    assert_eq!(mul64_to128(u64::MAX, u64::MAX), (1, u64::MAX - 1));
    assert_eq!(mul128_fold64(u64::MAX, u64::MAX), u64::MAX);
    assert_eq!(mul128_fold64(0, 0x1234), 0);
  }

  #[test]
  fn finalizers_fix_zero() {
    // All three finalizers are xorshift/multiply chains, so zero stays zero.
    assert_eq!(avalanche(0), 0);
    assert_eq!(xxh64_avalanche(0), 0);
    assert_eq!(mx_fold(0), 0);
    assert_ne!(avalanche(1), 1);
  }

  #[test]
  fn rrmxmx_depends_on_length() {
    assert_ne!(rrmxmx(0xDEAD_BEEF, 4), rrmxmx(0xDEAD_BEEF, 8));
  }
}
