//! Inputs of 17..=240 bytes: 16-byte chunks mixed against the secret, no
//! accumulator lanes.

use crate::{
  secret::SECRET_SIZE_MIN,
  util::{PRIME64_1, PRIME64_2, PRIME64_4, avalanche, mul128_fold64, read_u64_le},
};

/// Secret offset for chunks 8.. of the 129..=240 regime (not 16-aligned).
const MID_START_OFFSET: usize = 3;
/// Distance from `SECRET_SIZE_MIN` of the secret window for the last chunk.
const MID_LAST_OFFSET: usize = 17;

/// Mix one 16-byte input chunk with 16 seed-adjusted secret bytes.
#[inline(always)]
fn mix16(input: &[u8], at: usize, secret: &[u8], key_at: usize, seed: u64) -> u64 {
  let lo = read_u64_le(input, at) ^ read_u64_le(secret, key_at).wrapping_add(seed);
  let hi = read_u64_le(input, at + 8) ^ read_u64_le(secret, key_at + 8).wrapping_sub(seed);
  mul128_fold64(lo, hi)
}

/// Two 16-byte chunks into a two-lane accumulator; each lane also absorbs the
/// other chunk's raw sum.
#[inline(always)]
fn mix32(
  acc: (u64, u64),
  input: &[u8],
  first: usize,
  second: usize,
  secret: &[u8],
  key_at: usize,
  seed: u64,
) -> (u64, u64) {
  let raw_sum = |at: usize| read_u64_le(input, at).wrapping_add(read_u64_le(input, at + 8));
  let lo = acc.0.wrapping_add(mix16(input, first, secret, key_at, seed)) ^ raw_sum(second);
  let hi = acc.1.wrapping_add(mix16(input, second, secret, key_at + 16, seed)) ^ raw_sum(first);
  (lo, hi)
}

/// Number of extra chunk pairs beyond the outermost one, by length tier
/// (17..=32 -> 0, 33..=64 -> 1, 65..=96 -> 2, 97..=128 -> 3).
#[inline(always)]
const fn inner_pairs(len: usize) -> usize {
  (len - 1) / 32
}

#[inline(always)]
fn finish128(acc: (u64, u64), len: usize, seed: u64) -> u128 {
  let lo = acc.0.wrapping_add(acc.1);
  let hi = acc
    .0
    .wrapping_mul(PRIME64_1)
    .wrapping_add(acc.1.wrapping_mul(PRIME64_4))
    .wrapping_add((len as u64).wrapping_sub(seed).wrapping_mul(PRIME64_2));
  u128::from(avalanche(lo)) | (u128::from(avalanche(hi).wrapping_neg()) << 64)
}

pub(crate) fn hash64_17to128(input: &[u8], seed: u64, secret: &[u8]) -> u64 {
  let len = input.len();
  let mut acc = (len as u64).wrapping_mul(PRIME64_1);

  for pair in (0..=inner_pairs(len)).rev() {
    acc = acc
      .wrapping_add(mix16(input, 16 * pair, secret, 32 * pair, seed))
      .wrapping_add(mix16(input, len - 16 * (pair + 1), secret, 32 * pair + 16, seed));
  }

  avalanche(acc)
}

#[inline(never)]
pub(crate) fn hash64_129to240(input: &[u8], seed: u64, secret: &[u8]) -> u64 {
  let len = input.len();
  let mut acc = (len as u64).wrapping_mul(PRIME64_1);

  for chunk in 0..8 {
    acc = acc.wrapping_add(mix16(input, 16 * chunk, secret, 16 * chunk, seed));
  }
  acc = avalanche(acc);

  for chunk in 8..len / 16 {
    acc = acc.wrapping_add(mix16(input, 16 * chunk, secret, 16 * (chunk - 8) + MID_START_OFFSET, seed));
  }

  acc = acc.wrapping_add(mix16(input, len - 16, secret, SECRET_SIZE_MIN - MID_LAST_OFFSET, seed));
  avalanche(acc)
}

pub(crate) fn hash128_17to128(input: &[u8], seed: u64, secret: &[u8]) -> u128 {
  let len = input.len();
  let mut acc = ((len as u64).wrapping_mul(PRIME64_1), 0u64);

  for pair in (0..=inner_pairs(len)).rev() {
    acc = mix32(acc, input, 16 * pair, len - 16 * (pair + 1), secret, 32 * pair, seed);
  }

  finish128(acc, len, seed)
}

#[inline(never)]
pub(crate) fn hash128_129to240(input: &[u8], seed: u64, secret: &[u8]) -> u128 {
  let len = input.len();
  let mut acc = ((len as u64).wrapping_mul(PRIME64_1), 0u64);

  for round in 0..4 {
    acc = mix32(acc, input, 32 * round, 32 * round + 16, secret, 32 * round, seed);
  }
  acc = (avalanche(acc.0), avalanche(acc.1));

  for round in 4..len / 32 {
    let key_at = 32 * (round - 4) + MID_START_OFFSET;
    acc = mix32(acc, input, 32 * round, 32 * round + 16, secret, key_at, seed);
  }

  acc = mix32(
    acc,
    input,
    len - 16,
    len - 32,
    secret,
    SECRET_SIZE_MIN - MID_LAST_OFFSET - 16,
    seed.wrapping_neg(),
  );

  finish128(acc, len, seed)
}
