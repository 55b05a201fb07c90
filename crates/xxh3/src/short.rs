//! Inputs of 0..=16 bytes.
//!
//! Each function assumes the caller already routed by [`Regime`](crate::Regime);
//! the length bounds in the names are preconditions.

#![allow(clippy::indexing_slicing)] // Regime routing guarantees the byte positions exist

use crate::util::{
  PRIME32_2, PRIME64_1, PRIME64_2, avalanche, mul64_to128, mul128_fold64, mult32_to64, mx_fold, read_u32_le,
  read_u64_le, rrmxmx, xxh64_avalanche,
};

/// First, middle and last byte plus the length, packed as the 1..=3 regimes expect.
#[inline(always)]
fn pack_1to3(input: &[u8]) -> u32 {
  let len = input.len();
  (u32::from(input[0]) << 16) | (u32::from(input[len >> 1]) << 24) | u32::from(input[len - 1]) | ((len as u32) << 8)
}

/// Mixes the low seed half, byte-swapped, into the high half.
#[inline(always)]
const fn fold_seed_4to8(seed: u64) -> u64 {
  seed ^ (((seed as u32).swap_bytes() as u64) << 32)
}

#[inline(always)]
pub(crate) fn hash64_empty(seed: u64, secret: &[u8]) -> u64 {
  xxh64_avalanche(seed ^ read_u64_le(secret, 56) ^ read_u64_le(secret, 64))
}

#[inline(always)]
pub(crate) fn hash64_1to3(input: &[u8], seed: u64, secret: &[u8]) -> u64 {
  let flip = u64::from(read_u32_le(secret, 0) ^ read_u32_le(secret, 4)).wrapping_add(seed);
  xxh64_avalanche(u64::from(pack_1to3(input)) ^ flip)
}

#[inline(always)]
pub(crate) fn hash64_4to8(input: &[u8], seed: u64, secret: &[u8]) -> u64 {
  let seed = fold_seed_4to8(seed);
  let first = u64::from(read_u32_le(input, 0));
  let last = u64::from(read_u32_le(input, input.len() - 4));

  let flip = (read_u64_le(secret, 8) ^ read_u64_le(secret, 16)).wrapping_sub(seed);
  let keyed = last.wrapping_add(first << 32) ^ flip;
  rrmxmx(keyed, input.len() as u64)
}

#[inline(always)]
pub(crate) fn hash64_9to16(input: &[u8], seed: u64, secret: &[u8]) -> u64 {
  let flip_lo = (read_u64_le(secret, 24) ^ read_u64_le(secret, 32)).wrapping_add(seed);
  let flip_hi = (read_u64_le(secret, 40) ^ read_u64_le(secret, 48)).wrapping_sub(seed);

  let lo = read_u64_le(input, 0) ^ flip_lo;
  let hi = read_u64_le(input, input.len() - 8) ^ flip_hi;

  avalanche(
    (input.len() as u64)
      .wrapping_add(lo.swap_bytes())
      .wrapping_add(hi)
      .wrapping_add(mul128_fold64(lo, hi)),
  )
}

#[inline(always)]
fn join(lo: u64, hi: u64) -> u128 {
  u128::from(lo) | (u128::from(hi) << 64)
}

#[inline(always)]
pub(crate) fn hash128_empty(seed: u64, secret: &[u8]) -> u128 {
  let flip_lo = read_u64_le(secret, 64) ^ read_u64_le(secret, 72);
  let flip_hi = read_u64_le(secret, 80) ^ read_u64_le(secret, 88);
  join(xxh64_avalanche(seed ^ flip_lo), xxh64_avalanche(seed ^ flip_hi))
}

#[inline(always)]
pub(crate) fn hash128_1to3(input: &[u8], seed: u64, secret: &[u8]) -> u128 {
  let packed_lo = pack_1to3(input);
  let packed_hi = packed_lo.swap_bytes().rotate_left(13);

  let flip_lo = u64::from(read_u32_le(secret, 0) ^ read_u32_le(secret, 4)).wrapping_add(seed);
  let flip_hi = u64::from(read_u32_le(secret, 8) ^ read_u32_le(secret, 12)).wrapping_sub(seed);

  join(
    xxh64_avalanche(u64::from(packed_lo) ^ flip_lo),
    xxh64_avalanche(u64::from(packed_hi) ^ flip_hi),
  )
}

#[inline(always)]
pub(crate) fn hash128_4to8(input: &[u8], seed: u64, secret: &[u8]) -> u128 {
  let seed = fold_seed_4to8(seed);
  let first = u64::from(read_u32_le(input, 0));
  let last = u64::from(read_u32_le(input, input.len() - 4));

  let flip = (read_u64_le(secret, 16) ^ read_u64_le(secret, 24)).wrapping_add(seed);
  let keyed = first.wrapping_add(last << 32) ^ flip;

  let (mut lo, mut hi) = mul64_to128(keyed, PRIME64_1.wrapping_add((input.len() as u64) << 2));
  hi = hi.wrapping_add(lo << 1);
  lo ^= hi >> 3;

  join(mx_fold(lo), avalanche(hi))
}

#[inline(always)]
pub(crate) fn hash128_9to16(input: &[u8], seed: u64, secret: &[u8]) -> u128 {
  let flip_lo = (read_u64_le(secret, 32) ^ read_u64_le(secret, 40)).wrapping_sub(seed);
  let flip_hi = (read_u64_le(secret, 48) ^ read_u64_le(secret, 56)).wrapping_add(seed);
  let first = read_u64_le(input, 0);
  let mut last = read_u64_le(input, input.len() - 8);

  let (mut mul_lo, mut mul_hi) = mul64_to128(first ^ last ^ flip_lo, PRIME64_1);
  mul_lo = mul_lo.wrapping_add(((input.len() as u64) - 1) << 54);
  last ^= flip_hi;
  mul_hi = mul_hi.wrapping_add(last.wrapping_add(mult32_to64(last as u32, PRIME32_2 - 1)));
  mul_lo ^= mul_hi.swap_bytes();

  let (out_lo, out_hi) = mul64_to128(mul_lo, PRIME64_2);
  join(avalanche(out_lo), avalanche(out_hi.wrapping_add(mul_hi.wrapping_mul(PRIME64_2))))
}
