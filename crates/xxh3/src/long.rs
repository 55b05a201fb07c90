//! Inputs above [`MID_SIZE_MAX`](crate::MID_SIZE_MAX) bytes: eight 64-bit lanes
//! fed 64-byte stripes, scrambled once per block, merged at the end.
//!
//! A block is as many stripes as the secret can key when the key window slides
//! by [`SECRET_CONSUME_RATE`] bytes per stripe.

#![allow(clippy::indexing_slicing)] // Offsets derive from len > MID_SIZE_MAX and secret >= SECRET_SIZE_MIN

use crate::{
  kernels::Kernel,
  util::{
    PRIME32_1, PRIME32_2, PRIME32_3, PRIME64_1, PRIME64_2, PRIME64_3, PRIME64_4, PRIME64_5, avalanche,
    mul128_fold64, read_u64_le,
  },
};

pub(crate) const STRIPE_LEN: usize = 64;
pub(crate) const SECRET_CONSUME_RATE: usize = 8;
pub(crate) const ACC_NB: usize = STRIPE_LEN / 8;
/// Secret offset of the merge keys.
pub(crate) const SECRET_MERGEACCS_START: usize = 11;
/// Back-off from the end of the secret for the final stripe's key.
pub(crate) const SECRET_LASTACC_START: usize = 7;

pub(crate) type Acc = [u64; ACC_NB];

pub(crate) const INITIAL_ACC: Acc = [
  PRIME32_3 as u64,
  PRIME64_1,
  PRIME64_2,
  PRIME64_3,
  PRIME64_4,
  PRIME32_2 as u64,
  PRIME64_5,
  PRIME32_1 as u64,
];

/// Stripes per block for a secret of `secret_len` bytes.
#[inline]
pub(crate) const fn stripes_per_block(secret_len: usize) -> usize {
  (secret_len - STRIPE_LEN) / SECRET_CONSUME_RATE
}

/// Feed `nb_stripes` consecutive stripes, keyed from `secret[0..]` onward.
#[inline(always)]
pub(crate) fn accumulate(kernel: Kernel, acc: &mut Acc, stripes: &[u8], secret: &[u8], nb_stripes: usize) {
  for n in 0..nb_stripes {
    (kernel.accumulate_512)(acc, &stripes[n * STRIPE_LEN..], &secret[n * SECRET_CONSUME_RATE..]);
  }
}

/// Block-boundary scramble; keyed by the last 64 bytes of the secret.
#[inline(always)]
pub(crate) fn scramble(kernel: Kernel, acc: &mut Acc, secret: &[u8]) {
  (kernel.scramble)(acc, &secret[secret.len() - STRIPE_LEN..]);
}

/// Feed the final (possibly overlapping) stripe with its dedicated key window.
#[inline(always)]
pub(crate) fn accumulate_last(kernel: Kernel, acc: &mut Acc, last_stripe: &[u8], secret: &[u8]) {
  (kernel.accumulate_512)(acc, last_stripe, &secret[secret.len() - STRIPE_LEN - SECRET_LASTACC_START..]);
}

fn hash_long_loop(kernel: Kernel, acc: &mut Acc, input: &[u8], secret: &[u8]) {
  let len = input.len();
  let per_block = stripes_per_block(secret.len());
  let block_len = STRIPE_LEN * per_block;
  let nb_blocks = (len - 1) / block_len;

  for block in 0..nb_blocks {
    accumulate(kernel, acc, &input[block * block_len..], secret, per_block);
    scramble(kernel, acc, secret);
  }

  // Partial last block; the final stripe is handled separately and may overlap.
  let tail_stripes = ((len - 1) - block_len * nb_blocks) / STRIPE_LEN;
  accumulate(kernel, acc, &input[nb_blocks * block_len..], secret, tail_stripes);
  accumulate_last(kernel, acc, &input[len - STRIPE_LEN..], secret);
}

/// Fold the eight lanes into one word.
pub(crate) fn merge_accs(acc: &Acc, secret: &[u8], start: u64) -> u64 {
  let mut result = start;
  for (i, pair) in acc.chunks_exact(2).enumerate() {
    result = result.wrapping_add(mul128_fold64(
      pair[0] ^ read_u64_le(secret, 16 * i),
      pair[1] ^ read_u64_le(secret, 16 * i + 8),
    ));
  }
  avalanche(result)
}

#[inline]
pub(crate) fn finish64(acc: &Acc, secret: &[u8], total_len: u64) -> u64 {
  merge_accs(acc, &secret[SECRET_MERGEACCS_START..], total_len.wrapping_mul(PRIME64_1))
}

#[inline]
pub(crate) fn finish128(acc: &Acc, secret: &[u8], total_len: u64) -> u128 {
  let lo = finish64(acc, secret, total_len);
  let hi = merge_accs(
    acc,
    &secret[secret.len() - STRIPE_LEN - SECRET_MERGEACCS_START..],
    !total_len.wrapping_mul(PRIME64_2),
  );
  u128::from(lo) | (u128::from(hi) << 64)
}

#[inline(never)]
pub(crate) fn hash64(kernel: Kernel, input: &[u8], secret: &[u8]) -> u64 {
  let mut acc = INITIAL_ACC;
  hash_long_loop(kernel, &mut acc, input, secret);
  finish64(&acc, secret, input.len() as u64)
}

#[inline(never)]
pub(crate) fn hash128(kernel: Kernel, input: &[u8], secret: &[u8]) -> u128 {
  let mut acc = INITIAL_ACC;
  hash_long_loop(kernel, &mut acc, input, secret);
  finish128(&acc, secret, input.len() as u64)
}
