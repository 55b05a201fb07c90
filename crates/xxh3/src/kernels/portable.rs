//! Scalar kernel: one lane at a time, 32x32->64 multiplies.

#![allow(clippy::indexing_slicing)] // Lane indices are always < ACC_NB

use crate::{
  long::{ACC_NB, Acc},
  util::{PRIME32_1, mult32_to64, read_u64_le, xorshift64},
};

pub(crate) fn accumulate_512(acc: &mut Acc, stripe: &[u8], secret: &[u8]) {
  for lane in 0..ACC_NB {
    let data = read_u64_le(stripe, lane * 8);
    let keyed = data ^ read_u64_le(secret, lane * 8);

    // Raw data goes to the neighbouring lane; the keyed product stays.
    acc[lane ^ 1] = acc[lane ^ 1].wrapping_add(data);
    acc[lane] = acc[lane].wrapping_add(mult32_to64(keyed as u32, (keyed >> 32) as u32));
  }
}

pub(crate) fn scramble(acc: &mut Acc, secret: &[u8]) {
  for (lane, value) in acc.iter_mut().enumerate() {
    let keyed = xorshift64(*value, 47) ^ read_u64_le(secret, lane * 8);
    *value = keyed.wrapping_mul(u64::from(PRIME32_1));
  }
}
