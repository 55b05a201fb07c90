//! NEON kernel: two lanes per 128-bit register.

#![allow(clippy::indexing_slicing)] // Slicing to STRIPE_LEN is the bounds check for the raw loads below

use core::arch::aarch64::{
  vaddq_u64, vdup_n_u32, veorq_u64, vextq_u64, vld1q_u8, vld1q_u64, vmlal_u32, vmovn_u64, vmull_u32,
  vreinterpretq_u64_u8, vshlq_n_u64, vshrn_n_u64, vshrq_n_u64, vst1q_u64,
};

use crate::{
  long::{Acc, STRIPE_LEN},
  util::PRIME32_1,
};

const VECTORS: usize = STRIPE_LEN / 16;

pub(crate) fn accumulate_512(acc: &mut Acc, stripe: &[u8], secret: &[u8]) {
  let stripe = &stripe[..STRIPE_LEN];
  let secret = &secret[..STRIPE_LEN];

  // SAFETY: NEON is part of the aarch64 baseline. `stripe` and `secret` hold
  // exactly STRIPE_LEN bytes (byte loads, no alignment requirement) and `acc`
  // holds 2 * VECTORS u64 lanes, so every load/store stays in bounds.
  unsafe {
    let lanes = acc.as_mut_ptr();
    for i in 0..VECTORS {
      let data = vreinterpretq_u64_u8(vld1q_u8(stripe.as_ptr().add(16 * i)));
      let key = vreinterpretq_u64_u8(vld1q_u8(secret.as_ptr().add(16 * i)));
      let keyed = veorq_u64(data, key);

      let product = vmull_u32(vmovn_u64(keyed), vshrn_n_u64::<32>(keyed));
      let swapped = vextq_u64::<1>(data, data);
      let sum = vaddq_u64(vld1q_u64(lanes.add(2 * i)), swapped);
      vst1q_u64(lanes.add(2 * i), vaddq_u64(sum, product));
    }
  }
}

pub(crate) fn scramble(acc: &mut Acc, secret: &[u8]) {
  let secret = &secret[..STRIPE_LEN];

  // SAFETY: as in `accumulate_512`.
  unsafe {
    let lanes = acc.as_mut_ptr();
    let prime = vdup_n_u32(PRIME32_1);
    for i in 0..VECTORS {
      let value = vld1q_u64(lanes.add(2 * i));
      let shifted = veorq_u64(value, vshrq_n_u64::<47>(value));
      let keyed = veorq_u64(shifted, vreinterpretq_u64_u8(vld1q_u8(secret.as_ptr().add(16 * i))));

      // (hi * p) << 32 + lo * p
      let prod_hi = vshlq_n_u64::<32>(vmull_u32(vshrn_n_u64::<32>(keyed), prime));
      vst1q_u64(lanes.add(2 * i), vmlal_u32(prod_hi, vmovn_u64(keyed), prime));
    }
  }
}
