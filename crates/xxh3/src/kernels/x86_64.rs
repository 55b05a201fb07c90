//! SSE2 kernel: two lanes per 128-bit register, four registers per stripe.

#![allow(clippy::indexing_slicing)] // Slicing to STRIPE_LEN is the bounds check for the raw loads below

use core::arch::x86_64::{
  __m128i, _mm_add_epi64, _mm_loadu_si128, _mm_mul_epu32, _mm_set1_epi32, _mm_shuffle_epi32, _mm_slli_epi64,
  _mm_srli_epi64, _mm_storeu_si128, _mm_xor_si128,
};

use crate::{
  long::{Acc, STRIPE_LEN},
  util::PRIME32_1,
};

const VECTORS: usize = STRIPE_LEN / 16;

// _MM_SHUFFLE(0, 3, 0, 1): high dword of each lane into the low position.
const HI_TO_LO: i32 = 0x31;
// _MM_SHUFFLE(1, 0, 3, 2): swap the two 64-bit lanes.
const SWAP_LANES: i32 = 0x4E;

pub(crate) fn accumulate_512(acc: &mut Acc, stripe: &[u8], secret: &[u8]) {
  let stripe = &stripe[..STRIPE_LEN];
  let secret = &secret[..STRIPE_LEN];

  // SAFETY: SSE2 is part of the x86_64 baseline. `stripe` and `secret` hold
  // exactly STRIPE_LEN bytes and `acc` holds STRIPE_LEN bytes of lanes, so each
  // of the VECTORS unaligned 16-byte loads/stores stays in bounds.
  unsafe {
    let lanes = acc.as_mut_ptr().cast::<__m128i>();
    let data_ptr = stripe.as_ptr().cast::<__m128i>();
    let key_ptr = secret.as_ptr().cast::<__m128i>();

    for i in 0..VECTORS {
      let data = _mm_loadu_si128(data_ptr.add(i));
      let key = _mm_loadu_si128(key_ptr.add(i));
      let keyed = _mm_xor_si128(data, key);

      let product = _mm_mul_epu32(keyed, _mm_shuffle_epi32::<HI_TO_LO>(keyed));
      let sum = _mm_add_epi64(_mm_loadu_si128(lanes.add(i)), _mm_shuffle_epi32::<SWAP_LANES>(data));
      _mm_storeu_si128(lanes.add(i), _mm_add_epi64(product, sum));
    }
  }
}

pub(crate) fn scramble(acc: &mut Acc, secret: &[u8]) {
  let secret = &secret[..STRIPE_LEN];

  // SAFETY: as in `accumulate_512`; all accesses are within the 64-byte
  // secret window and the 8-lane accumulator.
  unsafe {
    let lanes = acc.as_mut_ptr().cast::<__m128i>();
    let key_ptr = secret.as_ptr().cast::<__m128i>();
    let prime = _mm_set1_epi32(PRIME32_1 as i32);

    for i in 0..VECTORS {
      let value = _mm_loadu_si128(lanes.add(i));
      let shifted = _mm_xor_si128(value, _mm_srli_epi64::<47>(value));
      let keyed = _mm_xor_si128(shifted, _mm_loadu_si128(key_ptr.add(i)));

      // 64x32 multiply from two 32x32 halves.
      let prod_lo = _mm_mul_epu32(keyed, prime);
      let prod_hi = _mm_mul_epu32(_mm_shuffle_epi32::<HI_TO_LO>(keyed), prime);
      _mm_storeu_si128(lanes.add(i), _mm_add_epi64(prod_lo, _mm_slli_epi64::<32>(prod_hi)));
    }
  }
}
