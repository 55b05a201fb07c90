//! One-shot XXH3 (**NOT CRYPTO**).

use traits::FastHash;

use crate::{
  dispatch,
  kernels::Kernel,
  long, mid,
  regime::Regime,
  secret::{DEFAULT_SECRET, Secret, derive_secret},
  short,
};

/// XXH3 64-bit as a [`FastHash`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Xxh3_64;

/// XXH3 128-bit as a [`FastHash`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Xxh3_128;

/// Route `input` by length. `seed` perturbs the short and mid regimes in place;
/// the long regime only ever sees `secret`, so callers with a nonzero seed pass
/// the derived table.
#[inline]
pub(crate) fn route64(kernel: Kernel, input: &[u8], seed: u64, secret: &[u8]) -> u64 {
  match Regime::for_len(input.len()) {
    Regime::Empty => short::hash64_empty(seed, secret),
    Regime::Len1To3 => short::hash64_1to3(input, seed, secret),
    Regime::Len4To8 => short::hash64_4to8(input, seed, secret),
    Regime::Len9To16 => short::hash64_9to16(input, seed, secret),
    Regime::Len17To128 => mid::hash64_17to128(input, seed, secret),
    Regime::Len129To240 => mid::hash64_129to240(input, seed, secret),
    Regime::Long => long::hash64(kernel, input, secret),
  }
}

#[inline]
pub(crate) fn route128(kernel: Kernel, input: &[u8], seed: u64, secret: &[u8]) -> u128 {
  match Regime::for_len(input.len()) {
    Regime::Empty => short::hash128_empty(seed, secret),
    Regime::Len1To3 => short::hash128_1to3(input, seed, secret),
    Regime::Len4To8 => short::hash128_4to8(input, seed, secret),
    Regime::Len9To16 => short::hash128_9to16(input, seed, secret),
    Regime::Len17To128 => mid::hash128_17to128(input, seed, secret),
    Regime::Len129To240 => mid::hash128_129to240(input, seed, secret),
    Regime::Long => long::hash128(kernel, input, secret),
  }
}

pub(crate) fn seeded64(kernel: Kernel, input: &[u8], seed: u64) -> u64 {
  if seed != 0 && Regime::for_len(input.len()).uses_accumulator() {
    long::hash64(kernel, input, &derive_secret(seed))
  } else {
    route64(kernel, input, seed, &DEFAULT_SECRET)
  }
}

pub(crate) fn seeded128(kernel: Kernel, input: &[u8], seed: u64) -> u128 {
  if seed != 0 && Regime::for_len(input.len()).uses_accumulator() {
    long::hash128(kernel, input, &derive_secret(seed))
  } else {
    route128(kernel, input, seed, &DEFAULT_SECRET)
  }
}

/// XXH3 64-bit hash of `data` with `seed`.
///
/// Bit-compatible with `XXH3_64bits_withSeed`; seed 0 equals `XXH3_64bits`.
///
/// ```
/// assert_eq!(xxh3::xxh3_64(b"", 0), 0x2D06_8005_38D3_94C2);
/// ```
#[inline]
#[must_use]
pub fn xxh3_64(data: &[u8], seed: u64) -> u64 {
  seeded64(dispatch::active(), data, seed)
}

/// XXH3 128-bit hash of `data` with `seed`.
#[inline]
#[must_use]
pub fn xxh3_128(data: &[u8], seed: u64) -> u128 {
  seeded128(dispatch::active(), data, seed)
}

/// XXH3 64-bit hash of `data` keyed by a caller-supplied secret (seed 0).
#[inline]
#[must_use]
pub fn xxh3_64_with_secret(data: &[u8], secret: Secret<'_>) -> u64 {
  route64(dispatch::active(), data, 0, secret.as_bytes())
}

/// XXH3 128-bit hash of `data` keyed by a caller-supplied secret (seed 0).
#[inline]
#[must_use]
pub fn xxh3_128_with_secret(data: &[u8], secret: Secret<'_>) -> u128 {
  route128(dispatch::active(), data, 0, secret.as_bytes())
}

impl FastHash for Xxh3_64 {
  const OUTPUT_SIZE: usize = 8;
  type Output = u64;
  type Seed = u64;

  #[inline]
  fn hash_with_seed(seed: Self::Seed, data: &[u8]) -> Self::Output {
    xxh3_64(data, seed)
  }
}

impl FastHash for Xxh3_128 {
  const OUTPUT_SIZE: usize = 16;
  type Output = u128;
  type Seed = u64;

  #[inline]
  fn hash_with_seed(seed: Self::Seed, data: &[u8]) -> Self::Output {
    xxh3_128(data, seed)
  }
}
