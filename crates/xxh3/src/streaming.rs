//! Incremental XXH3.
//!
//! Input is staged in a 256-byte buffer (four stripes). Stripes are consumed
//! only once more input is known to follow, so the final stripe of the
//! message is always still available when finalizing. Stripes consumed
//! straight from the caller's slice leave their last 64 bytes in the tail of
//! the buffer, which is where a short final stripe borrows its prefix from.

#![allow(clippy::indexing_slicing)] // Buffer offsets are bounded by BUFFER_SIZE

use core::hash::{BuildHasher, Hasher};

use traits::StreamingHash;

use crate::{
  dispatch,
  kernels::Kernel,
  long::{self, Acc, INITIAL_ACC, STRIPE_LEN, SECRET_CONSUME_RATE},
  oneshot,
  regime::MID_SIZE_MAX,
  secret::{DEFAULT_SECRET, DEFAULT_SECRET_SIZE, derive_secret},
};

const BUFFER_STRIPES: usize = 4;
const BUFFER_SIZE: usize = STRIPE_LEN * BUFFER_STRIPES;
const STRIPES_PER_BLOCK: usize = long::stripes_per_block(DEFAULT_SECRET_SIZE);

/// Feed `nb_stripes` stripes, scrambling if a block boundary is crossed.
/// Returns the new count of stripes in the current block.
fn consume_stripes(
  kernel: Kernel,
  acc: &mut Acc,
  stripes_in_block: usize,
  stripes: &[u8],
  secret: &[u8],
  nb_stripes: usize,
) -> usize {
  let to_block_end = STRIPES_PER_BLOCK - stripes_in_block;
  let key = &secret[stripes_in_block * SECRET_CONSUME_RATE..];
  if to_block_end <= nb_stripes {
    long::accumulate(kernel, acc, stripes, key, to_block_end);
    long::scramble(kernel, acc, secret);
    let after = nb_stripes - to_block_end;
    long::accumulate(kernel, acc, &stripes[to_block_end * STRIPE_LEN..], secret, after);
    after
  } else {
    long::accumulate(kernel, acc, stripes, key, nb_stripes);
    stripes_in_block + nb_stripes
  }
}

#[derive(Clone)]
struct State {
  acc: Acc,
  /// Long-path secret: derived from the seed, or supplied by the caller.
  secret: [u8; DEFAULT_SECRET_SIZE],
  buffer: [u8; BUFFER_SIZE],
  buffered: usize,
  stripes_in_block: usize,
  total_len: u64,
  seed: u64,
  /// Caller-supplied secret; short inputs then hash with it and seed 0.
  keyed: bool,
  kernel: Kernel,
}

impl State {
  fn new(seed: u64, secret: [u8; DEFAULT_SECRET_SIZE], keyed: bool) -> Self {
    Self {
      acc: INITIAL_ACC,
      secret,
      buffer: [0u8; BUFFER_SIZE],
      buffered: 0,
      stripes_in_block: 0,
      total_len: 0,
      seed,
      keyed,
      kernel: dispatch::active(),
    }
  }

  fn reset(&mut self) {
    self.acc = INITIAL_ACC;
    self.buffered = 0;
    self.stripes_in_block = 0;
    self.total_len = 0;
  }

  fn consume(&mut self, stripes: &[u8], nb_stripes: usize) {
    self.stripes_in_block = consume_stripes(
      self.kernel,
      &mut self.acc,
      self.stripes_in_block,
      stripes,
      &self.secret,
      nb_stripes,
    );
  }

  fn update(&mut self, input: &[u8]) {
    self.total_len = self.total_len.wrapping_add(input.len() as u64);

    if input.len() <= BUFFER_SIZE - self.buffered {
      self.buffer[self.buffered..self.buffered + input.len()].copy_from_slice(input);
      self.buffered += input.len();
      return;
    }

    let mut offset = 0;
    if self.buffered > 0 {
      offset = BUFFER_SIZE - self.buffered;
      self.buffer[self.buffered..].copy_from_slice(&input[..offset]);
      let full = self.buffer;
      self.consume(&full, BUFFER_STRIPES);
      self.buffered = 0;
    }

    // Strictly greater: a full buffer's worth is kept back for finalize.
    if input.len() - offset > BUFFER_SIZE {
      while input.len() - offset > BUFFER_SIZE {
        self.consume(&input[offset..offset + BUFFER_SIZE], BUFFER_STRIPES);
        offset += BUFFER_SIZE;
      }
      self.buffer[BUFFER_SIZE - STRIPE_LEN..].copy_from_slice(&input[offset - STRIPE_LEN..offset]);
    }

    let rest = &input[offset..];
    self.buffer[..rest.len()].copy_from_slice(rest);
    self.buffered = rest.len();
  }

  /// Lanes after absorbing the buffered tail; the state itself is untouched.
  fn digest_acc(&self) -> Acc {
    let mut acc = self.acc;
    let mut last = [0u8; STRIPE_LEN];

    if self.buffered >= STRIPE_LEN {
      let nb_stripes = (self.buffered - 1) / STRIPE_LEN;
      consume_stripes(
        self.kernel,
        &mut acc,
        self.stripes_in_block,
        &self.buffer,
        &self.secret,
        nb_stripes,
      );
      last.copy_from_slice(&self.buffer[self.buffered - STRIPE_LEN..self.buffered]);
    } else {
      let catchup = STRIPE_LEN - self.buffered;
      last[..catchup].copy_from_slice(&self.buffer[BUFFER_SIZE - catchup..]);
      last[catchup..].copy_from_slice(&self.buffer[..self.buffered]);
    }

    long::accumulate_last(self.kernel, &mut acc, &last, &self.secret);
    acc
  }

  fn is_long(&self) -> bool {
    self.total_len > MID_SIZE_MAX as u64
  }

  /// The buffered input with the secret and seed one-shot would use for it.
  fn short_parts(&self) -> (&[u8], &[u8], u64) {
    let input = &self.buffer[..self.buffered];
    if self.keyed {
      (input, &self.secret, 0)
    } else {
      (input, &DEFAULT_SECRET, self.seed)
    }
  }

  fn digest64(&self) -> u64 {
    if self.is_long() {
      return long::finish64(&self.digest_acc(), &self.secret, self.total_len);
    }
    let (input, secret, seed) = self.short_parts();
    oneshot::route64(self.kernel, input, seed, secret)
  }

  fn digest128(&self) -> u128 {
    if self.is_long() {
      return long::finish128(&self.digest_acc(), &self.secret, self.total_len);
    }
    let (input, secret, seed) = self.short_parts();
    oneshot::route128(self.kernel, input, seed, secret)
  }
}

impl core::fmt::Debug for State {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("State")
      .field("total_len", &self.total_len)
      .field("buffered", &self.buffered)
      .field("keyed", &self.keyed)
      .field("kernel", &self.kernel)
      .finish_non_exhaustive()
  }
}

macro_rules! define_stream {
  ($(#[$meta:meta])* $name:ident, $out:ty, $size:literal, $digest:ident) => {
    $(#[$meta])*
    #[derive(Clone, Debug)]
    pub struct $name {
      state: State,
    }

    impl $name {
      /// Unseeded stream (seed 0, default secret).
      #[inline]
      #[must_use]
      pub fn new() -> Self {
        Self::with_seed(0)
      }

      #[must_use]
      pub fn with_seed(seed: u64) -> Self {
        Self {
          state: State::new(seed, derive_secret(seed), false),
        }
      }

      /// Stream keyed by a caller-supplied secret of the default size.
      #[must_use]
      pub fn with_secret(secret: [u8; DEFAULT_SECRET_SIZE]) -> Self {
        Self {
          state: State::new(0, secret, true),
        }
      }

      #[inline]
      pub fn update(&mut self, data: &[u8]) {
        self.state.update(data);
      }

      /// Hash of everything absorbed so far.
      #[inline]
      #[must_use]
      pub fn finalize(&self) -> $out {
        self.state.$digest()
      }

      /// Start over with the same seed or secret.
      #[inline]
      pub fn reset(&mut self) {
        self.state.reset();
      }
    }

    impl Default for $name {
      #[inline]
      fn default() -> Self {
        Self::new()
      }
    }

    impl StreamingHash for $name {
      const OUTPUT_SIZE: usize = $size;
      type Output = $out;

      #[inline]
      fn new() -> Self {
        $name::new()
      }

      #[inline]
      fn update(&mut self, data: &[u8]) {
        $name::update(self, data);
      }

      #[inline]
      fn finalize(&self) -> Self::Output {
        $name::finalize(self)
      }

      #[inline]
      fn reset(&mut self) {
        $name::reset(self);
      }
    }
  };
}

define_stream!(
  /// Incremental XXH3 64-bit.
  ///
  /// ```
  /// let mut h = xxh3::Xxh3Stream64::with_seed(7);
  /// h.update(b"Hello ");
  /// h.update(b"World!");
  /// assert_eq!(h.finalize(), xxh3::xxh3_64(b"Hello World!", 7));
  /// ```
  Xxh3Stream64,
  u64,
  8,
  digest64
);

define_stream!(
  /// Incremental XXH3 128-bit.
  Xxh3Stream128,
  u128,
  16,
  digest128
);

impl Hasher for Xxh3Stream64 {
  #[inline]
  fn write(&mut self, bytes: &[u8]) {
    self.update(bytes);
  }

  #[inline]
  fn finish(&self) -> u64 {
    self.finalize()
  }
}

/// Builds seeded [`Xxh3Stream64`] hashers for hash maps.
///
/// The long-input secret is derived once here, not per hasher.
#[derive(Clone)]
pub struct Xxh3BuildHasher {
  seed: u64,
  secret: [u8; DEFAULT_SECRET_SIZE],
}

impl Xxh3BuildHasher {
  #[must_use]
  pub fn new(seed: u64) -> Self {
    Self {
      seed,
      secret: derive_secret(seed),
    }
  }

  #[inline]
  #[must_use]
  pub const fn seed(&self) -> u64 {
    self.seed
  }
}

impl Default for Xxh3BuildHasher {
  #[inline]
  fn default() -> Self {
    Self::new(0)
  }
}

impl core::fmt::Debug for Xxh3BuildHasher {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Xxh3BuildHasher").field("seed", &self.seed).finish_non_exhaustive()
  }
}

impl BuildHasher for Xxh3BuildHasher {
  type Hasher = Xxh3Stream64;

  #[inline]
  fn build_hasher(&self) -> Self::Hasher {
    Xxh3Stream64 {
      state: State::new(self.seed, self.secret, false),
    }
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::vec::Vec;

  use proptest::prelude::*;

  use super::*;
  use crate::{Secret, xxh3_64, xxh3_64_with_secret, xxh3_128, xxh3_128_with_secret};

  fn data(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i as u8).wrapping_mul(13) ^ (i >> 7) as u8).collect()
  }

  fn keyed_secret() -> [u8; DEFAULT_SECRET_SIZE] {
    let mut secret = [0u8; DEFAULT_SECRET_SIZE];
    for (i, b) in secret.iter_mut().enumerate() {
      *b = (i as u8).wrapping_mul(151).wrapping_add(29);
    }
    secret
  }

  #[test]
  fn single_update_matches_oneshot_at_buffer_edges() {
    for len in [0usize, 1, 63, 64, 65, 240, 241, 255, 256, 257, 511, 512, 513, 1024, 1025, 1088, 2048, 5000] {
      let input = data(len);
      for seed in [0u64, 0x9E37_79B1_85EB_CA8D] {
        let mut h = Xxh3Stream64::with_seed(seed);
        h.update(&input);
        assert_eq!(h.finalize(), xxh3_64(&input, seed), "len={len} seed={seed:#x}");

        let mut h = Xxh3Stream128::with_seed(seed);
        h.update(&input);
        assert_eq!(h.finalize(), xxh3_128(&input, seed), "len={len} seed={seed:#x}");
      }
    }
  }

  #[test]
  fn byte_at_a_time_crosses_blocks() {
    let input = data(3000);
    let mut h = Xxh3Stream64::new();
    for b in &input {
      h.update(core::slice::from_ref(b));
    }
    assert_eq!(h.finalize(), xxh3_64(&input, 0));
  }

  #[test]
  fn finalize_is_idempotent_and_resumable() {
    let input = data(700);
    let mut h = Xxh3Stream64::with_seed(3);
    h.update(&input[..300]);
    let mid = h.finalize();
    assert_eq!(mid, h.finalize());
    assert_eq!(mid, xxh3_64(&input[..300], 3));
    h.update(&input[300..]);
    assert_eq!(h.finalize(), xxh3_64(&input, 3));
  }

  #[test]
  fn reset_keeps_seed_and_secret() {
    let input = data(1500);

    let mut seeded = Xxh3Stream64::with_seed(11);
    seeded.update(b"discarded");
    seeded.reset();
    seeded.update(&input);
    assert_eq!(seeded.finalize(), xxh3_64(&input, 11));

    let secret = keyed_secret();
    let mut keyed = Xxh3Stream128::with_secret(secret);
    keyed.update(&input);
    keyed.reset();
    keyed.update(&input[..100]);
    let Ok(s) = Secret::new(&secret) else {
      panic!("secret has the default size");
    };
    assert_eq!(keyed.finalize(), xxh3_128_with_secret(&input[..100], s));
  }

  #[test]
  fn empty_stream_matches_empty_input() {
    assert_eq!(Xxh3Stream64::new().finalize(), xxh3_64(b"", 0));
    assert_eq!(Xxh3Stream128::with_seed(1).finalize(), xxh3_128(b"", 1));
  }

  #[test]
  fn hasher_and_build_hasher() {
    let builder = Xxh3BuildHasher::new(42);
    assert_eq!(builder.seed(), 42);
    assert_eq!(builder.hash_one(b"abc".as_slice()), {
      let mut h = Xxh3Stream64::with_seed(42);
      core::hash::Hash::hash(b"abc".as_slice(), &mut h);
      h.finish()
    });

    let mut h = builder.build_hasher();
    h.write(&data(1000));
    assert_eq!(h.finish(), xxh3_64(&data(1000), 42));
  }

  #[cfg(feature = "std")]
  #[test]
  fn keys_a_hash_map() {
    let mut map = std::collections::HashMap::with_hasher(Xxh3BuildHasher::default());
    for i in 0..100u32 {
      map.insert(i, i * 2);
    }
    assert_eq!(map.get(&40), Some(&80));
    assert_eq!(map.len(), 100);
  }

  #[test]
  fn streams_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Xxh3Stream64>();
    assert_send_sync::<Xxh3Stream128>();
    assert_send_sync::<Xxh3BuildHasher>();
  }

  #[test]
  fn streaming_trait_round_trip() {
    let input = data(900);
    let bufs: [&[u8]; 3] = [&input[..10], &input[10..400], &input[400..]];
    assert_eq!(Xxh3Stream64::hash_vectored(&bufs), xxh3_64(&input, 0));
    assert_eq!(Xxh3Stream128::hash_vectored(&bufs), xxh3_128(&input, 0));
  }

  fn chunked<F: FnMut(&[u8])>(input: &[u8], cuts: &[usize], mut feed: F) {
    let mut start = 0;
    for &cut in cuts {
      let end = (start + cut).min(input.len());
      feed(&input[start..end]);
      start = end;
    }
    feed(&input[start..]);
  }

  proptest! {
    #[test]
    fn any_chunking_matches_oneshot(
      seed in any::<u64>(),
      input in proptest::collection::vec(any::<u8>(), 0..3000),
      cuts in proptest::collection::vec(0usize..600, 0..12),
    ) {
      let mut h64 = Xxh3Stream64::with_seed(seed);
      let mut h128 = Xxh3Stream128::with_seed(seed);
      chunked(&input, &cuts, |c| { h64.update(c); h128.update(c); });
      prop_assert_eq!(h64.finalize(), xxh3_64(&input, seed));
      prop_assert_eq!(h128.finalize(), xxh3_128(&input, seed));
    }

    #[test]
    fn keyed_chunking_matches_oneshot(
      input in proptest::collection::vec(any::<u8>(), 0..2000),
      cuts in proptest::collection::vec(0usize..400, 0..8),
    ) {
      let secret = keyed_secret();
      let mut h = Xxh3Stream64::with_secret(secret);
      chunked(&input, &cuts, |c| h.update(c));
      let Ok(s) = Secret::new(&secret) else {
        return Err(TestCaseError::fail("secret has the default size"));
      };
      prop_assert_eq!(h.finalize(), xxh3_64_with_secret(&input, s));
    }
  }
}
