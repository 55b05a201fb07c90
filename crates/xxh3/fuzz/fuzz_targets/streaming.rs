//! Streaming must equal one-shot for any chunking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use xxh3::{Xxh3Stream64, Xxh3Stream128};

fuzz_target!(|data: &[u8]| {
  let Some((&[cut_a, cut_b, seed_byte], input)) = data.split_first_chunk::<3>() else {
    return;
  };
  let seed = u64::from(seed_byte).wrapping_mul(0x9E37_79B1_85EB_CA8D);

  let expected64 = xxh3::xxh3_64(input, seed);
  let expected128 = xxh3::xxh3_128(input, seed);

  let mut h64 = Xxh3Stream64::with_seed(seed);
  let mut h128 = Xxh3Stream128::with_seed(seed);

  // Alternate between two chunk sizes derived from the header.
  let sizes = [usize::from(cut_a) * 3 + 1, usize::from(cut_b) + 1];
  let mut rest = input;
  let mut turn = 0;
  while !rest.is_empty() {
    let take = sizes[turn % 2].min(rest.len());
    let (piece, tail) = rest.split_at(take);
    h64.update(piece);
    h128.update(piece);
    rest = tail;
    turn += 1;
  }

  assert_eq!(h64.finalize(), expected64, "streaming 64 mismatch: len={}", input.len());
  assert_eq!(h128.finalize(), expected128, "streaming 128 mismatch: len={}", input.len());
});
