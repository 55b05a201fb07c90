//! Differential fuzzing of one-shot XXH3 against `xxhash-rust`.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
  // First 8 bytes (if present) pick the seed; the rest is the message.
  let (seed, input) = match data.split_first_chunk::<8>() {
    Some((seed, rest)) => (u64::from_le_bytes(*seed), rest),
    None => (0, data),
  };

  let ours = xxh3::xxh3_64(input, seed);
  let reference = xxhash_rust::xxh3::xxh3_64_with_seed(input, seed);
  assert_eq!(
    ours, reference,
    "xxh3_64 mismatch: ours={ours:#018x}, reference={reference:#018x}, len={}, seed={seed:#x}",
    input.len()
  );

  let ours = xxh3::xxh3_128(input, seed);
  let reference = xxhash_rust::xxh3::xxh3_128_with_seed(input, seed);
  assert_eq!(ours, reference, "xxh3_128 mismatch: len={}, seed={seed:#x}", input.len());

  // Long enough to split into a secret and a message.
  if let Some((secret, message)) = input.split_at_checked(xxh3::SECRET_SIZE_MIN) {
    let keyed = xxh3::Secret::new(secret).expect("split at the minimum size");
    assert_eq!(
      xxh3::xxh3_64_with_secret(message, keyed),
      xxhash_rust::xxh3::xxh3_64_with_secret(message, secret),
      "xxh3_64_with_secret mismatch: len={}",
      message.len()
    );
  }
});
