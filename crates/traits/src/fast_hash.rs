//! One-shot seeded hashing (**NOT CRYPTO**).

use core::fmt::Debug;

/// A fast non-cryptographic hash computed over a complete buffer.
///
/// This is the seam callers hash through when they only need
/// `hash(bytes, seed) -> value`: feature hashing, sharding, fingerprints. The
/// implementation is free to pick any internal strategy as long as the result
/// is a pure function of `(seed, data)`.
///
/// Implementations are **not** suitable for MACs, signatures, or adversarial
/// inputs where collision attacks matter.
///
/// # Example
///
/// ```rust
/// # use traits::FastHash;
/// # struct Fnv;
/// # impl FastHash for Fnv {
/// #   const OUTPUT_SIZE: usize = 8;
/// #   type Output = u64;
/// #   type Seed = u64;
/// #   fn hash_with_seed(seed: u64, data: &[u8]) -> u64 {
/// #     data.iter().fold(0xcbf2_9ce4_8422_2325 ^ seed, |h, &b| (h ^ u64::from(b)).wrapping_mul(0x100_0000_01b3))
/// #   }
/// # }
/// let a = Fnv::hash_with_seed(7, b"variant");
/// assert_eq!(a, Fnv::hash_with_seed(7, b"variant"));
/// assert_eq!(Fnv::hash(b"x"), Fnv::hash_with_seed(0, b"x"));
/// ```
pub trait FastHash {
  /// Output size in bytes.
  const OUTPUT_SIZE: usize;

  /// Hash output type.
  type Output: Copy + Eq + Debug + Default;

  /// Seed type. `Default` is the unseeded value.
  type Seed: Copy + Debug + Default;

  /// Hash `data` with the default seed.
  #[inline]
  #[must_use]
  fn hash(data: &[u8]) -> Self::Output {
    Self::hash_with_seed(Self::Seed::default(), data)
  }

  /// Hash `data` with `seed`.
  ///
  /// Must be total: every input, including the empty slice, has a defined
  /// output.
  #[must_use]
  fn hash_with_seed(seed: Self::Seed, data: &[u8]) -> Self::Output;
}
