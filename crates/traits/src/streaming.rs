//! Incremental hashing.
//!
//! Shaped after the one-shot [`crate::FastHash`] seam, but for data that
//! arrives in pieces: update any number of times, finalize without consuming,
//! reset to start over.

use core::fmt::Debug;

/// A hash that can be fed incrementally.
///
/// # Implementor Requirements
///
/// - `new()` must return the same state as `Default::default()`
/// - feeding the same bytes in any chunking must produce the same output
/// - `finalize()` must be idempotent
/// - `reset()` must restore the state produced by the constructor that built it
pub trait StreamingHash: Clone + Default {
  /// Output size in bytes.
  const OUTPUT_SIZE: usize;

  /// Hash output type.
  type Output: Copy + Eq + Debug;

  /// Create a hasher in its initial (unseeded) state.
  #[must_use]
  fn new() -> Self;

  /// Absorb more data.
  fn update(&mut self, data: &[u8]);

  /// Absorb several non-contiguous buffers, in order.
  #[inline]
  fn update_vectored(&mut self, bufs: &[&[u8]]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// Absorb `std::io::IoSlice` buffers, in order.
  #[cfg(feature = "std")]
  #[inline]
  fn update_io_slices(&mut self, bufs: &[std::io::IoSlice<'_>]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// Return the hash of everything absorbed so far.
  ///
  /// Does not consume the hasher; more updates may follow.
  #[must_use]
  fn finalize(&self) -> Self::Output;

  /// Restore the initial state.
  fn reset(&mut self);

  /// Hash several buffers as if they were one contiguous input.
  #[inline]
  #[must_use]
  fn hash_vectored(bufs: &[&[u8]]) -> Self::Output {
    let mut h = Self::new();
    h.update_vectored(bufs);
    h.finalize()
  }

  /// Wrap a reader so that every byte read is hashed.
  #[cfg(feature = "std")]
  #[inline]
  #[must_use]
  fn reader<R>(inner: R) -> crate::io::HashReader<R, Self>
  where
    Self: Sized,
  {
    crate::io::HashReader::new(inner)
  }

  /// Wrap a writer so that every byte written is hashed.
  #[cfg(feature = "std")]
  #[inline]
  #[must_use]
  fn writer<W>(inner: W) -> crate::io::HashWriter<W, Self>
  where
    Self: Sized,
  {
    crate::io::HashWriter::new(inner)
  }
}
