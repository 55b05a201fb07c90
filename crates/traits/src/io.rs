//! I/O adapters that hash bytes as they pass through.
//!
//! [`HashReader`] and [`HashWriter`] wrap any [`std::io::Read`] /
//! [`std::io::Write`] and feed a [`StreamingHash`](crate::StreamingHash)
//! with exactly the bytes transferred, so short reads and short writes never
//! skew the result.
//!
//! # Example
//!
//! ```rust
//! # use traits::StreamingHash;
//! # #[derive(Clone, Default)]
//! # struct Sum(u64);
//! # impl StreamingHash for Sum {
//! #   const OUTPUT_SIZE: usize = 8;
//! #   type Output = u64;
//! #   fn new() -> Self { Self(0) }
//! #   fn update(&mut self, data: &[u8]) {
//! #     self.0 = data.iter().fold(self.0, |acc, &b| acc.wrapping_add(u64::from(b)));
//! #   }
//! #   fn finalize(&self) -> u64 { self.0 }
//! #   fn reset(&mut self) { self.0 = 0; }
//! # }
//! # use std::io::Cursor;
//! let mut reader = Sum::reader(Cursor::new(b"abc".to_vec()));
//! std::io::copy(&mut reader, &mut std::io::sink())?;
//! assert_eq!(reader.hash(), u64::from(b'a') + u64::from(b'b') + u64::from(b'c'));
//! # Ok::<(), std::io::Error>(())
//! ```

use core::ops::Deref;
use std::io::{IoSlice, IoSliceMut, Read, Write};

use crate::StreamingHash;

/// Feed the first `n` bytes spread across `bufs` to `on_data`, in order.
#[inline]
fn hash_transferred<B: Deref<Target = [u8]>>(bufs: &[B], mut n: usize, mut on_data: impl FnMut(&[u8])) {
  for buf in bufs {
    if n == 0 {
      break;
    }
    let take = n.min(buf.len());
    if let Some(data) = buf.get(..take) {
      on_data(data);
    }
    n -= take;
  }
}

/// Wraps a [`Read`] and hashes every byte read from it.
#[derive(Clone)]
pub struct HashReader<R, H: StreamingHash> {
  inner: R,
  hasher: H,
}

impl<R, H: StreamingHash> HashReader<R, H> {
  /// Wrap `inner` with a fresh hasher.
  #[inline]
  #[must_use]
  pub fn new(inner: R) -> Self {
    Self::with_hasher(inner, H::new())
  }

  /// Wrap `inner` with an already-configured hasher (e.g. a seeded one).
  #[inline]
  #[must_use]
  pub fn with_hasher(inner: R, hasher: H) -> Self {
    Self { inner, hasher }
  }

  /// Hash of everything read so far. Further reads keep updating it.
  #[inline]
  #[must_use]
  pub fn hash(&self) -> H::Output {
    self.hasher.finalize()
  }

  #[inline]
  pub fn hasher_mut(&mut self) -> &mut H {
    &mut self.hasher
  }

  /// Split into the inner reader and the final hash.
  #[inline]
  pub fn into_parts(self) -> (R, H::Output) {
    let hash = self.hasher.finalize();
    (self.inner, hash)
  }

  #[inline]
  pub fn into_inner(self) -> R {
    self.inner
  }

  #[inline]
  pub fn inner(&self) -> &R {
    &self.inner
  }

  #[inline]
  pub fn inner_mut(&mut self) -> &mut R {
    &mut self.inner
  }
}

impl<R: Read, H: StreamingHash> Read for HashReader<R, H> {
  #[inline]
  fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
    let n = self.inner.read(buf)?;
    if let Some(data) = buf.get(..n) {
      self.hasher.update(data);
    }
    Ok(n)
  }

  #[inline]
  fn read_vectored(&mut self, bufs: &mut [IoSliceMut<'_>]) -> std::io::Result<usize> {
    let n = self.inner.read_vectored(bufs)?;
    hash_transferred(&*bufs, n, |data| self.hasher.update(data));
    Ok(n)
  }
}

/// Wraps a [`Write`] and hashes every byte the inner writer accepts.
///
/// Only bytes reported as written are hashed, so retrying after a short write
/// (as `write_all` does) never hashes a byte twice.
#[derive(Clone)]
pub struct HashWriter<W, H: StreamingHash> {
  inner: W,
  hasher: H,
}

impl<W, H: StreamingHash> HashWriter<W, H> {
  /// Wrap `inner` with a fresh hasher.
  #[inline]
  #[must_use]
  pub fn new(inner: W) -> Self {
    Self::with_hasher(inner, H::new())
  }

  /// Wrap `inner` with an already-configured hasher.
  #[inline]
  #[must_use]
  pub fn with_hasher(inner: W, hasher: H) -> Self {
    Self { inner, hasher }
  }

  /// Hash of everything written so far.
  #[inline]
  #[must_use]
  pub fn hash(&self) -> H::Output {
    self.hasher.finalize()
  }

  #[inline]
  pub fn hasher_mut(&mut self) -> &mut H {
    &mut self.hasher
  }

  /// Split into the inner writer and the final hash.
  #[inline]
  pub fn into_parts(self) -> (W, H::Output) {
    let hash = self.hasher.finalize();
    (self.inner, hash)
  }

  #[inline]
  pub fn into_inner(self) -> W {
    self.inner
  }

  #[inline]
  pub fn inner(&self) -> &W {
    &self.inner
  }

  #[inline]
  pub fn inner_mut(&mut self) -> &mut W {
    &mut self.inner
  }
}

impl<W: Write, H: StreamingHash> Write for HashWriter<W, H> {
  #[inline]
  fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
    let n = self.inner.write(buf)?;
    if let Some(data) = buf.get(..n) {
      self.hasher.update(data);
    }
    Ok(n)
  }

  #[inline]
  fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> std::io::Result<usize> {
    let n = self.inner.write_vectored(bufs)?;
    hash_transferred(bufs, n, |data| self.hasher.update(data));
    Ok(n)
  }

  #[inline]
  fn flush(&mut self) -> std::io::Result<()> {
    self.inner.flush()
  }
}

#[cfg(test)]
mod tests {
  use std::{
    io::{Cursor, IoSlice, IoSliceMut, Read, Write},
    vec::Vec,
  };

  use super::*;

  #[derive(Clone, Default)]
  struct Sum(u64);

  impl StreamingHash for Sum {
    const OUTPUT_SIZE: usize = 8;
    type Output = u64;

    fn new() -> Self {
      Self(0)
    }

    fn update(&mut self, data: &[u8]) {
      for &b in data {
        self.0 = self.0.wrapping_mul(31).wrapping_add(u64::from(b));
      }
    }

    fn finalize(&self) -> u64 {
      self.0
    }

    fn reset(&mut self) {
      self.0 = 0;
    }
  }

  fn expected(data: &[u8]) -> u64 {
    let mut h = Sum::new();
    h.update(data);
    h.finalize()
  }

  /// Accepts at most `limit` bytes per call.
  struct Trickle {
    out: Vec<u8>,
    limit: usize,
  }

  impl Write for Trickle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
      let n = buf.len().min(self.limit);
      self.out.extend_from_slice(&buf[..n]);
      Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
      Ok(())
    }
  }

  #[test]
  fn reader_hashes_bytes_read() {
    let data = b"the quick brown fox jumps over the lazy dog";
    let mut reader = Sum::reader(Cursor::new(data.to_vec()));
    let mut small = [0u8; 5];
    let mut total = 0;
    loop {
      let n = reader.read(&mut small).unwrap();
      if n == 0 {
        break;
      }
      total += n;
    }
    assert_eq!(total, data.len());
    assert_eq!(reader.hash(), expected(data));
  }

  #[test]
  fn short_writes_hash_each_byte_once() {
    let data = b"0123456789abcdef0123456789abcdef";
    let mut writer = HashWriter::<_, Sum>::new(Trickle { out: Vec::new(), limit: 3 });
    writer.write_all(data).unwrap();
    let (inner, hash) = writer.into_parts();
    assert_eq!(inner.out, data.to_vec());
    assert_eq!(hash, expected(data));
  }

  #[test]
  fn vectored_write_hashes_in_order() {
    let mut writer = Sum::writer(Vec::new());
    let n = writer.write_vectored(&[IoSlice::new(b"abc"), IoSlice::new(b"def")]).unwrap();
    assert_eq!(n, 6);
    assert_eq!(writer.hash(), expected(b"abcdef"));
  }

  /// Fills at most `cap` bytes per buffer and stops at the first buffer it
  /// cannot fill completely.
  struct Capped {
    data: Vec<u8>,
    pos: usize,
    cap: usize,
  }

  impl Read for Capped {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
      self.read_vectored(&mut [IoSliceMut::new(buf)])
    }

    fn read_vectored(&mut self, bufs: &mut [IoSliceMut<'_>]) -> std::io::Result<usize> {
      let mut total = 0;
      for buf in bufs.iter_mut() {
        let take = self.cap.min(buf.len()).min(self.data.len() - self.pos);
        buf[..take].copy_from_slice(&self.data[self.pos..self.pos + take]);
        self.pos += take;
        total += take;
        if take < buf.len() {
          break;
        }
      }
      Ok(total)
    }
  }

  #[test]
  fn partial_vectored_reads_hash_only_delivered_bytes() {
    let data: Vec<u8> = (0..1000u32).map(|i| (i * 7 + 3) as u8).collect();
    let mut reader = HashReader::<_, Sum>::new(Capped {
      data: data.clone(),
      pos: 0,
      cap: 7,
    });

    let mut delivered = Vec::new();
    loop {
      let mut a = [0u8; 4];
      let mut b = [0u8; 9];
      let n = reader
        .read_vectored(&mut [IoSliceMut::new(&mut a), IoSliceMut::new(&mut b)])
        .unwrap();
      if n == 0 {
        break;
      }
      // 4 into the first buffer, then at most 7 of the second's 9.
      assert!(n <= 11);
      let first = n.min(a.len());
      delivered.extend_from_slice(&a[..first]);
      delivered.extend_from_slice(&b[..n - first]);
      assert_eq!(reader.hash(), expected(&delivered));
    }

    assert_eq!(delivered, data);
    assert_eq!(reader.hash(), expected(&data));
  }

  #[test]
  fn short_vectored_write_hashes_accepted_prefix() {
    let mut writer = HashWriter::<_, Sum>::new(Trickle { out: Vec::new(), limit: 3 });
    let n = writer
      .write_vectored(&[IoSlice::new(b"abcde"), IoSlice::new(b"fgh")])
      .unwrap();
    assert_eq!(n, 3);
    assert_eq!(writer.hash(), expected(b"abc"));

    let n = writer.write_vectored(&[IoSlice::new(b"de"), IoSlice::new(b"fgh")]).unwrap();
    assert_eq!(n, 2);
    assert_eq!(writer.inner().out, b"abcde".to_vec());
    assert_eq!(writer.hash(), expected(b"abcde"));
  }

  #[test]
  fn io_slices_match_vectored_update() {
    let parts: [&[u8]; 4] = [b"", b"alpha", b"-", b"omega"];
    let slices: Vec<IoSlice<'_>> = parts.iter().map(|p| IoSlice::new(p)).collect();

    let mut from_io = Sum::new();
    from_io.update_io_slices(&slices);
    let mut from_vec = Sum::new();
    from_vec.update_vectored(&parts);

    assert_eq!(from_io.finalize(), from_vec.finalize());
    assert_eq!(from_io.finalize(), expected(b"alpha-omega"));
    assert_eq!(Sum::hash_vectored(&parts), expected(b"alpha-omega"));
  }
}
