//! Error types.
//!
//! Hashing itself is total; the only fallible operation is building a
//! caller-supplied [`Secret`](crate::Secret).

use core::fmt;

/// A caller-supplied secret was rejected.
///
/// # Examples
///
/// ```
/// use xxh3::{Secret, SecretError, SECRET_SIZE_MIN};
///
/// let short = [0u8; 64];
/// assert_eq!(
///   Secret::new(&short),
///   Err(SecretError::TooShort { len: 64, min: SECRET_SIZE_MIN })
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SecretError {
  /// The secret has fewer than [`SECRET_SIZE_MIN`](crate::SECRET_SIZE_MIN) bytes.
  TooShort {
    /// Length that was supplied.
    len: usize,
    /// Minimum accepted length.
    min: usize,
  },
}

impl fmt::Display for SecretError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::TooShort { len, min } => write!(f, "secret too short: {len} bytes, need at least {min}"),
    }
  }
}

impl core::error::Error for SecretError {}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::string::ToString;

  use super::*;

  #[test]
  fn display_names_both_lengths() {
    let err = SecretError::TooShort { len: 10, min: 136 };
    assert_eq!(err.to_string(), "secret too short: 10 bytes, need at least 136");
  }

  #[test]
  fn is_core_error() {
    fn assert_error<E: core::error::Error + Send + Sync + 'static>() {}
    assert_error::<SecretError>();
  }
}
