//! Input-length regimes.
//!
//! The thresholds are part of the XXH3 format: moving any of them changes the
//! hash of every input near the boundary.

/// Longest input handled without the accumulator lanes.
pub const MID_SIZE_MAX: usize = 240;

/// The code path an input length takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Regime {
  Empty,
  Len1To3,
  Len4To8,
  Len9To16,
  Len17To128,
  Len129To240,
  /// More than [`MID_SIZE_MAX`] bytes: striped accumulator lanes.
  Long,
}

impl Regime {
  #[inline(always)]
  #[must_use]
  pub const fn for_len(len: usize) -> Self {
    match len {
      0 => Self::Empty,
      1..=3 => Self::Len1To3,
      4..=8 => Self::Len4To8,
      9..=16 => Self::Len9To16,
      17..=128 => Self::Len17To128,
      129..=MID_SIZE_MAX => Self::Len129To240,
      _ => Self::Long,
    }
  }

  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Empty => "empty",
      Self::Len1To3 => "1to3",
      Self::Len4To8 => "4to8",
      Self::Len9To16 => "9to16",
      Self::Len17To128 => "17to128",
      Self::Len129To240 => "129to240",
      Self::Long => "long",
    }
  }

  /// Whether this regime runs the SIMD-dispatched accumulator.
  #[inline]
  #[must_use]
  pub const fn uses_accumulator(self) -> bool {
    matches!(self, Self::Long)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn boundaries() {
    let cases = [
      (0, Regime::Empty),
      (1, Regime::Len1To3),
      (3, Regime::Len1To3),
      (4, Regime::Len4To8),
      (8, Regime::Len4To8),
      (9, Regime::Len9To16),
      (16, Regime::Len9To16),
      (17, Regime::Len17To128),
      (128, Regime::Len17To128),
      (129, Regime::Len129To240),
      (240, Regime::Len129To240),
      (241, Regime::Long),
      (usize::MAX, Regime::Long),
    ];
    for (len, regime) in cases {
      assert_eq!(Regime::for_len(len), regime, "len={len}");
    }
  }

  #[test]
  fn names_are_distinct() {
    let names = [0usize, 1, 4, 9, 17, 129, 241].map(|len| Regime::for_len(len).as_str());
    assert_eq!(names, ["empty", "1to3", "4to8", "9to16", "17to128", "129to240", "long"]);
  }

  #[test]
  fn only_long_inputs_accumulate() {
    assert!(Regime::Long.uses_accumulator());
    assert!(!Regime::Len129To240.uses_accumulator());
  }
}
