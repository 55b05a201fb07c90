//! Accumulator kernels for the long-input path.
//!
//! A kernel implements the two per-stripe operations of the long path:
//!
//! - `accumulate_512`: fold one 64-byte stripe, keyed by 64 secret bytes, into
//!   the eight 64-bit lanes;
//! - `scramble`: re-randomize every lane at a block boundary.
//!
//! Every kernel must leave the lanes in exactly the state the portable kernel
//! does; the choice between them is purely a speed decision.

use crate::long::Acc;

mod portable;

#[cfg(target_arch = "aarch64")]
mod aarch64;
#[cfg(target_arch = "x86_64")]
mod x86_64;

/// Folds a stripe (first 64 bytes of the first slice) keyed by the first 64
/// bytes of the second slice into the lanes.
pub(crate) type AccumulateFn = fn(&mut Acc, &[u8], &[u8]);
/// Scrambles the lanes with the first 64 bytes of the slice.
pub(crate) type ScrambleFn = fn(&mut Acc, &[u8]);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum KernelId {
  Portable = 0,
  /// x86_64 baseline SIMD.
  Sse2 = 1,
  /// aarch64 baseline SIMD.
  Neon = 2,
}

/// Every kernel, in preference order for forced SIMD selection.
pub const ALL: &[KernelId] = &[KernelId::Portable, KernelId::Sse2, KernelId::Neon];

impl KernelId {
  #[inline]
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Portable => "portable",
      Self::Sse2 => "x86_64/sse2",
      Self::Neon => "aarch64/neon",
    }
  }

  /// Whether this kernel is compiled in for the current target.
  #[inline]
  #[must_use]
  pub const fn is_available(self) -> bool {
    match self {
      Self::Portable => true,
      Self::Sse2 => cfg!(target_arch = "x86_64"),
      Self::Neon => cfg!(target_arch = "aarch64"),
    }
  }
}

/// Parse a kernel name as printed by [`KernelId::as_str`].
#[must_use]
pub fn id_from_name(name: &str) -> Option<KernelId> {
  ALL.iter().copied().find(|id| id.as_str() == name)
}

/// The SIMD kernel native to this target, if any.
#[inline]
#[must_use]
pub const fn native_simd() -> Option<KernelId> {
  if cfg!(target_arch = "x86_64") {
    Some(KernelId::Sse2)
  } else if cfg!(target_arch = "aarch64") {
    Some(KernelId::Neon)
  } else {
    None
  }
}

/// A resolved kernel: the operations plus the id they came from.
#[derive(Clone, Copy)]
pub(crate) struct Kernel {
  pub(crate) id: KernelId,
  pub(crate) accumulate_512: AccumulateFn,
  pub(crate) scramble: ScrambleFn,
}

impl core::fmt::Debug for Kernel {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_tuple("Kernel").field(&self.id.as_str()).finish()
  }
}

const PORTABLE: Kernel = Kernel {
  id: KernelId::Portable,
  accumulate_512: portable::accumulate_512,
  scramble: portable::scramble,
};

/// Look up the operations for `id`, falling back to portable when `id` is not
/// compiled for this target.
#[must_use]
pub(crate) fn resolve(id: KernelId) -> Kernel {
  match id {
    KernelId::Portable => PORTABLE,
    #[cfg(target_arch = "x86_64")]
    KernelId::Sse2 => Kernel {
      id,
      accumulate_512: x86_64::accumulate_512,
      scramble: x86_64::scramble,
    },
    #[cfg(target_arch = "aarch64")]
    KernelId::Neon => Kernel {
      id,
      accumulate_512: aarch64::accumulate_512,
      scramble: aarch64::scramble,
    },
    #[allow(unreachable_patterns)]
    _ => PORTABLE,
  }
}
