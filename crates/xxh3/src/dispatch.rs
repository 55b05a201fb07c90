//! Kernel selection for the long path.
//!
//! Resolved once per process under `std`. Without `std` there is no
//! environment to consult, so the choice is a pure function of the target and
//! recomputing it is free.

use crate::{
  config::{self, Xxh3Force},
  kernels::{self, Kernel, KernelId},
  regime::Regime,
};

#[inline]
#[must_use]
pub(crate) fn select_id(force: Xxh3Force) -> KernelId {
  match force {
    Xxh3Force::Portable => KernelId::Portable,
    Xxh3Force::Auto | Xxh3Force::Simd => kernels::native_simd().unwrap_or(KernelId::Portable),
  }
}

fn detect() -> Kernel {
  kernels::resolve(select_id(config::get().effective_force))
}

#[cfg(feature = "std")]
#[inline]
#[must_use]
pub(crate) fn active() -> Kernel {
  use std::sync::OnceLock;
  static ACTIVE: OnceLock<Kernel> = OnceLock::new();
  *ACTIVE.get_or_init(detect)
}

#[cfg(not(feature = "std"))]
#[inline]
#[must_use]
pub(crate) fn active() -> Kernel {
  detect()
}

/// The kernel used for inputs that reach the accumulator.
#[inline]
#[must_use]
pub fn active_kernel_id() -> KernelId {
  active().id
}

/// Name of the kernel a `len`-byte input runs through.
#[inline]
#[must_use]
pub fn kernel_name_for_len(len: usize) -> &'static str {
  if Regime::for_len(len).uses_accumulator() {
    active().id.as_str()
  } else {
    KernelId::Portable.as_str()
  }
}
