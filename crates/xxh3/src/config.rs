//! XXH3 runtime configuration.
//!
//! The only knob is which accumulator kernel the long path uses. It can be
//! overridden with the `XXH3_FORCE` environment variable (read once, `std`
//! only); forced modes are always clamped to what the target compiles in.

use crate::kernels::{self, KernelId};

/// Environment variable consulted for the kernel override.
pub const FORCE_ENV: &str = "XXH3_FORCE";

/// Forced kernel selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Xxh3Force {
  /// Use the target's native SIMD kernel when there is one.
  #[default]
  Auto,
  /// Force the scalar kernel.
  Portable,
  /// Force the native SIMD kernel (if the target has one).
  ///
  /// - x86_64: SSE2
  /// - aarch64: NEON
  Simd,
}

impl Xxh3Force {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Portable => "portable",
      Self::Simd => "simd",
    }
  }
}

/// Effective configuration after applying overrides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Xxh3Config {
  /// Force mode as requested (env/programmatic).
  pub requested_force: Xxh3Force,
  /// Force mode clamped to what this target supports.
  pub effective_force: Xxh3Force,
}

/// Parse an override value. Empty or unrecognized values yield `None`.
#[must_use]
pub fn parse_force(value: &str) -> Option<Xxh3Force> {
  let value = value.trim();
  if value.is_empty() {
    return None;
  }

  if value.eq_ignore_ascii_case("auto") {
    return Some(Xxh3Force::Auto);
  }
  if value.eq_ignore_ascii_case("portable") || value.eq_ignore_ascii_case("scalar") {
    return Some(Xxh3Force::Portable);
  }
  if value.eq_ignore_ascii_case("simd") || value.eq_ignore_ascii_case("sse2") || value.eq_ignore_ascii_case("neon") {
    return Some(Xxh3Force::Simd);
  }

  // Full kernel names as reported by `dispatch::kernel_name_for_len`.
  kernels::id_from_name(value).map(|id| match id {
    KernelId::Portable => Xxh3Force::Portable,
    KernelId::Sse2 | KernelId::Neon => Xxh3Force::Simd,
  })
}

#[cfg(feature = "std")]
fn requested() -> Xxh3Force {
  use std::sync::OnceLock;
  static FORCE: OnceLock<Xxh3Force> = OnceLock::new();
  *FORCE.get_or_init(|| {
    std::env::var(FORCE_ENV)
      .ok()
      .as_deref()
      .and_then(parse_force)
      .unwrap_or_default()
  })
}

#[cfg(not(feature = "std"))]
fn requested() -> Xxh3Force {
  Xxh3Force::Auto
}

#[inline]
#[must_use]
pub(crate) const fn clamp_force(requested: Xxh3Force) -> Xxh3Force {
  match requested {
    Xxh3Force::Auto | Xxh3Force::Portable => requested,
    Xxh3Force::Simd => {
      if kernels::native_simd().is_some() {
        Xxh3Force::Simd
      } else {
        Xxh3Force::Auto
      }
    }
  }
}

/// Get the effective XXH3 configuration for the current process.
#[inline]
#[must_use]
pub fn get() -> Xxh3Config {
  let requested_force = requested();
  Xxh3Config {
    requested_force,
    effective_force: clamp_force(requested_force),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_aliases_case_insensitively() {
    assert_eq!(parse_force("auto"), Some(Xxh3Force::Auto));
    assert_eq!(parse_force(" AUTO "), Some(Xxh3Force::Auto));
    assert_eq!(parse_force("Portable"), Some(Xxh3Force::Portable));
    assert_eq!(parse_force("scalar"), Some(Xxh3Force::Portable));
    assert_eq!(parse_force("SIMD"), Some(Xxh3Force::Simd));
    assert_eq!(parse_force("sse2"), Some(Xxh3Force::Simd));
    assert_eq!(parse_force("Neon"), Some(Xxh3Force::Simd));
  }

  #[test]
  fn accepts_reported_kernel_names() {
    assert_eq!(parse_force("x86_64/sse2"), Some(Xxh3Force::Simd));
    assert_eq!(parse_force("aarch64/neon"), Some(Xxh3Force::Simd));
    for &id in kernels::ALL {
      let expected = if id == KernelId::Portable { Xxh3Force::Portable } else { Xxh3Force::Simd };
      assert_eq!(parse_force(id.as_str()), Some(expected));
    }
    assert_eq!(parse_force("x86_64/avx512"), None);
  }

  #[test]
  fn rejects_empty_and_unknown() {
    assert_eq!(parse_force(""), None);
    assert_eq!(parse_force("   "), None);
    assert_eq!(parse_force("avx512"), None);
  }

  #[test]
  fn clamp_keeps_non_simd_modes() {
    assert_eq!(clamp_force(Xxh3Force::Auto), Xxh3Force::Auto);
    assert_eq!(clamp_force(Xxh3Force::Portable), Xxh3Force::Portable);
    let simd = clamp_force(Xxh3Force::Simd);
    if kernels::native_simd().is_some() {
      assert_eq!(simd, Xxh3Force::Simd);
    } else {
      assert_eq!(simd, Xxh3Force::Auto);
    }
  }

  #[test]
  fn effective_is_clamped_requested() {
    let cfg = get();
    assert_eq!(cfg.effective_force, clamp_force(cfg.requested_force));
  }

  #[test]
  fn names_parse_back() {
    for force in [Xxh3Force::Auto, Xxh3Force::Portable, Xxh3Force::Simd] {
      assert_eq!(parse_force(force.as_str()), Some(force));
    }
  }
}
