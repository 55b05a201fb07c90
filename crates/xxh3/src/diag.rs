//! Optional diagnostics for kernel selection.
//!
//! Behind `cfg(feature = "diag")`; explains which path and kernel a given
//! input length takes without affecting normal builds.

use crate::{
  config::{self, Xxh3Force},
  dispatch,
  kernels::KernelId,
  long,
  regime::Regime,
  secret::DEFAULT_SECRET_SIZE,
};

/// High-level reason for a selection outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionReason {
  /// The input never reaches the accumulator (always portable).
  ShortInput,
  /// A forced mode was active.
  Forced,
  /// Normal auto selection.
  Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionDiag {
  pub len: usize,
  pub regime: Regime,
  /// Short name of the length path (`"empty"`, `"1to3"`, ..., `"long"`).
  pub path: &'static str,
  pub reason: SelectionReason,
  pub requested_force: Xxh3Force,
  pub effective_force: Xxh3Force,
  pub selected_kernel: &'static str,
  /// Stripes per block with the default (or seed-derived) secret.
  pub stripes_per_block: usize,
  /// Full blocks the long loop scrambles after (0 outside the long regime).
  pub blocks: usize,
}

/// Diagnose one-shot selection for `len` bytes with a default-sized secret.
#[must_use]
pub fn select(len: usize) -> SelectionDiag {
  let cfg = config::get();
  let regime = Regime::for_len(len);
  let stripes_per_block = long::stripes_per_block(DEFAULT_SECRET_SIZE);

  let (reason, selected_kernel, blocks) = if regime.uses_accumulator() {
    let reason = if cfg.effective_force == Xxh3Force::Auto {
      SelectionReason::Auto
    } else {
      SelectionReason::Forced
    };
    let blocks = (len - 1) / (stripes_per_block * long::STRIPE_LEN);
    (reason, dispatch::kernel_name_for_len(len), blocks)
  } else {
    (SelectionReason::ShortInput, KernelId::Portable.as_str(), 0)
  };

  SelectionDiag {
    len,
    regime,
    path: regime.as_str(),
    reason,
    requested_force: cfg.requested_force,
    effective_force: cfg.effective_force,
    selected_kernel,
    stripes_per_block,
    blocks,
  }
}
