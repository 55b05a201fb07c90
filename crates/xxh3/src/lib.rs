//! XXH3 (**NOT CRYPTO**): 64- and 128-bit, bit-exact with the reference
//! `XXH3_64bits_withSeed` / `XXH3_128bits_withSeed` family.
//!
//! ```
//! use xxh3::{Xxh3Stream64, xxh3_64};
//!
//! let oneshot = xxh3_64(b"Hello World!", 0);
//! assert_eq!(oneshot, 0x673E_3C49_3921_A2D5);
//!
//! let mut stream = Xxh3Stream64::new();
//! stream.update(b"Hello ");
//! stream.update(b"World!");
//! assert_eq!(stream.finalize(), oneshot);
//! ```
//!
//! # Paths
//!
//! Inputs are routed by length ([`Regime`]). Up to [`MID_SIZE_MAX`] bytes the
//! hash is a handful of scalar multiply-folds. Longer inputs run the striped
//! accumulator, whose inner step is provided by a [`KernelId`]-selected
//! kernel (portable, SSE2 or NEON). Kernels are interchangeable: they produce
//! identical output.
//!
//! # Configuration
//!
//! With `std`, `XXH3_FORCE=portable|simd|auto` overrides kernel selection
//! (see [`config`]). With `diag`, [`diag::select`] explains the choice for a
//! given length.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod config;
#[cfg(feature = "diag")]
pub mod diag;
pub mod dispatch;
mod error;
pub mod kernels;
mod long;
mod mid;
mod oneshot;
mod regime;
mod secret;
mod short;
mod streaming;
mod util;

pub use config::{Xxh3Config, Xxh3Force};
pub use error::SecretError;
pub use kernels::KernelId;
pub use oneshot::{Xxh3_64, Xxh3_128, xxh3_64, xxh3_64_with_secret, xxh3_128, xxh3_128_with_secret};
pub use regime::{MID_SIZE_MAX, Regime};
pub use secret::{DEFAULT_SECRET, DEFAULT_SECRET_SIZE, SECRET_SIZE_MIN, Secret, derive_secret};
pub use streaming::{Xxh3BuildHasher, Xxh3Stream64, Xxh3Stream128};
pub use traits::{FastHash, StreamingHash};
