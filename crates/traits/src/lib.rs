//! Hashing seams for the xxh3 workspace.
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`FastHash`] | One-shot seeded hashing of a complete buffer |
//! | [`StreamingHash`] | Incremental update / finalize / reset |
//!
//! With the `std` feature, [`io::HashReader`] and [`io::HashWriter`] hash
//! bytes flowing through any reader or writer.
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod fast_hash;
#[cfg(feature = "std")]
pub mod io;
mod streaming;

pub use fast_hash::FastHash;
pub use streaming::StreamingHash;
