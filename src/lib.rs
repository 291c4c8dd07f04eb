//! Constant-time `Decompose` and `UseHint` for ML-DSA style lattice signatures.
//!
//! # About
//! ML-DSA signing splits every coefficient `r` of `w = A*y` into a high part
//! `r1` and a centered low part `r0` with `r = r1 * 2*gamma2 + r0`, and
//! verification recovers the high part from a one-bit hint. Both `r` and the
//! hint are secret-dependent, and the textbook formulation uses `/`, `%` and
//! sign tests, which compile to variable-latency divisions and branches.
//!
//! This crate computes the same results with:
//! - a Barrett multiply-and-shift in place of division, with a precomputed
//!   reciprocal per supported `gamma2`, selected by mask rather than by index;
//! - mask/blend selection in place of every conditional.
//!
//! # Usage
//! ```
//! use ct_decompose::{GAMMA2_32, decompose, use_hint};
//!
//! let d = decompose(261889, GAMMA2_32);
//! assert_eq!((d.r1, d.r0), (1, -261887));
//!
//! assert_eq!(use_hint(261888, 1, GAMMA2_32), 1);
//! ```
//!
//! # Variable-time baseline
//! The [`vartime`] module carries the textbook implementation. It exists to
//! cross-check the constant-time engine and to give timing-leakage detectors
//! a positive control. Do not use it on secret data.
//!
//! # Status
//! Only `gamma2 = (q-1)/32` and `gamma2 = (q-1)/88` are supported. Other
//! values produce unspecified output; use [`Gamma2::new`] to validate a
//! parameter up front.

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code, clippy::unwrap_used)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_qualifications
)]

mod const_choice;
mod decompose;
mod params;
pub mod primitives;
pub mod vartime;

#[cfg(feature = "rand_core")]
mod rand;

pub use crate::{
    const_choice::ConstChoice,
    decompose::{
        Decomposition, decompose, decompose_slice, high_bits, low_bits, use_hint, use_hint_slice,
    },
    params::{GAMMA2_32, GAMMA2_88, Gamma2, Q, RoundingParams},
};
pub use subtle;

#[cfg(feature = "rand_core")]
pub use {crate::rand::random_coefficient, rand_core};

#[cfg(feature = "zeroize")]
pub use zeroize;
