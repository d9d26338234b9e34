//! Shared primitives for the ortho spellchecker.
//!
//! This crate holds the leaf utilities that both the lookup and the
//! suggestion engines build on:
//!
//! - [`flags`] -- affix/property flags, flag syntaxes and flag sets
//! - [`casing`] -- capitalization classification and case-variant
//!   enumeration, including German sharp-s and Turkic dotted-i behavior
//! - [`metrics`] -- string similarity metrics (n-grams, longest common
//!   subsequence, shared prefixes, common character positions)

pub mod casing;
pub mod flags;
pub mod metrics;

pub use casing::{Captype, Casing};
pub use flags::{Flag, FlagSet, FlagType};
