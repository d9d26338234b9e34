//! Hunspell-compatible spellchecking: lookup and suggestion engines.
//!
//! Given an affix-definition file and a word-list file for a natural
//! language, this crate answers two questions about an input token:
//! is it a correctly spelled word, and if not, what are plausible
//! corrections, ranked.
//!
//! # Architecture
//!
//! - [`aff`] -- the parsed affix-file settings: flags with special
//!   meaning, suggestion tables (REP/MAP/KEY/TRY/PHONE), compounding
//!   rules, conversion tables, and the affix entries themselves
//! - [`dic`] -- the word list: stem -> homonym entries with flags and
//!   morphology
//! - [`trie`] -- prefix/suffix indexes over affix surfaces
//! - [`reader`] -- parsers producing [`aff::Aff`] and [`dic::Dic`] from
//!   `.aff`/`.dic` file contents
//! - [`lookup`] -- the membership engine: affix decomposition,
//!   compounding, word breaking, case handling
//! - [`suggest`] -- the correction engine: edit permutations, n-gram
//!   similarity scan, metaphone similarity scan, and their orchestration
//!
//! The usual entry point is [`Dictionary`]:
//!
//! ```no_run
//! let dict = ortho::Dictionary::from_path("dictionaries/en_US")?;
//! assert!(dict.lookup("kitten"));
//! let fixes: Vec<String> = dict.suggest("kiten");
//! # Ok::<(), ortho::LoadError>(())
//! ```
//!
//! A loaded `Dictionary` is immutable; `lookup` and `suggest` take
//! `&self` and may be called from many threads at once.

pub mod aff;
pub mod dic;
pub mod dictionary;
pub mod lookup;
pub mod reader;
pub mod suggest;
pub mod trie;

pub use dictionary::Dictionary;
pub use lookup::LookupOptions;
pub use reader::LoadError;
