// The public handle: owns the parsed affix configuration and word list
// plus the per-dictionary precomputations the suggesters rely on, and
// exposes the two operations callers care about.

use std::path::Path;

use crate::aff::Aff;
use crate::dic::Dic;
use crate::lookup::{Lookup, LookupOptions};
use crate::reader::{read_aff, read_dic, LoadError};
use crate::suggest::Suggest;

/// A loaded dictionary: the affix configuration, the word list, and the
/// derived data for suggestions. Immutable after construction; `lookup`
/// and `suggest` are pure and may run concurrently from many threads.
pub struct Dictionary {
    aff: Aff,
    dic: Dic,
    /// Word indices eligible as similarity-scan roots (no forbidden,
    /// nosuggest or compound-only entries).
    ngram_roots: Vec<usize>,
    /// Metaphone codes aligned with `ngram_roots`; empty without PHONE.
    phonet_codes: Vec<String>,
}

impl Dictionary {
    /// Load from `<base>.aff` and `<base>.dic`, e.g.
    /// `Dictionary::from_path("dictionaries/en_US")`.
    pub fn from_path<P: AsRef<Path>>(base: P) -> Result<Dictionary, LoadError> {
        let base = base.as_ref();
        let aff_bytes = std::fs::read(base.with_extension("aff"))?;
        let dic_bytes = std::fs::read(base.with_extension("dic"))?;
        Dictionary::from_slices(&aff_bytes, &dic_bytes)
    }

    /// Build from in-memory `.aff` and `.dic` contents.
    pub fn from_slices(aff_bytes: &[u8], dic_bytes: &[u8]) -> Result<Dictionary, LoadError> {
        let mut aff = read_aff(aff_bytes)?;
        let dic = read_dic(dic_bytes, &mut aff)?;
        Ok(Dictionary::assemble(aff, dic))
    }

    fn assemble(aff: Aff, dic: Dic) -> Dictionary {
        let skip = [aff.forbidden_word, aff.no_suggest, aff.only_in_compound];
        let ngram_roots: Vec<usize> = dic
            .words
            .iter()
            .enumerate()
            .filter(|(_, word)| !skip.iter().any(|flag| word.flags.has(*flag)))
            .map(|(i, _)| i)
            .collect();
        let phonet_codes = match &aff.phone {
            Some(table) => ngram_roots
                .iter()
                .map(|&i| table.metaphone(&dic.words[i].stem))
                .collect(),
            None => Vec::new(),
        };
        Dictionary { aff, dic, ngram_roots, phonet_codes }
    }

    /// Is `word` correctly spelled?
    pub fn lookup(&self, word: &str) -> bool {
        self.lookup_with(word, LookupOptions::default())
    }

    /// Lookup with explicit options (exact capitalization only, reject
    /// NOSUGGEST words, forbid BREAK splitting).
    pub fn lookup_with(&self, word: &str, opts: LookupOptions) -> bool {
        Lookup::new(&self.aff, &self.dic).check(word, opts)
    }

    /// Ranked corrections for a misspelled word, best first. The list is
    /// bounded (15 by default), deduplicated and output-converted; calling
    /// this on a correctly spelled word is allowed but rarely useful.
    pub fn suggest(&self, word: &str) -> Vec<String> {
        Suggest::new(&self.aff, &self.dic, &self.ngram_roots, &self.phonet_codes).suggest(word)
    }

    /// The parsed affix configuration.
    pub fn aff(&self) -> &Aff {
        &self.aff
    }

    /// The word-list store.
    pub fn dic(&self) -> &Dic {
        &self.dic
    }
}
