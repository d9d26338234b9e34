// The parsed affix file: every recognized option, the affix entries, and
// the derived indexes (affix tries, flag -> group maps) built once after
// parsing.

pub mod affix;
pub mod compound_rule;
pub mod patterns;
pub mod phonet;

use hashbrown::HashMap;
use ortho_core::casing::Casing;
use ortho_core::flags::{Flag, FlagSet, FlagType};

use crate::trie::CharTrie;

pub use affix::{Condition, Prefix, Suffix};
pub use compound_rule::CompoundRule;
pub use patterns::{BreakPattern, CompoundPattern, ConvTable, Ignore, RepPattern};
pub use phonet::PhonetTable;

/// The complete settings object from a `.aff` file.
///
/// Field meanings follow the Hunspell affix-file documentation; fields are
/// grouped the way the directives are usually grouped in real files.
/// Everything is immutable once the dictionary is loaded.
#[derive(Debug)]
pub struct Aff {
    // -- General ------------------------------------------------------------
    /// Declared character encoding (`SET`), used to decode both files.
    pub set: String,
    /// Flag syntax (`FLAG`).
    pub flag_type: FlagType,
    /// Language code (`LANG`); Turkic codes switch the casing behavior.
    pub lang: Option<String>,
    /// Extra word characters (`WORDCHARS`); carried for tokenizing callers.
    pub wordchars: Option<String>,
    /// Characters to strip from input words (`IGNORE`).
    pub ignore: Option<Ignore>,
    /// German sharp-s behavior (`CHECKSHARPS`).
    pub check_sharps: bool,
    /// Flag marking forbidden words (`FORBIDDENWORD`).
    pub forbidden_word: Option<Flag>,

    // -- Suggestions --------------------------------------------------------
    /// Keyboard layout groups (`KEY`), `|`-separated.
    pub key: String,
    /// Character insertion/replacement alphabet (`TRY`), ordered by
    /// frequency.
    pub try_chars: String,
    /// Flag marking words never to suggest (`NOSUGGEST`).
    pub no_suggest: Option<Flag>,
    /// Flag marking words whose case must not be coerced (`KEEPCASE`).
    pub keep_case: Option<Flag>,
    /// Replacement table (`REP`), extended by `ph:` entries from the word
    /// list.
    pub rep: Vec<RepPattern>,
    /// Groups of interchangeable characters (`MAP`); group members may be
    /// multi-character.
    pub map_chars: Vec<Vec<String>>,
    /// Never suggest splitting a word (`NOSPLITSUGS`).
    pub no_split_sugs: bool,
    /// Append a period to suggestions when the input had one
    /// (`SUGSWITHDOTS`).
    pub sugs_with_dots: bool,
    /// Phonetic rule table (`PHONE`).
    pub phone: Option<PhonetTable>,
    /// Cap on compound-containing suggestions (`MAXCPDSUGS`).
    pub max_cpd_sugs: usize,
    /// N-gram similarity cutoff tuning (`MAXDIFF`, 0..=10; -1 = unset).
    pub max_diff: i32,
    /// Keep only top-scored n-gram suggestions (`ONLYMAXDIFF`).
    pub only_max_diff: bool,
    /// Cap on n-gram suggestions (`MAXNGRAMSUGS`).
    pub max_ngram_sugs: usize,

    // -- Stemming -----------------------------------------------------------
    /// All prefix entries, in file order.
    pub prefixes: Vec<Prefix>,
    /// All suffix entries, in file order.
    pub suffixes: Vec<Suffix>,
    /// Stem/affix needs a companion affix (`NEEDAFFIX`).
    pub need_affix: Option<Flag>,
    /// Circumfix pairing flag (`CIRCUMFIX`).
    pub circumfix: Option<Flag>,
    /// Two prefixes instead of two suffixes (`COMPLEXPREFIXES`).
    pub complex_prefixes: bool,
    /// Affixes may consume the whole stem (`FULLSTRIP`).
    pub full_strip: bool,

    // -- Compounding --------------------------------------------------------
    /// Word break patterns (`BREAK`); dashes by default.
    pub breaks: Vec<BreakPattern>,
    /// Compound rules over flags (`COMPOUNDRULE`).
    pub compound_rules: Vec<CompoundRule>,
    /// Minimum length of a compound segment (`COMPOUNDMIN`), in chars.
    pub compound_min: usize,
    /// Maximum number of compound segments (`COMPOUNDWORDMAX`).
    pub compound_word_max: Option<usize>,
    /// Universal compound membership flag (`COMPOUNDFLAG`).
    pub compound_flag: Option<Flag>,
    /// Positional compound flags.
    pub compound_begin: Option<Flag>,
    pub compound_middle: Option<Flag>,
    pub compound_end: Option<Flag>,
    /// Word usable only inside compounds (`ONLYINCOMPOUND`).
    pub only_in_compound: Option<Flag>,
    /// Affix allowed at inner compound boundaries (`COMPOUNDPERMITFLAG`).
    pub compound_permit: Option<Flag>,
    /// Affix forbidden anywhere in compounds (`COMPOUNDFORBIDFLAG`).
    pub compound_forbid: Option<Flag>,
    /// Root-of-compound marker (`COMPOUNDROOT`); parsed, counted once.
    pub compound_root: Option<Flag>,
    /// Last segment forces a capitalized compound (`FORCEUCASE`).
    pub force_ucase: Option<Flag>,
    pub check_compound_case: bool,
    pub check_compound_dup: bool,
    pub check_compound_rep: bool,
    pub check_compound_triple: bool,
    pub simplified_triple: bool,
    /// Forbidden boundary shapes (`CHECKCOMPOUNDPATTERN`).
    pub check_compound_pattern: Vec<CompoundPattern>,
    /// Parsed but not acted on (Hungarian-specific).
    pub compound_syllable: Option<(usize, String)>,
    /// Parsed but not acted on (Hungarian-specific).
    pub syllable_num: Option<String>,

    // -- Pre/post-processing ------------------------------------------------
    /// Input conversion table (`ICONV`).
    pub iconv: Option<ConvTable>,
    /// Output conversion table (`OCONV`).
    pub oconv: Option<ConvTable>,

    // -- Aliasing -----------------------------------------------------------
    /// Flag-set aliases (`AF`), 1-based in the file.
    pub af: Vec<FlagSet>,
    /// Morphology aliases (`AM`), 1-based in the file.
    pub am: Vec<Vec<String>>,

    // -- Other --------------------------------------------------------------
    /// Flag marking rare/probably-wrong words (`WARN`).
    pub warn: Option<Flag>,
    /// Treat WARN words as forbidden (`FORBIDWARN`).
    pub forbid_warn: bool,
    /// Substandard-form flag; parsed, not acted on.
    pub substandard: Option<Flag>,

    // -- Derived ------------------------------------------------------------
    /// Case behavior, derived from CHECKSHARPS/LANG.
    pub casing: Casing,
    pub(crate) prefix_groups: HashMap<Flag, Vec<usize>>,
    pub(crate) suffix_groups: HashMap<Flag, Vec<usize>>,
    pub(crate) prefix_index: CharTrie,
    pub(crate) suffix_index: CharTrie,
}

impl Default for Aff {
    fn default() -> Aff {
        Aff {
            set: "ISO8859-1".to_string(),
            flag_type: FlagType::Short,
            lang: None,
            wordchars: None,
            ignore: None,
            check_sharps: false,
            forbidden_word: None,
            key: String::new(),
            try_chars: String::new(),
            no_suggest: None,
            keep_case: None,
            rep: Vec::new(),
            map_chars: Vec::new(),
            no_split_sugs: false,
            sugs_with_dots: false,
            phone: None,
            max_cpd_sugs: 3,
            max_diff: -1,
            only_max_diff: false,
            max_ngram_sugs: 4,
            prefixes: Vec::new(),
            suffixes: Vec::new(),
            need_affix: None,
            circumfix: None,
            complex_prefixes: false,
            full_strip: false,
            breaks: vec![
                BreakPattern::parse("-"),
                BreakPattern::parse("^-"),
                BreakPattern::parse("-$"),
            ],
            compound_rules: Vec::new(),
            compound_min: 3,
            compound_word_max: None,
            compound_flag: None,
            compound_begin: None,
            compound_middle: None,
            compound_end: None,
            only_in_compound: None,
            compound_permit: None,
            compound_forbid: None,
            compound_root: None,
            force_ucase: None,
            check_compound_case: false,
            check_compound_dup: false,
            check_compound_rep: false,
            check_compound_triple: false,
            simplified_triple: false,
            check_compound_pattern: Vec::new(),
            compound_syllable: None,
            syllable_num: None,
            iconv: None,
            oconv: None,
            af: Vec::new(),
            am: Vec::new(),
            warn: None,
            forbid_warn: false,
            substandard: None,
            casing: Casing::Standard,
            prefix_groups: HashMap::new(),
            suffix_groups: HashMap::new(),
            prefix_index: CharTrie::new(),
            suffix_index: CharTrie::new(),
        }
    }
}

impl Aff {
    /// Derive the casing behavior and build the affix indexes. Called once
    /// by the reader after all directives are in.
    pub fn finish(&mut self) {
        self.casing = if self.check_sharps {
            Casing::German
        } else {
            match self.lang.as_deref() {
                Some(lang)
                    if ["tr", "az", "crh"]
                        .iter()
                        .any(|code| lang == *code || lang.starts_with(&format!("{code}_"))) =>
                {
                    Casing::Turkic
                }
                _ => Casing::Standard,
            }
        };

        self.prefix_groups = HashMap::new();
        self.prefix_index = CharTrie::new();
        for (i, prefix) in self.prefixes.iter().enumerate() {
            self.prefix_groups.entry(prefix.flag).or_default().push(i);
            self.prefix_index.insert(prefix.add.chars(), i);
        }

        self.suffix_groups = HashMap::new();
        self.suffix_index = CharTrie::new();
        for (i, suffix) in self.suffixes.iter().enumerate() {
            self.suffix_groups.entry(suffix.flag).or_default().push(i);
            self.suffix_index.insert(suffix.add.chars().rev(), i);
        }
    }

    /// Suffix entries whose surface terminates some tail of `word`.
    pub fn suffixes_for(&self, word: &str) -> Vec<&Suffix> {
        self.suffix_index
            .lookup(word.chars().rev())
            .into_iter()
            .map(|i| &self.suffixes[i])
            .collect()
    }

    /// Prefix entries whose surface starts `word`.
    pub fn prefixes_for(&self, word: &str) -> Vec<&Prefix> {
        self.prefix_index
            .lookup(word.chars())
            .into_iter()
            .map(|i| &self.prefixes[i])
            .collect()
    }

    /// All suffix entries of one affix class.
    pub fn suffixes_with_flag(&self, flag: Flag) -> impl Iterator<Item = &Suffix> {
        self.suffix_groups
            .get(&flag)
            .into_iter()
            .flatten()
            .map(move |&i| &self.suffixes[i])
    }

    /// All prefix entries of one affix class.
    pub fn prefixes_with_flag(&self, flag: Flag) -> impl Iterator<Item = &Prefix> {
        self.prefix_groups
            .get(&flag)
            .into_iter()
            .flatten()
            .map(move |&i| &self.prefixes[i])
    }

    /// Is compounding configured at all?
    pub fn has_compounding(&self) -> bool {
        self.compound_flag.is_some()
            || self.compound_begin.is_some()
            || !self.compound_rules.is_empty()
    }

    /// Resolve a flag-list string, honoring AF numeric aliases.
    pub fn parse_flags(&self, text: &str) -> FlagSet {
        if !self.af.is_empty() && !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
            // With AF in use, a numeric flag string is an alias reference;
            // a dangling one resolves to no flags at all.
            return match text.parse::<usize>() {
                Ok(n) if n >= 1 && n <= self.af.len() => self.af[n - 1].clone(),
                _ => FlagSet::new(),
            };
        }
        FlagSet::parse(self.flag_type, text)
    }
}
