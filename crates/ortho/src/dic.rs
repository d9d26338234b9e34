// The word-list store: one entry per line of the `.dic` file, indexed by
// stem. Several entries may share a stem (homonyms with different flags);
// they are kept in file order and tried independently by lookup.

use hashbrown::HashMap;
use ortho_core::casing::Captype;
use ortho_core::flags::{Flag, FlagSet};

/// One word entry from the `.dic` file.
#[derive(Debug, Clone)]
pub struct Word {
    /// The stem as stored (after alias expansion and IGNORE stripping).
    pub stem: String,
    pub flags: FlagSet,
    /// Morphology fields, `tag -> values` (a tag may repeat).
    pub data: HashMap<String, Vec<String>>,
    /// Alternate spellings harvested from `ph:` fields; consulted by the
    /// n-gram and phonetic suggesters.
    pub alt_spellings: Vec<String>,
    /// Capitalization of the stem, computed once at load.
    pub captype: Captype,
}

impl Word {
    pub fn has_flag(&self, flag: Option<Flag>) -> bool {
        self.flags.has(flag)
    }
}

/// All word entries plus stem indexes (exact and lowercased).
#[derive(Debug, Default)]
pub struct Dic {
    pub words: Vec<Word>,
    index: HashMap<String, Vec<usize>>,
    lowercase_index: HashMap<String, Vec<usize>>,
}

impl Dic {
    pub fn with_capacity(capacity: usize) -> Dic {
        Dic {
            words: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            lowercase_index: HashMap::new(),
        }
    }

    /// Append an entry. `lowercase_variants` are the precomputed lowercase
    /// renditions of the stem (several under German casing); they feed the
    /// case-insensitive index.
    pub fn insert(&mut self, word: Word, lowercase_variants: &[String]) {
        let idx = self.words.len();
        self.index.entry(word.stem.clone()).or_default().push(idx);
        for variant in lowercase_variants {
            self.lowercase_index.entry(variant.clone()).or_default().push(idx);
        }
        self.words.push(word);
    }

    /// All entries stored under `stem`, in file order.
    pub fn homonyms(&self, stem: &str) -> impl Iterator<Item = &Word> {
        self.index
            .get(stem)
            .into_iter()
            .flatten()
            .map(move |&i| &self.words[i])
    }

    /// All entries whose lowercased stem equals `stem` (itself expected
    /// lowercase). Finds "McDonald" from "mcdonald".
    pub fn homonyms_ignorecase(&self, stem: &str) -> impl Iterator<Item = &Word> {
        self.lowercase_index
            .get(stem)
            .into_iter()
            .flatten()
            .map(move |&i| &self.words[i])
    }

    /// Does any entry under `stem` carry `flag`?
    pub fn has_flag(&self, stem: &str, flag: Option<Flag>) -> bool {
        flag.map(|f| self.homonyms(stem).any(|w| w.flags.contains(f)))
            .unwrap_or(false)
    }

    /// Do *all* entries under `stem` carry `flag`? False when there are no
    /// entries at all.
    pub fn all_have_flag(&self, stem: &str, flag: Option<Flag>) -> bool {
        let Some(flag) = flag else { return false };
        let mut any = false;
        for word in self.homonyms(stem) {
            if !word.flags.contains(flag) {
                return false;
            }
            any = true;
        }
        any
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ortho_core::flags::FlagType;

    fn word(stem: &str, flags: &str) -> Word {
        Word {
            stem: stem.to_string(),
            flags: FlagSet::parse(FlagType::Short, flags),
            data: HashMap::new(),
            alt_spellings: Vec::new(),
            captype: Captype::No,
        }
    }

    fn flag(c: char) -> Option<Flag> {
        FlagType::Short.parse_one(&c.to_string())
    }

    fn sample() -> Dic {
        let mut dic = Dic::default();
        dic.insert(word("spell", "S"), &["spell".to_string()]);
        dic.insert(word("spell", "X"), &["spell".to_string()]);
        dic.insert(word("Paris", "S"), &["paris".to_string()]);
        dic
    }

    #[test]
    fn homonyms_in_insertion_order() {
        let dic = sample();
        let found: Vec<&Word> = dic.homonyms("spell").collect();
        assert_eq!(found.len(), 2);
        assert!(found[0].flags.contains(flag('S').unwrap()));
        assert!(found[1].flags.contains(flag('X').unwrap()));
    }

    #[test]
    fn homonyms_missing_stem() {
        let dic = sample();
        assert_eq!(dic.homonyms("nothing").count(), 0);
    }

    #[test]
    fn ignorecase_index() {
        let dic = sample();
        let found: Vec<&Word> = dic.homonyms_ignorecase("paris").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].stem, "Paris");
        // The exact index does not know the lowercase form.
        assert_eq!(dic.homonyms("paris").count(), 0);
    }

    #[test]
    fn has_flag_any_homonym() {
        let dic = sample();
        assert!(dic.has_flag("spell", flag('S')));
        assert!(dic.has_flag("spell", flag('X')));
        assert!(!dic.has_flag("spell", flag('Z')));
        assert!(!dic.has_flag("spell", None));
    }

    #[test]
    fn all_have_flag_requires_every_homonym() {
        let mut dic = sample();
        assert!(!dic.all_have_flag("spell", flag('S')));
        dic.insert(word("banned", "F"), &["banned".to_string()]);
        assert!(dic.all_have_flag("banned", flag('F')));
        assert!(!dic.all_have_flag("missing", flag('F')));
    }
}
