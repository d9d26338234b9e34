// Capitalization handling: classify how a word is cased, enumerate the
// dictionary forms it might correspond to, and coerce suggestions back to
// the shape of the user's input.
//
// Three behaviors exist: the standard one, a German one (sharp s: "SS" in
// an uppercased word may stand for "ß"), and a Turkic one (dotted/dotless
// i: lowercase of "I" is "ı", uppercase of "i" is "İ").

/// Classification of a word's capitalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Captype {
    /// No letter is uppercase: "kitten".
    No,
    /// Only the first letter is uppercase: "Kitten".
    Init,
    /// Every letter is uppercase: "KITTEN".
    All,
    /// First letter uppercase plus some other uppercase letter: "McDonald".
    HuhInit,
    /// Mixed case with a lowercase first letter: "openGL".
    Huh,
}

/// Case behavior of a dictionary's language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Casing {
    #[default]
    Standard,
    /// Selected by CHECKSHARPS: lowercasing an all-caps word also tries
    /// replacing "ss" with "ß".
    German,
    /// Selected for tr/az/crh language codes: i/İ and ı/I pair up.
    Turkic,
}

impl Casing {
    // -- Single characters --------------------------------------------------

    fn lower_char(&self, c: char) -> String {
        match self {
            Casing::Turkic if c == 'I' => "ı".to_string(),
            Casing::Turkic if c == 'İ' => "i".to_string(),
            _ => c.to_lowercase().collect(),
        }
    }

    fn upper_char(&self, c: char) -> String {
        match self {
            Casing::Turkic if c == 'i' => "İ".to_string(),
            Casing::Turkic if c == 'ı' => "I".to_string(),
            _ => c.to_uppercase().collect(),
        }
    }

    // -- Whole words --------------------------------------------------------

    /// Lowercase without producing variants (the first element of
    /// [`Casing::lower`]).
    pub fn lower_one(&self, word: &str) -> String {
        word.chars().map(|c| self.lower_char(c)).collect()
    }

    pub fn upper(&self, word: &str) -> String {
        word.chars().map(|c| self.upper_char(c)).collect()
    }

    /// All plausible lowercase renditions of `word`.
    ///
    /// For the standard and Turkic behaviors this is a single form. Under
    /// the German behavior an all-caps "SS" is ambiguous (it may stand for
    /// "ss" or "ß"), so every combination is produced.
    pub fn lower(&self, word: &str) -> Vec<String> {
        let base = self.lower_one(word);
        if *self == Casing::German && word.contains("SS") {
            let mut result = vec![base.clone()];
            sharp_s_variants(&base, 0, &mut result);
            result
        } else {
            vec![base]
        }
    }

    /// Uppercase the first letter, keeping the rest as-is.
    pub fn upper_first(&self, word: &str) -> String {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => self.upper_char(first) + chars.as_str(),
            None => String::new(),
        }
    }

    /// Lowercase the first letter, keeping the rest as-is.
    pub fn lower_first(&self, word: &str) -> String {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => self.lower_char(first) + chars.as_str(),
            None => String::new(),
        }
    }

    /// Title-case renditions: first letter up, the rest lowercased.
    pub fn capitalize(&self, word: &str) -> Vec<String> {
        self.lower(word).iter().map(|w| self.upper_first(w)).collect()
    }

    // -- Classification -----------------------------------------------------

    /// Classify the capitalization of `word`.
    pub fn guess(&self, word: &str) -> Captype {
        if *self == Casing::German && word.contains('ß') {
            // "AUSSTOß" should count as all-caps: ß has no uppercase form.
            let stripped: String = word.chars().filter(|&c| c != 'ß').collect();
            if Casing::Standard.guess(&stripped) == Captype::All {
                return Captype::All;
            }
        }

        let lowered = self.lower_one(word);
        if word == lowered {
            return Captype::No;
        }
        if self.lower_first(word) == lowered {
            return Captype::Init;
        }
        if word == self.upper(word) {
            return Captype::All;
        }
        let first_is_upper = word
            .chars()
            .next()
            .map(|c| c.is_uppercase())
            .unwrap_or(false);
        if first_is_upper {
            Captype::HuhInit
        } else {
            Captype::Huh
        }
    }

    // -- Variant enumeration ------------------------------------------------

    /// The dictionary forms a correctly spelled `word` may be stored under,
    /// in the order lookup must try them: the exact form first, then
    /// progressively lowercased forms, then (for all-caps input) the
    /// title-cased form.
    pub fn variants(&self, word: &str) -> (Captype, Vec<String>) {
        let captype = self.guess(word);
        let mut result = vec![word.to_string()];
        match captype {
            Captype::No | Captype::Huh => {}
            Captype::Init => result.extend(self.lower(word)),
            Captype::HuhInit => result.push(self.lower_first(word)),
            Captype::All => {
                result.extend(self.lower(word));
                result.extend(self.capitalize(word));
            }
        }
        dedup_in_order(&mut result);
        (captype, result)
    }

    /// The case shapes a *misspelled* `word` might have been meant in,
    /// which is a wider net than [`Casing::variants`]: suggestion
    /// generation runs once per correction variant.
    pub fn corrections(&self, word: &str) -> (Captype, Vec<String>) {
        let captype = self.guess(word);
        let mut result = vec![word.to_string()];
        match captype {
            Captype::No => {}
            Captype::Init => result.extend(self.lower(word)),
            Captype::Huh => result.extend(self.lower(word)),
            Captype::HuhInit => {
                result.push(self.lower_first(word));
                result.extend(self.lower(word));
                result.extend(self.capitalize(word));
            }
            Captype::All => {
                result.extend(self.lower(word));
                result.extend(self.capitalize(word));
            }
        }
        dedup_in_order(&mut result);
        (captype, result)
    }

    /// Re-shape a suggestion (stored in dictionary casing) to match the
    /// capitalization of the misspelled input.
    pub fn coerce(&self, word: &str, captype: Captype) -> String {
        match captype {
            Captype::Init | Captype::HuhInit => self.upper_first(word),
            Captype::All => self.upper(word),
            _ => word.to_string(),
        }
    }
}

/// Collect every rendition of `text` with one or more "ss" pairs replaced
/// by "ß", scanning left to right.
fn sharp_s_variants(text: &str, start: usize, out: &mut Vec<String>) {
    let Some(offset) = text[start..].find("ss") else {
        return;
    };
    let pos = start + offset;
    let replaced = format!("{}ß{}", &text[..pos], &text[pos + 2..]);
    out.push(replaced.clone());
    // More replacements to the right of this one, and the alternative of
    // leaving this pair alone. "ß" happens to be as wide as "ss", so both
    // scans resume at the same byte offset.
    sharp_s_variants(&replaced, pos + 'ß'.len_utf8(), out);
    sharp_s_variants(text, pos + 2, out);
}

fn dedup_in_order(items: &mut Vec<String>) {
    let mut seen = Vec::with_capacity(items.len());
    items.retain(|item| {
        if seen.contains(item) {
            false
        } else {
            seen.push(item.clone());
            true
        }
    });
}
