// Affix entries (PFX/SFX) and their condition patterns.
//
// A condition is the character-class pattern from the fourth column of an
// affix line (`[^aeiou]y`, `.`, `able]`...). It is compiled once at load
// time into a flat list of class matchers; lookup never runs a regex.

use ortho_core::flags::{Flag, FlagSet};

/// One element of a compiled condition pattern.
#[derive(Debug, Clone, PartialEq)]
enum CondElem {
    /// `.` -- any character.
    Any,
    /// A literal character.
    Char(char),
    /// `[...]` or `[^...]` -- a character class.
    Class { chars: Vec<char>, negated: bool },
}

/// A compiled condition pattern, matched against a stem boundary.
#[derive(Debug, Clone, Default)]
pub struct Condition {
    elems: Vec<CondElem>,
    text: String,
}

impl Condition {
    /// Compile a condition string. The pattern grammar is tiny: literal
    /// characters, `.`, and (possibly negated) character classes. An
    /// unterminated class swallows the rest of the pattern.
    pub fn parse(text: &str) -> Condition {
        let mut elems = Vec::new();
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '.' => elems.push(CondElem::Any),
                '[' => {
                    let negated = chars.peek() == Some(&'^');
                    if negated {
                        chars.next();
                    }
                    let mut class = Vec::new();
                    for cc in chars.by_ref() {
                        if cc == ']' {
                            break;
                        }
                        class.push(cc);
                    }
                    elems.push(CondElem::Class { chars: class, negated });
                }
                _ => elems.push(CondElem::Char(c)),
            }
        }
        Condition { elems, text: text.to_string() }
    }

    /// The pattern as written in the affix file.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of characters the pattern constrains.
    pub fn len(&self) -> usize {
        self.elems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    /// `.`-only conditions hold for every stem.
    pub fn is_trivial(&self) -> bool {
        self.elems.iter().all(|e| matches!(e, CondElem::Any))
    }

    fn elem_matches(elem: &CondElem, c: char) -> bool {
        match elem {
            CondElem::Any => true,
            CondElem::Char(expected) => *expected == c,
            CondElem::Class { chars, negated } => chars.contains(&c) != *negated,
        }
    }

    /// Match the pattern against the end of `word` (suffix conditions).
    pub fn matches_end(&self, word: &[char]) -> bool {
        if self.elems.len() > word.len() {
            return false;
        }
        let tail = &word[word.len() - self.elems.len()..];
        self.elems.iter().zip(tail.iter()).all(|(e, &c)| Condition::elem_matches(e, c))
    }

    /// Match the pattern against the start of `word` (prefix conditions).
    pub fn matches_start(&self, word: &[char]) -> bool {
        if self.elems.len() > word.len() {
            return false;
        }
        self.elems.iter().zip(word.iter()).all(|(e, &c)| Condition::elem_matches(e, c))
    }
}

/// A prefix rule: strip `strip` from the front of a stem, attach `add`.
#[derive(Debug, Clone)]
pub struct Prefix {
    /// The affix class this entry belongs to.
    pub flag: Flag,
    /// May combine with a cross-product suffix.
    pub cross_product: bool,
    pub strip: String,
    pub add: String,
    /// Condition on the stem's start.
    pub condition: Condition,
    /// Continuation flags carried by the affix itself.
    pub flags: FlagSet,
}

/// A suffix rule: strip `strip` from the end of a stem, attach `add`.
#[derive(Debug, Clone)]
pub struct Suffix {
    pub flag: Flag,
    pub cross_product: bool,
    pub strip: String,
    pub add: String,
    /// Condition on the stem's end.
    pub condition: Condition,
    pub flags: FlagSet,
}

impl Prefix {
    /// True if this prefix can derive a surface form from `stem`:
    /// the stem starts with `strip` and satisfies the condition.
    pub fn applies_to(&self, stem: &str) -> bool {
        if !stem.starts_with(&self.strip) {
            return false;
        }
        let chars: Vec<char> = stem.chars().collect();
        self.condition.matches_start(&chars)
    }

    /// The surface form this prefix derives from `stem`, assuming
    /// [`Prefix::applies_to`] held.
    pub fn apply(&self, stem: &str) -> String {
        format!("{}{}", self.add, &stem[self.strip.len()..])
    }
}

impl Suffix {
    pub fn applies_to(&self, stem: &str) -> bool {
        if !stem.ends_with(&self.strip) {
            return false;
        }
        let chars: Vec<char> = stem.chars().collect();
        self.condition.matches_end(&chars)
    }

    pub fn apply(&self, stem: &str) -> String {
        format!("{}{}", &stem[..stem.len() - self.strip.len()], self.add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ortho_core::flags::FlagType;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn trivial_condition_matches_anything() {
        let cond = Condition::parse(".");
        assert!(cond.is_trivial());
        assert!(cond.matches_end(&chars("anything")));
        assert!(cond.matches_start(&chars("x")));
    }

    #[test]
    fn literal_condition() {
        let cond = Condition::parse("ey");
        assert!(cond.matches_end(&chars("money")));
        assert!(!cond.matches_end(&chars("my")));
    }

    #[test]
    fn class_condition() {
        // The condition of the classic English plural suffix.
        let cond = Condition::parse("[^aeiou]y");
        assert!(cond.matches_end(&chars("happy")));
        assert!(!cond.matches_end(&chars("play"))); // 'a' before 'y'
    }

    #[test]
    fn condition_longer_than_word_fails() {
        let cond = Condition::parse("abc");
        assert!(!cond.matches_end(&chars("bc")));
        assert!(!cond.matches_start(&chars("ab")));
    }

    #[test]
    fn start_condition() {
        let cond = Condition::parse("[aeiou]");
        assert!(cond.matches_start(&chars("apple")));
        assert!(!cond.matches_start(&chars("pear")));
    }

    #[test]
    fn unterminated_class_is_tolerated() {
        let cond = Condition::parse("[ab");
        assert_eq!(cond.len(), 1);
        assert!(cond.matches_start(&chars("a")));
        assert!(!cond.matches_start(&chars("c")));
    }

    fn suffix(strip: &str, add: &str, condition: &str) -> Suffix {
        Suffix {
            flag: FlagType::Short.parse_one("S").unwrap(),
            cross_product: true,
            strip: strip.to_string(),
            add: add.to_string(),
            condition: Condition::parse(condition),
            flags: FlagSet::new(),
        }
    }

    #[test]
    fn suffix_applies_and_derives() {
        // SFX: y -> ies after a consonant.
        let sfx = suffix("y", "ies", "[^aeiou]y");
        assert!(sfx.applies_to("pony"));
        assert_eq!(sfx.apply("pony"), "ponies");
        assert!(!sfx.applies_to("play"));
        assert!(!sfx.applies_to("pon")); // no trailing y to strip
    }

    #[test]
    fn suffix_with_empty_strip() {
        let sfx = suffix("", "s", "[^sxzhy]");
        assert!(sfx.applies_to("cat"));
        assert_eq!(sfx.apply("cat"), "cats");
    }

    #[test]
    fn prefix_applies_and_derives() {
        let pfx = Prefix {
            flag: FlagType::Short.parse_one("A").unwrap(),
            cross_product: true,
            strip: String::new(),
            add: "re".to_string(),
            condition: Condition::parse("."),
            flags: FlagSet::new(),
        };
        assert!(pfx.applies_to("make"));
        assert_eq!(pfx.apply("make"), "remake");
    }
}
