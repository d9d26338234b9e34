// PHONE table: ordered phonetic replacement rules and the metaphone
// encoder they drive. Rules are bucketed by their first character; the
// encoder walks the uppercased word and applies the first matching rule
// at each position.
//
// Rule pattern grammar: letters, an optional `(..)` one-of set, trailing
// `-` marks turning the pattern tail into lookahead, `^`/`$` anchors, `<`
// for "only when not after a vowel", and an optional priority digit.

use hashbrown::HashMap;

#[derive(Debug, Clone, PartialEq)]
enum Matcher {
    Char(char),
    OneOf(Vec<char>),
}

impl Matcher {
    fn matches(&self, c: char) -> bool {
        match self {
            Matcher::Char(expected) => *expected == c,
            Matcher::OneOf(set) => set.contains(&c),
        }
    }
}

/// One compiled PHONE rule.
#[derive(Debug, Clone)]
pub struct PhonetRule {
    pattern: Vec<Matcher>,
    /// How many trailing pattern elements are lookahead-only.
    lookahead: usize,
    start: bool,
    end: bool,
    not_after_vowel: bool,
    priority: u8,
    replacement: String,
}

impl PhonetRule {
    /// Parse a `pattern replacement` row. Returns `None` for a pattern
    /// with no matchable content.
    pub fn parse(pattern: &str, replacement: &str) -> Option<PhonetRule> {
        let mut matchers = Vec::new();
        let mut lookahead = 0;
        let mut start = false;
        let mut end = false;
        let mut not_after_vowel = false;
        let mut priority = 5;

        let mut chars = pattern.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '(' => {
                    let mut set = Vec::new();
                    for cc in chars.by_ref() {
                        if cc == ')' {
                            break;
                        }
                        set.push(cc);
                    }
                    matchers.push(Matcher::OneOf(set));
                }
                '-' => lookahead += 1,
                '^' => start = true,
                '$' => end = true,
                '<' => not_after_vowel = true,
                '0'..='9' => priority = c as u8 - b'0',
                _ => matchers.push(Matcher::Char(c)),
            }
        }
        if matchers.is_empty() {
            return None;
        }
        let replacement = if replacement == "_" { String::new() } else { replacement.to_string() };
        Some(PhonetRule {
            lookahead: lookahead.min(matchers.len() - 1),
            pattern: matchers,
            start,
            end,
            not_after_vowel,
            priority,
            replacement,
        })
    }

    pub fn priority(&self) -> u8 {
        self.priority
    }

    /// Match at `pos`; on success return the number of characters the
    /// rule consumes (pattern length minus lookahead, at least one).
    fn match_at(&self, word: &[char], pos: usize) -> Option<usize> {
        if self.start && pos != 0 {
            return None;
        }
        if self.not_after_vowel && pos > 0 && is_vowel(word[pos - 1]) {
            return None;
        }
        if pos + self.pattern.len() > word.len() {
            return None;
        }
        for (i, matcher) in self.pattern.iter().enumerate() {
            if !matcher.matches(word[pos + i]) {
                return None;
            }
        }
        if self.end && pos + self.pattern.len() != word.len() {
            return None;
        }
        Some((self.pattern.len() - self.lookahead).max(1))
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'A' | 'E' | 'I' | 'O' | 'U')
}

/// The full PHONE table, bucketed by first pattern character.
#[derive(Debug, Clone, Default)]
pub struct PhonetTable {
    rules: HashMap<char, Vec<PhonetRule>>,
}

impl PhonetTable {
    pub fn new(rows: &[(String, String)]) -> PhonetTable {
        let mut rules: HashMap<char, Vec<PhonetRule>> = HashMap::new();
        for (pattern, replacement) in rows {
            let Some(first) = pattern.chars().next() else { continue };
            if let Some(rule) = PhonetRule::parse(pattern, replacement) {
                rules.entry(first).or_default().push(rule);
            }
        }
        PhonetTable { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Encode `word` phonetically: uppercase it, then at each position
    /// apply the first matching rule for the current character, or copy
    /// nothing and move on.
    pub fn metaphone(&self, word: &str) -> String {
        let chars: Vec<char> = word.to_uppercase().chars().collect();
        let mut result = String::new();
        let mut pos = 0;
        while pos < chars.len() {
            let mut matched = false;
            if let Some(bucket) = self.rules.get(&chars[pos]) {
                for rule in bucket {
                    if let Some(consumed) = rule.match_at(&chars, pos) {
                        result.push_str(&rule.replacement);
                        pos += consumed;
                        matched = true;
                        break;
                    }
                }
            }
            if !matched {
                pos += 1;
            }
        }
        result
    }
}
