// Small compiled pattern types from the affix file: IGNORE character
// stripping, BREAK split points, REP replacement pairs, ICONV/OCONV
// rewrite tables and CHECKCOMPOUNDPATTERN boundary patterns.

use ortho_core::flags::{Flag, FlagSet, FlagType};

// ---------------------------------------------------------------------------
// Ignore
// ---------------------------------------------------------------------------

/// Characters removed from input words before lookup (IGNORE directive;
/// vowel marks in Arabic/Hebrew dictionaries).
#[derive(Debug, Clone, Default)]
pub struct Ignore {
    chars: Vec<char>,
}

impl Ignore {
    pub fn new(chars: &str) -> Ignore {
        Ignore { chars: chars.chars().collect() }
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn strip(&self, word: &str) -> String {
        word.chars().filter(|c| !self.chars.contains(c)).collect()
    }
}

// ---------------------------------------------------------------------------
// BreakPattern
// ---------------------------------------------------------------------------

/// One BREAK directive entry: a separator string, optionally anchored to
/// the start (`^-`) or end (`-$`) of the word. Unanchored separators only
/// split when there is at least one character on both sides.
#[derive(Debug, Clone)]
pub struct BreakPattern {
    text: String,
    at_start: bool,
    at_end: bool,
}

impl BreakPattern {
    pub fn parse(pattern: &str) -> BreakPattern {
        let mut text = pattern;
        let at_start = text.starts_with('^');
        if at_start {
            text = &text[1..];
        }
        let at_end = text.ends_with('$');
        if at_end {
            text = &text[..text.len() - 1];
        }
        BreakPattern { text: text.to_string(), at_start, at_end }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte ranges of separator occurrences in `word`, honoring anchors.
    pub fn find_splits(&self, word: &str) -> Vec<(usize, usize)> {
        if self.text.is_empty() || self.text.len() > word.len() {
            return Vec::new();
        }
        let tlen = self.text.len();
        if self.at_start {
            return if word.starts_with(&self.text) { vec![(0, tlen)] } else { Vec::new() };
        }
        if self.at_end {
            return if word.ends_with(&self.text) {
                vec![(word.len() - tlen, word.len())]
            } else {
                Vec::new()
            };
        }
        word.match_indices(&self.text)
            .map(|(pos, _)| (pos, pos + tlen))
            .filter(|&(pos, end)| pos > 0 && end < word.len())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// RepPattern
// ---------------------------------------------------------------------------

/// One REP table row: a frequent misspelling and its replacement.
/// `_` stands for a space on either side; `^`/`$` anchor the match.
#[derive(Debug, Clone)]
pub struct RepPattern {
    from: String,
    to: String,
    at_start: bool,
    at_end: bool,
}

impl RepPattern {
    pub fn parse(pattern: &str, replacement: &str) -> RepPattern {
        let mut from = pattern;
        let at_start = from.starts_with('^');
        if at_start {
            from = &from[1..];
        }
        let at_end = from.ends_with('$');
        if at_end {
            from = &from[..from.len() - 1];
        }
        RepPattern {
            from: from.replace('_', " "),
            to: replacement.replace('_', " "),
            at_start,
            at_end,
        }
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    /// Every rendition of `word` with one occurrence replaced.
    pub fn replacements(&self, word: &str) -> Vec<String> {
        if self.from.is_empty() {
            return Vec::new();
        }
        word.match_indices(&self.from)
            .filter(|&(pos, _)| !self.at_start || pos == 0)
            .filter(|&(pos, m)| !self.at_end || pos + m.len() == word.len())
            .map(|(pos, m)| format!("{}{}{}", &word[..pos], self.to, &word[pos + m.len()..]))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// CompoundPattern
// ---------------------------------------------------------------------------

/// One CHECKCOMPOUNDPATTERN row: a forbidden boundary shape between two
/// compound segments. `0` as a stem side means "must carry an affix";
/// `/flag` constrains the segment's flags.
#[derive(Debug, Clone)]
pub struct CompoundPattern {
    left_stem: String,
    right_stem: String,
    left_flag: Option<Flag>,
    right_flag: Option<Flag>,
    left_no_affix: bool,
    right_no_affix: bool,
    /// Third column; parsed but not consulted (simplified-replacement
    /// compounds fall outside the supported corpus).
    pub replacement: Option<String>,
}

impl CompoundPattern {
    pub fn parse(
        left: &str,
        right: &str,
        replacement: Option<&str>,
        flag_type: FlagType,
    ) -> CompoundPattern {
        let (left_stem, left_flag) = split_stem_flag(left, flag_type);
        let (right_stem, right_flag) = split_stem_flag(right, flag_type);
        let left_no_affix = left_stem == "0";
        let right_no_affix = right_stem == "0";
        CompoundPattern {
            left_stem: if left_no_affix { String::new() } else { left_stem },
            right_stem: if right_no_affix { String::new() } else { right_stem },
            left_flag,
            right_flag,
            left_no_affix,
            right_no_affix,
            replacement: replacement.map(str::to_string),
        }
    }

    /// Does the boundary between the two segments match this pattern?
    #[allow(clippy::too_many_arguments)]
    pub fn matches(
        &self,
        left_stem: &str,
        left_flags: &FlagSet,
        left_is_base: bool,
        right_stem: &str,
        right_flags: &FlagSet,
        right_is_base: bool,
    ) -> bool {
        left_stem.ends_with(&self.left_stem)
            && right_stem.starts_with(&self.right_stem)
            && (!self.left_no_affix || !left_is_base)
            && (!self.right_no_affix || !right_is_base)
            && (self.left_flag.is_none() || left_flags.has(self.left_flag))
            && (self.right_flag.is_none() || right_flags.has(self.right_flag))
    }
}

fn split_stem_flag(text: &str, flag_type: FlagType) -> (String, Option<Flag>) {
    match text.split_once('/') {
        Some((stem, flag)) => (stem.to_string(), flag_type.parse_one(flag)),
        None => (text.to_string(), None),
    }
}

// ---------------------------------------------------------------------------
// ConvTable
// ---------------------------------------------------------------------------

/// An ICONV/OCONV rewrite table: ordered `from -> to` rows applied
/// longest-match-first at each position of the input.
#[derive(Debug, Clone, Default)]
pub struct ConvTable {
    rows: Vec<ConvRow>,
}

#[derive(Debug, Clone)]
struct ConvRow {
    from: Vec<char>,
    to: String,
    at_start: bool,
    at_end: bool,
}

impl ConvTable {
    pub fn new(pairs: &[(String, String)]) -> ConvTable {
        let mut rows: Vec<ConvRow> = pairs
            .iter()
            .filter_map(|(from, to)| {
                let at_start = from.starts_with('_');
                let at_end = from.len() > 1 && from.ends_with('_');
                let from: Vec<char> = from.trim_matches('_').chars().collect();
                if from.is_empty() {
                    return None;
                }
                let to = if to == "0" { String::new() } else { to.replace('_', " ") };
                Some(ConvRow { from, to, at_start, at_end })
            })
            .collect();
        // Longest first, so the scan below can take the first hit.
        rows.sort_by_key(|row| std::cmp::Reverse(row.from.len()));
        ConvTable { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rewrite `word`, scanning left to right and applying the longest
    /// matching row at each position.
    pub fn apply(&self, word: &str) -> String {
        let chars: Vec<char> = word.chars().collect();
        let mut result = String::with_capacity(word.len());
        let mut pos = 0;
        while pos < chars.len() {
            let hit = self.rows.iter().find(|row| {
                pos + row.from.len() <= chars.len()
                    && chars[pos..pos + row.from.len()] == row.from[..]
                    && (!row.at_start || pos == 0)
                    && (!row.at_end || pos + row.from.len() == chars.len())
            });
            match hit {
                Some(row) => {
                    result.push_str(&row.to);
                    pos += row.from.len();
                }
                None => {
                    result.push(chars[pos]);
                    pos += 1;
                }
            }
        }
        result
    }
}
