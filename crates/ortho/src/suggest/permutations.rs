// Edit-based candidate generators. Each function enumerates one class of
// plausible typo fixes as plain strings; validating candidates against the
// dictionary is the caller's business.
//
// Everything counts in characters, not bytes.

use crate::aff::patterns::RepPattern;

/// Longest distance considered for moved/swapped characters.
const MAX_CHAR_DISTANCE: usize = 4;

/// A REP-based change: either a plain replacement, or one that introduced
/// a space and therefore doubles as a two-word suggestion.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplChange {
    Single(String),
    Pair(String, String),
}

/// Apply every REP rule at every position it matches.
pub fn replchars(word: &str, table: &[RepPattern]) -> Vec<ReplChange> {
    let mut out = Vec::new();
    if word.chars().count() < 2 || table.is_empty() {
        return out;
    }
    for pattern in table {
        for replaced in pattern.replacements(word) {
            if let Some((first, second)) = replaced.split_once(' ') {
                let (first, second) = (first.to_string(), second.to_string());
                out.push(ReplChange::Single(replaced.clone()));
                out.push(ReplChange::Pair(first, second));
            } else {
                out.push(ReplChange::Single(replaced));
            }
        }
    }
    out
}

/// Swap characters within their MAP relation group ("naive" -> "naïve").
/// Later positions are varied recursively, so multi-spot words work too.
pub fn mapchars(word: &str, table: &[Vec<String>]) -> Vec<String> {
    let mut out = Vec::new();
    if word.chars().count() < 2 || table.is_empty() {
        return out;
    }
    mapchars_internal(word, 0, table, &mut out);
    out
}

fn mapchars_internal(word: &str, start: usize, table: &[Vec<String>], out: &mut Vec<String>) {
    if start >= word.len() {
        return;
    }
    for options in table {
        for option in options {
            let Some(offset) = word[start..].find(option.as_str()) else { continue };
            let pos = start + offset;
            for other in options {
                if other == option {
                    continue;
                }
                let replaced =
                    format!("{}{}{}", &word[..pos], other, &word[pos + option.len()..]);
                out.push(replaced.clone());
                let next = pos + other.chars().next().map_or(1, |c| c.len_utf8());
                mapchars_internal(&replaced, next, table, out);
            }
        }
    }
}

/// Swap each adjacent pair; for 4- and 5-letter words also try the
/// two-swap shapes ("ahev" -> "have", "owudl" -> "would").
pub fn swapchar(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    let mut out = Vec::new();
    if n < 2 {
        return out;
    }
    for i in 0..n - 1 {
        let mut swapped = chars.clone();
        swapped.swap(i, i + 1);
        out.push(swapped.into_iter().collect());
    }

    if n == 4 || n == 5 {
        let mut double: Vec<char> = Vec::with_capacity(n);
        double.push(chars[1]);
        double.push(chars[0]);
        if n == 5 {
            double.push(chars[2]);
        }
        double.push(chars[n - 1]);
        double.push(chars[n - 2]);
        out.push(double.into_iter().collect());
        if n == 5 {
            let second: Vec<char> = vec![chars[0], chars[2], chars[1], chars[4], chars[3]];
            out.push(second.into_iter().collect());
        }
    }
    out
}

/// Swap non-adjacent characters up to MAX_CHAR_DISTANCE apart.
pub fn longswapchar(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    let mut out = Vec::new();
    if n < 3 {
        return out;
    }
    for first in 0..n - 2 {
        for second in first + 2..(first + MAX_CHAR_DISTANCE).min(n) {
            let mut swapped = chars.clone();
            swapped.swap(first, second);
            out.push(swapped.into_iter().collect());
        }
    }
    out
}

/// Replace each character with its uppercase form and with its neighbors
/// on the KEY keyboard layout ("wueue" -> "queue").
pub fn badcharkey(word: &str, layout: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let keys: Vec<char> = layout.chars().collect();
    let mut out = Vec::new();

    for (i, &c) in chars.iter().enumerate() {
        let upper: Vec<char> = c.to_uppercase().collect();
        if upper != [c] {
            let mut replaced = chars.clone();
            replaced.splice(i..i + 1, upper);
            out.push(replaced.into_iter().collect());
        }
        if keys.is_empty() {
            continue;
        }
        for (pos, &key) in keys.iter().enumerate() {
            if key != c {
                continue;
            }
            if pos > 0 && keys[pos - 1] != '|' {
                let mut replaced = chars.clone();
                replaced[i] = keys[pos - 1];
                out.push(replaced.into_iter().collect());
            }
            if pos + 1 < keys.len() && keys[pos + 1] != '|' {
                let mut replaced = chars.clone();
                replaced[i] = keys[pos + 1];
                out.push(replaced.into_iter().collect());
            }
        }
    }
    out
}

/// Delete one character at each position.
pub fn extrachar(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut out = Vec::new();
    if chars.len() < 2 {
        return out;
    }
    for i in 0..chars.len() {
        let mut deleted = chars.clone();
        deleted.remove(i);
        out.push(deleted.into_iter().collect());
    }
    out
}

/// Insert each TRY character at each position (including the end).
pub fn forgotchar(word: &str, trystring: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut out = Vec::new();
    for c in trystring.chars() {
        for i in 0..=chars.len() {
            let mut inserted = chars.clone();
            inserted.insert(i, c);
            out.push(inserted.into_iter().collect());
        }
    }
    out
}

/// Move one character 2..MAX_CHAR_DISTANCE positions forward or backward
/// (one-position moves are already covered by the adjacent swap).
pub fn movechar(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    let mut out = Vec::new();
    if n < 2 {
        return out;
    }

    for frompos in 0..n {
        for topos in frompos + 3..(frompos + MAX_CHAR_DISTANCE + 1).min(n) {
            let mut moved = chars.clone();
            let c = moved.remove(frompos);
            moved.insert(topos - 1, c);
            out.push(moved.into_iter().collect());
        }
    }
    for frompos in (0..n).rev() {
        let lowest = frompos.saturating_sub(MAX_CHAR_DISTANCE - 1);
        for topos in (lowest..frompos.saturating_sub(1)).rev() {
            let mut moved = chars.clone();
            let c = moved.remove(frompos);
            moved.insert(topos, c);
            out.push(moved.into_iter().collect());
        }
    }
    out
}

/// Replace each character with each TRY character, scanning positions
/// right to left.
pub fn badchar(word: &str, trystring: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut out = Vec::new();
    for c in trystring.chars() {
        for i in (0..chars.len()).rev() {
            if chars[i] == c {
                continue;
            }
            let mut replaced = chars.clone();
            replaced[i] = c;
            out.push(replaced.into_iter().collect());
        }
    }
    out
}

/// Undo a doubled two-character sequence ("vacacation" -> "vacation").
pub fn doubletwochars(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    let mut out = Vec::new();
    if n < 5 {
        return out;
    }
    for i in 3..n {
        if chars[i - 2] == chars[i] && chars[i - 3] == chars[i - 1] {
            let mut collapsed: Vec<char> = chars[..i - 1].to_vec();
            collapsed.extend_from_slice(&chars[i + 1..]);
            out.push(collapsed.into_iter().collect());
        }
    }
    out
}

/// All ways to split into two non-empty words.
pub fn twowords(word: &str) -> Vec<(String, String)> {
    let chars: Vec<char> = word.chars().collect();
    let mut out = Vec::new();
    for i in 1..chars.len() {
        let first: String = chars[..i].iter().collect();
        let second: String = chars[i..].iter().collect();
        out.push((first, second));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replchars_single_and_pair() {
        let table = vec![RepPattern::parse("alot", "a_lot")];
        let changes = replchars("alot", &table);
        assert!(changes.contains(&ReplChange::Single("a lot".to_string())));
        assert!(changes.contains(&ReplChange::Pair("a".to_string(), "lot".to_string())));
    }

    #[test]
    fn replchars_short_word_is_empty() {
        let table = vec![RepPattern::parse("f", "ph")];
        assert!(replchars("f", &table).is_empty());
    }

    #[test]
    fn mapchars_single_group() {
        let table = vec![vec!["i".to_string(), "ï".to_string()]];
        let out = mapchars("naive", &table);
        assert!(out.contains(&"naïve".to_string()));
    }

    #[test]
    fn mapchars_multi_char_member() {
        let table = vec![vec!["ss".to_string(), "ß".to_string()]];
        let out = mapchars("strasse", &table);
        assert!(out.contains(&"straße".to_string()));
    }

    #[test]
    fn swapchar_adjacent() {
        let out = swapchar("kitten");
        assert!(out.contains(&"iktten".to_string()));
        assert!(out.contains(&"ktiten".to_string()));
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn swapchar_double_swap_four_letters() {
        // "ahev" -> "have" via the double swap.
        let out = swapchar("ahev");
        assert!(out.contains(&"have".to_string()));
    }

    #[test]
    fn swapchar_double_swap_five_letters() {
        // "owudl" -> "would".
        let out = swapchar("owudl");
        assert!(out.contains(&"would".to_string()));
    }

    #[test]
    fn longswapchar_distance_two() {
        let out = longswapchar("rats");
        // r<->t and a<->s.
        assert!(out.contains(&"tars".to_string()));
        assert!(out.contains(&"rsta".to_string()));
    }

    #[test]
    fn badcharkey_keyboard_neighbors() {
        let out = badcharkey("wueue", "qwertyuiop|asdfghjkl|zxcvbnm");
        assert!(out.contains(&"queue".to_string()));
        // Group separators are never suggested.
        assert!(!out.iter().any(|s| s.contains('|')));
    }

    #[test]
    fn badcharkey_uppercases() {
        let out = badcharkey("html", "");
        assert!(out.contains(&"Html".to_string()));
    }

    #[test]
    fn extrachar_deletes_each_position() {
        let out = extrachar("clat");
        assert_eq!(out, vec!["lat", "cat", "clt", "cla"]);
    }

    #[test]
    fn forgotchar_inserts_everywhere() {
        let out = forgotchar("ct", "a");
        assert_eq!(out, vec!["act", "cat", "cta"]);
    }

    #[test]
    fn forgotchar_empty_try_is_empty() {
        assert!(forgotchar("word", "").is_empty());
    }

    #[test]
    fn movechar_forward_and_back() {
        let out = movechar("rnai");
        // 'r' moved two positions: "nari"; 'i' moved back: "rina" etc.
        assert!(out.contains(&"nari".to_string()));
        assert!(out.contains(&"irna".to_string()));
    }

    #[test]
    fn badchar_replaces_with_try_chars() {
        let out = badchar("spylls", "ei");
        assert!(out.contains(&"spells".to_string()));
        assert!(out.contains(&"spills".to_string()));
        // 'e' candidates come before 'i' candidates (TRY order).
        let e_pos = out.iter().position(|s| s == "spells").unwrap();
        let i_pos = out.iter().position(|s| s == "spills").unwrap();
        assert!(e_pos < i_pos);
    }

    #[test]
    fn doubletwochars_collapses() {
        let out = doubletwochars("vacacation");
        assert!(out.contains(&"vacation".to_string()));
        assert!(doubletwochars("chickcken").contains(&"chicken".to_string()));
        assert!(doubletwochars("cat").is_empty());
    }

    #[test]
    fn twowords_all_splits() {
        let out = twowords("abc");
        assert_eq!(
            out,
            vec![
                ("a".to_string(), "bc".to_string()),
                ("ab".to_string(), "c".to_string())
            ]
        );
    }
}
