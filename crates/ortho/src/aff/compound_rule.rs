// COMPOUNDRULE patterns: regular expressions over flags, where each
// compound segment contributes the set of flags on its word entry, and the
// whole segment sequence must be generated by some rule.
//
// A rule like `n*1t` (or `(aa)*(bb)(cc)` with long flags) compiles to a
// list of (flag, quantifier) elements; matching is a tiny backtracking
// walk, which is plenty because both rules and compounds are short.

use ortho_core::flags::{Flag, FlagSet, FlagType};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Quant {
    One,
    ZeroOrOne,
    ZeroOrMore,
}

/// One compiled COMPOUNDRULE directive.
#[derive(Debug, Clone)]
pub struct CompoundRule {
    elems: Vec<(Flag, Quant)>,
    text: String,
}

impl CompoundRule {
    /// Compile a rule. Flags are single characters, or parenthesized
    /// groups for the long/numeric syntaxes; `*` and `?` quantify the
    /// preceding flag. Unparseable units are dropped.
    pub fn parse(text: &str, flag_type: FlagType) -> CompoundRule {
        let chars: Vec<char> = text.chars().collect();
        let mut elems = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            let flag = if chars[i] == '(' {
                let mut unit = String::new();
                i += 1;
                while i < chars.len() && chars[i] != ')' {
                    unit.push(chars[i]);
                    i += 1;
                }
                i += 1; // past ')'
                flag_type.parse_one(&unit)
            } else {
                let unit = chars[i].to_string();
                i += 1;
                flag_type.parse_one(&unit)
            };
            let quant = match chars.get(i) {
                Some('*') => {
                    i += 1;
                    Quant::ZeroOrMore
                }
                Some('?') => {
                    i += 1;
                    Quant::ZeroOrOne
                }
                _ => Quant::One,
            };
            if let Some(flag) = flag {
                elems.push((flag, quant));
            }
        }
        CompoundRule { elems, text: text.to_string() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Does the whole segment sequence match this rule?
    pub fn full_match(&self, flag_sets: &[&FlagSet]) -> bool {
        self.matches(flag_sets, false)
    }

    /// Could the segment sequence be extended into a full match? Used to
    /// prune the compound search while segments are still being added.
    pub fn partial_match(&self, flag_sets: &[&FlagSet]) -> bool {
        self.matches(flag_sets, true)
    }

    fn matches(&self, flag_sets: &[&FlagSet], partial: bool) -> bool {
        fn walk(
            elems: &[(Flag, Quant)],
            sets: &[&FlagSet],
            ei: usize,
            si: usize,
            partial: bool,
        ) -> bool {
            if si == sets.len() {
                // All segments consumed: a partial match is content; a full
                // match needs the remaining elements to be skippable.
                return partial
                    || elems[ei..].iter().all(|(_, q)| *q != Quant::One);
            }
            if ei == elems.len() {
                return false;
            }
            let (flag, quant) = elems[ei];
            let here = sets[si].contains(flag);
            match quant {
                Quant::One => here && walk(elems, sets, ei + 1, si + 1, partial),
                Quant::ZeroOrOne => {
                    (here && walk(elems, sets, ei + 1, si + 1, partial))
                        || walk(elems, sets, ei + 1, si, partial)
                }
                Quant::ZeroOrMore => {
                    (here && walk(elems, sets, ei, si + 1, partial))
                        || walk(elems, sets, ei + 1, si, partial)
                }
            }
        }
        walk(&self.elems, flag_sets, 0, 0, partial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(flags: &str) -> FlagSet {
        FlagSet::parse(FlagType::Short, flags)
    }

    fn rule(text: &str) -> CompoundRule {
        CompoundRule::parse(text, FlagType::Short)
    }

    #[test]
    fn plain_sequence() {
        let r = rule("ab");
        let (a, b) = (set("a"), set("b"));
        assert!(r.full_match(&[&a, &b]));
        assert!(!r.full_match(&[&b, &a]));
        assert!(!r.full_match(&[&a]));
    }

    #[test]
    fn star_repeats() {
        // The classic ordinal-number rule shape: n*1t matches "n n 1 t".
        let r = rule("n*1t");
        let (n, one, t) = (set("n"), set("1"), set("t"));
        assert!(r.full_match(&[&one, &t]));
        assert!(r.full_match(&[&n, &one, &t]));
        assert!(r.full_match(&[&n, &n, &n, &one, &t]));
        assert!(!r.full_match(&[&one, &one, &t]));
    }

    #[test]
    fn question_is_optional() {
        let r = rule("a?b");
        let (a, b) = (set("a"), set("b"));
        assert!(r.full_match(&[&b]));
        assert!(r.full_match(&[&a, &b]));
        assert!(!r.full_match(&[&a, &a, &b]));
    }

    #[test]
    fn segment_with_many_flags() {
        // A segment matches an element when it carries the flag, whatever
        // else it carries.
        let r = rule("ab");
        let (ax, by) = (set("ax"), set("by"));
        assert!(r.full_match(&[&ax, &by]));
    }

    #[test]
    fn partial_match_prefix() {
        let r = rule("abc");
        let (a, b, c) = (set("a"), set("b"), set("c"));
        assert!(r.partial_match(&[&a]));
        assert!(r.partial_match(&[&a, &b]));
        assert!(!r.partial_match(&[&b]));
        assert!(r.full_match(&[&a, &b, &c]));
        assert!(!r.full_match(&[&a, &b]));
    }

    #[test]
    fn long_flags_in_parens() {
        let r = CompoundRule::parse("(aa)*(bb)", FlagType::Long);
        let aa = FlagSet::parse(FlagType::Long, "aa");
        let bb = FlagSet::parse(FlagType::Long, "bb");
        assert!(r.full_match(&[&bb]));
        assert!(r.full_match(&[&aa, &aa, &bb]));
        assert!(!r.full_match(&[&aa]));
    }

    #[test]
    fn numeric_flags_in_parens() {
        let r = CompoundRule::parse("(1001)(1002)?", FlagType::Numeric);
        let a = FlagSet::parse(FlagType::Numeric, "1001");
        let b = FlagSet::parse(FlagType::Numeric, "1002");
        assert!(r.full_match(&[&a]));
        assert!(r.full_match(&[&a, &b]));
        assert!(!r.full_match(&[&b]));
    }
}
