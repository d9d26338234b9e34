// Flags: opaque tokens attached to stems and affixes to select behavior.
//
// A flag's textual form depends on the flag syntax declared by the affix
// file: one character (default), two characters ("long"), a decimal number
// ("num"), or one UTF-8 character. Internally every flag is a single `u32`
// so membership tests never touch string data.

use smallvec::SmallVec;

/// Flag syntax declared by the `FLAG` directive of an affix file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagType {
    /// One ASCII character per flag (the default).
    #[default]
    Short,
    /// Two ASCII characters per flag (`FLAG long`).
    Long,
    /// Decimal numbers separated by commas (`FLAG num`).
    Numeric,
    /// One Unicode character per flag (`FLAG UTF-8`).
    Utf8,
}

impl FlagType {
    /// Parse a `FLAG` directive value. Unknown values fall back to `Short`,
    /// which is what a missing directive means as well.
    pub fn from_directive(value: &str) -> FlagType {
        match value {
            "long" => FlagType::Long,
            "num" => FlagType::Numeric,
            "UTF-8" => FlagType::Utf8,
            _ => FlagType::Short,
        }
    }

    /// Parse a flag-list string into individual flags.
    ///
    /// Malformed pieces (an odd trailing character in `long` mode, a
    /// non-numeric chunk in `num` mode) are dropped rather than reported:
    /// a flag nobody can ever define is simply inert.
    pub fn parse(&self, text: &str) -> Vec<Flag> {
        match self {
            FlagType::Short | FlagType::Utf8 => {
                text.chars().filter(|c| !c.is_whitespace()).map(Flag::from_char).collect()
            }
            FlagType::Long => {
                let chars: Vec<char> = text.chars().collect();
                chars.chunks_exact(2).map(|pair| Flag::from_pair(pair[0], pair[1])).collect()
            }
            FlagType::Numeric => text
                .split(',')
                .filter_map(|chunk| chunk.trim().parse::<u32>().ok().map(Flag))
                .collect(),
        }
    }

    /// Parse a directive value that holds exactly one flag (`KEEPCASE`,
    /// `COMPOUNDFLAG`, ...). Returns `None` for an empty value.
    pub fn parse_one(&self, text: &str) -> Option<Flag> {
        self.parse(text).into_iter().next()
    }
}

/// An opaque token identifying an affix class or a word property.
///
/// The numeric value is the character's code point for one-character
/// syntaxes, the packed character pair for `long`, or the number itself
/// for `num`. Two flags are equal iff they came from the same textual form
/// under the same syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Flag(pub u32);

impl Flag {
    fn from_char(c: char) -> Flag {
        Flag(c as u32)
    }

    fn from_pair(a: char, b: char) -> Flag {
        // Long flags are ASCII pairs; pack them into one word.
        Flag(((a as u32) << 8) | (b as u32 & 0xFF))
    }
}

/// An unordered set of flags with fast membership test.
///
/// Backed by a sorted small vector: real flag sets are tiny (a handful of
/// flags per word entry), so a sorted array beats hashing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet(SmallVec<[Flag; 8]>);

impl FlagSet {
    pub fn new() -> FlagSet {
        FlagSet(SmallVec::new())
    }

    /// Build a set from arbitrary flags; duplicates collapse.
    pub fn from_flags(mut flags: Vec<Flag>) -> FlagSet {
        flags.sort_unstable();
        flags.dedup();
        FlagSet(SmallVec::from_vec(flags))
    }

    /// Parse a flag-list string under the given syntax.
    pub fn parse(flag_type: FlagType, text: &str) -> FlagSet {
        FlagSet::from_flags(flag_type.parse(text))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, flag: Flag) -> bool {
        self.0.binary_search(&flag).is_ok()
    }

    /// Membership test against an optional flag; `None` never matches.
    pub fn has(&self, flag: Option<Flag>) -> bool {
        flag.map(|f| self.contains(f)).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        self.0.iter().copied()
    }

    /// Set union, used to combine stem flags with affix continuation flags.
    pub fn union(&self, other: &FlagSet) -> FlagSet {
        let mut flags: Vec<Flag> = self.0.iter().chain(other.0.iter()).copied().collect();
        flags.sort_unstable();
        flags.dedup();
        FlagSet(SmallVec::from_vec(flags))
    }

    /// True if the two sets share at least one flag.
    pub fn intersects(&self, other: &FlagSet) -> bool {
        // Both sides are sorted; merge-walk them.
        let (mut i, mut j) = (0, 0);
        while i < self.0.len() && j < other.0.len() {
            match self.0[i].cmp(&other.0[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => return true,
            }
        }
        false
    }

    pub fn insert(&mut self, flag: Flag) {
        if let Err(pos) = self.0.binary_search(&flag) {
            self.0.insert(pos, flag);
        }
    }
}

impl FromIterator<Flag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> FlagSet {
        FlagSet::from_flags(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_flags_parse_per_char() {
        let flags = FlagType::Short.parse("ABC");
        assert_eq!(flags.len(), 3);
        assert_eq!(flags[0], Flag('A' as u32));
    }

    #[test]
    fn long_flags_parse_per_pair() {
        let flags = FlagType::Long.parse("aabb");
        assert_eq!(flags.len(), 2);
        assert_ne!(flags[0], flags[1]);
        // A dangling odd character is dropped.
        assert_eq!(FlagType::Long.parse("aabbc").len(), 2);
    }

    #[test]
    fn numeric_flags_parse_comma_separated() {
        let flags = FlagType::Numeric.parse("1001,1002");
        assert_eq!(flags, vec![Flag(1001), Flag(1002)]);
        // Garbage chunks are inert, not fatal.
        assert_eq!(FlagType::Numeric.parse("12,x,34").len(), 2);
    }

    #[test]
    fn utf8_flags_parse_per_char() {
        let flags = FlagType::Utf8.parse("äß");
        assert_eq!(flags.len(), 2);
        assert_eq!(flags[0], Flag('ä' as u32));
    }

    #[test]
    fn flag_type_from_directive() {
        assert_eq!(FlagType::from_directive("long"), FlagType::Long);
        assert_eq!(FlagType::from_directive("num"), FlagType::Numeric);
        assert_eq!(FlagType::from_directive("UTF-8"), FlagType::Utf8);
        assert_eq!(FlagType::from_directive("whatever"), FlagType::Short);
    }

    #[test]
    fn parse_one_takes_first() {
        assert_eq!(FlagType::Short.parse_one("A"), Some(Flag('A' as u32)));
        assert_eq!(FlagType::Short.parse_one(""), None);
    }

    #[test]
    fn flag_set_membership() {
        let set = FlagSet::parse(FlagType::Short, "XYA");
        assert!(set.contains(Flag('A' as u32)));
        assert!(set.contains(Flag('X' as u32)));
        assert!(!set.contains(Flag('B' as u32)));
    }

    #[test]
    fn flag_set_deduplicates() {
        let set = FlagSet::parse(FlagType::Short, "AAB");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn flag_set_has_none_is_false() {
        let set = FlagSet::parse(FlagType::Short, "A");
        assert!(set.has(Some(Flag('A' as u32))));
        assert!(!set.has(None));
    }

    #[test]
    fn flag_set_union() {
        let a = FlagSet::parse(FlagType::Short, "AB");
        let b = FlagSet::parse(FlagType::Short, "BC");
        let u = a.union(&b);
        assert_eq!(u.len(), 3);
        assert!(u.contains(Flag('C' as u32)));
    }

    #[test]
    fn flag_set_intersects() {
        let a = FlagSet::parse(FlagType::Short, "AB");
        let b = FlagSet::parse(FlagType::Short, "BC");
        let c = FlagSet::parse(FlagType::Short, "XY");
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(!a.intersects(&FlagSet::new()));
    }

    #[test]
    fn long_and_short_flags_do_not_collide() {
        // Short 'aa' would be two flags; long "aa" is one distinct value.
        let long = FlagType::Long.parse("aa")[0];
        let short = FlagType::Short.parse("a")[0];
        assert_ne!(long, short);
    }
}
