// The membership engine. A word is correct iff it can be deconstructed
// into a "good form": a dictionary stem plus compatible affixes, or a
// compound of such parts, or a sequence of breakable pieces that are each
// correct on their own.
//
// The search is staged: prepare the input (ICONV, IGNORE, numbers), then
// for each case variant try affix decompositions, then compounds, and
// finally BREAK splits. The first accepting analysis wins.

use ortho_core::casing::Captype;
use ortho_core::flags::{Flag, FlagSet};

use crate::aff::{Aff, Prefix, Suffix};
use crate::dic::{Dic, Word};
use crate::suggest::permutations::{self, ReplChange};

/// BREAK recursion is capped; beyond this a word is just "no split".
const MAX_BREAK_DEPTH: usize = 10;

/// Options threaded through a lookup call. The defaults are what the
/// public boolean lookup uses; the suggestion engine narrows them when it
/// validates candidates.
#[derive(Debug, Clone, Copy)]
pub struct LookupOptions {
    /// Try case variants of the input. When off, only the exact
    /// capitalization is checked.
    pub capitalization: bool,
    /// Accept words carrying the NOSUGGEST flag.
    pub allow_nosuggest: bool,
    /// Try splitting the word on BREAK patterns.
    pub allow_break: bool,
}

impl Default for LookupOptions {
    fn default() -> LookupOptions {
        LookupOptions { capitalization: true, allow_nosuggest: true, allow_break: true }
    }
}

/// How a word was accepted: through a plain stem-plus-affixes analysis, or
/// only as a compound. The suggestion orchestrator uses the distinction to
/// limit compound-based suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Analysis {
    Affix,
    Compound,
}

/// Position of a segment inside a compound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompoundPos {
    Begin,
    Middle,
    End,
}

/// A hypothesis about how a surface word decomposes: the full text, the
/// stem, up to two suffixes and up to two prefixes, and the dictionary
/// entry backing the stem once one is found.
#[derive(Debug, Clone)]
struct AffixForm<'a> {
    text: String,
    stem: String,
    prefix: Option<&'a Prefix>,
    prefix2: Option<&'a Prefix>,
    suffix: Option<&'a Suffix>,
    suffix2: Option<&'a Suffix>,
    word: Option<&'a Word>,
}

impl<'a> AffixForm<'a> {
    fn base(text: &str) -> AffixForm<'a> {
        AffixForm {
            text: text.to_string(),
            stem: text.to_string(),
            prefix: None,
            prefix2: None,
            suffix: None,
            suffix2: None,
            word: None,
        }
    }

    fn is_base(&self) -> bool {
        self.prefix.is_none() && self.suffix.is_none()
    }

    /// Flags in effect: the stem's flags plus the continuation flags of
    /// the innermost prefix and suffix.
    fn flags(&self) -> FlagSet {
        let mut flags = self.word.map(|w| w.flags.clone()).unwrap_or_default();
        if let Some(prefix) = self.prefix {
            flags = flags.union(&prefix.flags);
        }
        if let Some(suffix) = self.suffix {
            flags = flags.union(&suffix.flags);
        }
        flags
    }

    /// Flag sets of every affix present on the form.
    fn affix_flag_sets(&self) -> Vec<&'a FlagSet> {
        let mut sets = Vec::new();
        if let Some(p) = self.prefix2 {
            sets.push(&p.flags);
        }
        if let Some(p) = self.prefix {
            sets.push(&p.flags);
        }
        if let Some(s) = self.suffix {
            sets.push(&s.flags);
        }
        if let Some(s) = self.suffix2 {
            sets.push(&s.flags);
        }
        sets
    }
}

/// Parameters of one affix-form search, mostly relevant inside compounds.
struct AffixContext<'f> {
    captype: Captype,
    allow_nosuggest: bool,
    /// Flags a prefix must carry to be usable here.
    prefix_flags: &'f [Flag],
    /// Flags a suffix must carry to be usable here.
    suffix_flags: &'f [Flag],
    /// Flags that disqualify an affix here.
    forbidden_flags: &'f [Flag],
    compoundpos: Option<CompoundPos>,
    /// Keep going when the stem is forbidden (used to *detect* forbidden
    /// decompositions).
    with_forbidden: bool,
}

impl<'f> AffixContext<'f> {
    fn plain(captype: Captype, allow_nosuggest: bool) -> AffixContext<'static> {
        AffixContext {
            captype,
            allow_nosuggest,
            prefix_flags: &[],
            suffix_flags: &[],
            forbidden_flags: &[],
            compoundpos: None,
            with_forbidden: false,
        }
    }
}

/// The lookup engine, borrowing the immutable dictionary data.
pub struct Lookup<'a> {
    aff: &'a Aff,
    dic: &'a Dic,
}

impl<'a> Lookup<'a> {
    pub fn new(aff: &'a Aff, dic: &'a Dic) -> Lookup<'a> {
        Lookup { aff, dic }
    }

    /// Is `word` correctly spelled?
    pub fn check(&self, word: &str, opts: LookupOptions) -> bool {
        self.analyze(word, opts).is_some()
    }

    /// Like [`Lookup::check`] but reports *how* the word was accepted.
    pub fn analyze(&self, word: &str, opts: LookupOptions) -> Option<Analysis> {
        // An empty token is vacuously correct.
        if word.is_empty() {
            return Some(Analysis::Affix);
        }

        // A word stored in the dictionary only as forbidden entries is
        // wrong no matter what other analyses would say.
        if self.dic.all_have_flag(word, self.aff.forbidden_word) {
            return None;
        }

        let mut word = word.to_string();
        if let Some(iconv) = &self.aff.iconv {
            word = iconv.apply(&word);
        }
        if let Some(ignore) = &self.aff.ignore {
            word = ignore.strip(&word);
        }
        if word.is_empty() {
            return Some(Analysis::Affix);
        }

        // Numbers (with separators) are always fine.
        if is_number(&word) {
            return Some(Analysis::Affix);
        }

        if let Some(analysis) = self.good_forms(&word, opts) {
            return Some(analysis);
        }

        if opts.allow_break {
            return self.break_apart(&word, 0, opts);
        }
        None
    }

    /// Try every case variant: affix analyses first, compounds second.
    fn good_forms(&self, word: &str, opts: LookupOptions) -> Option<Analysis> {
        let (captype, variants) = if opts.capitalization {
            self.aff.casing.variants(word)
        } else {
            (self.aff.casing.guess(word), vec![word.to_string()])
        };

        for variant in &variants {
            if self.has_affix_forms(variant, captype, opts.allow_nosuggest) {
                return Some(Analysis::Affix);
            }
            if self.has_compound_forms(variant, captype, opts.allow_nosuggest) {
                return Some(Analysis::Compound);
            }
        }
        None
    }

    fn has_affix_forms(&self, word: &str, captype: Captype, allow_nosuggest: bool) -> bool {
        let ctx = AffixContext::plain(captype, allow_nosuggest);
        !self.affix_forms(word, &ctx, false).is_empty()
    }

    // -- Affix decomposition ------------------------------------------------

    /// Accepted affix forms of `word`: decompositions whose stem is in the
    /// dictionary and whose flags all agree. With `collect_all` false the
    /// search stops at the first accepted form.
    fn affix_forms(
        &self,
        word: &str,
        ctx: &AffixContext<'_>,
        collect_all: bool,
    ) -> Vec<AffixForm<'a>> {
        let mut accepted = Vec::new();

        for form in self.produce_affix_forms(word, ctx) {
            // An affixed stem (or any stem inside a compound) with a
            // forbidden homonym poisons the whole decomposition search.
            if ctx.compoundpos.is_some() || !form.is_base() {
                if !ctx.with_forbidden && self.dic.has_flag(&form.stem, self.aff.forbidden_word) {
                    break;
                }
            }

            let mut found = false;
            for homonym in self.dic.homonyms(&form.stem) {
                let mut candidate = form.clone();
                candidate.word = Some(homonym);
                if self.is_good_form(&candidate, ctx, false) {
                    found = true;
                    accepted.push(candidate);
                    if !collect_all {
                        return accepted;
                    }
                }
            }

            // A compound that FORCEUCASE will capitalize may legitimately
            // start with a titlecased rendition of a lowercase stem.
            if self.aff.force_ucase.is_some()
                && ctx.captype == Captype::Init
                && ctx.compoundpos == Some(CompoundPos::Begin)
            {
                let lowered = self.aff.casing.lower_one(&form.stem);
                for homonym in self.dic.homonyms(&lowered) {
                    let mut candidate = form.clone();
                    candidate.word = Some(homonym);
                    if self.is_good_form(&candidate, ctx, false) {
                        found = true;
                        accepted.push(candidate);
                        if !collect_all {
                            return accepted;
                        }
                    }
                }
            }

            // Complex-cased dictionary entries ("McDonalds") are found
            // through the lowercase index, with stricter case rules.
            if !found && ctx.compoundpos.is_none() {
                for homonym in self.dic.homonyms_ignorecase(&form.stem) {
                    let mut candidate = form.clone();
                    candidate.word = Some(homonym);
                    if self.is_good_form(&candidate, ctx, true) {
                        accepted.push(candidate);
                        if !collect_all {
                            return accepted;
                        }
                    }
                }
            }
        }
        accepted
    }

    /// Candidate decompositions of `word`, cheapest first: the whole word,
    /// suffix strippings, prefix strippings, then cross products.
    fn produce_affix_forms(&self, word: &str, ctx: &AffixContext<'_>) -> Vec<AffixForm<'a>> {
        let mut forms = vec![AffixForm::base(word)];

        let suffix_allowed = matches!(ctx.compoundpos, None | Some(CompoundPos::End))
            || self.aff.compound_permit.is_some();
        let prefix_allowed = matches!(ctx.compoundpos, None | Some(CompoundPos::Begin))
            || self.aff.compound_permit.is_some();

        if suffix_allowed {
            forms.extend(self.desuffix(word, ctx.suffix_flags, ctx.forbidden_flags, false, false));
        }
        if prefix_allowed {
            for form in self.deprefix(word, ctx.prefix_flags, ctx.forbidden_flags, false) {
                forms.push(form.clone());

                if suffix_allowed && form.prefix.is_some_and(|p| p.cross_product) {
                    for mut combined in
                        self.desuffix(&form.stem, ctx.suffix_flags, ctx.forbidden_flags, false, true)
                    {
                        combined.text = form.text.clone();
                        combined.prefix = form.prefix;
                        forms.push(combined);
                    }
                }
            }
        }
        forms
    }

    /// Strip suffixes off `word`. One nesting level (suffix-of-suffix)
    /// unless COMPLEXPREFIXES moved the second level to the prefix side.
    fn desuffix(
        &self,
        word: &str,
        required_flags: &[Flag],
        forbidden_flags: &[Flag],
        nested: bool,
        crossproduct: bool,
    ) -> Vec<AffixForm<'a>> {
        let mut forms = Vec::new();
        for suffix in self.aff.suffixes_for(word) {
            if crossproduct && !suffix.cross_product {
                continue;
            }
            if !required_flags.iter().all(|f| suffix.flags.contains(*f)) {
                continue;
            }
            if forbidden_flags.iter().any(|f| suffix.flags.contains(*f)) {
                continue;
            }
            if !word.ends_with(&suffix.add) {
                continue;
            }
            // An affix may only consume the whole word under FULLSTRIP.
            if word.len() == suffix.add.len() && !self.aff.full_strip {
                continue;
            }
            let stem = format!("{}{}", &word[..word.len() - suffix.add.len()], suffix.strip);
            if stem.is_empty() {
                continue;
            }
            let stem_chars: Vec<char> = stem.chars().collect();
            if !suffix.condition.matches_end(&stem_chars) {
                continue;
            }

            let mut form = AffixForm::base(word);
            form.stem = stem.clone();
            form.suffix = Some(suffix);
            forms.push(form);

            if !nested && !self.aff.complex_prefixes {
                let mut required2 = vec![suffix.flag];
                required2.extend_from_slice(required_flags);
                for mut inner in self.desuffix(&stem, &required2, forbidden_flags, true, crossproduct)
                {
                    inner.suffix2 = Some(suffix);
                    inner.text = word.to_string();
                    forms.push(inner);
                }
            }
        }
        forms
    }

    /// Strip prefixes off `word`. Second level only under COMPLEXPREFIXES.
    fn deprefix(
        &self,
        word: &str,
        required_flags: &[Flag],
        forbidden_flags: &[Flag],
        nested: bool,
    ) -> Vec<AffixForm<'a>> {
        let mut forms = Vec::new();
        for prefix in self.aff.prefixes_for(word) {
            if !required_flags.iter().all(|f| prefix.flags.contains(*f)) {
                continue;
            }
            if forbidden_flags.iter().any(|f| prefix.flags.contains(*f)) {
                continue;
            }
            if !word.starts_with(&prefix.add) {
                continue;
            }
            if word.len() == prefix.add.len() && !self.aff.full_strip {
                continue;
            }
            let stem = format!("{}{}", prefix.strip, &word[prefix.add.len()..]);
            if stem.is_empty() {
                continue;
            }
            let stem_chars: Vec<char> = stem.chars().collect();
            if !prefix.condition.matches_start(&stem_chars) {
                continue;
            }

            let mut form = AffixForm::base(word);
            form.stem = stem.clone();
            form.prefix = Some(prefix);
            forms.push(form);

            if !nested && self.aff.complex_prefixes {
                let mut required2 = vec![prefix.flag];
                required2.extend_from_slice(required_flags);
                for mut inner in self.deprefix(&stem, &required2, forbidden_flags, true) {
                    inner.prefix2 = Some(prefix);
                    inner.text = word.to_string();
                    forms.push(inner);
                }
            }
        }
        forms
    }

    /// The full compatibility check for a candidate form with its
    /// dictionary entry filled in.
    fn is_good_form(&self, form: &AffixForm<'a>, ctx: &AffixContext<'_>, check_cap: bool) -> bool {
        let aff = self.aff;
        let Some(entry) = form.word else { return false };
        let root_flags = &entry.flags;
        let all_flags = form.flags();
        let root_captype = entry.captype;

        if !ctx.allow_nosuggest && root_flags.has(aff.no_suggest) {
            return false;
        }
        if aff.forbid_warn && root_flags.has(aff.warn) {
            return false;
        }

        // Case compatibility between the input shape and the entry.
        if ctx.captype != root_captype {
            if root_flags.has(aff.keep_case) && !aff.check_sharps {
                return false;
            }
            // A non-lowercase entry matches only its exact case, or the
            // all-caps rendition.
            if check_cap && ctx.captype != Captype::All && root_captype != Captype::No {
                return false;
            }
        }

        if aff.need_affix.is_some() {
            if form.is_base() {
                if root_flags.has(aff.need_affix) {
                    return false;
                }
            } else {
                let affix_sets = form.affix_flag_sets();
                if affix_sets.iter().all(|flags| flags.has(aff.need_affix)) {
                    return false;
                }
            }
        }

        // The affixes must be licensed by the flags in effect.
        if let Some(prefix) = form.prefix {
            if !all_flags.contains(prefix.flag) {
                return false;
            }
        }
        if let Some(suffix) = form.suffix {
            if !all_flags.contains(suffix.flag) {
                return false;
            }
        }

        // A circumfix-flagged suffix requires a circumfix-flagged prefix
        // and vice versa.
        if let Some(circumfix) = aff.circumfix {
            let suffix_has = form.suffix.is_some_and(|s| s.flags.contains(circumfix));
            let prefix_has = form.prefix.is_some_and(|p| p.flags.contains(circumfix));
            if suffix_has != prefix_has {
                return false;
            }
        }

        match ctx.compoundpos {
            None => !all_flags.has(aff.only_in_compound),
            Some(pos) => {
                if all_flags.has(aff.compound_flag) {
                    return true;
                }
                let positional = match pos {
                    CompoundPos::Begin => aff.compound_begin,
                    CompoundPos::Middle => aff.compound_middle,
                    CompoundPos::End => aff.compound_end,
                };
                all_flags.has(positional)
            }
        }
    }

    // -- Compounding --------------------------------------------------------

    fn has_compound_forms(&self, word: &str, captype: Captype, allow_nosuggest: bool) -> bool {
        if self.aff.compound_begin.is_some() || self.aff.compound_flag.is_some() {
            let mut parts = Vec::new();
            if self.compounds_by_flags(word, &mut parts, captype, allow_nosuggest) {
                return true;
            }
        }
        if !self.aff.compound_rules.is_empty() {
            let mut parts = Vec::new();
            if self.compounds_by_rules(word, &mut parts, None, captype) {
                return true;
            }
        }
        false
    }

    /// Flag-gated compounding: recursively split off a head segment, each
    /// segment being an accepted affix form carrying the role-appropriate
    /// compound flag. Returns true as soon as one full partition passes
    /// the boundary checks.
    fn compounds_by_flags(
        &self,
        rest: &str,
        prev: &mut Vec<AffixForm<'a>>,
        captype: Captype,
        allow_nosuggest: bool,
    ) -> bool {
        let aff = self.aff;
        let forbidden: Vec<Flag> = aff.compound_forbid.into_iter().collect();
        let permit: Vec<Flag> = aff.compound_permit.into_iter().collect();

        if let Some(max) = aff.compound_word_max {
            if prev.len() >= max {
                return false;
            }
        }

        if !prev.is_empty() {
            // The rest of the word as the final segment.
            let ctx = AffixContext {
                captype,
                allow_nosuggest,
                prefix_flags: &permit,
                suffix_flags: &[],
                forbidden_flags: &forbidden,
                compoundpos: Some(CompoundPos::End),
                with_forbidden: false,
            };
            for form in self.affix_forms(rest, &ctx, true) {
                prev.push(form);
                let good = !self.is_bad_compound(prev, captype);
                prev.pop();
                if good {
                    return true;
                }
            }
        } else if aff.forbidden_word.is_some() {
            // Don't even start decompounding a word that is a forbidden
            // form as a whole ("forbiddenword's").
            let ctx = AffixContext {
                with_forbidden: true,
                ..AffixContext::plain(captype, true)
            };
            if self
                .affix_forms(rest, &ctx, true)
                .iter()
                .any(|form| form.flags().has(aff.forbidden_word))
            {
                return false;
            }
        }

        let rest_chars: Vec<char> = rest.chars().collect();
        if rest_chars.len() < aff.compound_min * 2 {
            return false;
        }

        // Affixes at inner boundaries need the permit flag: the suffix of
        // the first segment and both affixes of middle segments.
        let compoundpos = if prev.is_empty() { CompoundPos::Begin } else { CompoundPos::Middle };
        let (prefix_flags, suffix_flags): (&[Flag], &[Flag]) = match compoundpos {
            CompoundPos::Begin => (&[], &permit),
            _ => (&permit, &permit),
        };
        let ctx = AffixContext {
            captype,
            allow_nosuggest,
            prefix_flags,
            suffix_flags,
            forbidden_flags: &forbidden,
            compoundpos: Some(compoundpos),
            with_forbidden: false,
        };

        for pos in aff.compound_min..=(rest_chars.len() - aff.compound_min) {
            let head: String = rest_chars[..pos].iter().collect();
            let tail: String = rest_chars[pos..].iter().collect();

            for form in self.affix_forms(&head, &ctx, true) {
                prev.push(form);
                let found = self.compounds_by_flags(&tail, prev, captype, allow_nosuggest);
                prev.pop();
                if found {
                    return true;
                }
            }

            // SIMPLIFIEDTRIPLE: "busstop" may stand for "buss" + "stop"
            // with the triple letter collapsed at the boundary.
            if aff.simplified_triple && rest_chars[pos] == rest_chars[pos - 1] {
                let mut head_plus = head.clone();
                head_plus.push(rest_chars[pos - 1]);
                for mut form in self.affix_forms(&head_plus, &ctx, true) {
                    form.text = head.clone();
                    prev.push(form);
                    let found = self.compounds_by_flags(&tail, prev, captype, allow_nosuggest);
                    prev.pop();
                    if found {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Rule-gated compounding: the segment stems must be plain dictionary
    /// words whose flag sequence is generated by some COMPOUNDRULE.
    fn compounds_by_rules(
        &self,
        rest: &str,
        prev: &mut Vec<(&'a Word, String)>,
        rules: Option<Vec<&'a crate::aff::CompoundRule>>,
        captype: Captype,
    ) -> bool {
        let aff = self.aff;
        let rules = rules.unwrap_or_else(|| aff.compound_rules.iter().collect());

        if let Some(max) = aff.compound_word_max {
            if prev.len() >= max {
                return false;
            }
        }

        if !prev.is_empty() {
            for homonym in self.dic.homonyms(rest) {
                let mut flag_sets: Vec<&FlagSet> = prev.iter().map(|(w, _)| &w.flags).collect();
                flag_sets.push(&homonym.flags);
                if rules.iter().any(|rule| rule.full_match(&flag_sets)) {
                    let mut parts: Vec<AffixForm<'a>> =
                        prev.iter().map(|(_, text)| AffixForm::base(text)).collect();
                    parts.push(AffixForm::base(rest));
                    if !self.is_bad_compound(&parts, captype) {
                        return true;
                    }
                }
            }
        }

        let rest_chars: Vec<char> = rest.chars().collect();
        if rest_chars.len() < aff.compound_min * 2 {
            return false;
        }

        for pos in aff.compound_min..=(rest_chars.len() - aff.compound_min) {
            let head: String = rest_chars[..pos].iter().collect();
            let tail: String = rest_chars[pos..].iter().collect();

            for homonym in self.dic.homonyms(&head) {
                let mut flag_sets: Vec<&FlagSet> = prev.iter().map(|(w, _)| &w.flags).collect();
                flag_sets.push(&homonym.flags);
                let still_possible: Vec<&crate::aff::CompoundRule> = rules
                    .iter()
                    .copied()
                    .filter(|rule| rule.partial_match(&flag_sets))
                    .collect();
                if still_possible.is_empty() {
                    continue;
                }
                prev.push((homonym, head.clone()));
                let found = self.compounds_by_rules(&tail, prev, Some(still_possible), captype);
                prev.pop();
                if found {
                    return true;
                }
            }
        }
        false
    }

    /// Boundary checks applied to an otherwise-valid compound partition.
    /// Returns true if the partition must be rejected.
    fn is_bad_compound(&self, parts: &[AffixForm<'a>], captype: Captype) -> bool {
        let aff = self.aff;

        if aff.force_ucase.is_some() && captype != Captype::All && captype != Captype::Init {
            if let Some(last) = parts.last() {
                if self.dic.has_flag(&last.text, aff.force_ucase) {
                    return true;
                }
            }
        }

        for idx in 0..parts.len().saturating_sub(1) {
            let left_form = &parts[idx];
            let right_form = &parts[idx + 1];
            let left = left_form.text.as_str();
            let right = right_form.text.as_str();
            let ctx = AffixContext::plain(captype, true);

            if self.dic.has_flag(left, aff.compound_forbid) {
                return true;
            }

            // If "left right" exists as a dictionary phrase, the joined
            // compound is a misspelling of it.
            let spaced = format!("{left} {right}");
            if !self.affix_forms(&spaced, &ctx, false).is_empty() {
                return true;
            }

            if aff.check_compound_rep {
                let joined = format!("{left}{right}");
                for change in permutations::replchars(&joined, &aff.rep) {
                    if let ReplChange::Single(candidate) = change {
                        if !self.affix_forms(&candidate, &ctx, false).is_empty() {
                            return true;
                        }
                    }
                }
            }

            if aff.check_compound_triple {
                let lc: Vec<char> = left.chars().collect();
                let rc: Vec<char> = right.chars().collect();
                let l = lc.len();
                if l >= 2 && lc[l - 1] == lc[l - 2] && rc.first() == Some(&lc[l - 1]) {
                    return true;
                }
                if rc.len() >= 2 && rc[0] == rc[1] && lc.last() == Some(&rc[0]) {
                    return true;
                }
            }

            if aff.check_compound_case {
                let left_c = left.chars().last();
                let right_c = right.chars().next();
                if let (Some(l), Some(r)) = (left_c, right_c) {
                    if (l.is_uppercase() || r.is_uppercase()) && l != '-' && r != '-' {
                        return true;
                    }
                }
            }

            if !aff.check_compound_pattern.is_empty() {
                let left_flags = left_form.flags();
                let right_flags = right_form.flags();
                if aff.check_compound_pattern.iter().any(|pattern| {
                    pattern.matches(
                        &left_form.stem,
                        &left_flags,
                        left_form.is_base(),
                        &right_form.stem,
                        &right_flags,
                        right_form.is_base(),
                    )
                }) {
                    return true;
                }
            }

            // Duplication is only forbidden at the very end.
            if aff.check_compound_dup && left == right && idx == parts.len() - 2 {
                return true;
            }
        }
        false
    }

    // -- Word breaking ------------------------------------------------------

    /// Try BREAK patterns: a split is accepted when the head is a word (or
    /// empty) and the tail is a word or can itself be broken further.
    fn break_apart(&self, word: &str, depth: usize, opts: LookupOptions) -> Option<Analysis> {
        if depth > MAX_BREAK_DEPTH {
            return None;
        }
        for pattern in &self.aff.breaks {
            for (start, end) in pattern.find_splits(word) {
                let head = &word[..start];
                let tail = &word[end..];

                let head_kind = if head.is_empty() {
                    Some(Analysis::Affix)
                } else {
                    self.good_forms(head, opts)
                };
                let Some(head_kind) = head_kind else { continue };

                let tail_kind = if tail.is_empty() {
                    Some(Analysis::Affix)
                } else {
                    self.good_forms(tail, opts)
                        .or_else(|| self.break_apart(tail, depth + 1, opts))
                };
                if let Some(tail_kind) = tail_kind {
                    let compound = head_kind == Analysis::Compound || tail_kind == Analysis::Compound;
                    return Some(if compound { Analysis::Compound } else { Analysis::Affix });
                }
            }
        }
        None
    }
}

/// Digits with optional single `.`/`,`/`-` separators between groups.
fn is_number(word: &str) -> bool {
    let mut seen_digit = false;
    let mut prev_sep = true;
    for c in word.chars() {
        if c.is_ascii_digit() {
            seen_digit = true;
            prev_sep = false;
        } else if matches!(c, '.' | ',' | '-') {
            if prev_sep {
                return false;
            }
            prev_sep = true;
        } else {
            return false;
        }
    }
    seen_digit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::{read_aff, read_dic};

    struct Fixture {
        aff: Aff,
        dic: Dic,
    }

    impl Fixture {
        fn new(aff_text: &str, dic_text: &str) -> Fixture {
            let mut aff = read_aff(aff_text.as_bytes()).unwrap();
            let dic = read_dic(dic_text.as_bytes(), &mut aff).unwrap();
            Fixture { aff, dic }
        }

        fn check(&self, word: &str) -> bool {
            Lookup::new(&self.aff, &self.dic).check(word, LookupOptions::default())
        }

        fn analyze(&self, word: &str) -> Option<Analysis> {
            Lookup::new(&self.aff, &self.dic).analyze(word, LookupOptions::default())
        }
    }

    const EN_AFF: &str = "SET UTF-8\n\
        TRY esianrtolcdugmphbyfvkwz\n\
        SFX S Y 2\n\
        SFX S 0 s [^sxzhy]\n\
        SFX S y ies [^aeiou]y\n\
        SFX D Y 2\n\
        SFX D 0 ed [^y]\n\
        SFX D y ied [^aeiou]y\n\
        PFX R Y 1\n\
        PFX R 0 re .\n";

    fn en() -> Fixture {
        Fixture::new(
            EN_AFF,
            "6\nspell/SDR\nspill/S\nkitten/S\npony/S\nParis\nMcDonalds\n",
        )
    }

    // -- Plain stems and affixes --------------------------------------------

    #[test]
    fn stem_as_is() {
        let f = en();
        assert!(f.check("spell"));
        assert!(!f.check("spel"));
        assert!(!f.check("spells spells"));
    }

    #[test]
    fn suffixed_forms() {
        let f = en();
        assert!(f.check("spells"));
        assert!(f.check("spelled"));
        assert!(f.check("ponies"));
        // "ponys" violates the [^sxzhy] condition of the "s" entry.
        assert!(!f.check("ponys"));
    }

    #[test]
    fn suffix_needs_flag() {
        let f = en();
        // "Paris" has no S flag.
        assert!(!f.check("Parises"));
        assert!(!f.check("spilled")); // spill lacks D
    }

    #[test]
    fn prefixed_forms() {
        let f = en();
        assert!(f.check("respell"));
        assert!(!f.check("respill")); // spill lacks R
    }

    #[test]
    fn cross_product_prefix_and_suffix() {
        let f = en();
        assert!(f.check("respells"));
        assert!(f.check("respelled"));
    }

    #[test]
    fn no_cross_product_without_marker() {
        let f = Fixture::new(
            "SET UTF-8\nSFX S N 1\nSFX S 0 s .\nPFX R N 1\nPFX R 0 re .\n",
            "1\nspell/SR\n",
        );
        assert!(f.check("spells"));
        assert!(f.check("respell"));
        assert!(!f.check("respells"));
    }

    #[test]
    fn double_suffix() {
        // ation on top of iz: "organization" = organ + iz + ation, where
        // the inner suffix carries the outer suffix's flag.
        let f = Fixture::new(
            "SET UTF-8\n\
             SFX I Y 1\n\
             SFX I 0 ize/A .\n\
             SFX A Y 1\n\
             SFX A e ation .\n",
            "1\norgan/I\n",
        );
        assert!(f.check("organize"));
        assert!(f.check("organization"));
        assert!(!f.check("organation")); // A not on the stem itself
    }

    #[test]
    fn full_strip_gate() {
        let strip_all = "SET UTF-8\nSFX X Y 1\nSFX X abc xyz .\n";
        let f = Fixture::new(strip_all, "1\nabc/X\n");
        // Stripping the whole word needs FULLSTRIP.
        assert!(!f.check("xyz"));
        let f = Fixture::new(&format!("{strip_all}FULLSTRIP\n"), "1\nabc/X\n");
        assert!(f.check("xyz"));
    }

    // -- Case handling ------------------------------------------------------

    #[test]
    fn titlecase_of_lowercase_entry() {
        let f = en();
        assert!(f.check("Kitten"));
        assert!(f.check("KITTEN"));
        assert!(f.check("KITTENS"));
    }

    #[test]
    fn lowercase_of_titlecase_entry_rejected() {
        let f = en();
        assert!(f.check("Paris"));
        assert!(f.check("PARIS"));
        assert!(!f.check("paris"));
    }

    #[test]
    fn complex_case_entry() {
        let f = en();
        assert!(f.check("McDonalds"));
        assert!(f.check("MCDONALDS")); // all-caps always acceptable
        assert!(!f.check("mcdonalds"));
        assert!(!f.check("Mcdonalds"));
    }

    #[test]
    fn keepcase_pins_exact_case() {
        let f = Fixture::new("SET UTF-8\nKEEPCASE K\n", "2\nOpenGL/K\nkitten\n");
        assert!(f.check("OpenGL"));
        assert!(!f.check("OPENGL"));
        assert!(f.check("KITTEN"));
    }

    #[test]
    fn checksharps_uppercase_sharp_s() {
        let f = Fixture::new("SET UTF-8\nCHECKSHARPS\n", "1\nAusstoß\n");
        assert!(f.check("Ausstoß"));
        assert!(f.check("AUSSTOß"));
        assert!(f.check("AUSSTOSS"));
        assert!(!f.check("ausstoß"));
    }

    // -- Special flags ------------------------------------------------------

    #[test]
    fn forbidden_word_vetoes() {
        let f = Fixture::new(
            "SET UTF-8\nFORBIDDENWORD F\nSFX S Y 1\nSFX S 0 s .\n",
            "3\nfoo/F\nbar/S\nbars/F\n",
        );
        assert!(!f.check("foo"));
        assert!(f.check("bar"));
        // "bars" decomposes to bar+s, but the whole word is forbidden.
        assert!(!f.check("bars"));
    }

    #[test]
    fn needaffix_stem_unusable_alone() {
        let f = Fixture::new(
            "SET UTF-8\nNEEDAFFIX N\nSFX S Y 1\nSFX S 0 s .\n",
            "1\npseudo/NS\n",
        );
        assert!(!f.check("pseudo"));
        assert!(f.check("pseudos"));
    }

    #[test]
    fn onlyincompound_outside_compound() {
        let f = Fixture::new(
            "SET UTF-8\nONLYINCOMPOUND O\nCOMPOUNDFLAG X\n",
            "2\nfoo/OX\nbar/X\n",
        );
        assert!(!f.check("foo"));
        assert!(f.check("foobar")); // usable inside a compound
    }

    #[test]
    fn nosuggest_visible_only_to_lookup() {
        let f = Fixture::new("SET UTF-8\nNOSUGGEST !\n", "1\ndamn/!\n");
        assert!(f.check("damn"));
        let lookup = Lookup::new(&f.aff, &f.dic);
        let opts = LookupOptions { allow_nosuggest: false, ..LookupOptions::default() };
        assert!(!lookup.check("damn", opts));
    }

    #[test]
    fn warn_with_forbidwarn() {
        let f = Fixture::new("SET UTF-8\nWARN W\nFORBIDWARN\n", "1\nalot/W\n");
        assert!(!f.check("alot"));
        let f = Fixture::new("SET UTF-8\nWARN W\n", "1\nalot/W\n");
        assert!(f.check("alot"));
    }

    #[test]
    fn circumfix_requires_both_sides() {
        let f = Fixture::new(
            "SET UTF-8\nCIRCUMFIX C\n\
             PFX P Y 1\nPFX P 0 un/C .\n\
             SFX S Y 1\nSFX S 0 ish/C .\n",
            "1\nself/PS\n",
        );
        assert!(f.check("unselfish"));
        assert!(!f.check("unself"));
        assert!(!f.check("selfish"));
        assert!(f.check("self"));
    }

    // -- Compounds ----------------------------------------------------------

    #[test]
    fn compound_by_flag() {
        let f = Fixture::new(
            "SET UTF-8\nCOMPOUNDFLAG X\nCOMPOUNDMIN 3\n",
            "3\nfoo/X\nbar/X\nbaz\n",
        );
        assert!(f.check("foobar"));
        assert!(f.check("barfoo"));
        assert!(f.check("foobarfoo"));
        assert!(!f.check("foobaz")); // baz not compoundable
        assert_eq!(f.analyze("foobar"), Some(Analysis::Compound));
    }

    #[test]
    fn compound_min_length() {
        let f = Fixture::new(
            "SET UTF-8\nCOMPOUNDFLAG X\nCOMPOUNDMIN 4\n",
            "2\nfoo/X\nbars/X\n",
        );
        // "foo" is shorter than COMPOUNDMIN.
        assert!(!f.check("foobars"));
    }

    #[test]
    fn compound_positional_flags() {
        let f = Fixture::new(
            "SET UTF-8\nCOMPOUNDBEGIN B\nCOMPOUNDMIDDLE M\nCOMPOUNDEND E\n",
            "3\nfoo/B\nbar/M\nbaz/E\n",
        );
        assert!(f.check("foobaz"));
        assert!(f.check("foobarbaz"));
        assert!(!f.check("bazfoo"));
        assert!(!f.check("foobar"));
    }

    #[test]
    fn compound_word_max() {
        let f = Fixture::new(
            "SET UTF-8\nCOMPOUNDFLAG X\nCOMPOUNDWORDMAX 2\n",
            "2\nfoo/X\nbar/X\n",
        );
        assert!(f.check("foobar"));
        assert!(!f.check("foobarfoo"));
    }

    #[test]
    fn compound_rule_ordinals() {
        // The classic "1st, 11th, 22nd" rule set.
        let f = Fixture::new(
            "SET UTF-8\nCOMPOUNDMIN 1\nONLYINCOMPOUND c\nCOMPOUNDRULE 2\n\
             COMPOUNDRULE n*1t\nCOMPOUNDRULE n*mp\n",
            "10\n0/nm\n0th/pt\n1/n1\n1st/p1\n1th/tc\n2/nm\n2nd/p2\n2th/tc\n3/nm\n3rd/p3\n",
        );
        assert!(f.check("1st"));
        assert!(f.check("11th"));
        assert!(f.check("101st"));
        assert!(!f.check("11st"));
        assert!(!f.check("1th"));
    }

    #[test]
    fn check_compound_dup() {
        let base = "SET UTF-8\nCOMPOUNDFLAG X\n";
        let f = Fixture::new(base, "1\nfoo/X\n");
        assert!(f.check("foofoo"));
        let f = Fixture::new(&format!("{base}CHECKCOMPOUNDDUP\n"), "1\nfoo/X\n");
        assert!(!f.check("foofoo"));
    }

    #[test]
    fn check_compound_triple() {
        let base = "SET UTF-8\nCOMPOUNDFLAG X\nCOMPOUNDMIN 3\n";
        let f = Fixture::new(&format!("{base}CHECKCOMPOUNDTRIPLE\n"), "2\nfoott/X\ntar/X\n");
        assert!(!f.check("footttar"));
        let f = Fixture::new(base, "2\nfoott/X\ntar/X\n");
        assert!(f.check("footttar"));
    }

    #[test]
    fn check_compound_case() {
        let base = "SET UTF-8\nCOMPOUNDFLAG X\nCOMPOUNDMIN 3\n";
        let f = Fixture::new(&format!("{base}CHECKCOMPOUNDCASE\n"), "2\nfoo/X\nBar/X\n");
        assert!(!f.check("fooBar"));
        let f = Fixture::new(base, "2\nfoo/X\nBar/X\n");
        assert!(f.check("fooBar"));
    }

    #[test]
    fn check_compound_pattern() {
        let f = Fixture::new(
            "SET UTF-8\nCOMPOUNDFLAG X\nCOMPOUNDMIN 3\n\
             CHECKCOMPOUNDPATTERN 1\nCHECKCOMPOUNDPATTERN o b\n",
            "2\nfoo/X\nbar/X\n",
        );
        assert!(!f.check("foobar")); // o|b boundary forbidden
        assert!(f.check("barfoo"));
    }

    #[test]
    fn check_compound_rep() {
        let f = Fixture::new(
            "SET UTF-8\nCOMPOUNDFLAG X\nCOMPOUNDMIN 2\nCHECKCOMPOUNDREP\n\
             REP 1\nREP í i\n",
            "3\nszer/X\nvíz/X\nszerviz\n",
        );
        // "szerviz" is a word; "szervíz" would decompose as szer+víz only
        // through the REP-correctable boundary, so it is rejected.
        assert!(f.check("szerviz"));
        assert!(!f.check("szervíz"));
    }

    #[test]
    fn compound_affixes_need_permit_flag() {
        let aff = "SET UTF-8\nCOMPOUNDFLAG X\nCOMPOUNDMIN 3\n\
                   SFX S Y 1\nSFX S 0 s .\n";
        let f = Fixture::new(aff, "2\nfoo/XS\nbar/X\n");
        // A suffix on the last part is fine without a permit flag.
        assert!(f.check("barfoos"));
        // An inner suffix is not.
        assert!(!f.check("foosbar"));

        let aff = "SET UTF-8\nCOMPOUNDFLAG X\nCOMPOUNDMIN 3\nCOMPOUNDPERMITFLAG P\n\
                   SFX S Y 1\nSFX S 0 s/P .\n";
        let f = Fixture::new(aff, "2\nfoo/XS\nbar/X\n");
        assert!(f.check("foosbar"));
    }

    #[test]
    fn compound_forbid_flag_disqualifies() {
        let aff = "SET UTF-8\nCOMPOUNDFLAG X\nCOMPOUNDMIN 3\nCOMPOUNDPERMITFLAG P\n\
                   COMPOUNDFORBIDFLAG Z\n\
                   SFX S Y 1\nSFX S 0 s/PZ .\n";
        let f = Fixture::new(aff, "2\nfoo/XS\nbar/X\n");
        assert!(!f.check("foosbar"));
    }

    #[test]
    fn simplified_triple() {
        let aff = "SET UTF-8\nCOMPOUNDFLAG X\nCOMPOUNDMIN 3\nCHECKCOMPOUNDTRIPLE\nSIMPLIFIEDTRIPLE\n";
        let f = Fixture::new(aff, "2\nbuss/X\nstop/X\n");
        // "busstop" = buss + stop with one 's' collapsed.
        assert!(f.check("busstop"));
        assert!(!f.check("bussstop")); // the triple itself stays invalid
    }

    // -- Breaking -----------------------------------------------------------

    #[test]
    fn break_on_dashes_by_default() {
        let f = en();
        assert!(f.check("spell-kitten"));
        assert!(!f.check("spell-xyzzy"));
        assert!(f.check("spell-")); // trailing dash breaks off
        assert!(f.check("-spell"));
        assert!(f.check("spell-spill-kitten"));
    }

    #[test]
    fn break_patterns_from_directive() {
        let f = Fixture::new("SET UTF-8\nBREAK 1\nBREAK _\n", "2\nfoo\nbar\n");
        assert!(f.check("foo_bar"));
        assert!(!f.check("foo-bar")); // dash no longer a break point
    }

    #[test]
    fn break_disabled() {
        let f = Fixture::new("SET UTF-8\nBREAK 0\n", "2\nfoo\nbar\n");
        assert!(!f.check("foo-bar"));
    }

    #[test]
    fn no_break_when_disallowed_by_options() {
        let f = en();
        let lookup = Lookup::new(&f.aff, &f.dic);
        let opts = LookupOptions { allow_break: false, ..LookupOptions::default() };
        assert!(!lookup.check("spell-kitten", opts));
    }

    #[test]
    fn dictionary_entry_with_dash_wins_over_break() {
        let f = Fixture::new("SET UTF-8\n", "1\nwell-known\n");
        // Neither part is a word, but the whole entry is.
        assert!(f.check("well-known"));
    }

    // -- Input preparation --------------------------------------------------

    #[test]
    fn empty_input_is_fine() {
        let f = en();
        assert!(f.check(""));
    }

    #[test]
    fn numbers_always_accepted() {
        let f = en();
        assert!(f.check("42"));
        assert!(f.check("3.14"));
        assert!(f.check("1,000"));
        assert!(f.check("10-12"));
        assert!(!f.check("1..2"));
        assert!(!f.check("x42x"));
    }

    #[test]
    fn iconv_applied_before_lookup() {
        let f = Fixture::new("SET UTF-8\nICONV 1\nICONV ’ '\n", "1\nl'eau\n");
        assert!(f.check("l’eau"));
        assert!(f.check("l'eau"));
    }

    #[test]
    fn ignore_applied_to_input() {
        let f = Fixture::new("SET UTF-8\nIGNORE \u{064B}\n", "1\nword\n");
        assert!(f.check("wo\u{064B}rd"));
    }

    // -- is_number ----------------------------------------------------------

    #[test]
    fn number_grammar() {
        assert!(is_number("1"));
        assert!(is_number("12.34"));
        assert!(is_number("1-2-3"));
        assert!(!is_number(""));
        assert!(!is_number("-1")); // leading separator
        assert!(!is_number("1a"));
        assert!(!is_number(".."));
    }
}
