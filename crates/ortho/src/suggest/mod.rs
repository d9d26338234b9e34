// The suggestion orchestrator: runs the edit-based permutations over each
// case-correction variant of the misspelling, falls back to the n-gram and
// phonetic scans, and polishes everything that comes out (case coercion,
// forbidden-word filtering, deduplication, OCONV, caps).

pub mod ngram;
pub mod permutations;
pub mod phonet;
pub mod pool;

use hashbrown::HashSet;
use ortho_core::casing::Captype;

use crate::aff::Aff;
use crate::dic::Dic;
use crate::lookup::{Analysis, Lookup, LookupOptions};
use self::permutations::ReplChange;

/// Default cap on the number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 15;
/// Cap on suggestions taken from the phonetic scan.
const MAX_PHONET_SUGGESTIONS: usize = 2;

/// The suggestion engine, borrowing the immutable dictionary data plus the
/// per-dictionary precomputations (n-gram root list, phonetic codes).
pub struct Suggest<'a> {
    aff: &'a Aff,
    dic: &'a Dic,
    lookup: Lookup<'a>,
    /// Indices into `dic.words` of entries usable as similarity roots.
    ngram_roots: &'a [usize],
    /// Metaphone codes aligned with `ngram_roots`; empty without PHONE.
    phonet_codes: &'a [String],
    /// Whether two-word suggestions may also be offered dash-joined.
    use_dash: bool,
    limit: usize,
}

/// Mutable state of one suggestion run.
struct State {
    captype: Captype,
    /// The prepared input; never suggested back.
    input: String,
    /// Everything accepted so far, before output conversion.
    handled: HashSet<String>,
    out: Vec<String>,
    compound_count: usize,
    noncompound_count: usize,
    /// Periods to re-append (SUGSWITHDOTS).
    dots: usize,
    limit: usize,
}

impl State {
    fn full(&self) -> bool {
        self.out.len() >= self.limit
    }
}

impl<'a> Suggest<'a> {
    pub fn new(
        aff: &'a Aff,
        dic: &'a Dic,
        ngram_roots: &'a [usize],
        phonet_codes: &'a [String],
    ) -> Suggest<'a> {
        // Whether "foo bar" may also be suggested as "foo-bar": the TRY
        // alphabet mentions a dash, or indicates a Latin-script language.
        let use_dash = aff.try_chars.contains('-') || aff.try_chars.contains('a');
        Suggest {
            aff,
            dic,
            lookup: Lookup::new(aff, dic),
            ngram_roots,
            phonet_codes,
            use_dash,
            limit: MAX_SUGGESTIONS,
        }
    }

    /// Override the suggestion cap (mainly for tests and callers that want
    /// a shorter list).
    pub fn with_limit(mut self, limit: usize) -> Suggest<'a> {
        self.limit = limit;
        self
    }

    /// Produce ranked corrections for a misspelled word. Bounded by the
    /// suggestion cap; the list is already deduplicated and converted.
    pub fn suggest(&self, word: &str) -> Vec<String> {
        let mut word = word.to_string();
        if let Some(iconv) = &self.aff.iconv {
            word = iconv.apply(&word);
        }

        // Trailing periods do not take part in candidate generation; with
        // SUGSWITHDOTS one is re-appended to every suggestion.
        let mut dots = 0;
        while word.ends_with('.') {
            word.pop();
            dots += 1;
        }
        if word.is_empty() {
            return Vec::new();
        }

        let (captype, variants) = self.aff.casing.corrections(&word);
        let mut state = State {
            captype,
            input: word.clone(),
            handled: HashSet::new(),
            out: Vec::new(),
            compound_count: 0,
            noncompound_count: 0,
            dots: if self.aff.sugs_with_dots { dots } else { 0 },
            limit: self.limit,
        };

        // A lowercase misspelling of a FORCEUCASE compound: the
        // capitalized form is the only suggestion worth giving.
        if self.aff.force_ucase.is_some() && captype == Captype::No {
            for capitalized in self.aff.casing.capitalize(&word) {
                if let Some(kind) = self.validate(&capitalized, true) {
                    self.emit(&mut state, &capitalized, kind, false);
                    return state.out;
                }
            }
        }

        for (idx, variant) in variants.iter().enumerate() {
            if state.full() {
                break;
            }
            // A case variant that is simply correct is itself the fix.
            if idx > 0 {
                if let Some(kind) = self.validate(variant, true) {
                    self.emit(&mut state, variant, kind, false);
                }
            }
            self.permutation_pass(variant, &mut state);
        }

        // The similarity scans only run when cheap edits did not find
        // enough plain-word suggestions.
        if !state.full()
            && self.aff.max_ngram_sugs > 0
            && state.noncompound_count < self.aff.max_ngram_sugs
        {
            let roots = self.ngram_roots.iter().map(|&i| &self.dic.words[i]);
            let mut taken = 0;
            for candidate in ngram::ngram_suggest(&word.to_lowercase(), roots, self.aff) {
                if state.full() || taken >= self.aff.max_ngram_sugs {
                    break;
                }
                if self.emit(&mut state, &candidate, Analysis::Affix, true) {
                    taken += 1;
                }
            }
        }

        if let Some(table) = &self.aff.phone {
            if !state.full() {
                let roots = self
                    .ngram_roots
                    .iter()
                    .map(|&i| &self.dic.words[i])
                    .zip(self.phonet_codes.iter().map(String::as_str));
                let mut taken = 0;
                for candidate in phonet::phonet_suggest(&word, roots, table) {
                    if state.full() || taken >= MAX_PHONET_SUGGESTIONS {
                        break;
                    }
                    if self.emit(&mut state, &candidate, Analysis::Affix, true) {
                        taken += 1;
                    }
                }
            }
        }

        state.out
    }

    /// The fixed pipeline of edit-based candidate categories. Every
    /// candidate is validated through lookup (plain analyses first, then
    /// compound ones, which is the order lookup itself searches in).
    fn permutation_pass(&self, word: &str, st: &mut State) {
        // 1. The word was meant all-uppercase ("html" -> "HTML").
        self.try_word(st, &self.aff.casing.upper(word), true);

        // 2. REP table replacements: the highest-confidence edits.
        for change in permutations::replchars(word, &self.aff.rep) {
            match change {
                ReplChange::Single(text) => self.try_word(st, &text, true),
                ReplChange::Pair(first, second) => self.try_split(st, &first, &second, false),
            }
        }

        // 3. MAP-related character substitutions.
        for text in permutations::mapchars(word, &self.aff.map_chars) {
            self.try_word(st, &text, true);
        }

        // 4. Adjacent swaps (plus the double-swap shapes for short words).
        for text in permutations::swapchar(word) {
            self.try_word(st, &text, true);
        }

        // 5. Wrong key hit, then wrong character from the TRY alphabet.
        for text in permutations::badcharkey(word, &self.aff.key) {
            self.try_word(st, &text, true);
        }
        for text in permutations::badchar(word, &self.aff.try_chars) {
            self.try_word(st, &text, true);
        }

        // 6. One character too many; a doubled two-character run.
        for text in permutations::extrachar(word) {
            self.try_word(st, &text, true);
        }
        for text in permutations::doubletwochars(word) {
            self.try_word(st, &text, true);
        }

        // 7. Two words accidentally joined.
        if !self.aff.no_split_sugs {
            for (first, second) in permutations::twowords(word) {
                // The dictionary may carry the spaced or dashed phrase as
                // an entry of its own.
                self.try_word(st, &format!("{first} {second}"), true);
                if self.use_dash {
                    self.try_word(st, &format!("{first}-{second}"), false);
                }
                // Or both halves are words by themselves.
                self.try_split(st, &first, &second, self.use_dash);
            }
        }

        // 8. A forgotten character from the TRY alphabet.
        for text in permutations::forgotchar(word, &self.aff.try_chars) {
            self.try_word(st, &text, true);
        }

        // 9. One character moved too far.
        for text in permutations::movechar(word) {
            self.try_word(st, &text, true);
        }

        // 10. Distant swaps, for words long enough to afford them.
        if word.chars().count() >= 5 {
            for text in permutations::longswapchar(word) {
                self.try_word(st, &text, true);
            }
        }
    }

    /// Validate one candidate with the given break policy.
    fn validate(&self, text: &str, allow_break: bool) -> Option<Analysis> {
        let opts = LookupOptions {
            capitalization: false,
            allow_nosuggest: false,
            allow_break,
        };
        self.lookup.analyze(text, opts)
    }

    fn try_word(&self, st: &mut State, text: &str, allow_break: bool) {
        if st.full() || text == st.input {
            return;
        }
        if let Some(kind) = self.validate(text, allow_break) {
            self.emit(st, text, kind, false);
        }
    }

    /// A two-word suggestion: both halves must be words on their own.
    fn try_split(&self, st: &mut State, first: &str, second: &str, allow_dash: bool) {
        if st.full() || first.is_empty() || second.is_empty() {
            return;
        }
        if self.validate(first, false).is_some() && self.validate(second, false).is_some() {
            self.emit(st, &format!("{first} {second}"), Analysis::Affix, false);
            if allow_dash {
                self.emit(st, &format!("{first}-{second}"), Analysis::Affix, false);
            }
        }
    }

    fn is_forbidden(&self, text: &str) -> bool {
        self.dic.has_flag(text, self.aff.forbidden_word)
    }

    /// Accept a validated candidate: coerce its case back to the input's
    /// shape, drop forbidden/duplicate results, apply OCONV, and append it
    /// to the output. Returns whether the candidate was actually emitted.
    fn emit(&self, st: &mut State, text: &str, kind: Analysis, check_inclusion: bool) -> bool {
        if st.full() {
            return false;
        }
        let mut text = text.to_string();

        // KEEPCASE pins the dictionary casing (unless CHECKSHARPS changes
        // the flag's meaning); otherwise the suggestion takes the shape of
        // what the user typed.
        let pinned = !self.aff.check_sharps && self.dic.has_flag(&text, self.aff.keep_case);
        if !pinned {
            let coerced = self.aff.casing.coerce(&text, st.captype);
            if coerced != text && !self.is_forbidden(&coerced) {
                text = coerced;
            }
        }

        if self.is_forbidden(&text) {
            return false;
        }
        if text == st.input {
            return false;
        }
        if st.handled.contains(&text) {
            return false;
        }
        // Similarity-based suggestions that merely extend an already-given
        // one ("permanent" after "impermanent") add nothing.
        if check_inclusion {
            let lowered = text.to_lowercase();
            if st.handled.iter().any(|prev| lowered.contains(&prev.to_lowercase())) {
                return false;
            }
        }
        st.handled.insert(text.clone());

        if kind == Analysis::Compound {
            if st.compound_count >= self.aff.max_cpd_sugs {
                return false;
            }
            st.compound_count += 1;
        } else {
            st.noncompound_count += 1;
        }

        let mut output = match &self.aff.oconv {
            Some(oconv) => oconv.apply(&text),
            None => text,
        };
        for _ in 0..st.dots {
            output.push('.');
        }
        if st.out.contains(&output) {
            return false;
        }
        st.out.push(output);
        true
    }
}
