// N-gram similarity suggestions: a whole-dictionary scan for stems close
// to the misspelling, affix expansion of the best roots, and a detailed
// rescoring pass. This is the catcher for misspellings too mangled for the
// edit-based permutations.

use ortho_core::metrics::{
    common_character_positions, lcs_len, left_common_substring, ngram, NgramOptions,
};

use crate::aff::Aff;
use crate::dic::Word;

use super::pool::ScorePool;

/// Bound on the root-scan pool.
const MAX_ROOTS: usize = 100;
/// Bound on the expanded-form pool.
const MAX_GUESSES: usize = 200;
/// Roots further than this from the misspelling (in characters) are not
/// even scored.
const MAX_LENGTH_DIFF: i64 = 4;

/// Produce n-gram suggestions, best first. `roots` is the pre-filtered
/// word list (no forbidden/nosuggest/compound-only entries); the caller
/// caps how many suggestions it consumes.
pub fn ngram_suggest<'a, I>(misspelling: &str, roots: I, aff: &Aff) -> Vec<String>
where
    I: Iterator<Item = &'a Word>,
{
    let mis_chars: Vec<char> = misspelling.chars().collect();
    let mis_len = mis_chars.len() as i64;

    // Pass 1: score every stem cheaply, keep the best roots.
    let mut root_pool: ScorePool<&Word> = ScorePool::new(MAX_ROOTS);
    for word in roots {
        if (word.stem.chars().count() as i64 - mis_len).abs() > MAX_LENGTH_DIFF {
            continue;
        }
        let mut score = root_score(misspelling, &word.stem);
        for variant in &word.alt_spellings {
            score = score.max(root_score(misspelling, variant));
        }
        root_pool.push(word, score as f64);
    }

    let threshold = detect_threshold(misspelling);

    // Pass 2: expand each kept root through its affixes and keep the
    // surface forms that beat the threshold. The pool holds
    // (form-to-compare, form-to-return) pairs: alternate spellings are
    // compared but their real stem is what gets suggested.
    let mut guess_pool: ScorePool<(String, String)> = ScorePool::new(MAX_GUESSES);
    for (root, _) in root_pool.into_sorted() {
        for variant in &root.alt_spellings {
            let score = rough_affix_score(misspelling, variant);
            if score > threshold {
                guess_pool.push((variant.clone(), root.stem.clone()), score as f64);
            }
        }
        for form in forms_for(root, aff, misspelling) {
            let score = rough_affix_score(misspelling, &form.to_lowercase());
            if score > threshold {
                guess_pool.push((form.clone(), form), score as f64);
            }
        }
    }

    // Pass 3: detailed rescoring with the longest-common-subsequence
    // weighting and the MAXDIFF fence.
    let fact = if aff.max_diff >= 0 { (10.0 - aff.max_diff as f64) / 5.0 } else { 1.0 };
    let mut rescored: Vec<(String, f64)> = guess_pool
        .into_sorted()
        .into_iter()
        .map(|((compared, real), base)| {
            let score = detailed_affix_score(misspelling, &compared.to_lowercase(), fact, base);
            (real, score)
        })
        .collect();
    rescored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    filter_guesses(&rescored, aff.only_max_diff)
}

/// Cheap first-pass score of a dictionary stem against the misspelling.
pub(crate) fn root_score(word1: &str, word2: &str) -> i64 {
    let c1: Vec<char> = word1.chars().collect();
    let lower2 = word2.to_lowercase();
    let c2: Vec<char> = lower2.chars().collect();
    ngram(3, &c1, &c2, NgramOptions::longer_worse()) + left_common_substring(&c1, &c2) as i64
}

/// Second-pass score of an expanded surface form.
fn rough_affix_score(word1: &str, word2: &str) -> i64 {
    let c1: Vec<char> = word1.chars().collect();
    let c2: Vec<char> = word2.chars().collect();
    ngram(c1.len(), &c1, &c2, NgramOptions::any_mismatch())
        + left_common_substring(&c1, &c2) as i64
}

/// Final score: longest common subsequence, positionwise agreement, swap
/// detection, weighted 2-grams, and the all-or-nothing MAXDIFF fence.
fn detailed_affix_score(word1: &str, word2: &str, fact: f64, base: f64) -> f64 {
    let c1: Vec<char> = word1.chars().collect();
    let c2: Vec<char> = word2.chars().collect();
    let lcs = lcs_len(&c1, &c2);

    // Same characters, possibly different casing: a near-exact hit.
    if c1.len() == c2.len() && c1.len() == lcs {
        return base + 2000.0;
    }

    let weighted = ngram(2, &c1, &c2, NgramOptions::weighted_any_mismatch())
        + ngram(2, &c2, &c1, NgramOptions::weighted_any_mismatch());
    let ngram_score = ngram(4, &c1, &c2, NgramOptions::any_mismatch());
    let leftcommon = left_common_substring(&c1, &c2);
    let (common_positions, is_swap) = common_character_positions(&c1, &c2);

    let mut score = 2.0 * lcs as f64 - (c1.len() as f64 - c2.len() as f64).abs()
        + leftcommon as f64
        + ngram_score as f64
        + weighted as f64;
    if common_positions > 0 {
        score += 1.0;
    }
    if is_swap {
        score += 10.0;
    }
    if (weighted as f64) < (c1.len() + c2.len()) as f64 * fact {
        score -= 1000.0;
    }
    score
}

/// Minimum acceptable second-pass score, derived by scoring mangled
/// copies of the misspelling itself.
fn detect_threshold(word: &str) -> i64 {
    let chars: Vec<char> = word.chars().collect();
    let mut threshold = 0i64;
    for start in 1..4 {
        let mut mangled = chars.clone();
        let mut pos = start;
        while pos < mangled.len() {
            mangled[pos] = '*';
            pos += 4;
        }
        threshold += ngram(chars.len(), &chars, &mangled, NgramOptions::any_mismatch());
    }
    threshold / 3 - 1
}

/// Surface forms a dictionary word can take that are worth comparing to
/// the misspelling: the bare stem, plus every affixed rendition whose
/// added surface is compatible with the misspelling's edges.
fn forms_for(word: &Word, aff: &Aff, similar_to: &str) -> Vec<String> {
    let mut forms = vec![word.stem.clone()];

    let suffixes: Vec<_> = word
        .flags
        .iter()
        .flat_map(|flag| aff.suffixes_with_flag(flag))
        .filter(|suffix| suffix.applies_to(&word.stem) && similar_to.ends_with(&suffix.add))
        .collect();
    let prefixes: Vec<_> = word
        .flags
        .iter()
        .flat_map(|flag| aff.prefixes_with_flag(flag))
        .filter(|prefix| prefix.applies_to(&word.stem) && similar_to.starts_with(&prefix.add))
        .collect();

    for suffix in &suffixes {
        forms.push(suffix.apply(&word.stem));
    }
    for prefix in &prefixes {
        if !prefix.cross_product {
            continue;
        }
        for suffix in &suffixes {
            if !suffix.cross_product {
                continue;
            }
            let stem = &word.stem;
            if prefix.strip.len() + suffix.strip.len() > stem.len() {
                continue;
            }
            let middle = &stem[prefix.strip.len()..stem.len() - suffix.strip.len()];
            forms.push(format!("{}{}{}", prefix.add, middle, suffix.add));
        }
    }
    for prefix in &prefixes {
        forms.push(prefix.apply(&word.stem));
    }
    forms
}

/// Yield guesses in score order, honoring the "only the best tier" rules:
/// scores above 1000 mark exact-ish hits that suppress everything else;
/// scores below -100 fell over the MAXDIFF fence.
fn filter_guesses(guesses: &[(String, f64)], only_max_diff: bool) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen_best = false;
    let mut found = 0usize;

    for (value, score) in guesses {
        if seen_best && *score <= 1000.0 {
            continue;
        }
        if *score > 1000.0 {
            seen_best = true;
        } else if *score < -100.0 {
            seen_best = true;
            if found > 0 && only_max_diff {
                continue;
            }
        }
        found += 1;
        out.push(value.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::{read_aff, read_dic};
    use crate::dic::Dic;

    fn load(aff_text: &str, dic_text: &str) -> (Aff, Dic) {
        let mut aff = read_aff(aff_text.as_bytes()).unwrap();
        let dic = read_dic(dic_text.as_bytes(), &mut aff).unwrap();
        (aff, dic)
    }

    #[test]
    fn close_stem_is_suggested() {
        let (aff, dic) = load(
            "SET UTF-8\n",
            "4\nspell\nspill\nbanana\nxylophone\n",
        );
        let out = ngram_suggest("spel", dic.words.iter(), &aff);
        assert!(out.contains(&"spell".to_string()));
        assert!(!out.contains(&"xylophone".to_string()));
    }

    #[test]
    fn affixed_form_is_suggested() {
        let (aff, dic) = load(
            "SET UTF-8\nSFX S Y 1\nSFX S 0 s .\n",
            "1\nspell/S\n",
        );
        let out = ngram_suggest("spels", dic.words.iter(), &aff);
        assert!(out.contains(&"spells".to_string()));
    }

    #[test]
    fn alt_spelling_promotes_its_stem() {
        let (aff, dic) = load("SET UTF-8\n", "1\nwhich ph:wich\n");
        let out = ngram_suggest("wich", dic.words.iter(), &aff);
        assert_eq!(out.first().map(String::as_str), Some("which"));
    }

    #[test]
    fn distant_lengths_are_screened_out() {
        let (aff, dic) = load("SET UTF-8\n", "1\nencyclopaedia\n");
        let out = ngram_suggest("cat", dic.words.iter(), &aff);
        assert!(out.is_empty());
    }

    #[test]
    fn forms_for_respects_conditions() {
        let (aff, dic) = load(
            "SET UTF-8\nSFX S Y 1\nSFX S 0 s [^y]\n",
            "2\npony/S\ncat/S\n",
        );
        let pony = dic.homonyms("pony").next().unwrap();
        let cat = dic.homonyms("cat").next().unwrap();
        // The condition blocks "ponys"; "cats" is fine.
        assert_eq!(forms_for(pony, &aff, "ponys"), vec!["pony"]);
        assert!(forms_for(cat, &aff, "cats").contains(&"cats".to_string()));
    }

    #[test]
    fn forms_for_screens_by_word_edges() {
        let (aff, dic) = load(
            "SET UTF-8\nSFX S Y 1\nSFX S 0 s .\n",
            "1\nspell/S\n",
        );
        let spell = dic.homonyms("spell").next().unwrap();
        // Misspelling does not end in "s": the suffixed form is skipped.
        assert_eq!(forms_for(spell, &aff, "spel"), vec!["spell"]);
    }

    #[test]
    fn filter_guesses_tiers() {
        let guesses = vec![
            ("exact".to_string(), 2001.0),
            ("good".to_string(), 50.0),
            ("bad".to_string(), -2000.0),
        ];
        // An over-1000 hit suppresses the rest.
        assert_eq!(filter_guesses(&guesses, false), vec!["exact"]);

        let guesses = vec![
            ("good".to_string(), 50.0),
            ("fenced".to_string(), -2000.0),
            ("later".to_string(), 10.0),
        ];
        // A fenced score starts suppression too, keeping earlier finds.
        assert_eq!(filter_guesses(&guesses, true), vec!["good"]);
    }

    #[test]
    fn threshold_is_finite() {
        // Just shape: the threshold of a short word must not explode.
        assert!(detect_threshold("cat") < 10);
        assert!(detect_threshold("misspelling") < 40);
    }
}
