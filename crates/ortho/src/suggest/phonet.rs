// Metaphone-based suggestions: only active when the affix file carries a
// PHONE table. Stems are compared by the 3-gram similarity of their
// phonetic codes, on top of the same cheap root screen the n-gram
// suggester uses. Codes are computed once per dictionary, not per call.

use ortho_core::metrics::{lcs_len, left_common_substring, ngram, NgramOptions};

use crate::aff::PhonetTable;
use crate::dic::Word;

use super::ngram::root_score;
use super::pool::ScorePool;

const MAX_ROOTS: usize = 100;

/// Produce phonetically similar stems, best first. `roots` pairs each
/// candidate word with its precomputed metaphone code.
pub fn phonet_suggest<'a, I>(misspelling: &str, roots: I, table: &PhonetTable) -> Vec<String>
where
    I: Iterator<Item = (&'a Word, &'a str)>,
{
    let misspelling = misspelling.to_lowercase();
    let mis_len = misspelling.chars().count() as i64;
    let mis_code = table.metaphone(&misspelling);
    let mis_code_chars: Vec<char> = mis_code.chars().collect();

    let mut pool: ScorePool<&str> = ScorePool::new(MAX_ROOTS);
    for (word, code) in roots {
        let stem_len = word.stem.chars().count() as i64;
        if (stem_len - mis_len).abs() > 4 {
            continue;
        }
        let mut nscore = root_score(&misspelling, &word.stem);
        for variant in &word.alt_spellings {
            nscore = nscore.max(root_score(&misspelling, variant));
        }
        // Only stems that are at least vaguely alike in writing get a
        // phonetic score at all.
        if nscore > 2 && (stem_len - mis_len).abs() <= 3 {
            let code_chars: Vec<char> = code.chars().collect();
            let score =
                2 * ngram(3, &mis_code_chars, &code_chars, NgramOptions::longer_worse());
            pool.push(word.stem.as_str(), score as f64);
        }
    }

    let mut rescored: Vec<(&str, f64)> = pool
        .into_sorted()
        .into_iter()
        .map(|(stem, score)| {
            let detail = detailed_score(&misspelling, &stem.to_lowercase());
            (stem, score + detail)
        })
        .collect();
    rescored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    rescored.into_iter().map(|(stem, _)| stem.to_string()).collect()
}

fn detailed_score(word1: &str, word2: &str) -> f64 {
    let c1: Vec<char> = word1.chars().collect();
    let c2: Vec<char> = word2.chars().collect();
    2.0 * lcs_len(&c1, &c2) as f64 - (c1.len() as f64 - c2.len() as f64).abs()
        + left_common_substring(&c1, &c2) as f64
}
