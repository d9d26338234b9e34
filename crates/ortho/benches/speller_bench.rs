// Criterion benchmarks for lookup and suggest.
//
// By default these run against a small built-in dictionary so the bench
// suite works out of the box. Point ORTHO_DICT_PATH at a real dictionary
// base path (e.g. /usr/share/hunspell/en_US) to measure realistic loads:
//
//   ORTHO_DICT_PATH=/usr/share/hunspell/en_US cargo bench -p ortho

use criterion::{criterion_group, criterion_main, Criterion};
use ortho::Dictionary;

const BUILTIN_AFF: &str = "SET UTF-8\n\
    TRY esianrtolcdugmphbyfvkwzESIANRTOLCDUGMPHBYFVKWZ\n\
    KEY qwertyuiop|asdfghjkl|zxcvbnm\n\
    REP 1\n\
    REP f ph\n\
    SFX S Y 2\n\
    SFX S 0 s [^sxzhy]\n\
    SFX S y ies [^aeiou]y\n\
    SFX D Y 1\n\
    SFX D 0 ed [^y]\n\
    PFX R Y 1\n\
    PFX R 0 re .\n";

const BUILTIN_DIC: &str = "12\n\
    spell/SDR\nspill/S\nphone/S\nkitten/S\npony/S\nhour/S\n\
    parade/S\nbook/S\ncase/S\nwork/SDR\nplay/SDR\nturn/SDR\n";

fn load_dictionary() -> Dictionary {
    if let Ok(base) = std::env::var("ORTHO_DICT_PATH") {
        match Dictionary::from_path(&base) {
            Ok(dict) => return dict,
            Err(err) => eprintln!("failed to load {base}: {err}; using built-in dictionary"),
        }
    }
    Dictionary::from_slices(BUILTIN_AFF.as_bytes(), BUILTIN_DIC.as_bytes())
        .expect("built-in dictionary")
}

fn bench_lookup(c: &mut Criterion) {
    let dict = load_dictionary();
    let words = [
        "spell", "spells", "respelled", "ponies", "kitten", "Phone",
        "spyll", "workking", "xyzzy", "spell-kitten",
    ];
    c.bench_function("lookup_10_words", |b| {
        b.iter(|| {
            for word in &words {
                std::hint::black_box(dict.lookup(word));
            }
        });
    });
}

fn bench_suggest(c: &mut Criterion) {
    let dict = load_dictionary();
    let misspelled = ["spyll", "fone", "kiten", "workd", "paraed"];
    c.bench_function("suggest_5_misspelled", |b| {
        b.iter(|| {
            for word in &misspelled {
                std::hint::black_box(dict.suggest(word));
            }
        });
    });
}

criterion_group!(benches, bench_lookup, bench_suggest);
criterion_main!(benches);
