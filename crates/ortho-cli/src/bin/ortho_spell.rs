// ortho-spell: Hunspell-style pipe mode.
//
// Reads one word per line from stdin and prints, per word:
//   *                    the word is spelled correctly
//   & word N 0: s1, s2   misspelled, with N suggestions
//   # word 0             misspelled, no suggestions
//
// Usage:
//   ortho-spell [-d DICT_BASE]
//
// Options:
//   -d, --dict PATH   Base path of the .aff/.dic pair (no extension)
//   -h, --help        Print help

use std::io::{self, BufRead, Write};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_base, args) = ortho_cli::parse_dict_arg(&args);

    if ortho_cli::wants_help(&args) {
        println!("ortho-spell: check spelling of words from stdin.");
        println!();
        println!("Usage: ortho-spell [-d DICT_BASE]");
        println!();
        println!("Prints '*' for correct words, '& word N 0: s1, s2, ...' for");
        println!("misspellings with suggestions, '# word 0' without.");
        println!();
        println!("Options:");
        println!("  -d, --dict PATH   Base path of the .aff/.dic pair");
        println!("  -h, --help        Print this help");
        return;
    }

    let dict = ortho_cli::load_dictionary(dict_base.as_deref())
        .unwrap_or_else(|e| ortho_cli::fatal(&e));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("error reading stdin: {e}");
                break;
            }
        };
        let word = line.trim();
        if word.is_empty() {
            continue;
        }

        if dict.lookup(word) {
            let _ = writeln!(out, "*");
            continue;
        }
        let suggestions = dict.suggest(word);
        if suggestions.is_empty() {
            let _ = writeln!(out, "# {word} 0");
        } else {
            let _ = writeln!(out, "& {word} {} 0: {}", suggestions.len(), suggestions.join(", "));
        }
    }
}
