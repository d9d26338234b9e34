// ortho-suggest: print corrections for words given on the command line or
// stdin, one suggestion list per word.
//
// Usage:
//   ortho-suggest [-d DICT_BASE] [WORD...]

use std::io::{self, BufRead};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_base, words) = ortho_cli::parse_dict_arg(&args);

    if ortho_cli::wants_help(&words) {
        println!("ortho-suggest: print spelling suggestions.");
        println!();
        println!("Usage: ortho-suggest [-d DICT_BASE] [WORD...]");
        println!();
        println!("With no WORD arguments, reads words from stdin.");
        return;
    }

    let dict = ortho_cli::load_dictionary(dict_base.as_deref())
        .unwrap_or_else(|e| ortho_cli::fatal(&e));

    let print_one = |word: &str| {
        if dict.lookup(word) {
            println!("{word}: correct");
        } else {
            let suggestions = dict.suggest(word);
            if suggestions.is_empty() {
                println!("{word}: no suggestions");
            } else {
                println!("{word}: {}", suggestions.join(", "));
            }
        }
    };

    if words.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let word = line.trim();
            if !word.is_empty() {
                print_one(word);
            }
        }
    } else {
        for word in &words {
            print_one(word);
        }
    }
}
