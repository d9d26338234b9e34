// ortho-cli: shared plumbing for the command line drivers.

use std::path::PathBuf;
use std::process;

use ortho::Dictionary;

/// Load a dictionary, searching in order:
/// 1. the explicit base path argument (if provided)
/// 2. the `ORTHO_DICT_PATH` environment variable
/// 3. common system hunspell directories, trying `en_US`
///
/// A "base path" is the path of the `.aff`/`.dic` pair without extension.
pub fn load_dictionary(base: Option<&str>) -> Result<Dictionary, String> {
    let candidates = search_paths(base);
    for path in &candidates {
        if path.with_extension("aff").is_file() {
            return Dictionary::from_path(path)
                .map_err(|e| format!("failed to load {}: {e}", path.display()));
        }
    }
    Err(format!(
        "no dictionary found; tried:\n{}",
        candidates
            .iter()
            .map(|p| format!("  - {}.aff", p.display()))
            .collect::<Vec<_>>()
            .join("\n")
    ))
}

fn search_paths(base: Option<&str>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(base) = base {
        paths.push(PathBuf::from(base));
    }
    if let Ok(env_base) = std::env::var("ORTHO_DICT_PATH") {
        paths.push(PathBuf::from(env_base));
    }
    for dir in ["/usr/share/hunspell", "/usr/share/myspell", "/usr/local/share/hunspell"] {
        paths.push(PathBuf::from(dir).join("en_US"));
    }
    paths
}

/// Pull a `-d PATH` / `--dict PATH` / `--dict=PATH` option out of the
/// argument list; returns it and the remaining arguments.
pub fn parse_dict_arg(args: &[String]) -> (Option<String>, Vec<String>) {
    let mut dict = None;
    let mut remaining = Vec::new();
    let mut take_next = false;
    for (i, arg) in args.iter().enumerate() {
        if take_next {
            take_next = false;
            continue;
        }
        if let Some(value) = arg.strip_prefix("--dict=") {
            dict = Some(value.to_string());
        } else if arg == "-d" || arg == "--dict" {
            if i + 1 < args.len() {
                dict = Some(args[i + 1].clone());
                take_next = true;
            } else {
                fatal(&format!("{arg} requires a value"));
            }
        } else {
            remaining.push(arg.clone());
        }
    }
    (dict, remaining)
}

pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "-h" || a == "--help")
}

/// Print an error and exit with a failing status.
pub fn fatal(message: &str) -> ! {
    eprintln!("error: {message}");
    process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_dict_equals_form() {
        let (dict, rest) = parse_dict_arg(&strings(&["--dict=/tmp/en", "word"]));
        assert_eq!(dict.as_deref(), Some("/tmp/en"));
        assert_eq!(rest, vec!["word"]);
    }

    #[test]
    fn parse_dict_separate_form() {
        let (dict, rest) = parse_dict_arg(&strings(&["-d", "/tmp/en", "-s"]));
        assert_eq!(dict.as_deref(), Some("/tmp/en"));
        assert_eq!(rest, vec!["-s"]);
    }

    #[test]
    fn parse_dict_absent() {
        let (dict, rest) = parse_dict_arg(&strings(&["word"]));
        assert!(dict.is_none());
        assert_eq!(rest, vec!["word"]);
    }

    #[test]
    fn help_detection() {
        assert!(wants_help(&strings(&["-h"])));
        assert!(wants_help(&strings(&["--help"])));
        assert!(!wants_help(&strings(&["-d"])));
    }

    #[test]
    fn explicit_path_searched_first() {
        let paths = search_paths(Some("/somewhere/nl_NL"));
        assert_eq!(paths[0], PathBuf::from("/somewhere/nl_NL"));
    }
}
