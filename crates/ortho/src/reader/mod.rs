// Parsers for the two dictionary source files. `.aff` is line-oriented
// and directive-prefixed; `.dic` is a count line followed by word entries.
// Both are decoded per the SET directive before parsing.

pub mod aff;
pub mod dic;

pub use aff::read_aff;
pub use dic::read_dic;

/// Errors raised while loading a dictionary. The lookup/suggest core never
/// raises; everything fallible happens here.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read dictionary file: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown character encoding: {0}")]
    UnknownEncoding(String),

    #[error("malformed directive at line {line}: {message}")]
    Malformed { line: usize, message: String },
}

/// Decode raw file contents with a Hunspell encoding label ("UTF-8",
/// "ISO8859-1", "Windows-1252", ...). Undecodable bytes are replaced, not
/// fatal.
pub fn decode(bytes: &[u8], label: &str) -> Result<String, LoadError> {
    let encoding = encoding_rs::Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| LoadError::UnknownEncoding(label.to_string()))?;
    let (text, _, _) = encoding.decode(bytes);
    // Drop a BOM if the file carries one.
    Ok(text.trim_start_matches('\u{FEFF}').to_string())
}

/// Find the SET directive by scanning raw bytes, so the whole file can be
/// decoded with the right encoding in one go. Returns the declared label.
pub fn sniff_encoding(bytes: &[u8]) -> Option<String> {
    for line in bytes.split(|&b| b == b'\n') {
        let line = trim_ascii(line);
        if let Some(rest) = line.strip_prefix(b"SET") {
            let label = trim_ascii(rest);
            if !label.is_empty() && rest.first().is_some_and(|b| b.is_ascii_whitespace()) {
                return Some(String::from_utf8_lossy(label).to_string());
            }
        }
    }
    None
}

fn trim_ascii(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| !b.is_ascii_whitespace());
    let end = bytes.iter().rposition(|b| !b.is_ascii_whitespace());
    match (start, end) {
        (Some(s), Some(e)) => &bytes[s..=e],
        _ => &[],
    }
}
