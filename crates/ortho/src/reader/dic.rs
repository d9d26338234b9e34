// The `.dic` parser. The first line is an approximate entry count; every
// other line is `stem[/flags] [tag:value ...]`, with `\/` escaping a
// literal slash in the stem, numeric AF/AM alias references, and `ph:`
// fields feeding both the entry's alternate spellings and the REP table.

use hashbrown::HashMap;

use crate::aff::patterns::RepPattern;
use crate::aff::Aff;
use crate::dic::{Dic, Word};

use super::{decode, LoadError};

/// Parse `.dic` file contents. Takes `aff` mutably: `ph:` fields append
/// rows to the replacement table.
pub fn read_dic(bytes: &[u8], aff: &mut Aff) -> Result<Dic, LoadError> {
    let text = decode(bytes, &aff.set)?;
    let mut lines = text.lines();

    // The count line is advisory; use it for preallocation when present.
    let mut capacity = 0;
    let mut first_entry: Option<&str> = None;
    for line in lines.by_ref() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.chars().all(|c| c.is_ascii_digit()) {
            capacity = line.parse().unwrap_or(0);
        } else {
            first_entry = Some(line);
        }
        break;
    }

    let mut dic = Dic::with_capacity(capacity);
    for line in first_entry.into_iter().chain(lines) {
        // Tab-indented lines are morphology continuations of the previous
        // entry, not entries of their own.
        if line.starts_with('\t') {
            continue;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        read_entry(line, aff, &mut dic);
    }
    Ok(dic)
}

fn read_entry(line: &str, aff: &mut Aff, dic: &mut Dic) {
    let mut word_fields: Vec<&str> = Vec::new();
    let mut morph_fields: Vec<&str> = Vec::new();
    for field in line.split_whitespace() {
        if word_fields.is_empty() || !is_morph_field(field) {
            word_fields.push(field);
        } else {
            morph_fields.push(field);
        }
    }

    // Stems may contain spaces ("a lot"); everything that is not a
    // morphology field belongs to the stem.
    let word_text = word_fields.join(" ");
    let (mut stem, flags_text) = split_stem_flags(&word_text);
    let flags = aff.parse_flags(&flags_text);

    let mut data: HashMap<String, Vec<String>> = HashMap::new();
    for field in morph_fields {
        if field.chars().all(|c| c.is_ascii_digit()) {
            // AM alias: expand to the aliased tag list.
            if let Ok(n) = field.parse::<usize>() {
                if n >= 1 && n <= aff.am.len() {
                    for aliased in aff.am[n - 1].clone() {
                        push_morph(&mut data, &aliased);
                    }
                }
            }
        } else {
            push_morph(&mut data, field);
        }
    }

    if let Some(ignore) = &aff.ignore {
        stem = ignore.strip(&stem);
    }
    if stem.is_empty() {
        return;
    }

    // `ph:` fields describe frequent misspellings of this entry. They feed
    // the REP table; the plain ones are also kept as alternate spellings
    // for the similarity-based suggesters.
    let mut alt_spellings = Vec::new();
    for alt in data.get("ph").cloned().unwrap_or_default() {
        if let Some(bare) = alt.strip_suffix('*') {
            // "pretty ph:prity*" maps the endingless forms onto each
            // other: prit -> prett.
            let from = drop_last_char(bare);
            let to = drop_last_char(&stem);
            if !from.is_empty() && !to.is_empty() {
                aff.rep.push(RepPattern::parse(&from, &to));
            }
        } else if let Some((from, to)) = alt.split_once("->") {
            aff.rep.push(RepPattern::parse(from, to));
        } else {
            aff.rep.push(RepPattern::parse(&alt, &stem));
            alt_spellings.push(alt);
        }
    }

    let captype = aff.casing.guess(&stem);
    let lowercase = if captype == ortho_core::casing::Captype::No {
        vec![stem.clone()]
    } else {
        aff.casing.lower(&stem)
    };

    dic.insert(
        Word { stem, flags, data, alt_spellings, captype },
        &lowercase,
    );
}

/// A morphology field is `xx:value` (two-character tag) or a bare number
/// (AM alias reference).
fn is_morph_field(field: &str) -> bool {
    if field.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }
    let chars: Vec<char> = field.chars().take(3).collect();
    chars.len() == 3
        && chars[2] == ':'
        && chars[0].is_alphanumeric()
        && chars[1].is_alphanumeric()
}

fn push_morph(data: &mut HashMap<String, Vec<String>>, field: &str) {
    if let Some((tag, value)) = field.split_once(':') {
        if !value.is_empty() {
            data.entry(tag.to_string()).or_default().push(value.to_string());
        }
    }
}

/// Split `stem/flags`, honoring `\/` escapes inside the stem.
fn split_stem_flags(text: &str) -> (String, String) {
    let mut stem = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'/') => {
                stem.push('/');
                chars.next();
            }
            '/' => return (stem, chars.collect()),
            _ => stem.push(c),
        }
    }
    (stem, String::new())
}

fn drop_last_char(text: &str) -> String {
    let mut chars = text.chars();
    chars.next_back();
    chars.as_str().to_string()
}
