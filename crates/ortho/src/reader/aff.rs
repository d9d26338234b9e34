// The `.aff` parser. One pass over the lines; directives that change how
// later lines are read (SET, FLAG, AF) take effect as soon as they are
// seen, which is how the format is meant to be consumed.

use ortho_core::flags::{Flag, FlagSet, FlagType};

use crate::aff::affix::{Condition, Prefix, Suffix};
use crate::aff::compound_rule::CompoundRule;
use crate::aff::patterns::{BreakPattern, CompoundPattern, ConvTable, Ignore, RepPattern};
use crate::aff::phonet::PhonetTable;
use crate::aff::Aff;

use super::{decode, sniff_encoding, LoadError};

/// Parse `.aff` file contents into an [`Aff`] with its indexes built.
pub fn read_aff(bytes: &[u8]) -> Result<Aff, LoadError> {
    let label = sniff_encoding(bytes).unwrap_or_else(|| "ISO8859-1".to_string());
    let text = decode(bytes, &label)?;

    let lines: Vec<(usize, String)> = text
        .lines()
        .enumerate()
        .map(|(n, line)| (n + 1, line.trim().to_string()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .collect();

    let mut aff = Aff { set: label, ..Aff::default() };
    let mut pos = 0;

    while pos < lines.len() {
        let (line_no, line) = &lines[pos];
        pos += 1;

        let parts: Vec<&str> = line.split_whitespace().collect();
        let name = normalize_directive(parts[0]);
        // Lines not starting with an upper-case directive name are junk
        // that some published dictionaries carry; skip them.
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_uppercase()) {
            continue;
        }
        let value = parts.get(1).copied().unwrap_or("");

        match name.as_str() {
            // -- General ----------------------------------------------------
            "SET" => aff.set = value.to_string(),
            "FLAG" => aff.flag_type = FlagType::from_directive(value),
            "LANG" => aff.lang = Some(value.to_string()),
            "WORDCHARS" => aff.wordchars = Some(value.to_string()),
            "IGNORE" => aff.ignore = Some(Ignore::new(value)),
            "CHECKSHARPS" => aff.check_sharps = true,
            "FORBIDDENWORD" => aff.forbidden_word = parse_flag(&aff, value),

            // -- Suggestions ------------------------------------------------
            "KEY" => aff.key = value.to_string(),
            "TRY" => aff.try_chars = value.to_string(),
            "NOSUGGEST" => aff.no_suggest = parse_flag(&aff, value),
            "KEEPCASE" => aff.keep_case = parse_flag(&aff, value),
            "NOSPLITSUGS" => aff.no_split_sugs = true,
            "SUGSWITHDOTS" => aff.sugs_with_dots = true,
            "MAXCPDSUGS" => aff.max_cpd_sugs = parse_int(value, *line_no)?,
            "MAXDIFF" => aff.max_diff = parse_int(value, *line_no)? as i32,
            "ONLYMAXDIFF" => aff.only_max_diff = true,
            "MAXNGRAMSUGS" => aff.max_ngram_sugs = parse_int(value, *line_no)?,
            "REP" => {
                for row in read_table(&lines, &mut pos, "REP", value, *line_no)? {
                    if row.len() >= 2 {
                        aff.rep.push(RepPattern::parse(&row[0], &row[1]));
                    }
                }
            }
            "MAP" => {
                for row in read_table(&lines, &mut pos, "MAP", value, *line_no)? {
                    if let Some(group) = row.first() {
                        aff.map_chars.push(parse_map_group(group));
                    }
                }
            }
            "PHONE" => {
                let rows: Vec<(String, String)> =
                    read_table(&lines, &mut pos, "PHONE", value, *line_no)?
                        .into_iter()
                        .filter(|row| row.len() >= 2)
                        .map(|row| (row[0].clone(), row[1].clone()))
                        .collect();
                aff.phone = Some(PhonetTable::new(&rows));
            }

            // -- Stemming ---------------------------------------------------
            "PFX" => read_prefixes(&mut aff, &lines, &mut pos, &parts, *line_no)?,
            "SFX" => read_suffixes(&mut aff, &lines, &mut pos, &parts, *line_no)?,
            "NEEDAFFIX" => aff.need_affix = parse_flag(&aff, value),
            "CIRCUMFIX" => aff.circumfix = parse_flag(&aff, value),
            "COMPLEXPREFIXES" => aff.complex_prefixes = true,
            "FULLSTRIP" => aff.full_strip = true,

            // -- Compounding ------------------------------------------------
            "BREAK" => {
                aff.breaks = read_table(&lines, &mut pos, "BREAK", value, *line_no)?
                    .iter()
                    .filter_map(|row| row.first())
                    .map(|pattern| BreakPattern::parse(pattern))
                    .collect();
            }
            "COMPOUNDRULE" => {
                let flag_type = aff.flag_type;
                aff.compound_rules = read_table(&lines, &mut pos, "COMPOUNDRULE", value, *line_no)?
                    .iter()
                    .filter_map(|row| row.first())
                    .map(|rule| CompoundRule::parse(rule, flag_type))
                    .collect();
            }
            "COMPOUNDMIN" => aff.compound_min = parse_int(value, *line_no)?,
            "COMPOUNDWORDMAX" => aff.compound_word_max = Some(parse_int(value, *line_no)?),
            "COMPOUNDFLAG" => aff.compound_flag = parse_flag(&aff, value),
            "COMPOUNDBEGIN" => aff.compound_begin = parse_flag(&aff, value),
            "COMPOUNDMIDDLE" => aff.compound_middle = parse_flag(&aff, value),
            "COMPOUNDEND" => aff.compound_end = parse_flag(&aff, value),
            "ONLYINCOMPOUND" => aff.only_in_compound = parse_flag(&aff, value),
            "COMPOUNDPERMITFLAG" => aff.compound_permit = parse_flag(&aff, value),
            "COMPOUNDFORBIDFLAG" => aff.compound_forbid = parse_flag(&aff, value),
            "COMPOUNDROOT" => aff.compound_root = parse_flag(&aff, value),
            "FORCEUCASE" => aff.force_ucase = parse_flag(&aff, value),
            "CHECKCOMPOUNDCASE" => aff.check_compound_case = true,
            "CHECKCOMPOUNDDUP" => aff.check_compound_dup = true,
            "CHECKCOMPOUNDREP" => aff.check_compound_rep = true,
            "CHECKCOMPOUNDTRIPLE" => aff.check_compound_triple = true,
            "SIMPLIFIEDTRIPLE" => aff.simplified_triple = true,
            "CHECKCOMPOUNDPATTERN" => {
                let flag_type = aff.flag_type;
                aff.check_compound_pattern =
                    read_table(&lines, &mut pos, "CHECKCOMPOUNDPATTERN", value, *line_no)?
                        .iter()
                        .filter(|row| row.len() >= 2)
                        .map(|row| {
                            CompoundPattern::parse(
                                &row[0],
                                &row[1],
                                row.get(2).map(String::as_str),
                                flag_type,
                            )
                        })
                        .collect();
            }
            "COMPOUNDSYLLABLE" => {
                if let (Ok(count), Some(vowels)) =
                    (value.parse::<usize>(), parts.get(2))
                {
                    aff.compound_syllable = Some((count, vowels.to_string()));
                }
            }
            "SYLLABLENUM" => aff.syllable_num = Some(value.to_string()),

            // -- Pre/post-processing ----------------------------------------
            "ICONV" => {
                aff.iconv = Some(read_conv(&lines, &mut pos, "ICONV", value, *line_no)?);
            }
            "OCONV" => {
                aff.oconv = Some(read_conv(&lines, &mut pos, "OCONV", value, *line_no)?);
            }

            // -- Aliasing ---------------------------------------------------
            "AF" => {
                let flag_type = aff.flag_type;
                aff.af = read_table(&lines, &mut pos, "AF", value, *line_no)?
                    .iter()
                    .filter_map(|row| row.first())
                    .map(|flags| FlagSet::parse(flag_type, flags))
                    .collect();
            }
            "AM" => {
                aff.am = read_table(&lines, &mut pos, "AM", value, *line_no)?;
            }

            // -- Other ------------------------------------------------------
            "WARN" => aff.warn = parse_flag(&aff, value),
            "FORBIDWARN" => aff.forbid_warn = true,
            "SUBSTANDARD" => aff.substandard = parse_flag(&aff, value),

            // Unknown directives are skipped silently; an option nobody
            // acts on cannot invalidate the dictionary.
            _ => {}
        }
    }

    aff.finish();
    Ok(aff)
}

/// Outdated directive names still found in published dictionaries.
fn normalize_directive(name: &str) -> String {
    match name {
        "PSEUDOROOT" => "NEEDAFFIX".to_string(),
        "COMPOUNDLAST" => "COMPOUNDEND".to_string(),
        _ => name.to_string(),
    }
}

fn parse_flag(aff: &Aff, value: &str) -> Option<Flag> {
    aff.flag_type.parse_one(value)
}

fn parse_int(value: &str, line: usize) -> Result<usize, LoadError> {
    value.parse().map_err(|_| LoadError::Malformed {
        line,
        message: format!("expected a number, found {value:?}"),
    })
}

/// Read the `count` continuation lines of a table directive. Each returned
/// row is the line's fields minus the repeated directive name. Stops early
/// if a continuation line does not repeat the directive (truncated tables
/// occur in the wild).
fn read_table(
    lines: &[(usize, String)],
    pos: &mut usize,
    directive: &str,
    count: &str,
    line_no: usize,
) -> Result<Vec<Vec<String>>, LoadError> {
    let count = parse_int(count, line_no)?;
    let mut rows = Vec::with_capacity(count);
    for _ in 0..count {
        let Some((_, line)) = lines.get(*pos) else { break };
        let mut fields = line.split_whitespace();
        if fields.next() != Some(directive) {
            break;
        }
        rows.push(fields.map(str::to_string).collect());
        *pos += 1;
    }
    Ok(rows)
}

fn read_conv(
    lines: &[(usize, String)],
    pos: &mut usize,
    directive: &str,
    count: &str,
    line_no: usize,
) -> Result<ConvTable, LoadError> {
    let pairs: Vec<(String, String)> = read_table(lines, pos, directive, count, line_no)?
        .into_iter()
        .filter(|row| row.len() >= 2)
        .map(|row| (row[0].clone(), row[1].clone()))
        .collect();
    Ok(ConvTable::new(&pairs))
}

/// Split a MAP group into members: single characters, or parenthesized
/// multi-character sequences like `(ss)`.
fn parse_map_group(group: &str) -> Vec<String> {
    let mut members = Vec::new();
    let mut chars = group.chars();
    while let Some(c) = chars.next() {
        if c == '(' {
            let mut member = String::new();
            for cc in chars.by_ref() {
                if cc == ')' {
                    break;
                }
                member.push(cc);
            }
            if !member.is_empty() {
                members.push(member);
            }
        } else {
            members.push(c.to_string());
        }
    }
    members
}

fn read_prefixes(
    aff: &mut Aff,
    lines: &[(usize, String)],
    pos: &mut usize,
    header: &[&str],
    line_no: usize,
) -> Result<(), LoadError> {
    let (flag, cross_product, count) = affix_header(aff, header, line_no)?;
    for row in read_table(lines, pos, "PFX", &count, line_no)? {
        if row.len() < 3 {
            continue;
        }
        let (strip, add, flags, condition) = affix_fields(aff, &row);
        aff.prefixes.push(Prefix {
            flag,
            cross_product,
            strip,
            add,
            condition: Condition::parse(&condition),
            flags,
        });
    }
    Ok(())
}

fn read_suffixes(
    aff: &mut Aff,
    lines: &[(usize, String)],
    pos: &mut usize,
    header: &[&str],
    line_no: usize,
) -> Result<(), LoadError> {
    let (flag, cross_product, count) = affix_header(aff, header, line_no)?;
    for row in read_table(lines, pos, "SFX", &count, line_no)? {
        if row.len() < 3 {
            continue;
        }
        let (strip, add, flags, condition) = affix_fields(aff, &row);
        aff.suffixes.push(Suffix {
            flag,
            cross_product,
            strip,
            add,
            condition: Condition::parse(&condition),
            flags,
        });
    }
    Ok(())
}

/// Parse a `PFX F Y 3` header into (flag, cross-product, count).
fn affix_header(aff: &Aff, header: &[&str], line_no: usize) -> Result<(Flag, bool, String), LoadError> {
    let flag = header
        .get(1)
        .and_then(|v| aff.flag_type.parse_one(v))
        .ok_or_else(|| LoadError::Malformed {
            line: line_no,
            message: "affix header without a flag".to_string(),
        })?;
    let cross_product = header.get(2).copied() == Some("Y");
    let count = header.get(3).copied().unwrap_or("0").to_string();
    Ok((flag, cross_product, count))
}

/// Parse the shared fields of an affix continuation row:
/// `<flag> <strip> <add[/flags]> [condition] [morph...]`.
fn affix_fields(aff: &Aff, row: &[String]) -> (String, String, FlagSet, String) {
    let strip = if row[1] == "0" { String::new() } else { row[1].clone() };
    let (add_raw, flags_raw) = match row[2].split_once('/') {
        Some((add, flags)) => (add, flags),
        None => (row[2].as_str(), ""),
    };
    let add = if add_raw == "0" { String::new() } else { add_raw.to_string() };
    let flags = aff.parse_flags(flags_raw);
    let condition = row.get(3).cloned().unwrap_or_else(|| ".".to_string());
    (strip, add, flags, condition)
}
