//! BibTeX parser implementation using nom
//!
//! Handles the subset of BibTeX that real-world bibliography exports use:
//! - `@string` macro definitions and bare macro references
//! - `@preamble` and `@comment` blocks (skipped)
//! - `{...}` and `(...)` entry delimiters
//! - Braced, quoted and numeric field values
//! - `#` concatenation
//!
//! Unlike a lenient importer, any malformed entry is reported as an error
//! and nothing is returned.

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::map,
    IResult,
};
use std::collections::HashMap;

use super::record::Record;

/// Error for a source that cannot be parsed, with a 1-based position
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}, column {column}: {message}")]
pub struct ParseError {
    pub line: u32,
    pub column: u32,
    pub message: String,
}

/// Macro table built from `@string` definitions, keyed lower-case
type Macros = HashMap<String, String>;

/// Result of parsing one `@` block
enum Block {
    Entry(Record),
    Macro(String, String),
    Skipped,
}

/// Parse a complete BibTeX source into records, in source order
pub fn parse(input: &str) -> Result<Vec<Record>, ParseError> {
    let mut records = Vec::new();
    let mut macros = Macros::new();
    let mut remaining = skip_to_next_block(input);

    while !remaining.is_empty() {
        match parse_block(remaining, &macros) {
            Ok((rest, block)) => {
                match block {
                    Block::Entry(record) => records.push(record),
                    Block::Macro(name, value) => {
                        macros.insert(name, value);
                    }
                    Block::Skipped => {}
                }
                remaining = skip_to_next_block(rest);
            }
            Err(_) => return Err(error_at(input, remaining)),
        }
    }

    Ok(records)
}

/// Advance past whitespace, `%` line comments and stray text to the next `@`
fn skip_to_next_block(input: &str) -> &str {
    let mut rest = input;
    loop {
        rest = rest.trim_start();
        if rest.starts_with('%') {
            let end = rest.find('\n').unwrap_or(rest.len());
            rest = &rest[end..];
            continue;
        }
        if rest.is_empty() || rest.starts_with('@') {
            return rest;
        }
        // Text outside of blocks is ignored, as BibTeX does
        match rest.find(['@', '%']) {
            Some(pos) => rest = &rest[pos..],
            None => return "",
        }
    }
}

fn error_at(input: &str, remaining: &str) -> ParseError {
    let offset = input.len() - remaining.len();
    let before = &input[..offset];
    let line = before.matches('\n').count() as u32 + 1;
    let line_start = before.rfind('\n').map_or(0, |p| p + 1);
    let column = before[line_start..].chars().count() as u32 + 1;

    let kind: String = remaining[1..]
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    let message = if kind.is_empty() {
        "expected an entry type after '@'".to_string()
    } else {
        format!("malformed @{} block", kind.to_lowercase())
    };

    ParseError {
        line,
        column,
        message,
    }
}

/// Parse one `@` block (entry, string, preamble, or comment)
fn parse_block<'a>(input: &'a str, macros: &Macros) -> IResult<&'a str, Block> {
    let (rest, _) = char('@')(input)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, block_type) = take_while1(|c: char| c.is_ascii_alphanumeric())(rest)?;

    match block_type.to_lowercase().as_str() {
        "comment" => {
            let (rest, _) = parse_comment_body(rest)?;
            Ok((rest, Block::Skipped))
        }
        "preamble" => {
            let (rest, close) = open_delimiter(rest)?;
            let (rest, _) = parse_value(rest, macros)?;
            let (rest, _) = multispace0(rest)?;
            let (rest, _) = char(close)(rest)?;
            Ok((rest, Block::Skipped))
        }
        "string" => {
            let (rest, close) = open_delimiter(rest)?;
            let (rest, (name, value)) = parse_field(rest, macros)?;
            let (rest, _) = multispace0(rest)?;
            let (rest, _) = char(close)(rest)?;
            Ok((rest, Block::Macro(name.to_lowercase(), value)))
        }
        _ => {
            let (rest, record) = parse_entry_body(rest, block_type, macros)?;
            Ok((rest, Block::Entry(record)))
        }
    }
}

/// Accept `{` or `(` and return the matching close character
fn open_delimiter(input: &str) -> IResult<&str, char> {
    let (rest, _) = multispace0(input)?;
    let (rest, open) = alt((char('{'), char('(')))(rest)?;
    let close = if open == '{' { '}' } else { ')' };
    let (rest, _) = multispace0(rest)?;
    Ok((rest, close))
}

/// A `@comment` is either a braced group or runs to the end of the line
fn parse_comment_body(input: &str) -> IResult<&str, ()> {
    let (rest, _) = multispace0(input)?;
    if rest.starts_with('{') {
        let (rest, _) = braced_span(rest)?;
        Ok((rest, ()))
    } else {
        let end = rest.find('\n').unwrap_or(rest.len());
        Ok((&rest[end..], ()))
    }
}

fn parse_entry_body<'a>(
    input: &'a str,
    entry_type: &str,
    macros: &Macros,
) -> IResult<&'a str, Record> {
    let (rest, close) = open_delimiter(input)?;
    let (rest, cite_key) = take_while1(|c: char| {
        !c.is_whitespace() && c != ',' && c != '}' && c != ')' && c != '{'
    })(rest)?;
    let (rest, _) = multispace0(rest)?;

    let mut record = Record::new(cite_key, entry_type);

    // An entry may consist of just a key
    if let Some(rest) = rest.strip_prefix(close) {
        return Ok((rest, record));
    }
    let (mut remaining, _) = char(',')(rest)?;

    loop {
        let (rest, _) = multispace0(remaining)?;
        if let Some(rest) = rest.strip_prefix(close) {
            return Ok((rest, record));
        }

        let (rest, (key, value)) = parse_field(rest, macros)?;
        record.add_field(key, value);

        let (rest, _) = multispace0(rest)?;
        remaining = rest.strip_prefix(',').unwrap_or(rest);
        if remaining.len() == rest.len() && !rest.starts_with(close) {
            // Fields must be separated by commas
            return Err(nom::Err::Error(nom::error::Error::new(
                rest,
                nom::error::ErrorKind::Char,
            )));
        }
    }
}

/// Parse `key = value`
fn parse_field<'a>(input: &'a str, macros: &Macros) -> IResult<&'a str, (String, String)> {
    let (rest, _) = multispace0(input)?;
    let (rest, key) = take_while1(is_name_char)(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char('=')(rest)?;
    let (rest, value) = parse_value(rest, macros)?;

    Ok((rest, (key.to_string(), collapse_whitespace(&value))))
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_-:.+".contains(c)
}

/// Parse a value: parts joined by `#`, each braced, quoted, numeric or a macro
fn parse_value<'a>(input: &'a str, macros: &Macros) -> IResult<&'a str, String> {
    let mut value = String::new();
    let mut remaining = input;

    loop {
        let (rest, _) = multispace0(remaining)?;
        let (rest, part) = alt((
            map(braced_span, |s: &str| s[1..s.len() - 1].to_string()),
            map(quoted_span, |s: &str| s[1..s.len() - 1].to_string()),
            map(take_while1(|c: char| c.is_ascii_digit()), |s: &str| {
                s.to_string()
            }),
            map(take_while1(is_name_char), |name: &str| {
                macros
                    .get(&name.to_lowercase())
                    .cloned()
                    .unwrap_or_else(|| name.to_string())
            }),
        ))(rest)?;
        value.push_str(&part);

        let (rest, _) = multispace0(rest)?;
        match rest.strip_prefix('#') {
            Some(next) => remaining = next,
            None => return Ok((rest, value)),
        }
    }
}

/// Match a balanced `{...}` group, returning it including the outer braces.
/// Every brace counts toward the balance, backslash-escaped or not, as in BibTeX.
fn braced_span(input: &str) -> IResult<&str, &str> {
    if !input.starts_with('{') {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Char,
        )));
    }

    let mut depth = 0usize;
    for (pos, byte) in input.bytes().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&input[pos + 1..], &input[..pos + 1]));
                }
            }
            _ => {}
        }
    }

    Err(nom::Err::Failure(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Eof,
    )))
}

/// Match a `"..."` value, returning it including the quotes. Quotes nested in
/// braces or escaped with a backslash do not terminate the value.
fn quoted_span(input: &str) -> IResult<&str, &str> {
    if !input.starts_with('"') {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Char,
        )));
    }

    let bytes = input.as_bytes();
    let mut depth = 0usize;
    let mut pos = 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'"' if depth == 0 => return Ok((&input[pos + 1..], &input[..pos + 1])),
            b'{' => depth += 1,
            b'}' => depth = depth.saturating_sub(1),
            b'\\' => pos += 1,
            _ => {}
        }
        pos += 1;
    }

    Err(nom::Err::Failure(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Eof,
    )))
}

/// Collapse runs of whitespace (including line breaks) into single spaces
fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
