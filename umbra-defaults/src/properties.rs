use std::fs;
use std::path::Path;

use crate::error::{DefaultsError, DefaultsResult};

/// One `key=value` declaration, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawEntry {
    /// The declared key.
    pub key: String,
    /// The raw, unparsed value.
    pub value: String,
}

impl RawEntry {
    /// Create an entry.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for RawEntry {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// Reader for line-oriented properties text.
///
/// - `#` and `!` start comment lines
/// - the key ends at the first unescaped `=`, `:` or blank (space, tab, form
///   feed); blanks and one `=`/`:` after it are skipped; a line with only a
///   key declares it with an empty value
/// - a trailing unescaped `\` joins the next line, minus its leading whitespace
/// - escapes: `\\`, `\=`, `\:`, `\ `, `\#`, `\!`, `\t`, `\n`, `\r`, `\uXXXX`
///
/// Duplicate keys are kept; later declarations win when the entries are built.
pub struct PropertiesSource;

impl PropertiesSource {
    /// Parse properties text into entries, in declaration order.
    pub fn parse(content: &str) -> Vec<RawEntry> {
        let mut entries = Vec::new();
        let mut lines = content.lines();

        while let Some(line) = lines.next() {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }

            let mut logical = trimmed.to_string();
            while ends_with_continuation(&logical) {
                logical.pop();
                match lines.next() {
                    Some(next) => logical.push_str(next.trim_start()),
                    None => break,
                }
            }

            let (key, value) = split_declaration(&logical);
            let key = unescape(key.trim_end());
            if key.is_empty() {
                log::debug!("PropertiesSource: skipping declaration without key: '{}'", line);
                continue;
            }
            entries.push(RawEntry::new(key, unescape(value.trim())));
        }

        entries
    }

    /// Read and parse an explicitly named properties file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> DefaultsResult<Vec<RawEntry>> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| DefaultsError::read_error(path, e))?;
        let entries = Self::parse(&content);
        log::debug!("PropertiesSource: read {} entries from {:?}", entries.len(), path);
        Ok(entries)
    }
}

/// Whether `line` ends in an odd number of backslashes.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Split a logical line into key and value.
///
/// The key ends at the first unescaped `=`, `:` or blank. Blanks after it and
/// one `=` or `:` among them are skipped.
fn split_declaration(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (index, c) in line.char_indices() {
        match c {
            '\\' if !escaped => escaped = true,
            '=' | ':' if !escaped => {
                key_end = index;
                break;
            },
            c if !escaped && is_blank(c) => {
                key_end = index;
                break;
            },
            _ => escaped = false,
        }
    }

    let rest = line[key_end..].trim_start_matches(is_blank);
    let rest = rest.strip_prefix(|c: char| c == '=' || c == ':').unwrap_or(rest);
    (&line[..key_end], rest.trim_start_matches(is_blank))
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{000C}')
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == 4 => out.push(decoded),
                    _ => {
                        log::warn!("PropertiesSource: malformed \\u escape '\\u{}'", hex);
                        out.push_str("\\u");
                        out.push_str(&hex);
                    },
                }
            },
            Some(other) => out.push(other),
            None => {},
        }
    }

    out
}
