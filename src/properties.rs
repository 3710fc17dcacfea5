//! Reader and writer for the Java `.properties` format used by the key to path manifest.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Failures while parsing a properties document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropertiesError {
  /// A `\u` escape was not followed by four hexadecimal digits.
  #[error("malformed \\uxxxx escape in `{0}`")]
  MalformedUnicodeEscape(String),
}

/// Serialize `entries` as `key=value` lines below an optional comment header.
///
/// Keys come out in map order, so the same map always produces the same document.
pub fn store(entries: &BTreeMap<String, String>, header: Option<&str>) -> String {
  let mut out = String::new();
  if let Some(header) = header {
    for line in header.lines() {
      out.push('#');
      escape_into(&mut out, line, EscapeMode::Comment);
      out.push('\n');
    }
  }

  for (key, value) in entries {
    escape_into(&mut out, key, EscapeMode::Key);
    out.push('=');
    escape_into(&mut out, value, EscapeMode::Value);
    out.push('\n');
  }

  out
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum EscapeMode {
  Key,
  Value,
  Comment,
}

fn escape_into(out: &mut String, text: &str, mode: EscapeMode) {
  for (index, c) in text.chars().enumerate() {
    match c {
      _ if mode == EscapeMode::Comment && (' '..='~').contains(&c) => out.push(c),
      ' ' if mode == EscapeMode::Key || index == 0 => out.push_str("\\ "),
      '\\' => out.push_str("\\\\"),
      '\t' => out.push_str("\\t"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\u{c}' => out.push_str("\\f"),
      '=' | ':' | '#' | '!' => {
        out.push('\\');
        out.push(c);
      }
      ' '..='~' => out.push(c),
      _ => {
        let mut units = [0u16; 2];
        for unit in c.encode_utf16(&mut units) {
          let _ = write!(out, "\\u{:04X}", unit);
        }
      }
    }
  }
}

/// Parse a properties document. Later duplicates of a key replace earlier ones.
pub fn load(text: &str) -> Result<BTreeMap<String, String>, PropertiesError> {
  let mut entries = BTreeMap::new();
  for line in logical_lines(text) {
    let (key, value) = split_key_value(&line);
    entries.insert(unescape(key)?, unescape(value)?);
  }
  Ok(entries)
}

fn is_blank(c: char) -> bool {
  matches!(c, ' ' | '\t' | '\u{c}')
}

fn line_terminator() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| Regex::new(r"\r\n|\n|\r").expect("invalid line terminator regex"))
}

/// Join continuation lines and drop comments and blank lines.
///
/// Natural lines end at `\r\n`, `\n` or a lone `\r`.
fn logical_lines(text: &str) -> Vec<String> {
  let mut lines = Vec::new();
  let mut current: Option<String> = None;

  for natural in line_terminator().split(text) {
    let trimmed = natural.trim_start_matches(is_blank);

    if current.is_none() && (trimmed.is_empty() || trimmed.starts_with(['#', '!'])) {
      continue;
    }

    let trailing_backslashes = trimmed.chars().rev().take_while(|c| *c == '\\').count();
    let continues = trailing_backslashes % 2 == 1;
    let content = if continues {
      &trimmed[..trimmed.len() - 1]
    } else {
      trimmed
    };

    let line = current.get_or_insert_with(String::new);
    line.push_str(content);

    if !continues {
      lines.extend(current.take());
    }
  }

  lines.extend(current);
  lines
}

fn split_key_value(line: &str) -> (&str, &str) {
  let mut escaped = false;
  let mut key_end = line.len();

  for (index, c) in line.char_indices() {
    if escaped {
      escaped = false;
    } else if c == '\\' {
      escaped = true;
    } else if c == '=' || c == ':' || is_blank(c) {
      key_end = index;
      break;
    }
  }

  let key = &line[..key_end];
  let rest = line[key_end..].trim_start_matches(is_blank);
  let rest = rest
    .strip_prefix(['=', ':'])
    .map(|value| value.trim_start_matches(is_blank))
    .unwrap_or(rest);
  (key, rest)
}

fn unescape(text: &str) -> Result<String, PropertiesError> {
  let mut units: Vec<u16> = Vec::with_capacity(text.len());
  let mut chars = text.chars();

  while let Some(c) = chars.next() {
    if c != '\\' {
      let mut buf = [0u16; 2];
      units.extend_from_slice(c.encode_utf16(&mut buf));
      continue;
    }

    let Some(escaped) = chars.next() else {
      break;
    };
    let resolved = match escaped {
      't' => '\t',
      'n' => '\n',
      'r' => '\r',
      'f' => '\u{c}',
      'u' => {
        let digits: String = chars.by_ref().take(4).collect();
        let unit = (digits.len() == 4)
          .then(|| u16::from_str_radix(&digits, 16).ok())
          .flatten()
          .ok_or_else(|| PropertiesError::MalformedUnicodeEscape(text.to_string()))?;
        units.push(unit);
        continue;
      }
      other => other,
    };
    let mut buf = [0u16; 2];
    units.extend_from_slice(resolved.encode_utf16(&mut buf));
  }

  Ok(String::from_utf16_lossy(&units))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect()
  }

  #[test]
  fn stores_sorted_lines_below_header() {
    let entries = map(&[("images.logo_png", "images/logo.png"), ("a_txt", "a.txt")]);
    let text = store(&entries, Some("Generated manifest"));
    assert_eq!(
      text,
      "#Generated manifest\na_txt=a.txt\nimages.logo_png=images/logo.png\n"
    );
  }

  #[test]
  fn escapes_metacharacters_and_non_ascii() {
    let entries = map(&[("my key=1", " café:#!")]);
    let text = store(&entries, None);
    assert_eq!(text, "my\\ key\\=1=\\ caf\\u00E9\\:\\#\\!\n");
  }

  #[test]
  fn escapes_supplementary_characters_as_surrogate_pairs() {
    let text = store(&map(&[("emoji", "\u{1F600}.png")]), None);
    assert_eq!(text, "emoji=\\uD83D\\uDE00.png\n");
    assert_eq!(load(&text).unwrap(), map(&[("emoji", "\u{1F600}.png")]));
  }

  #[test]
  fn loads_what_it_stores() {
    let entries = map(&[
      ("fonts.open sans_ttf", "fonts/open sans.ttf"),
      ("notes_txt", "  leading spaces.txt"),
      ("tab", "a\tb"),
      ("docs.r\u{e9}sum\u{e9}_pdf", "docs/r\u{e9}sum\u{e9}.pdf"),
    ]);
    assert_eq!(load(&store(&entries, Some("header"))).unwrap(), entries);
  }

  #[test]
  fn parses_java_properties_syntax() {
    let text = "# comment\n! other comment\n\n  spaced : value one\ncolon:two\nwhite   three\r\nmulti = first \\\n    second\nempty\n";
    let parsed = load(text).unwrap();
    assert_eq!(
      parsed,
      map(&[
        ("spaced", "value one"),
        ("colon", "two"),
        ("white", "three"),
        ("multi", "first second"),
        ("empty", ""),
      ])
    );
  }

  #[test]
  fn accepts_every_line_terminator() {
    let parsed = load("a=1\rb=2\r\nc=3\nd=first \\\r  second\r").unwrap();
    assert_eq!(
      parsed,
      map(&[("a", "1"), ("b", "2"), ("c", "3"), ("d", "first second")])
    );
  }

  #[test]
  fn later_duplicates_replace_earlier_ones() {
    let parsed = load("key=first\nkey=second\n").unwrap();
    assert_eq!(parsed.get("key").map(String::as_str), Some("second"));
  }

  #[test]
  fn rejects_malformed_unicode_escape() {
    assert!(matches!(
      load("key=\\u12"),
      Err(PropertiesError::MalformedUnicodeEscape(_))
    ));
  }
}
