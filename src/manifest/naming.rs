//! Derive lookup keys and Java constant names from root-relative resource paths.

use std::sync::OnceLock;

use regex::Regex;

/// Java keywords and literals that cannot be used as field names.
pub const JAVA_RESERVED_WORDS: &[&str] = &[
  "_", "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
  "const", "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
  "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
  "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
  "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
  "throws", "transient", "true", "try", "void", "volatile", "while",
];

fn whitespace_runs() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| Regex::new(r"\s+").expect("invalid whitespace regex"))
}

/// Characters Java accepts after the first character of an identifier.
const IDENTIFIER_PART_CLASS: &str = r"\p{L}\p{Nl}\p{Nd}\p{Mn}\p{Mc}\p{Pc}$";

/// Characters Java accepts as the first character of an identifier.
const IDENTIFIER_START_CLASS: &str = r"\p{L}\p{Nl}\p{Pc}$";

fn non_identifier_char() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| {
    Regex::new(&format!("[^{IDENTIFIER_PART_CLASS}]")).expect("invalid identifier char regex")
  })
}

fn java_identifier() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| {
    Regex::new(&format!("^[{IDENTIFIER_START_CLASS}][{IDENTIFIER_PART_CLASS}]*$"))
      .expect("invalid java identifier regex")
  })
}

// Digits and combining marks may continue an identifier but not start one.
fn leading_non_start() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| {
    Regex::new(r"^[\p{Nd}\p{Mn}\p{Mc}]").expect("invalid leading char regex")
  })
}

/// Dotted key of a resource in the properties manifest.
///
/// Dots become underscores first, then path separators become dots, so
/// `images/logo.png` maps to `images.logo_png`.
pub fn lookup_key(relative_path: &str) -> String {
  relative_path.replace('.', "_").replace(['/', '\\'], ".")
}

/// Java constant name of a resource in the embedded class.
///
/// Dots, separators and whitespace runs become `_`, remaining characters that cannot appear
/// in a Java identifier become `_`, and the result is lower-cased. A leading digit (any
/// Unicode decimal digit) or combining mark gets a `$` prefix; a reserved word is then
/// wrapped as `$name$`.
pub fn identifier_name(relative_path: &str) -> String {
  let flattened = relative_path.replace('.', "_").replace(['/', '\\'], "_");
  let flattened = whitespace_runs().replace_all(&flattened, "_");

  let mut name = non_identifier_char()
    .replace_all(&flattened, "_")
    .to_lowercase();

  if leading_non_start().is_match(&name) {
    name = format!("${name}");
  }

  if collides_with_reserved_word(&name) {
    name = format!("${name}$");
  }

  name
}

/// Whether a generated name equals a reserved word or starts with one followed by `_`.
///
/// The second case catches names like `class_txt` (from `class.txt`).
pub fn collides_with_reserved_word(name: &str) -> bool {
  let leading = name.split('_').next().unwrap_or_default();
  JAVA_RESERVED_WORDS
    .iter()
    .any(|word| *word == name || *word == leading)
}

/// Characters allowed after the first character of a Java identifier.
pub fn is_java_identifier_part(c: char) -> bool {
  !non_identifier_char().is_match(c.encode_utf8(&mut [0; 4]))
}

/// Whether `value` can be used verbatim as a Java identifier.
pub fn is_java_identifier(value: &str) -> bool {
  java_identifier().is_match(value) && !JAVA_RESERVED_WORDS.contains(&value)
}

/// Whether `value` is a dotted Java package name. The empty string is the default package.
pub fn is_java_package(value: &str) -> bool {
  value.is_empty() || value.split('.').all(is_java_identifier)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lookup_key_dots_extensions_before_separators() {
    assert_eq!(lookup_key("icons/app.png"), "icons.app_png");
    assert_eq!(lookup_key("images/logo.png"), "images.logo_png");
    assert_eq!(lookup_key("a/b.c/d.tar.gz"), "a.b_c.d_tar_gz");
    assert_eq!(lookup_key("nested\\win.txt"), "nested.win_txt");
  }

  #[test]
  fn identifier_name_prefixes_leading_digits() {
    assert_eq!(identifier_name("2fast.txt"), "$2fast_txt");
    assert_eq!(identifier_name("9/lives.png"), "$9_lives_png");
  }

  #[test]
  fn identifier_name_wraps_reserved_words() {
    assert_eq!(identifier_name("class.txt"), "$class_txt$");
    assert_eq!(identifier_name("CLASS"), "$class$");
    assert_eq!(identifier_name("int"), "$int$");
    assert_eq!(identifier_name("data/class.txt"), "data_class_txt");
    assert_eq!(identifier_name("classic.txt"), "classic_txt");
  }

  #[test]
  fn identifier_name_flattens_separators_and_whitespace() {
    assert_eq!(identifier_name("Images/My  Logo.PNG"), "images_my_logo_png");
    assert_eq!(identifier_name("fonts/open-sans.ttf"), "fonts_open_sans_ttf");
    assert_eq!(identifier_name("dir\\file.txt"), "dir_file_txt");
  }

  #[test]
  fn identifier_name_keeps_only_java_identifier_chars() {
    assert_eq!(identifier_name("file\u{b2}.txt"), "file__txt");
    assert_eq!(identifier_name("\u{bd}.txt"), "__txt");
    assert_eq!(identifier_name("\u{663}x.txt"), "$\u{663}x_txt");
    assert_eq!(identifier_name("\u{301}a.txt"), "$\u{301}a_txt");
    assert_eq!(identifier_name("caf\u{e9}/\u{3b1}.png"), "caf\u{e9}_\u{3b1}_png");
    for name in ["file__txt", "$\u{663}x_txt", "caf\u{e9}_\u{3b1}_png"] {
      assert!(is_java_identifier(name), "{name}");
    }
  }

  #[test]
  fn rejects_chars_java_does_not_allow_in_names() {
    assert!(!is_java_identifier("file\u{b2}"));
    assert!(!is_java_identifier("\u{bd}"));
    assert!(!is_java_identifier("\u{663}x"));
    assert!(is_java_identifier("x\u{663}"));
    assert!(!is_java_package("com.\u{bd}"));
    assert!(!is_java_identifier_part('\u{b2}'));
    assert!(is_java_identifier_part('\u{663}'));
  }

  #[test]
  fn validates_java_names() {
    assert!(is_java_identifier("Res"));
    assert!(is_java_identifier("$magic$"));
    assert!(!is_java_identifier("2Res"));
    assert!(!is_java_identifier("class"));
    assert!(!is_java_identifier(""));
    assert!(is_java_package("com.example"));
    assert!(is_java_package(""));
    assert!(!is_java_package("com..example"));
    assert!(!is_java_package("com.new"));
  }
}
