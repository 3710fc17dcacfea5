//! Java source fragments shared by both emitters: class skeleton, raw lookups and the
//! resolve-then-delegate registered lookups.

use std::fmt::Write as _;

/// Nullability annotations emitted when dependencies are injected.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Annotations {
  enabled: bool,
}

impl Annotations {
  pub fn new(enabled: bool) -> Self {
    Self { enabled }
  }

  pub fn enabled(self) -> bool {
    self.enabled
  }

  fn method(self, annotation: &str) -> String {
    if self.enabled {
      format!("\t@{annotation}\n")
    } else {
      String::new()
    }
  }

  fn param(self, annotation: &str) -> String {
    if self.enabled {
      format!("@{annotation} ")
    } else {
      String::new()
    }
  }
}

/// Encode `value` as a Java string literal. Non-ASCII characters become `\uXXXX` escapes so
/// the source compiles regardless of the compiler's source encoding.
pub(crate) fn java_string(value: &str) -> String {
  let json = serde_json::Value::String(value.to_string()).to_string();
  let mut out = String::with_capacity(json.len());
  for c in json.chars() {
    if c.is_ascii() {
      out.push(c);
      continue;
    }
    let mut units = [0u16; 2];
    for unit in c.encode_utf16(&mut units) {
      let _ = write!(out, "\\u{unit:04x}");
    }
  }
  out
}

/// Make `text` safe to place inside a `/** ... */` comment.
pub(crate) fn javadoc_text(text: &str) -> String {
  text.replace("*/", "*&#47;")
}

/// Package line, imports and the opening of the generated class.
pub(crate) fn class_header(
  package: &str,
  class_name: &str,
  imports: &[&str],
  annotations: Annotations,
) -> String {
  let mut out = String::new();
  if !package.is_empty() {
    let _ = writeln!(out, "package {package};\n");
  }

  let mut all_imports: Vec<&str> = vec![
    "java.io.InputStream",
    "java.net.URL",
    "java.util.MissingResourceException",
  ];
  all_imports.extend_from_slice(imports);
  if annotations.enabled() {
    all_imports.extend_from_slice(&[
      "org.jetbrains.annotations.NotNull",
      "org.jetbrains.annotations.Nullable",
    ]);
  }
  all_imports.sort_unstable();
  all_imports.dedup();
  for import in all_imports {
    let _ = writeln!(out, "import {import};");
  }

  let _ = write!(
    out,
    r#"
/**
 * Do not edit this file.
 * This file is generated automatically and if it is edited it may stop working correctly.
 */
public final class {class_name} {{
"#
  );
  out
}

/// Private constructor and closing brace.
pub(crate) fn class_footer(class_name: &str) -> String {
  format!(
    r#"
	private {class_name}() {{
	}}
}}
"#
  )
}

/// `getResource` and `getResourceAsStream`: passthrough to the class loader held in
/// `loader_field`, returning `null` for unknown paths.
pub(crate) fn raw_lookup_methods(loader_field: &str, annotations: Annotations) -> String {
  let nullable = annotations.method("Nullable");
  let not_null = annotations.param("NotNull");
  format!(
    r#"
	/**
	 * Resolve a resource by its classpath location.
	 *
	 * @param location Resource location relative to the classpath root
	 * @return The resource URL, or {{@code null}} when the resource does not exist
	 */
{nullable}	public static URL getResource({not_null}String location) {{
		return {loader_field}.getResource(location);
	}}

	/**
	 * Open a resource by its classpath location.
	 *
	 * @param location Resource location relative to the classpath root
	 * @return The resource stream, or {{@code null}} when the resource does not exist
	 */
{nullable}	public static InputStream getResourceAsStream({not_null}String location) {{
		return {loader_field}.getResourceAsStream(location);
	}}
"#
  )
}

/// Parameter of the registered lookups.
pub(crate) struct RegisteredParam<'a> {
  /// Java type of the parameter.
  pub java_type: &'a str,
  /// Parameter name.
  pub name: &'a str,
  /// Extra parameter annotations (already rendered, each followed by a space).
  pub annotations: String,
  /// Javadoc description of the parameter.
  pub description: &'a str,
  /// Expression turning the parameter into the `MissingResourceException` key.
  pub key_expression: &'a str,
}

/// `getRegisteredResource` and `getRegisteredResourceAsStream`.
///
/// Both resolve the parameter through `requireRegisteredPath` (rendered by the emitter) and
/// turn a `null` handle from the raw lookup into a `MissingResourceException`.
pub(crate) fn registered_lookup_methods(
  class_name: &str,
  param: &RegisteredParam<'_>,
  annotations: Annotations,
) -> String {
  let not_null = annotations.method("NotNull");
  let RegisteredParam {
    java_type,
    name,
    annotations: param_annotations,
    description,
    key_expression,
  } = param;
  let class_literal = java_string(class_name);

  let mut out = String::new();
  for (method, return_type, raw) in [
    ("getRegisteredResource", "URL", "getResource"),
    ("getRegisteredResourceAsStream", "InputStream", "getResourceAsStream"),
  ] {
    let _ = write!(
      out,
      r#"
	/**
	 * Resolve a registered resource.
	 *
	 * @param {name} {description}
	 * @return The resource, never {{@code null}}
	 * @throws MissingResourceException when the resource is not registered or does not exist
	 */
{not_null}	public static {return_type} {method}({param_annotations}{java_type} {name}) {{
		String location = requireRegisteredPath({name});
		{return_type} res = {raw}(location);
		if (res == null) {{
			throw new MissingResourceException("Resource " + location + " not found", {class_literal}, {key_expression});
		}}
		return res;
	}}
"#
    );
  }
  out
}
