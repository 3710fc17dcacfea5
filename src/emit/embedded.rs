//! Embedded strategy: the path array and one `int` constant per resource baked into the class.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::config::GeneratorConfig;
use crate::emit::accessor::{
  Annotations, RegisteredParam, class_footer, class_header, java_string, javadoc_text,
  raw_lookup_methods, registered_lookup_methods,
};
use crate::emit::{ManifestEmitter, claim_names, validate_target};
use crate::error::GenerationResult;
use crate::models::{CollisionKind, Manifest, RenderedArtifact, RenderedOutput};

/// Name of the class loader field in the embedded class.
pub const CLASS_LOADER_NAME: &str = "$systemClassLoader$";

/// Name of the path array field in the embedded class.
pub const MAGIC_ARRAY_NAME: &str = "$magicArrayContent$";

const PATHS_PER_LINE: usize = 4;

/// Renders a single self-contained accessor class.
pub struct EmbeddedEmitter<'a> {
  config: &'a GeneratorConfig,
}

impl<'a> EmbeddedEmitter<'a> {
  /// Create an emitter for the provided configuration.
  pub fn new(config: &'a GeneratorConfig) -> Self {
    Self { config }
  }
}

impl ManifestEmitter for EmbeddedEmitter<'_> {
  fn render(&self, manifest: &Manifest) -> GenerationResult<RenderedOutput> {
    validate_target(self.config)?;
    let claimed = claim_names(
      manifest,
      CollisionKind::Identifier,
      self.config.collision_policy,
      |entry| entry.identifier_name.as_str(),
    )?;
    let constant_ids: BTreeSet<usize> = claimed.winners.values().map(|entry| entry.id).collect();

    let config = self.config;
    let annotations = Annotations::new(config.inject_dependencies);
    let class_name = config.class_name.as_str();
    let mut source = class_header(&config.target_package, class_name, &[], annotations);

    let _ = write!(
      source,
      r#"	/**
	 * Current application context loader
	 */
	private static final ClassLoader {CLASS_LOADER_NAME} = ClassLoader.getSystemClassLoader();
"#
    );

    // Constants in id order; a constant shadowed by a later collision is left out.
    for entry in manifest.entries() {
      if !constant_ids.contains(&entry.id) {
        continue;
      }
      let _ = write!(
        source,
        r#"
	/**
	 * {}
	 */
	public static final int {} = {};
"#,
        javadoc_text(&entry.relative_path),
        entry.identifier_name,
        entry.id
      );
    }

    let _ = write!(
      source,
      "\n\tprivate static final String[] {MAGIC_ARRAY_NAME} = {};\n",
      render_path_array(manifest)
    );

    source.push_str(&raw_lookup_methods(CLASS_LOADER_NAME, annotations));
    source.push_str(&registered_lookup_methods(
      class_name,
      &RegisteredParam {
        java_type: "int",
        name: "resourceId",
        annotations: String::new(),
        description: "Registered resource id, one of the constants of this class",
        key_expression: "String.valueOf(resourceId)",
      },
      annotations,
    ));

    let _ = write!(
      source,
      r#"
	private static String requireRegisteredPath(int resourceId) {{
		if (resourceId < 0 || resourceId >= {MAGIC_ARRAY_NAME}.length) {{
			throw new IndexOutOfBoundsException("Resource " + resourceId + " not found");
		}}
		return {MAGIC_ARRAY_NAME}[resourceId];
	}}
"#
    );
    source.push_str(&class_footer(class_name));

    Ok(RenderedOutput {
      artifacts: vec![RenderedArtifact {
        path: config.java_file(),
        contents: source,
      }],
      collisions: claimed.collisions,
    })
  }
}

/// `new String[] { ... }` literal with the relative paths in id order.
fn render_path_array(manifest: &Manifest) -> String {
  if manifest.is_empty() {
    return "new String[] {}".to_string();
  }

  let lines: Vec<String> = manifest
    .entries()
    .chunks(PATHS_PER_LINE)
    .map(|chunk| {
      let literals: Vec<String> = chunk
        .iter()
        .map(|entry| java_string(&entry.relative_path))
        .collect();
      format!("\t\t{},", literals.join(", "))
    })
    .collect();

  format!("new String[] {{\n{}\n\t}}", lines.join("\n"))
}
