//! Properties strategy: a key to path `.properties` manifest plus an accessor class that loads it.

use std::collections::BTreeMap;

use crate::config::GeneratorConfig;
use crate::emit::accessor::{
  Annotations, RegisteredParam, class_footer, class_header, java_string, raw_lookup_methods,
  registered_lookup_methods,
};
use crate::emit::{ManifestEmitter, claim_names, validate_target};
use crate::error::GenerationResult;
use crate::models::{CollisionKind, Manifest, NameCollision, RenderedArtifact, RenderedOutput};
use crate::properties;

/// Comment written at the top of the properties manifest.
pub const PROPERTIES_HEADER: &str = "Generated resource manifest. Do not edit.";

/// Renders the properties manifest and its accessor class.
pub struct PropertiesEmitter<'a> {
  config: &'a GeneratorConfig,
}

impl<'a> PropertiesEmitter<'a> {
  /// Create an emitter for the provided configuration.
  pub fn new(config: &'a GeneratorConfig) -> Self {
    Self { config }
  }

  /// Key to path table honouring the collision policy.
  fn key_table(
    &self,
    manifest: &Manifest,
  ) -> GenerationResult<(BTreeMap<String, String>, Vec<NameCollision>)> {
    let claimed = claim_names(
      manifest,
      CollisionKind::LookupKey,
      self.config.collision_policy,
      |entry| entry.lookup_key.as_str(),
    )?;

    let table = claimed
      .winners
      .iter()
      .map(|(key, entry)| (key.to_string(), entry.relative_path.clone()))
      .collect();

    Ok((table, claimed.collisions))
  }

  fn render_class(&self) -> String {
    let config = self.config;
    let annotations = Annotations::new(config.inject_dependencies);
    let class_name = config.class_name.as_str();
    let class_literal = java_string(class_name);
    let location_literal = java_string(&config.properties_resource_name());

    let mut imports = vec!["java.util.Properties"];
    if annotations.enabled() {
      imports.push("org.jetbrains.annotations.PropertyKey");
    }
    let mut source = class_header(&config.target_package, class_name, &imports, annotations);
    source.push_str(&format!(
      r#"	/**
	 * Current application context loader
	 */
	private static final ClassLoader systemLoader = ClassLoader.getSystemClassLoader();

	/**
	 * Classpath location of the resource manifest
	 */
	public static final String propertiesLocation = {location_literal};

	private static final Properties registeredResources = new Properties();

	private static final Throwable registeredResourcesError;

	static {{
		Throwable error = null;
		try (InputStream baseResources = systemLoader.getResourceAsStream(propertiesLocation)) {{
			if (baseResources == null) {{
				error = new MissingResourceException(propertiesLocation + " not found", {class_literal}, propertiesLocation);
			}} else {{
				registeredResources.load(baseResources);
			}}
		}} catch (Exception err) {{
			error = err;
		}}
		registeredResourcesError = error;
	}}
"#
    ));

    source.push_str(&raw_lookup_methods("systemLoader", annotations));

    let param_annotations = if annotations.enabled() {
      format!(
        "@NotNull @PropertyKey(resourceBundle = {}) ",
        java_string(&self.resource_bundle_name())
      )
    } else {
      String::new()
    };
    source.push_str(&registered_lookup_methods(
      class_name,
      &RegisteredParam {
        java_type: "String",
        name: "location",
        annotations: param_annotations,
        description: "Registered resource key",
        key_expression: "location",
      },
      annotations,
    ));

    source.push_str(&format!(
      r#"
	private static String requireRegisteredPath(String location) {{
		if (registeredResourcesError != null) {{
			throw new IllegalStateException("Resource manifest " + propertiesLocation + " could not be loaded", registeredResourcesError);
		}}
		String property = registeredResources.getProperty(location, null);
		if (property == null) {{
			throw new MissingResourceException(location + " resource not found", {class_literal}, location);
		}}
		return property;
	}}
"#
    ));

    source.push_str(&class_footer(class_name));
    source
  }

  /// Bundle name for `@PropertyKey`: the manifest file name without its `.properties` suffix.
  fn resource_bundle_name(&self) -> String {
    let file_name = self.config.properties_resource_name();
    match file_name.strip_suffix(".properties") {
      Some(stem) => stem.to_string(),
      None => file_name,
    }
  }
}

impl ManifestEmitter for PropertiesEmitter<'_> {
  fn render(&self, manifest: &Manifest) -> GenerationResult<RenderedOutput> {
    validate_target(self.config)?;
    let (table, collisions) = self.key_table(manifest)?;

    Ok(RenderedOutput {
      artifacts: vec![
        RenderedArtifact {
          path: self.config.properties_file.clone(),
          contents: properties::store(&table, Some(PROPERTIES_HEADER)),
        },
        RenderedArtifact {
          path: self.config.java_file(),
          contents: self.render_class(),
        },
      ],
      collisions,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::{CollisionPolicy, GenerationMode};
  use crate::emit::test_support::{config, manifest};
  use crate::error::GenerationError;
  use std::path::PathBuf;

  #[test]
  fn writes_manifest_then_class() {
    let config = config(GenerationMode::Properties);
    let output = PropertiesEmitter::new(&config)
      .render(&manifest(&["images/logo.png", "a.txt"]))
      .unwrap();

    assert_eq!(output.artifacts.len(), 2);
    assert_eq!(output.artifacts[0].path, config.properties_file);
    assert_eq!(
      output.artifacts[0].contents,
      format!("#{PROPERTIES_HEADER}\na_txt=a.txt\nimages.logo_png=images/logo.png\n")
    );
    assert_eq!(output.artifacts[1].path, config.java_file());
    assert!(output.collisions.is_empty());
  }

  #[test]
  fn later_path_wins_a_shared_key() {
    let config = config(GenerationMode::Properties);
    let output = PropertiesEmitter::new(&config)
      .render(&manifest(&["a.b/c", "a_b/c"]))
      .unwrap();

    let table = properties::load(&output.artifacts[0].contents).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table["a_b.c"], "a_b/c");
    assert_eq!(output.collisions.len(), 1);
    assert_eq!(output.collisions[0].kind, CollisionKind::LookupKey);
  }

  #[test]
  fn fail_policy_aborts_on_shared_key() {
    let mut config = config(GenerationMode::Properties);
    config.collision_policy = CollisionPolicy::Fail;
    let result = PropertiesEmitter::new(&config).render(&manifest(&["a.b/c", "a_b/c"]));
    assert!(matches!(result, Err(GenerationError::Collision { .. })));
  }

  #[test]
  fn class_loads_manifest_and_reports_load_failures() {
    let config = config(GenerationMode::Properties);
    let source = PropertiesEmitter::new(&config).render_class();

    assert!(source.starts_with("package com.example;\n"));
    assert!(source.contains("public static final String propertiesLocation = \"demo_resources.properties\";"));
    assert!(source.contains("registeredResources.load(baseResources);"));
    assert!(source.contains("registeredResourcesError = error;"));
    assert!(source.contains("public static URL getRegisteredResource(String location) {"));
    assert!(source.contains("public static InputStream getRegisteredResourceAsStream(String location) {"));
    assert!(source.contains("throw new IllegalStateException("));
    assert!(!source.contains("printStackTrace"));
    assert!(!source.contains("@NotNull"));
    assert!(source.trim_end().ends_with('}'));
  }

  #[test]
  fn injected_dependencies_annotate_keys_with_bundle() {
    let mut config = config(GenerationMode::Properties);
    config.inject_dependencies = true;
    let source = PropertiesEmitter::new(&config).render_class();

    assert!(source.contains("import org.jetbrains.annotations.PropertyKey;"));
    assert!(source.contains(
      "\t@NotNull\n\tpublic static URL getRegisteredResource(@NotNull @PropertyKey(resourceBundle = \"demo_resources\") String location) {"
    ));
    assert!(source.contains("\t@Nullable\n\tpublic static URL getResource(@NotNull String location) {"));
  }
  #[test]
  fn bundle_name_keeps_dots_in_the_project_name() {
    let mut config = config(GenerationMode::Properties);
    config.inject_dependencies = true;
    config.properties_file =
      PathBuf::from("/project/src/main/resources/my.app_resources.properties");
    let emitter = PropertiesEmitter::new(&config);

    assert_eq!(emitter.resource_bundle_name(), "my.app_resources");
    assert!(
      emitter
        .render_class()
        .contains("@PropertyKey(resourceBundle = \"my.app_resources\")")
    );
  }
}
