//! Generation orchestrator: discover resources, build the manifest, render and write artifacts.

use tracing::info;

use crate::config::GeneratorConfig;
use crate::dependencies::compile_only_notations;
use crate::emit::emitter_for;
use crate::error::GenerationResult;
use crate::manifest::{build_manifest, collect_resource_files};
use crate::models::{GenerationReport, Manifest, RenderedOutput};
use crate::output::{OutputLease, write_artifact};

/// High-level entry point generating the manifest and accessor class for one configuration.
pub struct ResourceGenerator {
  config: GeneratorConfig,
}

impl ResourceGenerator {
  /// Create a generator for the provided, fully resolved configuration.
  pub fn new(config: GeneratorConfig) -> Self {
    Self { config }
  }

  /// Configuration the generator runs with.
  pub fn config(&self) -> &GeneratorConfig {
    &self.config
  }

  /// Scan the resource roots and build the manifest without writing anything.
  pub fn collect_manifest(&self) -> GenerationResult<Manifest> {
    let files =
      collect_resource_files(&self.config.resource_roots, &self.config.output_paths())?;
    build_manifest(&files)
  }

  /// Render the artifacts for the current file set without writing anything.
  pub fn render(&self) -> GenerationResult<(Manifest, RenderedOutput)> {
    let manifest = self.collect_manifest()?;
    let output = emitter_for(&self.config).render(&manifest)?;
    Ok((manifest, output))
  }

  /// Regenerate every artifact, replacing previous outputs.
  ///
  /// Runs sharing an output path are serialized. Any I/O failure aborts the run; artifacts
  /// written before the failure keep their new contents, the others keep their old ones.
  pub fn generate(&self) -> GenerationResult<GenerationReport> {
    let outputs = self.config.output_paths();
    let _lease = OutputLease::acquire(&outputs);

    let (manifest, output) = self.render()?;
    for artifact in &output.artifacts {
      write_artifact(artifact)?;
    }

    let compile_only_dependencies = if self.config.inject_dependencies {
      compile_only_notations(&self.config.dependencies)
    } else {
      Vec::new()
    };

    info!(
      mode = ?self.config.mode,
      resources = manifest.len(),
      collisions = output.collisions.len(),
      "generated resource accessors"
    );

    Ok(GenerationReport {
      mode: self.config.mode,
      resource_count: manifest.len(),
      artifacts: output
        .artifacts
        .into_iter()
        .map(|artifact| artifact.path)
        .collect(),
      collisions: output.collisions,
      compile_only_dependencies,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::{GenerationMode, ProjectConfig};
  use std::fs;
  use std::path::Path;
  use tempfile::tempdir;

  fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
  }

  #[test]
  fn properties_run_does_not_register_its_own_manifest() {
    let dir = tempdir().unwrap();
    let project = dir.path();
    write_file(&project.join("src/main/resources/logo.png"), "png");

    let config = ProjectConfig {
      project_name: "demo".into(),
      ..ProjectConfig::default()
    }
    .resolve(project);
    let generator = ResourceGenerator::new(config);

    let first = generator.generate().unwrap();
    assert_eq!(first.resource_count, 1);
    let second = generator.generate().unwrap();
    assert_eq!(second.resource_count, 1);

    let manifest = generator.collect_manifest().unwrap();
    assert_eq!(manifest.relative_paths(), vec!["logo.png"]);
  }

  #[test]
  fn reports_injected_dependencies_only_when_enabled() {
    let dir = tempdir().unwrap();
    let project = dir.path();
    write_file(&project.join("src/main/resources/a.txt"), "a");

    let mut config = ProjectConfig {
      generation_type: GenerationMode::Embedded,
      ..ProjectConfig::default()
    }
    .resolve(project);
    let report = ResourceGenerator::new(config.clone()).generate().unwrap();
    assert!(report.compile_only_dependencies.is_empty());

    config.inject_dependencies = true;
    let report = ResourceGenerator::new(config).generate().unwrap();
    assert_eq!(report.compile_only_dependencies, vec![
      "org.jetbrains:annotations:23.0.0".to_string()
    ]);
  }
}
