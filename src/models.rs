//! Data structures produced while generating a resource manifest.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::GenerationMode;

/// A regular file discovered under one of the configured resource roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
  /// Resource root the file was found under.
  pub root: PathBuf,
  /// Absolute (root-joined) location of the file on disk.
  pub path: PathBuf,
  /// Root-relative path using forward slashes.
  pub relative_path: String,
}

/// One registered resource of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceEntry {
  /// Zero-based discovery index, also the index into the embedded path array.
  pub id: usize,
  /// Root-relative path using forward slashes.
  pub relative_path: String,
  /// Dotted key used by the properties manifest.
  pub lookup_key: String,
  /// Java identifier used for the embedded id constant.
  pub identifier_name: String,
}

/// Ordered collection of resource entries produced by one generation run.
///
/// Entries are only ever appended through [`crate::manifest::build_manifest`], which keeps
/// `entries[i].id == i` for every entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Manifest {
  pub(crate) entries: Vec<ResourceEntry>,
}

impl Manifest {
  /// Entries in id order.
  pub fn entries(&self) -> &[ResourceEntry] {
    &self.entries
  }

  /// Number of registered resources.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns `true` when no resource was discovered.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Look up an entry by its id.
  pub fn get(&self, id: usize) -> Option<&ResourceEntry> {
    self.entries.get(id)
  }

  /// Relative paths in id order, the content of the embedded path array.
  pub fn relative_paths(&self) -> Vec<String> {
    self
      .entries
      .iter()
      .map(|entry| entry.relative_path.clone())
      .collect()
  }
}

/// Which derived name two entries collided on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionKind {
  /// Two paths share a properties lookup key.
  LookupKey,
  /// Two paths share an embedded constant name.
  Identifier,
}

/// A derived name shared by two distinct resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameCollision {
  /// Which derived name collided.
  pub kind: CollisionKind,
  /// The shared key or identifier.
  pub name: String,
  /// Path that registered the name first and lost it.
  pub shadowed: String,
  /// Path that now owns the name.
  pub winner: String,
}

/// A file the emitter produced, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
  /// Destination of the artifact.
  pub path: PathBuf,
  /// Full file contents.
  pub contents: String,
}

/// Emitter output: the artifacts to write plus the collisions that were resolved on the way.
#[derive(Debug, Clone, Default)]
pub struct RenderedOutput {
  /// Files to write, in write order.
  pub artifacts: Vec<RenderedArtifact>,
  /// Collisions resolved with the last-write-wins policy.
  pub collisions: Vec<NameCollision>,
}

/// Summary of a completed generation run returned by [`crate::ResourceGenerator::generate`].
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
  /// Strategy that produced the artifacts.
  pub mode: GenerationMode,
  /// Number of resources registered.
  pub resource_count: usize,
  /// Files that were (re)written.
  pub artifacts: Vec<PathBuf>,
  /// Name collisions resolved during the run.
  pub collisions: Vec<NameCollision>,
  /// Dependency notations the host build should add to its compile-only scope.
  pub compile_only_dependencies: Vec<String>,
}
