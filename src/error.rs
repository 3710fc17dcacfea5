//! Error types shared by the generator.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::CollisionKind;

/// Failures that abort a generation run.
#[derive(Debug, Error)]
pub enum GenerationError {
  /// Walking a resource root failed.
  #[error("failed to scan {}: {source}", path.display())]
  Scan {
    /// Directory or file that could not be read.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// Writing an output artifact failed. The previous artifact, if any, is left untouched.
  #[error("failed to write {}: {source}", path.display())]
  Write {
    /// Artifact that could not be written.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// Two resources derived the same name while the collision policy is `fail`.
  #[error("{kind} `{name}` is derived from both `{first}` and `{second}`")]
  Collision {
    /// Which derived name collided.
    kind: CollisionKind,
    /// Shared name.
    name: String,
    /// Path processed first.
    first: String,
    /// Path processed second.
    second: String,
  },
  /// The configured target package is not a valid Java package name.
  #[error("invalid target package `{0}`")]
  InvalidPackage(String),
  /// The configured class name is not a valid Java identifier.
  #[error("invalid class name `{0}`")]
  InvalidClassName(String),
  /// More resources than a Java `int` id can address.
  #[error("{0} resources exceed the range of int resource ids")]
  TooManyResources(usize),
}

/// Result type used by the generator.
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Failures while loading a project configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// Failed to read the configuration file from disk.
  #[error("failed to read {}: {source}", path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// Failed to parse the JSON configuration file.
  #[error("failed to parse {}: {source}", path.display())]
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
}

impl std::fmt::Display for CollisionKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::LookupKey => f.write_str("lookup key"),
      Self::Identifier => f.write_str("identifier"),
    }
  }
}
