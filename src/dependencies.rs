//! Compile-only dependencies the generated source needs when annotations are injected.

use serde::Serialize;

/// Default `org.jetbrains:annotations` version.
pub const DEFAULT_ANNOTATIONS_VERSION: &str = "23.0.0";

/// Coordinate template providing `@NotNull`, `@Nullable` and `@PropertyKey`.
pub const JETBRAINS_ANNOTATIONS: &str = "org.jetbrains:annotations:{version}";

/// A dependency coordinate template paired with its configured version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyCoordinate {
  /// Coordinate with a `{version}` placeholder.
  pub template: &'static str,
  /// Configured version, blank when the dependency should not be injected.
  pub version: String,
}

impl DependencyCoordinate {
  /// Resolved `group:artifact:version` notation, `None` when no version is configured.
  pub fn notation(&self) -> Option<String> {
    let version = self.version.trim();
    (!version.is_empty()).then(|| self.template.replace("{version}", version))
  }
}

/// The static coordinate table.
pub fn default_coordinates(annotations_version: &str) -> Vec<DependencyCoordinate> {
  vec![DependencyCoordinate {
    template: JETBRAINS_ANNOTATIONS,
    version: annotations_version.to_string(),
  }]
}

/// Notations to add to the host's compile-only scope, skipping blank versions.
pub fn compile_only_notations(coordinates: &[DependencyCoordinate]) -> Vec<String> {
  coordinates
    .iter()
    .filter_map(DependencyCoordinate::notation)
    .collect()
}
