//! Project configuration loader describing resource roots, generation mode and output paths.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::dependencies::{DEFAULT_ANNOTATIONS_VERSION, DependencyCoordinate, default_coordinates};
use crate::error::ConfigError;

/// Configuration file searched for in the project directory.
pub const DEFAULT_CONFIG_FILE: &str = "resgen.config.json";

/// Suffix of the properties manifest file name.
pub const OUTPUT_PROPERTIES_NAME: &str = "resources.properties";

/// Default name of the generated accessor class.
pub const DEFAULT_CLASS_NAME: &str = "Res";

/// Package used when neither a target package nor a project group is configured.
pub const FALLBACK_PACKAGE: &str = "resgen";

/// Strategy used to materialize the manifest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Key to path `.properties` file loaded by the generated class at runtime.
    #[default]
    #[serde(alias = "PROPERTIES_FILE")]
    Properties,
    /// Path array and id constants baked into the generated class.
    #[serde(alias = "JAVA_FILE")]
    Embedded,
}

/// What to do when two resources derive the same lookup key or constant name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// The later-processed resource silently takes the name.
    #[default]
    LastWriteWins,
    /// Abort generation, naming both resources.
    Fail,
}

/// Discoverable project configuration, paths relative to the project directory.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project name, used as the properties manifest prefix.
    pub project_name: String,
    /// Project group, the default target package.
    pub group: String,
    /// Resource roots scanned in order.
    pub resource_dirs: Vec<String>,
    /// Java source root the accessor class is written under.
    pub source_dir: String,
    /// Generation strategy.
    pub generation_type: GenerationMode,
    /// Package of the generated class. Falls back to `group`.
    pub target_package: Option<String>,
    /// Emit nullability annotations and report compile-only dependencies.
    pub inject_dependencies: bool,
    /// Simple name of the generated class.
    pub class_name: String,
    /// Policy applied to duplicated keys or constant names.
    pub collision_policy: CollisionPolicy,
    /// Version of `org.jetbrains:annotations` to inject. Blank disables the coordinate.
    pub annotations_version: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            group: String::new(),
            resource_dirs: vec!["src/main/resources".into()],
            source_dir: "src/main/java".into(),
            generation_type: GenerationMode::Properties,
            target_package: None,
            inject_dependencies: false,
            class_name: DEFAULT_CLASS_NAME.into(),
            collision_policy: CollisionPolicy::LastWriteWins,
            annotations_version: DEFAULT_ANNOTATIONS_VERSION.into(),
        }
    }
}

impl ProjectConfig {
    /// Load `resgen.config.json` from the project directory.
    ///
    /// A missing file yields the defaults; an unreadable or malformed file is an error.
    pub fn discover(project_dir: &Path) -> Result<Self, ConfigError> {
        let candidate = project_dir.join(DEFAULT_CONFIG_FILE);
        match Self::from_path(&candidate) {
            Err(ConfigError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// File name of the properties manifest.
    pub fn properties_file_name(&self) -> String {
        let name = self.project_name.trim();
        if name.is_empty() {
            OUTPUT_PROPERTIES_NAME.to_string()
        } else {
            format!("{name}_{OUTPUT_PROPERTIES_NAME}")
        }
    }

    /// Package the generated class is placed in.
    pub fn effective_package(&self) -> String {
        let raw = self
            .target_package
            .as_deref()
            .unwrap_or(self.group.as_str());
        if raw.trim().is_empty() {
            FALLBACK_PACKAGE.to_string()
        } else {
            normalize_target_package(raw)
        }
    }

    /// Resolve every relative path against the project directory.
    pub fn resolve(&self, project_dir: &Path) -> GeneratorConfig {
        let resource_roots: Vec<PathBuf> = self
            .resource_dirs
            .iter()
            .map(|dir| project_dir.join(dir))
            .collect();
        let properties_dir = resource_roots
            .first()
            .cloned()
            .unwrap_or_else(|| project_dir.join("src/main/resources"));

        GeneratorConfig {
            resource_roots,
            mode: self.generation_type,
            target_package: self.effective_package(),
            class_name: self.class_name.clone(),
            inject_dependencies: self.inject_dependencies,
            collision_policy: self.collision_policy,
            properties_file: properties_dir.join(self.properties_file_name()),
            source_dir: project_dir.join(&self.source_dir),
            dependencies: default_coordinates(&self.annotations_version),
        }
    }
}

/// Fully resolved configuration consumed by [`crate::ResourceGenerator`].
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Resource roots scanned in order. Missing roots are skipped.
    pub resource_roots: Vec<PathBuf>,
    /// Generation strategy.
    pub mode: GenerationMode,
    /// Package of the generated class, empty for the default package.
    pub target_package: String,
    /// Simple name of the generated class.
    pub class_name: String,
    /// Emit nullability annotations and report compile-only dependencies.
    pub inject_dependencies: bool,
    /// Policy applied to duplicated keys or constant names.
    pub collision_policy: CollisionPolicy,
    /// Location of the properties manifest (properties mode only).
    pub properties_file: PathBuf,
    /// Java source root the class is written under.
    pub source_dir: PathBuf,
    /// Dependency coordinates injected when `inject_dependencies` is set.
    pub dependencies: Vec<DependencyCoordinate>,
}

impl GeneratorConfig {
    /// Location of the generated Java class.
    pub fn java_file(&self) -> PathBuf {
        let mut path = self.source_dir.clone();
        for segment in self.target_package.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.java", self.class_name));
        path
    }

    /// Classpath name the generated class loads the properties manifest from.
    pub fn properties_resource_name(&self) -> String {
        self.properties_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| OUTPUT_PROPERTIES_NAME.to_string())
    }

    /// Every artifact the configured mode writes. These are never registered as resources.
    pub fn output_paths(&self) -> Vec<PathBuf> {
        match self.mode {
            GenerationMode::Properties => vec![self.properties_file.clone(), self.java_file()],
            GenerationMode::Embedded => vec![self.java_file()],
        }
    }
}

/// Turn a free-form package name into Java form: whitespace becomes `.`, `-` becomes `_`.
pub fn normalize_target_package(raw: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let whitespace =
        WHITESPACE.get_or_init(|| Regex::new(r"\s").expect("invalid whitespace regex"));
    whitespace
        .replace_all(raw.trim(), ".")
        .replace('-', "_")
}
