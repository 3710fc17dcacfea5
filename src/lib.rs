#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod dependencies;
pub mod emit;
pub mod error;
pub mod generator;
pub mod manifest;
pub mod models;
pub mod output;
pub mod properties;
pub mod runtime;

pub use config::{CollisionPolicy, GenerationMode, GeneratorConfig, ProjectConfig};
pub use error::{ConfigError, GenerationError, GenerationResult};
pub use generator::ResourceGenerator;
pub use models::{GenerationReport, Manifest, NameCollision, ResourceEntry};
