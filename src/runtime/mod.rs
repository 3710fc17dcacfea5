//! Rust rendition of the generated accessor contract.
//!
//! [`ResourceLoader`] plays the class loader: it resolves a logical path to a handle or to
//! nothing. [`RegisteredLookup`] layers the key or id based lookups on top of it and turns a
//! missing handle into an [`AccessError`] instead of returning nothing.

mod embedded;
mod properties;

use std::fs::File;
use std::io::Read;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

pub use embedded::EmbeddedAccessor;
pub use properties::PropertiesAccessor;

/// Resolves logical resource paths, the way a class loader does.
pub trait ResourceLoader {
  /// Location of the resource, `None` when it does not exist.
  fn resource(&self, location: &str) -> Option<PathBuf>;

  /// Open the resource for reading, `None` when it does not exist or cannot be opened.
  fn resource_as_stream(&self, location: &str) -> Option<Box<dyn Read>> {
    let path = self.resource(location)?;
    let file = File::open(path).ok()?;
    Some(Box::new(file))
  }
}

impl<L: ResourceLoader + ?Sized> ResourceLoader for &L {
  fn resource(&self, location: &str) -> Option<PathBuf> {
    (**self).resource(location)
  }

  fn resource_as_stream(&self, location: &str) -> Option<Box<dyn Read>> {
    (**self).resource_as_stream(location)
  }
}

/// Loader searching an ordered list of directories, first match wins.
#[derive(Debug, Clone, Default)]
pub struct DirectoryLoader {
  roots: Vec<PathBuf>,
}

impl DirectoryLoader {
  /// Create a loader over `roots`, searched in order.
  pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
    Self {
      roots: roots.into_iter().map(Into::into).collect(),
    }
  }

  /// Directories searched by the loader.
  pub fn roots(&self) -> &[PathBuf] {
    &self.roots
  }
}

impl ResourceLoader for DirectoryLoader {
  fn resource(&self, location: &str) -> Option<PathBuf> {
    let relative = Path::new(location);
    let confined = !location.is_empty()
      && relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)));
    if !confined {
      return None;
    }

    self
      .roots
      .iter()
      .map(|root| root.join(relative))
      .find(|candidate| candidate.is_file())
  }
}

/// The properties manifest could not be read or parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("resource manifest {location} could not be loaded: {reason}")]
pub struct ManifestLoadFailure {
  /// Classpath location of the manifest.
  pub location: String,
  /// Why loading failed.
  pub reason: String,
}

/// Failures of registered lookups.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
  /// No path is registered under the key.
  #[error("{key} resource not found")]
  KeyNotFound {
    /// Requested key.
    key: String,
  },
  /// The id is negative or not below the number of registered resources.
  #[error("Resource {id} not found")]
  IdOutOfRange {
    /// Requested id.
    id: i32,
    /// Number of registered resources.
    len: usize,
  },
  /// The registered path does not resolve through the loader.
  #[error("Resource {location} not found")]
  ResourceNotFound {
    /// Registered path.
    location: String,
  },
  /// The properties manifest failed to load, so no key can be resolved.
  #[error(transparent)]
  ManifestUnavailable(#[from] ManifestLoadFailure),
}

impl AccessError {
  /// True for the failures that mean "this resource does not exist".
  pub fn is_not_found(&self) -> bool {
    !matches!(self, Self::ManifestUnavailable(_))
  }
}

/// Accessor contract shared by both manifest representations.
pub trait RegisteredLookup {
  /// Registered handle type: a key for properties manifests, an id for embedded ones.
  type Key: ?Sized;

  /// Loader the raw lookups delegate to.
  fn loader(&self) -> &dyn ResourceLoader;

  /// Map a registered key or id to its relative path.
  fn resolve(&self, key: &Self::Key) -> Result<&str, AccessError>;

  /// Raw lookup; `None` when the path does not exist.
  fn get_resource(&self, location: &str) -> Option<PathBuf> {
    self.loader().resource(location)
  }

  /// Raw stream lookup; `None` when the path does not exist.
  fn get_resource_as_stream(&self, location: &str) -> Option<Box<dyn Read>> {
    self.loader().resource_as_stream(location)
  }

  /// Registered lookup, never silently absent.
  fn get_registered_resource(&self, key: &Self::Key) -> Result<PathBuf, AccessError> {
    let location = self.resolve(key)?;
    self
      .get_resource(location)
      .ok_or_else(|| AccessError::ResourceNotFound {
        location: location.to_string(),
      })
  }

  /// Registered stream lookup, never silently absent.
  fn get_registered_resource_as_stream(
    &self,
    key: &Self::Key,
  ) -> Result<Box<dyn Read>, AccessError> {
    let location = self.resolve(key)?;
    self
      .get_resource_as_stream(location)
      .ok_or_else(|| AccessError::ResourceNotFound {
        location: location.to_string(),
      })
  }
}
