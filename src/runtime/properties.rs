use std::collections::BTreeMap;
use std::io::Read;

use tracing::warn;

use super::{AccessError, ManifestLoadFailure, RegisteredLookup, ResourceLoader};
use crate::properties;

/// Registered lookups backed by a key to path properties manifest.
#[derive(Debug)]
pub struct PropertiesAccessor<L> {
  loader: L,
  location: String,
  table: Result<BTreeMap<String, String>, ManifestLoadFailure>,
}

impl<L: ResourceLoader> PropertiesAccessor<L> {
  /// Load the manifest at `location` through `loader`.
  ///
  /// A manifest that cannot be loaded does not fail construction: raw lookups keep working
  /// and every registered lookup reports [`AccessError::ManifestUnavailable`].
  pub fn load(loader: L, location: impl Into<String>) -> Self {
    let location = location.into();
    let table = read_table(&loader, &location);
    if let Err(failure) = &table {
      warn!(%failure, "registered resources unavailable");
    }
    Self {
      loader,
      location,
      table,
    }
  }

  /// Load the manifest at `location`, failing when it cannot be read or parsed.
  pub fn try_load(loader: L, location: impl Into<String>) -> Result<Self, ManifestLoadFailure> {
    let location = location.into();
    let table = read_table(&loader, &location)?;
    Ok(Self {
      loader,
      location,
      table: Ok(table),
    })
  }

  /// Classpath location of the manifest.
  pub fn location(&self) -> &str {
    &self.location
  }

  /// Why the manifest could not be loaded, if it could not.
  pub fn load_error(&self) -> Option<&ManifestLoadFailure> {
    self.table.as_ref().err()
  }

  /// Registered keys in sorted order; empty when the manifest failed to load.
  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self
      .table
      .as_ref()
      .into_iter()
      .flat_map(|table| table.keys().map(String::as_str))
  }
}

impl<L: ResourceLoader> RegisteredLookup for PropertiesAccessor<L> {
  type Key = str;

  fn loader(&self) -> &dyn ResourceLoader {
    &self.loader
  }

  fn resolve(&self, key: &str) -> Result<&str, AccessError> {
    let table = self.table.as_ref().map_err(|failure| failure.clone())?;
    table
      .get(key)
      .map(String::as_str)
      .ok_or_else(|| AccessError::KeyNotFound {
        key: key.to_string(),
      })
  }
}

fn read_table<L: ResourceLoader>(
  loader: &L,
  location: &str,
) -> Result<BTreeMap<String, String>, ManifestLoadFailure> {
  let failure = |reason: String| ManifestLoadFailure {
    location: location.to_string(),
    reason,
  };

  let mut stream = loader
    .resource_as_stream(location)
    .ok_or_else(|| failure("not found".to_string()))?;
  let mut text = String::new();
  stream
    .read_to_string(&mut text)
    .map_err(|err| failure(err.to_string()))?;
  properties::load(&text).map_err(|err| failure(err.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::runtime::DirectoryLoader;
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
  fn registered_keys_resolve_through_the_loader() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("images/logo.png"), "png");
    write_file(
      &root.join("demo_resources.properties"),
      "#header\nimages.logo_png=images/logo.png\nghost_txt=ghost.txt\n",
    );

    let accessor =
      PropertiesAccessor::load(DirectoryLoader::new([root]), "demo_resources.properties");
    assert!(accessor.load_error().is_none());
    assert_eq!(accessor.keys().collect::<Vec<_>>(), vec!["ghost_txt", "images.logo_png"]);

    let registered = accessor.get_registered_resource("images.logo_png").unwrap();
    assert_eq!(Some(registered), accessor.get_resource("images/logo.png"));

    let missing_key = accessor.get_registered_resource("nope").unwrap_err();
    assert_eq!(missing_key, AccessError::KeyNotFound { key: "nope".into() });
    assert!(missing_key.is_not_found());

    let missing_file = accessor.get_registered_resource_as_stream("ghost_txt").err().unwrap();
    assert_eq!(missing_file, AccessError::ResourceNotFound {
      location: "ghost.txt".into()
    });
  }

  #[test]
  fn missing_manifest_is_deferred_to_registered_lookups() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("a.txt"), "a");

    let accessor = PropertiesAccessor::load(DirectoryLoader::new([root]), "absent.properties");
    let failure = accessor.load_error().cloned().unwrap();
    assert_eq!(failure.location, "absent.properties");
    assert_eq!(accessor.keys().count(), 0);

    assert!(accessor.get_resource("a.txt").is_some());
    let err = accessor.get_registered_resource("a_txt").unwrap_err();
    assert_eq!(err, AccessError::ManifestUnavailable(failure));
    assert!(!err.is_not_found());
  }

  #[test]
  fn try_load_propagates_parse_failures() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("broken.properties"), "key=\\uZZZZ\n");

    let err = PropertiesAccessor::try_load(DirectoryLoader::new([root]), "broken.properties")
      .unwrap_err();
    assert_eq!(err.location, "broken.properties");
    assert!(err.reason.contains("escape"));
  }
}
