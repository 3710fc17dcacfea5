use super::{AccessError, RegisteredLookup, ResourceLoader};
use crate::models::Manifest;

/// Registered lookups backed by an id-indexed path array.
#[derive(Debug)]
pub struct EmbeddedAccessor<L> {
  loader: L,
  paths: Vec<String>,
}

impl<L: ResourceLoader> EmbeddedAccessor<L> {
  /// Accessor over `paths`, where the id of each path is its index.
  pub fn new(loader: L, paths: Vec<String>) -> Self {
    Self { loader, paths }
  }

  /// Accessor over the relative paths of `manifest`, in id order.
  pub fn from_manifest(loader: L, manifest: &Manifest) -> Self {
    Self::new(loader, manifest.relative_paths())
  }

  /// Number of registered resources; valid ids are `0..len()`.
  pub fn len(&self) -> usize {
    self.paths.len()
  }

  /// Returns `true` when no resource is registered.
  pub fn is_empty(&self) -> bool {
    self.paths.is_empty()
  }
}

impl<L: ResourceLoader> RegisteredLookup for EmbeddedAccessor<L> {
  type Key = i32;

  fn loader(&self) -> &dyn ResourceLoader {
    &self.loader
  }

  fn resolve(&self, id: &i32) -> Result<&str, AccessError> {
    // Negative ids fail the conversion, `len()` and above miss the array.
    usize::try_from(*id)
      .ok()
      .and_then(|index| self.paths.get(index))
      .map(String::as_str)
      .ok_or(AccessError::IdOutOfRange {
        id: *id,
        len: self.paths.len(),
      })
  }
}
