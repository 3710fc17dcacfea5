//! Fold the ordered file list into a [`Manifest`].

use crate::error::{GenerationError, GenerationResult};
use crate::manifest::naming::{identifier_name, lookup_key};
use crate::models::{DiscoveredFile, Manifest, ResourceEntry};

/// Largest resource count addressable by a Java `int` id.
pub const MAX_RESOURCES: usize = i32::MAX as usize;

/// Assign ids in discovery order and derive every entry's names.
///
/// Each entry's id is its position in the returned manifest, which is also its index in the
/// embedded path array.
pub fn build_manifest(files: &[DiscoveredFile]) -> GenerationResult<Manifest> {
  if files.len() > MAX_RESOURCES {
    return Err(GenerationError::TooManyResources(files.len()));
  }

  let entries = files
    .iter()
    .enumerate()
    .map(|(id, file)| entry_for(id, &file.relative_path))
    .collect();

  Ok(Manifest { entries })
}

fn entry_for(id: usize, relative_path: &str) -> ResourceEntry {
  ResourceEntry {
    id,
    relative_path: relative_path.to_string(),
    lookup_key: lookup_key(relative_path),
    identifier_name: identifier_name(relative_path),
  }
}
