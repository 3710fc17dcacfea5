//! Manifest emitters: pure renderers from a [`Manifest`] to the artifacts that materialize it.
//!
//! Both strategies share the accessor contract rendered by the `accessor` module; they only
//! differ in where the key or id to path table lives.

mod accessor;
mod embedded;
mod properties;

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::{CollisionPolicy, GenerationMode, GeneratorConfig};
use crate::error::{GenerationError, GenerationResult};
use crate::manifest::{is_java_identifier, is_java_package};
use crate::models::{CollisionKind, Manifest, NameCollision, RenderedOutput, ResourceEntry};

pub use embedded::{EmbeddedEmitter, MAGIC_ARRAY_NAME};
pub use properties::{PROPERTIES_HEADER, PropertiesEmitter};

/// A manifest representation strategy.
pub trait ManifestEmitter {
  /// Render every artifact for `manifest` without touching the file system.
  fn render(&self, manifest: &Manifest) -> GenerationResult<RenderedOutput>;
}

/// Pick the emitter matching the configured generation mode.
pub fn emitter_for(config: &GeneratorConfig) -> Box<dyn ManifestEmitter + '_> {
  match config.mode {
    GenerationMode::Properties => Box::new(PropertiesEmitter::new(config)),
    GenerationMode::Embedded => Box::new(EmbeddedEmitter::new(config)),
  }
}

/// Reject package or class names that would produce uncompilable source.
pub(crate) fn validate_target(config: &GeneratorConfig) -> GenerationResult<()> {
  if !is_java_package(&config.target_package) {
    return Err(GenerationError::InvalidPackage(config.target_package.clone()));
  }
  if !is_java_identifier(&config.class_name) {
    return Err(GenerationError::InvalidClassName(config.class_name.clone()));
  }
  Ok(())
}

/// Names claimed by entries after collisions were resolved.
pub(crate) struct ClaimedNames<'m> {
  /// Winning entry per name.
  pub winners: BTreeMap<&'m str, &'m ResourceEntry>,
  /// Every collision that was resolved in favour of the later entry.
  pub collisions: Vec<NameCollision>,
}

/// Walk the manifest in id order, letting each entry claim the name `name_of` derives.
///
/// Under [`CollisionPolicy::LastWriteWins`] a later entry silently takes the name; under
/// [`CollisionPolicy::Fail`] the first collision aborts the run.
pub(crate) fn claim_names<'m>(
  manifest: &'m Manifest,
  kind: CollisionKind,
  policy: CollisionPolicy,
  name_of: impl Fn(&'m ResourceEntry) -> &'m str,
) -> GenerationResult<ClaimedNames<'m>> {
  let mut winners = BTreeMap::new();
  let mut collisions = Vec::new();

  for entry in manifest.entries() {
    let name = name_of(entry);
    let Some(previous) = winners.insert(name, entry) else {
      continue;
    };

    match policy {
      CollisionPolicy::Fail => {
        return Err(GenerationError::Collision {
          kind,
          name: name.to_string(),
          first: previous.relative_path.clone(),
          second: entry.relative_path.clone(),
        });
      }
      CollisionPolicy::LastWriteWins => {
        debug!(
          %kind,
          name,
          shadowed = %previous.relative_path,
          winner = %entry.relative_path,
          "later resource takes over a derived name"
        );
        collisions.push(NameCollision {
          kind,
          name: name.to_string(),
          shadowed: previous.relative_path.clone(),
          winner: entry.relative_path.clone(),
        });
      }
    }
  }

  Ok(ClaimedNames {
    winners,
    collisions,
  })
}


#[cfg(test)]
mod tests {
  use super::test_support::{config, manifest};
  use super::*;

  #[test]
  fn last_write_wins_records_collisions() {
    let manifest = manifest(&["a.b/c", "a_b/c", "other"]);
    let claimed = claim_names(
      &manifest,
      CollisionKind::LookupKey,
      CollisionPolicy::LastWriteWins,
      |entry| entry.lookup_key.as_str(),
    )
    .unwrap();

    assert_eq!(claimed.winners["a_b.c"].relative_path, "a_b/c");
    assert_eq!(claimed.collisions.len(), 1);
    assert_eq!(claimed.collisions[0].shadowed, "a.b/c");
    assert_eq!(claimed.collisions[0].winner, "a_b/c");
  }

  #[test]
  fn fail_policy_rejects_collisions() {
    let manifest = manifest(&["a.b/c", "a_b/c"]);
    let err = claim_names(
      &manifest,
      CollisionKind::LookupKey,
      CollisionPolicy::Fail,
      |entry| entry.lookup_key.as_str(),
    )
    .err()
    .unwrap();

    match err {
      GenerationError::Collision {
        name,
        first,
        second,
        ..
      } => {
        assert_eq!(name, "a_b.c");
        assert_eq!(first, "a.b/c");
        assert_eq!(second, "a_b/c");
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn validates_package_and_class_name() {
    let mut invalid = config(GenerationMode::Embedded);
    invalid.target_package = "com.2bad".into();
    assert!(matches!(validate_target(&invalid), Err(GenerationError::InvalidPackage(_))));

    let mut invalid = config(GenerationMode::Embedded);
    invalid.class_name = "class".into();
    assert!(matches!(validate_target(&invalid), Err(GenerationError::InvalidClassName(_))));

    assert!(validate_target(&config(GenerationMode::Properties)).is_ok());
  }
}
