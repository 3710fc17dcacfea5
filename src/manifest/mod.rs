//! Manifest construction broken into focused submodules for easier testing.

mod building;
mod naming;
mod scanning;

pub use building::{MAX_RESOURCES, build_manifest};
pub use naming::{
  JAVA_RESERVED_WORDS, collides_with_reserved_word, identifier_name, is_java_identifier,
  is_java_package, lookup_key,
};
pub use scanning::collect_resource_files;
