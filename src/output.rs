//! Writing generated artifacts: per-path serialization and atomic replacement.

use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Condvar, Mutex, MutexGuard, OnceLock};

use tempfile::NamedTempFile;

use crate::error::{GenerationError, GenerationResult};
use crate::models::RenderedArtifact;

#[derive(Default)]
struct OutputLocks {
  busy: Mutex<BTreeSet<PathBuf>>,
  released: Condvar,
}

fn output_locks() -> &'static OutputLocks {
  static LOCKS: OnceLock<OutputLocks> = OnceLock::new();
  LOCKS.get_or_init(OutputLocks::default)
}

fn lock_busy(locks: &OutputLocks) -> MutexGuard<'_, BTreeSet<PathBuf>> {
  locks.busy.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Exclusive claim on a set of output paths within this process.
///
/// Generation runs sharing any output path wait for each other; runs with disjoint outputs
/// proceed concurrently. The claim is released on drop.
#[derive(Debug)]
pub struct OutputLease {
  paths: Vec<PathBuf>,
}

impl OutputLease {
  /// Block until none of `paths` is claimed by another run, then claim all of them.
  pub fn acquire(paths: &[PathBuf]) -> Self {
    let locks = output_locks();
    let mut busy = lock_busy(locks);
    while paths.iter().any(|path| busy.contains(path)) {
      busy = locks
        .released
        .wait(busy)
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    }
    busy.extend(paths.iter().cloned());

    Self {
      paths: paths.to_vec(),
    }
  }
}

impl Drop for OutputLease {
  fn drop(&mut self) {
    let locks = output_locks();
    let mut busy = lock_busy(locks);
    for path in &self.paths {
      busy.remove(path);
    }
    drop(busy);
    locks.released.notify_all();
  }
}

/// Replace `artifact.path` with the artifact contents.
///
/// The contents go to a temporary file in the destination directory which is then renamed
/// over the destination, so readers never observe a truncated artifact and a failed write
/// leaves the previous file in place.
pub fn write_artifact(artifact: &RenderedArtifact) -> GenerationResult<()> {
  let path = artifact.path.as_path();
  let write_error = |source| GenerationError::Write {
    path: path.to_path_buf(),
    source,
  };

  let parent = path
    .parent()
    .filter(|parent| !parent.as_os_str().is_empty())
    .unwrap_or(Path::new("."));
  fs::create_dir_all(parent).map_err(write_error)?;

  let mut temp = NamedTempFile::new_in(parent).map_err(write_error)?;
  temp
    .write_all(artifact.contents.as_bytes())
    .map_err(write_error)?;
  temp.as_file().sync_all().map_err(write_error)?;
  temp
    .persist(path)
    .map_err(|err| write_error(err.error))?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Arc;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::thread;
  use std::time::Duration;
  use tempfile::tempdir;

  #[test]
  fn writes_and_replaces_artifacts() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/dir/Res.java");

    write_artifact(&RenderedArtifact {
      path: path.clone(),
      contents: "first".into(),
    })
    .unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "first");

    write_artifact(&RenderedArtifact {
      path: path.clone(),
      contents: "second".into(),
    })
    .unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "second");

    let leftovers = fs::read_dir(path.parent().unwrap()).unwrap().count();
    assert_eq!(leftovers, 1);
  }

  #[test]
  fn reports_unwritable_destinations() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "file").unwrap();

    let result = write_artifact(&RenderedArtifact {
      path: blocker.join("Res.java"),
      contents: "never".into(),
    });
    assert!(matches!(result, Err(GenerationError::Write { .. })));
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "file");
  }

  #[test]
  fn leases_on_shared_paths_are_exclusive() {
    let dir = tempdir().unwrap();
    let shared = vec![dir.path().join("shared.properties")];
    let active = Arc::new(AtomicUsize::new(0));
    let overlap = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..4)
      .map(|_| {
        let shared = shared.clone();
        let active = Arc::clone(&active);
        let overlap = Arc::clone(&overlap);
        thread::spawn(move || {
          let _lease = OutputLease::acquire(&shared);
          if active.fetch_add(1, Ordering::SeqCst) > 0 {
            overlap.fetch_add(1, Ordering::SeqCst);
          }
          thread::sleep(Duration::from_millis(10));
          active.fetch_sub(1, Ordering::SeqCst);
        })
      })
      .collect();

    for handle in handles {
      handle.join().unwrap();
    }
    assert_eq!(overlap.load(Ordering::SeqCst), 0);
  }
}
