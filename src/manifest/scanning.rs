//! Directory scanning utilities for discovering resource files.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use same_file::is_same_file;
use tracing::debug;

use crate::error::{GenerationError, GenerationResult};
use crate::models::DiscoveredFile;

/// Walk every resource root in order and return the files to register.
///
/// Files within a root are sorted by their relative path so the result does not depend on the
/// platform's directory iteration order. A relative path already claimed by an earlier root is
/// skipped, as are the generator's own `excluded` outputs. Missing roots are not an error.
pub fn collect_resource_files(
    roots: &[PathBuf],
    excluded: &[PathBuf],
) -> GenerationResult<Vec<DiscoveredFile>> {
    let mut seen = BTreeSet::new();
    let mut files = Vec::new();

    for root in roots {
        if !root.is_dir() {
            debug!(root = %root.display(), "skipping missing resource root");
            continue;
        }

        let mut root_files = Vec::new();
        collect_files_recursively(root, root, Path::new(""), excluded, &mut root_files)?;
        root_files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        for file in root_files {
            if seen.insert(file.relative_path.clone()) {
                files.push(file);
            } else {
                debug!(
                    path = %file.path.display(),
                    relative = %file.relative_path,
                    "relative path already registered by an earlier root"
                );
            }
        }
    }

    Ok(files)
}

fn collect_files_recursively(
    root: &Path,
    dir: &Path,
    relative_root: &Path,
    excluded: &[PathBuf],
    files: &mut Vec<DiscoveredFile>,
) -> GenerationResult<()> {
    for entry in fs::read_dir(dir).map_err(scan_error(dir))? {
        let entry = entry.map_err(scan_error(dir))?;
        let path = entry.path();
        let file_name = entry.file_name();
        let next_relative = if relative_root.as_os_str().is_empty() {
            PathBuf::from(&file_name)
        } else {
            relative_root.join(&file_name)
        };

        let file_type = entry.file_type().map_err(scan_error(&path))?;
        if file_type.is_dir() {
            collect_files_recursively(root, &path, &next_relative, excluded, files)?;
            continue;
        }

        let is_regular = file_type.is_file()
            || (file_type.is_symlink() && fs::metadata(&path).is_ok_and(|meta| meta.is_file()));
        if !is_regular {
            continue;
        }

        if is_excluded(&path, excluded) {
            debug!(path = %path.display(), "excluding generated output from resources");
            continue;
        }

        files.push(DiscoveredFile {
            root: root.to_path_buf(),
            path,
            relative_path: next_relative.to_string_lossy().replace('\\', "/"),
        });
    }

    Ok(())
}

fn scan_error(path: &Path) -> impl FnOnce(std::io::Error) -> GenerationError {
    let path = path.to_path_buf();
    move |source| GenerationError::Scan { path, source }
}

fn is_excluded(path: &Path, excluded: &[PathBuf]) -> bool {
    excluded
        .iter()
        .any(|output| output == path || is_same_file(path, output).unwrap_or(false))
}
