use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// File name suffixes scanned for Terraform configuration.
pub const TERRAFORM_SUFFIXES: &[&str] = &[".tf", ".tf.json"];

/// Any path containing one of these substrings is skipped. This is a plain
/// substring match on the whole path, not a path segment match.
pub const EXCLUDED_SUBSTRINGS: &[&str] = &[
    ".terraform",
    "terraform.tfstate",
    "terraform.tfstate.backup",
];

pub fn is_terraform_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| TERRAFORM_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)))
}

pub fn is_excluded(path: &Path) -> bool {
    let path = path.to_string_lossy();
    EXCLUDED_SUBSTRINGS
        .iter()
        .any(|excluded| path.contains(excluded))
}

/// Lazy walk over the Terraform files below a root, in sorted file name
/// order at each directory level.
///
/// Symlinked files are yielded when they point at a regular file; symlinked
/// directories are not descended into. A missing root yields nothing and
/// unreadable paths are skipped with a warning.
pub struct TerraformFiles {
    root: PathBuf,
    walker: walkdir::IntoIter,
}

impl TerraformFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let walker = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();
        Self { root, walker }
    }
}

impl Iterator for TerraformFiles {
    type Item = PathBuf;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let missing_root = err.depth() == 0
                        && err
                            .io_error()
                            .is_some_and(|e| e.kind() == io::ErrorKind::NotFound);
                    if missing_root {
                        tracing::warn!(root = %self.root.display(), "scan root does not exist");
                    } else {
                        tracing::warn!(
                            root = %self.root.display(),
                            path = ?err.path(),
                            error = %err,
                            "skipping unreadable path"
                        );
                    }
                    continue;
                }
            };

            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }

            let path = entry.path();
            if !is_terraform_file(path) || is_excluded(path) {
                continue;
            }

            return Some(entry.into_path());
        }
    }
}

pub fn find_terraform_files(root: &Path) -> Vec<PathBuf> {
    let files: Vec<PathBuf> = TerraformFiles::new(root).collect();
    tracing::debug!(root = %root.display(), count = files.len(), "terraform files discovered");
    files
}
