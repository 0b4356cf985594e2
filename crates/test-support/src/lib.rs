//! Helpers shared by the workspace's tests.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Writes `contents` to a fresh temporary file that is removed on drop.
///
/// # Panics
///
/// Panics if the file cannot be created or written.
#[must_use]
pub fn pattern_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temporary pattern file");
    file.write_all(contents.as_bytes())
        .expect("write temporary pattern file");
    file.flush().expect("flush temporary pattern file");
    file
}

/// Writes `contents` to `dir/name`, creating parent directories, and returns
/// the full path.
///
/// # Panics
///
/// Panics if the file or its parents cannot be created.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directories");
    }
    fs::write(&path, contents).expect("write file");
    path
}
