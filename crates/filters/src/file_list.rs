use rustc_hash::FxHashSet;

/// Explicit list of wanted files and the directories leading to them.
///
/// Paths are stored without leading or trailing `/`. The root directory is
/// never recorded.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FileList {
    files: FxHashSet<String>,
    dirs: FxHashSet<String>,
}

impl FileList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `path` and records each of its ancestor directories.
    ///
    /// The ancestor walk stops at the first directory already known, since
    /// everything above it was recorded when it was first seen.
    ///
    /// ```
    /// use filters::FileList;
    ///
    /// let mut list = FileList::new();
    /// list.add("/photos/2024/cat.jpg");
    ///
    /// assert!(list.contains_file("photos/2024/cat.jpg"));
    /// assert!(list.contains_dir("photos"));
    /// assert!(list.contains_dir("photos/2024"));
    /// assert!(!list.contains_dir("photos/2023"));
    /// ```
    pub fn add(&mut self, path: &str) {
        let path = path.trim_matches('/');
        self.files.insert(path.to_owned());

        let mut dir = path;
        while let Some((parent, _)) = dir.rsplit_once('/') {
            if parent.is_empty() || !self.dirs.insert(parent.to_owned()) {
                break;
            }
            dir = parent;
        }
    }

    /// Returns `true` when `path` was added verbatim (after trimming).
    #[must_use]
    pub fn contains_file(&self, path: &str) -> bool {
        self.files.contains(path)
    }

    /// Returns `true` when `path` is an ancestor of a listed file.
    #[must_use]
    pub fn contains_dir(&self, path: &str) -> bool {
        self.dirs.contains(path.trim_matches('/'))
    }

    /// Number of listed files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` when no files are listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of derived ancestor directories.
    #[must_use]
    pub fn dir_count(&self) -> usize {
        self.dirs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_every_ancestor() {
        let mut list = FileList::new();
        list.add("a/b/c/d.txt");

        assert_eq!(list.len(), 1);
        assert_eq!(list.dir_count(), 3);
        for dir in ["a", "a/b", "a/b/c", "/a/b/"] {
            assert!(list.contains_dir(dir), "{dir} should be listed");
        }
        assert!(!list.contains_dir("b"));
        assert!(!list.contains_dir(""));
    }

    #[test]
    fn top_level_file_adds_no_directory() {
        let mut list = FileList::new();
        list.add("/top.txt/");
        assert!(list.contains_file("top.txt"));
        assert_eq!(list.dir_count(), 0);
    }

    #[test]
    fn shared_ancestors_are_stored_once() {
        let mut list = FileList::new();
        list.add("a/b/one.txt");
        list.add("a/b/two.txt");
        list.add("a/c/three.txt");
        list.add("a/b/one.txt");

        assert_eq!(list.len(), 3);
        assert_eq!(list.dir_count(), 3);
        assert!(list.contains_dir("a/c"));
    }

    #[test]
    fn file_membership_is_exact() {
        let mut list = FileList::new();
        list.add("a/b.txt");
        assert!(list.contains_file("a/b.txt"));
        assert!(!list.contains_file("a/b"));
        assert!(!list.contains_file("a"));
    }
}
