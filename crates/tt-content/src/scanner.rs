//! Post discovery by filesystem walking.
//!
//! Discovery only finds candidate files; reading and rendering happen in
//! [`crate::load_posts`].

use std::fs;
use std::path::{Path, PathBuf};

const POST_EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Walks a content directory for post sources.
pub(crate) struct Scanner {
    source_dir: PathBuf,
}

impl Scanner {
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Scan the directory tree and return post paths in sorted order.
    ///
    /// Returns an empty Vec if the source directory doesn't exist.
    pub fn scan(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if self.source_dir.exists() {
            Self::scan_directory(&self.source_dir, &mut paths);
        }
        paths.sort();
        paths
    }

    fn scan_directory(dir_path: &Path, paths: &mut Vec<PathBuf>) {
        let Ok(entries) = fs::read_dir(dir_path) else {
            return;
        };

        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            // Hidden and underscore-prefixed entries are not published content
            if name.starts_with('.') || name.starts_with('_') {
                continue;
            }

            let path = entry.path();
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                Self::scan_directory(&path, paths);
            } else if is_post_source(&path) {
                paths.push(path);
            }
        }
    }
}

fn is_post_source(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| POST_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scan_missing_dir() {
        let scanner = Scanner::new(PathBuf::from("/nonexistent/blog"));
        assert!(scanner.scan().is_empty());
    }

    #[test]
    fn test_scan_finds_markdown_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("2024/nested")).unwrap();
        fs::create_dir_all(root.join("_drafts")).unwrap();
        fs::write(root.join("b.md"), "").unwrap();
        fs::write(root.join("a.mdx"), "").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();
        fs::write(root.join("_partial.md"), "").unwrap();
        fs::write(root.join(".hidden.md"), "").unwrap();
        fs::write(root.join("2024/nested/c.MD"), "").unwrap();
        fs::write(root.join("_drafts/d.md"), "").unwrap();

        let found: Vec<_> = Scanner::new(root.to_path_buf())
            .scan()
            .into_iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            found,
            vec![
                PathBuf::from("2024/nested/c.MD"),
                PathBuf::from("a.mdx"),
                PathBuf::from("b.md"),
            ]
        );
    }
}
