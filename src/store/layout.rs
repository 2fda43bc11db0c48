//! Template directory layout rules.
//!
//! A template root holds `template.json` plus the file/asset tree. The
//! walk applies a fixed exclude set: dot-prefixed names (hidden files,
//! version-control directories, the `.tdk` work directory) are never part
//! of the template's content.

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Work directory for tool state under a template root.
pub const WORK_DIR: &str = ".tdk";

/// Whether a single path component is excluded from the template tree.
pub fn is_excluded(name: &str) -> bool {
    name.starts_with('.')
}

/// Walk a template root and collect relative file paths, sorted,
/// excluding hidden entries and the descriptor itself.
pub fn walk(root: &Path) -> Result<Vec<String>> {
    let mut paths = Vec::new();
    walk_dir(root, "", &mut paths)?;
    paths.sort();
    Ok(paths)
}

fn walk_dir(dir: &Path, prefix: &str, out: &mut Vec<String>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            // Non-UTF-8 names cannot round-trip through the wire format.
            continue;
        };
        if is_excluded(name) {
            continue;
        }
        if prefix.is_empty() && name == crate::template::DESCRIPTOR_FILE {
            continue;
        }

        let rel = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", prefix, name)
        };

        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            walk_dir(&entry.path(), &rel, out)?;
        } else if file_type.is_file() {
            out.push(rel);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn excludes_dot_prefixed_names() {
        assert!(is_excluded(".git"));
        assert!(is_excluded(".hg"));
        assert!(is_excluded(".svn"));
        assert!(is_excluded(".tdk"));
        assert!(is_excluded(".hidden"));
        assert!(!is_excluded("body.html"));
        assert!(!is_excluded("assets"));
    }

    #[test]
    fn walk_collects_sorted_relative_paths() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("partials")).unwrap();
        fs::write(temp.path().join("z.txt"), "z").unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::write(temp.path().join("partials/footer.html"), "f").unwrap();

        let paths = walk(temp.path()).unwrap();
        assert_eq!(paths, vec!["a.txt", "partials/footer.html", "z.txt"]);
    }

    #[test]
    fn walk_skips_hidden_and_descriptor() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".git")).unwrap();
        fs::write(temp.path().join(".git/config"), "x").unwrap();
        fs::write(temp.path().join(".hidden"), "x").unwrap();
        fs::write(temp.path().join("template.json"), "{}").unwrap();
        fs::write(temp.path().join("body.html"), "b").unwrap();

        let paths = walk(temp.path()).unwrap();
        assert_eq!(paths, vec!["body.html"]);
    }

    #[test]
    fn walk_keeps_nested_descriptor_name() {
        // Only the root-level descriptor is special.
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("sub/template.json"), "{}").unwrap();

        let paths = walk(temp.path()).unwrap();
        assert_eq!(paths, vec!["sub/template.json"]);
    }
}
