//! Relative path admission rules.
//!
//! Every path stored in a template model is a forward-slash relative path
//! that must stay inside the template root. Paths arrive from three
//! untrusted directions (descriptor, archive manifest, registry payloads),
//! so the same check guards all of them.

use crate::error::{Result, TdkError};

/// Check that a relative path stays within the template root.
///
/// Rejects empty paths, absolute paths, backslashes (wire paths are
/// forward-slash only), and any `.` / `..` segment.
pub fn check_relative_path(path: &str) -> Result<()> {
    let fail = |message: &str| {
        Err(TdkError::InvalidPath {
            path: path.to_string(),
            message: message.to_string(),
        })
    };

    if path.is_empty() {
        return fail("empty path");
    }
    if path.starts_with('/') {
        return fail("absolute path");
    }
    if path.contains('\\') {
        return fail("backslash separator");
    }
    for segment in path.split('/') {
        match segment {
            "" => return fail("empty path segment"),
            "." | ".." => return fail("path escapes the template root"),
            _ => {}
        }
    }

    Ok(())
}
