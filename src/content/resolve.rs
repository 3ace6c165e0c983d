use std::path::{Path, PathBuf};

/// Resolves a client-supplied resource path to a file under the document root.
///
/// The query string and fragment are dropped, then `.` and `..` segments are
/// eliminated against a component stack before the remainder is joined under
/// `root` — a request can never name a file outside the root, no matter how
/// many `..` segments it carries. Returns `None` when nothing is left after
/// normalization (e.g. "/", "/..").
pub fn resolve(root: &Path, raw: &str) -> Option<PathBuf> {
    let path = raw.split(['?', '#']).next().unwrap_or(raw);

    let mut stack: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            _ => stack.push(part),
        }
    }

    if stack.is_empty() {
        return None;
    }

    let mut resolved = root.to_path_buf();
    for part in stack {
        resolved.push(part);
    }
    Some(resolved)
}
