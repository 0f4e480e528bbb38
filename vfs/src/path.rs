//! Provider path helpers.
//!
//! Provider paths are plain strings with forward slashes, relative to the
//! provider root. Assets reference each other with relative URIs such as
//! `../textures/brick.png`, so `..` segments are resolved here rather than
//! rejected, as long as they never climb above the root.

use crate::VfsError;

/// Normalize a provider path.
///
/// - Replaces backslashes with forward slashes
/// - Collapses redundant separators (`a///b` → `a/b`)
/// - Drops `.` segments
/// - Resolves `..` against the preceding segment
/// - Strips leading and trailing slashes
///
/// Returns `Err(VfsError::InvalidPath)` if the path is empty or a `..`
/// segment would leave the root.
pub fn normalize(path: &str) -> Result<String, VfsError> {
    let replaced = path.replace('\\', "/");
    let mut segments: Vec<&str> = Vec::new();

    for segment in replaced.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(VfsError::InvalidPath(format!(
                        "'{path}' escapes the provider root"
                    )));
                }
            }
            _ => segments.push(segment),
        }
    }

    if segments.is_empty() {
        return Err(VfsError::InvalidPath("empty path".into()));
    }

    Ok(segments.join("/"))
}

/// The directory part of a normalized path (empty for top-level files).
pub fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(pos) => &path[..pos],
        None => "",
    }
}

/// The final segment of a normalized path.
pub fn file_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// Resolve `relative` against `directory` and normalize the result.
pub fn join(directory: &str, relative: &str) -> Result<String, VfsError> {
    if directory.is_empty() {
        normalize(relative)
    } else {
        normalize(&format!("{directory}/{relative}"))
    }
}
