use crate::error::StorageError;
use std::path::{Component, Path, PathBuf};

fn traversal(path: &Path, reason: &'static str) -> StorageError {
    StorageError::PathTraversalAttempt {
        message: path.display().to_string().into(),
        context: Some(reason.into()),
    }
}

/// Collapses `.` and `..` lexically. `..` may never climb above the sandbox root.
fn normalize_relative(path: &Path) -> Result<PathBuf, StorageError> {
    let mut out = PathBuf::new();

    for c in path.components() {
        match c {
            Component::CurDir => {},
            Component::Normal(seg) => out.push(seg),
            Component::ParentDir => {
                if !out.pop() {
                    return Err(traversal(path, "Path attempted to escape sandbox via '..'"));
                }
            },
            Component::RootDir | Component::Prefix(_) => {
                return Err(traversal(path, "Absolute paths are not allowed in sandbox"));
            },
        }
    }

    if out.as_os_str().is_empty() {
        return Err(StorageError::FileNotFound {
            message: path.display().to_string().into(),
            context: Some("Target must be a file inside the sandbox".into()),
        });
    }

    Ok(out)
}

/// Joins `path` to the canonical `root` and proves the result stays inside it.
pub(crate) fn resolve_path(root: &Path, path: impl AsRef<Path>) -> Result<PathBuf, StorageError> {
    let path = path.as_ref();
    let joined = root.join(normalize_relative(path)?);

    match joined.canonicalize() {
        Ok(canonical) if canonical.starts_with(root) => Ok(canonical),
        Ok(canonical) => Err(traversal(&canonical, "Path resolves outside the sandbox")),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => validate_ancestors(root, &joined),
        Err(e) => Err(StorageError::Io { source: e, context: None }),
    }
}

/// Validates a path that does not exist yet through its first existing ancestor,
/// so that a symlinked directory cannot smuggle writes out of the sandbox.
fn validate_ancestors(root: &Path, joined: &Path) -> Result<PathBuf, StorageError> {
    let mut current = joined.parent();

    while let Some(path) = current {
        if path == root {
            return Ok(joined.to_path_buf());
        }

        if path.exists() {
            return match path.canonicalize() {
                Ok(canonical) if canonical.starts_with(root) => Ok(joined.to_path_buf()),
                Ok(canonical) => {
                    Err(traversal(&canonical, "Existing parent directory is a symlink outside sandbox"))
                },
                Err(e) => Err(StorageError::Io {
                    source: e,
                    context: Some("Failed to verify parent directory".into()),
                }),
            };
        }

        current = path.parent();
    }

    Err(traversal(joined, "No valid parent directory found within sandbox"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_segments_collapse_inside_the_root() {
        assert_eq!(normalize_relative(Path::new("a/./b/../c.txt")).unwrap(), Path::new("a/c.txt"));
    }

    #[test]
    fn escaping_segments_are_rejected() {
        assert!(matches!(
            normalize_relative(Path::new("a/../../etc/passwd")),
            Err(StorageError::PathTraversalAttempt { .. })
        ));
        assert!(matches!(
            normalize_relative(Path::new("/etc/passwd")),
            Err(StorageError::PathTraversalAttempt { .. })
        ));
    }

    #[test]
    fn the_root_itself_is_not_a_file() {
        assert!(matches!(
            normalize_relative(Path::new("a/..")),
            Err(StorageError::FileNotFound { .. })
        ));
    }
}
