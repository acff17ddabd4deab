use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::config::Config;

/// Reasons a local path may not be read.
#[derive(Debug, thiserror::Error)]
pub enum PathSecurityError {
    #[error("File path is required")]
    EmptyPath,

    #[error("Path does not exist: '{path}'")]
    PathNotFound { path: PathBuf },

    #[error("Path '{path}' is not a regular file")]
    NotAFile { path: PathBuf },

    #[error("Path '{path}' is outside allowed root directory '{root}'")]
    OutsideRootDirectory { path: PathBuf, root: PathBuf },

    #[error("Symlink '{path}' points outside allowed root directory")]
    SymlinkOutsideRoot { path: PathBuf },

    #[error("Symlinks are not allowed: '{path}'")]
    SymlinkNotAllowed { path: PathBuf },

    #[error("IO error for path '{path}': {error}")]
    IoError { path: PathBuf, error: io::Error },
}

impl PathSecurityError {
    fn io(path: &Path, error: io::Error) -> Self {
        if error.kind() == io::ErrorKind::NotFound {
            Self::PathNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::IoError {
                path: path.to_path_buf(),
                error,
            }
        }
    }
}

/// Resolve `input` to the canonical path of a readable regular file.
///
/// With a root configured, the resolved file must lie under it; this also
/// catches `..` segments and symlinks that lead elsewhere. With
/// `allow_symlinks` off, a symlink is rejected outright.
pub fn validate_path(input: &str, config: &Config) -> Result<PathBuf, PathSecurityError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(PathSecurityError::EmptyPath);
    }
    let path = Path::new(input);

    let is_symlink = path
        .symlink_metadata()
        .map_err(|e| PathSecurityError::io(path, e))?
        .file_type()
        .is_symlink();
    if is_symlink && !config.security.allow_symlinks {
        return Err(PathSecurityError::SymlinkNotAllowed {
            path: path.to_path_buf(),
        });
    }

    let resolved = path
        .canonicalize()
        .map_err(|e| PathSecurityError::io(path, e))?;

    if let Some(root) = &config.security.root_path {
        let root = root
            .canonicalize()
            .map_err(|e| PathSecurityError::io(root, e))?;
        if !resolved.starts_with(&root) {
            return Err(if is_symlink {
                PathSecurityError::SymlinkOutsideRoot {
                    path: path.to_path_buf(),
                }
            } else {
                PathSecurityError::OutsideRootDirectory {
                    path: resolved,
                    root,
                }
            });
        }
    }

    if !resolved.is_file() {
        return Err(PathSecurityError::NotAFile { path: resolved });
    }

    debug!("Resolved upload path {:?}", resolved);
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SecurityConfig;
    use std::fs;
    use tempfile::TempDir;

    fn config(root: Option<&Path>, allow_symlinks: bool) -> Config {
        let mut config = Config::default();
        config.security = SecurityConfig {
            root_path: root.map(Path::to_path_buf),
            allow_symlinks,
        };
        config
    }

    fn file_in(dir: &TempDir, name: &str) -> PathBuf {
        let file = dir.path().join(name);
        fs::write(&file, b"\x89PNG").unwrap();
        file
    }

    #[test]
    fn test_unrestricted_without_root() {
        let dir = TempDir::new().unwrap();
        let file = file_in(&dir, "board.png");

        let resolved = validate_path(file.to_str().unwrap(), &config(None, true)).unwrap();
        assert_eq!(resolved, file.canonicalize().unwrap());
    }

    #[test]
    fn test_empty_path_rejected() {
        let result = validate_path("  ", &config(None, true));
        assert!(matches!(result, Err(PathSecurityError::EmptyPath)));
    }

    #[test]
    fn test_outside_root_rejected() {
        let root = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        let file = file_in(&elsewhere, "secret.png");

        let result = validate_path(file.to_str().unwrap(), &config(Some(root.path()), true));
        assert!(matches!(
            result,
            Err(PathSecurityError::OutsideRootDirectory { .. })
        ));
    }

    #[test]
    fn test_parent_segments_resolved_before_root_check() {
        let dir = TempDir::new().unwrap();
        let uploads = dir.path().join("uploads");
        fs::create_dir(&uploads).unwrap();
        file_in(&dir, "outside.png");

        let sneaky = uploads.join("../outside.png");
        let result = validate_path(sneaky.to_str().unwrap(), &config(Some(&uploads), true));
        assert!(matches!(
            result,
            Err(PathSecurityError::OutsideRootDirectory { .. })
        ));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = TempDir::new().unwrap();
        let result = validate_path(dir.path().to_str().unwrap(), &config(Some(dir.path()), true));
        assert!(matches!(result, Err(PathSecurityError::NotAFile { .. })));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.png");
        let result = validate_path(missing.to_str().unwrap(), &config(Some(dir.path()), true));
        assert!(matches!(result, Err(PathSecurityError::PathNotFound { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_policy() {
        use std::os::unix::fs::symlink;

        let root = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        let inside = file_in(&root, "inside.png");
        let outside = file_in(&elsewhere, "outside.png");
        let link_in = root.path().join("link-in.png");
        let link_out = root.path().join("link-out.png");
        symlink(&inside, &link_in).unwrap();
        symlink(&outside, &link_out).unwrap();

        let allowed = config(Some(root.path()), true);
        assert!(validate_path(link_in.to_str().unwrap(), &allowed).is_ok());
        assert!(matches!(
            validate_path(link_out.to_str().unwrap(), &allowed),
            Err(PathSecurityError::SymlinkOutsideRoot { .. })
        ));

        let denied = config(Some(root.path()), false);
        assert!(matches!(
            validate_path(link_in.to_str().unwrap(), &denied),
            Err(PathSecurityError::SymlinkNotAllowed { .. })
        ));
    }
}
