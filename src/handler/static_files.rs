//! Static file resolution
//!
//! Maps request paths onto the asset root, distinguishing "no such file"
//! (which hands the request to the SPA fallback) from genuine read
//! failures (which surface as 500).

use std::io;
use std::path::{Component, Path, PathBuf};

use percent_encoding::percent_decode_str;
use tokio::fs;

use crate::config::AppState;
use crate::http::mime;
use crate::logger;

/// Outcome of mapping a request path onto the asset root
pub enum Resolution {
    /// Regular file under the root
    Found {
        content: Vec<u8>,
        content_type: &'static str,
    },
    /// Nothing to serve here; the fallback takes over
    Missing,
    /// The target exists but could not be read
    Failed(io::Error),
}

/// Try to resolve a request path to a regular file under the asset root
pub async fn resolve(state: &AppState, request_path: &str) -> Resolution {
    // On-disk names like "my file.txt" arrive percent-encoded
    let decoded = match percent_decode_str(request_path).decode_utf8() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Failed to decode request path '{request_path}': {e}"
            ));
            return Resolution::Missing;
        }
    };

    let Some(relative) = sanitize(&decoded) else {
        logger::log_warning(&format!(
            "Rejected request path escaping asset root: {request_path}"
        ));
        return Resolution::Missing;
    };
    if relative.as_os_str().is_empty() {
        // "/" itself is never a file; the fallback serves the entry document
        return Resolution::Missing;
    }

    let root = match state.asset_root().canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Asset root '{}' not accessible: {e}",
                state.asset_root().display()
            ));
            return Resolution::Missing;
        }
    };

    // Symlinks inside the root could still point outside it, so the
    // resolved target is canonicalized and prefix-checked as well.
    let resolved = match root.join(&relative).canonicalize() {
        Ok(p) => p,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Resolution::Missing,
        Err(e) => return Resolution::Failed(e),
    };
    if !resolved.starts_with(&root) {
        logger::log_warning(&format!("Path traversal attempt blocked: {request_path}"));
        return Resolution::Missing;
    }
    if resolved.is_dir() {
        return Resolution::Missing;
    }

    match fs::read(&resolved).await {
        Ok(content) => {
            let content_type = mime::content_type(resolved.extension().and_then(|e| e.to_str()));
            Resolution::Found {
                content,
                content_type,
            }
        }
        // Deleted between the canonicalize and the read
        Err(e) if e.kind() == io::ErrorKind::NotFound => Resolution::Missing,
        Err(e) => {
            logger::log_error(&format!("Failed to read '{}': {e}", resolved.display()));
            Resolution::Failed(e)
        }
    }
}

/// Read the fallback entry document
pub async fn read_index(state: &AppState) -> io::Result<Vec<u8>> {
    fs::read(state.index_file()).await
}

/// Normalize a decoded request path into a relative path that cannot climb
/// out of the asset root. Returns `None` for any path carrying `..`, a NUL
/// byte, a root, or a prefix component.
fn sanitize(request_path: &str) -> Option<PathBuf> {
    if request_path.contains('\0') {
        return None;
    }
    let trimmed = request_path.trim_start_matches('/');
    let mut clean = PathBuf::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(clean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppState, AssetsConfig, Config, ServerConfig};

    fn state_for(root: &Path) -> AppState {
        AppState::new(Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                workers: None,
            },
            assets: AssetsConfig {
                root: root.display().to_string(),
                index_file: "index.html".to_string(),
            },
        })
    }

    #[test]
    fn sanitize_strips_slashes_and_dots() {
        assert_eq!(sanitize("/style.css"), Some(PathBuf::from("style.css")));
        assert_eq!(
            sanitize("/assets/./app.js"),
            Some(PathBuf::from("assets/app.js"))
        );
        assert_eq!(sanitize("/"), Some(PathBuf::new()));
    }

    #[test]
    fn sanitize_rejects_parent_components() {
        assert_eq!(sanitize("/../../etc/passwd"), None);
        assert_eq!(sanitize("/assets/../../../etc/passwd"), None);
    }

    #[tokio::test]
    async fn resolves_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("style.css"), b"body{}").unwrap();
        let state = state_for(dir.path());

        match resolve(&state, "/style.css").await {
            Resolution::Found {
                content,
                content_type,
            } => {
                assert_eq!(content, b"body{}");
                assert_eq!(content_type, "text/css");
            }
            _ => panic!("expected Found"),
        }
    }

    #[tokio::test]
    async fn percent_encoded_names_resolve() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("my file.txt"), b"spaced out").unwrap();
        let state = state_for(dir.path());

        match resolve(&state, "/my%20file.txt").await {
            Resolution::Found { content, .. } => assert_eq!(content, b"spaced out"),
            _ => panic!("expected Found"),
        }

        // Invalid UTF-8 after decoding cannot name a file we serve
        assert!(matches!(
            resolve(&state, "/%ff%fe").await,
            Resolution::Missing
        ));
    }

    #[tokio::test]
    async fn encoded_traversal_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("build");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(dir.path().join("secret.txt"), b"top secret").unwrap();
        let state = state_for(&root);

        for path in ["/%2e%2e/secret.txt", "/%2E%2E%2Fsecret.txt", "/a%00.txt"] {
            assert!(
                matches!(resolve(&state, path).await, Resolution::Missing),
                "path {path}"
            );
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unreadable_file_is_a_failure() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked.txt");
        std::fs::write(&locked, b"secret").unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();
        if std::fs::read(&locked).is_ok() {
            // Permission bits do not apply to root; nothing to assert here
            return;
        }
        let state = state_for(dir.path());

        assert!(matches!(
            resolve(&state, "/locked.txt").await,
            Resolution::Failed(_)
        ));
    }

    #[tokio::test]
    async fn missing_file_and_directory_fall_through() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("assets")).unwrap();
        let state = state_for(dir.path());

        assert!(matches!(
            resolve(&state, "/nope.js").await,
            Resolution::Missing
        ));
        assert!(matches!(
            resolve(&state, "/assets").await,
            Resolution::Missing
        ));
        assert!(matches!(resolve(&state, "/").await, Resolution::Missing));
    }

    #[tokio::test]
    async fn traversal_never_leaves_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("build");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(dir.path().join("secret.txt"), b"top secret").unwrap();
        let state = state_for(&root);

        assert!(matches!(
            resolve(&state, "/../secret.txt").await,
            Resolution::Missing
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlink_outside_root_is_blocked() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("build");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(dir.path().join("secret.txt"), b"top secret").unwrap();
        std::os::unix::fs::symlink(dir.path().join("secret.txt"), root.join("link.txt")).unwrap();
        let state = state_for(&root);

        assert!(matches!(
            resolve(&state, "/link.txt").await,
            Resolution::Missing
        ));
    }

    #[tokio::test]
    async fn inaccessible_root_falls_through() {
        let state = state_for(Path::new("/definitely/not/a/real/root"));
        assert!(matches!(
            resolve(&state, "/style.css").await,
            Resolution::Missing
        ));
    }

    #[tokio::test]
    async fn read_index_returns_entry_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), b"<html></html>").unwrap();
        let state = state_for(dir.path());

        assert_eq!(read_index(&state).await.unwrap(), b"<html></html>");

        let empty = tempfile::tempdir().unwrap();
        let state = state_for(empty.path());
        assert!(read_index(&state).await.is_err());
    }
}
