//! Static file serving module
//!
//! Resolves request paths inside the root directory and loads file content.
//! Resolution canonicalizes the candidate path and verifies it still lives
//! under the root, so `..` sequences and symlinks cannot escape it.

use std::io;
use std::path::{Path, PathBuf};

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::config::ServerState;
use crate::handler::router::RequestContext;
use crate::http::{self, mime};
use crate::logger;

/// Why a request path could not be served
#[derive(Debug)]
pub enum FileError {
    /// No regular file at the resolved location
    NotFound,
    /// Resolved location escapes the root directory
    Traversal(PathBuf),
    /// The file exists but could not be read
    Io(io::Error),
}

/// Serve the file a request path points at, or the matching error status
pub async fn serve(ctx: &RequestContext<'_>, state: &ServerState) -> Response<Full<Bytes>> {
    match load(state, ctx.path).await {
        Ok((content, content_type)) => http::build_file_response(content, content_type, ctx.is_head),
        Err(FileError::NotFound) => http::build_404_response(),
        Err(FileError::Traversal(resolved)) => {
            logger::log_warning(&format!(
                "Path traversal attempt blocked: {} -> {}",
                ctx.path,
                resolved.display()
            ));
            http::build_404_response()
        }
        Err(FileError::Io(e)) => {
            logger::log_error(&format!("Failed to read file for '{}': {e}", ctx.path));
            http::build_500_response()
        }
    }
}

/// Load the file a request path points at from the root directory
pub async fn load(
    state: &ServerState,
    request_path: &str,
) -> Result<(Vec<u8>, &'static str), FileError> {
    let file_path = resolve_path(
        &state.root,
        request_path,
        &state.config.static_files.index_file,
    )?;

    // The file can disappear between resolution and read
    let content = fs::read(&file_path).await.map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => FileError::NotFound,
        _ => FileError::Io(e),
    })?;

    let content_type = mime::content_type_for(file_path.extension().and_then(|e| e.to_str()));

    Ok((content, content_type))
}

/// Resolve a request path to a regular file inside the root directory.
///
/// The root path must already be canonical (see `ServerState::new`).
fn resolve_path(root: &Path, request_path: &str, index_file: &str) -> Result<PathBuf, FileError> {
    let relative = request_path.trim_start_matches('/');

    // The root URL serves the index document
    let candidate = if relative.is_empty() {
        root.join(index_file)
    } else {
        root.join(relative)
    };

    // Canonicalize to collapse `..` and symlinks before the prefix check
    let resolved = candidate.canonicalize().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => FileError::NotFound,
        _ => FileError::Io(e),
    })?;

    if !resolved.starts_with(root) {
        return Err(FileError::Traversal(resolved));
    }

    // Only regular files are served; directory URLs get 404
    if !resolved.is_file() {
        return Err(FileError::NotFound);
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    /// Builds `<tempdir>/dist` with a small asset bundle plus a file
    /// outside the root for traversal checks
    fn setup() -> (tempfile::TempDir, ServerState) {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join("dist");
        std::fs::create_dir(&root).expect("create root");
        std::fs::write(root.join("index.html"), b"<html>hi</html>").expect("write index");
        std::fs::write(root.join("app.js"), b"console.log(1)").expect("write app.js");
        std::fs::create_dir(root.join("assets")).expect("create assets");
        std::fs::write(root.join("assets/logo.svg"), b"<svg/>").expect("write logo");
        std::fs::write(dir.path().join("secret.txt"), b"outside").expect("write secret");

        let mut cfg = Config::load_from("tests-nonexistent-config").expect("defaults");
        cfg.static_files.root_dir = root.to_str().unwrap().to_string();
        let state = ServerState::new(cfg).expect("state");
        (dir, state)
    }

    #[test]
    fn test_root_path_resolves_to_index() {
        let (_dir, state) = setup();
        let resolved = resolve_path(&state.root, "/", "index.html").expect("index resolves");
        assert_eq!(resolved, state.root.join("index.html"));
    }

    #[test]
    fn test_nested_file_resolves() {
        let (_dir, state) = setup();
        let resolved =
            resolve_path(&state.root, "/assets/logo.svg", "index.html").expect("nested resolves");
        assert_eq!(resolved, state.root.join("assets/logo.svg"));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let (_dir, state) = setup();
        assert!(matches!(
            resolve_path(&state.root, "/missing.js", "index.html"),
            Err(FileError::NotFound)
        ));
    }

    #[test]
    fn test_directory_is_not_found() {
        let (_dir, state) = setup();
        assert!(matches!(
            resolve_path(&state.root, "/assets", "index.html"),
            Err(FileError::NotFound)
        ));
    }

    #[test]
    fn test_traversal_is_blocked() {
        let (_dir, state) = setup();
        assert!(matches!(
            resolve_path(&state.root, "/../secret.txt", "index.html"),
            Err(FileError::Traversal(_))
        ));
        assert!(matches!(
            resolve_path(&state.root, "/assets/../../secret.txt", "index.html"),
            Err(FileError::Traversal(_))
        ));
    }

    #[test]
    fn test_traversal_to_missing_target_is_not_found() {
        let (_dir, state) = setup();
        // Nothing to leak, but still no content from outside the root
        assert!(matches!(
            resolve_path(&state.root, "/../../nonexistent", "index.html"),
            Err(FileError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_load_returns_exact_bytes_and_type() {
        let (_dir, state) = setup();

        let (content, content_type) = load(&state, "/app.js").await.expect("app.js loads");
        assert_eq!(content, b"console.log(1)");
        assert_eq!(content_type, "application/javascript");

        let (content, content_type) = load(&state, "/").await.expect("index loads");
        assert_eq!(content, b"<html>hi</html>");
        assert_eq!(content_type, "text/html; charset=utf-8");
    }

    #[tokio::test]
    async fn test_root_equals_explicit_index() {
        let (_dir, state) = setup();
        let by_root = load(&state, "/").await.expect("root loads");
        let by_name = load(&state, "/index.html").await.expect("index loads");
        assert_eq!(by_root.0, by_name.0);
        assert_eq!(by_root.1, by_name.1);
    }

    #[tokio::test]
    async fn test_serve_statuses() {
        let (_dir, state) = setup();

        let ctx = RequestContext {
            path: "/app.js",
            is_head: false,
        };
        assert_eq!(serve(&ctx, &state).await.status(), 200);

        let ctx = RequestContext {
            path: "/missing.js",
            is_head: false,
        };
        assert_eq!(serve(&ctx, &state).await.status(), 404);

        let ctx = RequestContext {
            path: "/../secret.txt",
            is_head: false,
        };
        assert_eq!(serve(&ctx, &state).await.status(), 404);
    }
}
