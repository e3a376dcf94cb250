//! Local directory asset store.

use std::convert::Infallible;
use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::{Request, Response};
use tower::ServiceExt;
use tower_http::services::ServeDir;

/// Serves files from a directory tree.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
    serve: ServeDir,
}

impl DirectoryStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            serve: ServeDir::new(&root),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Serve the file addressed by the request path. Missing files are 404.
    pub async fn fetch(&self, request: Request<Body>) -> Response<Body> {
        let result: Result<_, Infallible> = self.serve.clone().oneshot(request).await;
        match result {
            Ok(response) => response.map(Body::new),
            Err(never) => match never {},
        }
    }
}
