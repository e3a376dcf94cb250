//! Static asset store.
//!
//! # Data Flow
//! ```text
//! Rewritten request (target path + original query)
//!     → directory.rs (serve from a local tree)
//!     → or origin.rs (forward to a remote HTTP origin)
//!     → Response as-is (404 surfaces to the client)
//! ```
//!
//! # Design Decisions
//! - The store never second-guesses the router: no fallbacks, no retries
//! - Origin mode wins when both a root and an origin are configured
//! - Stores are cheap to rebuild; the server swaps them on config reload

pub mod directory;
pub mod origin;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use thiserror::Error;

use crate::config::AssetsConfig;

pub use directory::DirectoryStore;
pub use origin::OriginStore;

/// Errors raised while fetching an asset.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("invalid asset origin `{0}`")]
    InvalidOrigin(String),
    #[error("failed to build upstream request: {0}")]
    Request(#[from] axum::http::Error),
    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),
}

impl AssetError {
    /// HTTP status reported to the client.
    pub fn status(&self) -> StatusCode {
        match self {
            AssetError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AssetError::InvalidOrigin(_) | AssetError::Request(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Where routed requests are served from.
#[derive(Debug, Clone)]
pub enum AssetStore {
    Directory(DirectoryStore),
    Origin(OriginStore),
}

impl AssetStore {
    /// Build the store described by the configuration.
    pub fn from_config(config: &AssetsConfig) -> Result<Self, AssetError> {
        match &config.origin {
            Some(origin) => Ok(AssetStore::Origin(OriginStore::new(origin)?)),
            None => Ok(AssetStore::Directory(DirectoryStore::new(&config.root))),
        }
    }

    /// Fetch the asset addressed by the request URI.
    pub async fn fetch(&self, request: Request<Body>) -> Result<Response<Body>, AssetError> {
        match self {
            AssetStore::Directory(store) => Ok(store.fetch(request).await),
            AssetStore::Origin(store) => store.fetch(request).await,
        }
    }

    /// Short description for logs.
    pub fn describe(&self) -> String {
        match self {
            AssetStore::Directory(store) => format!("dir:{}", store.root().display()),
            AssetStore::Origin(store) => format!("origin:{}", store.base()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_prefers_origin() {
        let config = AssetsConfig {
            root: "public".into(),
            origin: Some("http://127.0.0.1:9000".into()),
        };
        let store = AssetStore::from_config(&config).unwrap();
        assert!(matches!(store, AssetStore::Origin(_)));
        assert_eq!(store.describe(), "origin:http://127.0.0.1:9000");
    }

    #[test]
    fn test_from_config_directory() {
        let store = AssetStore::from_config(&AssetsConfig::default()).unwrap();
        assert_eq!(store.describe(), "dir:public");
    }

    #[test]
    fn test_invalid_origin() {
        let config = AssetsConfig {
            root: String::new(),
            origin: Some("not a uri".into()),
        };
        let err = AssetStore::from_config(&config).unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
