//! Remote origin asset store.
//!
//! Forwards the rewritten request to an HTTP origin, keeping the original
//! method, headers and body. The origin connection is always HTTP/1.1,
//! whatever version the client spoke.

use axum::body::Body;
use axum::http::uri::{Authority, PathAndQuery, Scheme};
use axum::http::{Request, Response, Uri, Version};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::assets::AssetError;

/// Forwards requests to a remote static origin.
#[derive(Debug, Clone)]
pub struct OriginStore {
    scheme: Scheme,
    authority: Authority,
    client: Client<HttpConnector, Body>,
}

impl OriginStore {
    /// Create a store for an origin like `http://127.0.0.1:9000`.
    pub fn new(origin: &str) -> Result<Self, AssetError> {
        let uri: Uri = origin
            .parse()
            .map_err(|_| AssetError::InvalidOrigin(origin.to_string()))?;
        let (Some(scheme), Some(authority)) = (uri.scheme().cloned(), uri.authority().cloned())
        else {
            return Err(AssetError::InvalidOrigin(origin.to_string()));
        };

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Ok(Self {
            scheme,
            authority,
            client,
        })
    }

    /// Origin base URL, without trailing slash.
    pub fn base(&self) -> String {
        format!("{}://{}", self.scheme, self.authority)
    }

    /// Point the request at the origin and forward it.
    pub async fn fetch(&self, request: Request<Body>) -> Result<Response<Body>, AssetError> {
        let (mut parts, body) = request.into_parts();

        let path_and_query = parts
            .uri
            .path_and_query()
            .cloned()
            .unwrap_or_else(|| PathAndQuery::from_static("/"));
        parts.uri = Uri::builder()
            .scheme(self.scheme.clone())
            .authority(self.authority.clone())
            .path_and_query(path_and_query)
            .build()?;
        parts.version = Version::HTTP_11;

        tracing::trace!(uri = %parts.uri, method = %parts.method, "Forwarding to origin");

        let response = self.client.request(Request::from_parts(parts, body)).await?;
        Ok(response.map(Body::new))
    }
}
