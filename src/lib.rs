//! CraftSoft edge router library.
//!
//! Emulates the `admin`, `signup` and `acs-student` subdomains on a single
//! static origin by rewriting request paths into per-site subtrees.

pub mod assets;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;

pub use config::EdgeConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{HostnameRouter, RouteDecision, RouteRequest};
