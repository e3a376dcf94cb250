//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, extract hostname + path)
//!     → routing (pick target path)
//!     → request.rs (rewrite URI)
//!     → assets (directory or origin)
//!     → response.rs (pin asset content types)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
