//! Network layer subsystem.
//!
//! Plain TCP listeners are bound directly with Tokio; this module only
//! covers TLS material for HTTPS listeners.

pub mod tls;

pub use tls::load_tls_config;
