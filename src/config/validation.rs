//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, origin URI and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EdgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::Uri;
use thiserror::Error;

use crate::config::schema::EdgeConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address `{0}`")]
    BindAddress(String),
    #[error("invalid metrics address `{0}`")]
    MetricsAddress(String),
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
    #[error("asset root must not be empty when no origin is set")]
    EmptyAssetRoot,
    #[error("invalid asset origin `{0}` (expected http://host[:port])")]
    Origin(String),
    #[error("TLS certificate and key paths must not be empty")]
    EmptyTlsPath,
    #[error("unknown log level `{0}`")]
    LogLevel(String),
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &EdgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if let Some(tls) = &config.listener.tls {
        if tls.cert_path.trim().is_empty() || tls.key_path.trim().is_empty() {
            errors.push(ValidationError::EmptyTlsPath);
        }
    }

    match &config.assets.origin {
        Some(origin) => {
            if !is_valid_origin(origin) {
                errors.push(ValidationError::Origin(origin.clone()));
            }
        }
        None => {
            if config.assets.root.trim().is_empty() {
                errors.push(ValidationError::EmptyAssetRoot);
            }
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Origins are plain `http` URIs with an authority and no path beyond `/`.
fn is_valid_origin(origin: &str) -> bool {
    let Ok(uri) = origin.parse::<Uri>() else {
        return false;
    };
    let path_ok = matches!(uri.path(), "" | "/");
    uri.scheme_str() == Some("http") && uri.authority().is_some() && path_ok && uri.query().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::TlsConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&EdgeConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = EdgeConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.request_secs = 0;
        config.assets.root = "".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.contains(&ValidationError::EmptyAssetRoot));
    }

    #[test]
    fn test_origin_validation() {
        let mut config = EdgeConfig::default();
        config.assets.root = "".into();

        config.assets.origin = Some("http://127.0.0.1:9000".into());
        assert!(validate_config(&config).is_ok());

        config.assets.origin = Some("https://assets.example".into());
        assert!(validate_config(&config).is_err());

        config.assets.origin = Some("http://assets.example/site".into());
        assert!(validate_config(&config).is_err());

        config.assets.origin = Some("assets.example".into());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_tls_and_metrics() {
        let mut config = EdgeConfig::default();
        config.listener.tls = Some(TlsConfig {
            cert_path: "".into(),
            key_path: "key.pem".into(),
        });
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "nope".into();
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyTlsPath,
                ValidationError::LogLevel("loud".into()),
                ValidationError::MetricsAddress("nope".into()),
            ]
        );
    }
}
