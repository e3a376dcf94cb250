//! TLS configuration and certificate loading.

use std::io;
use std::path::Path;

use axum_server::tls_rustls::RustlsConfig;

use crate::config::TlsConfig;

fn ensure_exists(path: &Path, what: &str) -> io::Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} file not found: {:?}", what, path),
        ))
    }
}

/// Load the rustls configuration for an HTTPS listener from PEM files.
pub async fn load_tls_config(config: &TlsConfig) -> io::Result<RustlsConfig> {
    let cert_path = Path::new(&config.cert_path);
    let key_path = Path::new(&config.key_path);

    ensure_exists(cert_path, "Certificate")?;
    ensure_exists(key_path, "Private key")?;

    RustlsConfig::from_pem_file(cert_path, key_path).await
}
