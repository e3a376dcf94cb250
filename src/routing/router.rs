//! Route lookup and rewrite.
//!
//! # Responsibilities
//! - Pick the virtual site for a hostname
//! - Rewrite the request path into that site's subtree
//! - Resolve directory paths to their default document (`index.html`)
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Pure string-prefix transformer: no `..`, `//` or percent-decoding
//! - Never fails: unknown hosts pass through unchanged

use crate::routing::matcher::{match_site, Site};
use crate::routing::rules::{apply_first, RewriteRule, ADMIN_ALIASES};

const STUDENT_ROOT: &str = "/acs_subdomains/acs_students";
const SIGNUP_ROOT: &str = "/acs_subdomains/acs_signup";
const ADMIN_ROOT: &str = "/acs_subdomains/acs_admin";

const DEFAULT_DOCUMENT: &str = "index.html";

/// Routing input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub hostname: String,
    pub path: String,
}

impl RouteRequest {
    pub fn new(hostname: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            path: path.into(),
        }
    }
}

/// Routing output: where to fetch the asset from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDecision {
    /// Site branch that produced the decision.
    pub site: Site,
    /// Path to request from the asset store.
    pub target_path: String,
}

/// Hostname-based router emulating subdomains on a single static origin.
#[derive(Debug, Clone)]
pub struct HostnameRouter {
    admin_aliases: &'static [RewriteRule],
}

impl Default for HostnameRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl HostnameRouter {
    /// Router with the deployed site and alias tables.
    pub fn new() -> Self {
        Self {
            admin_aliases: ADMIN_ALIASES,
        }
    }

    /// Router with a custom admin alias table.
    pub fn with_admin_aliases(admin_aliases: &'static [RewriteRule]) -> Self {
        Self { admin_aliases }
    }

    pub fn admin_aliases(&self) -> &[RewriteRule] {
        self.admin_aliases
    }

    /// Route a request.
    pub fn route_request(&self, request: &RouteRequest) -> RouteDecision {
        self.route(&request.hostname, &request.path)
    }

    /// Map (hostname, path) to the asset path that should be served.
    ///
    /// Any query string or fragment on `path` is ignored.
    pub fn route(&self, hostname: &str, path: &str) -> RouteDecision {
        let path = strip_query(path);
        let site = match_site(hostname);

        let target_path = match site {
            Site::Student => route_student(path),
            Site::Signup => route_signup(path),
            Site::Admin => self.route_admin(path),
            Site::Main => path.to_string(),
        };

        tracing::debug!(
            hostname = %hostname,
            path = %path,
            site = %site,
            target = %target_path,
            "Route resolved"
        );

        RouteDecision { site, target_path }
    }

    fn route_admin(&self, path: &str) -> String {
        if is_root(path) || path == "/login" {
            return format!("{}/{}", ADMIN_ROOT, DEFAULT_DOCUMENT);
        }
        if let Some(rest) = path.strip_prefix("/assets/admin/") {
            return format!("{}/assets/{}", ADMIN_ROOT, rest);
        }
        let aliased = apply_first(self.admin_aliases, path);
        with_default_document(format!("{}{}", ADMIN_ROOT, aliased))
    }
}

fn route_student(path: &str) -> String {
    if is_root(path) {
        return format!("{}/{}", STUDENT_ROOT, DEFAULT_DOCUMENT);
    }
    if path.starts_with("/assets/") {
        return format!("{}{}", STUDENT_ROOT, path);
    }
    with_default_document(format!("{}{}", STUDENT_ROOT, path))
}

fn route_signup(path: &str) -> String {
    if is_root(path) {
        return format!("{}/{}", SIGNUP_ROOT, DEFAULT_DOCUMENT);
    }
    with_default_document(format!("{}{}", SIGNUP_ROOT, path))
}

fn is_root(path: &str) -> bool {
    path.is_empty() || path == "/"
}

fn strip_query(path: &str) -> &str {
    match path.find(['?', '#']) {
        Some(idx) => &path[..idx],
        None => path,
    }
}

/// A path "looks like a file" when its last segment contains a dot.
///
/// Dotted directory names (`/release-1.2`) are treated as files too; this
/// matches the deployed router.
pub fn looks_like_file(path: &str) -> bool {
    path.rsplit('/').next().is_some_and(|segment| segment.contains('.'))
}

/// Append `/` to extensionless paths, then `index.html` to directory paths.
pub fn with_default_document(mut target: String) -> String {
    if !looks_like_file(&target) && !target.ends_with('/') {
        target.push('/');
    }
    if target.ends_with('/') {
        target.push_str(DEFAULT_DOCUMENT);
    }
    target
}
