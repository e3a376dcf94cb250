//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (hostname, path)
//!     → matcher.rs (pick the virtual site by hostname substring)
//!     → rules.rs (admin short-URL aliases, first match wins)
//!     → router.rs (subtree prefix + default document)
//!     → Return: RouteDecision (target path in the asset store)
//! ```
//!
//! # Design Decisions
//! - Rule tables are compile-time constants, immutable at runtime
//! - No regex, plain string prefixes only
//! - Deterministic: same input always produces the same target
//! - First match wins, both for sites and for aliases
//! - Total: every input produces a target, unknown hosts pass through

pub mod matcher;
pub mod router;
pub mod rules;

pub use matcher::{contains_substring, match_site, Site, SiteMatcher, SITE_MATCHERS};
pub use router::{HostnameRouter, RouteDecision, RouteRequest};
pub use rules::{RewriteRule, ADMIN_ALIASES};
