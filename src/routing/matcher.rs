//! Hostname matching logic.
//!
//! # Responsibilities
//! - Map a hostname to one of the virtual sites served from the origin
//! - Keep the evaluation order explicit (student, signup, admin)
//!
//! # Design Decisions
//! - Host matching is case-insensitive substring containment, not suffix or
//!   equality: `xadminx.example` is an admin host
//! - No match = main site

use std::fmt;

/// Virtual site a request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Site {
    /// Student portal (`acs-student.*`).
    Student,
    /// Signup pages (`signup.*`).
    Signup,
    /// Admin back-office (`admin.*`).
    Admin,
    /// Main website, bare domain and `www`.
    Main,
}

impl Site {
    /// Stable label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Site::Student => "student",
            Site::Signup => "signup",
            Site::Admin => "admin",
            Site::Main => "main",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true if `hostname` contains `needle`, ignoring ASCII case.
pub fn contains_substring(hostname: &str, needle: &str) -> bool {
    hostname
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

/// Selects a site when the hostname contains a marker substring.
#[derive(Debug, Clone, Copy)]
pub struct SiteMatcher {
    needle: &'static str,
    site: Site,
}

impl SiteMatcher {
    pub const fn new(needle: &'static str, site: Site) -> Self {
        Self { needle, site }
    }

    /// Returns the site if the hostname matches this condition.
    pub fn matches(&self, hostname: &str) -> Option<Site> {
        contains_substring(hostname, self.needle).then_some(self.site)
    }
}

/// Site matchers in evaluation order. A hostname matching several markers
/// resolves to the first one listed.
pub const SITE_MATCHERS: &[SiteMatcher] = &[
    SiteMatcher::new("acs-student", Site::Student),
    SiteMatcher::new("signup", Site::Signup),
    SiteMatcher::new("admin", Site::Admin),
];

/// Resolve the site for a hostname, falling back to the main site.
pub fn match_site(hostname: &str) -> Site {
    SITE_MATCHERS
        .iter()
        .find_map(|m| m.matches(hostname))
        .unwrap_or(Site::Main)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_substring() {
        assert!(contains_substring("admin.craftsoft.co.in", "admin"));
        assert!(contains_substring("ADMIN.craftsoft.co.in", "admin"));
        assert!(contains_substring("superadminpanel.example", "admin"));
        assert!(!contains_substring("www.craftsoft.co.in", "admin"));
    }

    #[test]
    fn test_match_site() {
        assert_eq!(match_site("acs-student.craftsoft.co.in"), Site::Student);
        assert_eq!(match_site("signup.craftsoft.co.in"), Site::Signup);
        assert_eq!(match_site("Admin.CraftSoft.co.in"), Site::Admin);
        assert_eq!(match_site("www.craftsoft.co.in"), Site::Main);
        assert_eq!(match_site("craftsoft.co.in"), Site::Main);
        assert_eq!(match_site(""), Site::Main);
    }

    #[test]
    fn test_match_order() {
        // student wins over signup and admin, signup wins over admin
        assert_eq!(match_site("acs-student-admin.example"), Site::Student);
        assert_eq!(match_site("signup-admin.example"), Site::Signup);
        assert_eq!(match_site("admin.signup.example"), Site::Signup);
    }
}
