//! Short-URL alias table for the admin site.
//!
//! Friendly admin paths like `/students` live in deeper directories of the
//! admin subtree. The table is scanned in declaration order and the first
//! matching rule is applied once.

/// A prefix substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteRule {
    pub match_prefix: &'static str,
    pub target_prefix: &'static str,
}

impl RewriteRule {
    pub const fn new(match_prefix: &'static str, target_prefix: &'static str) -> Self {
        Self {
            match_prefix,
            target_prefix,
        }
    }

    /// A rule matches the exact prefix or the prefix followed by `/`.
    /// `/students` matches `/students` and `/students/add`, not `/studentsx`.
    pub fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(self.match_prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Apply the substitution, or `None` if the rule does not match.
    pub fn apply(&self, path: &str) -> Option<String> {
        if !self.matches(path) {
            return None;
        }
        let rest = &path[self.match_prefix.len()..];
        Some(format!("{}{}", self.target_prefix, rest))
    }
}

/// Admin aliases. Order is significant.
pub const ADMIN_ALIASES: &[RewriteRule] = &[
    RewriteRule::new("/students", "/students-clients/students"),
    RewriteRule::new("/clients", "/students-clients/clients"),
    RewriteRule::new("/courses", "/courses-services/courses"),
    RewriteRule::new("/services", "/courses-services/services"),
    RewriteRule::new("/record-payment", "/payments/record-payment"),
    RewriteRule::new("/all-payments", "/payments/all-payments"),
    RewriteRule::new("/payment-receipts", "/payments/receipts"),
    RewriteRule::new("/receipts", "/payments/receipts"),
    RewriteRule::new("/upload-materials", "/academics/upload-materials"),
    RewriteRule::new("/assignments", "/academics/assignments"),
    RewriteRule::new("/submissions", "/academics/submissions"),
    RewriteRule::new("/archived-records", "/records/archived"),
    RewriteRule::new("/archived", "/records/archived"),
    RewriteRule::new("/recently-deleted", "/records/recently-deleted"),
];

/// Apply the first matching rule in `rules`, or return the path unchanged.
pub fn apply_first(rules: &[RewriteRule], path: &str) -> String {
    rules
        .iter()
        .find_map(|rule| rule.apply(path))
        .unwrap_or_else(|| path.to_string())
}
