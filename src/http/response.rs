//! Response shaping.
//!
//! Static hosts sometimes serve scripts and stylesheets with a generic
//! content type, which browsers refuse under `nosniff`. Successful responses
//! for `.css` and `.js` targets get their content type pinned.
//!
//! The asset store only ever sees rewritten paths, so a relative redirect it
//! emits (a directory without a trailing slash) points into a site subtree.
//! Followed on a subdomain, the router would prefix that path a second time.

use axum::http::header::{HeaderValue, CONTENT_TYPE, LOCATION, X_CONTENT_TYPE_OPTIONS};
use axum::http::Response;

/// Content type forced for a target path, if any.
pub fn forced_content_type(target_path: &str) -> Option<&'static str> {
    if target_path.ends_with(".css") {
        Some("text/css")
    } else if target_path.ends_with(".js") {
        Some("application/javascript")
    } else {
        None
    }
}

/// Pin script/stylesheet content types on successful responses.
pub fn apply_asset_headers<B>(target_path: &str, response: &mut Response<B>) {
    if !response.status().is_success() {
        return;
    }
    let Some(content_type) = forced_content_type(target_path) else {
        return;
    };
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
}

/// Whether the response redirects to a path on the asset store itself.
pub fn is_internal_redirect<B>(response: &Response<B>) -> bool {
    if !response.status().is_redirection() {
        return false;
    }
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|location| location.starts_with('/') && !location.starts_with("//"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn response(status: StatusCode) -> Response<()> {
        Response::builder()
            .status(status)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(())
            .unwrap()
    }

    #[test]
    fn test_forced_content_type() {
        assert_eq!(forced_content_type("/a/app.css"), Some("text/css"));
        assert_eq!(forced_content_type("/a/app.js"), Some("application/javascript"));
        assert_eq!(forced_content_type("/a/app.json"), None);
        assert_eq!(forced_content_type("/a/index.html"), None);
    }

    #[test]
    fn test_apply_on_success() {
        let mut res = response(StatusCode::OK);
        apply_asset_headers("/acs_subdomains/acs_admin/assets/admin.js", &mut res);
        assert_eq!(res.headers()[CONTENT_TYPE], "application/javascript");
        assert_eq!(res.headers()[X_CONTENT_TYPE_OPTIONS], "nosniff");
    }

    #[test]
    fn test_internal_redirect() {
        let redirect = |location: &str| {
            Response::builder()
                .status(StatusCode::TEMPORARY_REDIRECT)
                .header(LOCATION, location)
                .body(())
                .unwrap()
        };
        assert!(is_internal_redirect(&redirect("/acs_subdomains/acs_admin/assets/css/")));
        assert!(!is_internal_redirect(&redirect("https://craftsoft.co.in/")));
        assert!(!is_internal_redirect(&redirect("//cdn.example/app.js")));
        assert!(!is_internal_redirect(&response(StatusCode::OK)));
    }

    #[test]
    fn test_not_found_untouched() {
        let mut res = response(StatusCode::NOT_FOUND);
        apply_asset_headers("/missing.css", &mut res);
        assert_eq!(res.headers()[CONTENT_TYPE], "application/octet-stream");
        assert!(res.headers().get(X_CONTENT_TYPE_OPTIONS).is_none());
    }
}
