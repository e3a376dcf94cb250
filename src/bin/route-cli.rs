use clap::Parser;
use serde_json::json;
use url::Url;

use craftsoft_edge::routing::HostnameRouter;

#[derive(Parser)]
#[command(name = "route-cli")]
#[command(about = "Show where the edge router sends a URL", long_about = None)]
struct Cli {
    /// Full URL, e.g. https://admin.craftsoft.co.in/students
    url: Option<String>,

    /// Hostname, when no URL is given
    #[arg(long)]
    host: Option<String>,

    /// Path, when no URL is given
    #[arg(long, default_value = "/")]
    path: String,

    /// Print the decision as JSON
    #[arg(long)]
    json: bool,
}

/// Path of a URL exactly as typed. `Url` resolves `..` and percent-encodes,
/// which the edge server never does.
fn raw_path(raw: &str) -> &str {
    let after_scheme = raw.split_once("://").map_or(raw, |(_, rest)| rest);
    let path = match after_scheme.find(['/', '?', '#']) {
        Some(idx) => &after_scheme[idx..],
        None => "",
    };
    match path.find(['?', '#']) {
        Some(idx) => &path[..idx],
        None => path,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (hostname, path) = match (&cli.url, &cli.host) {
        (Some(raw), _) => {
            let url = Url::parse(raw)?;
            let host = url.host_str().unwrap_or_default().to_string();
            (host, raw_path(raw).to_string())
        }
        (None, Some(host)) => (host.clone(), cli.path.clone()),
        (None, None) => return Err("either a URL or --host is required".into()),
    };

    let decision = HostnameRouter::new().route(&hostname, &path);

    if cli.json {
        let out = json!({
            "hostname": hostname,
            "path": path,
            "site": decision.site.as_str(),
            "target_path": decision.target_path,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", decision.target_path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_path_kept_verbatim() {
        assert_eq!(raw_path("https://acs-student.craftsoft.co.in/a/../b"), "/a/../b");
        assert_eq!(raw_path("https://admin.craftsoft.co.in:8443/a b?x=1"), "/a b");
        assert_eq!(raw_path("https://admin.craftsoft.co.in/students#top"), "/students");
        assert_eq!(raw_path("https://admin.craftsoft.co.in"), "");
        assert_eq!(raw_path("https://admin.craftsoft.co.in?next=/x"), "");
    }

    #[test]
    fn test_raw_path_routes_like_server() {
        let path = raw_path("https://acs-student.craftsoft.co.in/../secret");
        let decision = HostnameRouter::new().route("acs-student.craftsoft.co.in", path);
        assert_eq!(
            decision.target_path,
            "/acs_subdomains/acs_students/../secret/index.html"
        );
    }
}
