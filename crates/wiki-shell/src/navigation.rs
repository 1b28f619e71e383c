//! Navigation Policy
//!
//! The webview holds the command bridge, so it may only ever show the
//! shell's own front-end. Links to remote sites or local files are refused.

use reqwest::Url;

/// Origins a bundled front-end is served from, per platform
const BUNDLED_ORIGINS: &[&str] = &[
    "tauri://localhost",
    "http://tauri.localhost",
    "https://tauri.localhost",
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct Origin {
    scheme: String,
    host: Option<String>,
    port: Option<u16>,
}

impl Origin {
    fn of(url: &Url) -> Self {
        Self {
            scheme: url.scheme().to_string(),
            host: url.host_str().map(str::to_string),
            port: url.port_or_known_default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NavigationPolicy {
    allowed: Vec<Origin>,
}

impl NavigationPolicy {
    /// Bundled origins, plus the dev server origin while developing
    pub fn new(dev_url: Option<&str>) -> Self {
        let allowed = BUNDLED_ORIGINS
            .iter()
            .copied()
            .chain(dev_url)
            .filter_map(|raw| match Url::parse(raw) {
                Ok(url) => Some(Origin::of(&url)),
                Err(err) => {
                    log::warn!("Ignoring app origin {}: {}", raw, err);
                    None
                }
            })
            .collect();
        Self { allowed }
    }

    /// Whether the webview may load `url`; refusals are logged
    pub fn allows(&self, url: &str) -> bool {
        let allowed = Url::parse(url)
            .map(|parsed| self.allowed.contains(&Origin::of(&parsed)))
            .unwrap_or(false);
        if !allowed {
            log::warn!("Blocked navigation to {}", url);
        }
        allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_front_end_allowed() {
        let policy = NavigationPolicy::new(None);
        assert!(policy.allows("tauri://localhost/"));
        assert!(policy.allows("tauri://localhost/index.html#/settings"));
        assert!(policy.allows("http://tauri.localhost/index.html"));
        assert!(policy.allows("https://tauri.localhost/"));
    }

    #[test]
    fn test_foreign_urls_blocked() {
        let policy = NavigationPolicy::new(None);
        for url in [
            "https://example.com/",
            "http://localhost:1420/",
            "tauri://evil.example/",
            "https://tauri.localhost.example.com/",
            "file:///etc/passwd",
            "javascript:alert(1)",
            "not a url",
        ] {
            assert!(!policy.allows(url), "{} should be blocked", url);
        }
    }

    #[test]
    fn test_dev_server_origin() {
        let policy = NavigationPolicy::new(Some("http://localhost:1420"));
        assert!(policy.allows("http://localhost:1420/"));
        assert!(policy.allows("http://localhost:1420/index.html?x=1"));
        assert!(!policy.allows("http://localhost:1421/"));
        assert!(!policy.allows("https://localhost:1420/"));
        assert!(policy.allows("tauri://localhost/"));
    }
}
