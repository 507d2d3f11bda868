//! HTML transformations applied to the bundled index document.

use std::sync::OnceLock;

use rand::distributions::Alphanumeric;
use rand::Rng;
use regex::{Captures, Regex};

/// Custom protocol scheme used for bundled assets.
pub const HOST_SCHEME: &str = "abcode";

/// Base URL that bundled asset references are rewritten to.
pub fn asset_base() -> &'static str {
    // WebView2 exposes custom protocols as `http://<scheme>.localhost/`.
    if cfg!(windows) {
        "http://abcode.localhost/"
    } else {
        "abcode://localhost/"
    }
}

/// The panel's own origin, as it appears in a content-security policy.
pub fn host_origin() -> &'static str {
    asset_base().trim_end_matches('/')
}

fn attr_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)(\s(?:src|href)\s*=\s*)(?:"([^"]*)"|'([^']*)')"#)
            .expect("asset attribute regex is valid")
    })
}

fn head_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<head(?:\s[^>]*)?>").expect("head regex is valid"))
}

fn html_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<html(?:\s[^>]*)?>").expect("html regex is valid"))
}

/// Whether an attribute value points at a file inside the bundle.
pub(crate) fn is_local_reference(url: &str) -> bool {
    let url = url.trim();
    if url.is_empty() || url.starts_with('#') || url.starts_with("//") {
        return false;
    }
    let lower = url.to_ascii_lowercase();
    const EXTERNAL: &[&str] = &[
        "http:",
        "https:",
        "data:",
        "blob:",
        "mailto:",
        "javascript:",
        "abcode:",
    ];
    !EXTERNAL.iter().any(|scheme| lower.starts_with(scheme))
}

/// Rewrite every local `src=`/`href=` reference to `base`.
///
/// `./assets/a.js`, `/assets/a.js` and `assets/a.js` all become
/// `{base}assets/a.js`. External and fragment references are left alone.
pub(crate) fn rewrite_asset_urls(html: &str, base: &str) -> String {
    attr_regex()
        .replace_all(html, |caps: &Captures<'_>| {
            let prefix = &caps[1];
            let (quote, value) = match (caps.get(2), caps.get(3)) {
                (Some(v), _) => ('"', v.as_str()),
                (None, Some(v)) => ('\'', v.as_str()),
                (None, None) => return caps[0].to_string(),
            };
            if !is_local_reference(value) {
                return caps[0].to_string();
            }
            let mut path = value.trim();
            while let Some(rest) = path.strip_prefix("./") {
                path = rest;
            }
            let path = path.trim_start_matches('/');
            format!("{prefix}{quote}{base}{path}{quote}")
        })
        .into_owned()
}

/// Insert `snippet` as the first thing inside `<head>`.
///
/// Documents without a head get one after `<html>`; fragments get the
/// snippet prepended.
pub(crate) fn inject_into_head(html: &str, snippet: &str) -> String {
    if let Some(m) = head_regex().find(html) {
        let mut out = String::with_capacity(html.len() + snippet.len());
        out.push_str(&html[..m.end()]);
        out.push_str(snippet);
        out.push_str(&html[m.end()..]);
        return out;
    }
    if let Some(m) = html_regex().find(html) {
        let mut out = String::with_capacity(html.len() + snippet.len() + 13);
        out.push_str(&html[..m.end()]);
        out.push_str("<head>");
        out.push_str(snippet);
        out.push_str("</head>");
        out.push_str(&html[m.end()..]);
        return out;
    }
    format!("{snippet}{html}")
}

/// Random token for the startup script's CSP nonce.
pub(crate) fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Strict policy for the bundled UI: only the host origin, the nonce'd
/// startup script, and the analysis backend.
pub(crate) fn bundled_csp(nonce: &str, backend_origin: &str) -> String {
    let host = host_origin();
    format!(
        "default-src 'none'; \
         script-src 'nonce-{nonce}' {host}; \
         style-src {host} 'unsafe-inline'; \
         img-src {host} data: https:; \
         font-src {host} data:; \
         connect-src {host} {backend_origin}"
    )
}

/// Permissive policy for the dev-server wrapper. The dev server is a
/// loopback origin under the developer's control.
pub(crate) const DEV_CSP: &str =
    "default-src * 'unsafe-inline' 'unsafe-eval' data: blob:; frame-src *; connect-src *";

/// Acquire the host bridge once and keep it on `window.hostApi`.
pub(crate) fn startup_script(nonce: &str) -> String {
    format!(
        "<script nonce=\"{nonce}\">\
         (function(){{\
         if (typeof window.acquireHostApi === 'function' && !window.hostApi) {{\
         window.hostApi = window.acquireHostApi();\
         }}\
         }})();\
         </script>"
    )
}

/// Escape a value for use inside a double-quoted HTML attribute.
pub(crate) fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
