//! Link normalization helpers for Stack Exchange post URLs.
//!
//! These turn site shorthands into domains, pull the API site parameter and
//! the post id out of a post URL, and build the matching metasmoke link.
//!
//! License: MIT OR APACHE 2.0

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Site shorthand suffixes and the domain each one expands to.
const SHORTHAND_SUFFIXES: [(&str, &str); 5] = [
    ("so", "stackoverflow.com"),
    ("se", "stackexchange.com"),
    ("su", "superuser.com"),
    ("sf", "serverfault.com"),
    ("au", "askubuntu.com"),
];

const METASMOKE_HOST: &str = "m.erwaysoftware.com";

static SITE_PARSER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"((?:meta\.)?(?:(?:(?:math|(?:\w{2}\.)?stack)overflow|askubuntu|superuser|serverfault)|\w+)(?:\.meta)?)\.(?:stackexchange\.com|com|net)",
    )
    .expect("site parser pattern is valid")
});

static POST_ID_PARSER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:https?:)?//[^/]+/\w+/(\d+)").expect("post id pattern is valid"));

// Sites whose API parameter does not follow the generic rules.
static API_PARAMETER_EXCEPTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("meta.superuser", "meta.superuser"),
        ("meta.serverfault", "meta.serverfault"),
        ("meta.askubuntu", "meta.askubuntu"),
        ("mathoverflow", "mathoverflow.net"),
        ("meta.mathoverflow", "meta.mathoverflow.net"),
        ("meta.stackexchange", "meta"),
    ])
});

/// Expands a site shorthand such as `so` or `meta.se` into a domain.
///
/// The input is lowercased; only the first matching suffix is replaced.
pub fn expand_shorthand_link(s: &str) -> String {
    let lowered = s.to_lowercase();
    for (suffix, domain) in SHORTHAND_SUFFIXES {
        if let Some(stem) = lowered.strip_suffix(suffix) {
            return format!("{}{}", stem, domain);
        }
    }
    lowered
}

/// Extracts the API `site` parameter from a post link.
pub fn api_parameter_from_link(link: &str) -> Option<String> {
    let caps = SITE_PARSER.captures(link)?;
    let site = caps.get(1)?.as_str();

    if let Some(exception) = API_PARAMETER_EXCEPTIONS.get(site) {
        return Some((*exception).to_string());
    }
    if site.contains("meta.") && !site.contains("stackoverflow") {
        // "meta.example" is addressed as "example.meta".
        return Some(site.split('.').rev().collect::<Vec<_>>().join("."));
    }
    Some(site.to_string())
}

/// Extracts the numeric post id from a post link.
pub fn post_id_from_link(link: &str) -> Option<String> {
    POST_ID_PARSER
        .captures(link)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Builds the metasmoke link for a post URL.
///
/// Parts that cannot be extracted render as `None`, which metasmoke answers
/// with a not-found page rather than a wrong post.
pub fn to_metasmoke_link(post_url: &str, with_protocol: bool) -> String {
    let site = api_parameter_from_link(post_url).unwrap_or_else(|| "None".to_string());
    let post_id = post_id_from_link(post_url).unwrap_or_else(|| "None".to_string());
    format!(
        "{}//{}/posts/uid/{}/{}",
        if with_protocol { "https:" } else { "" },
        METASMOKE_HOST,
        site,
        post_id
    )
}

/// Escapes braces so the text survives a later format pass.
pub fn escape_format(s: &str) -> String {
    s.replace('{', "{{").replace('}', "}}")
}
