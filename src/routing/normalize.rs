//! Site URL normalization.
//!
//! A registered site must carry an explicit scheme before it is stored or
//! navigated to. Anything else gets `http://` prepended. No further syntax
//! checking happens here.

const KNOWN_SCHEMES: [&str; 3] = ["http://", "https://", "ftp://"];

/// Returns true if `url` lacks an `http://`, `https://` or `ftp://` prefix
/// (compared case-insensitively).
pub fn needs_scheme(url: &str) -> bool {
    !KNOWN_SCHEMES.iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Ensure `url` starts with a known scheme, defaulting to `http://`.
///
/// Idempotent: normalizing twice yields the same string.
pub fn normalize(url: &str) -> String {
    if needs_scheme(url) {
        format!("http://{url}")
    } else {
        url.to_string()
    }
}
