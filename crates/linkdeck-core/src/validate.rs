// ── Destination URL validation ──
//
// Pure functions, no I/O. The create-link pipeline only ever sees URLs
// that pass `is_valid_url` after `normalize_url`.

use url::Url;

use crate::error::CoreError;

/// `true` if `candidate` parses as an absolute URL with a host.
///
/// Scheme-less input such as `"example.com"` is invalid until it has
/// been through [`normalize_url`].
pub fn is_valid_url(candidate: &str) -> bool {
    Url::parse(candidate).is_ok_and(|url| url.has_host())
}

/// Prepend `https://` unless the input already starts with `http://` or
/// `https://`. Total: never fails and never trims.
pub fn normalize_url(candidate: &str) -> String {
    if candidate.starts_with("http://") || candidate.starts_with("https://") {
        candidate.to_owned()
    } else {
        format!("https://{candidate}")
    }
}

/// Turn raw user input into a destination URL fit for the payload
/// builder, or reject it.
pub fn prepare_destination(input: &str) -> Result<String, CoreError> {
    if input.trim().is_empty() {
        return Err(CoreError::ValidationFailed {
            message: "Please enter a URL".into(),
        });
    }
    let normalized = normalize_url(input);
    if is_valid_url(&normalized) {
        Ok(normalized)
    } else {
        Err(CoreError::InvalidUrl {
            input: input.to_owned(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn valid_urls() {
        assert!(is_valid_url("https://a.com"));
        assert!(is_valid_url("http://localhost:8080/path?q=1"));
        assert!(is_valid_url("ftp://files.example.org/x"));
    }

    #[test]
    fn invalid_urls() {
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("mailto:someone@example.com"));
    }

    #[test]
    fn normalize_adds_missing_scheme() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("http://x.io"), "http://x.io");
        assert_eq!(normalize_url("https://x.io/a"), "https://x.io/a");
    }

    #[test]
    fn normalize_is_idempotent() {
        for input in ["example.com", "http://x.io", "https://y.io/p", "ftp://z"] {
            let once = normalize_url(input);
            assert_eq!(normalize_url(&once), once);
        }
    }

    #[test]
    fn prepare_accepts_bare_domain() {
        assert_eq!(
            prepare_destination("example.com/docs").unwrap(),
            "https://example.com/docs"
        );
    }

    #[test]
    fn prepare_rejects_empty_and_garbage() {
        assert!(matches!(
            prepare_destination("   "),
            Err(CoreError::ValidationFailed { .. })
        ));
        assert!(matches!(
            prepare_destination("not a url"),
            Err(CoreError::InvalidUrl { .. })
        ));
    }
}
