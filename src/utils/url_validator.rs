//! Long URL validation.
//!
//! Redirect targets must be absolute HTTP(S) URLs with a host. The input is
//! stored exactly as given; validation never rewrites it.

use url::Url;

/// Reasons a long URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must contain a host")]
    MissingHost,
}

/// Checks that `input` is a syntactically valid absolute URL.
///
/// # Errors
///
/// - [`UrlValidationError::Empty`] for blank input
/// - [`UrlValidationError::InvalidFormat`] when the URL does not parse, which
///   includes relative and schemeless input such as `example.com/path`, or
///   when it carries control characters or surrounding whitespace that the
///   parser would silently strip
/// - [`UrlValidationError::UnsupportedProtocol`] for `javascript:`, `ftp:`, etc.
/// - [`UrlValidationError::MissingHost`] when no host is present
pub fn validate_long_url(input: &str) -> Result<(), UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }

    // The raw input becomes the `Location` header, so it must already be clean.
    if input.chars().any(|c| c.is_control()) {
        return Err(UrlValidationError::InvalidFormat(
            "URL contains control characters".to_string(),
        ));
    }
    if input.trim() != input {
        return Err(UrlValidationError::InvalidFormat(
            "URL has leading or trailing whitespace".to_string(),
        ));
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}
