//! Link validation and domain extraction.

use url::Url;

use crate::types::errors::UrlError;

/// Returns true if the trimmed `text` is an absolute URL with a scheme and host.
pub fn is_valid_url(text: &str) -> bool {
    parse_link(text).is_ok()
}

/// Parses a trimmed link, rejecting relative or host-less URLs.
pub fn parse_link(text: &str) -> Result<Url, UrlError> {
    let trimmed = text.trim();
    let url = Url::parse(trimmed).map_err(|_| UrlError::InvalidUrl(trimmed.to_string()))?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::InvalidUrl(trimmed.to_string())),
    }
}

/// Hostname of `link` with the first `www.` removed, or `"qr"` if it does not parse.
pub fn display_domain(link: &str) -> String {
    match parse_link(link) {
        Ok(url) => url
            .host_str()
            .map(|h| h.replacen("www.", "", 1))
            .unwrap_or_else(|| "qr".to_string()),
        Err(_) => "qr".to_string(),
    }
}
