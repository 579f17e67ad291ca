//! Intake of pasted listing URLs.

use crate::error::ResolveError;

/// Reduce a pasted listing URL to the percent-decoded path [`resolve`](crate::resolve) expects.
///
/// Everything up to and including the last `<site_host>/` is dropped, so
/// both `https://hitomi.la/tag/x-english.html` and a bare `tag/x-english.html`
/// end up as `tag/x-english.html`. A single leading `/` is dropped too.
///
/// # Errors
///
/// Returns [`ResolveError::InvalidEncoding`] if the decoded bytes are not UTF-8.
pub fn path_from_url(input: &str, site_host: &str) -> Result<String, ResolveError> {
    let input = input.trim();
    let marker = format!("{}/", site_host);

    let path = match input.rfind(&marker) {
        Some(idx) => &input[idx + marker.len()..],
        // A bare host means the front page
        None if input.ends_with(site_host) && input.contains("://") => "",
        None => input,
    };
    let path = path.strip_prefix('/').unwrap_or(path);

    urlencoding::decode(path)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| ResolveError::InvalidEncoding)
}
