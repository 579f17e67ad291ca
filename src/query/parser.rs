//! Listing path parser.
//!
//! Resolution runs in a fixed order, and each step only sees what the
//! previous one left behind:
//!
//! 1. Split off a trailing `?page=N` and validate it
//! 2. Empty remainder means the front page
//! 3. Drop `.html`, then split tag from language at the last hyphen
//! 4. Collapse the `/`-separated area chain into area, popular scope and tag
//! 5. Validate area, tag and language against their character classes
//!
//! Every failure is reported as a [`ResolveError`]; no descriptor is built
//! until all checks pass.

use tracing::debug;

use crate::error::ResolveError;

use super::structures::{POPULAR_AREA, QueryDescriptor};

/// Marker that introduces the page number.
const PAGE_MARKER: &str = "?page=";

const HTML_SUFFIX: &str = ".html";

/// Pieces of the tag segment after popular collapsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaChain<'a> {
    pub area: Option<&'a str>,
    pub popular: Option<&'a str>,
    pub tag: &'a str,
}

/// Resolve a percent-decoded listing path into a [`QueryDescriptor`].
///
/// # Arguments
///
/// * `raw_path` - Everything after the site host, e.g.
///   `series/popular/today/female:filming-german.html?page=2`
///
/// # Returns
///
/// The fully validated descriptor. The page number defaults to 1.
///
/// # Errors
///
/// Returns a [`ResolveError`] naming the first rule the path breaks.
///
/// # Examples
///
/// ```
/// use nozomi::resolve;
///
/// let q = resolve("series/popular/today/female:filming-german.html").unwrap();
/// assert_eq!(q.area(), Some("series"));
/// assert_eq!(q.popular(), Some("today"));
/// assert_eq!(q.tag(), "female:filming");
/// assert_eq!(q.language(), "german");
/// assert_eq!(q.page_number(), 1);
/// ```
pub fn resolve(raw_path: &str) -> Result<QueryDescriptor, ResolveError> {
    let (path, page) = split_page_suffix(raw_path)?;
    let page_number = page.unwrap_or(1);

    // Bare host or bare `?page=N`: the front page
    if path.is_empty() {
        return Ok(QueryDescriptor::index(page_number));
    }

    let path = path.strip_suffix(HTML_SUFFIX).unwrap_or(path);
    let (head, language) = split_language(path).ok_or(ResolveError::TooFewSegments)?;
    let chain = split_area_chain(head)?;

    if !is_valid_tag(chain.tag) {
        return Err(ResolveError::InvalidTag(chain.tag.to_string()));
    }
    if !is_valid_language(language) {
        return Err(ResolveError::InvalidLanguage(language.to_string()));
    }

    debug!(
        area = ?chain.area,
        popular = ?chain.popular,
        tag = chain.tag,
        language,
        page_number,
        "resolved listing path"
    );

    Ok(QueryDescriptor::new(
        chain.area.map(str::to_string),
        chain.popular.map(str::to_string),
        chain.tag.to_string(),
        language.to_string(),
        page_number,
    ))
}

/// Split a trailing `?page=N` off a path.
///
/// A marker that is not followed by digits only is left in place and will
/// fail later validation.
///
/// # Errors
///
/// Returns [`ResolveError::InvalidPage`] when the digits are zero or overflow.
pub fn split_page_suffix(path: &str) -> Result<(&str, Option<u32>), ResolveError> {
    let Some(idx) = path.rfind(PAGE_MARKER) else {
        return Ok((path, None));
    };

    let digits = &path[idx + PAGE_MARKER.len()..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Ok((path, None));
    }

    let page = match digits.parse::<u32>() {
        Ok(n) if n >= 1 => n,
        _ => return Err(ResolveError::InvalidPage(digits.to_string())),
    };

    Ok((&path[..idx], Some(page)))
}

/// Split `<tag>-<language>` at the last hyphen.
///
/// Equivalent to splitting on every `-` and folding the leading segments
/// back together until two remain, so hyphenated tags come through whole.
/// Returns `None` when the path contains no hyphen at all.
pub fn split_language(path: &str) -> Option<(&str, &str)> {
    path.rsplit_once('-')
}

/// Collapse the `/`-separated prefix of the tag segment.
///
/// `area/popular/<scope>/tag` loses its `popular/<scope>` pair first; a
/// chain that starts with `popular/<scope>` keeps `popular` as its area and
/// the scope doubles as the tag. Exactly `area/tag` must be left over.
///
/// # Errors
///
/// * [`ResolveError::AmbiguousPopularChain`] for `popular/popular/...`
/// * [`ResolveError::AreaChainLength`] when the chain does not collapse to two parts
/// * [`ResolveError::InvalidArea`] when the area is empty or has disallowed characters
pub fn split_area_chain(head: &str) -> Result<AreaChain<'_>, ResolveError> {
    if !head.contains('/') {
        return Ok(AreaChain {
            area: None,
            popular: None,
            tag: head,
        });
    }

    let mut parts: Vec<&str> = head.split('/').collect();
    let mut popular = None;

    if parts[1] == POPULAR_AREA {
        if parts[0] == POPULAR_AREA {
            return Err(ResolveError::AmbiguousPopularChain);
        }
        popular = parts.get(2).copied();
        let end = parts.len().min(3);
        parts.drain(1..end);
    } else if parts[0] == POPULAR_AREA {
        popular = Some(parts[1]);
    }

    if parts.len() != 2 {
        return Err(ResolveError::AreaChainLength(parts.len()));
    }

    let area = parts[0];
    if !is_valid_area(area) {
        return Err(ResolveError::InvalidArea(area.to_string()));
    }

    Ok(AreaChain {
        area: Some(area),
        popular: popular.filter(|p| !p.is_empty()),
        tag: parts[1],
    })
}

fn is_valid_area(area: &str) -> bool {
    !area.is_empty() && area.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_valid_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | ' ' | '.' | '-'))
}

fn is_valid_language(language: &str) -> bool {
    !language.is_empty() && language.chars().all(|c| c.is_ascii_alphabetic())
}
