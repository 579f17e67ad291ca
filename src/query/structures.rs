use serde::Serialize;

use crate::error::ResolveError;

/// Tag and language used by the front page listing.
pub const INDEX_TAG: &str = "index";
pub const INDEX_LANGUAGE: &str = "all";

/// Area under which the site files its popular listings.
pub const POPULAR_AREA: &str = "popular";

/// A resolved listing query.
///
/// Only produced by [`resolve`](super::resolve), so `tag` and `language`
/// always satisfy their character classes and `page_number` is at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryDescriptor {
    area: Option<String>,
    popular: Option<String>,
    tag: String,
    tag_display: String,
    language: String,
    page_number: u32,
}

impl QueryDescriptor {
    pub(crate) fn new(
        area: Option<String>,
        popular: Option<String>,
        tag: String,
        language: String,
        page_number: u32,
    ) -> Self {
        let tag_display = display_tag(area.as_deref(), &tag);
        Self {
            area,
            popular,
            tag,
            tag_display,
            language,
            page_number,
        }
    }

    /// The front page listing at the given page.
    pub(crate) fn index(page_number: u32) -> Self {
        Self::new(
            None,
            None,
            INDEX_TAG.to_string(),
            INDEX_LANGUAGE.to_string(),
            page_number,
        )
    }

    pub fn area(&self) -> Option<&str> {
        self.area.as_deref()
    }

    pub fn popular(&self) -> Option<&str> {
        self.popular.as_deref()
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Tag as shown to users: gender namespace dropped, popular listings labelled.
    pub fn tag_display(&self) -> &str {
        &self.tag_display
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Whether the index lives under `popular/<scope>/` inside its area.
    ///
    /// Listings in the `popular` area itself already encode the scope as
    /// their tag and have no extra directory.
    pub fn is_area_popular(&self) -> bool {
        self.popular.is_some() && self.area.as_deref() != Some(POPULAR_AREA)
    }

    /// Same query at a different page.
    pub fn with_page(mut self, page_number: u32) -> Result<Self, ResolveError> {
        if page_number == 0 {
            return Err(ResolveError::InvalidPage(page_number.to_string()));
        }
        self.page_number = page_number;
        Ok(self)
    }
}

fn display_tag(area: Option<&str>, tag: &str) -> String {
    if area == Some(POPULAR_AREA) {
        return format!("popular ({})", tag);
    }
    tag.strip_prefix("female:")
        .or_else(|| tag.strip_prefix("male:"))
        .unwrap_or(tag)
        .to_string()
}
