use serde::Serialize;
use std::fmt;

use crate::io::ByteRange;
use crate::query::QueryDescriptor;

/// Size of one index entry in bytes
pub const ENTRY_SIZE: u64 = 4;

/// Default file extension of index files
pub const DEFAULT_EXTENSION: &str = ".nozomi";

/// Location of an index file relative to the host root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexAddress(String);

impl IndexAddress {
    /// Build the address for a query
    ///
    /// * no area: `<tag>-<language><ext>`
    /// * area: `<area>/<tag>-<language><ext>`
    /// * area with popular scope: `<area>/popular/<scope>/<tag>-<language><ext>`
    pub fn for_query(query: &QueryDescriptor, extension: &str) -> Self {
        let file = format!("{}-{}{}", query.tag(), query.language(), extension);

        let path = match (query.area(), query.popular()) {
            (Some(area), Some(popular)) if query.is_area_popular() => {
                format!("{}/popular/{}/{}", area, popular, file)
            }
            (Some(area), _) => format!("{}/{}", area, file),
            (None, _) => file,
        };

        Self(path)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IndexAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Byte range holding a 1-based page of `entries_per_page` entries
///
/// Returns `None` for page 0, an empty page size, or offsets past `u64`.
pub fn page_range(page_number: u32, entries_per_page: u32) -> Option<ByteRange> {
    let page_bytes = u64::from(entries_per_page).checked_mul(ENTRY_SIZE)?;
    if page_bytes == 0 {
        return None;
    }
    let start = u64::from(page_number.checked_sub(1)?).checked_mul(page_bytes)?;
    let end = start.checked_add(page_bytes - 1)?;
    Some(ByteRange { start, end })
}

/// Parsed `Content-Range: bytes <start>-<end>/<total>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRange {
    pub start: u64,
    pub end: u64,
    /// Length of the whole file in bytes
    pub total: u64,
}

impl ContentRange {
    /// Number of entries in the whole index
    pub fn total_entries(&self) -> u64 {
        self.total / ENTRY_SIZE
    }
}

/// One page (or all) of an index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexFetchResult {
    /// Gallery identifiers in index order
    pub identifiers: Vec<i32>,
    /// Entries in the whole remote index
    pub total_items: u64,
}

impl IndexFetchResult {
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Number of pages needed to show every entry
    pub fn page_count(&self, entries_per_page: u32) -> u64 {
        if entries_per_page == 0 {
            return 0;
        }
        self.total_items.div_ceil(u64::from(entries_per_page))
    }
}

impl IntoIterator for IndexFetchResult {
    type Item = i32;
    type IntoIter = std::vec::IntoIter<i32>;

    fn into_iter(self) -> Self::IntoIter {
        self.identifiers.into_iter()
    }
}

impl<'a> IntoIterator for &'a IndexFetchResult {
    type Item = &'a i32;
    type IntoIter = std::slice::Iter<'a, i32>;

    fn into_iter(self) -> Self::IntoIter {
        self.identifiers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::resolve;

    #[test]
    fn page_range_second_page() {
        assert_eq!(page_range(2, 25), Some(ByteRange { start: 200, end: 299 }));
        assert_eq!(page_range(1, 25), Some(ByteRange { start: 0, end: 99 }));
    }

    #[test]
    fn page_range_rejects_degenerate_input() {
        assert_eq!(page_range(0, 25), None);
        assert_eq!(page_range(1, 0), None);
    }

    #[test]
    fn page_range_large_page_fits() {
        let r = page_range(u32::MAX, 1).unwrap();
        assert_eq!(r.start, (u64::from(u32::MAX) - 1) * 4);
        assert_eq!(r.byte_count(), 4);
    }

    #[test]
    fn page_range_overflow() {
        assert_eq!(page_range(u32::MAX, u32::MAX), None);
    }

    #[test]
    fn address_plain_tag() {
        let q = resolve("female:filming-english.html").unwrap();
        assert_eq!(
            IndexAddress::for_query(&q, DEFAULT_EXTENSION).as_str(),
            "female:filming-english.nozomi"
        );
    }

    #[test]
    fn address_with_area() {
        let q = resolve("series/some series-all.html").unwrap();
        assert_eq!(
            IndexAddress::for_query(&q, DEFAULT_EXTENSION).as_str(),
            "series/some series-all.nozomi"
        );
    }

    #[test]
    fn address_area_popular() {
        let q = resolve("series/popular/today/female:filming-german.html").unwrap();
        assert_eq!(
            IndexAddress::for_query(&q, DEFAULT_EXTENSION).as_str(),
            "series/popular/today/female:filming-german.nozomi"
        );
    }

    #[test]
    fn address_popular_area_omits_scope_directory() {
        let q = resolve("popular/today-czech.html").unwrap();
        assert_eq!(
            IndexAddress::for_query(&q, DEFAULT_EXTENSION).as_str(),
            "popular/today-czech.nozomi"
        );
    }

    #[test]
    fn address_front_page() {
        let q = resolve("").unwrap();
        assert_eq!(IndexAddress::for_query(&q, ".nozomi").as_str(), "index-all.nozomi");
    }

    #[test]
    fn page_count_rounds_up() {
        let r = IndexFetchResult {
            identifiers: vec![],
            total_items: 1000,
        };
        assert_eq!(r.page_count(25), 40);
        assert_eq!(r.page_count(30), 34);
        assert_eq!(r.page_count(0), 0);
    }

    #[test]
    fn iterates_in_order() {
        let r = IndexFetchResult {
            identifiers: vec![3, 1, 2],
            total_items: 3,
        };
        assert_eq!((&r).into_iter().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
        assert_eq!(r.into_iter().collect::<Vec<_>>(), vec![3, 1, 2]);
    }
}
