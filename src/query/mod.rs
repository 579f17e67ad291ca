//! Listing path resolution.
//!
//! Turns the path portion of a gallery listing URL into a [`QueryDescriptor`]
//! that names the nozomi index to read and the page within it.
//!
//! ## Path Shapes
//!
//! The site overloads a handful of path shapes that must be told apart:
//!
//! - `""` and `?page=N`: the front page (`index-all`)
//! - `<tag>-<language>.html`: a plain tag listing
//! - `<area>/<tag>-<language>.html`: a tag scoped to an area such as `series`
//! - `popular/<scope>-<language>.html`: the popular listing for a time window
//! - `<area>/popular/<scope>/<tag>-<language>.html`: popular within an area
//!
//! Any of these may carry a trailing `?page=N`. Tags may themselves contain
//! hyphens, so only the last hyphen separates the language.
//!
//! - [`structures`]: the resolved [`QueryDescriptor`]
//! - [`parser`]: the resolution algorithm

mod parser;
mod structures;

pub use parser::{AreaChain, resolve, split_area_chain, split_language, split_page_suffix};
pub use structures::QueryDescriptor;
