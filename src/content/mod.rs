//! Content module - front-matter documents, posts and collections

mod collection;
mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use collection::PostCollection;
pub use error::{DocumentError, LoadError};
pub use frontmatter::{parse_date_string, Format, FrontMatter};
pub(crate) use markdown::html_escape;
pub use markdown::{MarkdownRenderer, MORE_MARKER};
pub use post::{Post, Tag};
