//! Page components.
//!
//! Each component is a plain function from site metadata and posts to a
//! markup [`Node`](crate::jsx::Node), built only through the `jsx` factory.
//! Page-level components wrap their content with [`layout`], which invokes
//! [`page`] as a component.
//!
//! Text taken from frontmatter or configuration is escaped here; post bodies
//! are already HTML and are inserted verbatim.

mod about;
mod page;
mod post;
mod posts;
mod rss;

pub use about::{about, not_found};
pub use page::{layout, page, sidebar};
pub use post::{post, post_meta};
pub use posts::posts;
pub use rss::rss;
