//! A small JSX-like tree language for building pages and the site layout.
//!
//! Two trees live here:
//!
//! - **Markup**: [`Node`] is an [`Element`] (tag, [`Attributes`], children),
//!   a [`Fragment`] (children only) or a primitive leaf [`Value`]. Nodes
//!   compare structurally, support recursive [`Node::contains`] and
//!   [`Node::find`], and render to HTML/XML/RSS through `Display`.
//! - **Virtual filesystem**: [`File`] (rendered text or binary content) and
//!   [`Dir`] (ordered files and directories). This is what gets written out.
//!
//! Everything is built through the factory in [`factory`], usually via the
//! [`element`], [`file`] and [`dir`] shorthands together with the [`attrs!`]
//! and [`children!`] macros:
//!
//! ```
//! use quire::jsx::{dir, element, file};
//! use quire::{attrs, children};
//!
//! let page = element("p", attrs! { "class" => "greeting" }, children!["Hello"]).unwrap();
//! let site = dir("site", children![file("index.html", children![page]).unwrap()]).unwrap();
//! assert!(site.contains("index.html"));
//! ```
//!
//! Trees are built bottom-up and never mutated afterwards.

mod attributes;
mod escape;
pub mod factory;
mod fs;
mod node;

pub use attributes::{Attributes, Value};
pub use escape::escape;
pub use factory::{
    Child, Children, Component, ElementType, JsxError, Props, component, create_element, dir,
    element, file, fragment,
};
pub use fs::{Content, Dir, Entry, File};
pub use node::{Element, Fragment, Node};

/// Build [`Attributes`] from `"name" => value` pairs.
#[macro_export]
macro_rules! attrs {
    () => {
        $crate::jsx::Attributes::empty()
    };
    ($($name:literal => $value:expr),+ $(,)?) => {
        $crate::jsx::Attributes::from([$(($name, $crate::jsx::Value::from($value))),+])
    };
}

/// Build a positional children list; each argument becomes one
/// [`Children`] entry, so lists are flattened exactly one level.
#[macro_export]
macro_rules! children {
    () => {
        ::std::vec::Vec::<$crate::jsx::Children>::new()
    };
    ($($child:expr),+ $(,)?) => {
        vec![$($crate::jsx::Children::from($child)),+]
    };
}
