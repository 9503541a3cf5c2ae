//! # Quire
//!
//! A small static blog generator. Posts are markdown files with YAML
//! frontmatter; pages are built with a JSX-like element tree and laid out as
//! a virtual directory tree before anything touches the disk.
//!
//! # Architecture: One Linear Pipeline
//!
//! ```text
//! 1. Read     source/       →  File / Dir tree        (reader)
//! 2. Parse    posts/*.md    →  Post records           (meta, md)
//! 3. Index    posts         →  Repo                   (repo)
//! 4. Route    Repo          →  site Dir tree          (components, router)
//! 5. Write    site Dir      →  output/site/           (writer)
//! ```
//!
//! Every stage between read and write is a pure function over in-memory
//! trees. All filesystem access goes through the [`storage::Storage`] trait,
//! so tests drive the whole pipeline against an in-memory mock.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`jsx`] | Element / Fragment / File / Dir trees and the factory that builds them |
//! | [`components`] | Page components: layout, post, index, about, 404 and the RSS feed |
//! | [`router`] | Assembles the site directory tree from the repo and config |
//! | [`meta`] | YAML frontmatter extraction and schema validation |
//! | [`md`] | Markdown to HTML compilation and word count, producing [`md::Post`] |
//! | [`repo`] | Sorted post collection with neighbour links and tags |
//! | [`date`] | Calendar dates for `created` and their display formats |
//! | [`slugify`] | URL slugs for post titles and tags |
//! | [`storage`] | Filesystem seam: `Storage` trait and `DiskStorage` |
//! | [`reader`] | Reads a path into a virtual `File` / `Dir` tree |
//! | [`writer`] | Writes a virtual tree to storage, siblings in parallel |
//! | [`config`] | `quire.toml` loading, merging, validation and color CSS |
//! | [`pipeline`] | Load, render and build: the stages above wired together |
//! | [`output`] | CLI output formatting for `check` and `build` |
//!
//! # Design Decisions
//!
//! ## Trees Before Files
//!
//! The router produces the complete site as a [`jsx::Dir`] before the writer
//! runs. A build that fails anywhere (bad frontmatter, an invalid tree) fails
//! before the first byte is written, and tests assert on the tree directly.
//!
//! ## Explicit Factory Dispatch
//!
//! [`jsx::create_element`] dispatches on an explicit [`jsx::ElementType`]
//! to `create_tag`, `create_file`, `create_dir` or a component call.
//! Components mostly use the [`jsx::element`], [`jsx::file`] and [`jsx::dir`]
//! shorthands, which call those constructors directly. Misuse (a directory
//! inside a paragraph, a file with two children) is a [`jsx::JsxError`] at
//! the construction site.
//!
//! ## Escaping Is the Caller's Job
//!
//! The engine renders children verbatim so that compiled post bodies can be
//! inserted as HTML. Components escape every string taken from frontmatter or
//! configuration with [`jsx::escape`].

pub mod components;
pub mod config;
pub mod date;
pub mod jsx;
pub mod md;
pub mod meta;
pub mod output;
pub mod pipeline;
pub mod reader;
pub mod repo;
pub mod router;
pub mod slugify;
pub mod storage;
pub mod writer;

#[cfg(test)]
pub(crate) mod test_helpers;
