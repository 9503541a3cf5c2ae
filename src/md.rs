//! Markdown posts: frontmatter, HTML body and word count.
//!
//! A post file is frontmatter (see [`crate::meta`]) followed by CommonMark
//! with the GitHub extensions (tables, footnotes, strikethrough, task lists)
//! plus `$…$` / `$$…$$` math and `{#id .class}` heading attributes.
//!
//! Math is emitted as the `<span class="math …">` wrappers pulldown-cmark
//! produces; typesetting is left to the stylesheet or a client-side script.

use crate::date::Date;
use crate::jsx::File;
use crate::meta::{self, MetaError};
use crate::slugify::slugify;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, TextMergeStream, html};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MdError {
    #[error(transparent)]
    Meta(#[from] MetaError),
    #[error("File {0} is not valid UTF-8")]
    Encoding(String),
}

/// A parsed post, ready for routing.
///
/// `previous` and `next` are filled in by [`crate::repo::Repo`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub word_count: usize,
    /// Rendered HTML, inserted into pages verbatim.
    pub body: String,
    pub created: Date,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Parse a markdown file into a post.
pub fn parse(file: &File) -> Result<Post, MdError> {
    let text = std::str::from_utf8(file.content().as_bytes())
        .map_err(|_| MdError::Encoding(file.name().to_string()))?;
    let (metadata, markdown) = meta::parse(file.name(), text)?;

    Ok(Post {
        slug: slugify(&metadata.title),
        title: metadata.title,
        summary: metadata.summary,
        tags: metadata.tags,
        word_count: count_words(markdown),
        body: render(markdown),
        created: metadata.created,
        previous: None,
        next: None,
    })
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_MATH
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Compile markdown to an HTML fragment.
pub fn render(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, Parser::new_ext(markdown, options()));
    out
}

/// Count the words of prose in a markdown document.
///
/// Only text content counts: code blocks, inline code, math, raw HTML and
/// image alt text are skipped.
pub fn count_words(markdown: &str) -> usize {
    let mut skipping = 0usize;
    let mut words = 0;
    for event in TextMergeStream::new(Parser::new_ext(markdown, options())) {
        match event {
            Event::Start(Tag::CodeBlock(_) | Tag::Image { .. }) => skipping += 1,
            Event::End(TagEnd::CodeBlock | TagEnd::Image) => {
                skipping = skipping.saturating_sub(1)
            }
            Event::Text(text) if skipping == 0 => words += text.split_whitespace().count(),
            _ => {}
        }
    }
    words
}
