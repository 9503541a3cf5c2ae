//! Shared test utilities for the quire test suite.
//!
//! Provides post fixtures (in memory and on disk) and lookup helpers for the
//! virtual site tree.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let repo = Repo::new(sample_posts());
//! let site = route(&repo, &SiteConfig::default(), None, None).unwrap();
//!
//! let page = find_text(&site, "my-first-post.html");
//! assert!(page.contains("My first post"));
//! ```

use std::path::Path;

use crate::jsx::{Dir, Entry, Node};
use crate::md::Post;
use crate::slugify::slugify;

// =========================================================================
// Post fixtures
// =========================================================================

/// A post with a fixed summary and body. `created` is `YYYY-MM-DD`.
pub fn post(title: &str, created: &str, tags: &[&str]) -> Post {
    Post {
        title: title.to_string(),
        slug: slugify(title),
        summary: "Lorem ipsum delorum sit amet".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        word_count: 5,
        body: "<p>Lorem ipsum delorum sit amet</p>".to_string(),
        created: created
            .parse()
            .unwrap_or_else(|e| panic!("bad fixture date '{created}': {e}")),
        previous: None,
        next: None,
    }
}

/// Three posts in publication order (oldest first), tagged Python/Java.
pub fn sample_posts() -> Vec<Post> {
    vec![
        post("My first post", "2019-11-12", &["Python", "Java"]),
        post("My second post", "2020-03-23", &["Java"]),
        post("My third post", "2022-02-24", &["Python"]),
    ]
}

/// Markdown source for a post with the given frontmatter.
pub fn markdown(title: &str, created: &str, tags: &[&str], body: &str) -> String {
    format!(
        "---\ntitle: {title}\nsummary: Notes on {title}\ntags: [{}]\ncreated: {created}\n---\n{body}\n",
        tags.join(", ")
    )
}

/// Write a markdown post into `dir`, creating it if needed.
pub fn write_post(dir: &Path, file_name: &str, source: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(file_name), source).unwrap();
}

// =========================================================================
// Site tree lookups: panic with a clear message on miss
// =========================================================================

/// Text content of the first file called `name` anywhere in `dir`.
pub fn find_text<'a>(dir: &'a Dir, name: &str) -> &'a str {
    let file = dir
        .find_file(name)
        .unwrap_or_else(|| panic!("file '{name}' not found. Available: {:?}", file_names(dir)));
    file.content()
        .as_text()
        .unwrap_or_else(|| panic!("file '{name}' has binary content"))
}

/// Direct subdirectory of `dir` called `name`.
pub fn subdir<'a>(dir: &'a Dir, name: &str) -> &'a Dir {
    match dir.get(name) {
        Some(Entry::Dir(sub)) => sub,
        _ => panic!("directory '{name}' not found in '{}'", dir.name()),
    }
}

/// Names of all files below `dir`, depth first.
pub fn file_names(dir: &Dir) -> Vec<&str> {
    let mut names = Vec::new();
    for entry in dir.entries() {
        match entry {
            Entry::File(file) => names.push(file.name()),
            Entry::Dir(sub) => names.extend(file_names(sub)),
        }
    }
    names
}

// =========================================================================
// Markup lookups
// =========================================================================

/// `href` of every `<a>` below `node`.
pub fn hrefs(node: &Node) -> Vec<&str> {
    node.find_by_name("a")
        .into_iter()
        .filter_map(|a| a.attributes()?.get("href")?.as_text())
        .collect()
}
