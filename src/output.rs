//! CLI output formatting for the `check` and `build` commands.
//!
//! # Information-First Display
//!
//! Posts are listed by their semantic identity (positional index and title)
//! with derived facts shown as indented context lines. File paths are
//! secondary: they appear as `Page:` lines or in the site tree.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Posts
//! 001 My second post (512 words)
//!     Created: 23 March 2020
//!     Tags: Java
//!     Summary: A short walk through generics and...
//!     Page: posts/my-second-post.html
//! 002 My first post (5 words)
//!     Created: 12 November 2019
//!     Tags: Python, Java
//!     Page: posts/my-first-post.html
//!
//! Tags
//! 001 Java (2 posts)
//!     Page: tags/java.html
//! 002 Python (1 post)
//!     Page: tags/python.html
//!
//! Site
//!     14 files in site/
//! ```
//!
//! ## Build
//!
//! ```text
//! site/
//!     about.html
//!     posts/
//!         index.html
//!         my-first-post.html
//!     styles/
//!         main.css
//!
//! Wrote 2 posts, 2 tags, 14 files to ./site
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::jsx::{Dir, Entry};
use crate::repo::Repo;
use crate::slugify::slugify;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 word`, `2 words`.
fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{} {}", n, noun)
    } else {
        format!("{} {}s", n, noun)
    }
}

/// Format an entity header: positional index + title + counted detail.
///
/// ```text
/// 001 My first post (5 words)
/// 002 Python (1 post)
/// ```
fn entity_header(index: usize, title: &str, n: usize, noun: &str) -> String {
    format!("{} {} ({})", format_index(index), title, count(n, noun))
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the inventory of a parsed and routed site.
pub fn format_check_output(repo: &Repo, site: &Dir) -> Vec<String> {
    let mut lines = vec!["Posts".to_string()];

    for (i, post) in repo.posts().iter().enumerate() {
        lines.push(entity_header(i + 1, &post.title, post.word_count, "word"));
        lines.push(format!("{}Created: {}", indent(1), post.created.long()));
        if !post.tags.is_empty() {
            lines.push(format!("{}Tags: {}", indent(1), post.tags.join(", ")));
        }
        let summary = truncate_desc(post.summary.trim(), 60);
        if !summary.is_empty() {
            lines.push(format!("{}Summary: {}", indent(1), summary));
        }
        lines.push(format!("{}Page: posts/{}.html", indent(1), post.slug));
    }

    if !repo.tags().is_empty() {
        lines.push(String::new());
        lines.push("Tags".to_string());
        for (i, tag) in repo.tags().iter().enumerate() {
            lines.push(entity_header(i + 1, tag, repo.tagged(tag).len(), "post"));
            lines.push(format!("{}Page: tags/{}.html", indent(1), slugify(tag)));
        }
    }

    lines.push(String::new());
    lines.push("Site".to_string());
    lines.push(format!(
        "{}{} in {}/",
        indent(1),
        count(site.file_count(), "file"),
        site.name()
    ));

    lines
}

/// Print check output to stdout.
pub fn print_check_output(repo: &Repo, site: &Dir) {
    for line in format_check_output(repo, site) {
        println!("{}", line);
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format the site tree, directories suffixed with `/`, entries in tree order.
pub fn format_site_tree(site: &Dir) -> Vec<String> {
    let mut lines = vec![format!("{}/", site.name())];
    walk_tree(site, 1, &mut lines);
    lines
}

fn walk_tree(dir: &Dir, depth: usize, lines: &mut Vec<String>) {
    for entry in dir.entries() {
        match entry {
            Entry::File(file) => lines.push(format!("{}{}", indent(depth), file.name())),
            Entry::Dir(sub) => {
                lines.push(format!("{}{}/", indent(depth), sub.name()));
                walk_tree(sub, depth + 1, lines);
            }
        }
    }
}

/// Format build output: the written tree followed by a summary line.
pub fn format_build_output(repo: &Repo, site: &Dir, output: &Path) -> Vec<String> {
    let mut lines = format_site_tree(site);
    lines.push(String::new());
    lines.push(format!(
        "Wrote {}, {}, {} to {}",
        count(repo.len(), "post"),
        count(repo.tags().len(), "tag"),
        count(site.file_count(), "file"),
        output.join(site.name()).display()
    ));
    lines
}

/// Print build output to stdout.
pub fn print_build_output(repo: &Repo, site: &Dir, output: &Path) {
    for line in format_build_output(repo, site, output) {
        println!("{}", line);
    }
}
