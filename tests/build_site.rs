//! End-to-end builds against a real source directory on disk.
//!
//! Library-level tests drive `pipeline::build` with `DiskStorage`; CLI tests
//! run the compiled `quire` binary.
//!
//! Run with: cargo test --test build_site

use quire::config::{self, SiteConfig};
use quire::pipeline::{self, BuildError};
use quire::storage::DiskStorage;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const COMPLEX_NUMBERS: &str = "\
---
title: Complex numbers
summary: A short tour of the complex plane
tags: [Math, Python]
created: 2019-11-12
---
# Complex numbers

A complex number $z = a + ib$ has a real and an imaginary part.

```python
z = complex(1, 2)
```
";

const OWNERSHIP: &str = "\
---
title: Ownership & borrowing
summary: Who frees what
tags: [Rust]
created: 2021-06-01
---
Every value has exactly one owner.
";

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A source tree with two posts, an about page, an asset and a config file.
fn blog() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(&root.join("posts/complex-numbers.md"), COMPLEX_NUMBERS);
    write(&root.join("posts/ownership.md"), OWNERSHIP);
    write(&root.join("about.md"), "I write about *numbers*.");
    write(&root.join("assets/robots.txt"), "User-agent: *\n");
    write(
        &root.join("quire.toml"),
        "[site]\ntitle = \"bfdes.in\"\nauthor = \"Bruno Fernandes\"\nurl = \"https://bfdes.in\"\n",
    );
    tmp
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

// =========================================================================
// Library pipeline
// =========================================================================

#[test]
fn builds_site_on_disk() {
    let source = blog();
    let out = TempDir::new().unwrap();
    let config = config::load_config(source.path()).unwrap();

    let blog = pipeline::build(&DiskStorage, source.path(), out.path(), &config).unwrap();
    assert_eq!(blog.repo.len(), 2);

    let site = out.path().join("site");
    for path in [
        "index.html",
        "about.html",
        "404.html",
        "posts/index.html",
        "posts/complex-numbers.html",
        "posts/ownership-borrowing.html",
        "tags/math.html",
        "tags/python.html",
        "tags/rust.html",
        "feed.rss",
        "feed.xml",
        "rss.xml",
        "manifest.webmanifest",
        "images/favicon.svg",
        "styles/main.css",
        "robots.txt",
    ] {
        assert!(site.join(path).is_file(), "missing {path}");
    }
}

#[test]
fn post_pages_carry_rendered_markdown() {
    let source = blog();
    let out = TempDir::new().unwrap();
    let config = config::load_config(source.path()).unwrap();
    pipeline::build(&DiskStorage, source.path(), out.path(), &config).unwrap();

    let page = read(&out.path().join("site/posts/complex-numbers.html"));
    assert!(page.starts_with("<!DOCTYPE html><html lang=\"en\">"));
    assert!(page.contains("<title>bfdes.in</title>"));
    assert!(page.contains("<h1>Complex numbers</h1>"));
    assert!(page.contains("<code class=\"language-python\">"));
    assert!(page.contains("12 November 2019"));
    assert!(page.contains("<a href=\"/posts/ownership-borrowing.html\">Next</a>"));

    let ownership = read(&out.path().join("site/posts/ownership-borrowing.html"));
    assert!(ownership.contains("<h1>Ownership &amp; borrowing</h1>"));
}

#[test]
fn feed_uses_configured_url() {
    let source = blog();
    let out = TempDir::new().unwrap();
    let config = config::load_config(source.path()).unwrap();
    pipeline::build(&DiskStorage, source.path(), out.path(), &config).unwrap();

    let feed = read(&out.path().join("site/feed.rss"));
    assert!(feed.starts_with("<?xml version=\"1.0\"?>"));
    assert!(feed.contains("<link>https://bfdes.in/posts/complex-numbers.html</link>"));
    assert!(feed.contains("<author>Bruno Fernandes</author>"));
    assert_eq!(feed, read(&out.path().join("site/rss.xml")));
}

#[test]
fn about_page_uses_markdown_source() {
    let source = blog();
    let out = TempDir::new().unwrap();
    pipeline::build(&DiskStorage, source.path(), out.path(), &SiteConfig::default()).unwrap();

    let about = read(&out.path().join("site/about.html"));
    assert!(about.contains("<p>I write about <em>numbers</em>.</p>"));
}

#[test]
fn assets_replace_built_in_files() {
    let source = blog();
    write(&source.path().join("assets/styles/main.css"), "body { margin: 0; }");
    let out = TempDir::new().unwrap();
    pipeline::build(&DiskStorage, source.path(), out.path(), &SiteConfig::default()).unwrap();

    assert_eq!(
        read(&out.path().join("site/styles/main.css")),
        "body { margin: 0; }"
    );
}

#[test]
fn invalid_post_aborts_before_writing() {
    let source = blog();
    write(
        &source.path().join("posts/broken.md"),
        "---\ntitle: Broken\ncreated: 667008000\n---\nBody\n",
    );
    let out = TempDir::new().unwrap();

    let err = pipeline::build(&DiskStorage, source.path(), out.path(), &SiteConfig::default())
        .unwrap_err();
    assert!(matches!(err, BuildError::Markdown(_)));
    assert!(!out.path().join("site").exists());
}

#[test]
fn rebuild_overwrites_previous_output() {
    let source = blog();
    let out = TempDir::new().unwrap();
    let config = SiteConfig::default();
    pipeline::build(&DiskStorage, source.path(), out.path(), &config).unwrap();

    write(
        &source.path().join("posts/ownership.md"),
        &OWNERSHIP.replace("Every value", "Each value"),
    );
    pipeline::build(&DiskStorage, source.path(), out.path(), &config).unwrap();

    let page = read(&out.path().join("site/posts/ownership-borrowing.html"));
    assert!(page.contains("Each value has exactly one owner."));
}

// =========================================================================
// CLI
// =========================================================================

fn quire(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_quire"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn cli_build_writes_site() {
    let source = blog();
    let out = TempDir::new().unwrap();
    let result = quire(&[
        "build",
        "--source",
        source.path().to_str().unwrap(),
        "--output",
        out.path().to_str().unwrap(),
    ]);

    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Wrote 2 posts, 3 tags"));
    assert!(out.path().join("site/index.html").is_file());
}

#[test]
fn cli_check_writes_nothing() {
    let source = blog();
    let out = TempDir::new().unwrap();
    let result = quire(&[
        "check",
        "--source",
        source.path().to_str().unwrap(),
        "--output",
        out.path().to_str().unwrap(),
    ]);

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("001 Ownership & borrowing (6 words)"));
    assert!(stdout.contains("==> Content is valid"));
    assert!(!out.path().join("site").exists());
}

#[test]
fn cli_scan_prints_posts_as_json() {
    let source = blog();
    let result = quire(&["scan", "--source", source.path().to_str().unwrap()]);
    assert!(result.status.success());

    let posts: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
    assert_eq!(posts[0]["title"], "Ownership & borrowing");
    assert_eq!(posts[0]["created"], "2021-06-01");
    assert_eq!(posts[1]["slug"], "complex-numbers");
    assert_eq!(posts[1]["wordCount"], 12);
}

#[test]
fn cli_gen_config_is_loadable() {
    let result = quire(&["gen-config"]);
    assert!(result.status.success());

    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("quire.toml"), &result.stdout).unwrap();
    let config = config::load_config(dir.path()).unwrap();
    let defaults = SiteConfig::default();
    assert_eq!(config.site.title, defaults.site.title);
    assert_eq!(config.site.url, defaults.site.url);
    assert_eq!(config.paths.site_dir, defaults.paths.site_dir);
    assert_eq!(config.colors.dark.link, defaults.colors.dark.link);
}

#[test]
fn cli_fails_on_invalid_config() {
    let source = blog();
    write(&source.path().join("quire.toml"), "[site]\nurl = \"https://bfdes.in/\"\n");
    let result = quire(&["check", "--source", source.path().to_str().unwrap()]);

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("site.url"));
}
