//! Site layout: which file holds which page.
//!
//! ```text
//! site/
//! ├── index.html              # all posts
//! ├── about.html
//! ├── 404.html
//! ├── posts/
//! │   ├── index.html          # all posts
//! │   └── <slug>.html         # one per post
//! ├── tags/
//! │   └── <slugify(tag)>.html # posts carrying the tag
//! ├── feed.rss                # same feed under three names
//! ├── feed.xml
//! ├── rss.xml
//! ├── manifest.webmanifest
//! ├── images/favicon.svg
//! └── styles/main.css         # color variables + base stylesheet
//! ```
//!
//! The root directory is named by `paths.site_dir`. The user's assets
//! directory, when present, is merged over this tree last.

use crate::components;
use crate::config::{SiteConfig, generate_color_css};
use crate::jsx::factory::{create_dir, flatten};
use crate::jsx::{Dir, Entry, JsxError, dir, file};
use crate::md::Post;
use crate::repo::Repo;
use crate::slugify::slugify;
use crate::{attrs, children};

const MAIN_CSS: &str = include_str!("../static/main.css");
const FAVICON_SVG: &str = include_str!("../static/favicon.svg");

/// Build the site tree.
///
/// `about` is the rendered HTML body of the about page, if the source has one.
pub fn route(
    repo: &Repo,
    config: &SiteConfig,
    about: Option<&str>,
    assets: Option<Dir>,
) -> Result<Dir, JsxError> {
    let site = &config.site;
    let all: Vec<&Post> = repo.posts().iter().collect();

    let post_pages = repo
        .posts()
        .iter()
        .map(|post| file(&format!("{}.html", post.slug), children![components::post(site, post)?]))
        .collect::<Result<Vec<_>, _>>()?;

    let tag_pages = repo
        .tags()
        .iter()
        .map(|tag| {
            let heading = format!("Posts tagged {}", tag);
            let page = components::posts(site, &heading, &repo.tagged(tag))?;
            file(&format!("{}.html", slugify(tag)), children![page])
        })
        .collect::<Result<Vec<_>, _>>()?;

    let feed = components::rss(site, &all)?;
    let css = format!("{}\n\n{}", generate_color_css(&config.colors), MAIN_CSS);

    let root = create_dir(
        &attrs! { "name" => &config.paths.site_dir },
        flatten(children![
            file("about.html", children![components::about(site, about)?])?,
            file("404.html", children![components::not_found(site)?])?,
            file("index.html", children![components::posts(site, "Blog", &all)?])?,
            dir(
                "posts",
                children![
                    file("index.html", children![components::posts(site, "Blog", &all)?])?,
                    post_pages,
                ],
            )?,
            dir("tags", children![tag_pages])?,
            file("feed.rss", children![feed.clone()])?,
            file("feed.xml", children![feed.clone()])?,
            file("rss.xml", children![feed])?,
            file("manifest.webmanifest", children![manifest(config)])?,
            dir("images", children![file("favicon.svg", children![FAVICON_SVG])?])?,
            dir("styles", children![file("main.css", children![css])?])?,
        ]),
    )?;

    Ok(match assets {
        Some(assets) => root.merge(assets),
        None => root,
    })
}

/// Web app manifest, so the blog can be installed as a PWA.
fn manifest(config: &SiteConfig) -> String {
    let site = &config.site;
    serde_json::json!({
        "name": site.title,
        "short_name": site.title,
        "description": site.description,
        "lang": site.language,
        "start_url": "/",
        "display": "standalone",
        "theme_color": site.theme_color,
        "background_color": config.colors.light.background,
        "icons": [
            { "src": "/images/favicon.svg", "type": "image/svg+xml", "sizes": "any" }
        ]
    })
    .to_string()
}

/// Names of every file in the tree, as `/`-separated paths relative to its
/// root.
pub fn file_paths(dir: &Dir) -> Vec<String> {
    let mut paths = Vec::new();
    collect_paths(dir, "", &mut paths);
    paths
}

fn collect_paths(dir: &Dir, prefix: &str, paths: &mut Vec<String>) {
    for entry in dir.entries() {
        let path = format!("{}{}", prefix, entry.name());
        match entry {
            Entry::File(_) => paths.push(path),
            Entry::Dir(sub) => collect_paths(sub, &format!("{}/", path), paths),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jsx::{Content, File};
    use crate::test_helpers::{find_text, post, subdir};

    fn two_posts() -> Repo {
        Repo::new(vec![
            post("My first post", "2019-11-12", &["Python", "Java"]),
            post("My second post", "2020-03-23", &["Java"]),
        ])
    }

    fn site() -> Dir {
        route(&two_posts(), &SiteConfig::default(), None, None).unwrap()
    }

    #[test]
    fn creates_blog() {
        let site = site();
        for name in [
            "site",
            "about.html",
            "404.html",
            "index.html",
            "posts",
            "images",
            "favicon.svg",
            "styles",
            "main.css",
            "feed.rss",
            "feed.xml",
            "rss.xml",
            "manifest.webmanifest",
        ] {
            assert!(site.contains(name), "missing {name}");
        }
    }

    #[test]
    fn creates_all_posts() {
        let site = site();
        let posts = subdir(&site, "posts");
        assert!(posts.contains("my-first-post.html"));
        assert!(posts.contains("my-second-post.html"));
        assert!(posts.contains("index.html"));
    }

    #[test]
    fn creates_tag_indices() {
        let site = site();
        let tags = subdir(&site, "tags");
        assert!(tags.contains("python.html"));
        assert!(tags.contains("java.html"));
        assert_eq!(tags.entries().len(), 2);

        let python = find_text(tags, "python.html");
        assert!(python.contains("My first post"));
        assert!(!python.contains("My second post"));
    }

    #[test]
    fn pages_are_html_documents() {
        let site = site();
        assert!(find_text(&site, "about.html").starts_with("<!DOCTYPE html><html lang=\"en\">"));
        assert!(find_text(&site, "my-first-post.html").contains("<h1>My first post</h1>"));
    }

    #[test]
    fn feeds_are_xml_documents() {
        let site = site();
        for name in ["feed.rss", "feed.xml", "rss.xml"] {
            let feed = find_text(&site, name);
            assert!(feed.starts_with(r#"<?xml version="1.0"?><rss version="1.0">"#));
            assert!(feed.contains("https://example.com/posts/my-second-post.html"));
        }
    }

    #[test]
    fn post_pages_link_neighbours() {
        let site = site();
        let first = find_text(&site, "my-first-post.html");
        assert!(first.contains(r#"<a href="/posts/my-second-post.html">Next</a>"#));
        assert!(first.contains(r#"<span class="pagination-item">Previous</span>"#));
    }

    #[test]
    fn stylesheet_starts_with_color_variables() {
        let site = site();
        let css = find_text(&site, "main.css");
        assert!(css.starts_with(":root {"));
        assert!(css.contains("#sidebar"));
    }

    #[test]
    fn manifest_is_json() {
        let site = site();
        let manifest: serde_json::Value =
            serde_json::from_str(find_text(&site, "manifest.webmanifest")).unwrap();
        assert_eq!(manifest["name"], "quire");
        assert_eq!(manifest["start_url"], "/");
    }

    #[test]
    fn names_root_after_config() {
        let mut config = SiteConfig::default();
        config.paths.site_dir = "public".to_string();
        let site = route(&two_posts(), &config, None, None).unwrap();
        assert_eq!(site.name(), "public");
    }

    #[test]
    fn uses_about_body() {
        let site = route(&two_posts(), &SiteConfig::default(), Some("<p>Hi there</p>"), None)
            .unwrap();
        assert!(find_text(&site, "about.html").contains("<p>Hi there</p>"));
    }

    #[test]
    fn merges_assets_over_built_in_files() {
        let assets = Dir::new(
            "assets",
            vec![
                Entry::File(File::new("robots.txt", Content::Binary(b"User-agent: *".to_vec()))),
                Entry::Dir(Dir::new(
                    "styles",
                    vec![Entry::File(File::new(
                        "main.css",
                        Content::Binary(b"body { color: red; }".to_vec()),
                    ))],
                )),
            ],
        );
        let site = route(&two_posts(), &SiteConfig::default(), None, Some(assets)).unwrap();

        assert_eq!(site.name(), "site");
        assert!(site.contains("robots.txt"));
        assert_eq!(
            site.find_file("main.css").unwrap().content().as_bytes(),
            b"body { color: red; }"
        );
        assert!(site.contains("favicon.svg"));
    }

    #[test]
    fn empty_repo_still_builds_indices() {
        let site = route(&Repo::new(Vec::new()), &SiteConfig::default(), None, None).unwrap();
        assert!(site.contains("index.html"));
        assert!(subdir(&site, "tags").entries().is_empty());
        assert!(find_text(&site, "feed.rss").contains("<items />"));
    }

    #[test]
    fn lists_file_paths() {
        let paths = file_paths(&site());
        assert!(paths.contains(&"posts/my-first-post.html".to_string()));
        assert!(paths.contains(&"styles/main.css".to_string()));
        assert!(paths.contains(&"index.html".to_string()));
        assert_eq!(paths.len(), 14);
    }
}
