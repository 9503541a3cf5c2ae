//! The build pipeline: read → parse → repo → route → write.
//!
//! ```text
//! source/                      site/
//! ├── quire.toml               ├── index.html
//! ├── about.md        ──►      ├── about.html
//! ├── posts/*.md               ├── posts/<slug>.html
//! └── assets/**                └── … plus assets merged on top
//! ```
//!
//! All physical I/O goes through a [`Storage`], so every stage runs against
//! the in-memory mock in tests. Configuration is loaded by the caller and
//! passed in.

use crate::config::{ConfigError, SiteConfig};
use crate::jsx::{Content, Dir, Entry, JsxError};
use crate::md::{self, MdError, Post};
use crate::reader::{self, ReadError};
use crate::repo::Repo;
use crate::router;
use crate::slugify::slugify;
use crate::storage::{EntryKind, Storage};
use crate::writer::{self, WriteError};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Markdown(#[from] MdError),
    #[error(transparent)]
    Jsx(#[from] JsxError),
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error("Posts directory {} does not exist", .0.display())]
    NotADirectory(PathBuf),
    #[error("Posts {first} and {second} share the slug \"{slug}\"")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },
    #[error("Title \"{0}\" has no characters usable in a URL")]
    EmptySlug(String),
    #[error("Tag \"{0}\" has no characters usable in a URL")]
    EmptyTagSlug(String),
    #[error("Tags \"{first}\" and \"{second}\" share the slug \"{slug}\"")]
    DuplicateTagSlug {
        slug: String,
        first: String,
        second: String,
    },
}

/// Everything read from the source directory.
#[derive(Debug, Default)]
pub struct Sources {
    pub posts: Vec<Post>,
    /// Rendered HTML of the about page.
    pub about: Option<String>,
    pub assets: Option<Dir>,
}

/// A routed site, not yet written.
#[derive(Debug)]
pub struct Blog {
    pub repo: Repo,
    pub site: Dir,
}

/// Read posts, the about page and assets from `source`.
pub fn load(storage: &dyn Storage, source: &Path, config: &SiteConfig) -> Result<Sources, BuildError> {
    let _span = tracing::info_span!("load", source = %source.display()).entered();

    let posts = load_posts(storage, &source.join(&config.paths.posts))?;
    let about = load_about(storage, &source.join(&config.paths.about))?;
    let assets = load_assets(storage, &source.join(&config.paths.assets))?;

    tracing::info!(
        posts = posts.len(),
        about = about.is_some(),
        assets = assets.is_some(),
        "loaded sources"
    );
    Ok(Sources {
        posts,
        about,
        assets,
    })
}

/// Parse every `.md` file directly inside `dir`, in parallel.
///
/// Subdirectories and other files are ignored. Two posts whose titles slugify
/// to the same value are rejected, since one page would overwrite the other.
pub fn load_posts(storage: &dyn Storage, dir: &Path) -> Result<Vec<Post>, BuildError> {
    if storage.kind(dir) != Some(EntryKind::Dir) {
        return Err(BuildError::NotADirectory(dir.to_path_buf()));
    }

    let files: Vec<_> = reader::read_dir(storage, dir)?
        .entries()
        .iter()
        .filter_map(|entry| match entry {
            Entry::File(file) if file.name().ends_with(".md") => Some(file.clone()),
            other => {
                tracing::debug!(name = other.name(), "ignoring non-post entry");
                None
            }
        })
        .collect();

    let posts = files
        .par_iter()
        .map(md::parse)
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen: HashMap<&str, &str> = HashMap::new();
    for (post, file) in posts.iter().zip(&files) {
        if let Some(first) = seen.insert(&post.slug, file.name()) {
            return Err(BuildError::DuplicateSlug {
                slug: post.slug.clone(),
                first: first.to_string(),
                second: file.name().to_string(),
            });
        }
    }

    Ok(posts)
}

/// Render the about page body, if the file exists. It has no frontmatter.
pub fn load_about(storage: &dyn Storage, path: &Path) -> Result<Option<String>, BuildError> {
    if storage.kind(path) != Some(EntryKind::File) {
        tracing::debug!(path = %path.display(), "no about page");
        return Ok(None);
    }

    let file = reader::read_file(storage, path)?;
    let text = match file.content() {
        Content::Text(text) => text.as_str(),
        Content::Binary(bytes) => std::str::from_utf8(bytes)
            .map_err(|_| MdError::Encoding(file.name().to_string()))?,
    };
    Ok(Some(md::render(text)))
}

pub fn load_assets(storage: &dyn Storage, path: &Path) -> Result<Option<Dir>, BuildError> {
    if storage.kind(path) != Some(EntryKind::Dir) {
        tracing::debug!(path = %path.display(), "no assets directory");
        return Ok(None);
    }
    Ok(Some(reader::read_dir(storage, path)?))
}

/// Index the posts and lay out the site.
pub fn render(sources: Sources, config: &SiteConfig) -> Result<Blog, BuildError> {
    let _span = tracing::info_span!("render").entered();

    let repo = Repo::new(sources.posts);
    check_slugs(&repo)?;
    let site = router::route(&repo, config, sources.about.as_deref(), sources.assets)?;

    tracing::info!(files = site.file_count(), tags = repo.tags().len(), "routed site");
    Ok(Blog { repo, site })
}

/// Every post and tag page needs a distinct, non-empty file name.
pub fn check_slugs(repo: &Repo) -> Result<(), BuildError> {
    if let Some(post) = repo.posts().iter().find(|post| post.slug.is_empty()) {
        return Err(BuildError::EmptySlug(post.title.clone()));
    }

    let mut seen: HashMap<String, &str> = HashMap::new();
    for tag in repo.tags() {
        let slug = slugify(tag);
        if slug.is_empty() {
            return Err(BuildError::EmptyTagSlug(tag.clone()));
        }
        if let Some(first) = seen.insert(slug.clone(), tag) {
            return Err(BuildError::DuplicateTagSlug {
                slug,
                first: first.to_string(),
                second: tag.clone(),
            });
        }
    }
    Ok(())
}

/// Load, render and write the site under `output`.
pub fn build(
    storage: &dyn Storage,
    source: &Path,
    output: &Path,
    config: &SiteConfig,
) -> Result<Blog, BuildError> {
    let blog = render(load(storage, source, config)?, config)?;

    let _span = tracing::info_span!("write", output = %output.display()).entered();
    writer::write_dir(storage, output, &blog.site)?;
    Ok(blog)
}
