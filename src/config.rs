//! Site configuration module.
//!
//! Handles loading, validating, and merging the optional `quire.toml` file in
//! the source directory. Stock defaults are the base layer; the user file only
//! needs the keys it wants to override.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "quire"
//! author = "Anonymous"
//! description = "Personal blog"
//! url = "https://example.com"  # Base URL for feed links, no trailing slash
//! language = "en"
//! theme_color = "#202020"
//! # github = "https://github.com/you"
//!
//! [paths]
//! posts = "posts"              # Markdown posts, relative to the source dir
//! assets = "assets"            # Copied over the generated site
//! about = "about.md"           # Body of the about page
//! site_dir = "site"            # Name of the generated directory
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#202020"
//! text_muted = "#666666"       # Dates, tags and word counts
//! border = "#e0e0e0"
//! link = "#0b57d0"
//!
//! [colors.dark]
//! background = "#121212"
//! text = "#e8e8e8"
//! text_muted = "#999999"
//! border = "#333333"
//! link = "#8ab4f8"
//!
//! [processing]
//! max_processes = 4            # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

/// Name of the config file looked up in the source directory.
pub const CONFIG_FILE: &str = "quire.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `quire.toml`.
///
/// All fields have sensible defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Metadata shown in page heads, the sidebar and feeds.
    pub site: SiteInfo,
    /// Where inputs are read from and what the output directory is called.
    pub paths: PathsConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.title must not be empty".into(),
            ));
        }
        let url = &self.site.url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(
                "site.url must start with http:// or https://".into(),
            ));
        }
        if url.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.url must not end with '/'".into(),
            ));
        }
        if self.paths.posts.trim().is_empty() {
            return Err(ConfigError::Validation(
                "paths.posts must not be empty".into(),
            ));
        }
        if is_source_root(&self.paths.assets) {
            return Err(ConfigError::Validation(
                "paths.assets must name a directory inside the source".into(),
            ));
        }
        if !is_single_segment(&self.paths.site_dir) {
            return Err(ConfigError::Validation(
                "paths.site_dir must be a single directory name".into(),
            ));
        }
        Ok(())
    }
}

/// True for `""`, `"."`, `"./"` and the like.
fn is_source_root(path: &str) -> bool {
    Path::new(path.trim())
        .components()
        .all(|component| matches!(component, Component::CurDir))
}

fn is_single_segment(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Site metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Site name, used as the page title and feed channel title.
    pub title: String,
    /// Author name for `<meta name="author">` and feed items.
    pub author: String,
    /// One-line description for `<meta name="description">` and the feed.
    pub description: String,
    /// Absolute base URL, without trailing slash. Feed links are built on it.
    pub url: String,
    /// `lang` attribute of every page.
    pub language: String,
    /// Browser UI color (`<meta name="theme-color">` and the web manifest).
    pub theme_color: String,
    /// Optional profile link shown in the sidebar.
    pub github: Option<String>,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "quire".to_string(),
            author: "Anonymous".to_string(),
            description: "Personal blog".to_string(),
            url: "https://example.com".to_string(),
            language: "en".to_string(),
            theme_color: "#202020".to_string(),
            github: None,
        }
    }
}

/// Input locations (relative to the source directory) and output name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory holding the markdown posts. Only direct `.md` children count.
    pub posts: String,
    /// Optional directory merged over the generated site.
    pub assets: String,
    /// Optional markdown file used as the about page body.
    pub about: String,
    /// Name of the generated site directory inside the output directory.
    pub site_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            posts: "posts".to_string(),
            assets: "assets".to_string(),
            about: "about.md".to_string(),
            site_dir: "site".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel workers for parsing and writing.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least one
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Secondary text: post dates, tag links and word counts.
    pub text_muted: String,
    pub border: String,
    pub link: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#202020".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e0e0e0".to_string(),
            link: "#0b57d0".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#121212".to_string(),
            text: "#e8e8e8".to_string(),
            text_muted: "#999999".to_string(),
            border: "#333333".to_string(),
            link: "#8ab4f8".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `quire.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no config file.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `quire.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `quire.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# quire configuration
# ====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file next to your posts directory as quire.toml.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site metadata
# ---------------------------------------------------------------------------
[site]
# Site name: page <title>, sidebar heading and feed channel title.
title = "quire"
# Author shown in page metadata and feed items.
author = "Anonymous"
# One-line description for search engines and the feed.
description = "Personal blog"
# Absolute base URL of the deployed site, without a trailing slash.
# Feed links and GUIDs are built from it.
url = "https://example.com"
# Language of every page (<html lang="...">).
language = "en"
# Browser UI color used by mobile browsers and the web manifest.
theme_color = "#202020"
# Profile link shown in the sidebar.
# github = "https://github.com/you"

# ---------------------------------------------------------------------------
# Paths (relative to the source directory)
# ---------------------------------------------------------------------------
[paths]
# Directory of markdown posts. Only direct *.md children are read.
posts = "posts"
# Optional directory copied over the generated site. Files here replace
# built-in ones with the same path (e.g. styles/main.css).
assets = "assets"
# Optional markdown file (no frontmatter) used as the about page.
about = "about.md"
# Name of the generated directory, created inside --output.
site_dir = "site"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#202020"
text_muted = "#666666"    # Dates, tags, word counts
border = "#e0e0e0"
link = "#0b57d0"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#121212"
text = "#e8e8e8"
text_muted = "#999999"
border = "#333333"
link = "#8ab4f8"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers for parsing posts and writing files.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-link: {light_link};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-link: {dark_link};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_link = colors.light.link,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_link = colors.dark.link,
    )
}
