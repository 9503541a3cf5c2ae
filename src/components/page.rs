//! The shared page layout: head, sidebar and content column.

use crate::config::SiteInfo;
use crate::jsx::{Child, Children, JsxError, Node, Props, component, element, escape};
use crate::{attrs, children};

/// Wrap `content` in the site layout by invoking [`page`] as a component.
pub fn layout(site: &SiteInfo, content: Vec<Children>) -> Result<Node, JsxError> {
    component(&|props: Props| page(site, props), attrs! {}, content)
}

/// `<html>` with the document head and a body holding the sidebar and the
/// component's children.
pub fn page(site: &SiteInfo, props: Props) -> Result<Child, JsxError> {
    element(
        "html",
        attrs! { "lang" => &site.language },
        children![head(site)?, body(site, props.children)?],
    )
    .map(Child::from)
}

fn head(site: &SiteInfo) -> Result<Node, JsxError> {
    element(
        "head",
        attrs! {},
        children![
            element("meta", attrs! { "charset" => "utf-8" }, children![])?,
            element(
                "meta",
                attrs! {
                    "name" => "viewport",
                    "content" => "width=device-width, initial-scale=1.0",
                },
                children![],
            )?,
            element(
                "meta",
                attrs! { "name" => "theme-color", "content" => &site.theme_color },
                children![],
            )?,
            element(
                "meta",
                attrs! { "name" => "description", "content" => &site.description },
                children![],
            )?,
            element(
                "meta",
                attrs! { "name" => "author", "content" => &site.author },
                children![],
            )?,
            element("title", attrs! {}, children![escape(&site.title)])?,
            element(
                "link",
                attrs! { "rel" => "manifest", "href" => "/manifest.webmanifest" },
                children![],
            )?,
            element(
                "link",
                attrs! {
                    "rel" => "icon",
                    "href" => "/images/favicon.svg",
                    "type" => "image/svg+xml",
                },
                children![],
            )?,
            element(
                "link",
                attrs! {
                    "rel" => "alternate",
                    "type" => "application/rss+xml",
                    "title" => &site.title,
                    "href" => "/feed.rss",
                },
                children![],
            )?,
            element(
                "link",
                attrs! { "rel" => "stylesheet", "href" => "/styles/main.css" },
                children![],
            )?,
        ],
    )
}

fn body(site: &SiteInfo, content: Vec<Child>) -> Result<Node, JsxError> {
    element(
        "body",
        attrs! {},
        children![element(
            "div",
            attrs! { "id" => "root" },
            children![
                sidebar(site)?,
                element("div", attrs! { "id" => "content" }, children![content])?,
            ],
        )?],
    )
}

/// Site title, navigation and social links.
pub fn sidebar(site: &SiteInfo) -> Result<Node, JsxError> {
    let nav = element(
        "div",
        attrs! { "id" => "nav" },
        children![
            nav_item("/posts", "Blog")?,
            nav_item("/about.html", "About")?,
        ],
    )?;

    let mut social = Vec::new();
    if let Some(github) = &site.github {
        social.push(element(
            "a",
            attrs! { "class" => "nav-item", "href" => github },
            children!["GitHub"],
        )?);
    }
    social.push(element(
        "a",
        attrs! { "class" => "nav-item", "href" => "/feed.rss" },
        children!["RSS"],
    )?);

    element(
        "aside",
        attrs! { "id" => "sidebar" },
        children![
            element("p", attrs! { "class" => "site-title" }, children![escape(&site.title)])?,
            nav,
            element("div", attrs! { "id" => "social" }, children![social])?,
        ],
    )
}

fn nav_item(href: &str, label: &str) -> Result<Node, JsxError> {
    element(
        "a",
        attrs! { "class" => "nav-item", "href" => href },
        children![element("h2", attrs! {}, children![label])?],
    )
}
