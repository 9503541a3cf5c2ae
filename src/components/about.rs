use super::page::layout;
use crate::config::SiteInfo;
use crate::jsx::{JsxError, Node, element, escape};
use crate::{attrs, children};

/// The about page. `body` is rendered HTML inserted as-is; without it a short
/// introduction built from the site metadata is shown.
pub fn about(site: &SiteInfo, body: Option<&str>) -> Result<Node, JsxError> {
    let content = match body {
        Some(html) => Node::from(html),
        None => element(
            "p",
            attrs! {},
            children![format!(
                "{} is written by {}.",
                escape(&site.title),
                escape(&site.author)
            )],
        )?,
    };

    layout(
        site,
        children![element(
            "div",
            attrs! { "class" => "about" },
            children![element("h1", attrs! {}, children!["About"])?, content],
        )?],
    )
}

pub fn not_found(site: &SiteInfo) -> Result<Node, JsxError> {
    layout(
        site,
        children![element(
            "div",
            attrs! { "class" => "not-found" },
            children![
                element("h1", attrs! {}, children!["Page not found"])?,
                element(
                    "p",
                    attrs! {},
                    children![
                        "Sorry, that page does not exist. Try the ",
                        element("a", attrs! { "href" => "/posts" }, children!["blog index"])?,
                        ".",
                    ],
                )?,
            ],
        )?],
    )
}
