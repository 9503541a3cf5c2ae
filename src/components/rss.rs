use crate::config::SiteInfo;
use crate::jsx::{JsxError, Node, element, escape};
use crate::md::Post;
use crate::{attrs, children};

/// The site feed. Links are absolute, built on `site.url`.
pub fn rss(site: &SiteInfo, posts: &[&Post]) -> Result<Node, JsxError> {
    let items = posts
        .iter()
        .map(|post| item(site, post))
        .collect::<Result<Vec<_>, _>>()?;

    element(
        "rss",
        attrs! { "version" => "1.0" },
        children![element(
            "channel",
            attrs! {},
            children![
                text_element("title", escape(&site.title))?,
                text_element("link", escape(&site.url))?,
                text_element("description", escape(&site.description))?,
                element("items", attrs! {}, children![items])?,
            ],
        )?],
    )
}

fn item(site: &SiteInfo, post: &Post) -> Result<Node, JsxError> {
    let link = escape(&format!("{}/posts/{}.html", site.url, post.slug));
    element(
        "item",
        attrs! {},
        children![
            text_element("title", escape(&post.title))?,
            text_element("author", escape(&site.author))?,
            text_element("description", escape(&post.summary))?,
            text_element("link", link.clone())?,
            text_element("guid", link)?,
            text_element("pubDate", post.created.to_utc_string())?,
        ],
    )
}

fn text_element(name: &str, text: String) -> Result<Node, JsxError> {
    element(name, attrs! {}, children![text])
}
