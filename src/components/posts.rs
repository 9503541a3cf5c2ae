use super::page::layout;
use super::post::post_meta;
use crate::config::SiteInfo;
use crate::jsx::{JsxError, Node, element, escape};
use crate::md::Post;
use crate::{attrs, children};

/// A list of posts under `heading`, each linking to its page.
pub fn posts(site: &SiteInfo, heading: &str, posts: &[&Post]) -> Result<Node, JsxError> {
    let items = posts
        .iter()
        .map(|post| item(post))
        .collect::<Result<Vec<_>, _>>()?;

    layout(
        site,
        children![element(
            "div",
            attrs! { "class" => "posts" },
            children![
                element("h1", attrs! {}, children![escape(heading)])?,
                element("ul", attrs! { "id" => "posts" }, children![items])?,
            ],
        )?],
    )
}

fn item(post: &Post) -> Result<Node, JsxError> {
    element(
        "li",
        attrs! { "class" => "post" },
        children![
            element(
                "a",
                attrs! { "class" => "nav-item", "href" => format!("/posts/{}.html", post.slug) },
                children![element("h2", attrs! {}, children![escape(&post.title)])?],
            )?,
            post_meta(post.created, &post.tags, post.word_count)?,
        ],
    )
}
