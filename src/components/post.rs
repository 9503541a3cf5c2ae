use super::page::layout;
use crate::config::SiteInfo;
use crate::date::Date;
use crate::jsx::{JsxError, Node, element, escape};
use crate::md::Post;
use crate::slugify::slugify;
use crate::{attrs, children};

/// `12 November 2019 · # Python # Java · 28 words`
pub fn post_meta(created: Date, tags: &[String], word_count: usize) -> Result<Node, JsxError> {
    let mut links: Vec<Node> = Vec::with_capacity(tags.len() * 2);
    for tag in tags {
        links.push(" # ".into());
        links.push(element(
            "a",
            attrs! { "href" => format!("/tags/{}.html", slugify(tag)) },
            children![escape(tag)],
        )?);
    }

    let words = if word_count == 1 {
        "1 word".to_string()
    } else {
        format!("{} words", word_count)
    };

    element(
        "p",
        attrs! { "class" => "meta" },
        children![
            created.long(),
            " · ",
            element("span", attrs! {}, children![links])?,
            " · ",
            words,
        ],
    )
}

/// A full post page. The body is inserted as-is.
pub fn post(site: &SiteInfo, post: &Post) -> Result<Node, JsxError> {
    layout(
        site,
        children![
            element(
                "div",
                attrs! { "class" => "post" },
                children![
                    element("h1", attrs! {}, children![escape(&post.title)])?,
                    post_meta(post.created, &post.tags, post.word_count)?,
                    element("div", attrs! { "class" => "body" }, children![post.body.as_str()])?,
                ],
            )?,
            element(
                "div",
                attrs! { "class" => "pagination" },
                children![
                    pagination_item(post.previous.as_deref(), "Previous")?,
                    pagination_item(post.next.as_deref(), "Next")?,
                ],
            )?,
        ],
    )
}

fn pagination_item(slug: Option<&str>, label: &str) -> Result<Node, JsxError> {
    let content = match slug {
        Some(slug) => element(
            "a",
            attrs! { "href" => format!("/posts/{}.html", slug) },
            children![label],
        )?,
        None => label.into(),
    };
    element("span", attrs! { "class" => "pagination-item" }, children![content])
}
