//! The post repository: chronological order, pagination links and tags.

use crate::md::Post;

#[derive(Debug, Clone, Default)]
pub struct Repo {
    posts: Vec<Post>,
    tags: Vec<String>,
}

impl Repo {
    /// Sort posts newest first and link neighbours.
    ///
    /// `previous` points at the next older post and `next` at the next newer
    /// one, both by slug. Posts published on the same day keep their input
    /// order.
    pub fn new(mut posts: Vec<Post>) -> Self {
        posts.sort_by(|a, b| b.created.cmp(&a.created));

        let slugs: Vec<String> = posts.iter().map(|post| post.slug.clone()).collect();
        for (i, post) in posts.iter_mut().enumerate() {
            post.next = i.checked_sub(1).map(|newer| slugs[newer].clone());
            post.previous = slugs.get(i + 1).cloned();
        }

        let mut tags: Vec<String> = Vec::new();
        for tag in posts.iter().flat_map(|post| &post.tags) {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }

        Self { posts, tags }
    }

    /// All posts, newest first.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Distinct tags in order of first appearance.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Posts carrying `tag`, newest first.
    pub fn tagged(&self, tag: &str) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|post| post.tags.iter().any(|t| t == tag))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
