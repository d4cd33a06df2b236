//! A loaded set of posts with a tag index

use indexmap::IndexMap;

use super::{LoadError, Post, Tag};

/// Posts loaded from a directory, plus the files that failed to load
#[derive(Debug, Default)]
pub struct PostCollection {
    pub posts: Vec<Post>,
    pub failures: Vec<LoadError>,
}

impl PostCollection {
    /// Build a collection from already parsed posts
    pub fn from_posts(posts: Vec<Post>) -> Self {
        let mut collection = Self {
            posts,
            failures: Vec::new(),
        };
        collection.sort();
        collection
    }

    /// Sort by date descending (newest first), then by title
    pub fn sort(&mut self) {
        self.posts
            .sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.title.cmp(&b.title)));
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Tags with post counts, most used first, ties by name
    pub fn tags(&self) -> Vec<Tag> {
        let mut tags: IndexMap<&str, Tag> = IndexMap::new();
        for post in &self.posts {
            for name in &post.tags {
                tags.entry(name.as_str())
                    .or_insert_with(|| Tag::new(name))
                    .count += 1;
            }
        }

        let mut tags: Vec<Tag> = tags.into_values().collect();
        tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        tags
    }

    /// Posts carrying a tag, in collection order
    pub fn posts_tagged(&self, tag: &str) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.has_tag(tag)).collect()
    }

    /// Find a post by its slug
    pub fn find(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug() == slug)
    }
}
