//! Content loader - loads posts from the posts directory

use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{LoadError, Post, PostCollection};
use crate::Blog;

lazy_static! {
    /// `2024-01-15-` style prefix of dated post file names
    static ref DATE_PREFIX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}-").unwrap();
}

/// Loads posts from the posts directory
pub struct ContentLoader<'a> {
    blog: &'a Blog,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(blog: &'a Blog) -> Self {
        Self { blog }
    }

    /// Load all posts from the posts directory
    ///
    /// Files that fail to load are logged and kept in the collection's
    /// failure list; they never stop the walk.
    pub fn load_posts(&self) -> Result<PostCollection> {
        let posts_dir = &self.blog.posts_dir;
        let mut collection = PostCollection::default();

        if !posts_dir.exists() {
            tracing::debug!("Posts directory {:?} does not exist", posts_dir);
            return Ok(collection);
        }

        for entry in WalkDir::new(posts_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            match load_post(path, posts_dir) {
                Ok(mut post) => {
                    if !post.published && !self.blog.config.render_drafts {
                        tracing::debug!("Skipping draft {:?}", path);
                        continue;
                    }
                    if post.author.is_none() {
                        post.author = self.blog.config.author.clone();
                    }
                    collection.posts.push(post);
                }
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", path, e);
                    collection.failures.push(e);
                }
            }
        }

        collection.sort();
        tracing::debug!(
            "Loaded {} posts ({} failed) from {:?}",
            collection.posts.len(),
            collection.failures.len(),
            posts_dir
        );

        Ok(collection)
    }
}

/// Load a single post from a file
///
/// `root` is the directory the post's `source` is made relative to.
pub fn load_post(path: &Path, root: &Path) -> Result<Post, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut post = Post::parse(&content).map_err(|source| LoadError::Document {
        path: path.to_path_buf(),
        source,
    })?;

    post.source = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string();

    Ok(post)
}

/// Check if a file is a markdown file
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// Drop a leading `YYYY-MM-DD-` from a file stem
pub fn strip_date_prefix(stem: &str) -> &str {
    match DATE_PREFIX.find(stem) {
        Some(m) => &stem[m.end()..],
        None => stem,
    }
}
