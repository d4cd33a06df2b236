//! postmatter: load and check front-matter Markdown blog posts
//!
//! Posts are Markdown files that open with a YAML, TOML or JSON
//! front-matter block. This crate parses them into typed [`content::Post`]
//! values, rejects malformed documents and gives a small CLI for working
//! with a directory of posts.

pub mod commands;
pub mod config;
pub mod content;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use content::{DocumentError, FrontMatter, Post};

/// A post collection rooted at a directory
#[derive(Clone)]
pub struct Blog {
    /// Collection configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Source directory
    pub source_dir: PathBuf,
    /// Directory holding the posts
    pub posts_dir: PathBuf,
}

impl Blog {
    /// Open a collection from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };

        let source_dir = base_dir.join(&config.source_dir);
        let posts_dir = source_dir.join(&config.posts_dir);

        Ok(Self {
            config,
            base_dir,
            source_dir,
            posts_dir,
        })
    }

    /// Load every post in the collection
    pub fn load_posts(&self) -> Result<content::PostCollection> {
        content::loader::ContentLoader::new(self).load_posts()
    }

    /// Create a new post
    pub fn new_post(
        &self,
        title: &str,
        options: &commands::new::NewPostOptions,
    ) -> Result<PathBuf> {
        commands::new::create_post(self, title, options)
    }
}
