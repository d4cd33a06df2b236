//! Create a new post

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::PathBuf;

use crate::content::Post;
use crate::Blog;

/// Options for a new post beyond its title
#[derive(Debug, Clone, Default)]
pub struct NewPostOptions {
    pub tags: Vec<String>,
    pub author: Option<String>,
    /// Write `published: false`; scaffolds decide this themselves
    pub draft: bool,
    /// File name (without extension) overriding `new_post_name`
    pub path: Option<String>,
}

/// Create a new post file, returning its path
pub fn create_post(blog: &Blog, title: &str, options: &NewPostOptions) -> Result<PathBuf> {
    let today = Local::now().date_naive();
    create_post_on(blog, title, options, today)
}

/// Create a new post dated `date`
pub fn create_post_on(
    blog: &Blog,
    title: &str,
    options: &NewPostOptions,
    date: NaiveDate,
) -> Result<PathBuf> {
    let filename = match &options.path {
        Some(p) => format!("{}.md", p),
        None => post_filename(&blog.config.new_post_name, title, date),
    };
    let file_path = blog.posts_dir.join(filename);

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let scaffold_path = blog
        .base_dir
        .join(&blog.config.scaffold_dir)
        .join("post.md");
    let content = if scaffold_path.exists() {
        let scaffold = fs::read_to_string(&scaffold_path)?;
        fill_scaffold(&scaffold, title, date, options)?
    } else {
        let mut post = Post::new(title.to_string(), date);
        post.author = options.author.clone().or_else(|| blog.config.author.clone());
        post.tags = options.tags.clone();
        post.published = !options.draft;
        post.to_document()?
    };

    // Refuse to write something the loader would reject
    Post::parse(&content)
        .with_context(|| format!("Scaffold {:?} produced an invalid post", scaffold_path))?;

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    tracing::info!("Created post {:?}", file_path);

    Ok(file_path)
}

/// Expand `:year`, `:month`, `:day` and `:title` in a file name pattern
fn post_filename(pattern: &str, title: &str, date: NaiveDate) -> String {
    pattern
        .replace(":year", &date.format("%Y").to_string())
        .replace(":month", &date.format("%m").to_string())
        .replace(":day", &date.format("%d").to_string())
        .replace(":title", &slug::slugify(title))
}

/// Substitute `{{ title }}`, `{{ date }}`, `{{ author }}` and `{{ tags }}`
fn fill_scaffold(
    scaffold: &str,
    title: &str,
    date: NaiveDate,
    options: &NewPostOptions,
) -> Result<String> {
    let title = yaml_scalar(&title)?;
    let author = match &options.author {
        Some(author) => yaml_scalar(author)?,
        None => String::new(),
    };
    let tags = serde_json::to_string(&options.tags)?;

    Ok(scaffold
        .replace("{{ title }}", &title)
        .replace("{{ date }}", &date.format("%Y-%m-%d").to_string())
        .replace("{{ author }}", &author)
        .replace("{{ tags }}", &tags))
}

/// A value as it would appear after `key: ` in YAML
fn yaml_scalar<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_yaml::to_string(value)?.trim_end().to_string())
}
