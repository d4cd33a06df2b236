//! Render a single post as an HTML preview or JSON metadata

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::content::{html_escape, loader, MarkdownRenderer, Post};
use crate::Blog;

/// What `render` produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Html,
    Json,
}

#[derive(Serialize)]
struct PostJson<'a> {
    #[serde(flatten)]
    post: &'a Post,
    slug: String,
    excerpt: Option<String>,
}

/// Render the post named by `target`, writing to `output` or stdout
///
/// `target` is a Markdown file path (relative to the collection root) or
/// the slug of a post in the collection.
pub fn run(blog: &Blog, target: &str, format: Output, output: Option<&Path>) -> Result<()> {
    let post = resolve(blog, target)?;
    let rendered = render_post(blog, &post, format)?;

    match output {
        Some(out) => {
            fs::write(out, rendered).with_context(|| format!("Failed to write {:?}", out))?;
            tracing::info!("Wrote {:?}", out);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Find a post by file path first, then by slug
fn resolve(blog: &Blog, target: &str) -> Result<Post> {
    let path = blog.base_dir.join(target);
    if path.is_file() && loader::is_markdown_file(&path) {
        let root = path.parent().unwrap_or(Path::new(""));
        return Ok(loader::load_post(&path, root)?);
    }

    let collection = blog.load_posts()?;
    collection
        .find(target)
        .cloned()
        .with_context(|| format!("No post file or slug named `{}`", target))
}

/// Render a post in the requested format
pub fn render_post(blog: &Blog, post: &Post, format: Output) -> Result<String> {
    let (excerpt, body) = MarkdownRenderer::split_excerpt(&post.body);

    match format {
        Output::Json => {
            let json = PostJson {
                post,
                slug: post.slug(),
                excerpt,
            };
            Ok(serde_json::to_string_pretty(&json)? + "\n")
        }
        Output::Html => {
            let renderer = MarkdownRenderer::from_config(&blog.config.highlight);
            let mut html = format!("<article>\n<h1>{}</h1>\n", html_escape(&post.title));
            if let Some(subtitle) = &post.subtitle {
                html.push_str(&format!("<h2>{}</h2>\n", html_escape(subtitle)));
            }
            html.push_str(&format!(
                "<time datetime=\"{0}\">{0}</time>\n",
                post.date.format("%Y-%m-%d")
            ));
            html.push_str(&renderer.render(&body));
            html.push_str("</article>\n");
            Ok(html)
        }
    }
}
