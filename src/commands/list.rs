//! List collection content

use anyhow::Result;
use std::fmt::Write;

use crate::content::PostCollection;
use crate::Blog;

/// List collection content by type
pub fn run(blog: &Blog, content_type: &str, tag: Option<&str>) -> Result<()> {
    let collection = blog.load_posts()?;
    print!("{}", format_listing(blog, &collection, content_type, tag)?);
    Ok(())
}

/// Render a listing of posts or tags
pub fn format_listing(
    blog: &Blog,
    collection: &PostCollection,
    content_type: &str,
    tag: Option<&str>,
) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{}", blog.config.title)?;

    match content_type {
        "post" | "posts" => {
            let posts = match tag {
                Some(tag) => collection.posts_tagged(tag),
                None => collection.posts.iter().collect(),
            };
            writeln!(out, "Posts ({}):", posts.len())?;
            for post in posts {
                writeln!(
                    out,
                    "  {} - {} [{}]",
                    post.date.format(&blog.config.date_format),
                    post.title,
                    post.source
                )?;
            }
        }
        "tag" | "tags" => {
            let tags = collection.tags();
            writeln!(out, "Tags ({}):", tags.len())?;
            for tag in tags {
                writeln!(out, "  {} ({})", tag.name, tag.count)?;
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, tag", content_type);
        }
    }

    Ok(out)
}
