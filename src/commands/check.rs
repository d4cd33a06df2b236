//! Validate every post in the collection

use anyhow::Result;

use crate::Blog;

/// Load all posts and report the ones that fail
///
/// Returns an error when at least one post is malformed.
pub fn run(blog: &Blog) -> Result<()> {
    let collection = blog.load_posts()?;

    for failure in &collection.failures {
        println!("  ✗ {}", failure);
    }

    println!(
        "{} posts ok, {} failed",
        collection.len(),
        collection.failures.len()
    );

    match collection.failures.len() {
        0 => {}
        1 => anyhow::bail!("1 malformed post"),
        n => anyhow::bail!("{} malformed posts", n),
    }

    Ok(())
}
