//! Initialize a new post collection

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"# postmatter configuration

# Site
title: Blog
# Author given to posts without one
author:

# Directory
source_dir: source
posts_dir: _posts
scaffold_dir: scaffolds

# Writing
new_post_name: :year-:month-:day-:title.md
render_drafts: false
highlight:
  line_number: true
  theme: base16-ocean.dark

# Listing
date_format: '%Y-%m-%d'
"#;

const POST_SCAFFOLD: &str = r#"---
title: {{ title }}
subtitle:
date: {{ date }}
author: {{ author }}
tags: {{ tags }}
---
"#;

/// Initialize a new collection in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    if target_dir.join("_config.yml").exists() {
        anyhow::bail!("{:?} already has a _config.yml", target_dir);
    }

    fs::create_dir_all(target_dir.join("source/_posts"))?;
    fs::create_dir_all(target_dir.join("scaffolds"))?;

    fs::write(target_dir.join("_config.yml"), CONFIG)?;
    fs::write(target_dir.join("scaffolds/post.md"), POST_SCAFFOLD)?;

    let today = chrono::Local::now().date_naive();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
tags: [welcome]
---

This is your first post. Create another one with:

```bash
$ postmatter new "My New Post" --tag notes
```

Everything after the front-matter block is free-form Markdown.
"#,
        today.format("%Y-%m-%d")
    );
    fs::write(target_dir.join("source/_posts/hello-world.md"), sample_post)?;

    tracing::debug!("Initialized collection in {:?}", target_dir);
    Ok(())
}
