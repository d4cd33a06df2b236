use std::fs;

use postmatter::content::{DocumentError, PostCollection};
use postmatter::{Blog, Post};

const TERRAFORM_POST: &str = r#"---
title: Configure Cloud Build triggers with inline build config
subtitle: No cloudbuild.yaml in the repository
date: 2023-08-14
author: Jane Smith
tags: ["terraform", "cloud build"]
---

The trigger carries its own steps:

```hcl
resource "google_cloudbuild_trigger" "inline" {
  build {
    step {
      name = "gcr.io/cloud-builders/gcloud"
      args = ["version"]
    }
  }
}
```
"#;

#[test]
fn tags_keep_document_order() {
    let post = Post::parse(TERRAFORM_POST).unwrap();
    assert_eq!(post.tags, vec!["terraform", "cloud build"]);
}

#[test]
fn metadata_round_trip_is_idempotent() {
    let post = Post::parse(TERRAFORM_POST).unwrap();
    let once = post.to_document().unwrap();
    let reparsed = Post::parse(&once).unwrap();
    let twice = reparsed.to_document().unwrap();

    assert_eq!(once, twice);
    assert_eq!(reparsed.title, post.title);
    assert_eq!(reparsed.date, post.date);
    assert_eq!(reparsed.author, post.author);
    assert_eq!(reparsed.tags, post.tags);
    assert_eq!(reparsed.body, post.body);
}

#[test]
fn body_code_blocks_are_opaque() {
    let post = Post::parse(TERRAFORM_POST).unwrap();
    assert!(post.body.contains("resource \"google_cloudbuild_trigger\" \"inline\""));
    assert!(post.body.ends_with("```\n"));
}

#[test]
fn missing_title_is_rejected() {
    let doc = TERRAFORM_POST.replace(
        "title: Configure Cloud Build triggers with inline build config\n",
        "",
    );
    assert!(matches!(Post::parse(&doc), Err(DocumentError::MissingTitle)));
}

#[test]
fn empty_body_is_valid() {
    let post = Post::parse("---\ntitle: Stub\ndate: 2023-08-14\n---").unwrap();
    assert_eq!(post.body, "");
}

#[test]
fn collection_loads_directory() {
    let dir = tempfile::tempdir().unwrap();
    let posts_dir = dir.path().join("source/_posts");
    fs::create_dir_all(&posts_dir).unwrap();
    fs::write(posts_dir.join("inline-build.md"), TERRAFORM_POST).unwrap();
    fs::write(
        posts_dir.join("later.md"),
        "+++\ntitle = \"Later\"\ndate = 2023-09-01\ntags = [\"terraform\"]\n+++\n",
    )
    .unwrap();
    fs::write(posts_dir.join("broken.md"), "---\ntitle: Broken\n").unwrap();

    let blog = Blog::new(dir.path()).unwrap();
    let collection: PostCollection = blog.load_posts().unwrap();

    let titles: Vec<_> = collection.posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Later",
            "Configure Cloud Build triggers with inline build config"
        ]
    );
    assert_eq!(collection.failures.len(), 1);
    assert_eq!(collection.posts_tagged("terraform").len(), 2);
    assert_eq!(collection.tags()[0].name, "terraform");
}
