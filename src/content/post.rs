//! Post model

use chrono::NaiveDate;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::str::FromStr;

use super::{DocumentError, FrontMatter};

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Post title, never blank
    pub title: String,

    /// Optional subtitle
    pub subtitle: Option<String>,

    /// Publication date
    pub date: NaiveDate,

    /// Post author
    pub author: Option<String>,

    /// Post tags, in front-matter order without duplicates
    pub tags: Vec<String>,

    /// Markdown body, passed through untouched
    pub body: String,

    /// Drafts set `published: false`
    pub published: bool,

    /// Source file path relative to the posts directory
    pub source: String,

    /// Custom front-matter fields
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(title: String, date: NaiveDate) -> Self {
        Self {
            title,
            subtitle: None,
            date,
            author: None,
            tags: Vec::new(),
            body: String::new(),
            published: true,
            source: String::new(),
            extra: IndexMap::new(),
        }
    }

    /// Parse a whole document: front-matter block followed by the body
    pub fn parse(content: &str) -> Result<Self, DocumentError> {
        let (fm, body) = FrontMatter::parse(content)?;
        Self::from_front_matter(fm, body)
    }

    /// Validate front-matter and attach the body
    pub fn from_front_matter(fm: FrontMatter, body: &str) -> Result<Self, DocumentError> {
        let date = fm.parse_date();

        let title = match fm.title.map(|t| t.trim().to_string()) {
            Some(title) if !title.is_empty() => title,
            _ => return Err(DocumentError::MissingTitle),
        };

        let mut post = Post::new(title, date?);
        post.subtitle = fm.subtitle;
        post.author = fm.author;
        post.tags = dedup_tags(fm.tags);
        post.body = body.to_string();
        post.published = fm.published;
        post.extra = fm.extra;

        Ok(post)
    }

    /// The front-matter this post would be written with
    pub fn front_matter(&self) -> FrontMatter {
        FrontMatter {
            title: Some(self.title.clone()),
            subtitle: self.subtitle.clone(),
            date: Some(self.date.format("%Y-%m-%d").to_string()),
            author: self.author.clone(),
            tags: self.tags.clone(),
            published: self.published,
            extra: self.extra.clone(),
        }
    }

    /// Serialize back into a document with a YAML front-matter block
    pub fn to_document(&self) -> Result<String, serde_yaml::Error> {
        let mut doc = self.front_matter().to_yaml_block()?;
        doc.push_str(&self.body);
        Ok(doc)
    }

    /// Whether the post carries a tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// URL-friendly name, from the source file stem or the title
    pub fn slug(&self) -> String {
        let stem = std::path::Path::new(&self.source)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        if stem.is_empty() {
            slug::slugify(&self.title)
        } else {
            slug::slugify(super::loader::strip_date_prefix(stem))
        }
    }
}

impl FromStr for Post {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Post::parse(s)
    }
}

fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// A tag and the number of posts carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub name: String,
    pub slug: String,
    pub count: usize,
}

impl Tag {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            slug: slug::slugify(name),
            count: 0,
        }
    }
}
