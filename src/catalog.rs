use std::collections::HashSet;

use thiserror::Error;

use crate::models::{ExternalRef, Post};

/// The full set of write-ups this site ships. Bodies live under
/// `content/posts/` and are compiled in, so the running catalogue can never
/// drift from the deployed binary.
const POSTS: &[Post] = &[
    Post {
        slug: "manitoba-gis-oil-well",
        title: "A Province-Scale Geospatial Analytics Pipeline for Oil Well Exploration in Manitoba",
        author: Some("Olaoluwa Oke"),
        date: Some("Nov 2025"),
        repo: Some(ExternalRef {
            url: "https://github.com/Olaisheretolearn/man-wells",
            label: Some("GitHub"),
        }),
        live: Some(ExternalRef {
            url: "https://wells-analysis.netlify.app/",
            label: Some("Playground"),
        }),
        content_html: include_str!("../content/posts/manitoba-gis-oil-well.html"),
    },
    Post {
        slug: "awa-app",
        title: "Awa – Roommates Communication App",
        author: Some("Ola Oke"),
        date: Some("2025"),
        repo: Some(ExternalRef {
            url: "https://github.com/Olaisheretolearn/Awa",
            label: Some("GitHub"),
        }),
        live: None,
        content_html: include_str!("../content/posts/awa-app.html"),
    },
    Post {
        slug: "office-hours",
        title: "Office Hours – Live Queue + Video Call System",
        author: Some("Ola Oke"),
        date: Some("2025"),
        repo: Some(ExternalRef {
            // TODO: point at the real repository once it goes public
            url: "https://github.com/yourusername/office-hours",
            label: Some("GitHub"),
        }),
        live: None,
        content_html: include_str!("../content/posts/office-hours.html"),
    },
    Post {
        slug: "jiwo-app",
        title: "Jiwo — Live Collaborative Lecture Notes",
        author: Some("Ola Oke"),
        date: Some("2025"),
        repo: Some(ExternalRef {
            url: "https://github.com/Olaisheretolearn/Jiwo",
            label: Some("GitHub"),
        }),
        live: None,
        content_html: include_str!("../content/posts/jiwo-app.html"),
    },
];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate slug `{0}` in catalog")]
    DuplicateSlug(String),
}

/// Immutable, insertion-ordered collection of posts. Built once at startup
/// and handed to whoever needs lookups; nothing can mutate it afterwards.
#[derive(Debug)]
pub struct Catalog {
    posts: Vec<Post>,
}

impl Catalog {
    /// Slug uniqueness is checked here so a bad edit to the post table
    /// fails on the first run instead of silently shadowing an entry.
    pub fn new(posts: Vec<Post>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for post in &posts {
            if !seen.insert(post.slug) {
                return Err(CatalogError::DuplicateSlug(post.slug.to_owned()));
            }
        }
        Ok(Self { posts })
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(POSTS.to_vec())
    }

    /// Exact, case-sensitive match. No trimming, no case folding; an empty
    /// slug is an ordinary miss.
    pub fn find_by_slug(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.slug == slug)
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }
}
