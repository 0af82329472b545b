//! Post wire model
//!
//! The shapes the remote content API exchanges for posts. List responses
//! arrive in two shapes (a bare array, or a paginated `{"results": [...]}`
//! envelope); [`PostListBody`] normalizes both into one canonical
//! `Vec<Post>` so nothing past the API client branches on shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post as the server serializes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Owning user id; gates delete permission
    #[serde(rename = "author")]
    pub author_id: i64,
    #[serde(default)]
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Author name for display, falling back to the numeric id.
    pub fn author_display(&self) -> String {
        if self.author_name.is_empty() {
            format!("User {}", self.author_id)
        } else {
            self.author_name.clone()
        }
    }
}

/// Body of a post-creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

/// The two shapes a post-list response can take.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PostListBody {
    Paginated { results: Vec<Post> },
    Bare(Vec<Post>),
}

impl PostListBody {
    pub fn into_posts(self) -> Vec<Post> {
        match self {
            Self::Paginated { results } => results,
            Self::Bare(posts) => posts,
        }
    }
}
