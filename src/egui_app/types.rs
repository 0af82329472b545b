//! Shared Types Module
//!
//! Defines shared types for the app: view state, auth DTOs, and the
//! ephemeral form buffers owned by the controller.

use serde::{Deserialize, Serialize};

/// Which main panel is active. Detail shows the repository's selected post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Post list
    List,
    /// Single-post detail
    Detail,
}

/// Which form the auth modal shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

/// User identity as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}

/// Credentials submitted to login and signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Token pair issued by a successful auth exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: String,
}

/// Successful login/signup response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSuccess {
    pub user: User,
    pub tokens: AuthTokens,
}

/// Auth form buffer. Cleared on successful submit or modal close,
/// kept on failure so the user can retry.
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    pub username: String,
    pub password: String,
}

impl AuthForm {
    pub fn clear(&mut self) {
        self.username.clear();
        self.password.clear();
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// Compose form buffer for a new post.
#[derive(Debug, Clone, Default)]
pub struct ComposeForm {
    pub title: String,
    pub content: String,
}

impl ComposeForm {
    pub fn clear(&mut self) {
        self.title.clear();
        self.content.clear();
    }
}
