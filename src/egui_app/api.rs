//! Content API Client
//!
//! Blocking request/response wrapper over the remote content API. Each
//! method drives the async HTTP client on a private runtime so callers can
//! dispatch it from a plain worker thread. The client itself is stateless:
//! the bearer credential is an argument, never stored here, and the
//! controller guarantees protected calls are only made with a session in
//! hand.
//!
//! All response translation happens at this boundary: non-2xx statuses
//! become [`ApiError`]s and the two list shapes the server produces are
//! normalized into one `Vec<Post>`.

use reqwest::Client;
use tokio::runtime::Runtime;
use tracing::debug;

use crate::egui_app::config::Config;
use crate::egui_app::types::{AuthSuccess, Credentials};
use crate::shared::error::ApiError;
use crate::shared::post::{NewPost, Post, PostListBody};

/// Client for the remote content API.
pub struct ApiClient {
    config: Config,
    client: Client,
}

impl ApiClient {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Fetch all posts, in server order.
    pub fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        let url = self.config.api_url("/posts/");
        debug!(%url, "fetching posts");

        let rt = runtime()?;
        rt.block_on(async {
            let response = self.client.get(&url).send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ApiError::from_response(status.as_u16(), &body));
            }

            let body: PostListBody = response
                .json()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse post list: {e}")))?;
            Ok(body.into_posts())
        })
    }

    /// Exchange credentials for a token pair and user identity.
    pub fn login(&self, credentials: &Credentials) -> Result<AuthSuccess, ApiError> {
        self.auth_request("/auth/login/", credentials)
    }

    /// Register a new account; returns the same shape as login.
    pub fn signup(&self, credentials: &Credentials) -> Result<AuthSuccess, ApiError> {
        self.auth_request("/auth/signup/", credentials)
    }

    fn auth_request(&self, path: &str, credentials: &Credentials) -> Result<AuthSuccess, ApiError> {
        let url = self.config.api_url(path);
        debug!(%url, username = %credentials.username, "auth request");

        let rt = runtime()?;
        rt.block_on(async {
            let response = self.client.post(&url).json(credentials).send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ApiError::from_response(status.as_u16(), &body));
            }

            response
                .json::<AuthSuccess>()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse auth response: {e}")))
        })
    }

    /// Create a post. Requires the session's access token.
    pub fn create_post(&self, input: &NewPost, access_token: &str) -> Result<Post, ApiError> {
        let url = self.config.api_url("/posts/");
        debug!(%url, title = %input.title, "creating post");

        let rt = runtime()?;
        rt.block_on(async {
            let response = self
                .client
                .post(&url)
                .header("Authorization", format!("Bearer {access_token}"))
                .json(input)
                .send()
                .await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ApiError::from_response(status.as_u16(), &body));
            }

            response
                .json::<Post>()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse created post: {e}")))
        })
    }

    /// Delete a post by id. Requires the session's access token.
    pub fn delete_post(&self, id: i64, access_token: &str) -> Result<(), ApiError> {
        let url = self.config.api_url(&format!("/posts/{id}/"));
        debug!(%url, "deleting post");

        let rt = runtime()?;
        rt.block_on(async {
            let response = self
                .client
                .delete(&url)
                .header("Authorization", format!("Bearer {access_token}"))
                .send()
                .await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ApiError::from_response(status.as_u16(), &body));
            }
            Ok(())
        })
    }
}

fn runtime() -> Result<Runtime, ApiError> {
    Runtime::new().map_err(|e| ApiError::unknown(format!("Failed to create runtime: {e}")))
}
