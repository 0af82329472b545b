//! Native Desktop App Module
//!
//! The egui/eframe client. The submodules split cleanly between the
//! behavioral core (session, api, repository, controller) and the
//! presentation shell (views, theme); the views hold no state of their
//! own and only forward intents into the controller.
//!
//! - **`config`** - server URL configuration
//! - **`types`** - view state, auth DTOs, form buffers
//! - **`session`** - persisted credential + user identity
//! - **`api`** - HTTP client for the remote content API
//! - **`repository`** - client-side cache of the post collection
//! - **`controller`** - the view-state machine
//! - **`views`** / **`theme`** - egui presentation

pub mod api;
pub mod config;
pub mod controller;
pub mod repository;
pub mod session;
pub mod theme;
pub mod types;
pub mod views;

// Re-export commonly used types
pub use api::ApiClient;
pub use config::Config;
pub use controller::Controller;
pub use repository::PostRepository;
pub use session::{Session, SessionStore};
pub use types::{AuthMode, User, View};
