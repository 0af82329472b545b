//! Blogdesk - Main Library
//!
//! Blogdesk is a native desktop client for a remote blog API. It shows
//! the post collection to anyone and lets an authenticated visitor create
//! and delete their own posts, with the session persisted across
//! restarts.
//!
//! # Module Structure
//!
//! - **`shared`** - types shared with the wire: post model, error
//!   taxonomy, base configuration
//! - **`egui_app`** - the client: session store, API client, content
//!   repository, controller, and the egui presentation shell
//!
//! The controller is the only component with state-machine concerns; see
//! its module documentation for the auth lifecycle and the consistency
//! policy (the collection is refetched after every mutation rather than
//! patched locally).

/// Shared types and data structures
pub mod shared;

/// egui native desktop app
pub mod egui_app;
