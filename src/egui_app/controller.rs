//! View-state controller.
//!
//! The state machine behind the UI: auth lifecycle, post fetch/create/
//! delete, navigation between list and detail, and the modal flags. Auth
//! state is `Anonymous`/`Authenticated`, implied by the session store;
//! navigation and modals are orthogonal to it.
//!
//! Network calls run on worker threads; each action category owns one
//! pending slot holding the worker's channel receiver, and `poll()` (called
//! once per frame) applies completed results. A non-empty slot doubles as
//! the in-flight flag, so re-entrant submissions (e.g. a double-click) are
//! ignored while one is outstanding. Refetches carry a sequence number and
//! only the latest issued one may replace the repository.

use std::sync::mpsc::{channel, Receiver, TryRecvError};

use tracing::{debug, error, info, warn};

use crate::egui_app::api::ApiClient;
use crate::egui_app::config::Config;
use crate::egui_app::repository::PostRepository;
use crate::egui_app::session::{Session, SessionStore};
use crate::egui_app::types::{AuthForm, AuthMode, AuthSuccess, ComposeForm, User, View};
use crate::shared::error::{ApiError, ApiErrorKind};
use crate::shared::post::{NewPost, Post};

/// Shown when the server rejects the stored session on a mutating call.
const SESSION_EXPIRED: &str = "Please log in again";
/// Shown when an anonymous visitor tries to create a post.
const LOGIN_TO_CREATE: &str = "Please log in to create a post";
/// Shown when an anonymous visitor tries to delete a post.
const LOGIN_TO_DELETE: &str = "Please log in to delete posts";
/// Shown when the delete target belongs to someone else.
const OWN_POSTS_ONLY: &str = "You can only delete your own posts";

type AuthResult = Result<AuthSuccess, ApiError>;
type ComposeResult = Result<Post, ApiError>;
type DeleteResult = Result<(), ApiError>;
type FetchResult = Result<Vec<Post>, ApiError>;

/// Central controller shared across the views.
pub struct Controller {
    config: Config,
    session: SessionStore,
    repo: PostRepository,

    /// Which main panel is active
    pub view: View,
    /// Auth modal, when open, and which form it shows
    pub auth_modal: Option<AuthMode>,
    /// Whether the compose modal is open
    pub compose_open: bool,
    /// Post id awaiting the user's yes/no before a delete fires
    pub confirm_delete: Option<i64>,

    pub auth_form: AuthForm,
    pub compose_form: ComposeForm,

    /// Error shown inside the auth modal
    pub auth_error: Option<String>,
    /// Error shown inside the compose modal
    pub compose_error: Option<String>,
    /// Transient error shown on the list/detail view
    pub list_error: Option<String>,

    pending_auth: Option<Receiver<AuthResult>>,
    pending_compose: Option<Receiver<ComposeResult>>,
    pending_delete: Option<(i64, Receiver<DeleteResult>)>,
    pending_fetch: Option<(u64, Receiver<FetchResult>)>,
    fetch_seq: u64,
}

impl Controller {
    pub fn new(config: Config, session: SessionStore) -> Self {
        Self {
            config,
            session,
            repo: PostRepository::new(),
            view: View::List,
            auth_modal: None,
            compose_open: false,
            confirm_delete: None,
            auth_form: AuthForm::default(),
            compose_form: ComposeForm::default(),
            auth_error: None,
            compose_error: None,
            list_error: None,
            pending_auth: None,
            pending_compose: None,
            pending_delete: None,
            pending_fetch: None,
            fetch_seq: 0,
        }
    }

    /// Restore any persisted session (no network round trip) and fetch the
    /// post collection.
    pub fn start(&mut self) {
        if let Some(session) = self.session.load() {
            info!(user = %session.user.username, "restored previous session");
        }
        self.refresh_posts();
    }

    /// Apply results of completed network operations. Call once per frame.
    pub fn poll(&mut self) {
        self.poll_auth();
        self.poll_compose();
        self.poll_delete();
        self.poll_fetch();
        self.sync_view_with_selection();
    }

    // -- auth ------------------------------------------------------------

    pub fn open_auth_modal(&mut self, mode: AuthMode) {
        self.auth_modal = Some(mode);
        self.auth_error = None;
    }

    pub fn close_auth_modal(&mut self) {
        self.auth_modal = None;
        self.auth_error = None;
        self.auth_form.clear();
    }

    /// Switch between the login and signup forms without losing the
    /// username the user already typed.
    pub fn toggle_auth_mode(&mut self) {
        if let Some(mode) = self.auth_modal {
            self.auth_modal = Some(match mode {
                AuthMode::Login => AuthMode::Signup,
                AuthMode::Signup => AuthMode::Login,
            });
            self.auth_error = None;
            self.auth_form.password.clear();
        }
    }

    /// Submit the auth form for whichever mode the modal shows.
    pub fn submit_auth(&mut self) {
        if self.pending_auth.is_some() {
            debug!("ignoring re-entrant auth submit");
            return;
        }
        let Some(mode) = self.auth_modal else {
            warn!("auth submit without an open modal");
            return;
        };
        if self.auth_form.username.trim().is_empty() || self.auth_form.password.is_empty() {
            self.auth_error = Some("Username and password are required".to_string());
            return;
        }
        self.auth_error = None;

        let config = self.config.clone();
        let credentials = self.auth_form.credentials();
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let client = ApiClient::new(config);
            let result = match mode {
                AuthMode::Login => client.login(&credentials),
                AuthMode::Signup => client.signup(&credentials),
            };
            let _ = tx.send(result);
        });
        self.pending_auth = Some(rx);
    }

    /// Clear the session unconditionally. The post collection stays; the
    /// list remains visible to anonymous visitors.
    pub fn logout(&mut self) {
        info!("logging out");
        self.session.clear();
        self.compose_open = false;
        self.compose_form.clear();
        self.compose_error = None;
        self.confirm_delete = None;
    }

    // -- posts -----------------------------------------------------------

    pub fn open_compose(&mut self) {
        if self.session.current().is_some() {
            self.compose_open = true;
            self.compose_error = None;
        } else {
            self.open_auth_modal(AuthMode::Login);
        }
    }

    pub fn close_compose(&mut self) {
        self.compose_open = false;
        self.compose_error = None;
        self.compose_form.clear();
    }

    /// Submit the compose form. Fails locally, before any network call,
    /// when there is no session.
    pub fn submit_compose(&mut self) {
        if self.pending_compose.is_some() {
            debug!("ignoring re-entrant create");
            return;
        }
        let Some(session) = self.session.current() else {
            self.compose_error = Some(LOGIN_TO_CREATE.to_string());
            return;
        };
        if self.compose_form.title.trim().is_empty() || self.compose_form.content.trim().is_empty()
        {
            self.compose_error = Some("Title and content are required".to_string());
            return;
        }
        self.compose_error = None;

        let token = session.access_token.clone();
        let input = NewPost {
            title: self.compose_form.title.clone(),
            content: self.compose_form.content.clone(),
        };
        let config = self.config.clone();
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let client = ApiClient::new(config);
            let _ = tx.send(client.create_post(&input, &token));
        });
        self.pending_compose = Some(rx);
    }

    /// Delete a post after an authorship check and the caller-supplied
    /// confirmation. The ownership check here is the authorization
    /// boundary; the views hiding the control is cosmetic.
    pub fn delete_post(&mut self, id: i64, confirm: impl FnOnce() -> bool) {
        if self.pending_delete.is_some() {
            debug!("ignoring re-entrant delete");
            return;
        }
        let Some(session) = self.session.current() else {
            self.list_error = Some(LOGIN_TO_DELETE.to_string());
            return;
        };
        let Some(post) = self.repo.get(id) else {
            self.list_error = Some("That post no longer exists".to_string());
            return;
        };
        if post.author_id != session.user.id {
            warn!(id, user = session.user.id, "refusing to delete someone else's post");
            self.list_error = Some(OWN_POSTS_ONLY.to_string());
            return;
        }
        if !confirm() {
            debug!(id, "delete cancelled");
            return;
        }

        let token = session.access_token.clone();
        let config = self.config.clone();
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let client = ApiClient::new(config);
            let _ = tx.send(client.delete_post(id, &token));
        });
        self.pending_delete = Some((id, rx));
    }

    /// Point the detail view at a post. Pure repository operation.
    pub fn select_post(&mut self, id: i64) {
        if self.repo.select(Some(id)) {
            self.view = View::Detail;
        }
    }

    /// Back to the list. Pure repository operation.
    pub fn clear_selection(&mut self) {
        self.repo.select(None);
        self.view = View::List;
    }

    /// Dispatch a fresh fetch of the whole collection. Replacing the slot
    /// drops any superseded receiver, so a stale response goes nowhere.
    pub fn refresh_posts(&mut self) {
        self.fetch_seq += 1;
        let seq = self.fetch_seq;
        let config = self.config.clone();
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let client = ApiClient::new(config);
            let _ = tx.send(client.list_posts());
        });
        self.pending_fetch = Some((seq, rx));
    }

    // -- snapshots for the views -----------------------------------------

    pub fn is_authenticated(&self) -> bool {
        self.session.current().is_some()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.current().map(|s| &s.user)
    }

    /// All posts in fetch order.
    pub fn posts(&self) -> Vec<&Post> {
        self.repo.all()
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.repo.selected()
    }

    /// Whether the current user may delete this post.
    pub fn can_delete(&self, post: &Post) -> bool {
        self.session
            .current()
            .is_some_and(|s| s.user.id == post.author_id)
    }

    pub fn auth_pending(&self) -> bool {
        self.pending_auth.is_some()
    }

    pub fn compose_pending(&self) -> bool {
        self.pending_compose.is_some()
    }

    pub fn delete_pending(&self) -> Option<i64> {
        self.pending_delete.as_ref().map(|(id, _)| *id)
    }

    pub fn fetch_pending(&self) -> bool {
        self.pending_fetch.is_some()
    }

    // -- completion handling ---------------------------------------------

    fn poll_auth(&mut self) {
        let Some(rx) = self.pending_auth.take() else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(success)) => {
                let session = Session {
                    access_token: success.tokens.access,
                    refresh_token: success.tokens.refresh,
                    user: success.user,
                };
                info!(user = %session.user.username, "signed in");
                if let Err(e) = self.session.save(session) {
                    warn!("could not persist session: {e}");
                    self.list_error =
                        Some(format!("Signed in, but the session could not be saved: {e}"));
                }
                self.auth_modal = None;
                self.auth_error = None;
                self.auth_form.clear();
            }
            Ok(Err(err)) => {
                // A rejected login touches no existing session; there is
                // none at this point by construction.
                warn!("auth failed: {err}");
                self.auth_error = Some(err.message);
            }
            Err(TryRecvError::Empty) => self.pending_auth = Some(rx),
            Err(TryRecvError::Disconnected) => {
                warn!("auth worker vanished");
                self.auth_error = Some("The sign-in attempt was interrupted".to_string());
            }
        }
    }

    fn poll_compose(&mut self) {
        let Some(rx) = self.pending_compose.take() else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(post)) => {
                info!(id = post.id, "created post");
                self.compose_open = false;
                self.compose_form.clear();
                self.compose_error = None;
                // Resynchronize rather than splicing the created post in:
                // server-assigned fields come from the refetch.
                self.refresh_posts();
            }
            Ok(Err(err)) => {
                error!("create failed: {err}");
                let message = self.mutation_error_message(err);
                self.compose_error = Some(message);
            }
            Err(TryRecvError::Empty) => self.pending_compose = Some(rx),
            Err(TryRecvError::Disconnected) => warn!("create worker vanished"),
        }
    }

    fn poll_delete(&mut self) {
        let Some((id, rx)) = self.pending_delete.take() else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(())) => {
                info!(id, "deleted post");
                if self.repo.selected_id() == Some(id) {
                    self.repo.select(None);
                    self.view = View::List;
                }
                self.refresh_posts();
            }
            Ok(Err(err)) => {
                error!(id, "delete failed: {err}");
                let message = self.mutation_error_message(err);
                self.list_error = Some(message);
            }
            Err(TryRecvError::Empty) => self.pending_delete = Some((id, rx)),
            Err(TryRecvError::Disconnected) => warn!(id, "delete worker vanished"),
        }
    }

    fn poll_fetch(&mut self) {
        let Some((seq, rx)) = self.pending_fetch.take() else {
            return;
        };
        match rx.try_recv() {
            Ok(result) => {
                if seq != self.fetch_seq {
                    debug!(seq, latest = self.fetch_seq, "discarding stale post fetch");
                    return;
                }
                match result {
                    Ok(posts) => {
                        debug!(count = posts.len(), "replacing post collection");
                        self.repo.replace_all(posts);
                        self.list_error = None;
                    }
                    Err(err) => {
                        error!("could not fetch posts: {err}");
                        self.list_error = Some(err.message);
                    }
                }
            }
            Err(TryRecvError::Empty) => self.pending_fetch = Some((seq, rx)),
            Err(TryRecvError::Disconnected) => warn!("fetch worker vanished"),
        }
    }

    /// An `Unauthorized` rejection of a mutating call means the stored
    /// session is invalid: drop it and fall back to `Anonymous`.
    fn mutation_error_message(&mut self, err: ApiError) -> String {
        if err.kind == ApiErrorKind::Unauthorized {
            warn!("session rejected by server: {}", err.message);
            self.session.clear();
            SESSION_EXPIRED.to_string()
        } else {
            err.message
        }
    }

    /// Detail implies a live selection; fall back to the list when the
    /// selected post vanished (e.g. deleted server-side).
    fn sync_view_with_selection(&mut self) {
        if self.view == View::Detail && self.repo.selected().is_none() {
            self.view = View::List;
        }
    }
}
