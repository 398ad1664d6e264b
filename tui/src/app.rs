//! Application state and key routing.
//!
//! # Dismissal
//!
//! Every open dialog registers a close handler on the app's [`DismissStack`].
//! Esc is routed through [`DismissStack::handle_cancel`] once, here, before
//! any screen sees the key: if an overlay was open the topmost one closes and
//! the key is consumed. Only an Esc that no overlay wanted falls through to
//! screen navigation.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

use jsonboard_types::ui::{Counter, DialogState, DismissRegistration, DismissStack};
use jsonboard_types::{Post, PostId, User};

use crate::form::{FormAction, NewPostForm};
use crate::keymap::is_ctrl_c;
use crate::requests::{ApiRequest, ApiResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Posts,
    Users,
    NewPost,
    Counter,
    Dates,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Posts,
        Screen::Users,
        Screen::NewPost,
        Screen::Counter,
        Screen::Dates,
    ];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Screen::Posts => "Posts",
            Screen::Users => "Users",
            Screen::NewPost => "New post",
            Screen::Counter => "Counter",
            Screen::Dates => "Dates",
        }
    }

    fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

/// An open dialog holding `item`, closable through the dismiss stack.
#[derive(Debug)]
pub struct Overlay<T> {
    item: T,
    dialog: DialogState,
    _registration: DismissRegistration,
}

impl<T> Overlay<T> {
    fn open(item: T, dismiss: &DismissStack) -> Self {
        let dialog = DialogState::new(true);
        let registration = dismiss.register(dialog.closer());
        Self {
            item,
            dialog,
            _registration: registration,
        }
    }

    #[must_use]
    pub fn item(&self) -> &T {
        &self.item
    }

    fn is_open(&self) -> bool {
        self.dialog.is_open()
    }

    fn close(&self) {
        self.dialog.close();
    }
}

/// What the post detail dialog shows while its fetch is in flight and after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostDetail {
    Loading(PostId),
    Loaded(Post),
    Failed { id: PostId, error: String },
}

impl PostDetail {
    #[must_use]
    pub fn id(&self) -> Option<PostId> {
        match self {
            PostDetail::Loading(id) | PostDetail::Failed { id, .. } => Some(*id),
            PostDetail::Loaded(post) => post.id,
        }
    }

    #[must_use]
    pub fn post(&self) -> Option<&Post> {
        match self {
            PostDetail::Loaded(post) => Some(post),
            PostDetail::Loading(_) | PostDetail::Failed { .. } => None,
        }
    }
}

/// A cursor over a loaded list.
#[derive(Debug)]
pub struct Listing<T> {
    items: Vec<T>,
    selected: usize,
    loading: bool,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
            loading: false,
        }
    }
}

impl<T> Listing<T> {
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.clamp();
    }

    fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp(&mut self) {
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
    }
}

pub struct App {
    screen: Screen,
    dismiss: DismissStack,
    posts: Listing<Post>,
    users: Listing<User>,
    form: NewPostForm,
    counter: Counter,
    post_detail: Option<Overlay<PostDetail>>,
    confirm_delete: Option<Overlay<PostId>>,
    user_detail: Option<Overlay<User>>,
    status: Option<Status>,
    outbox: Vec<ApiRequest>,
    should_quit: bool,
}

impl App {
    /// A fresh app with the initial post and user loads queued.
    #[must_use]
    pub fn new(default_user_id: u64) -> Self {
        let mut app = Self {
            screen: Screen::Posts,
            dismiss: DismissStack::new(),
            posts: Listing::default(),
            users: Listing::default(),
            form: NewPostForm::new(default_user_id),
            counter: Counter::default(),
            post_detail: None,
            confirm_delete: None,
            user_detail: None,
            status: None,
            outbox: Vec::new(),
            should_quit: false,
        };
        app.reload_posts();
        app.reload_users();
        app
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn dismiss(&self) -> &DismissStack {
        &self.dismiss
    }

    #[must_use]
    pub fn posts(&self) -> &Listing<Post> {
        &self.posts
    }

    #[must_use]
    pub fn users(&self) -> &Listing<User> {
        &self.users
    }

    #[must_use]
    pub fn form(&self) -> &NewPostForm {
        &self.form
    }

    #[must_use]
    pub fn counter(&self) -> Counter {
        self.counter
    }

    #[must_use]
    pub fn post_detail(&self) -> Option<&PostDetail> {
        self.post_detail.as_ref().map(Overlay::item)
    }

    #[must_use]
    pub fn confirm_delete(&self) -> Option<PostId> {
        self.confirm_delete.as_ref().map(|o| *o.item())
    }

    #[must_use]
    pub fn user_detail(&self) -> Option<&User> {
        self.user_detail.as_ref().map(Overlay::item)
    }

    #[must_use]
    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    /// Requests queued since the last call.
    pub fn take_requests(&mut self) -> Vec<ApiRequest> {
        std::mem::take(&mut self.outbox)
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Paste(text) if self.screen == Screen::NewPost && !self.has_overlay() => {
                self.form.paste(&text);
            }
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if is_ctrl_c(&key) {
            self.should_quit = true;
            return;
        }

        if key.code == KeyCode::Esc {
            let outcome = self.dismiss.handle_cancel();
            self.reap_closed_overlays();
            if outcome.is_consumed() {
                return;
            }
        }

        if self.confirm_delete.is_some() {
            self.handle_confirm_key(key);
        } else if self.post_detail.is_some() {
            self.handle_post_detail_key(key);
        } else if self.user_detail.is_some() {
            // Read-only; only Esc closes it.
        } else {
            self.handle_screen_key(key);
        }
        self.reap_closed_overlays();
    }

    fn has_overlay(&self) -> bool {
        self.post_detail.is_some() || self.user_detail.is_some()
    }

    /// Drop overlays whose dialog was closed, releasing their dismiss slots.
    fn reap_closed_overlays(&mut self) {
        if self.post_detail.as_ref().is_some_and(|o| !o.is_open()) {
            self.post_detail = None;
            self.confirm_delete = None;
        }
        if self.confirm_delete.as_ref().is_some_and(|o| !o.is_open()) {
            self.confirm_delete = None;
        }
        if self.user_detail.as_ref().is_some_and(|o| !o.is_open()) {
            self.user_detail = None;
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
                if let Some(id) = self.confirm_delete() {
                    self.outbox.push(ApiRequest::DeletePost(id));
                    self.set_info(format!("Deleting post #{id}..."));
                }
                // The detail stays up until the delete succeeds.
                if let Some(confirm) = &self.confirm_delete {
                    confirm.close();
                }
            }
            KeyCode::Char('n' | 'N') => {
                if let Some(confirm) = &self.confirm_delete {
                    confirm.close();
                }
            }
            _ => {}
        }
    }

    fn handle_post_detail_key(&mut self, key: KeyEvent) {
        if key.code != KeyCode::Char('d') {
            return;
        }
        let Some(post) = self.post_detail().and_then(PostDetail::post) else {
            return;
        };
        let Some(id) = post.id else {
            self.set_error("This post has no id yet and cannot be deleted".to_string());
            return;
        };
        self.confirm_delete = Some(Overlay::open(id, &self.dismiss));
    }

    fn handle_screen_key(&mut self, key: KeyEvent) {
        if self.screen == Screen::NewPost {
            self.handle_form_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                self.screen = self.screen.next();
                return;
            }
            KeyCode::Char(c @ '1'..='5') => {
                let idx = c as usize - '1' as usize;
                self.screen = Screen::ALL[idx];
                return;
            }
            _ => {}
        }

        match self.screen {
            Screen::Posts => self.handle_posts_key(key),
            Screen::Users => self.handle_users_key(key),
            Screen::Counter => self.handle_counter_key(key),
            Screen::NewPost | Screen::Dates => {}
        }
    }

    fn handle_posts_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.posts.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.posts.select_prev(),
            KeyCode::Enter => {
                if let Some(post) = self.posts.selected_item().cloned() {
                    self.open_post_detail(post);
                }
            }
            KeyCode::Char('n') => self.screen = Screen::NewPost,
            KeyCode::Char('r') => self.reload_posts(),
            _ => {}
        }
    }

    /// Open the detail dialog and fetch a fresh copy of the post. Posts
    /// without an id exist only locally and are shown as they are.
    fn open_post_detail(&mut self, post: Post) {
        let detail = match post.id {
            Some(id) => {
                self.outbox.push(ApiRequest::LoadPost(id));
                PostDetail::Loading(id)
            }
            None => PostDetail::Loaded(post),
        };
        self.post_detail = Some(Overlay::open(detail, &self.dismiss));
    }

    fn handle_users_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.users.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.users.select_prev(),
            KeyCode::Enter => {
                if let Some(user) = self.users.selected_item().cloned() {
                    self.user_detail = Some(Overlay::open(user, &self.dismiss));
                }
            }
            KeyCode::Char('r') => self.reload_users(),
            _ => {}
        }
    }

    fn handle_counter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('+' | '=' | 'k') | KeyCode::Up => self.counter.increment(),
            KeyCode::Char('-' | 'j') | KeyCode::Down => self.counter.decrement(),
            KeyCode::Char('r' | '0') => self.counter.reset(),
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.screen = Screen::Posts;
            return;
        }
        if self.form.handle_key(&key) == FormAction::Submit {
            match self.form.submit() {
                Some(post) => {
                    self.outbox.push(ApiRequest::CreatePost(post));
                    self.set_info("Creating post...".to_string());
                }
                None if self.form.is_submitting() => {}
                None => self.set_error("Fix the highlighted fields".to_string()),
            }
        }
    }

    fn reload_posts(&mut self) {
        self.posts.loading = true;
        self.outbox.push(ApiRequest::LoadPosts);
    }

    fn reload_users(&mut self) {
        self.users.loading = true;
        self.outbox.push(ApiRequest::LoadUsers);
    }

    pub fn apply_response(&mut self, response: ApiResponse) {
        match response {
            ApiResponse::Posts(result) => {
                self.posts.loading = false;
                match result {
                    Ok(posts) => {
                        tracing::info!(count = posts.len(), "Posts loaded");
                        self.posts.replace(posts);
                    }
                    Err(e) => self.report_failure("load posts", &e),
                }
            }
            ApiResponse::Users(result) => {
                self.users.loading = false;
                match result {
                    Ok(users) => {
                        tracing::info!(count = users.len(), "Users loaded");
                        self.users.replace(users);
                    }
                    Err(e) => self.report_failure("load users", &e),
                }
            }
            ApiResponse::Post { id, result } => self.apply_post(id, result),
            ApiResponse::PostCreated(result) => match result {
                Ok(post) => {
                    let label = post
                        .id
                        .map_or_else(|| "new post".to_string(), |id| format!("post #{id}"));
                    tracing::info!(id = ?post.id, "Post created");
                    self.set_info(format!("Created {label}"));
                    self.posts.items.insert(0, post);
                    self.posts.selected = 0;
                    self.form.reset();
                    if self.screen == Screen::NewPost {
                        self.screen = Screen::Posts;
                    }
                }
                Err(e) => {
                    self.form.submit_finished();
                    self.report_failure("create post", &e);
                }
            },
            ApiResponse::PostDeleted { id, result } => match result {
                Ok(()) => {
                    tracing::info!(%id, "Post deleted");
                    self.posts.items.retain(|post| post.id != Some(id));
                    self.posts.clamp();
                    if let Some(detail) = &self.post_detail
                        && detail.item().id() == Some(id)
                    {
                        detail.close();
                    }
                    self.reap_closed_overlays();
                    self.set_info(format!("Deleted post #{id}"));
                }
                Err(e) => self.report_failure("delete post", &e),
            },
        }
    }

    fn apply_post(&mut self, id: PostId, result: Result<Post, jsonboard_api::ApiError>) {
        let Some(detail) = self
            .post_detail
            .as_mut()
            .filter(|o| *o.item() == PostDetail::Loading(id))
        else {
            tracing::debug!(%id, "Dropping post response for a closed dialog");
            return;
        };
        match result {
            Ok(post) => {
                tracing::debug!(%id, "Post loaded");
                detail.item = PostDetail::Loaded(post);
            }
            Err(e) => {
                detail.item = PostDetail::Failed {
                    id,
                    error: e.to_string(),
                };
                self.report_failure("load post", &e);
            }
        }
    }

    fn report_failure(&mut self, action: &str, error: &jsonboard_api::ApiError) {
        tracing::warn!(action, error = %error, "API call failed");
        self.set_error(format!("Failed to {action}: {error}"));
    }

    fn set_info(&mut self, text: String) {
        self.status = Some(Status {
            kind: StatusKind::Info,
            text,
        });
    }

    fn set_error(&mut self, text: String) {
        self.status = Some(Status {
            kind: StatusKind::Error,
            text,
        });
    }
}
