//! Background API calls.
//!
//! The UI loop never awaits the network. [`App`] queues [`ApiRequest`]s,
//! [`ApiBridge::pump`] spawns one tokio task per request and feeds finished
//! [`ApiResponse`]s back into the app on a later frame.

use tokio::sync::mpsc;

use jsonboard_api::{ApiClient, ApiError};
use jsonboard_types::{NewPost, Post, PostId, User};

use crate::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    LoadPosts,
    LoadPost(PostId),
    LoadUsers,
    CreatePost(NewPost),
    DeletePost(PostId),
}

#[derive(Debug)]
pub enum ApiResponse {
    Posts(Result<Vec<Post>, ApiError>),
    Post {
        id: PostId,
        result: Result<Post, ApiError>,
    },
    Users(Result<Vec<User>, ApiError>),
    PostCreated(Result<Post, ApiError>),
    PostDeleted {
        id: PostId,
        result: Result<(), ApiError>,
    },
}

pub struct ApiBridge {
    client: ApiClient,
    tx: mpsc::UnboundedSender<ApiResponse>,
    rx: mpsc::UnboundedReceiver<ApiResponse>,
}

impl ApiBridge {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { client, tx, rx }
    }

    /// Spawn the app's queued requests and apply any finished responses.
    /// Must be called from within a tokio runtime.
    pub fn pump(&mut self, app: &mut App) {
        for request in app.take_requests() {
            self.spawn(request);
        }
        while let Ok(response) = self.rx.try_recv() {
            app.apply_response(response);
        }
    }

    /// Wait for the next finished response.
    pub async fn next_response(&mut self) -> Option<ApiResponse> {
        self.rx.recv().await
    }

    fn spawn(&self, request: ApiRequest) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tracing::debug!(?request, "Dispatching API request");

        tokio::spawn(async move {
            let response = match request {
                ApiRequest::LoadPosts => ApiResponse::Posts(client.posts().get_all().await),
                ApiRequest::LoadPost(id) => ApiResponse::Post {
                    id,
                    result: client.posts().get_by_id(id).await,
                },
                ApiRequest::LoadUsers => ApiResponse::Users(client.users().get_all().await),
                ApiRequest::CreatePost(post) => {
                    ApiResponse::PostCreated(client.posts().create(&post).await)
                }
                ApiRequest::DeletePost(id) => ApiResponse::PostDeleted {
                    id,
                    result: client.posts().delete(id).await,
                },
            };
            // Receiver gone means the UI is shutting down.
            let _ = tx.send(response);
        });
    }
}
