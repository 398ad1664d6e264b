//! Async client for the placeholder REST API.
//!
//! # Endpoints
//!
//! | resource | calls |
//! |----------|-------|
//! | [`PostsApi`] | `GET /posts`, `GET /posts/{id}`, `POST /posts`, `PUT`/`PATCH`/`DELETE /posts/{id}` |
//! | [`UsersApi`] | the same six calls under `/users` |
//!
//! Every request goes through [`retry::send_with_retry`]. Non-2xx responses
//! become [`ApiError::Status`] with a capped copy of the body.

pub mod retry;

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use jsonboard_config::JsonboardConfig;
use jsonboard_types::{NewPost, NewUser, Post, PostId, PostPatch, User, UserId, UserPatch};

use retry::{RetryConfig, RetryOutcome, send_with_retry};

pub const POSTS_ENDPOINT: &str = "/posts";
pub const USERS_ENDPOINT: &str = "/users";

const CONNECT_TIMEOUT_SECS: u64 = 10;
const MAX_ERROR_BODY_CHARS: usize = 2 * 1024;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("{method} {path} failed after {attempts} attempt(s): {source}")]
    Transport {
        method: Method,
        path: String,
        attempts: u32,
        source: reqwest::Error,
    },
    #[error("{method} {path} returned {status}: {body}")]
    Status {
        method: Method,
        path: String,
        status: StatusCode,
        body: String,
    },
    #[error("failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        source: reqwest::Error,
    },
}

impl ApiError {
    /// HTTP status for `Status` errors.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl ApiClient {
    /// `base_url` is used as-is apart from a trailing `/`.
    pub fn new(base_url: &str, timeout: Duration, retry: RetryConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(timeout)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry,
        })
    }

    pub fn from_config(config: &JsonboardConfig) -> Result<Self> {
        let retry = RetryConfig::default().with_max_retries(config.max_retries());
        Self::new(&config.base_url(), config.timeout(), retry)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn posts(&self) -> PostsApi<'_> {
        PostsApi { client: self }
    }

    #[must_use]
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi { client: self }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&(dyn erased::JsonBody + Sync)>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%method, %url, "API request");

        let outcome = send_with_retry(
            || {
                let request = self.http.request(method.clone(), &url);
                match body {
                    Some(body) => body.attach(request),
                    None => request,
                }
            },
            &self.retry,
        )
        .await;

        match outcome {
            RetryOutcome::Success(response) => Ok(response),
            RetryOutcome::HttpError(response) => {
                let status = response.status();
                let body = read_capped_error_body(response).await;
                tracing::warn!(%method, path, %status, "API error response");
                Err(ApiError::Status {
                    method,
                    path: path.to_string(),
                    status,
                    body,
                })
            }
            RetryOutcome::ConnectionError { attempts, source } => Err(ApiError::Transport {
                method,
                path: path.to_string(),
                attempts,
                source,
            }),
            RetryOutcome::NonRetryable(source) => Err(ApiError::Transport {
                method,
                path: path.to_string(),
                attempts: 1,
                source,
            }),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(Method::GET, path, None).await?;
        decode(response, path).await
    }

    async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let response = self.send(method, path, Some(body)).await?;
        decode(response, path).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.send(Method::DELETE, path, None).await?;
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response, path: &str) -> Result<T> {
    response.json::<T>().await.map_err(|source| ApiError::Decode {
        path: path.to_string(),
        source,
    })
}

async fn read_capped_error_body(response: reqwest::Response) -> String {
    let text = response.text().await.unwrap_or_default();
    if text.chars().count() > MAX_ERROR_BODY_CHARS {
        let head: String = text.chars().take(MAX_ERROR_BODY_CHARS).collect();
        return format!("{head}...(truncated)");
    }
    text
}

/// Object-safe "serialize me into this request" so `send` can stay
/// non-generic over body types.
mod erased {
    use reqwest::RequestBuilder;
    use serde::Serialize;

    pub trait JsonBody {
        fn attach(&self, request: RequestBuilder) -> RequestBuilder;
    }

    impl<T: Serialize> JsonBody for T {
        fn attach(&self, request: RequestBuilder) -> RequestBuilder {
            request.json(self)
        }
    }
}

pub struct PostsApi<'a> {
    client: &'a ApiClient,
}

impl PostsApi<'_> {
    pub async fn get_all(&self) -> Result<Vec<Post>> {
        self.client.get(POSTS_ENDPOINT).await
    }

    pub async fn get_by_id(&self, id: PostId) -> Result<Post> {
        self.client.get(&format!("{POSTS_ENDPOINT}/{id}")).await
    }

    pub async fn create(&self, post: &NewPost) -> Result<Post> {
        self.client
            .send_json(Method::POST, POSTS_ENDPOINT, post)
            .await
    }

    /// Full replacement (`PUT`).
    pub async fn update(&self, id: PostId, patch: &PostPatch) -> Result<Post> {
        self.client
            .send_json(Method::PUT, &format!("{POSTS_ENDPOINT}/{id}"), patch)
            .await
    }

    pub async fn patch(&self, id: PostId, patch: &PostPatch) -> Result<Post> {
        self.client
            .send_json(Method::PATCH, &format!("{POSTS_ENDPOINT}/{id}"), patch)
            .await
    }

    pub async fn delete(&self, id: PostId) -> Result<()> {
        self.client.delete(&format!("{POSTS_ENDPOINT}/{id}")).await
    }
}

pub struct UsersApi<'a> {
    client: &'a ApiClient,
}

impl UsersApi<'_> {
    pub async fn get_all(&self) -> Result<Vec<User>> {
        self.client.get(USERS_ENDPOINT).await
    }

    pub async fn get_by_id(&self, id: UserId) -> Result<User> {
        self.client.get(&format!("{USERS_ENDPOINT}/{id}")).await
    }

    pub async fn create(&self, user: &NewUser) -> Result<User> {
        self.client
            .send_json(Method::POST, USERS_ENDPOINT, user)
            .await
    }

    pub async fn update(&self, id: UserId, patch: &UserPatch) -> Result<User> {
        self.client
            .send_json(Method::PUT, &format!("{USERS_ENDPOINT}/{id}"), patch)
            .await
    }

    pub async fn patch(&self, id: UserId, patch: &UserPatch) -> Result<User> {
        self.client
            .send_json(Method::PATCH, &format!("{USERS_ENDPOINT}/{id}"), patch)
            .await
    }

    pub async fn delete(&self, id: UserId) -> Result<()> {
        self.client.delete(&format!("{USERS_ENDPOINT}/{id}")).await
    }
}
