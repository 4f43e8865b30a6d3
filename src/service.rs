//! Remote user service: the trait the controller and forms talk to, and the
//! HTTP implementation against a JSONPlaceholder-style REST endpoint.
//!
//! The remote side is a mock: created, updated and deleted records are echoed
//! back but never stored, so a fresh `GET /users` will not reflect them.

use crate::model::{UserId, UserProfile, UserRecord};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Default remote endpoint.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

const USERS_PATH: &str = "/users";

/// Any failure talking to the remote service.
///
/// Callers treat every variant the same way; the split only exists so the
/// transcript says what went wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unreadable response: {0}")]
    Decode(String),
}

/// Trait for user services to allow mocking and abstraction
#[async_trait]
pub trait UserService: Send + Sync {
    async fn list_users(&self) -> Result<Vec<UserRecord>, ServiceError>;
    async fn create_user(&self, profile: &UserProfile) -> Result<UserRecord, ServiceError>;
    async fn update_user(&self, user: &UserRecord) -> Result<UserRecord, ServiceError>;
    async fn delete_user(&self, id: UserId) -> Result<(), ServiceError>;
}

pub struct HttpUserService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpUserService {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn users_url(&self) -> String {
        format!("{}{}", self.base_url, USERS_PATH)
    }

    fn user_url(&self, id: UserId) -> String {
        format!("{}{}/{}", self.base_url, USERS_PATH, id)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ServiceError> {
        let resp = request
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ServiceError> {
        let resp = self.send(request).await?;
        resp.json::<T>()
            .await
            .map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

#[async_trait]
impl UserService for HttpUserService {
    async fn list_users(&self) -> Result<Vec<UserRecord>, ServiceError> {
        self.send_json(self.client.get(self.users_url())).await
    }

    async fn create_user(&self, profile: &UserProfile) -> Result<UserRecord, ServiceError> {
        self.send_json(self.client.post(self.users_url()).json(profile))
            .await
    }

    async fn update_user(&self, user: &UserRecord) -> Result<UserRecord, ServiceError> {
        self.send_json(self.client.put(self.user_url(user.id)).json(user))
            .await
    }

    async fn delete_user(&self, id: UserId) -> Result<(), ServiceError> {
        // Body is not required; only the status matters
        self.send(self.client.delete(self.user_url(id))).await?;
        Ok(())
    }
}
