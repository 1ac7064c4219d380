//! # HTTP backend
//!
//! [`Backend`] over `reqwest`. Request bodies are JSON, authenticated calls
//! carry `Authorization: Bearer <token>`, and responses are unwrapped from the
//! server's envelopes (`{data: …}` for most resources, `{orders: […]}` for the
//! order list).
//!
//! Non-success statuses become [`ApiError::Unauthorized`] (401/403) or
//! [`ApiError::Server`], carrying the `message` field of the error body when
//! the server sent one.

use super::{ApiError, Backend};
use crate::model::{
    LoginRequest, MenuDraft, MenuId, MenuItem, Order, OrderPayload, Profile, RegisterRequest,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const LOGIN_PATH: &str = "/api/auth/login";
const REGISTER_PATH: &str = "/api/auth/register";
const MENU_PATH: &str = "/api/menu";
const ORDERS_PATH: &str = "/api/orders";
const PROFILE_PATH: &str = "/api/profile";

#[derive(Deserialize)]
struct Data<T> {
    data: T,
}

#[derive(Deserialize)]
struct TokenData {
    token: String,
}

#[derive(Deserialize)]
struct MenuList {
    #[serde(default)]
    data: Option<Vec<MenuItem>>,
}

#[derive(Deserialize)]
struct OrderList {
    #[serde(default)]
    orders: Option<Vec<Order>>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Client for the ordering API at `base_url`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `/api/menu/<id>` with the id as a single percent-encoded segment.
    fn menu_url(&self, id: &MenuId) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.url(MENU_PATH))
            .map_err(|e| ApiError::Network(format!("invalid API URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::Network("API URL cannot carry a path".into()))?
            .push(&id.0);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "Response");

        // 204 and friends: decode as JSON null so `IgnoredAny` and `Option` work.
        let body: &[u8] = if body.is_empty() { b"null" } else { &body };

        if status.is_success() {
            return serde_json::from_slice(body).map_err(ApiError::from);
        }
        Err(failure(status, body))
    }

    /// Like [`send`](Self::send) for calls whose success body carries nothing.
    /// Whatever the server writes on success is not decoded.
    async fn send_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "Response");

        if status.is_success() {
            return Ok(());
        }
        Err(failure(status, &body))
    }
}

fn failure(status: StatusCode, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message);
    warn!(status = status.as_u16(), message = message.as_deref().unwrap_or(""), "Request failed");
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized { message },
        _ => ApiError::Server {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl Backend for HttpBackend {
    #[instrument(skip_all, fields(username = %request.username))]
    async fn login(&self, request: &LoginRequest) -> Result<String, ApiError> {
        debug!("Sending request");
        let reply: Data<TokenData> = self
            .send(self.client.post(self.url(LOGIN_PATH)).json(request))
            .await?;
        Ok(reply.data.token)
    }

    #[instrument(skip_all, fields(username = %request.username))]
    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        debug!("Sending request");
        let _: IgnoredAny = self
            .send(self.client.post(self.url(REGISTER_PATH)).json(request))
            .await?;
        Ok(())
    }

    #[instrument(skip_all)]
    async fn list_menu(&self, token: &str) -> Result<Vec<MenuItem>, ApiError> {
        debug!("Sending request");
        let reply: MenuList = self
            .send(self.client.get(self.url(MENU_PATH)).bearer_auth(token))
            .await?;
        Ok(reply.data.unwrap_or_default())
    }

    #[instrument(skip(self, token))]
    async fn create_menu(&self, token: &str, draft: &MenuDraft) -> Result<MenuItem, ApiError> {
        debug!("Sending request");
        let reply: Data<MenuItem> = self
            .send(self.client.post(self.url(MENU_PATH)).bearer_auth(token).json(draft))
            .await?;
        Ok(reply.data)
    }

    #[instrument(skip(self, token))]
    async fn update_menu(&self, token: &str, id: &MenuId, draft: &MenuDraft) -> Result<MenuItem, ApiError> {
        debug!("Sending request");
        let reply: Data<MenuItem> = self
            .send(self.client.put(self.menu_url(id)?).bearer_auth(token).json(draft))
            .await?;
        Ok(reply.data)
    }

    #[instrument(skip(self, token))]
    async fn delete_menu(&self, token: &str, id: &MenuId) -> Result<(), ApiError> {
        debug!("Sending request");
        self.send_empty(self.client.delete(self.menu_url(id)?).bearer_auth(token))
            .await
    }

    #[instrument(skip_all, fields(lines = payload.items.len(), total = %payload.total_amount))]
    async fn submit_order(&self, token: &str, payload: &OrderPayload) -> Result<serde_json::Value, ApiError> {
        debug!(?payload, "Sending request");
        self.send(self.client.post(self.url(ORDERS_PATH)).bearer_auth(token).json(payload))
            .await
    }

    #[instrument(skip_all)]
    async fn list_orders(&self, token: &str) -> Result<Vec<Order>, ApiError> {
        debug!("Sending request");
        let reply: OrderList = self
            .send(self.client.get(self.url(ORDERS_PATH)).bearer_auth(token))
            .await?;
        Ok(reply.orders.unwrap_or_default())
    }

    #[instrument(skip_all)]
    async fn profile(&self, token: &str) -> Result<Profile, ApiError> {
        debug!("Sending request");
        let reply: Data<Profile> = self
            .send(self.client.get(self.url(PROFILE_PATH)).bearer_auth(token))
            .await?;
        Ok(reply.data)
    }
}
