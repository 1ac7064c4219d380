use super::ApiError;
use crate::model::{
    LoginRequest, MenuDraft, MenuId, MenuItem, Order, OrderPayload, Profile, RegisterRequest,
};
use async_trait::async_trait;

/// The remote ordering API.
///
/// Screens and the [`App`](crate::lifecycle::App) only ever see this trait, so
/// the HTTP implementation can be swapped for [`MockBackend`](super::mock::MockBackend)
/// in tests. Every method except `login` and `register` takes the bearer token
/// of the active session.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `POST /api/auth/login`; returns the session token.
    async fn login(&self, request: &LoginRequest) -> Result<String, ApiError>;

    /// `POST /api/auth/register`.
    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError>;

    /// `GET /api/menu`.
    async fn list_menu(&self, token: &str) -> Result<Vec<MenuItem>, ApiError>;

    /// `POST /api/menu`.
    async fn create_menu(&self, token: &str, draft: &MenuDraft) -> Result<MenuItem, ApiError>;

    /// `PUT /api/menu/{id}`.
    async fn update_menu(&self, token: &str, id: &MenuId, draft: &MenuDraft) -> Result<MenuItem, ApiError>;

    /// `DELETE /api/menu/{id}`.
    async fn delete_menu(&self, token: &str, id: &MenuId) -> Result<(), ApiError>;

    /// `POST /api/orders`; returns whatever the server echoes back.
    async fn submit_order(&self, token: &str, payload: &OrderPayload) -> Result<serde_json::Value, ApiError>;

    /// `GET /api/orders`.
    async fn list_orders(&self, token: &str) -> Result<Vec<Order>, ApiError>;

    /// `GET /api/profile`.
    async fn profile(&self, token: &str) -> Result<Profile, ApiError>;
}
