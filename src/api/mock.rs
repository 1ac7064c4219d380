//! # Mock backend
//!
//! A scripted [`Backend`] for testing screens and the app lifecycle without a
//! server.
//!
//! Queue the responses you expect, in order, then hand the mock to the code
//! under test. Every call pops the next expectation; a call that does not
//! match the head of the queue is answered with a network error and counted as
//! unexpected. [`MockBackend::verify`] panics if anything is left over or went
//! wrong.
//!
//! ```ignore
//! let mock = Arc::new(MockBackend::new());
//! mock.expect_login().return_ok("tok".to_string());
//! mock.expect_list_menu().return_ok(vec![MenuItem::new("a", "Kopi", 10000)]);
//!
//! // ... drive the app ...
//!
//! assert_eq!(mock.calls().len(), 2);
//! mock.verify();
//! ```

use super::{ApiError, Backend};
use crate::model::{
    LoginRequest, MenuDraft, MenuId, MenuItem, Order, OrderPayload, Profile, RegisterRequest,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A scripted response.
#[derive(Debug)]
enum Expectation {
    Login(Result<String, ApiError>),
    Register(Result<(), ApiError>),
    ListMenu(Result<Vec<MenuItem>, ApiError>),
    CreateMenu(Result<MenuItem, ApiError>),
    UpdateMenu(Result<MenuItem, ApiError>),
    DeleteMenu(Result<(), ApiError>),
    SubmitOrder(Result<serde_json::Value, ApiError>),
    ListOrders(Result<Vec<Order>, ApiError>),
    Profile(Result<Profile, ApiError>),
}

/// A request the mock received, with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login(LoginRequest),
    Register(RegisterRequest),
    ListMenu { token: String },
    CreateMenu { token: String, draft: MenuDraft },
    UpdateMenu { token: String, id: MenuId, draft: MenuDraft },
    DeleteMenu { token: String, id: MenuId },
    SubmitOrder { token: String, payload: OrderPayload },
    ListOrders { token: String },
    Profile { token: String },
}

#[derive(Default)]
struct State {
    expectations: VecDeque<Expectation>,
    calls: Vec<Call>,
    unexpected: Vec<Call>,
}

fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
pub struct MockBackend {
    state: Arc<Mutex<State>>,
}

macro_rules! expect_fn {
    ($(#[$doc:meta])* $name:ident, $variant:ident, $ty:ty) => {
        $(#[$doc])*
        pub fn $name(&self) -> ExpectationBuilder<$ty> {
            ExpectationBuilder {
                state: self.state.clone(),
                wrap: Expectation::$variant,
            }
        }
    };
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    expect_fn!(/// Expects a `login` call.
        expect_login, Login, String);
    expect_fn!(/// Expects a `register` call.
        expect_register, Register, ());
    expect_fn!(/// Expects a `list_menu` call.
        expect_list_menu, ListMenu, Vec<MenuItem>);
    expect_fn!(/// Expects a `create_menu` call.
        expect_create_menu, CreateMenu, MenuItem);
    expect_fn!(/// Expects an `update_menu` call.
        expect_update_menu, UpdateMenu, MenuItem);
    expect_fn!(/// Expects a `delete_menu` call.
        expect_delete_menu, DeleteMenu, ());
    expect_fn!(/// Expects a `submit_order` call.
        expect_submit_order, SubmitOrder, serde_json::Value);
    expect_fn!(/// Expects a `list_orders` call.
        expect_list_orders, ListOrders, Vec<Order>);
    expect_fn!(/// Expects a `profile` call.
        expect_profile, Profile, Profile);

    /// Every call received so far, in order, including unexpected ones.
    pub fn calls(&self) -> Vec<Call> {
        lock(&self.state).calls.clone()
    }

    /// Number of expectations not yet consumed.
    pub fn remaining(&self) -> usize {
        lock(&self.state).expectations.len()
    }

    /// Panics if an expectation was not met or a call was not expected.
    pub fn verify(&self) {
        let state = lock(&self.state);
        if !state.unexpected.is_empty() {
            panic!("Unexpected calls: {:?}", state.unexpected);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining: {:?}",
                state.expectations.len(),
                state.expectations
            );
        }
    }

    /// Records `call` and pops the head expectation if `pick` accepts it.
    fn answer<T>(&self, call: Call, pick: impl FnOnce(Expectation) -> Result<Result<T, ApiError>, Expectation>) -> Result<T, ApiError> {
        let mut state = lock(&self.state);
        state.calls.push(call.clone());
        let Some(head) = state.expectations.pop_front() else {
            state.unexpected.push(call);
            return Err(ApiError::Network("unexpected call to mock backend".into()));
        };
        match pick(head) {
            Ok(response) => response,
            Err(head) => {
                state.expectations.push_front(head);
                state.unexpected.push(call);
                Err(ApiError::Network("unexpected call to mock backend".into()))
            }
        }
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<T> {
    state: Arc<Mutex<State>>,
    wrap: fn(Result<T, ApiError>) -> Expectation,
}

impl<T> ExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        lock(&self.state).expectations.push_back((self.wrap)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ApiError) {
        lock(&self.state).expectations.push_back((self.wrap)(Err(error)));
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn login(&self, request: &LoginRequest) -> Result<String, ApiError> {
        self.answer(Call::Login(request.clone()), |e| match e {
            Expectation::Login(r) => Ok(r),
            other => Err(other),
        })
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.answer(Call::Register(request.clone()), |e| match e {
            Expectation::Register(r) => Ok(r),
            other => Err(other),
        })
    }

    async fn list_menu(&self, token: &str) -> Result<Vec<MenuItem>, ApiError> {
        let call = Call::ListMenu { token: token.to_string() };
        self.answer(call, |e| match e {
            Expectation::ListMenu(r) => Ok(r),
            other => Err(other),
        })
    }

    async fn create_menu(&self, token: &str, draft: &MenuDraft) -> Result<MenuItem, ApiError> {
        let call = Call::CreateMenu { token: token.to_string(), draft: draft.clone() };
        self.answer(call, |e| match e {
            Expectation::CreateMenu(r) => Ok(r),
            other => Err(other),
        })
    }

    async fn update_menu(&self, token: &str, id: &MenuId, draft: &MenuDraft) -> Result<MenuItem, ApiError> {
        let call = Call::UpdateMenu { token: token.to_string(), id: id.clone(), draft: draft.clone() };
        self.answer(call, |e| match e {
            Expectation::UpdateMenu(r) => Ok(r),
            other => Err(other),
        })
    }

    async fn delete_menu(&self, token: &str, id: &MenuId) -> Result<(), ApiError> {
        let call = Call::DeleteMenu { token: token.to_string(), id: id.clone() };
        self.answer(call, |e| match e {
            Expectation::DeleteMenu(r) => Ok(r),
            other => Err(other),
        })
    }

    async fn submit_order(&self, token: &str, payload: &OrderPayload) -> Result<serde_json::Value, ApiError> {
        let call = Call::SubmitOrder { token: token.to_string(), payload: payload.clone() };
        self.answer(call, |e| match e {
            Expectation::SubmitOrder(r) => Ok(r),
            other => Err(other),
        })
    }

    async fn list_orders(&self, token: &str) -> Result<Vec<Order>, ApiError> {
        let call = Call::ListOrders { token: token.to_string() };
        self.answer(call, |e| match e {
            Expectation::ListOrders(r) => Ok(r),
            other => Err(other),
        })
    }

    async fn profile(&self, token: &str) -> Result<Profile, ApiError> {
        let call = Call::Profile { token: token.to_string() };
        self.answer(call, |e| match e {
            Expectation::Profile(r) => Ok(r),
            other => Err(other),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_answers_in_order_and_records_calls() {
        let mock = MockBackend::new();
        mock.expect_login().return_ok("tok".to_string());
        mock.expect_list_menu().return_ok(vec![MenuItem::new("a", "Kopi", 10000)]);

        let token = mock.login(&LoginRequest::new("budi", "pw")).await.unwrap();
        let menu = mock.list_menu(&token).await.unwrap();

        assert_eq!(menu.len(), 1);
        assert_eq!(mock.calls()[1], Call::ListMenu { token: "tok".into() });
        mock.verify();
    }

    #[tokio::test]
    async fn test_mismatched_call_is_reported() {
        let mock = MockBackend::new();
        mock.expect_profile().return_err(ApiError::Unauthorized { message: None });

        let result = mock.list_orders("tok").await;

        assert!(matches!(result, Err(ApiError::Network(_))));
        assert_eq!(mock.remaining(), 1);
        let verdict = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| mock.verify()));
        assert!(verdict.is_err());
    }
}
