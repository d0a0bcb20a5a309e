//! In-process harness: the real router over a chosen store backend.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use chrono::TimeDelta;
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use bazaar_api::config::{ApiConfig, SentryConfig};
use bazaar_api::services::{
    HmacTokenMaker, SendVerifyEmailPayload, TaskDistributor, TaskError, TokenMaker,
};
use bazaar_api::state::{AppState, Stores};
use bazaar_api::store::{CatalogSeed, MemoryStore};
use bazaar_core::store::Store;
use bazaar_core::{AdminId, AdminIdentity, AdminType, Identity, UserId, UserIdentity};

use crate::mock::MockStore;

/// Signing key used by every test app.
pub const TEST_TOKEN_KEY: &str = "Qm7vT2xK9pLw4Rz8Nc3Hb6Jf1Gd5Ys0E";

/// Configuration for in-process tests.
#[must_use]
pub fn test_config() -> ApiConfig {
    ApiConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        token_symmetric_key: SecretString::from(TEST_TOKEN_KEY),
        access_token_duration: TimeDelta::minutes(15),
        bootstrap_admin: None,
        sentry: SentryConfig::default(),
    }
}

/// Task distributor that keeps every payload it receives.
#[derive(Debug, Default)]
pub struct RecordingTaskDistributor {
    sent: Mutex<Vec<SendVerifyEmailPayload>>,
    unavailable: AtomicBool,
}

impl RecordingTaskDistributor {
    /// Make every later distribution fail.
    pub fn go_offline(&self) {
        self.unavailable.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn sent(&self) -> Vec<SendVerifyEmailPayload> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl TaskDistributor for RecordingTaskDistributor {
    async fn distribute_send_verify_email(
        &self,
        payload: SendVerifyEmailPayload,
    ) -> Result<(), TaskError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(TaskError::Unavailable("queue offline".to_string()));
        }
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(payload);
        Ok(())
    }
}

/// A decoded HTTP response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// JSON body, or `Value::Null` when the body is empty or not JSON.
    pub body: Value,
}

/// The full application wired to `store`.
pub struct TestApp<S> {
    pub router: Router,
    pub store: Arc<S>,
    pub tasks: Arc<RecordingTaskDistributor>,
    tokens: Arc<HmacTokenMaker>,
}

impl TestApp<MockStore> {
    /// App over a fresh [`MockStore`] with no expectations.
    #[must_use]
    pub fn mock() -> Self {
        Self::with_store(Arc::new(MockStore::new()))
    }
}

impl TestApp<MemoryStore> {
    /// App over an in-memory store loaded with the demo catalog.
    #[must_use]
    pub fn memory() -> Self {
        Self::with_store(Arc::new(MemoryStore::with_catalog(CatalogSeed::demo())))
    }
}

impl<S: Store + 'static> TestApp<S> {
    /// # Panics
    ///
    /// Panics if the test signing key is rejected.
    #[must_use]
    pub fn with_store(store: Arc<S>) -> Self {
        let tokens = Arc::new(
            HmacTokenMaker::new(SecretString::from(TEST_TOKEN_KEY)).expect("test key is valid"),
        );
        let tasks = Arc::new(RecordingTaskDistributor::default());

        let state = AppState::new(
            test_config(),
            Stores::shared(store.clone()),
            tokens.clone(),
            tasks.clone(),
        );

        Self {
            router: bazaar_api::app(state),
            store,
            tasks,
            tokens,
        }
    }

    /// Bearer token for end user `user_id`.
    #[must_use]
    pub fn user_token(&self, user_id: i64) -> String {
        self.token(Identity::User(UserIdentity {
            user_id: UserId::new(user_id),
        }))
    }

    /// Bearer token for an admin.
    #[must_use]
    pub fn admin_token(&self, admin_id: i64, admin_type: AdminType, active: bool) -> String {
        self.token(Identity::Admin(AdminIdentity {
            admin_id: AdminId::new(admin_id),
            admin_type,
            active,
        }))
    }

    /// Bearer token for an active super admin.
    #[must_use]
    pub fn super_admin_token(&self, admin_id: i64) -> String {
        self.admin_token(admin_id, AdminType::SuperAdmin, true)
    }

    fn token(&self, identity: Identity) -> String {
        self.tokens
            .create_token(identity, TimeDelta::minutes(15))
            .expect("token is issued")
            .0
    }

    /// Send one request through the router.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("request builds"))
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body is readable")
            .to_bytes();

        TestResponse {
            status,
            headers,
            body: serde_json::from_slice(&bytes).unwrap_or(Value::Null),
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, token, None).await
    }
}
