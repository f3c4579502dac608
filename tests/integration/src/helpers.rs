//! Test helpers for integration tests
//!
//! Provides a self-contained test server, request helpers and the
//! apply → approve → login flow most tests start from.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use affiliate_api::{create_app, create_app_state_with_mailer};
use affiliate_common::{AppConfig, Claims, JwtService, PrincipalKind};
use affiliate_db::Database;
use affiliate_mail::MemoryMailer;
use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{application_form, approve_body, unique_email, LoginRequest};

pub const TEST_JWT_SECRET: &str = "integration-test-secret";
pub const ADMIN_EMAIL: &str = "root@example.com";
pub const ADMIN_PASSWORD: &str = "RootPass123";

/// Running server plus the mailer it sends through
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub mailer: MemoryMailer,
    _handle: JoinHandle<()>,
}

/// An approved, logged-in affiliate
#[derive(Debug, Clone)]
pub struct TestAffiliate {
    pub id: i64,
    pub email: String,
    pub code: String,
    pub password: String,
    pub token: String,
}

impl TestServer {
    /// Start a server with the default test configuration
    pub async fn start() -> Result<Self> {
        Self::start_with(&[]).await
    }

    /// Start a server with extra environment overrides
    pub async fn start_with(overrides: &[(&str, &str)]) -> Result<Self> {
        let config = test_config(overrides)?;
        let mailer = MemoryMailer::new();
        let database = Database::in_memory().await?;

        let state =
            create_app_state_with_mailer(config, database, Arc::new(mailer.clone())).await?;
        let app = create_app(state)?;

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            mailer,
            _handle: handle,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn send(&self, request: RequestBuilder, token: Option<&str>) -> Result<Response> {
        let request = match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        Ok(request.send().await?)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        self.send(self.client.get(self.url(path)), None).await
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        self.send(self.client.get(self.url(path)), Some(token)).await
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        self.send(self.client.post(self.url(path)).json(body), None)
            .await
    }

    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        self.send(self.client.post(self.url(path)).json(body), Some(token))
            .await
    }

    pub async fn put_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        self.send(self.client.put(self.url(path)).json(body), Some(token))
            .await
    }

    // === Flows ===

    /// Log in as the seeded super admin
    pub async fn admin_token(&self) -> Result<String> {
        let response = self
            .post("/api/admin/login", &LoginRequest::new(ADMIN_EMAIL, ADMIN_PASSWORD))
            .await?;
        let body: Value = assert_json(response, StatusCode::OK).await?;
        token_of(&body)
    }

    /// Submit an application and return its id
    pub async fn submit_application(&self, email: &str) -> Result<i64> {
        let response = self
            .post("/api/affiliates/applications", &application_form(email))
            .await?;
        let body: Value = assert_json(response, StatusCode::CREATED).await?;
        body["id"].as_i64().context("application id missing")
    }

    /// Approve an application and return the review response
    pub async fn approve(&self, admin_token: &str, application_id: i64) -> Result<Value> {
        let response = self
            .post_auth(
                &format!("/api/admin/applications/{application_id}/review"),
                admin_token,
                &approve_body(None),
            )
            .await?;
        assert_json(response, StatusCode::OK).await
    }

    /// Apply, approve, read the mailed password and log in
    pub async fn approved_affiliate(&self, admin_token: &str) -> Result<TestAffiliate> {
        let email = unique_email("affiliate");
        let application_id = self.submit_application(&email).await?;
        let review = self.approve(admin_token, application_id).await?;

        let password = self
            .mailer
            .issued_password(&email)
            .context("approval mail carried no password")?;
        let response = self
            .post("/api/affiliates/login", &LoginRequest::new(&email, &password))
            .await?;
        let login: Value = assert_json(response, StatusCode::OK).await?;

        Ok(TestAffiliate {
            id: review["affiliate"]["id"].as_i64().context("affiliate id missing")?,
            code: review["affiliate"]["affiliateCode"]
                .as_str()
                .context("affiliate code missing")?
                .to_string(),
            token: token_of(&login)?,
            email,
            password,
        })
    }
}

/// Configuration for an isolated test server
///
/// Rate limits are raised so bursts of test requests never see 429.
pub fn test_config(overrides: &[(&str, &str)]) -> Result<AppConfig> {
    let mut vars: HashMap<String, String> = [
        ("JWT_SECRET", TEST_JWT_SECRET),
        ("JWT_EXPIRES_IN", "1h"),
        ("ADMIN_EMAIL", ADMIN_EMAIL),
        ("ADMIN_PASSWORD", ADMIN_PASSWORD),
        ("FRONTEND_URL", "https://affiliates.example.com"),
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "10000"),
        ("RATE_LIMIT_BURST", "10000"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (k, v) in overrides {
        vars.insert((*k).to_string(), (*v).to_string());
    }

    AppConfig::from_lookup(|name| vars.get(name).cloned())
        .map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// A correctly signed token whose expiry has passed
pub fn expired_token(kind: PrincipalKind, id: i64, email: &str) -> Result<String> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: id.to_string(),
        kind,
        email: email.to_string(),
        role: None,
        iat: now - 7200,
        exp: now - 3600,
    };
    Ok(JwtService::new(TEST_JWT_SECRET, 3600).encode_claims(&claims)?)
}

pub fn token_of(body: &Value) -> Result<String> {
    body["token"]
        .as_str()
        .map(str::to_string)
        .context("token missing from login response")
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert an error status and return the `error.code` field
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: Value = assert_json(response, expected_status).await?;
    body["error"]["code"]
        .as_str()
        .map(str::to_string)
        .context("error body has no code")
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
