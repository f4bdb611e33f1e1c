//! Stateless typed wrapper over the HTTP API.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use skillswap_models::{
    CreateSwapRequestDto, LoginRequest, PublicProfile, SignupDto, SwapRequestId, SwapRequestView,
    SwapStatus, UpdateProfileDto, UpdateSwapStatusDto, User, UserFilterParams,
};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::types::{
    AuthResult, Envelope, RequestPayload, RequestsPayload, UserPayload, UsersPayload,
    filter_query, parse_failure, parse_success,
};

/// One method per endpoint. Tokens are passed in; see [`crate::Session`]
/// for a client that keeps one.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` is the API root, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("skillswap-client/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Envelope<T>> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(status = status.as_u16(), "API response");

        if status.is_success() {
            parse_success(&body)
        } else {
            Err(parse_failure(status.as_u16(), &body))
        }
    }

    async fn auth_result(&self, request: RequestBuilder) -> Result<AuthResult> {
        let envelope: Envelope<UserPayload> = self.send(request).await?;
        let token = envelope
            .token
            .clone()
            .ok_or_else(|| ClientError::Parse("auth response has no token".to_string()))?;
        let user = envelope.into_data()?.user;
        Ok(AuthResult { token, user })
    }

    pub async fn signup(&self, dto: &SignupDto) -> Result<AuthResult> {
        self.auth_result(self.http.post(self.url("/auth/signup")).json(dto))
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResult> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.auth_result(self.http.post(self.url("/auth/login")).json(&body))
            .await
    }

    /// Public directory. Includes the caller when signed in.
    pub async fn list_users(&self, filters: &UserFilterParams) -> Result<Vec<PublicProfile>> {
        let request = self
            .http
            .get(self.url("/users"))
            .query(&filter_query(filters));
        let envelope: Envelope<UsersPayload> = self.send(request).await?;
        Ok(envelope.into_data()?.users)
    }

    pub async fn me(&self, token: &str) -> Result<User> {
        let request = self.http.get(self.url("/users/me")).bearer_auth(token);
        let envelope: Envelope<UserPayload> = self.send(request).await?;
        Ok(envelope.into_data()?.user)
    }

    pub async fn update_me(&self, token: &str, changes: &UpdateProfileDto) -> Result<User> {
        let request = self
            .http
            .patch(self.url("/users/me"))
            .bearer_auth(token)
            .json(changes);
        let envelope: Envelope<UserPayload> = self.send(request).await?;
        Ok(envelope.into_data()?.user)
    }

    pub async fn create_request(
        &self,
        token: &str,
        dto: &CreateSwapRequestDto,
    ) -> Result<SwapRequestView> {
        let request = self
            .http
            .post(self.url("/swap-requests"))
            .bearer_auth(token)
            .json(dto);
        let envelope: Envelope<RequestPayload> = self.send(request).await?;
        Ok(envelope.into_data()?.request)
    }

    pub async fn received(&self, token: &str) -> Result<Vec<SwapRequestView>> {
        self.list_requests(token, "/swap-requests/received").await
    }

    pub async fn sent(&self, token: &str) -> Result<Vec<SwapRequestView>> {
        self.list_requests(token, "/swap-requests/sent").await
    }

    async fn list_requests(&self, token: &str, path: &str) -> Result<Vec<SwapRequestView>> {
        let request = self.http.get(self.url(path)).bearer_auth(token);
        let envelope: Envelope<RequestsPayload> = self.send(request).await?;
        Ok(envelope.into_data()?.requests)
    }

    /// Accepts or rejects a received request.
    pub async fn decide(
        &self,
        token: &str,
        request_id: SwapRequestId,
        status: SwapStatus,
    ) -> Result<SwapRequestView> {
        let request = self
            .http
            .patch(self.url(&format!("/swap-requests/{}", request_id)))
            .bearer_auth(token)
            .json(&UpdateSwapStatusDto::new(status));
        let envelope: Envelope<RequestPayload> = self.send(request).await?;
        Ok(envelope.into_data()?.request)
    }
}

fn normalize_base_url(base_url: &str) -> Result<String> {
    let url = base_url.trim().trim_end_matches('/');
    if url.is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }
    Ok(url.to_string())
}
