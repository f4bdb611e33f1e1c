//! Signed-in state on top of [`ApiClient`].
//!
//! A session becomes active through [`Session::restore`] with a stored token,
//! verified against `/users/me`, or through [`Session::login`] and
//! [`Session::signup`], whose results are adopted without a reload.
//!
//! It ends on [`Session::logout`] or on the first 401 from any call.

use skillswap_models::{
    CreateSwapRequestDto, PublicProfile, SignupDto, SwapRequestId, SwapRequestView, SwapStatus,
    UpdateProfileDto, User, UserFilterParams, UserId,
};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::error::{ClientError, Result};
use crate::types::{AuthResult, exclude_user};

#[derive(Debug, Clone)]
struct SessionState {
    token: String,
    user: User,
}

#[derive(Debug)]
pub struct Session {
    api: ApiClient,
    state: RwLock<Option<SessionState>>,
}

impl Session {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: RwLock::new(None),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_some()
    }

    pub async fn current_user(&self) -> Option<User> {
        self.state.read().await.as_ref().map(|s| s.user.clone())
    }

    pub async fn current_user_id(&self) -> Option<UserId> {
        self.state.read().await.as_ref().map(|s| s.user.id)
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.as_ref().map(|s| s.token.clone())
    }

    async fn require_token(&self) -> Result<String> {
        self.token().await.ok_or(ClientError::NotLoggedIn)
    }

    async fn store(&self, token: String, user: User) {
        *self.state.write().await = Some(SessionState { token, user });
    }

    async fn clear(&self) {
        *self.state.write().await = None;
    }

    /// Clears the session when `result` is a 401.
    async fn guard<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result
            && e.is_unauthenticated()
            && self.is_authenticated().await
        {
            warn!(error = %e, "Session rejected by server, signing out");
            self.clear().await;
        }
        result
    }

    /// Verifies a stored token and adopts it.
    pub async fn restore(&self, token: &str) -> Result<User> {
        let user = self.api.me(token).await;
        if let Err(e) = &user
            && e.is_unauthenticated()
        {
            self.clear().await;
        }
        let user = user?;
        self.store(token.to_string(), user.clone()).await;
        info!(user_id = %user.id, "Session restored");
        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let result = self.api.login(email, password).await;
        let AuthResult { token, user } = self.guard(result).await?;
        self.store(token, user.clone()).await;
        Ok(user)
    }

    pub async fn signup(&self, dto: &SignupDto) -> Result<User> {
        let AuthResult { token, user } = self.api.signup(dto).await?;
        self.store(token, user.clone()).await;
        Ok(user)
    }

    pub async fn logout(&self) {
        self.clear().await;
        info!("Logged out");
    }

    /// Re-reads the profile and refreshes the cached copy.
    pub async fn me(&self) -> Result<User> {
        let token = self.require_token().await?;
        let result = self.api.me(&token).await;
        let user = self.guard(result).await?;
        self.refresh_user(&user).await;
        Ok(user)
    }

    pub async fn update_me(&self, changes: &UpdateProfileDto) -> Result<User> {
        let token = self.require_token().await?;
        let result = self.api.update_me(&token, changes).await;
        let user = self.guard(result).await?;
        self.refresh_user(&user).await;
        Ok(user)
    }

    async fn refresh_user(&self, user: &User) {
        if let Some(state) = self.state.write().await.as_mut() {
            state.user = user.clone();
        }
    }

    /// The directory minus the signed-in user.
    pub async fn browse(&self, filters: &UserFilterParams) -> Result<Vec<PublicProfile>> {
        let users = self.api.list_users(filters).await?;
        Ok(exclude_user(users, self.current_user_id().await))
    }

    pub async fn send_request(
        &self,
        to_user_id: UserId,
        message: Option<String>,
    ) -> Result<SwapRequestView> {
        let token = self.require_token().await?;
        let dto = CreateSwapRequestDto {
            to_user_id: to_user_id.to_string(),
            message,
        };
        let result = self.api.create_request(&token, &dto).await;
        self.guard(result).await
    }

    pub async fn received(&self) -> Result<Vec<SwapRequestView>> {
        let token = self.require_token().await?;
        let result = self.api.received(&token).await;
        self.guard(result).await
    }

    pub async fn sent(&self) -> Result<Vec<SwapRequestView>> {
        let token = self.require_token().await?;
        let result = self.api.sent(&token).await;
        self.guard(result).await
    }

    pub async fn accept(&self, request_id: SwapRequestId) -> Result<SwapRequestView> {
        self.decide(request_id, SwapStatus::Accepted).await
    }

    pub async fn reject(&self, request_id: SwapRequestId) -> Result<SwapRequestView> {
        self.decide(request_id, SwapStatus::Rejected).await
    }

    async fn decide(
        &self,
        request_id: SwapRequestId,
        status: SwapStatus,
    ) -> Result<SwapRequestView> {
        let token = self.require_token().await?;
        let result = self.api.decide(&token, request_id, status).await;
        self.guard(result).await
    }
}
