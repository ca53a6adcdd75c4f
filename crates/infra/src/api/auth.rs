//! API authentication
//!
//! The CRM backend expects a bearer token on every request. The token is
//! issued by the host application's login flow; this module only defines
//! how clients obtain the current token.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::errors::ApiError;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a valid access token
    ///
    /// This method should handle token refresh if needed.
    async fn access_token(&self) -> Result<String, ApiError>;
}

/// Token provider backed by a replaceable in-memory token.
///
/// The login flow stores the session token here; requests fail with an
/// auth error until one is set.
pub struct StaticTokenProvider {
    token: RwLock<Option<String>>,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: RwLock::new(Some(token.into())) }
    }

    /// Provider with no token yet; `set_token` must be called before use
    pub fn empty() -> Self {
        Self { token: RwLock::new(None) }
    }

    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    /// Drop the stored token, e.g. on logout
    pub async fn clear(&self) {
        *self.token.write().await = None;
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, ApiError> {
        self.token
            .read()
            .await
            .clone()
            .ok_or_else(|| ApiError::Auth("no session token available".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_provider_reports_auth_error() {
        let provider = StaticTokenProvider::empty();
        let err = provider.access_token().await.unwrap_err();
        assert!(matches!(err, ApiError::Auth(_)));
    }

    #[tokio::test]
    async fn token_can_be_replaced_and_cleared() {
        let provider = StaticTokenProvider::new("first");
        assert_eq!(provider.access_token().await.unwrap(), "first");

        provider.set_token("second").await;
        assert_eq!(provider.access_token().await.unwrap(), "second");

        provider.clear().await;
        assert!(provider.access_token().await.is_err());
    }
}
