use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// Supplies OAuth access tokens to remote row-store adapters.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn access_token(&self) -> DomainResult<String>;
}
