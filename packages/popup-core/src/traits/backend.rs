use async_trait::async_trait;
use extract_client::{ClientError, ExtractClient, ExtractRequest, ExtractResponse};

/// Accepts extraction jobs.
#[async_trait]
pub trait ExtractBackend: Send + Sync {
    async fn extract(&self, request: &ExtractRequest) -> Result<ExtractResponse, ClientError>;
}

#[async_trait]
impl ExtractBackend for ExtractClient {
    async fn extract(&self, request: &ExtractRequest) -> Result<ExtractResponse, ClientError> {
        ExtractClient::extract(self, request).await
    }
}
