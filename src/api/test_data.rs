//! Demo data endpoint (`GET /normal_function`).

use async_trait::async_trait;

use crate::api::{ApiClient, Envelope};
use crate::error::{ApiError, ApiResult};
use crate::model::TestDataItem;

pub const TEST_DATA_PATH: &str = "/normal_function";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TestDataSource: Send + Sync {
    async fn fetch_test_data(&self) -> ApiResult<Vec<TestDataItem>>;
}

#[derive(Clone, Debug)]
pub struct HttpTestDataSource {
    client: ApiClient,
}

impl HttpTestDataSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TestDataSource for HttpTestDataSource {
    async fn fetch_test_data(&self) -> ApiResult<Vec<TestDataItem>> {
        let result: Result<Envelope<Vec<TestDataItem>>, _> = self.client.get(TEST_DATA_PATH).await;
        match result {
            Ok(envelope) => Ok(envelope.data),
            // Non-2xx answers are reported by status only.
            Err(err) if err.status >= 300 => {
                Err(ApiError::Other(anyhow::anyhow!("HTTP error! status: {}", err.status)))
            }
            Err(err) => Err(err.into()),
        }
    }
}
