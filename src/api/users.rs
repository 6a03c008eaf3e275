//! Users resource: create, list and delete over `/users`.

use async_trait::async_trait;

use crate::api::{ApiClient, Envelope};
use crate::error::ApiResult;
use crate::model::{CreateUserBody, UserDraft, UserRecord};

pub const USERS_PATH: &str = "/users";

/// Persistence capability for users. Swap the implementation to test the
/// service and controller without a server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a user from `draft`; returns the server's record as-is.
    async fn create_user(&self, draft: &UserDraft) -> ApiResult<UserRecord>;

    /// All users in server order.
    async fn get_users(&self) -> ApiResult<Vec<UserRecord>>;

    /// Delete a user by id.
    async fn delete_user(&self, id: i64) -> ApiResult<()>;
}

#[derive(Clone, Debug)]
pub struct HttpUserRepository {
    client: ApiClient,
}

impl HttpUserRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserRepository for HttpUserRepository {
    async fn create_user(&self, draft: &UserDraft) -> ApiResult<UserRecord> {
        let envelope: Envelope<UserRecord> = self
            .client
            .post(USERS_PATH, &CreateUserBody::from(draft))
            .await?;
        Ok(envelope.data)
    }

    async fn get_users(&self) -> ApiResult<Vec<UserRecord>> {
        // A `null` or empty body means no users.
        let envelope: Envelope<Option<Vec<UserRecord>>> = self.client.get(USERS_PATH).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    async fn delete_user(&self, id: i64) -> ApiResult<()> {
        let _: Envelope<serde_json::Value> = self.client.delete(&format!("{USERS_PATH}/{id}")).await?;
        Ok(())
    }
}
