use std::sync::Arc;

use crate::api::users::UserRepository;
use crate::error::ApiResult;
use crate::model::{UserDraft, UserRecord};

/// Facade over an injected [`UserRepository`].
///
/// Every call is delegated unchanged and fails with whatever the repository
/// fails with.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub async fn create_user(&self, draft: &UserDraft) -> ApiResult<UserRecord> {
        self.repository.create_user(draft).await
    }

    pub async fn get_users(&self) -> ApiResult<Vec<UserRecord>> {
        self.repository.get_users().await
    }

    pub async fn delete_user(&self, id: i64) -> ApiResult<()> {
        self.repository.delete_user(id).await
    }
}

// Manual impl: a derive would demand `R: Clone`, and mocks are not.
impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
