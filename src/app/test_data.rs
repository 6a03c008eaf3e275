//! State for the demo data screen.

use std::sync::Arc;

use crate::api::test_data::TestDataSource;
use crate::error::{ApiResult, error_message};
use crate::model::TestDataItem;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestDataState {
    pub data: Vec<TestDataItem>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct TestDataController<S: TestDataSource> {
    source: Arc<S>,
    state: TestDataState,
    activated: bool,
}

impl<S: TestDataSource> TestDataController<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            state: TestDataState::default(),
            activated: false,
        }
    }

    pub fn state(&self) -> &TestDataState {
        &self.state
    }

    /// Shared handle for running a fetch off the UI thread.
    pub fn source(&self) -> Arc<S> {
        Arc::clone(&self.source)
    }

    /// Returns `true` exactly once.
    pub fn activate(&mut self) -> bool {
        !std::mem::replace(&mut self.activated, true)
    }

    pub async fn initialize(&mut self) {
        if self.activate() {
            self.fetch_data().await;
        }
    }

    pub async fn fetch_data(&mut self) {
        self.begin_fetch();
        let result = self.source.fetch_test_data().await;
        self.finish_fetch(result);
    }

    pub async fn retry(&mut self) {
        self.fetch_data().await;
    }

    pub fn begin_fetch(&mut self) {
        self.state.loading = true;
        self.state.error = None;
    }

    pub fn finish_fetch(&mut self, result: ApiResult<Vec<TestDataItem>>) {
        match result {
            Ok(data) => self.state.data = data,
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch demo data");
                self.state.error = Some(error_message(&err));
            }
        }
        self.state.loading = false;
    }
}
