//! Mock Analysis Provider for testing.
//!
//! Provides a configurable mock implementation of the AnalysisProvider port,
//! allowing tests to run without calling the real API.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAnalysisProvider::new()
//!     .with_response("Calm(2)\n\nA steady week.\n\nScore 81")
//!     .with_error(AnalysisError::RateLimited);
//!
//! let response = provider.request_analysis(request).await?;
//! assert_eq!(provider.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{AnalysisError, AnalysisProvider, AnalysisRequest, AnalysisResponse, ProviderInfo};

/// Default reply when no response has been queued.
const DEFAULT_RESPONSE: &str = "Calm(1)\n\nMock summary.\n\nMock score 75";

/// Mock analysis provider for testing.
///
/// Queued outcomes are consumed in order; calls are recorded for verification.
#[derive(Debug, Clone)]
pub struct MockAnalysisProvider {
    outcomes: Arc<Mutex<VecDeque<Result<AnalysisResponse, AnalysisError>>>>,
    info: ProviderInfo,
    calls: Arc<Mutex<Vec<AnalysisRequest>>>,
}

impl Default for MockAnalysisProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAnalysisProvider {
    /// Creates a new mock provider with default settings.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1"),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.push(Ok(AnalysisResponse::new(text)));
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: AnalysisError) -> Self {
        self.push(Err(error));
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<AnalysisRequest> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn push(&self, outcome: Result<AnalysisResponse, AnalysisError>) {
        if let Ok(mut outcomes) = self.outcomes.lock() {
            outcomes.push_back(outcome);
        }
    }

    fn next_outcome(&self) -> Result<AnalysisResponse, AnalysisError> {
        self.outcomes
            .lock()
            .ok()
            .and_then(|mut outcomes| outcomes.pop_front())
            .unwrap_or_else(|| Ok(AnalysisResponse::new(DEFAULT_RESPONSE)))
    }
}

#[async_trait]
impl AnalysisProvider for MockAnalysisProvider {
    async fn request_analysis(
        &self,
        request: AnalysisRequest,
    ) -> Result<AnalysisResponse, AnalysisError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request);
        }
        self.next_outcome()
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
