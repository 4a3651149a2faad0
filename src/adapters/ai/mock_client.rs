//! Mock completion client for testing.
//!
//! Provides a configurable implementation of the CompletionClient port,
//! allowing tests (and offline runs) to work without calling a real model.
//!
//! # Features
//!
//! - Pre-configured replies, consumed in order
//! - Simulated latency for concurrency tests
//! - Failure injection
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let client = MockCompletionClient::new()
//!     .with_reply(r#"{"feedback": "Well done"}"#)
//!     .with_delay(Duration::from_millis(100));
//!
//! let text = client.send(request).await?;
//! assert_eq!(client.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

use crate::ports::{
    CompletionClient, CompletionFailure, CompletionRequest, CompletionResult, ProviderInfo,
};

/// Reply used once the queue is exhausted.
pub const DEFAULT_REPLY: &str = "Mock response";

/// Mock completion client.
///
/// Clones share the reply queue and call history.
#[derive(Debug, Clone)]
pub struct MockCompletionClient {
    replies: Arc<Mutex<VecDeque<CompletionResult>>>,
    info: ProviderInfo,
    delay: Duration,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCompletionClient {
    /// Creates a new mock client with default settings.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1"),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful reply to the queue.
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        lock(&self.replies).push_back(Ok(text.into()));
        self
    }

    /// Adds a failure to the queue.
    pub fn with_failure(self, failure: CompletionFailure) -> Self {
        lock(&self.replies).push_back(Err(failure));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the provider info.
    pub fn with_provider_info(mut self, info: ProviderInfo) -> Self {
        self.info = info;
        self
    }

    /// Queues another reply on an existing (possibly shared) client.
    pub fn push_reply(&self, text: impl Into<String>) {
        lock(&self.replies).push_back(Ok(text.into()));
    }

    /// Queues another failure on an existing (possibly shared) client.
    pub fn push_failure(&self, failure: CompletionFailure) {
        lock(&self.replies).push_back(Err(failure));
    }

    /// Returns the number of calls made to this client.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        lock(&self.calls).clone()
    }

    /// Returns the most recent call.
    pub fn last_call(&self) -> Option<CompletionRequest> {
        lock(&self.calls).last().cloned()
    }

    /// Clears the call history.
    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    fn next_reply(&self) -> CompletionResult {
        lock(&self.replies)
            .pop_front()
            .unwrap_or_else(|| Ok(DEFAULT_REPLY.to_string()))
    }
}

// A panic while holding one of these locks leaves plain data behind, so the
// poison flag is ignored.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn send(&self, request: CompletionRequest) -> CompletionResult {
        debug!(request_id = %request.id, kind = %request.kind, "Mock completion request");
        lock(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.next_reply()
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
