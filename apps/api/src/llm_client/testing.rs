//! Scripted `GenerationService` double for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{GenerationError, GenerationService};

type Responder = Box<dyn Fn(&str) -> Result<String, GenerationError> + Send + Sync>;

/// Answers each prompt through a closure and counts the calls it received.
pub struct StubService {
    responder: Responder,
    calls: AtomicUsize,
    available: bool,
}

impl StubService {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&str) -> Result<String, GenerationError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: AtomicUsize::new(0),
            available: true,
        }
    }

    /// Returns the same text for every prompt.
    pub fn replying(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_| Ok(text.clone()))
    }

    /// Fails every call with a connection error.
    pub fn unreachable() -> Self {
        let mut stub = Self::new(|_| {
            Err(GenerationError::Connection(
                "Connection error. Please check if the server is running properly.".to_string(),
            ))
        });
        stub.available = false;
        stub
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationService for StubService {
    async fn check_availability(&self) -> bool {
        self.available
    }

    async fn generate(&self, prompt: &str, _max_length: u32) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.responder)(prompt)
    }

    fn model_name(&self) -> &str {
        "stub-model"
    }

    fn provider(&self) -> &'static str {
        "stub"
    }
}
