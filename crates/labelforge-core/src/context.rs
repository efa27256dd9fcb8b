//! Generation Context: per-request state threaded through the pipeline
use std::collections::HashMap;
use std::time::Duration;

/// Upper bound on a single capability call. After this the fallback
/// synthesizer takes over.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct GenerationContext {
    pub trace_id: String,
    pub model_id: String,
    pub timeout: Duration,
    pub metadata: HashMap<String, serde_json::Value>,
}

impl GenerationContext {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            trace_id: uuid::Uuid::new_v4().to_string(),
            model_id: model_id.into(),
            timeout: DEFAULT_GENERATION_TIMEOUT,
            metadata: HashMap::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
