use std::sync::Arc;

mod http;
mod query;
mod wire;

pub use http::HttpBackend;
pub use query::{BackendConfig, BackendError, BackendResult, BoxFuture, QueryBackend};
pub use wire::{AnswerReply, QuestionRequest, parse_answer};

/// Builds the HTTP backend behind the trait object the dispatcher consumes.
pub fn create_backend(config: BackendConfig) -> BackendResult<Arc<dyn QueryBackend>> {
    Ok(Arc::new(HttpBackend::new(config)?))
}
