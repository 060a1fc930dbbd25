use std::future::Future;
use std::pin::Pin;

use snafu::Snafu;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub endpoint: String,
}

impl BackendConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim().to_string(),
        }
    }
}

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
pub type BackendResult<T> = Result<T, BackendError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum BackendError {
    #[snafu(display("backend endpoint is empty"))]
    EmptyEndpoint { stage: &'static str },
    #[snafu(display("request to `{endpoint}` failed on `{stage}`: {source}"))]
    Transport {
        stage: &'static str,
        endpoint: String,
        source: reqwest::Error,
    },
    #[snafu(display("backend returned status {status}: {body}"))]
    ReplyStatus {
        stage: &'static str,
        status: u16,
        body: String,
    },
    #[snafu(display("failed to parse backend reply: {details}"))]
    MalformedReply {
        stage: &'static str,
        details: String,
    },
}

/// Outbound question/answer seam.
///
/// One call per accepted, non-superseded submission: the question text goes
/// out, and the resolved answer text comes back. Implementations never
/// surface their failure detail to the user; callers decide what to render.
pub trait QueryBackend: Send + Sync {
    /// Target endpoint, for diagnostics.
    fn endpoint(&self) -> &str;
    /// Sends one question and resolves to its answer text.
    fn ask<'a>(&'a self, question: &'a str) -> BoxFuture<'a, BackendResult<String>>;
}
