use snafu::{ResultExt, ensure};

use super::query::{
    BackendConfig, BackendResult, BoxFuture, EmptyEndpointSnafu, QueryBackend, ReplyStatusSnafu,
    TransportSnafu,
};
use super::wire::{QuestionRequest, parse_answer};

/// Reqwest-backed implementation of the question/answer seam.
///
/// Sends `POST {"question": ...}` and expects `{"answer": ...}` back. No
/// component-level timeout is enforced; a dispatched request runs to
/// completion or failure as reported by the transport.
#[derive(Debug)]
pub struct HttpBackend {
    config: BackendConfig,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> BackendResult<Self> {
        ensure!(
            !config.endpoint.is_empty(),
            EmptyEndpointSnafu {
                stage: "http-backend-new",
            }
        );

        Ok(Self {
            config,
            client: reqwest::Client::new(),
        })
    }

    async fn send_question(&self, question: &str) -> BackendResult<String> {
        tracing::debug!(endpoint = %self.config.endpoint, "dispatching question");

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&QuestionRequest::new(question))
            .send()
            .await
            .context(TransportSnafu {
                stage: "send-question",
                endpoint: self.config.endpoint.clone(),
            })?;

        let status = response.status();
        let body = response.text().await.context(TransportSnafu {
            stage: "read-reply-body",
            endpoint: self.config.endpoint.clone(),
        })?;

        if !status.is_success() {
            return ReplyStatusSnafu {
                stage: "reply-http-status",
                status: status.as_u16(),
                body,
            }
            .fail();
        }

        parse_answer(&body)
    }
}

impl QueryBackend for HttpBackend {
    fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    fn ask<'a>(&'a self, question: &'a str) -> BoxFuture<'a, BackendResult<String>> {
        Box::pin(self.send_question(question))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::BackendError;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn backend_for(server: &MockServer) -> HttpBackend {
        let config = BackendConfig::new(format!("{}/ask", server.uri()));
        HttpBackend::new(config).unwrap()
    }

    #[test]
    fn empty_endpoint_is_rejected() {
        let error = HttpBackend::new(BackendConfig::new("   ")).unwrap_err();
        assert!(matches!(error, BackendError::EmptyEndpoint { .. }));
    }

    #[tokio::test]
    async fn posts_question_and_returns_answer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ask"))
            .and(body_json(serde_json::json!({ "question": "what is the answer?" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "answer": "42" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let backend = backend_for(&server).await;
        let answer = backend.ask("what is the answer?").await.unwrap();
        assert_eq!(answer, "42");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let backend = backend_for(&server).await;
        let error = backend.ask("ping").await.unwrap_err();
        assert!(matches!(
            error,
            BackendError::ReplyStatus { status: 500, .. }
        ));
    }

    #[tokio::test]
    async fn success_status_without_answer_field_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "result": "42" })),
            )
            .mount(&server)
            .await;

        let backend = backend_for(&server).await;
        let error = backend.ask("ping").await.unwrap_err();
        assert!(matches!(error, BackendError::MalformedReply { .. }));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        // Nothing listens on this port; the connection attempt itself fails.
        let backend = HttpBackend::new(BackendConfig::new("http://127.0.0.1:1/ask")).unwrap();
        let error = backend.ask("ping").await.unwrap_err();
        assert!(matches!(error, BackendError::Transport { .. }));
    }
}
