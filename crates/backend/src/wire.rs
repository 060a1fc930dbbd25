use serde::{Deserialize, Serialize};

use super::query::{BackendResult, MalformedReplySnafu};

/// Request body: one structured field carrying the user text as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionRequest<'a> {
    pub question: &'a str,
}

impl<'a> QuestionRequest<'a> {
    pub fn new(question: &'a str) -> Self {
        Self { question }
    }
}

/// Reply body: the answer text, used verbatim as display text.
///
/// The field is optional so that a success-status reply without an `answer`
/// key can be rejected explicitly instead of rendering a hole.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnswerReply {
    #[serde(default)]
    pub answer: Option<String>,
}

/// Extracts the answer text from a raw reply body.
///
/// A body that is not JSON, or that lacks the `answer` field, is a malformed
/// reply. An empty answer string is present and therefore valid.
pub fn parse_answer(body: &str) -> BackendResult<String> {
    let reply: AnswerReply = match serde_json::from_str(body) {
        Ok(reply) => reply,
        Err(source) => {
            return MalformedReplySnafu {
                stage: "decode-reply-json",
                details: source.to_string(),
            }
            .fail();
        }
    };

    let Some(answer) = reply.answer else {
        return MalformedReplySnafu {
            stage: "extract-answer-field",
            details: "reply has no `answer` field".to_string(),
        }
        .fail();
    };

    Ok(answer)
}
