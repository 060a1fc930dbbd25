use super::submission::SubmissionId;

/// Resolved content for one submission's bot message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotReply {
    /// Well-formed reply; the answer text is displayed verbatim.
    Answer(String),
    /// Transport, status or parse failure; the fixed fallback sentence is
    /// displayed and the detail stays on the diagnostic channel.
    Fallback,
}

/// Completion events delivered back to the dispatcher's execution context.
///
/// Timer and request tasks never mutate chat state directly; they report
/// through this channel so all state changes interleave on one context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// The debounce timer fired and the request for this submission went out.
    Dispatched { submission: SubmissionId },
    /// The request for this submission ran to completion or failure.
    Resolved {
        submission: SubmissionId,
        reply: BotReply,
    },
}
