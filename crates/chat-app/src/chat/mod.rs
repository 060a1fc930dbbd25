mod debounce;
mod dispatcher;
mod events;
mod message;
mod renderer;
mod submission;
mod viewport;

pub use debounce::Debouncer;
pub use dispatcher::{FALLBACK_REPLY, QueryDispatcher, SUBMIT_DEBOUNCE_MS};
pub use events::{BotReply, ChatEvent};
pub use message::{Message, Sender, Transcript};
pub use renderer::TranscriptRenderer;
pub use submission::{SubmissionId, SubmissionPhase, SubmissionTransition, TransitionError};
pub use viewport::Viewport;
