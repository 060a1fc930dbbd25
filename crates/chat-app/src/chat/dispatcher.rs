use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use askbot_backend::QueryBackend;
use tokio::sync::mpsc;

use super::debounce::Debouncer;
use super::events::{BotReply, ChatEvent};
use super::message::Sender;
use super::renderer::TranscriptRenderer;
use super::submission::{SubmissionId, SubmissionPhase, SubmissionTransition};
use super::viewport::Viewport;

/// Quiet period after the last accepted submission before its request goes out.
pub const SUBMIT_DEBOUNCE_MS: u64 = 300;

/// The one sentence shown for any failed request; the failure detail stays
/// on the diagnostic channel.
pub const FALLBACK_REPLY: &str = "Sorry, something went wrong. Please try again later.";

/// Turns accepted user text into at most one outbound request and routes the
/// eventual outcome back into the transcript.
///
/// All state lives on one logical context: `submit` runs synchronously on
/// it, and timer/request tasks report back through the event channel whose
/// receiver the owner drains on the same context.
pub struct QueryDispatcher<V: Viewport> {
    renderer: TranscriptRenderer<V>,
    backend: Arc<dyn QueryBackend>,
    debounce: Debouncer,
    events_tx: mpsc::UnboundedSender<ChatEvent>,
    next_submission_id: u64,
    /// Submission whose debounce timer is still armed, if any.
    armed: Option<SubmissionId>,
    phases: HashMap<SubmissionId, SubmissionPhase>,
}

impl<V: Viewport> QueryDispatcher<V> {
    pub fn new(
        renderer: TranscriptRenderer<V>,
        backend: Arc<dyn QueryBackend>,
    ) -> (Self, mpsc::UnboundedReceiver<ChatEvent>) {
        Self::with_debounce_window(
            renderer,
            backend,
            Duration::from_millis(SUBMIT_DEBOUNCE_MS),
        )
    }

    pub fn with_debounce_window(
        renderer: TranscriptRenderer<V>,
        backend: Arc<dyn QueryBackend>,
        window: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<ChatEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let dispatcher = Self {
            renderer,
            backend,
            debounce: Debouncer::new(window),
            events_tx,
            next_submission_id: 1,
            armed: None,
            phases: HashMap::new(),
        };
        (dispatcher, events_rx)
    }

    /// Appends the configured greeting as the initial bot entry.
    pub fn greet(&mut self, welcome: &str) {
        self.renderer.append(Sender::Bot, welcome);
    }

    /// Reads the input control and submits its content.
    pub fn submit_from_input(&mut self) -> Option<SubmissionId> {
        let text = self.renderer.viewport().read_input();
        self.submit(&text)
    }

    /// Accepts one submission: echo, clear input, arm the debounce timer.
    ///
    /// Whitespace-only input is a silent no-op. The echo and the input clear
    /// happen synchronously here, before any request exists; the request
    /// itself goes out only when the timer fires un-superseded.
    pub fn submit(&mut self, text: &str) -> Option<SubmissionId> {
        if text.trim().is_empty() {
            return None;
        }

        let submission = SubmissionId::new(self.next_submission_id);
        self.next_submission_id += 1;

        // Echo the text as typed, then clear and re-focus the input.
        self.renderer.append(Sender::User, text);
        self.renderer.viewport_mut().clear_input();

        if let Some(previous) = self.armed.take() {
            // Supersede only when a live timer was really cancelled. If the
            // previous timer already fired, its request is (or is about to
            // be) in flight and its events are still in the channel; it
            // proceeds to resolution as usual.
            if self.debounce.cancel() {
                self.apply(previous, SubmissionTransition::Supersede);
                tracing::debug!(
                    superseded = previous.0,
                    by = submission.0,
                    "submission superseded inside debounce window"
                );
            }
        }

        self.phases.insert(submission, SubmissionPhase::Validated);
        self.armed = Some(submission);

        let backend = Arc::clone(&self.backend);
        let events = self.events_tx.clone();
        let question = text.to_string();
        self.debounce.schedule(async move {
            let _ = events.send(ChatEvent::Dispatched { submission });
            // Detached so a later submission can no longer cancel the
            // in-flight call; it runs to completion or failure.
            tokio::spawn(async move {
                let reply = match backend.ask(&question).await {
                    Ok(answer) => BotReply::Answer(answer),
                    Err(error) => {
                        tracing::error!(%error, submission = submission.0, "request failed");
                        BotReply::Fallback
                    }
                };
                let _ = events.send(ChatEvent::Resolved { submission, reply });
            });
        });

        Some(submission)
    }

    /// Applies one completion event from the timer/request tasks.
    pub fn handle_event(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::Dispatched { submission } => {
                if self.armed == Some(submission) {
                    self.armed = None;
                }
                self.apply(submission, SubmissionTransition::Dispatch);
            }
            ChatEvent::Resolved { submission, reply } => {
                let transition = match reply {
                    BotReply::Answer(_) => SubmissionTransition::Fulfill,
                    BotReply::Fallback => SubmissionTransition::Fail,
                };
                if self.apply(submission, transition) {
                    match reply {
                        BotReply::Answer(answer) => self.renderer.append(Sender::Bot, &answer),
                        BotReply::Fallback => self.renderer.append(Sender::Bot, FALLBACK_REPLY),
                    }
                }
            }
        }
    }

    pub fn renderer(&self) -> &TranscriptRenderer<V> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut TranscriptRenderer<V> {
        &mut self.renderer
    }

    pub fn phase(&self, submission: SubmissionId) -> Option<SubmissionPhase> {
        self.phases.get(&submission).copied()
    }

    fn apply(&mut self, submission: SubmissionId, transition: SubmissionTransition) -> bool {
        let Some(phase) = self.phases.get(&submission).copied() else {
            tracing::warn!(
                submission = submission.0,
                ?transition,
                "event for unknown submission"
            );
            return false;
        };

        match phase.apply(transition) {
            Ok(next) => {
                // Terminal submissions need no further bookkeeping; prune
                // them so the map does not grow for the life of the session.
                if next.is_terminal() {
                    self.phases.remove(&submission);
                } else {
                    self.phases.insert(submission, next);
                }
                tracing::debug!(
                    submission = submission.0,
                    from = ?phase,
                    to = ?next,
                    "submission phase advanced"
                );
                true
            }
            Err(error) => {
                // A timer that lost the cancellation race can emit events for
                // an already-superseded submission; they are dropped here.
                tracing::debug!(submission = submission.0, %error, "stale submission event");
                false
            }
        }
    }
}
