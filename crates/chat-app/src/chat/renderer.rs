use super::message::{Message, Sender, Transcript};
use super::viewport::Viewport;

/// Owns the transcript and mirrors every appended entry into the viewport.
///
/// The side effect is purely additive: an entry is pushed at the tail and
/// the view is synchronously scrolled so the newest entry is visible.
pub struct TranscriptRenderer<V: Viewport> {
    transcript: Transcript,
    viewport: V,
}

impl<V: Viewport> TranscriptRenderer<V> {
    pub fn new(viewport: V) -> Self {
        Self {
            transcript: Transcript::new(),
            viewport,
        }
    }

    pub fn append(&mut self, sender: Sender, text: &str) {
        self.transcript.append(Message::new(sender, text));
        self.viewport.append(sender, text);
        self.viewport.scroll_to_newest();
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::viewport::recording::RecordingViewport;

    #[test]
    fn append_updates_transcript_and_scrolls_viewport() {
        let mut renderer = TranscriptRenderer::new(RecordingViewport::default());
        renderer.append(Sender::User, "hello");
        renderer.append(Sender::Bot, "hi there");

        assert_eq!(renderer.transcript().len(), 2);
        assert_eq!(
            renderer.viewport().entries,
            vec![
                (Sender::User, "hello".to_string()),
                (Sender::Bot, "hi there".to_string()),
            ]
        );
        // Every append scrolls the newest entry into view.
        assert_eq!(renderer.viewport().scroll_count, 2);
    }
}
