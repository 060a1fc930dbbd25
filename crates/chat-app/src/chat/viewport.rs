use super::message::Sender;

/// Injected presentation boundary.
///
/// The dispatcher and renderer never touch a concrete view; they only go
/// through this seam, so any frontend (or a recording fake in tests) can
/// stand behind it. `clear_input` also re-focuses the input control;
/// clearing and focusing happen in one step.
pub trait Viewport {
    /// Shows one sender-tagged entry at the end of the visible thread.
    fn append(&mut self, sender: Sender, text: &str);
    /// Current content of the input control.
    fn read_input(&self) -> String;
    /// Empties the input control and gives it focus back.
    fn clear_input(&mut self);
    /// Scrolls the visible thread so the newest entry is in view.
    fn scroll_to_newest(&mut self);
}
