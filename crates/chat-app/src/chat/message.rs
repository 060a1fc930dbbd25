/// Chat speaker tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Display label shown next to a transcript entry.
    pub const fn label(self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Bot => "Bot",
        }
    }
}

/// One displayed transcript entry. Immutable once created; ordering is
/// append order and entries live only for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
        }
    }

    /// Creates a user echo entry.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    /// Creates a bot reply entry.
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }
}

/// Append-only, monotonically growing list of displayed messages.
///
/// There is deliberately no edit or remove operation; the only mutation is
/// appending at the tail.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
