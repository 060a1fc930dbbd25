use std::io::{self, Write};

use askbot_backend::{BackendConfig, BackendError, create_backend};
use snafu::{ResultExt, Snafu};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::chat::{QueryDispatcher, Sender, TranscriptRenderer, Viewport};
use crate::settings::WidgetSettings;

const PROMPT: &str = "> ";

/// Line-oriented viewport over stdout.
///
/// The terminal naturally tails its output, so appending an entry already
/// leaves the newest one visible; `scroll_to_newest` reduces to a flush.
/// Clearing the input re-prints the prompt to hand focus back.
pub struct TerminalViewport {
    input: String,
}

impl TerminalViewport {
    pub fn new() -> Self {
        Self {
            input: String::new(),
        }
    }

    /// Stores the line most recently read from stdin as the input content.
    pub fn set_input(&mut self, line: String) {
        self.input = line;
    }
}

impl Default for TerminalViewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport for TerminalViewport {
    fn append(&mut self, sender: Sender, text: &str) {
        println!("{}: {}", sender.label(), text);
    }

    fn read_input(&self) -> String {
        self.input.clone()
    }

    fn clear_input(&mut self) {
        self.input.clear();
        print!("{PROMPT}");
        let _ = io::stdout().flush();
    }

    fn scroll_to_newest(&mut self) {
        let _ = io::stdout().flush();
    }
}

#[derive(Debug, Snafu)]
pub enum RunError {
    #[snafu(display("failed to set up the backend on `{stage}`: {source}"))]
    BackendSetup {
        stage: &'static str,
        source: BackendError,
    },
    #[snafu(display("failed to read user input on `{stage}`: {source}"))]
    ReadInput {
        stage: &'static str,
        source: std::io::Error,
    },
}

/// Runs one chat session until stdin closes.
///
/// Stdin lines become submissions; completion events from the dispatcher's
/// timer and request tasks are drained on the same loop, so all chat state
/// mutates on this one context.
pub async fn run(settings: WidgetSettings) -> Result<(), RunError> {
    let backend =
        create_backend(BackendConfig::new(&settings.backend_url)).context(BackendSetupSnafu {
            stage: "create-backend",
        })?;
    tracing::info!(endpoint = %settings.backend_url, "chat session starting");

    println!("{}", settings.title);
    println!("{}", settings.header);
    println!();

    let renderer = TranscriptRenderer::new(TerminalViewport::new());
    let (mut dispatcher, mut events) = QueryDispatcher::new(renderer, backend);
    dispatcher.greet(&settings.welcome_message);
    dispatcher.renderer_mut().viewport_mut().clear_input();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = line.context(ReadInputSnafu {
                    stage: "read-stdin-line",
                })?;
                match line {
                    Some(line) => {
                        dispatcher.renderer_mut().viewport_mut().set_input(line);
                        dispatcher.submit_from_input();
                    }
                    // EOF ends the session.
                    None => break,
                }
            }
            event = events.recv() => {
                match event {
                    Some(event) => dispatcher.handle_event(event),
                    None => break,
                }
            }
        }
    }

    tracing::info!("chat session ended");
    Ok(())
}
