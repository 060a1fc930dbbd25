use askbot::settings::WidgetSettings;
use askbot::terminal;

/// Bootstraps one chat session: logging, settings, backend, event loop.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = WidgetSettings::load();
    if let Err(error) = terminal::run(settings).await {
        tracing::error!(%error, "chat session ended with an error");
        std::process::exit(1);
    }
}
