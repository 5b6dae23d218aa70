use desk_pad::app::HeadlessPrompt;
use desk_pad::app::services::session::session_dir;
use desk_pad::{AppSettings, Choice, Collaborators, MultiDocumentController};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = AppSettings::load();
    let prompt = HeadlessPrompt { answer: Choice::No };
    let collaborators = Collaborators::new(Box::new(prompt));
    let mut controller = MultiDocumentController::new(settings, collaborators);

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        controller.restore_session(&session_dir());
    }
    for location in &args {
        controller.open_file(location, None, true);
    }

    for doc in controller.documents() {
        tracing::info!(
            "{} [{}, {}, {}]",
            doc.display_name,
            doc.style,
            doc.encoding.label(),
            if doc.read_only { "read-only" } else { "writable" }
        );
    }
    tracing::info!("{}", controller.title());

    controller.save_session(&session_dir());
}
