use anyhow::Context;
use clap::Parser;
use todo_sync_core::{ReconcilePolicy, TodoApp, WidgetConfig};
use todo_widget::{Session, UreqTransport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "todo-widget")]
#[command(about = "A to-do list backed by a remote collection", long_about = None)]
struct Args {
    /// Collection URL; item URLs are formed by appending the id
    #[arg(long, env = "TODO_BASE_URL", default_value = "http://127.0.0.1:3000/api/todos/")]
    base_url: String,

    /// Whose list to show
    #[arg(long, env = "TODO_OWNER")]
    owner: String,

    /// Heading shown above the list
    #[arg(long, default_value = "My to-do list")]
    title: String,

    /// Undo local changes the server did not accept
    #[arg(long)]
    revert_on_failure: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_widget=warn,todo_sync_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = WidgetConfig::new(args.base_url, args.owner, args.title);
    if args.revert_on_failure {
        config.policy = ReconcilePolicy::Revert;
    }
    let base_url = config.base_url.clone();
    let app = TodoApp::mount(config, UreqTransport::new())
        .with_context(|| format!("failed to load list from {base_url}"))?;

    let stdin = std::io::stdin();
    let mut session = Session::new(app, stdin.lock(), std::io::stdout());
    session.run()?;
    Ok(())
}
