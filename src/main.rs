use clap::Parser;
use stickyboard::cli::{handle_inspect, handle_session, load_config, Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // stdout belongs to the session transcript; logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Session { import, seed } => {
            load_config(cli.config).and_then(|config| handle_session(config, import, seed))
        }
        Commands::Inspect {
            file,
            search,
            color,
            json,
        } => load_config(cli.config)
            .and_then(|config| handle_inspect(config, file, search, color, json)),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
