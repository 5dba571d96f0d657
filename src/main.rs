use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = chatview::Cli::parse();

    if cli.debug {
        let path = std::env::temp_dir().join("chatview-debug.log");
        let file = std::fs::OpenOptions::new().create(true).append(true).open(&path)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!(path = %path.display(), "chatview debug log started");
    }

    chatview::run(cli)
}
