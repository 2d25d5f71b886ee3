use drover_core::{Client, Config, Error, ExecBackend, OutputStreams};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|arg| arg == "--debug") {
        if let Err(err) = init_debug_logging() {
            eprintln!("warning: debug logging unavailable: {err}");
        }
    }

    let streams = OutputStreams::stdio();
    let result = load_client().and_then(|mut client| drover::cli::run(&args, &mut client, &streams));

    if let Err(err) = result {
        // Exit errors already wrote their message through the streams.
        if !matches!(err, Error::Exit { .. }) {
            let _ = streams.err.write_line(&format!("error: {err}"));
        }
        std::process::exit(err.exit_code());
    }
}

fn load_client() -> Result<Client, Error> {
    Ok(Client::new(Config::load()?, ExecBackend::system()))
}

fn init_debug_logging() -> anyhow::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("/tmp/drover-debug.log")?;
    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();
    tracing::info!("drover debug log started — tail -f /tmp/drover-debug.log");
    Ok(())
}
