use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod progress;

/// Conventional exit status for a run interrupted by SIGINT.
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
    // Dropping the run future cancels in-flight requests; reports are only
    // persisted at the very end, so nothing partial is left on disk.
    let code = tokio::select! {
        result = run() => match result {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("reproai error: {error:#}");
                1
            }
        },
        _ = tokio::signal::ctrl_c() => {
            eprintln!("reproai: interrupted, no report written");
            EXIT_INTERRUPTED
        }
    };
    std::process::exit(code);
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let dotenv = bootstrap::load_env()?;
    init_tracing(cli.quiet, cli.verbose)?;
    if let Some(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded dotenv file");
    }

    let flags = cli.global_flags();
    match &cli.command {
        cli::Commands::Run(args) => commands::run::handle(args, &flags).await,
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("REPROAI_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
