use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

/// Env var holding a tracing filter directive, e.g. `AUTHDEV_LOG=debug`.
const LOG_ENV: &str = "AUTHDEV_LOG";

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    init_logging(args.verbose);

    cli::run(args)
}
