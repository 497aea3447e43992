pub mod commands;
pub mod display;
pub mod output;

use std::future::Future;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use authdev::config::{self, types::AuthdevConfig};

#[derive(Parser)]
#[command(
    name = "authdev",
    about = "List the webauthn devices registered to your account.",
    version
)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Portal base URL (overrides config and AUTHDEV_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Session cookie value (overrides config and AUTHDEV_SESSION)
    #[arg(long, global = true)]
    pub session: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List registered webauthn devices
    Devices(commands::devices::DevicesArgs),
    /// Show counts over registered devices
    Summary,
    /// Show current configuration
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Ids,
}

/// Global options every command needs after parsing.
pub struct Context {
    pub format: OutputFormat,
    pub config: AuthdevConfig,
}

impl Context {
    /// Load the config file and layer env and flag overrides on top.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut cfg = match cli.config {
            Some(ref path) => config::load_config_from(path)?,
            None => config::load_config()?,
        };
        if let Some(ref url) = cli.url {
            cfg.server.url = Some(url.clone());
        }
        if let Some(ref session) = cli.session {
            cfg.session.cookie = Some(session.clone());
        }
        Ok(Self {
            format: cli.format,
            config: cfg,
        })
    }

    /// Whether human output should be colored.
    pub fn color(&self) -> bool {
        match self.config.display.color.as_str() {
            "always" => true,
            "never" => false,
            _ => std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Run a request future to completion, with a spinner on interactive stderr.
    pub fn block_on<F: Future>(&self, message: &'static str, fut: F) -> anyhow::Result<F::Output> {
        let rt = tokio::runtime::Runtime::new()?;
        let spinner = (self.config.display.spinner
            && self.format == OutputFormat::Human
            && std::io::stderr().is_terminal())
        .then(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(ProgressStyle::default_spinner());
            pb.set_message(message);
            pb.enable_steady_tick(Duration::from_millis(80));
            pb
        });
        let out = rt.block_on(fut);
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
        Ok(out)
    }
}

/// Dispatch a CLI command.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(ref command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let ctx = Context::load(&cli)?;
    match command {
        Commands::Devices(args) => commands::devices::run(args, &ctx),
        Commands::Summary => commands::summary::run(&ctx),
        Commands::Config => commands::config::run(&ctx),
    }
}
