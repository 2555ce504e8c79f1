mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("scaffold=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = scaffold::config::load_user_config()?.unwrap_or_default();
    let store = commands::open_store(cli.templates, &config);

    match cli.command {
        Commands::New(args) => commands::new::run(store.as_ref(), &config, args),
        Commands::List { kind } => commands::list::run(store.as_ref(), kind),
        Commands::Check => commands::check::run(store.as_ref()),
    }
}
