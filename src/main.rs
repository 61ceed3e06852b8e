use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod matching;
mod parsing;
mod store;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("besthits=debug,info")
    } else {
        EnvFilter::new("besthits=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Select(args) => {
            cli::select::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Explain(args) => {
            cli::explain::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
