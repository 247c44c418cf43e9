// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use clap::Parser;
use cli::{Cli, Commands};
use kbqs_core::config::ConsoleConfig;

mod cli;
mod commands;
mod logging;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();

    // Nothing is logged until the logger is up.
    if let Err(e) = logging::init(args.verbose) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = run(&args).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run(args: &Cli) -> Result<()> {
    match &args.command {
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
        Commands::Users(command) => {
            let config = ConsoleConfig::new(args.base_url.clone(), args.token.clone())?;
            log::debug!("Using admin API at {}", config.api_base_url);
            commands::users::run(command, &config).await?;
        }
    }

    Ok(())
}
