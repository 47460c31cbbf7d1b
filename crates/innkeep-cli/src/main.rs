//! innkeep - hotel admin dashboard on the command line.
//!
//! Bookings, rooms and users each live in one JSON document under the
//! data directory. Every command loads the entity into a
//! `ListViewEngine`, runs one query or mutation and persists the result.

mod cli;
mod commands;
mod config;
mod fixtures;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::Entity;
use config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::resolve(cli.data_dir)?;

    match cli.command {
        Commands::Bookings(cmd) => commands::handle(&config, Entity::Bookings, cmd.command).await,
        Commands::Rooms(cmd) => commands::handle_rooms(&config, cmd).await,
        Commands::Users(cmd) => commands::handle(&config, Entity::Users, cmd.command).await,
        Commands::Summary(args) => commands::summary::run(&config, args).await,
        Commands::Init(args) => commands::init::run(&config, args).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
