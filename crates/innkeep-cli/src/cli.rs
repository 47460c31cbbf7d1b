//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{EntityCommand, RoomsCommand, init::InitArgs, summary::SummaryArgs};

/// Hotel admin dashboard: bookings, rooms and users.
#[derive(Parser, Debug)]
#[command(name = "innkeep")]
#[command(author, version = env!("INNKEEP_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Directory holding bookings.json, rooms.json and users.json
    /// [env: INNKEEP_DATA_DIR]
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Guest bookings
    Bookings(EntityCommand),

    /// Rooms and their approval status
    Rooms(RoomsCommand),

    /// Registered users
    Users(EntityCommand),

    /// Totals per entity and per status
    Summary(SummaryArgs),

    /// Seed the data directory with sample data
    Init(InitArgs),
}
