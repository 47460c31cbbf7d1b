//! Subcommand implementations.

mod context;
mod create;
mod delete;
mod input;
pub mod init;
mod list;
mod set_status;
pub mod summary;
mod update;

use std::fmt;

use anyhow::Result;
use clap::{Args, Subcommand};

use innkeep_core::Schema;

use crate::config::Config;

pub use context::EntityContext;

/// The three dashboard screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Bookings,
    Rooms,
    Users,
}

impl Entity {
    pub const ALL: [Entity; 3] = [Entity::Bookings, Entity::Rooms, Entity::Users];

    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Bookings => "bookings",
            Entity::Rooms => "rooms",
            Entity::Users => "users",
        }
    }

    pub fn schema(&self) -> Schema {
        match self {
            Entity::Bookings => Schema::booking(),
            Entity::Rooms => Schema::room(),
            Entity::Users => Schema::user(),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Args, Debug)]
pub struct EntityCommand {
    #[command(subcommand)]
    pub command: EntitySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum EntitySubcommand {
    /// List records with search, filter, sort and pagination
    List(list::ListArgs),

    /// Create a record
    Create(create::CreateArgs),

    /// Update fields of a record
    Update(update::UpdateArgs),

    /// Delete a record
    Delete(delete::DeleteArgs),

    /// Set the status of a record
    SetStatus(set_status::SetStatusArgs),
}

#[derive(Args, Debug)]
pub struct RoomsCommand {
    #[command(subcommand)]
    pub command: RoomSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RoomSubcommand {
    #[command(flatten)]
    Common(EntitySubcommand),

    /// Mark a room as Approved
    Approve(set_status::IdArgs),

    /// Mark a room as Rejected
    Reject(set_status::IdArgs),
}

pub async fn handle(config: &Config, entity: Entity, cmd: EntitySubcommand) -> Result<()> {
    match cmd {
        EntitySubcommand::List(args) => list::run(config, entity, args).await,
        EntitySubcommand::Create(args) => create::run(config, entity, args).await,
        EntitySubcommand::Update(args) => update::run(config, entity, args).await,
        EntitySubcommand::Delete(args) => delete::run(config, entity, args).await,
        EntitySubcommand::SetStatus(args) => set_status::run(config, entity, args).await,
    }
}

pub async fn handle_rooms(config: &Config, cmd: RoomsCommand) -> Result<()> {
    match cmd.command {
        RoomSubcommand::Common(cmd) => handle(config, Entity::Rooms, cmd).await,
        RoomSubcommand::Approve(args) => {
            set_status::apply(config, Entity::Rooms, args.id, "Approved").await
        }
        RoomSubcommand::Reject(args) => {
            set_status::apply(config, Entity::Rooms, args.id, "Rejected").await
        }
    }
}
