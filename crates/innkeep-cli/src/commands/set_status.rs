//! Set-status command implementation.

use anyhow::{Context, Result};
use clap::Args;

use innkeep_core::RecordId;

use crate::config::Config;
use crate::output;

use super::{Entity, EntityContext};

#[derive(Args, Debug)]
pub struct SetStatusArgs {
    /// Record id
    pub id: RecordId,

    /// New status, e.g. Confirmed
    pub status: String,
}

#[derive(Args, Debug)]
pub struct IdArgs {
    /// Record id
    pub id: RecordId,
}

pub async fn run(config: &Config, entity: Entity, args: SetStatusArgs) -> Result<()> {
    apply(config, entity, args.id, &args.status).await
}

pub async fn apply(config: &Config, entity: Entity, id: RecordId, status: &str) -> Result<()> {
    let mut ctx = EntityContext::open(config, entity).await;
    let record = ctx
        .engine_mut()
        .set_status(id, status)
        .with_context(|| format!("Failed to set status of {} record {}", entity, id))?;
    ctx.persist().await?;

    output::json(&record)?;
    output::success(&format!("{} record {} is now {}", entity, id, status));
    Ok(())
}
