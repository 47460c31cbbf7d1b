//! Update command implementation.

use anyhow::{Context, Result};
use clap::Args;

use innkeep_core::RecordId;

use crate::config::Config;
use crate::output;

use super::input::RecordInput;
use super::{Entity, EntityContext};

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Record id
    pub id: RecordId,

    #[command(flatten)]
    pub input: RecordInput,
}

pub async fn run(config: &Config, entity: Entity, args: UpdateArgs) -> Result<()> {
    let fields = args.input.fields(&entity.schema())?;

    let mut ctx = EntityContext::open(config, entity).await;
    let record = ctx
        .engine_mut()
        .update(args.id, fields)
        .with_context(|| format!("Failed to update {} record {}", entity, args.id))?;
    ctx.persist().await?;

    output::json(&record)?;
    output::success(&format!("Updated {} record {}", entity, record.id()));
    Ok(())
}
