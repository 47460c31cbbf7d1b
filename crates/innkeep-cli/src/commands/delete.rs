//! Delete command implementation.

use anyhow::{Context, Result};
use clap::Args;

use innkeep_core::RecordId;

use crate::config::Config;
use crate::output;

use super::{Entity, EntityContext};

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Record id
    pub id: RecordId,
}

pub async fn run(config: &Config, entity: Entity, args: DeleteArgs) -> Result<()> {
    let mut ctx = EntityContext::open(config, entity).await;
    ctx.engine_mut()
        .delete(args.id)
        .with_context(|| format!("Failed to delete {} record {}", entity, args.id))?;
    ctx.persist().await?;

    output::success(&format!("Deleted {} record {}", entity, args.id));
    Ok(())
}
