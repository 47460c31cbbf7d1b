//! Seed the data directory with the bundled sample data.

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use innkeep_core::ListViewEngine;
use innkeep_file::FileRecordStore;

use crate::config::Config;
use crate::{fixtures, output};

use super::Entity;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite existing data files
    #[arg(long)]
    pub force: bool,
}

pub async fn run(config: &Config, args: InitArgs) -> Result<()> {
    for entity in Entity::ALL {
        let path = config.entity_path(entity);
        if path.exists() && !args.force {
            output::note(&format!(
                "Skipping {}: {} exists (use --force to overwrite)",
                entity,
                path.display()
            ));
            continue;
        }

        let mut engine = ListViewEngine::new(entity.schema());
        let count = engine
            .initialize_from(&fixtures::loader(entity))
            .await
            .with_context(|| format!("Bundled {} data is invalid", entity))?;

        FileRecordStore::new(&path)
            .overwrite(engine.records())
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        debug!(%entity, count, path = %path.display(), "Seeded data file");
        output::success(&format!("Wrote {} {} to {}", count, entity, path.display()));
    }

    Ok(())
}
