//! Dashboard summary command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::config::Config;
use crate::output;

use super::{Entity, EntityContext};

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct EntitySummary {
    entity: &'static str,
    total: usize,
    statuses: Vec<StatusCount>,
}

#[derive(Debug, Serialize)]
struct StatusCount {
    status: String,
    count: usize,
}

impl EntitySummary {
    fn of(ctx: &EntityContext) -> Self {
        let engine = ctx.engine();
        Self {
            entity: ctx.entity().as_str(),
            total: engine.len(),
            statuses: engine
                .status_counts()
                .into_iter()
                .map(|(status, count)| StatusCount { status, count })
                .collect(),
        }
    }
}

pub async fn run(config: &Config, args: SummaryArgs) -> Result<()> {
    let mut summaries = Vec::with_capacity(Entity::ALL.len());
    for entity in Entity::ALL {
        let ctx = EntityContext::open(config, entity).await;
        summaries.push(EntitySummary::of(&ctx));
    }

    if args.json {
        return output::json_pretty(&summaries);
    }

    for summary in &summaries {
        output::field(&format!("Total {}", summary.entity), &summary.total.to_string());
        for status in &summary.statuses {
            output::field(&format!("  {}", status.status), &status.count.to_string());
        }
    }
    Ok(())
}
