//! Create command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use serde_json::Value;

use innkeep_core::record::ID_FIELD;
use innkeep_core::{Fields, ListViewEngine, Record, RecordStore};
use innkeep_http::{Endpoint, HttpRecordStore};

use crate::config::Config;
use crate::output;

use super::input::RecordInput;
use super::{Entity, EntityContext};

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub input: RecordInput,

    /// Append to a remote collection instead of the data directory (bookings only)
    #[arg(long, value_name = "URL")]
    pub remote: Option<String>,
}

pub async fn run(config: &Config, entity: Entity, args: CreateArgs) -> Result<()> {
    let fields = args.input.fields(&entity.schema())?;

    let record = match &args.remote {
        Some(url) => create_remote(entity, url, fields).await?,
        None => {
            let mut ctx = EntityContext::open(config, entity).await;
            ctx.create(fields).await?
        }
    };

    output::json(&record)?;
    output::success(&format!("Created {} record {}", entity, record.id()));
    Ok(())
}

/// Validate against the remote collection, then let the server assign
/// the id unless one was given.
async fn create_remote(entity: Entity, url: &str, fields: Fields) -> Result<Record> {
    if entity != Entity::Bookings {
        bail!("--remote is only supported for bookings");
    }
    let endpoint = Endpoint::new(url).context("Invalid --remote URL")?;
    let store = HttpRecordStore::new(endpoint);

    let existing = store
        .list()
        .await
        .with_context(|| format!("Failed to load {} from {}", entity, url))?;
    let mut engine = ListViewEngine::with_records(entity.schema(), existing)
        .with_context(|| format!("Remote {} collection is inconsistent", entity))?;

    let requested = fields.id().context("Invalid record id")?;
    let validated = engine
        .create(fields)
        .with_context(|| format!("Invalid {} record", entity))?;

    let mut body = Fields::from(validated).into_map();
    if requested.is_none() {
        body.remove(ID_FIELD);
    }
    let body = Fields::from_value(Value::Object(body)).context("Invalid record fields")?;

    store
        .append(body)
        .await
        .with_context(|| format!("Failed to create {} at {}", entity, url))
}
