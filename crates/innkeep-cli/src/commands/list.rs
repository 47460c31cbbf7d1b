//! List command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use innkeep_core::{DEFAULT_PAGE_SIZE, ListViewEngine, QueryDescriptor, SortDirection};
use innkeep_http::{Endpoint, HttpLoader};

use crate::config::Config;
use crate::output;

use super::{Entity, EntityContext};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Case-insensitive substring to search for
    #[arg(long, short = 's', default_value = "")]
    pub search: String,

    /// Restrict the search to this field (repeatable)
    #[arg(long = "search-field", value_name = "FIELD")]
    pub search_fields: Vec<String>,

    /// Only show records with this status
    #[arg(long)]
    pub status: Option<String>,

    /// Field to sort by
    #[arg(long, default_value = "id")]
    pub sort: String,

    /// Sort in descending order
    #[arg(long)]
    pub desc: bool,

    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Records per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Read from a remote collection instead of the data directory (bookings only)
    #[arg(long, value_name = "URL")]
    pub remote: Option<String>,
}

impl ListArgs {
    fn query(&self) -> QueryDescriptor {
        let direction = if self.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };

        let mut query = QueryDescriptor::new()
            .search(&self.search)
            .sort_by(&self.sort, direction)
            .page(self.page)
            .page_size(self.page_size);
        for field in &self.search_fields {
            query = query.search_in(field);
        }
        if let Some(status) = &self.status {
            query = query.status(status);
        }
        query
    }
}

pub async fn run(config: &Config, entity: Entity, args: ListArgs) -> Result<()> {
    let engine = match &args.remote {
        Some(url) => load_remote(entity, url).await?,
        None => EntityContext::open(config, entity).await.into_engine(),
    };

    let view = engine
        .query(&args.query())
        .with_context(|| format!("Invalid {} query", entity))?;

    if view.is_empty() {
        output::note(&format!("No {} found.", entity));
    }

    for record in view.records() {
        if args.pretty {
            output::json_pretty(record)?;
        } else {
            output::json(record)?;
        }
    }

    output::note(&format!(
        "Page {} of {} ({} matching)",
        view.page(),
        view.total_pages(),
        view.total_matching()
    ));

    Ok(())
}

async fn load_remote(entity: Entity, url: &str) -> Result<ListViewEngine> {
    if entity != Entity::Bookings {
        bail!("--remote is only supported for bookings");
    }
    let endpoint = Endpoint::new(url).context("Invalid --remote URL")?;

    let mut engine = ListViewEngine::new(entity.schema());
    if let Err(err) = engine.initialize_from(&HttpLoader::new(endpoint)).await {
        output::warning(&format!(
            "Could not load {} from {}: {}. Showing an empty list.",
            entity, url, err
        ));
    }
    Ok(engine)
}
