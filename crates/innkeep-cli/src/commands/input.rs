//! Record field input shared by `create` and `update`.

use std::io::{self, Read};

use anyhow::{Context, Result, bail};
use clap::Args;
use serde_json::Value;

use innkeep_core::{Fields, Schema};

#[derive(Args, Debug)]
pub struct RecordInput {
    /// Set a field, e.g. --set name="John Doe" (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub assignments: Vec<String>,

    /// JSON object with field values (use - for stdin)
    #[arg(long, value_name = "FILE")]
    pub json: Option<String>,
}

impl RecordInput {
    /// Fields from `--json`, overridden by `--set`. `--set` values are
    /// typed by the field kinds declared in `schema`.
    pub fn fields(&self, schema: &Schema) -> Result<Fields> {
        let mut fields = match &self.json {
            Some(path) => {
                let content = if path == "-" {
                    let mut buf = String::new();
                    io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read from stdin")?;
                    buf
                } else {
                    std::fs::read_to_string(path)
                        .with_context(|| format!("Failed to read JSON file {}", path))?
                };
                let value: Value = serde_json::from_str(&content).context("Invalid JSON input")?;
                Fields::from_value(value).context("Invalid record fields")?
            }
            None => Fields::new(),
        };

        let assigned = Fields::from_pairs_for(schema, &self.assignments).context("Invalid --set value")?;
        fields.merge(assigned);

        if fields.is_empty() {
            bail!("No fields given. Use --set KEY=VALUE or --json FILE.");
        }
        Ok(fields)
    }
}
