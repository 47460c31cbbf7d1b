//! Record loader trait.

use async_trait::async_trait;

use crate::error::LoadError;
use crate::record::{Record, parse_collection};

/// A source of the initial record set.
///
/// Consumed once when an engine is initialized. Failures are reported as
/// [`LoadError`]; the engine degrades to an empty collection.
#[async_trait]
pub trait RecordLoader: Send + Sync {
    /// Fetch every record.
    async fn load(&self) -> Result<Vec<Record>, LoadError>;
}

/// A loader over JSON text held in memory, such as fixtures compiled into
/// a binary.
///
/// # Example
///
/// ```
/// use innkeep_core::{ListViewEngine, Schema, StaticLoader};
///
/// # async fn example() -> innkeep_core::Result<()> {
/// let loader = StaticLoader::new(r#"[{"id": 1, "name": "Ana", "email": "ana@example.com"}]"#);
/// let mut engine = ListViewEngine::new(Schema::user());
/// engine.initialize_from(&loader).await?;
/// assert_eq!(engine.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StaticLoader {
    json: String,
}

impl StaticLoader {
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

#[async_trait]
impl RecordLoader for StaticLoader {
    async fn load(&self) -> Result<Vec<Record>, LoadError> {
        parse_collection(&self.json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_loader_parses() {
        let loader = StaticLoader::new(r#"[{"id": 1}, {"id": 2}]"#);
        assert_eq!(loader.load().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn static_loader_surfaces_shape_errors() {
        let loader = StaticLoader::new(r#"{"rooms": []}"#);
        assert!(matches!(
            loader.load().await,
            Err(LoadError::NotAnArray { .. })
        ));
    }
}
