use crate::error::ScoutError;
use crate::models::Listing;
use crate::providers::types::SearchQuery;
use async_trait::async_trait;

/// Common trait for listing search providers.
/// This allows easy addition of new sources and keeps the run loop testable.
#[async_trait]
pub trait ListingsProvider: Send + Sync {
    /// Run the search and return listings in provider order.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Listing>, ScoutError>;

    /// Get the name of the provider source.
    fn source_name(&self) -> &'static str;
}
