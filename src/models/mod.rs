use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single listing as returned by the search provider.
///
/// Produced exclusively by the provider; nothing else constructs or mutates
/// one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub agent_name: String,
    pub url: String,
    pub published_at: Option<DateTime<Utc>>,
}
