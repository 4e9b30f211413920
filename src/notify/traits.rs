use crate::error::ScoutError;
use crate::models::Listing;

/// Sends an inquiry for a single listing.
///
/// Not idempotent: a successful call sends one real inquiry. Retry policy,
/// if any, belongs to the caller.
pub trait Notifier {
    fn notify(&self, listing: &Listing) -> Result<(), ScoutError>;
}
