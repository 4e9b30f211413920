use crate::config::Config;
use crate::error::ScoutError;
use crate::notify::{BrowserNotifier, Notifier};
use crate::providers::{DaftProvider, ListingsProvider, SearchQuery, SortOrder};
use crate::store::SeenStore;
use std::collections::HashSet;
use tracing::{error, info};

/// Result pages walked per run.
const MAX_SEARCH_PAGES: u32 = 3;

/// Outcome counters for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub fetched: usize,
    pub skipped: usize,
    pub sent: usize,
    pub failed: usize,
}

/// Run one search-and-notify pass end to end.
pub async fn run(config: &Config) -> Result<RunStats, ScoutError> {
    let store = SeenStore::new(&config.store.path);
    let mut seen = store.load()?;
    info!("Loaded {} previously contacted listings", seen.len());

    // Browser ownership sits in this scope, so the session closes on every
    // exit path, fatal errors included.
    let notifier = BrowserNotifier::new(&config.webdriver, config.inquiry.clone())?;
    let provider = DaftProvider::new()?;

    let query = search_query(config);
    let stats = process_listings(&provider, &notifier, &query, &mut seen).await?;

    store.save(&seen)?;
    Ok(stats)
}

/// Translate configured criteria into the provider query. Results are always
/// walked newest-first, so a bounded page count still sees every new listing.
fn search_query(config: &Config) -> SearchQuery {
    SearchQuery {
        locations: config.criteria.locations.clone(),
        category: config.criteria.search_type,
        max_price: Some(config.criteria.max_budget),
        min_beds: Some(config.criteria.min_beds),
        sort: SortOrder::PublishDateDesc,
        max_pages: MAX_SEARCH_PAGES,
    }
}

/// Contact every listing not yet in `seen`, in provider order.
///
/// A successful send records the id immediately, so a failure later in the
/// same run cannot lose it, and a duplicate id within one response is sent
/// only once. A failed send is logged and skipped; it never aborts the run.
pub async fn process_listings<P, N>(
    provider: &P,
    notifier: &N,
    query: &SearchQuery,
    seen: &mut HashSet<String>,
) -> Result<RunStats, ScoutError>
where
    P: ListingsProvider + ?Sized,
    N: Notifier + ?Sized,
{
    let listings = provider.search(query).await?;
    let mut stats = RunStats {
        fetched: listings.len(),
        ..Default::default()
    };

    for listing in &listings {
        if seen.contains(&listing.id) {
            stats.skipped += 1;
            continue;
        }

        match notifier.notify(listing) {
            Ok(()) => {
                seen.insert(listing.id.clone());
                stats.sent += 1;
            }
            Err(e) => {
                error!("Could not send inquiry for {}: {}", listing.url, e);
                stats.failed += 1;
            }
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Listing;
    use crate::providers::{Location, SearchCategory};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubProvider {
        listings: Vec<Listing>,
    }

    #[async_trait]
    impl ListingsProvider for StubProvider {
        async fn search(&self, _query: &SearchQuery) -> Result<Vec<Listing>, ScoutError> {
            Ok(self.listings.clone())
        }

        fn source_name(&self) -> &'static str {
            "stub"
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        notified: Mutex<Vec<String>>,
        fail_ids: Vec<String>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, listing: &Listing) -> Result<(), ScoutError> {
            if self.fail_ids.contains(&listing.id) {
                return Err(ScoutError::Interaction(format!(
                    "no contact button on {}",
                    listing.url
                )));
            }
            self.notified.lock().unwrap().push(listing.id.clone());
            Ok(())
        }
    }

    fn listing(id: &str) -> Listing {
        Listing {
            id: id.to_string(),
            title: format!("Apartment {id}"),
            agent_name: "jane doe".to_string(),
            url: format!("https://www.daft.ie/for-rent/{id}"),
            published_at: None,
        }
    }

    fn query() -> SearchQuery {
        SearchQuery {
            locations: vec![Location::DublinCity],
            category: SearchCategory::ResidentialRent,
            max_price: Some(2_000),
            min_beds: Some(2),
            sort: SortOrder::PublishDateDesc,
            max_pages: MAX_SEARCH_PAGES,
        }
    }

    fn ids(values: &[&str]) -> HashSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn already_seen_listings_are_never_notified() {
        let provider = StubProvider {
            listings: vec![listing("A"), listing("B")],
        };
        let notifier = RecordingNotifier::default();
        let mut seen = ids(&["A"]);

        let stats = process_listings(&provider, &notifier, &query(), &mut seen)
            .await
            .unwrap();

        assert_eq!(*notifier.notified.lock().unwrap(), vec!["B".to_string()]);
        assert_eq!(seen, ids(&["A", "B"]));
        assert_eq!(
            stats,
            RunStats {
                fetched: 2,
                skipped: 1,
                sent: 1,
                failed: 0
            }
        );
    }

    #[tokio::test]
    async fn failed_send_is_skipped_and_kept_out_of_the_seen_set() {
        let provider = StubProvider {
            listings: vec![listing("C"), listing("D")],
        };
        let notifier = RecordingNotifier {
            fail_ids: vec!["C".to_string()],
            ..Default::default()
        };
        let mut seen = HashSet::new();

        let stats = process_listings(&provider, &notifier, &query(), &mut seen)
            .await
            .unwrap();

        assert!(!seen.contains("C"));
        assert!(seen.contains("D"));
        assert_eq!(stats.sent, 1);
        assert_eq!(stats.failed, 1);
    }

    #[tokio::test]
    async fn earlier_success_survives_a_later_failure() {
        let provider = StubProvider {
            listings: vec![listing("F"), listing("G")],
        };
        let notifier = RecordingNotifier {
            fail_ids: vec!["G".to_string()],
            ..Default::default()
        };
        let mut seen = HashSet::new();

        process_listings(&provider, &notifier, &query(), &mut seen)
            .await
            .unwrap();

        assert_eq!(seen, ids(&["F"]));
    }

    #[tokio::test]
    async fn duplicate_id_within_one_response_is_sent_once() {
        let provider = StubProvider {
            listings: vec![listing("E"), listing("E")],
        };
        let notifier = RecordingNotifier::default();
        let mut seen = HashSet::new();

        let stats = process_listings(&provider, &notifier, &query(), &mut seen)
            .await
            .unwrap();

        assert_eq!(notifier.notified.lock().unwrap().len(), 1);
        assert_eq!(stats.sent, 1);
        assert_eq!(stats.skipped, 1);
    }

    #[tokio::test]
    async fn provider_order_is_preserved() {
        let provider = StubProvider {
            listings: vec![listing("3"), listing("1"), listing("2")],
        };
        let notifier = RecordingNotifier::default();
        let mut seen = HashSet::new();

        process_listings(&provider, &notifier, &query(), &mut seen)
            .await
            .unwrap();

        assert_eq!(
            *notifier.notified.lock().unwrap(),
            vec!["3".to_string(), "1".to_string(), "2".to_string()]
        );
    }
}
