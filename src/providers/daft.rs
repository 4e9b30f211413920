use crate::error::ScoutError;
use crate::models::Listing;
use crate::providers::traits::ListingsProvider;
use crate::providers::types::SearchQuery;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::Client;
use scraper::{Html, Selector};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

const BASE_URL: &str = "https://www.daft.ie";

/// Listings per result page; the site's own default.
const PAGE_SIZE: u32 = 20;

/// Daft.ie search provider.
///
/// Result pages ship their data as a JSON payload inside the
/// `__NEXT_DATA__` bootstrap script, so each page is fetched plainly over
/// HTTP and the payload is read instead of the rendered cards.
pub struct DaftProvider {
    client: Client,
}

impl DaftProvider {
    pub fn new() -> Result<Self, ScoutError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .build()
            .map_err(|e| ScoutError::Search(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Build the search URL for one result page.
    ///
    /// A single location searches under its own path; several locations go
    /// through the country-wide path with repeated `location` parameters.
    fn page_url(&self, query: &SearchQuery, offset: u32) -> String {
        let mut url = if let [only] = query.locations.as_slice() {
            format!("{BASE_URL}/{}/{}", query.category.path_segment(), only.slug())
        } else {
            format!("{BASE_URL}/{}/ireland", query.category.path_segment())
        };

        let mut params = Vec::new();
        if query.locations.len() > 1 {
            for location in &query.locations {
                params.push(format!("location={}", location.slug()));
            }
        }
        if let Some(max_price) = query.max_price {
            params.push(format!("{}={max_price}", query.category.price_param()));
        }
        if let Some(min_beds) = query.min_beds {
            params.push(format!("numBeds_from={min_beds}"));
        }
        params.push(format!("sort={}", query.sort.as_param()));
        params.push(format!("pageSize={PAGE_SIZE}"));
        if offset > 0 {
            params.push(format!("from={offset}"));
        }

        url.push('?');
        url.push_str(&params.join("&"));
        url
    }

    async fn fetch_page(&self, url: &str) -> Result<String, ScoutError> {
        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScoutError::Search(format!("failed to fetch {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(ScoutError::Search(format!(
                "search page returned status {} for {url}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| ScoutError::Search(format!("failed to read response body: {e}")))
    }
}

#[async_trait]
impl ListingsProvider for DaftProvider {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Listing>, ScoutError> {
        info!(
            "Searching {} across {} location(s)",
            self.source_name(),
            query.locations.len()
        );

        let mut all = Vec::new();
        for page in 0..query.max_pages {
            let url = self.page_url(query, page * PAGE_SIZE);
            let html = self.fetch_page(&url).await?;
            let parsed = parse_search_page(&html)?;

            let count = parsed.listings.len();
            debug!("Page {} returned {} listings", page + 1, count);
            all.extend(parsed.listings);

            if count == 0 {
                break;
            }
            if let Some(total_pages) = parsed.total_pages {
                if page + 1 >= total_pages {
                    break;
                }
            }
        }

        info!("Search returned {} listings", all.len());
        Ok(all)
    }

    fn source_name(&self) -> &'static str {
        "Daft"
    }
}

/// One result page: its listings plus the paging envelope.
#[derive(Debug)]
struct SearchPage {
    listings: Vec<Listing>,
    total_pages: Option<u32>,
}

/// Pull the bootstrap payload out of a result page and map its records.
/// Records missing a required field are skipped, not fatal.
fn parse_search_page(html: &str) -> Result<SearchPage, ScoutError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("script#__NEXT_DATA__").unwrap();

    let script = document
        .select(&selector)
        .next()
        .ok_or_else(|| ScoutError::Search("result page has no bootstrap payload".to_string()))?;

    let payload: NextData = serde_json::from_str(&script.text().collect::<String>())
        .map_err(|e| ScoutError::Search(format!("malformed bootstrap payload: {e}")))?;

    let page_props = payload.props.page_props;
    let mut listings = Vec::new();
    for result in page_props.listings {
        match listing_from_raw(result.listing) {
            Some(listing) => listings.push(listing),
            None => warn!("Skipping listing with incomplete record"),
        }
    }

    Ok(SearchPage {
        listings,
        total_pages: page_props.paging.and_then(|p| p.total_pages),
    })
}

fn listing_from_raw(raw: RawListing) -> Option<Listing> {
    let id = raw.id?;
    let title = raw.title?;
    let agent_name = raw.seller.and_then(|s| s.name)?;
    let path = raw.seo_friendly_path?;
    let published_at = raw
        .publish_date
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single());

    Some(Listing {
        id: id.to_string(),
        title,
        agent_name,
        url: format!("{BASE_URL}{path}"),
        published_at,
    })
}

#[derive(Deserialize)]
struct NextData {
    props: NextProps,
}

#[derive(Deserialize)]
struct NextProps {
    #[serde(rename = "pageProps")]
    page_props: PageProps,
}

#[derive(Deserialize)]
struct PageProps {
    #[serde(default)]
    listings: Vec<SearchResult>,
    paging: Option<Paging>,
}

#[derive(Deserialize)]
struct SearchResult {
    listing: RawListing,
}

#[derive(Deserialize)]
struct RawListing {
    id: Option<i64>,
    title: Option<String>,
    seller: Option<RawSeller>,
    #[serde(rename = "seoFriendlyPath")]
    seo_friendly_path: Option<String>,
    #[serde(rename = "publishDate")]
    publish_date: Option<i64>,
}

#[derive(Deserialize)]
struct RawSeller {
    name: Option<String>,
}

#[derive(Deserialize)]
struct Paging {
    #[serde(rename = "totalPages")]
    total_pages: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::types::{Location, SearchCategory, SortOrder};

    fn query(locations: Vec<Location>) -> SearchQuery {
        SearchQuery {
            locations,
            category: SearchCategory::ResidentialRent,
            max_price: Some(2_000),
            min_beds: Some(2),
            sort: SortOrder::PublishDateDesc,
            max_pages: 3,
        }
    }

    #[test]
    fn page_url_for_a_single_location() {
        let provider = DaftProvider::new().unwrap();
        let url = provider.page_url(&query(vec![Location::DublinCity]), 0);
        assert_eq!(
            url,
            "https://www.daft.ie/property-for-rent/dublin-city?rentalPrice_to=2000&numBeds_from=2&sort=publishDateDesc&pageSize=20"
        );
    }

    #[test]
    fn page_url_for_several_locations() {
        let provider = DaftProvider::new().unwrap();
        let url = provider.page_url(&query(vec![Location::DublinCity, Location::Kildare]), 0);
        assert_eq!(
            url,
            "https://www.daft.ie/property-for-rent/ireland?location=dublin-city&location=kildare&rentalPrice_to=2000&numBeds_from=2&sort=publishDateDesc&pageSize=20"
        );
    }

    #[test]
    fn page_url_carries_the_pagination_offset() {
        let provider = DaftProvider::new().unwrap();
        let url = provider.page_url(&query(vec![Location::DublinCity]), 40);
        assert!(url.ends_with("&from=40"));
    }

    const SAMPLE_PAGE: &str = r#"<!DOCTYPE html><html><body>
<script id="__NEXT_DATA__" type="application/json">{
  "props": {"pageProps": {
    "listings": [
      {"listing": {"id": 5471901,
                   "title": "Apartment 12, The Mills, Dublin 8",
                   "seller": {"name": "jane doe"},
                   "seoFriendlyPath": "/for-rent/apartment-12-the-mills/5471901",
                   "publishDate": 1722470400000}},
      {"listing": {"id": 5471902, "title": "No agent on this one"}}
    ],
    "paging": {"totalPages": 1}
  }}
}</script></body></html>"#;

    #[test]
    fn parses_listings_out_of_the_bootstrap_payload() {
        let page = parse_search_page(SAMPLE_PAGE).unwrap();

        assert_eq!(page.total_pages, Some(1));
        assert_eq!(page.listings.len(), 1);

        let listing = &page.listings[0];
        assert_eq!(listing.id, "5471901");
        assert_eq!(listing.title, "Apartment 12, The Mills, Dublin 8");
        assert_eq!(listing.agent_name, "jane doe");
        assert_eq!(
            listing.url,
            "https://www.daft.ie/for-rent/apartment-12-the-mills/5471901"
        );
        assert!(listing.published_at.is_some());
    }

    #[test]
    fn page_without_payload_is_a_search_error() {
        let err = parse_search_page("<html><body>maintenance</body></html>").unwrap_err();
        assert!(matches!(err, ScoutError::Search(_)));
    }
}
