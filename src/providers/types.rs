use crate::error::ScoutError;
use serde::{Deserialize, Serialize};

/// Listing category to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchCategory {
    ResidentialRent,
    ResidentialSale,
    Sharing,
}

impl SearchCategory {
    /// Map a configuration string to the closed enum, rejecting anything
    /// unrecognized.
    pub fn from_code(code: &str) -> Result<Self, ScoutError> {
        match normalize(code).as_str() {
            "residential-rent" => Ok(Self::ResidentialRent),
            "residential-sale" => Ok(Self::ResidentialSale),
            "sharing" => Ok(Self::Sharing),
            other => Err(ScoutError::Config(format!(
                "unrecognized search type '{other}'"
            ))),
        }
    }

    /// URL path segment for this category.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::ResidentialRent => "property-for-rent",
            Self::ResidentialSale => "property-for-sale",
            Self::Sharing => "sharing",
        }
    }

    /// Query parameter carrying the price ceiling for this category.
    pub fn price_param(&self) -> &'static str {
        match self {
            Self::ResidentialSale => "salePrice_to",
            Self::ResidentialRent | Self::Sharing => "rentalPrice_to",
        }
    }
}

/// Search areas the site recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    DublinCity,
    DublinCounty,
    CorkCity,
    CorkCounty,
    GalwayCity,
    GalwayCounty,
    LimerickCity,
    Kildare,
    Meath,
    Wicklow,
}

impl Location {
    /// Map a configuration string to the closed enum, rejecting anything
    /// unrecognized.
    pub fn from_code(code: &str) -> Result<Self, ScoutError> {
        match normalize(code).as_str() {
            "dublin-city" => Ok(Self::DublinCity),
            "dublin" => Ok(Self::DublinCounty),
            "cork-city" => Ok(Self::CorkCity),
            "cork" => Ok(Self::CorkCounty),
            "galway-city" => Ok(Self::GalwayCity),
            "galway" => Ok(Self::GalwayCounty),
            "limerick-city" => Ok(Self::LimerickCity),
            "kildare" => Ok(Self::Kildare),
            "meath" => Ok(Self::Meath),
            "wicklow" => Ok(Self::Wicklow),
            other => Err(ScoutError::Config(format!(
                "unrecognized location '{other}'"
            ))),
        }
    }

    /// URL slug for this area.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::DublinCity => "dublin-city",
            Self::DublinCounty => "dublin",
            Self::CorkCity => "cork-city",
            Self::CorkCounty => "cork",
            Self::GalwayCity => "galway-city",
            Self::GalwayCounty => "galway",
            Self::LimerickCity => "limerick-city",
            Self::Kildare => "kildare",
            Self::Meath => "meath",
            Self::Wicklow => "wicklow",
        }
    }
}

/// Sort order for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    PublishDateDesc,
    PublishDateAsc,
    PriceAsc,
    PriceDesc,
}

impl SortOrder {
    /// Query parameter value for this order.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::PublishDateDesc => "publishDateDesc",
            Self::PublishDateAsc => "publishDateAsc",
            Self::PriceAsc => "priceAsc",
            Self::PriceDesc => "priceDesc",
        }
    }
}

/// Structured query handed to a listings provider.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub locations: Vec<Location>,
    pub category: SearchCategory,
    pub max_price: Option<u32>,
    pub min_beds: Option<u32>,
    pub sort: SortOrder,
    /// Upper bound on result pages walked per search.
    pub max_pages: u32,
}

fn normalize(code: &str) -> String {
    code.trim().to_lowercase().replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_codes_are_normalized() {
        assert_eq!(Location::from_code("DUBLIN_CITY").unwrap(), Location::DublinCity);
        assert_eq!(Location::from_code(" kildare ").unwrap(), Location::Kildare);
    }

    #[test]
    fn unknown_location_is_rejected() {
        let err = Location::from_code("atlantis").unwrap_err();
        assert!(err.to_string().contains("atlantis"));
    }

    #[test]
    fn unknown_search_type_is_rejected() {
        let err = SearchCategory::from_code("castles").unwrap_err();
        assert!(err.to_string().contains("castles"));
    }

    #[test]
    fn price_param_follows_category() {
        assert_eq!(SearchCategory::ResidentialRent.price_param(), "rentalPrice_to");
        assert_eq!(SearchCategory::ResidentialSale.price_param(), "salePrice_to");
    }
}
