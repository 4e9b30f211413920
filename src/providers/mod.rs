pub mod daft;
pub mod traits;
pub mod types;

pub use daft::DaftProvider;
pub use traits::ListingsProvider;
pub use types::{Location, SearchCategory, SearchQuery, SortOrder};
