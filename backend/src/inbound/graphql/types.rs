//! GraphQL object and input types.

use async_graphql::{InputObject, SimpleObject};
use chrono::{DateTime, Utc};
use pagination::Page;

use crate::domain::Country;

/// Country resource.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Country")]
pub struct CountryObject {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Short country code.
    pub code: String,
    /// Creation time.
    pub date_created: DateTime<Utc>,
    /// Last update time.
    pub date_updated: DateTime<Utc>,
}

impl From<Country> for CountryObject {
    fn from(value: Country) -> Self {
        Self {
            id: value.id.get(),
            name: value.name,
            code: value.code,
            date_created: value.date_created,
            date_updated: value.date_updated,
        }
    }
}

/// Page of countries with result-set metadata.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "CountryPage")]
pub struct CountryPageObject {
    /// Zero-based page index.
    pub current_page: u32,
    /// Page count for this size.
    pub pages: u32,
    /// Requested page size.
    pub items_per_page: u32,
    /// Matches across all pages.
    pub total_items: u64,
    /// Rows on this page.
    pub data: Vec<CountryObject>,
}

impl From<Page<Country>> for CountryPageObject {
    fn from(value: Page<Country>) -> Self {
        let page = value.map(CountryObject::from);
        Self {
            current_page: page.current_page,
            pages: page.pages,
            items_per_page: page.items_per_page,
            total_items: page.total_items,
            data: page.data,
        }
    }
}

/// Input of the `add` mutation.
#[derive(Debug, Clone, InputObject)]
pub struct AddCountryInput {
    /// Between 3 and 50 characters.
    pub name: String,
    /// Between 2 and 3 characters.
    pub code: String,
}

/// Input of the `update` mutation; omitted fields keep their value.
#[derive(Debug, Clone, Default, InputObject)]
pub struct UpdateCountryInput {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement code.
    pub code: Option<String>,
}
