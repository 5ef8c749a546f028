//! Request and response bodies for the REST adapter.

use chrono::{DateTime, Utc};
use pagination::Page;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Country;

/// Wire format for timestamps: UTC with millisecond precision,
/// e.g. `2024-03-01 12:00:00.000`.
pub mod timestamp_format {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// `strftime` pattern for both directions.
    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

    /// Render `value` in [`FORMAT`].
    /// 
    /// # Errors
    /// 
    /// Propagates serializer failures.
    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(FORMAT))
    }

    /// Parse a [`FORMAT`] string as UTC.
    /// 
    /// # Errors
    /// 
    /// Fails when the string does not match [`FORMAT`].
    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}

/// Country resource as rendered to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CountryResponse {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Short country code.
    pub code: String,
    /// Creation time in UTC.
    #[serde(with = "timestamp_format")]
    #[schema(value_type = String, example = "2024-03-01 12:00:00.000")]
    pub date_created: DateTime<Utc>,
    /// Last update time in UTC.
    #[serde(with = "timestamp_format")]
    #[schema(value_type = String, example = "2024-03-01 12:00:00.000")]
    pub date_updated: DateTime<Utc>,
}

impl From<Country> for CountryResponse {
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

/// Body of `POST /api/v1/countries`.
///
/// Missing fields decode as `None` so validation reports them as `NotBlank`
/// rather than failing the decode.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AddCountryRequest {
    /// Between 3 and 50 characters.
    #[serde(default)]
    #[schema(example = "Spain")]
    pub name: Option<String>,
    /// Between 2 and 3 characters.
    #[serde(default)]
    #[schema(example = "SP")]
    pub code: Option<String>,
}

/// Body of `PATCH /api/v1/country/{id}`; absent fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCountryRequest {
    /// Replacement name.
    #[serde(default)]
    pub name: Option<String>,
    /// Replacement code.
    #[serde(default)]
    pub code: Option<String>,
}

/// Query string of `GET /api/v1/countries`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CountryListQuery {
    /// Case-insensitive name fragment.
    pub name: Option<String>,
    /// Case-insensitive code fragment.
    pub code: Option<String>,
    /// Zero-based page index, default 0.
    pub page: Option<u32>,
    /// Page size between 1 and 2000, default 10.
    pub size: Option<u32>,
    /// `field` or `field,desc`; default `id`.
    pub sort: Option<String>,
}

/// Page of countries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CountryPageResponse {
    /// Zero-based index of this page.
    pub current_page: u32,
    /// Number of pages for the current size.
    pub pages: u32,
    /// Requested page size.
    pub items_per_page: u32,
    /// Matches across all pages.
    pub total_items: u64,
    /// Rows on this page.
    pub data: Vec<CountryResponse>,
}

impl From<Page<Country>> for CountryPageResponse {
    fn from(value: Page<Country>) -> Self {
        let page = value.map(CountryResponse::from);
        Self {
            current_page: page.current_page,
            pages: page.pages,
            items_per_page: page.items_per_page,
            total_items: page.total_items,
            data: page.data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CountryId;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn timestamps_render_with_milliseconds() {
        let stamp = Utc
            .with_ymd_and_hms(2024, 3, 1, 12, 0, 5)
            .single()
            .expect("timestamp")
            + chrono::Duration::milliseconds(42);
        let body = CountryResponse::from(Country {
            id: CountryId::new(1),
            name: "Spain".to_owned(),
            code: "SP".to_owned(),
            date_created: stamp,
            date_updated: stamp,
        });
        let value = serde_json::to_value(&body).expect("serialise");
        assert_eq!(
            value,
            json!({
                "id": 1,
                "name": "Spain",
                "code": "SP",
                "date_created": "2024-03-01 12:00:05.042",
                "date_updated": "2024-03-01 12:00:05.042"
            })
        );
        let back: CountryResponse = serde_json::from_value(value).expect("deserialise");
        assert_eq!(back, body);
    }

    #[test]
    fn add_request_tolerates_missing_fields() {
        let body: AddCountryRequest = serde_json::from_str("{\"name\":\"Spain\"}").expect("decode");
        assert_eq!(body.name.as_deref(), Some("Spain"));
        assert!(body.code.is_none());
    }
}
