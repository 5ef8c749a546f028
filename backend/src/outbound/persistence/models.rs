//! Internal Diesel row structs for the `countries` table.
//!
//! These types never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{Country, CountryId};

use super::schema::countries;

/// Row read back from `countries`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = countries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CountryRow {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

impl From<CountryRow> for Country {
    fn from(row: CountryRow) -> Self {
        Self {
            id: CountryId::new(row.id),
            name: row.name,
            code: row.code,
            date_created: row.date_created,
            date_updated: row.date_updated,
        }
    }
}

/// Insertable row; the id comes from the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = countries)]
pub(crate) struct NewCountryRow<'a> {
    pub name: &'a str,
    pub code: &'a str,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

/// Full overwrite of the mutable columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = countries)]
pub(crate) struct CountryUpdate<'a> {
    pub name: &'a str,
    pub code: &'a str,
    pub date_updated: DateTime<Utc>,
}

impl<'a> From<&'a Country> for CountryUpdate<'a> {
    fn from(country: &'a Country) -> Self {
        Self {
            name: &country.name,
            code: &country.code,
            date_updated: country.date_updated,
        }
    }
}
