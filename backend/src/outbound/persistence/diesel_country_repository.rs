//! PostgreSQL-backed `CountryRepository` implementation using Diesel ORM.
//!
//! Partial-text clauses become `ILIKE '%needle%'` filters with the LIKE
//! metacharacters escaped. Uniqueness checks and text sorts compare `lower()`
//! values so they line up with the case-insensitive unique indexes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;
use pagination::Page;
use tracing::debug;

use crate::domain::ports::{CountryRepository, CountryRepositoryError};
use crate::domain::{
    Country, CountryField, CountryId, CountryPageRequest, CountrySortField, CountrySpecification,
    NewCountry, SortDirection,
};

use super::models::{CountryRow, CountryUpdate, NewCountryRow};
use super::pool::{DbPool, PoolError};
use super::schema::countries;

define_sql_function!(fn lower(x: Text) -> Text);

/// Diesel-backed implementation of the `CountryRepository` port.
#[derive(Clone)]
pub struct DieselCountryRepository {
    pool: DbPool,
}

impl DieselCountryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CountryRepositoryError {
    CountryRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> CountryRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => CountryRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => CountryRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            CountryRepositoryError::conflict(
                info.constraint_name()
                    .unwrap_or("unique constraint")
                    .to_owned(),
            )
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CountryRepositoryError::connection("database connection error")
        }
        _ => CountryRepositoryError::query("database error"),
    }
}

/// Escape `%`, `_` and the escape character itself so the needle matches
/// literally inside an `ILIKE` pattern.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn filtered(spec: &CountrySpecification) -> countries::BoxedQuery<'static, Pg> {
    spec.clauses()
        .iter()
        .fold(countries::table.into_boxed(), |query, clause| {
            let pattern = contains_pattern(clause.needle());
            match clause.field() {
                CountryField::Name => query.filter(countries::name.ilike(pattern)),
                CountryField::Code => query.filter(countries::code.ilike(pattern)),
            }
        })
}

fn ordered(
    query: countries::BoxedQuery<'static, Pg>,
    request: &CountryPageRequest,
) -> countries::BoxedQuery<'static, Pg> {
    let sort = request.sort;
    let query = match (sort.field, sort.direction) {
        (CountrySortField::Id, SortDirection::Ascending) => query.order_by(countries::id.asc()),
        (CountrySortField::Id, SortDirection::Descending) => query.order_by(countries::id.desc()),
        (CountrySortField::Name, SortDirection::Ascending) => {
            query.order_by(lower(countries::name).asc())
        }
        (CountrySortField::Name, SortDirection::Descending) => {
            query.order_by(lower(countries::name).desc())
        }
        (CountrySortField::Code, SortDirection::Ascending) => {
            query.order_by(lower(countries::code).asc())
        }
        (CountrySortField::Code, SortDirection::Descending) => {
            query.order_by(lower(countries::code).desc())
        }
        (CountrySortField::DateCreated, SortDirection::Ascending) => {
            query.order_by(countries::date_created.asc())
        }
        (CountrySortField::DateCreated, SortDirection::Descending) => {
            query.order_by(countries::date_created.desc())
        }
        (CountrySortField::DateUpdated, SortDirection::Ascending) => {
            query.order_by(countries::date_updated.asc())
        }
        (CountrySortField::DateUpdated, SortDirection::Descending) => {
            query.order_by(countries::date_updated.desc())
        }
    };
    query.then_order_by(countries::id.asc())
}

#[async_trait]
impl CountryRepository for DieselCountryRepository {
    async fn insert(
        &self,
        candidate: &NewCountry,
        created_at: DateTime<Utc>,
    ) -> Result<Country, CountryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewCountryRow {
            name: &candidate.name,
            code: &candidate.code,
            date_created: created_at,
            date_updated: created_at,
        };

        diesel::insert_into(countries::table)
            .values(&row)
            .returning(CountryRow::as_returning())
            .get_result::<CountryRow>(&mut conn)
            .await
            .map(Country::from)
            .map_err(map_diesel_error)
    }

    async fn save(&self, country: &Country) -> Result<Country, CountryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(countries::table.find(country.id.get()))
            .set(CountryUpdate::from(country))
            .returning(CountryRow::as_returning())
            .get_result::<CountryRow>(&mut conn)
            .await
            .map(Country::from)
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: CountryId) -> Result<(), CountryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(countries::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if removed == 0 {
            debug!(%id, "delete matched no rows");
        }
        Ok(())
    }

    async fn find_by_id(&self, id: CountryId) -> Result<Option<Country>, CountryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        countries::table
            .find(id.get())
            .select(CountryRow::as_select())
            .first::<CountryRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Country::from))
            .map_err(map_diesel_error)
    }

    async fn exists_by_name_or_code(
        &self,
        name: &str,
        code: &str,
        excluding: Option<CountryId>,
    ) -> Result<bool, CountryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = countries::table
            .select(countries::id)
            .filter(
                lower(countries::name)
                    .eq(name.to_lowercase())
                    .or(lower(countries::code).eq(code.to_lowercase())),
            )
            .into_boxed();
        if let Some(excluded) = excluding {
            query = query.filter(countries::id.ne(excluded.get()));
        }

        query
            .first::<i64>(&mut conn)
            .await
            .optional()
            .map(|found| found.is_some())
            .map_err(map_diesel_error)
    }

    async fn find_matching(
        &self,
        spec: &CountrySpecification,
        request: &CountryPageRequest,
    ) -> Result<Page<Country>, CountryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let offset = i64::try_from(request.page.offset())
            .map_err(|_| CountryRepositoryError::query("page offset out of range"))?;

        let total: i64 = filtered(spec)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let rows: Vec<CountryRow> = ordered(filtered(spec), request)
            .select(CountryRow::as_select())
            .offset(offset)
            .limit(i64::from(request.page.size()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Page::new(
            rows.into_iter().map(Country::from).collect(),
            request.page,
            u64::try_from(total).unwrap_or_default(),
        ))
    }

    async fn find_all(&self) -> Result<Vec<Country>, CountryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        countries::table
            .order(countries::id.asc())
            .select(CountryRow::as_select())
            .load::<CountryRow>(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(Country::from).collect())
            .map_err(map_diesel_error)
    }
}
