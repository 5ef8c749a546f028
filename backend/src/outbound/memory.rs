//! In-memory country storage.
//!
//! Used when no database URL is configured and by the adapter tests. It
//! mirrors the PostgreSQL schema's behaviour: ids come from a monotonically
//! increasing counter and names and codes are unique ignoring case.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::Page;

use crate::domain::ports::{CountryRepository, CountryRepositoryError};
use crate::domain::{
    Country, CountryId, CountryPageRequest, CountrySort, CountrySortField, CountrySpecification,
    NewCountry, SortDirection,
};

#[derive(Debug, Default)]
struct Rows {
    last_id: i64,
    by_id: BTreeMap<CountryId, Country>,
}

impl Rows {
    fn collides(&self, name: &str, code: &str, excluding: Option<CountryId>) -> bool {
        let name = name.to_lowercase();
        let code = code.to_lowercase();
        self.by_id.values().any(|row| {
            Some(row.id) != excluding
                && (row.name.to_lowercase() == name || row.code.to_lowercase() == code)
        })
    }
}

/// Country repository backed by a process-local map.
#[derive(Debug, Default)]
pub struct InMemoryCountryRepository {
    rows: RwLock<Rows>,
}

impl InMemoryCountryRepository {
    fn read(&self) -> Result<RwLockReadGuard<'_, Rows>, CountryRepositoryError> {
        self.rows
            .read()
            .map_err(|_| CountryRepositoryError::query("country store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Rows>, CountryRepositoryError> {
        self.rows
            .write()
            .map_err(|_| CountryRepositoryError::query("country store lock poisoned"))
    }
}

fn compare(sort: CountrySort, left: &Country, right: &Country) -> Ordering {
    let ordering = match sort.field {
        CountrySortField::Id => left.id.cmp(&right.id),
        CountrySortField::Name => left.name.to_lowercase().cmp(&right.name.to_lowercase()),
        CountrySortField::Code => left.code.to_lowercase().cmp(&right.code.to_lowercase()),
        CountrySortField::DateCreated => left.date_created.cmp(&right.date_created),
        CountrySortField::DateUpdated => left.date_updated.cmp(&right.date_updated),
    };
    let ordering = match sort.direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    };
    ordering.then_with(|| left.id.cmp(&right.id))
}

#[async_trait]
impl CountryRepository for InMemoryCountryRepository {
    async fn insert(
        &self,
        candidate: &NewCountry,
        created_at: DateTime<Utc>,
    ) -> Result<Country, CountryRepositoryError> {
        let mut rows = self.write()?;
        if rows.collides(&candidate.name, &candidate.code, None) {
            return Err(CountryRepositoryError::conflict(format!(
                "name or code already stored: {}/{}",
                candidate.name, candidate.code
            )));
        }
        rows.last_id += 1;
        let country = Country {
            id: CountryId::new(rows.last_id),
            name: candidate.name.clone(),
            code: candidate.code.clone(),
            date_created: created_at,
            date_updated: created_at,
        };
        rows.by_id.insert(country.id, country.clone());
        Ok(country)
    }

    async fn save(&self, country: &Country) -> Result<Country, CountryRepositoryError> {
        let mut rows = self.write()?;
        if !rows.by_id.contains_key(&country.id) {
            return Err(CountryRepositoryError::query(format!(
                "no country stored under id {}",
                country.id
            )));
        }
        if rows.collides(&country.name, &country.code, Some(country.id)) {
            return Err(CountryRepositoryError::conflict(format!(
                "name or code already stored: {}/{}",
                country.name, country.code
            )));
        }
        rows.by_id.insert(country.id, country.clone());
        Ok(country.clone())
    }

    async fn delete(&self, id: CountryId) -> Result<(), CountryRepositoryError> {
        self.write()?.by_id.remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, id: CountryId) -> Result<Option<Country>, CountryRepositoryError> {
        Ok(self.read()?.by_id.get(&id).cloned())
    }

    async fn exists_by_name_or_code(
        &self,
        name: &str,
        code: &str,
        excluding: Option<CountryId>,
    ) -> Result<bool, CountryRepositoryError> {
        Ok(self.read()?.collides(name, code, excluding))
    }

    async fn find_matching(
        &self,
        spec: &CountrySpecification,
        request: &CountryPageRequest,
    ) -> Result<Page<Country>, CountryRepositoryError> {
        let mut matching: Vec<Country> = self
            .read()?
            .by_id
            .values()
            .filter(|row| spec.matches(row))
            .cloned()
            .collect();
        matching.sort_by(|left, right| compare(request.sort, left, right));

        let total = matching.len() as u64;
        let offset = usize::try_from(request.page.offset()).unwrap_or(usize::MAX);
        let data = matching
            .into_iter()
            .skip(offset)
            .take(request.page.size() as usize)
            .collect();
        Ok(Page::new(data, request.page, total))
    }

    async fn find_all(&self) -> Result<Vec<Country>, CountryRepositoryError> {
        Ok(self.read()?.by_id.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CountryFilter;
    use rstest::{fixture, rstest};

    async fn seed(repo: &InMemoryCountryRepository, rows: &[(&str, &str)]) {
        for (name, code) in rows {
            repo.insert(&NewCountry::new(*name, *code), Utc::now())
                .await
                .expect("seed row");
        }
    }

    #[fixture]
    fn repo() -> InMemoryCountryRepository {
        InMemoryCountryRepository::default()
    }

    #[rstest]
    #[tokio::test]
    async fn ids_are_assigned_sequentially(repo: InMemoryCountryRepository) {
        seed(&repo, &[("Spain", "SP"), ("Japan", "JP")]).await;
        let ids: Vec<i64> = repo
            .find_all()
            .await
            .expect("list")
            .iter()
            .map(|c| c.id.get())
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[rstest]
    #[tokio::test]
    async fn case_insensitive_duplicates_conflict(repo: InMemoryCountryRepository) {
        seed(&repo, &[("Japan", "JP")]).await;
        let err = repo
            .insert(&NewCountry::new("JAPAN", "XX"), Utc::now())
            .await
            .expect_err("duplicate name");
        assert!(matches!(err, CountryRepositoryError::Conflict { .. }));
        assert!(
            repo.exists_by_name_or_code("nope", "jp", None)
                .await
                .expect("lookup")
        );
        assert!(
            !repo
                .exists_by_name_or_code("japan", "jp", Some(CountryId::new(1)))
                .await
                .expect("lookup")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn pages_are_windowed_and_sorted(repo: InMemoryCountryRepository) {
        seed(
            &repo,
            &[("Spain", "SP"), ("Japan", "JP"), ("France", "FR"), ("Peru", "PE")],
        )
        .await;
        let request =
            CountryPageRequest::from_parts(Some(1), Some(3), Some("name,desc")).expect("request");
        let spec = CountrySpecification::from_filter(&CountryFilter::default());
        let page = repo.find_matching(&spec, &request).await.expect("page");

        assert_eq!(page.total_items, 4);
        assert_eq!(page.pages, 2);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].name, "France");
    }

    #[rstest]
    #[case("name", &["angola", "Bhutan", "Zambia"])]
    #[case("code", &["Zambia", "angola", "Bhutan"])]
    #[tokio::test]
    async fn text_sorts_ignore_case(
        repo: InMemoryCountryRepository,
        #[case] sort: &str,
        #[case] expected: &[&str],
    ) {
        seed(&repo, &[("Zambia", "AA"), ("angola", "ab"), ("Bhutan", "BT")]).await;
        let request =
            CountryPageRequest::from_parts(Some(0), Some(10), Some(sort)).expect("request");
        let spec = CountrySpecification::from_filter(&CountryFilter::default());
        let page = repo.find_matching(&spec, &request).await.expect("page");

        let names: Vec<&str> = page.data.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn save_replaces_existing_rows_only(repo: InMemoryCountryRepository) {
        seed(&repo, &[("Japan", "JP")]).await;
        let mut japan = repo
            .find_by_id(CountryId::new(1))
            .await
            .expect("lookup")
            .expect("present");
        japan.code = "JPN".to_owned();
        let saved = repo.save(&japan).await.expect("save");
        assert_eq!(saved.code, "JPN");

        japan.id = CountryId::new(99);
        assert!(repo.save(&japan).await.is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn delete_removes_the_row(repo: InMemoryCountryRepository) {
        seed(&repo, &[("Japan", "JP")]).await;
        repo.delete(CountryId::new(1)).await.expect("delete");
        assert!(
            repo.find_by_id(CountryId::new(1))
                .await
                .expect("lookup")
                .is_none()
        );
    }
}
