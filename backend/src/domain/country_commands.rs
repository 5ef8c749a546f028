//! Mutation guards shared by every transport adapter.
//!
//! Each guard resolves or checks the target row first and only then calls
//! the mutating [`CountryService`] operation. Adapters call these instead of
//! composing the checks themselves so REST, GraphQL and gRPC report the same
//! conflicts and misses.

use crate::domain::ports::CountryService;
use crate::domain::{Country, CountryId, CountryPatch, Error, NewCountry};

/// Message reported when a name or code is already taken.
pub const COUNTRY_EXISTS: &str = "Country already exists";

/// Message reported when an id does not resolve.
pub const COUNTRY_NOT_FOUND: &str = "Country not found";

fn country_exists() -> Error {
    Error::conflict(COUNTRY_EXISTS)
}

fn country_not_found(id: CountryId) -> Error {
    Error::not_found(COUNTRY_NOT_FOUND).with_reason(format!("Country with id = [{id}] not found"))
}

/// Create `candidate` unless its name or code is already taken.
///
/// # Errors
/// [`ErrorCode::Conflict`](crate::domain::ErrorCode::Conflict) when another
/// country shares the name or code, ignoring case.
pub async fn create_country<S>(service: &S, candidate: NewCountry) -> Result<Country, Error>
where
    S: CountryService + ?Sized,
{
    if service
        .exists_by_name_or_code(&candidate.name, &candidate.code)
        .await?
    {
        return Err(country_exists());
    }
    service.add(candidate).await
}

/// Resolve `id` or fail with a not-found error naming it.
pub async fn find_country_or_not_found<S>(service: &S, id: CountryId) -> Result<Country, Error>
where
    S: CountryService + ?Sized,
{
    service
        .find_by_id(id)
        .await?
        .ok_or_else(|| country_not_found(id))
}

/// Apply `patch` to the country identified by `id`.
///
/// The collision check runs against the merged name and code, excluding the
/// country itself, so re-submitting the current values is accepted.
pub async fn update_country<S>(
    service: &S,
    id: CountryId,
    patch: CountryPatch,
) -> Result<Country, Error>
where
    S: CountryService + ?Sized,
{
    let existing = find_country_or_not_found(service, id).await?;
    let candidate = existing.merged_with(&patch, existing.date_updated);
    if service
        .exists_by_name_or_code_excluding(&candidate.name, &candidate.code, existing.id)
        .await?
    {
        return Err(country_exists());
    }
    service.update(existing, patch).await
}

/// Delete the country identified by `id`.
pub async fn delete_country<S>(service: &S, id: CountryId) -> Result<(), Error>
where
    S: CountryService + ?Sized,
{
    let existing = find_country_or_not_found(service, id).await?;
    service.delete(existing).await
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockCountryService;

    fn japan() -> Country {
        let now = Utc::now();
        Country {
            id: CountryId::new(1),
            name: "Japan".to_owned(),
            code: "JP".to_owned(),
            date_created: now,
            date_updated: now,
        }
    }

    #[tokio::test]
    async fn create_rejects_taken_name_or_code() {
        let mut service = MockCountryService::new();
        service
            .expect_exists_by_name_or_code()
            .times(1)
            .return_once(|_, _| Ok(true));
        service.expect_add().times(0);

        let err = create_country(&service, NewCountry::new("Japan", "JP"))
            .await
            .expect_err("duplicate");
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.message(), COUNTRY_EXISTS);
    }

    #[tokio::test]
    async fn create_persists_fresh_candidates() {
        let mut service = MockCountryService::new();
        service
            .expect_exists_by_name_or_code()
            .times(1)
            .return_once(|_, _| Ok(false));
        service
            .expect_add()
            .times(1)
            .return_once(|_| Ok(japan()));

        let stored = create_country(&service, NewCountry::new("Japan", "JP"))
            .await
            .expect("created");
        assert_eq!(stored.id, CountryId::new(1));
    }

    #[tokio::test]
    async fn missing_ids_report_the_id_in_the_reason() {
        let mut service = MockCountryService::new();
        service
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(None));

        let err = find_country_or_not_found(&service, CountryId::new(42))
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), COUNTRY_NOT_FOUND);
        assert_eq!(err.reason(), Some("Country with id = [42] not found"));
    }

    #[rstest]
    #[case(Some("France"), None, "France", "JP")]
    #[case(None, Some("FR"), "Japan", "FR")]
    #[case(None, None, "Japan", "JP")]
    #[tokio::test]
    async fn update_checks_the_merged_candidate(
        #[case] name: Option<&'static str>,
        #[case] code: Option<&'static str>,
        #[case] probed_name: &'static str,
        #[case] probed_code: &'static str,
    ) {
        let mut service = MockCountryService::new();
        service
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(Some(japan())));
        service
            .expect_exists_by_name_or_code_excluding()
            .withf(move |n, c, excluded| {
                n == probed_name && c == probed_code && *excluded == CountryId::new(1)
            })
            .times(1)
            .return_once(|_, _, _| Ok(true));
        service.expect_update().times(0);

        let patch = CountryPatch::new(name.map(str::to_owned), code.map(str::to_owned));
        let err = update_country(&service, CountryId::new(1), patch)
            .await
            .expect_err("collision");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn update_of_missing_country_never_probes_uniqueness() {
        let mut service = MockCountryService::new();
        service
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(None));
        service.expect_exists_by_name_or_code_excluding().times(0);

        let err = update_country(&service, CountryId::new(9), CountryPatch::default())
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn delete_resolves_before_removing() {
        let mut service = MockCountryService::new();
        service
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(Some(japan())));
        service
            .expect_delete()
            .withf(|existing| existing.id == CountryId::new(1))
            .times(1)
            .return_once(|_| Ok(()));

        delete_country(&service, CountryId::new(1))
            .await
            .expect("deleted");
    }
}
