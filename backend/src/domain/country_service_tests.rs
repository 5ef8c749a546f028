//! Tests for the country domain service.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Timelike, Utc};
use mockable::Clock;
use pagination::Page;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockCountryRepository;
use crate::domain::{CountrySortField, ErrorCode};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

#[fixture]
fn clock_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 20, 14, 0, 0)
        .single()
        .and_then(|ts| ts.with_nanosecond(987_654_321))
        .expect("valid fixture timestamp")
}

fn country(id: i64, name: &str, code: &str) -> Country {
    Country {
        id: CountryId::new(id),
        name: name.to_owned(),
        code: code.to_owned(),
        date_created: created_at(),
        date_updated: created_at(),
    }
}

fn make_service(
    repo: MockCountryRepository,
    utc_now: DateTime<Utc>,
) -> CountryDomainService<MockCountryRepository> {
    CountryDomainService::new(Arc::new(repo), Arc::new(FixtureClock { utc_now }))
}

#[rstest]
#[tokio::test]
async fn add_stamps_both_timestamps_at_millisecond_precision(clock_now: DateTime<Utc>) {
    let mut repo = MockCountryRepository::new();
    repo.expect_insert()
        .withf(|candidate, _| candidate.name == "Spain" && candidate.code == "SP")
        .times(1)
        .return_once(|candidate, stamped| {
            Ok(Country {
                id: CountryId::new(1),
                name: candidate.name.clone(),
                code: candidate.code.clone(),
                date_created: stamped,
                date_updated: stamped,
            })
        });

    let service = make_service(repo, clock_now);
    let stored = service
        .add(NewCountry::new("Spain", "SP"))
        .await
        .expect("add succeeds");

    assert_eq!(stored.id, CountryId::new(1));
    assert_eq!(stored.date_created, stored.date_updated);
    assert_eq!(stored.date_created.nanosecond(), 987_000_000);
}

#[rstest]
#[tokio::test]
async fn existence_checks_forward_the_exclusion(clock_now: DateTime<Utc>) {
    let mut repo = MockCountryRepository::new();
    repo.expect_exists_by_name_or_code()
        .withf(|name, code, excluding| name == "Japan" && code == "JP" && excluding.is_none())
        .times(1)
        .return_once(|_, _, _| Ok(true));
    repo.expect_exists_by_name_or_code()
        .withf(|_, _, excluding| *excluding == Some(CountryId::new(7)))
        .times(1)
        .return_once(|_, _, _| Ok(false));

    let service = make_service(repo, clock_now);
    assert!(
        service
            .exists_by_name_or_code("Japan", "JP")
            .await
            .expect("probe succeeds")
    );
    assert!(
        !service
            .exists_by_name_or_code_excluding("Japan", "JP", CountryId::new(7))
            .await
            .expect("probe succeeds")
    );
}

#[rstest]
#[tokio::test]
async fn find_all_builds_the_predicate_from_the_filter(clock_now: DateTime<Utc>) {
    let mut repo = MockCountryRepository::new();
    repo.expect_find_matching()
        .withf(|spec, request| {
            spec.clauses().len() == 1
                && spec.clauses()[0].needle() == "an"
                && request.sort.field == CountrySortField::Id
        })
        .times(1)
        .return_once(|_, request| {
            Ok(Page::new(
                vec![country(1, "Japan", "JP"), country(2, "France", "FR")],
                request.page,
                2,
            ))
        });

    let service = make_service(repo, clock_now);
    let page = service
        .find_all(
            CountryFilter::new(Some("AN".to_owned()), None),
            CountryPageRequest::default(),
        )
        .await
        .expect("list succeeds");

    assert_eq!(page.total_items, 2);
    assert_eq!(page.pages, 1);
    assert_eq!(page.items_per_page, 10);
}

#[rstest]
#[tokio::test]
async fn update_merges_and_restamps(clock_now: DateTime<Utc>) {
    let mut repo = MockCountryRepository::new();
    repo.expect_save()
        .withf(|merged| merged.name == "Japan" && merged.code == "JPN")
        .times(1)
        .return_once(|merged| Ok(merged.clone()));

    let service = make_service(repo, clock_now);
    let updated = service
        .update(
            country(3, "Japan", "JP"),
            CountryPatch::new(None, Some("JPN".to_owned())),
        )
        .await
        .expect("update succeeds");

    assert_eq!(updated.id, CountryId::new(3));
    assert_eq!(updated.date_created, created_at());
    assert!(updated.date_updated >= updated.date_created);
    assert_eq!(updated.date_updated.nanosecond(), 987_000_000);
}

#[rstest]
#[tokio::test]
async fn delete_removes_by_id(clock_now: DateTime<Utc>) {
    let mut repo = MockCountryRepository::new();
    repo.expect_delete()
        .withf(|id| *id == CountryId::new(4))
        .times(1)
        .return_once(|_| Ok(()));

    let service = make_service(repo, clock_now);
    service
        .delete(country(4, "Peru", "PE"))
        .await
        .expect("delete succeeds");
}

#[rstest]
#[case(CountryRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(CountryRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[case(CountryRepositoryError::conflict("countries_lower_name_key"), ErrorCode::Conflict)]
#[tokio::test]
async fn repository_errors_map_to_domain_codes(
    clock_now: DateTime<Utc>,
    #[case] failure: CountryRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockCountryRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Err(failure));

    let service = make_service(repo, clock_now);
    let err = service
        .find_by_id(CountryId::new(1))
        .await
        .expect_err("repository failure propagates");
    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn storage_conflict_reads_like_the_domain_conflict(clock_now: DateTime<Utc>) {
    let mut repo = MockCountryRepository::new();
    repo.expect_insert()
        .times(1)
        .return_once(|_, _| Err(CountryRepositoryError::conflict("duplicate key")));

    let service = make_service(repo, clock_now);
    let err = service
        .add(NewCountry::new("Spain", "SP"))
        .await
        .expect_err("conflict");
    assert_eq!(err.message(), "Country already exists");
}

#[rstest]
#[case(2, 2)]
#[case(3, 3)]
#[case(10, 3)]
#[case(0, 0)]
#[tokio::test]
async fn sample_returns_a_subset_of_all_rows(
    clock_now: DateTime<Utc>,
    #[case] requested: usize,
    #[case] expected_len: usize,
) {
    let rows = vec![
        country(1, "Japan", "JP"),
        country(2, "France", "FR"),
        country(3, "Peru", "PE"),
    ];
    let ids: HashSet<CountryId> = rows.iter().map(|c| c.id).collect();
    let mut repo = MockCountryRepository::new();
    repo.expect_find_all().times(1).return_once(move || Ok(rows));

    let service = make_service(repo, clock_now);
    let sample = service.sample(requested).await.expect("sample succeeds");

    assert_eq!(sample.len(), expected_len);
    let unique: HashSet<CountryId> = sample.iter().map(|c| c.id).collect();
    assert_eq!(unique.len(), expected_len);
    assert!(unique.is_subset(&ids));
}
