//! Direct-call tests for the gRPC adapter.

use mockable::DefaultClock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::CountryDomainService;
use crate::outbound::memory::InMemoryCountryRepository;

#[fixture]
fn service() -> GrpcCountryService {
    let domain = CountryDomainService::new(
        Arc::new(InMemoryCountryRepository::default()),
        Arc::new(DefaultClock),
    );
    GrpcCountryService::new(Arc::new(domain), Arc::from("1.0"))
}

async fn add(service: &GrpcCountryService, name: &str, code: &str) -> Result<CountryResponse, Status> {
    service
        .add(Request::new(AddCountryRequest {
            name: Some(name.to_owned()),
            code: Some(code.to_owned()),
        }))
        .await
        .map(Response::into_inner)
}

fn envelope_of(status: &Status) -> ApiError {
    serde_json::from_slice(status.details()).expect("envelope in details")
}

#[rstest]
#[tokio::test]
async fn add_then_find(service: GrpcCountryService) {
    let created = add(&service, "Spain", "SP").await.expect("created");
    assert_eq!(created.id, 1);
    assert_eq!(created.date_created, created.date_updated);

    let found = service
        .find_by_id(Request::new(IdRequest { id: 1 }))
        .await
        .expect("found")
        .into_inner();
    assert_eq!(found.name, "Spain");
}

#[rstest]
#[tokio::test]
async fn duplicate_add_is_already_exists(service: GrpcCountryService) {
    add(&service, "Japan", "JP").await.expect("created");
    let status = add(&service, "Japan", "JP").await.expect_err("duplicate");

    assert_eq!(status.code(), Code::AlreadyExists);
    assert_eq!(status.message(), "Country already exists");
    let envelope = envelope_of(&status);
    assert_eq!(envelope.error.code, "409 CONFLICT");
    assert_eq!(envelope.error.errors[0].domain, ADD);
}

#[rstest]
#[tokio::test]
async fn invalid_add_is_invalid_argument(service: GrpcCountryService) {
    let status = add(&service, "Jp", "J").await.expect_err("invalid");
    assert_eq!(status.code(), Code::InvalidArgument);
    assert_eq!(envelope_of(&status).error.errors.len(), 2);
}

#[rstest]
#[case::missing(None, &[("NotBlank", "must not be blank")])]
#[case::empty(
    Some(""),
    &[("NotBlank", "must not be blank"), ("Size", "invalid country code")]
)]
#[tokio::test]
async fn absent_and_empty_codes_are_reported_differently(
    service: GrpcCountryService,
    #[case] code: Option<&str>,
    #[case] expected: &[(&str, &str)],
) {
    let status = service
        .add(Request::new(AddCountryRequest {
            name: Some("Spain".to_owned()),
            code: code.map(str::to_owned),
        }))
        .await
        .expect_err("invalid");

    assert_eq!(status.code(), Code::InvalidArgument);
    let envelope = envelope_of(&status);
    let reasons: Vec<_> = envelope
        .error
        .errors
        .iter()
        .map(|item| (item.reason.as_str(), item.message.as_str()))
        .collect();
    assert_eq!(reasons, expected);
}

#[rstest]
#[tokio::test]
async fn unknown_id_is_not_found(service: GrpcCountryService) {
    let status = service
        .find_by_id(Request::new(IdRequest { id: 3 }))
        .await
        .expect_err("missing");
    assert_eq!(status.code(), Code::NotFound);
    assert_eq!(
        envelope_of(&status).error.errors[0].reason,
        "Country with id = [3] not found"
    );
}

#[rstest]
#[case(2, 2)]
#[case(9, 3)]
#[tokio::test]
async fn random_countries_are_bounded_by_stock(
    service: GrpcCountryService,
    #[case] requested: u32,
    #[case] expected: usize,
) {
    for (name, code) in [("Spain", "SP"), ("Japan", "JP"), ("Peru", "PE")] {
        add(&service, name, code).await.expect("created");
    }
    let sample = service
        .random_countries(Request::new(CountRequest { count: requested }))
        .await
        .expect("sample")
        .into_inner()
        .countries;
    assert_eq!(sample.len(), expected);
    assert!(sample.iter().all(|c| (1..=3).contains(&c.id)));
}

#[rstest]
fn internal_errors_are_redacted_in_status() {
    let status = to_status("1.0", &Error::internal("pool exhausted"), FIND_BY_ID);
    assert_eq!(status.code(), Code::Internal);
    assert_eq!(status.message(), "Internal server error");
}
