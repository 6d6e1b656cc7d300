/// Contract tests for the pricing pipeline
///
/// These tests decode the golden envelopes under `fixtures/` with the same
/// two-phase decode the consumer uses, so a change to a contract type that
/// breaks the wire format fails here first.
use event_bus::EventEnvelope;
use platform_contracts::{
    HealthStatus, MonitoredComponent, PriceCreatedV1, StatusReportV1, PRICE_CREATED,
};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

fn load_fixture(name: &str) -> Vec<u8> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name);
    fs::read(&path).unwrap_or_else(|_| panic!("Failed to read file: {:?}", path))
}

#[test]
fn test_price_created_example_decodes() {
    let envelope = EventEnvelope::decode(&load_fixture("price-created.v1.example.json"))
        .expect("fixture envelope should decode");

    assert_eq!(envelope.event_type, PRICE_CREATED);
    assert_eq!(envelope.version, PriceCreatedV1::VERSION);

    let event: PriceCreatedV1 = envelope.decode_payload().expect("payload should decode");
    assert_eq!(
        event.product_id,
        Uuid::parse_str("9b1deb4d-3b7d-4bad-9bdd-2b0d7b3dcb6d").unwrap()
    );
    assert_eq!(event.name, "Widget");
    assert_eq!(event.amount, 500);
    assert_eq!(event.currency, "USD");
}

#[test]
fn test_status_example_decodes() {
    let envelope = EventEnvelope::decode(&load_fixture("ping-cache-status.v1.example.json"))
        .expect("fixture envelope should decode");

    assert_eq!(
        MonitoredComponent::from_subject(&envelope.event_type),
        Some(MonitoredComponent::Cache)
    );
    assert_eq!(envelope.version, StatusReportV1::VERSION);

    let report: StatusReportV1 = envelope.decode_payload().expect("payload should decode");
    assert_eq!(report.status, HealthStatus::Down);
}

#[test]
fn test_fixtures_survive_reencoding() {
    for name in [
        "price-created.v1.example.json",
        "ping-cache-status.v1.example.json",
    ] {
        let envelope = EventEnvelope::decode(&load_fixture(name)).unwrap();
        let again = EventEnvelope::decode(&envelope.encode().unwrap()).unwrap();
        assert_eq!(again, envelope, "{} changed after re-encoding", name);
    }
}

#[test]
fn test_payloads_do_not_cross_decode() {
    let price = EventEnvelope::decode(&load_fixture("price-created.v1.example.json")).unwrap();
    let status = EventEnvelope::decode(&load_fixture("ping-cache-status.v1.example.json")).unwrap();

    assert!(price.decode_payload::<StatusReportV1>().is_err());
    assert!(status.decode_payload::<PriceCreatedV1>().is_err());
}
