use serde_json::json;
use spritmonitor_exporter::{CycleOutcome, CycleSummary};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::*;

#[tokio::test(flavor = "multi_thread")]
async fn toyota_yaris_scenario_sets_all_gauges() {
    // ---
    let server = MockServer::start().await;
    mount_upstream(&server, json!([yaris()]), &[(1, json!([yaris_fueling()]))]).await;
    let (collector, metrics) = collector_for(&server, Duration::from_secs(10));

    let outcome = collector.collect().await.expect("cycle succeeds");
    assert_eq!(
        outcome,
        CycleOutcome::Completed(CycleSummary {
            vehicles: 1,
            fuelings: 1
        })
    );

    let gauges = vehicle_gauges(&metrics.render());
    let expected = [
        (series("vehicle_consumption", &YARIS), 5.2),
        (series("vehicle_trip_sum", &YARIS), 1000.0),
        (series("vehicle_fuel_sum", &YARIS), 52.0),
        (series("vehicle_fueling_odometer", &YARIS_FUELING), 10000.0),
        (series("vehicle_fueling_trip", &YARIS_FUELING), 500.0),
        (series("vehicle_fueling_quantity", &YARIS_FUELING), 26.0),
        (series("vehicle_fueling_cost", &YARIS_FUELING), 40.5),
        (series("vehicle_fueling_consumption", &YARIS_FUELING), 5.2),
    ];
    for (key, value) in &expected {
        assert_eq!(gauges.get(key), Some(value), "{key} in {gauges:#?}");
    }
    assert_eq!(gauges.len(), expected.len());
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_numbers_are_published_as_zero() {
    // ---
    let mut vehicle = yaris();
    vehicle["consumption"] = json!("");
    vehicle["tripsum"] = json!("n/a");
    vehicle["quantitysum"] = json!(null);

    let server = MockServer::start().await;
    mount_upstream(&server, json!([vehicle]), &[(1, json!([]))]).await;
    let (collector, metrics) = collector_for(&server, Duration::from_secs(10));

    collector.collect().await.expect("cycle succeeds");

    let gauges = vehicle_gauges(&metrics.render());
    assert_eq!(gauges.get(&series("vehicle_consumption", &YARIS)), Some(&0.0));
    assert_eq!(gauges.get(&series("vehicle_trip_sum", &YARIS)), Some(&0.0));
    assert_eq!(gauges.get(&series("vehicle_fuel_sum", &YARIS)), Some(&0.0));
}

#[tokio::test(flavor = "multi_thread")]
async fn recollecting_unchanged_data_is_idempotent() {
    // ---
    let server = MockServer::start().await;
    mount_upstream(&server, json!([yaris()]), &[(1, json!([yaris_fueling()]))]).await;
    let (collector, metrics) = collector_for(&server, Duration::from_secs(10));

    collector.collect().await.unwrap();
    let first = vehicle_gauges(&metrics.render());
    collector.collect().await.unwrap();
    let second = vehicle_gauges(&metrics.render());

    assert_eq!(first, second);
}

#[tokio::test(flavor = "multi_thread")]
async fn vehicle_removed_upstream_keeps_stale_gauges() {
    // ---
    let server = MockServer::start().await;
    let (collector, metrics) = collector_for(&server, Duration::from_secs(10));

    mount_upstream(&server, json!([yaris()]), &[(1, json!([yaris_fueling()]))]).await;
    collector.collect().await.unwrap();

    server.reset().await;
    mount_upstream(&server, json!([]), &[]).await;
    let outcome = collector.collect().await.unwrap();
    assert_eq!(outcome, CycleOutcome::Completed(CycleSummary::default()));

    let gauges = vehicle_gauges(&metrics.render());
    assert_eq!(gauges.get(&series("vehicle_consumption", &YARIS)), Some(&5.2));
    assert_eq!(
        gauges.get(&series("vehicle_fueling_odometer", &YARIS_FUELING)),
        Some(&10000.0)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn hanging_fuelings_request_ends_the_cycle_within_timeout() {
    // ---
    let server = MockServer::start().await;
    mount_upstream(&server, json!([yaris()]), &[]).await;
    Mock::given(method("GET"))
        .and(path("/vehicle/1/fuelings.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    let (collector, metrics) = collector_for(&server, Duration::from_millis(500));

    let start = Instant::now();
    let err = collector.collect().await.unwrap_err();

    assert!(err.is_timeout(), "{err}");
    assert!(start.elapsed() < Duration::from_secs(3));

    // The vehicle was projected before its fuelings timed out.
    let gauges = vehicle_gauges(&metrics.render());
    assert_eq!(gauges.get(&series("vehicle_consumption", &YARIS)), Some(&5.2));

    let status = collector.status();
    assert!(status.last_error.is_some());
    assert!(status.last_success.is_none());
}
