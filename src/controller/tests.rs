use super::*;

use std::sync::Mutex;

use httptest::{all_of, cycle, matchers::*, responders::*, Expectation, Server};

use crate::config::ANIMATION_DURATION;
use crate::error_handling::ErrorType;
use crate::geocode::GeocodeStatus;

const GEOCODE_PATH: &str = "/maps/api/geocode/json";

/// Map view that records every animation instruction.
#[derive(Default)]
struct RecordingMap {
    calls: Mutex<Vec<(Region, Duration)>>,
}

impl RecordingMap {
    fn calls(&self) -> Vec<(Region, Duration)> {
        self.calls.lock().unwrap().clone()
    }
}

impl MapView for RecordingMap {
    fn animate_to_region(&self, region: &Region, duration: Duration) {
        self.calls.lock().unwrap().push((*region, duration));
    }
}

fn test_config(server: &Server) -> Config {
    Config {
        api_key: "test-key".to_string(),
        endpoint: server.url(GEOCODE_PATH).to_string(),
        timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

fn controller_for(
    config: Config,
) -> (LocationSearchController<Arc<RecordingMap>>, Arc<RecordingMap>) {
    let http = Arc::new(
        reqwest::Client::builder()
            .build()
            .expect("Failed to create HTTP client"),
    );
    let client = GeocodingClient::new(http, &config).expect("valid test config");
    let map = Arc::new(RecordingMap::default());
    (
        LocationSearchController::new(client, Arc::clone(&map), &config),
        map,
    )
}

fn ok_body(lat: f64, lng: f64) -> serde_json::Value {
    serde_json::json!({
        "status": "OK",
        "results": [{"geometry": {"location": {"lat": lat, "lng": lng}}}]
    })
}

macro_rules! address_is {
    ($address:expr) => {
        all_of![
            request::method_path("GET", GEOCODE_PATH),
            request::query(url_decoded(contains(("address", $address)))),
        ]
    };
}

#[tokio::test]
async fn test_blank_input_is_noop() {
    // No expectations: any request would fail the server's verification on drop
    let server = Server::run();
    let (controller, map) = controller_for(test_config(&server));
    let before = controller.current_region();

    for raw in ["", "   ", "\t\n", " \u{00a0} "] {
        let result = controller.search(raw).await;
        assert!(matches!(result, Err(SearchError::EmptyQuery)));
        assert!(controller.submit(raw).await.is_none());
    }

    assert_eq!(controller.current_region(), before);
    assert_eq!(controller.latest_sequence(), 0);
    assert!(map.calls().is_empty());
    assert_eq!(
        controller.stats().get_info_count(InfoType::EmptyQueryIgnored),
        8
    );
}

#[tokio::test]
async fn test_sao_paulo_to_rio_scenario() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            address_is!("Rio de Janeiro"),
            request::query(url_decoded(contains(("key", "test-key")))),
        ])
        .respond_with(json_encoded(ok_body(-22.9068, -43.1729))),
    );

    let (controller, map) = controller_for(test_config(&server));
    assert_eq!(controller.current_region(), Region::default());

    let region = controller.search("Rio de Janeiro").await.unwrap();

    let expected = Region::new(-22.9068, -43.1729, 0.05, 0.05).unwrap();
    assert_eq!(region, expected);
    assert_eq!(controller.current_region(), expected);
    assert_eq!(map.calls(), vec![(expected, ANIMATION_DURATION)]);
    assert_eq!(controller.marker().coordinate, expected.center());
    assert_eq!(
        controller.stats().get_info_count(InfoType::RegionPublished),
        1
    );
}

#[tokio::test]
async fn test_padded_and_plain_queries_send_identical_requests() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            address_is!("Paris"),
            request::query(url_decoded(contains(("key", "test-key")))),
        ])
        .times(2)
        .respond_with(json_encoded(ok_body(48.8566, 2.3522))),
    );

    let (controller, _map) = controller_for(test_config(&server));
    let padded = controller.search(" Paris ").await.unwrap();
    let plain = controller.search("Paris").await.unwrap();
    assert_eq!(padded, plain);
}

#[tokio::test]
async fn test_first_result_wins_with_fixed_zoom() {
    let server = Server::run();
    server.expect(
        Expectation::matching(address_is!("Springfield")).respond_with(json_encoded(
            serde_json::json!({
                "status": "OK",
                "results": [
                    {"geometry": {"location": {"lat": 39.7817, "lng": -89.6501}}},
                    {"geometry": {"location": {"lat": 37.2090, "lng": -93.2923}}}
                ]
            }),
        )),
    );

    let (controller, _map) = controller_for(test_config(&server));
    let region = controller.search("Springfield").await.unwrap();
    assert_eq!(region.latitude(), 39.7817);
    assert_eq!(region.longitude(), -89.6501);
    assert_eq!(region.latitude_delta(), 0.05);
    assert_eq!(region.longitude_delta(), 0.05);
}

#[tokio::test]
async fn test_zero_results_preserves_region() {
    let server = Server::run();
    server.expect(
        Expectation::matching(address_is!("Atlantis"))
            .respond_with(json_encoded(
                serde_json::json!({"status": "ZERO_RESULTS", "results": []}),
            )),
    );

    let (controller, map) = controller_for(test_config(&server));
    let before = controller.current_region();

    let err = controller.search("Atlantis").await.unwrap_err();
    assert!(matches!(
        err,
        SearchError::NotFound {
            status: GeocodeStatus::ZeroResults,
            ..
        }
    ));
    assert_eq!(controller.current_region(), before);
    assert!(map.calls().is_empty());
    assert_eq!(
        controller
            .stats()
            .get_error_count(ErrorType::GeocodeZeroResults),
        1
    );
}

#[tokio::test]
async fn test_transport_failure_preserves_region() {
    let server = Server::run();
    server.expect(
        Expectation::matching(address_is!("Paris")).respond_with(status_code(502)),
    );

    let (controller, map) = controller_for(test_config(&server));
    let before = controller.current_region();

    assert!(controller.submit("Paris").await.is_none());
    assert_eq!(controller.current_region(), before);
    assert!(map.calls().is_empty());
    assert_eq!(
        controller
            .stats()
            .get_error_count(ErrorType::HttpRequestServerError),
        1
    );
}

#[tokio::test]
async fn test_unreachable_service_preserves_region() {
    // Port 9 (discard) on localhost is closed in test environments
    let config = Config {
        api_key: "k".to_string(),
        endpoint: "http://127.0.0.1:9/geocode/json".to_string(),
        timeout: Duration::from_secs(5),
        ..Default::default()
    };
    let http = Arc::new(reqwest::Client::new());
    let client = GeocodingClient::new(http, &config).unwrap();
    let controller = LocationSearchController::new(client, RecordingMap::default(), &config);

    let err = controller.search("Paris").await.unwrap_err();
    assert!(matches!(err, SearchError::Transport(_)));
    assert_eq!(controller.current_region(), Region::default());
}

#[tokio::test]
async fn test_malformed_body_preserves_region() {
    let server = Server::run();
    server.expect(
        Expectation::matching(address_is!("Paris"))
            .respond_with(status_code(200).body(r#"{"status": "OK", "results": [{"#)),
    );

    let (controller, _map) = controller_for(test_config(&server));
    let err = controller.search("Paris").await.unwrap_err();
    assert!(matches!(err, SearchError::Decode(_)));
    assert_eq!(controller.current_region(), Region::default());
}

#[tokio::test]
async fn test_out_of_range_candidate_not_published() {
    let server = Server::run();
    server.expect(
        Expectation::matching(address_is!("Nowhere"))
            .respond_with(json_encoded(ok_body(123.0, 10.0))),
    );

    let (controller, map) = controller_for(test_config(&server));
    let err = controller.search("Nowhere").await.unwrap_err();
    assert!(matches!(err, SearchError::InvalidRegion(_)));
    assert_eq!(controller.current_region(), Region::default());
    assert!(map.calls().is_empty());
}

#[tokio::test]
async fn test_stale_response_arriving_last_is_discarded() {
    let server = Server::run();
    server.expect(
        Expectation::matching(address_is!("Lisboa")).respond_with(delay_and_then(
            Duration::from_millis(400),
            json_encoded(ok_body(38.7223, -9.1393)),
        )),
    );
    server.expect(
        Expectation::matching(address_is!("Porto"))
            .respond_with(json_encoded(ok_body(41.1579, -8.6291))),
    );

    let (controller, map) = controller_for(test_config(&server));
    let (first, second) = tokio::join!(controller.search("Lisboa"), controller.search("Porto"));

    assert!(matches!(
        first,
        Err(SearchError::Superseded {
            sequence: 1,
            latest: 2
        })
    ));
    let porto = second.unwrap();
    assert_eq!(controller.current_region(), porto);
    assert_eq!(map.calls(), vec![(porto, ANIMATION_DURATION)]);
    assert_eq!(
        controller
            .stats()
            .get_info_count(InfoType::StaleResponseDiscarded),
        1
    );
}

#[tokio::test]
async fn test_older_response_arriving_first_is_discarded() {
    let server = Server::run();
    server.expect(
        Expectation::matching(address_is!("Lisboa"))
            .respond_with(json_encoded(ok_body(38.7223, -9.1393))),
    );
    server.expect(
        Expectation::matching(address_is!("Porto")).respond_with(delay_and_then(
            Duration::from_millis(300),
            json_encoded(ok_body(41.1579, -8.6291)),
        )),
    );

    let (controller, map) = controller_for(test_config(&server));
    let (first, second) = tokio::join!(controller.search("Lisboa"), controller.search("Porto"));

    assert!(matches!(first, Err(SearchError::Superseded { .. })));
    let porto = second.unwrap();
    assert_eq!(controller.current_region(), porto);
    assert_eq!(map.calls().len(), 1);
}

#[tokio::test]
async fn test_timeout_preserves_region() {
    let server = Server::run();
    server.expect(
        Expectation::matching(address_is!("Paris")).respond_with(delay_and_then(
            Duration::from_secs(2),
            json_encoded(ok_body(48.8566, 2.3522)),
        )),
    );

    let config = Config {
        timeout: Duration::from_millis(100),
        ..test_config(&server)
    };
    let (controller, map) = controller_for(config);

    let err = controller.search("Paris").await.unwrap_err();
    assert!(matches!(err, SearchError::Timeout(d) if d == Duration::from_millis(100)));
    assert_eq!(controller.current_region(), Region::default());
    assert!(map.calls().is_empty());
    assert_eq!(
        controller.stats().get_error_count(ErrorType::SearchTimeout),
        1
    );
}

#[tokio::test]
async fn test_shutdown_cancels_in_flight_search() {
    let server = Server::run();
    server.expect(
        Expectation::matching(address_is!("Paris"))
            .times(..)
            .respond_with(delay_and_then(
                Duration::from_secs(1),
                json_encoded(ok_body(48.8566, 2.3522)),
            )),
    );

    let (controller, map) = controller_for(test_config(&server));
    let (result, _) = tokio::join!(controller.search("Paris"), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.shutdown();
    });

    assert!(matches!(result, Err(SearchError::Cancelled)));
    assert!(controller.is_shut_down());
    assert_eq!(controller.current_region(), Region::default());
    assert!(map.calls().is_empty());
}

#[tokio::test]
async fn test_search_after_shutdown_sends_nothing() {
    let server = Server::run();
    let (controller, _map) = controller_for(test_config(&server));
    controller.shutdown();

    let err = controller.search("Paris").await.unwrap_err();
    assert!(matches!(err, SearchError::Cancelled));
    assert_eq!(controller.latest_sequence(), 0);
}

#[tokio::test]
async fn test_subscribers_see_replacement() {
    let server = Server::run();
    server.expect(
        Expectation::matching(address_is!("Rio de Janeiro"))
            .respond_with(json_encoded(ok_body(-22.9068, -43.1729))),
    );

    let (controller, _map) = controller_for(test_config(&server));
    let mut rx = controller.subscribe();
    assert_eq!(*rx.borrow(), Region::default());

    controller.submit("Rio de Janeiro").await.unwrap();

    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().latitude(), -22.9068);
}

#[tokio::test]
async fn test_custom_initial_region_and_animation_duration() {
    let server = Server::run();
    server.expect(
        Expectation::matching(address_is!("Paris"))
            .respond_with(json_encoded(ok_body(48.8566, 2.3522))),
    );

    let config = Config {
        animation_duration: Duration::from_millis(250),
        ..test_config(&server)
    };
    let http = Arc::new(reqwest::Client::new());
    let client = GeocodingClient::new(http, &config).unwrap();
    let map = Arc::new(RecordingMap::default());
    let initial = Region::new(51.5074, -0.1278, 1.0, 1.0).unwrap();
    let controller = LocationSearchController::with_region(client, Arc::clone(&map), &config, initial);

    assert_eq!(controller.current_region(), initial);
    controller.search("Paris").await.unwrap();
    assert_eq!(map.calls()[0].1, Duration::from_millis(250));
}

#[test]
fn test_from_config_requires_api_key() {
    let result = LocationSearchController::from_config(&Config::default(), RecordingMap::default());
    assert!(matches!(
        result,
        Err(InitializationError::MissingApiKeyError(_))
    ));
}

#[tokio::test]
async fn test_slow_attempt_is_retried_within_search_budget() {
    let server = Server::run();
    server.expect(
        Expectation::matching(address_is!("Paris"))
            .times(2)
            .respond_with(cycle![
                delay_and_then(Duration::from_secs(2), json_encoded(ok_body(0.0, 0.0))),
                json_encoded(ok_body(48.8566, 2.3522)),
            ]),
    );

    let config = Config {
        timeout: Duration::from_millis(300),
        max_retries: 1,
        ..test_config(&server)
    };
    let (controller, map) = controller_for(config);

    let region = controller.search("Paris").await.unwrap();
    assert_eq!(region.latitude(), 48.8566);
    assert_eq!(controller.current_region(), region);
    assert_eq!(map.calls().len(), 1);
    assert_eq!(controller.stats().get_error_count(ErrorType::SearchTimeout), 0);
}

#[tokio::test]
async fn test_publish_rejects_all_but_latest_sequence() {
    let server = Server::run();
    let (controller, map) = controller_for(test_config(&server));
    let mut rx = controller.subscribe();
    controller.issued.store(2, Ordering::SeqCst);

    let older = Region::new(1.0, 1.0, 0.05, 0.05).unwrap();
    let newer = Region::new(2.0, 2.0, 0.05, 0.05).unwrap();

    let err = controller.publish(1, older).unwrap_err();
    assert!(matches!(
        err,
        SearchError::Superseded {
            sequence: 1,
            latest: 2
        }
    ));
    assert_eq!(controller.current_region(), Region::default());
    assert!(!rx.has_changed().unwrap());

    assert_eq!(controller.publish(2, newer).unwrap(), newer);
    assert!(controller.publish(1, older).is_err());
    assert_eq!(controller.current_region(), newer);
    assert_eq!(map.calls().len(), 1);
    assert!(rx.has_changed().unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_publishes_keep_latest_region() {
    let server = Server::run();
    let (controller, _map) = controller_for(test_config(&server));
    let controller = Arc::new(controller);
    controller.issued.store(32, Ordering::SeqCst);

    let handles: Vec<_> = (1..=32u64)
        .map(|sequence| {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move {
                let region = Region::new(sequence as f64, 0.0, 0.05, 0.05).unwrap();
                controller.publish(sequence, region).is_ok()
            })
        })
        .collect();

    let mut published = 0;
    for handle in handles {
        if handle.await.unwrap() {
            published += 1;
        }
    }
    assert_eq!(published, 1);
    assert_eq!(controller.current_region().latitude(), 32.0);
}
