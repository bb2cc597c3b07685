//! Integration tests for the transit client (wiremock-based)

use std::time::Duration;

use chrono::{TimeZone, Utc};
use domain::{DepartureQuery, LineType, TransportTypes};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_transit::{
    HafasTransitClient, InvalidRecordPolicy, TransitClient, TransitConfig, TransitError,
};

fn config_for_mock(base_url: &str) -> TransitConfig {
    TransitConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        max_results: 15,
        cache_ttl_secs: 0,
        ..TransitConfig::default()
    }
}

const fn sample_departures_json() -> &'static str {
    r##"{
        "departures": [
            {
                "tripId": "1|1001|0|86|1012024",
                "stop": { "type": "stop", "id": "900058101", "name": "S Südkreuz Bhf (Berlin)" },
                "when": "2024-01-01T10:05:00+01:00",
                "plannedWhen": "2024-01-01T10:04:00+01:00",
                "delay": 60,
                "direction": "Ringbahn S41 ⟳",
                "line": { "name": "S41", "product": "suburban" },
                "currentTripPosition": { "latitude": 52.47, "longitude": 13.36 },
                "cancelled": false
            },
            {
                "tripId": "1|1002|0|86|1012024",
                "stop": { "type": "stop", "id": "900058100", "name": "S Südkreuz Bhf (Berlin) [Bus]" },
                "when": null,
                "plannedWhen": "2024-01-01T10:07:00+01:00",
                "direction": "U Alt-Mariendorf",
                "line": { "name": "M46", "product": "bus", "color": { "fg": "#fff", "bg": "#a5027d" } },
                "cancelled": true
            }
        ],
        "realtimeDataUpdatedAt": 1704099900
    }"##
}

const fn sample_locations_json() -> &'static str {
    r#"[
        { "type": "stop", "id": "900100003", "name": "S+U Alexanderplatz" },
        { "type": "location", "id": "980001", "name": "Alexanderplatz 1, Berlin" },
        { "type": "stop", "id": "900100024", "name": "S+U Alexanderplatz/Dircksenstr." }
    ]"#
}

#[tokio::test]
async fn test_fetch_departures_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stops/900058101/departures"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_departures_json()))
        .mount(&server)
        .await;

    let client = HafasTransitClient::new(&config_for_mock(&server.uri())).unwrap();
    let departures = client
        .fetch_departures(&DepartureQuery::new("900058101"))
        .await
        .unwrap();

    assert_eq!(departures.len(), 2);

    let ring = &departures[0];
    assert_eq!(ring.line_name(), "S41");
    assert_eq!(ring.line_type(), LineType::Suburban);
    assert_eq!(ring.time(), "10:05");
    assert_eq!(ring.delay(), Some(60));
    assert_eq!(ring.bg_color(), Some("#ad5937"));

    let bus = &departures[1];
    assert_eq!(bus.time(), "10:07");
    assert_eq!(bus.icon(), "mdi:bus");
    assert_eq!(bus.bg_color(), Some("#a5027d"));
    assert!(bus.is_cancelled());
    assert!(bus.location().is_unknown());
}

#[tokio::test]
async fn test_fetch_departures_sends_query_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stops/900100003/departures"))
        .and(query_param("when", "2024-01-01T09:05:00Z"))
        .and(query_param("direction", "900100001"))
        .and(query_param("duration", "20"))
        .and(query_param("results", "15"))
        .and(query_param("subway", "true"))
        .and(query_param("bus", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{ "departures": [] }"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = HafasTransitClient::new(&config_for_mock(&server.uri())).unwrap();
    let mut query = DepartureQuery::new("900100003").with_direction(Some("900100001".into()));
    query.walking_time = 5;
    query.duration = Some(20);
    query.transport_types = TransportTypes::only(&[LineType::Subway]);

    let now = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    let departures = client.fetch_departures_at(&query, now).await.unwrap();
    assert!(departures.is_empty());
}

#[tokio::test]
async fn test_fetch_departures_bare_array() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stops/900100003/departures"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{ "tripId": "t1", "when": "2024-01-01T10:05:00+01:00", "line": { "name": "U2", "product": "subway" } }]"#,
        ))
        .mount(&server)
        .await;

    let client = HafasTransitClient::new(&config_for_mock(&server.uri())).unwrap();
    let departures = client
        .fetch_departures(&DepartureQuery::new("900100003"))
        .await
        .unwrap();

    assert_eq!(departures.len(), 1);
    assert_eq!(departures[0].line_type(), LineType::Subway);
}

#[tokio::test]
async fn test_fetch_departures_drops_excluded_stops() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stops/900058101/departures"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_departures_json()))
        .mount(&server)
        .await;

    let client = HafasTransitClient::new(&config_for_mock(&server.uri())).unwrap();
    let mut query = DepartureQuery::new("900058101");
    query.excluded_stops = vec!["900058100".to_string()];

    let departures = client.fetch_departures(&query).await.unwrap();
    assert_eq!(departures.len(), 1);
    assert_eq!(departures[0].line_name(), "S41");
}

#[tokio::test]
async fn test_fetch_departures_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stops/900100003/departures"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = HafasTransitClient::new(&config_for_mock(&server.uri())).unwrap();
    let err = client
        .fetch_departures(&DepartureQuery::new("900100003"))
        .await
        .unwrap_err();

    assert!(matches!(err, TransitError::RequestFailed(_)));
    assert!(!err.is_data_failure());
}

#[tokio::test]
async fn test_fetch_departures_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stops/900100003/departures"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{ "departures": [] }"#)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = TransitConfig {
        timeout_secs: 1,
        ..config_for_mock(&server.uri())
    };
    let client = HafasTransitClient::new(&config).unwrap();
    let err = client
        .fetch_departures(&DepartureQuery::new("900100003"))
        .await
        .unwrap_err();

    assert!(matches!(err, TransitError::Timeout { timeout_secs: 1 }));
    assert!(!err.is_data_failure());
}

#[tokio::test]
async fn test_fetch_departures_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stops/900100003/departures"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&server)
        .await;

    let client = HafasTransitClient::new(&config_for_mock(&server.uri())).unwrap();
    let err = client
        .fetch_departures(&DepartureQuery::new("900100003"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TransitError::RateLimitExceeded {
            retry_after_secs: Some(30)
        }
    ));
}

#[tokio::test]
async fn test_fetch_departures_invalid_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stops/900100003/departures"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = HafasTransitClient::new(&config_for_mock(&server.uri())).unwrap();
    let err = client
        .fetch_departures(&DepartureQuery::new("900100003"))
        .await
        .unwrap_err();

    assert!(matches!(err, TransitError::ParseError(_)));
    assert!(err.is_data_failure());
}

#[tokio::test]
async fn test_invalid_record_policy() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stops/900100003/departures"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{ "departures": [
                { "tripId": "t1", "when": "2024-01-01T10:05:00+01:00" },
                { "tripId": "t2" }
            ] }"#,
        ))
        .mount(&server)
        .await;

    let abort = HafasTransitClient::new(&config_for_mock(&server.uri())).unwrap();
    let err = abort
        .fetch_departures(&DepartureQuery::new("900100003"))
        .await
        .unwrap_err();
    assert!(matches!(err, TransitError::InvalidRecord(_)));

    let skip_config = TransitConfig {
        on_invalid_record: InvalidRecordPolicy::Skip,
        ..config_for_mock(&server.uri())
    };
    let skip = HafasTransitClient::new(&skip_config).unwrap();
    let departures = skip
        .fetch_departures(&DepartureQuery::new("900100003"))
        .await
        .unwrap();
    assert_eq!(departures.len(), 1);
    assert_eq!(departures[0].trip_id(), "t1");
}

#[tokio::test]
async fn test_successful_responses_are_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stops/900100003/departures"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{ "departures": [] }"#))
        .expect(1)
        .mount(&server)
        .await;

    let config = TransitConfig {
        cache_ttl_secs: 300,
        ..config_for_mock(&server.uri())
    };
    let client = HafasTransitClient::new(&config).unwrap();
    let query = DepartureQuery::new("900100003");
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();

    client.fetch_departures_at(&query, now).await.unwrap();
    client.fetch_departures_at(&query, now).await.unwrap();
}

#[tokio::test]
async fn test_failed_responses_are_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stops/900100003/departures"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let config = TransitConfig {
        cache_ttl_secs: 300,
        ..config_for_mock(&server.uri())
    };
    let client = HafasTransitClient::new(&config).unwrap();
    let query = DepartureQuery::new("900100003");
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();

    assert!(client.fetch_departures_at(&query, now).await.is_err());
    assert!(client.fetch_departures_at(&query, now).await.is_err());
}

#[tokio::test]
async fn test_connection_refused() {
    let config = config_for_mock("http://127.0.0.1:9");
    let client = HafasTransitClient::new(&config).unwrap();

    let err = client
        .fetch_departures(&DepartureQuery::new("900100003"))
        .await
        .unwrap_err();
    assert!(matches!(err, TransitError::ConnectionFailed(_)));
}

#[tokio::test]
async fn test_search_stops_by_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/locations"))
        .and(query_param("query", "Alexanderplatz"))
        .and(query_param("results", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_locations_json()))
        .mount(&server)
        .await;

    let client = HafasTransitClient::new(&config_for_mock(&server.uri())).unwrap();

    let stops = client.search_stops("Alexanderplatz", 5).await.unwrap();
    assert_eq!(stops.len(), 2);
    assert_eq!(stops[0].id, "900100003");
    assert_eq!(stops[0].label(), "S+U Alexanderplatz [900100003]");
    assert_eq!(stops[1].id, "900100024");
}

#[tokio::test]
async fn test_search_stops_empty_query() {
    let client = HafasTransitClient::new(&TransitConfig::for_testing()).unwrap();

    let result = client.search_stops("  ", 5).await;
    assert!(matches!(result, Err(TransitError::InvalidQuery(_))));
}

#[tokio::test]
async fn test_is_healthy() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let client = HafasTransitClient::new(&config_for_mock(&server.uri())).unwrap();
    assert!(client.is_healthy().await);

    let offline = HafasTransitClient::new(&config_for_mock("http://127.0.0.1:9")).unwrap();
    assert!(!offline.is_healthy().await);
}
