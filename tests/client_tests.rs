//! HTTP-level tests for `RacingClient` against a mock Racing Drivers API.

use std::time::Duration;

use paddock::client::RacingClient;
use paddock::config::Config;
use paddock::error::RacingError;
use paddock::models::{DriverCreate, DriverUpdate, LapCreate, LapUpdate};
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn hamilton() -> serde_json::Value {
    json!({
        "id": "d1",
        "name": "Lewis Hamilton",
        "laps": [
            {"id": "l1", "lap_time": 85.4, "track": "Silverstone"},
            {"id": "l2", "lap_time": 86.2, "track": "Monza"}
        ]
    })
}

async fn client_for(server: &MockServer) -> RacingClient {
    RacingClient::with_base_url(server.uri()).expect("mock URI is valid")
}

#[tokio::test]
async fn list_drivers_decodes_nested_laps() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drivers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([hamilton()])))
        .expect(1)
        .mount(&server)
        .await;

    let drivers = assert_ok!(client_for(&server).await.list_drivers().await);

    assert_eq!(drivers.len(), 1);
    assert_eq!(drivers[0].name, "Lewis Hamilton");
    assert_eq!(drivers[0].laps.len(), 2);
    assert_eq!(drivers[0].laps[1].track, "Monza");
}

#[tokio::test]
async fn create_driver_posts_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/drivers"))
        .and(body_json(json!({"name": "Lando Norris"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "d2", "name": "Lando Norris", "laps": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let driver = assert_ok!(
        client_for(&server)
            .await
            .create_driver(&DriverCreate::new("Lando Norris"))
            .await
    );

    assert_eq!(driver.id.as_deref(), Some("d2"));
    assert!(driver.laps.is_empty());
}

#[tokio::test]
async fn create_driver_rejects_blank_name_without_calling_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = assert_err!(
        client_for(&server)
            .await
            .create_driver(&DriverCreate::new("   "))
            .await
    );
    assert!(matches!(err, RacingError::Validation(_)));
}

#[tokio::test]
async fn get_driver_not_found_carries_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drivers/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Driver not found"})))
        .mount(&server)
        .await;

    let err = assert_err!(client_for(&server).await.get_driver("missing").await);
    match err {
        RacingError::NotFound { detail } => assert_eq!(detail, "Driver not found"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn get_driver_rejects_unsafe_id() {
    let server = MockServer::start().await;
    let err = assert_err!(client_for(&server).await.get_driver("../admin").await);
    assert!(matches!(err, RacingError::Validation(_)));
}

#[tokio::test]
async fn update_driver_puts_new_name() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/drivers/d1"))
        .and(body_json(json!({"name": "Sir Lewis Hamilton"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "d1",
            "name": "Sir Lewis Hamilton",
            "laps": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let driver = assert_ok!(
        client_for(&server)
            .await
            .update_driver("d1", &DriverUpdate::new("Sir Lewis Hamilton"))
            .await
    );
    assert_eq!(driver.name, "Sir Lewis Hamilton");
}

#[tokio::test]
async fn delete_driver_returns_detail() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/drivers/d1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"detail": "Driver deleted"})))
        .expect(1)
        .mount(&server)
        .await;

    let detail = assert_ok!(client_for(&server).await.delete_driver("d1").await);
    assert_eq!(detail, "Driver deleted");
}

#[tokio::test]
async fn lap_crud_uses_nested_paths() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/drivers/d1/laps"))
        .and(body_json(json!({"lap_time": 84.9, "track": "Spa"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "l3", "lap_time": 84.9, "track": "Spa"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/drivers/d1/laps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "l3", "lap_time": 84.9, "track": "Spa"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/drivers/d1/laps/l3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "l3", "lap_time": 84.9, "track": "Spa"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/drivers/d1/laps/l3"))
        .and(body_json(json!({"lap_time": 83.0, "track": "Spa"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "l3", "lap_time": 83.0, "track": "Spa"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/drivers/d1/laps/l3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"detail": "Lap deleted"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;

    let lap = assert_ok!(client.create_lap("d1", &LapCreate::new(84.9, "Spa")).await);
    assert_eq!(lap.id.as_deref(), Some("l3"));

    let laps = assert_ok!(client.list_laps("d1").await);
    assert_eq!(laps, vec![lap.clone()]);

    let fetched = assert_ok!(client.get_lap("d1", "l3").await);
    assert_eq!(fetched, lap);

    let updated = assert_ok!(
        client
            .update_lap("d1", "l3", &LapUpdate::merged(&fetched, Some(83.0), None))
            .await
    );
    assert_eq!(updated.lap_time, 83.0);

    let detail = assert_ok!(client.delete_lap("d1", "l3").await);
    assert_eq!(detail, "Lap deleted");
}

#[tokio::test]
async fn lap_under_wrong_driver_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drivers/d2/laps/l1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Lap not found"})))
        .mount(&server)
        .await;

    let err = assert_err!(client_for(&server).await.get_lap("d2", "l1").await);
    assert!(err.is_not_found());
    assert!(err.to_string().contains("Lap not found"));
}

#[tokio::test]
async fn create_lap_rejects_non_positive_time() {
    let server = MockServer::start().await;
    let err = assert_err!(
        client_for(&server)
            .await
            .create_lap("d1", &LapCreate::new(-3.0, "Spa"))
            .await
    );
    assert!(matches!(err, RacingError::Validation(_)));
}

#[tokio::test]
async fn unprocessable_entity_is_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/drivers/d1/laps"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [
                {"loc": ["body", "track"], "msg": "Field required", "type": "missing"}
            ]
        })))
        .mount(&server)
        .await;

    let err = assert_err!(
        client_for(&server)
            .await
            .create_lap("d1", &LapCreate::new(80.0, "Imola"))
            .await
    );
    match err {
        RacingError::Unprocessable { issues } => {
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].location, "body.track");
            assert_eq!(issues[0].message, "Field required");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn server_error_is_transient_and_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drivers"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .expect(1)
        .mount(&server)
        .await;

    let err = assert_err!(client_for(&server).await.list_drivers().await);
    assert!(err.is_transient());
    assert!(matches!(err, RacingError::HttpStatus { ref body, .. } if body == "upstream down"));
}

#[tokio::test]
async fn bearer_token_is_sent_and_redacted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drivers/d1"))
        .and(header("authorization", "Bearer pit-wall-42"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "token pit-wall-42 is not allowed"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = assert_ok!(Config::new(server.uri(), Some("pit-wall-42".to_string())));
    let client = assert_ok!(RacingClient::new(&config));

    let err = assert_err!(client.get_driver("d1").await);
    let message = err.to_string();
    assert!(!message.contains("pit-wall-42"));
    assert!(message.contains("[REDACTED]"));
}

#[tokio::test]
async fn unexpected_success_body_is_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drivers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = assert_err!(client_for(&server).await.list_drivers().await);
    assert!(matches!(err, RacingError::Serialization(_)));
}

#[tokio::test]
async fn test_connection_reports_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drivers"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "database locked"})))
        .mount(&server)
        .await;

    let err = assert_err!(client_for(&server).await.test_connection().await);
    assert!(matches!(err, RacingError::ConnectionTest { .. }));
    assert!(err.to_string().contains("database locked"));
}

#[tokio::test]
async fn test_connection_succeeds_on_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drivers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert_ok!(client_for(&server).await.test_connection().await);
}

#[tokio::test]
async fn success_body_containing_token_is_returned_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drivers/d1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "d1",
            "name": "Lewis Hamilton",
            "laps": [{"id": "l1", "lap_time": 85.42, "track": "Hamilton Street Circuit"}]
        })))
        .expect(2)
        .mount(&server)
        .await;

    for token in ["Hamilton", "42"] {
        let config = assert_ok!(Config::new(server.uri(), Some(token.to_string())));
        let client = assert_ok!(RacingClient::new(&config));

        let driver = assert_ok!(client.get_driver("d1").await);
        assert_eq!(driver.name, "Lewis Hamilton");
        assert_eq!(driver.laps[0].lap_time, 85.42);
        assert_eq!(driver.laps[0].track, "Hamilton Street Circuit");
    }
}

#[tokio::test]
async fn slow_response_maps_to_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drivers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let mut config = assert_ok!(Config::new(server.uri(), None));
    config.timeout = Duration::from_secs(1);
    let client = assert_ok!(RacingClient::new(&config));

    let err = assert_err!(client.list_drivers().await);
    match &err {
        RacingError::Timeout {
            duration,
            operation,
        } => {
            assert_eq!(*duration, Duration::from_secs(1));
            assert_eq!(operation, "GET /drivers");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_transient());
}
