// Tests for `RobotClient` against a wiremock server.

use serde_json::json;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use robot_client::{RobotClient, RobotError};

// "robot-user:secret"
const BASIC_AUTH: &str = "Basic cm9ib3QtdXNlcjpzZWNyZXQ=";

async fn setup() -> (MockServer, RobotClient) {
    let server = MockServer::start().await;
    let client = RobotClient::with_client(
        reqwest::Client::new(),
        format!("{}/", server.uri()),
        "robot-user".to_string(),
        "secret".to_string(),
    );
    (server, client)
}

fn vswitch_body(id: u64, name: &str, vlan: u16) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "vlan": vlan,
        "cancelled": false,
        "server": [],
        "subnet": [],
        "cloud_network": []
    })
}

#[tokio::test]
async fn test_base_url_is_normalized() {
    let (server, client) = setup().await;
    assert_eq!(client.base_url(), server.uri());
}

#[tokio::test]
async fn test_get_vswitch() {
    let (server, client) = setup().await;

    let body = json!({
        "id": 42,
        "name": "legacy",
        "vlan": 4020,
        "cancelled": false,
        "server": [{
            "server_ip": "10.0.0.5",
            "server_ipv6_net": "2a01:4f8:111:4221::",
            "server_number": 321,
            "status": "ready"
        }],
        "subnet": [{"ip": "213.239.252.48", "mask": 29, "gateway": "213.239.252.49"}],
        "cloud_network": []
    });

    Mock::given(method("GET"))
        .and(path("/vswitch/42"))
        .and(header("authorization", BASIC_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let vswitch = client.get_vswitch(42).await.unwrap();

    assert_eq!(vswitch.id, Some(42));
    assert_eq!(vswitch.name.as_deref(), Some("legacy"));
    let servers = vswitch.server.unwrap();
    assert_eq!(servers.len(), 1);
    assert_eq!(servers[0].server_ip.as_deref(), Some("10.0.0.5"));
    assert_eq!(vswitch.subnet.unwrap()[0].gateway.as_deref(), Some("213.239.252.49"));
}

#[tokio::test]
async fn test_get_vswitch_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/vswitch/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"status": 404, "code": "NOT_FOUND", "message": "vSwitch with id 999 not found"}
        })))
        .mount(&server)
        .await;

    let result = client.get_vswitch(999).await;

    assert!(
        matches!(result, Err(RobotError::NotFound(_))),
        "expected NotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn test_create_vswitch_posts_form() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/vswitch"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("name=prod-switch&vlan=4010"))
        .respond_with(ResponseTemplate::new(201).set_body_json(vswitch_body(7, "prod-switch", 4010)))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_vswitch("prod-switch", 4010).await.unwrap();

    assert_eq!(created.id, Some(7));
    assert_eq!(created.vlan, Some(4010));
    assert_eq!(created.cancelled, Some(false));
}

#[tokio::test]
async fn test_create_vswitch_vlan_conflict() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/vswitch"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": {"status": 409, "code": "VSWITCH_VLAN_NOT_UNIQUE", "message": "VLAN already in use"}
        })))
        .mount(&server)
        .await;

    let result = client.create_vswitch("prod-switch", 4010).await;

    match result {
        Err(RobotError::Rejected { status, code, .. }) => {
            assert_eq!(status, 409);
            assert_eq!(code, "VSWITCH_VLAN_NOT_UNIQUE");
        }
        other => panic!("expected Rejected, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_update_posts_form_without_reading_back() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/vswitch/7"))
        .and(body_string("name=renamed&vlan=4011"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/vswitch/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vswitch_body(7, "renamed", 4011)))
        .expect(0)
        .mount(&server)
        .await;

    client.update_vswitch(7, "renamed", 4011).await.unwrap();
}

#[tokio::test]
async fn test_update_ignores_non_json_answer() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/vswitch/7"))
        .respond_with(ResponseTemplate::new(201).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    let result = client.update_vswitch(7, "renamed", 4011).await;

    assert!(result.is_ok(), "an acknowledged write is not a decode failure: {result:?}");
}

#[tokio::test]
async fn test_update_rejection_is_reported() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/vswitch/7"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": {"status": 409, "code": "VSWITCH_VLAN_NOT_UNIQUE", "message": "VLAN already in use"}
        })))
        .mount(&server)
        .await;

    let result = client.update_vswitch(7, "renamed", 4011).await;

    assert!(
        matches!(result, Err(RobotError::Rejected { ref code, .. }) if code == "VSWITCH_VLAN_NOT_UNIQUE"),
        "expected Rejected, got: {result:?}"
    );
}

#[tokio::test]
async fn test_delete_sends_immediate_cancellation() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/vswitch/7"))
        .and(body_string("cancellation_date=now"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_vswitch(7).await.unwrap();
}

#[tokio::test]
async fn test_delete_in_process_is_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/vswitch/7"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": {"status": 409, "code": "VSWITCH_IN_PROCESS", "message": "cancellation in process"}
        })))
        .mount(&server)
        .await;

    let result = client.delete_vswitch(7).await;

    assert!(
        matches!(result, Err(RobotError::Rejected { ref code, .. }) if code == "VSWITCH_IN_PROCESS"),
        "expected Rejected, got: {result:?}"
    );
}

#[tokio::test]
async fn test_validate_credentials_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/vswitch"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"status": 401, "code": "UNAUTHORIZED", "message": "Unauthorized"}
        })))
        .mount(&server)
        .await;

    let result = client.validate_credentials().await;

    assert!(matches!(result, Err(RobotError::Authentication(_))));
}

#[tokio::test]
async fn test_server_error_is_transient() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/vswitch/7"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let err = client.get_vswitch(7).await.unwrap_err();

    assert!(matches!(err, RobotError::Unavailable { status: 503, .. }));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_garbled_body_is_serialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/vswitch/7"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client.get_vswitch(7).await.unwrap_err();

    assert!(matches!(err, RobotError::Serialization(_)));
    assert!(!err.is_transient());
}
