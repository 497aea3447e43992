mod common;

use std::time::Duration;

use authdev::AuthdevError;
use authdev::config::types::AuthdevConfig;
use authdev::core::api::WEBAUTHN_DEVICES_PATH;
use authdev::core::devices::fetch_devices;
use authdev::core::transport::HttpTransport;

fn transport_for(base_url: &str, cookie: Option<&str>) -> HttpTransport {
    let mut cfg = AuthdevConfig::default();
    cfg.server.url = Some(base_url.into());
    cfg.session.cookie = cookie.map(String::from);
    HttpTransport::from_config(&cfg).unwrap()
}

#[tokio::test]
async fn fetches_devices_with_session_cookie() {
    let (url, requests) = common::serve_once(
        "200 OK",
        r#"[{"id":1,"description":"YubiKey","attachment":"cross-platform"},{"id":2}]"#,
    );
    let transport = transport_for(&url, Some("s3ss10n"));

    let devices = fetch_devices(&transport).await.unwrap().unwrap();
    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].description(), Some("YubiKey"));

    let head = requests.recv_timeout(Duration::from_secs(5)).unwrap();
    let head_lower = head.to_lowercase();
    assert!(head.starts_with(&format!("GET {WEBAUTHN_DEVICES_PATH} HTTP/1.1")));
    assert!(head_lower.contains("cookie: authelia_session=s3ss10n"));
    assert!(head_lower.contains("accept: application/json"));
}

#[tokio::test]
async fn null_body_is_absent() {
    let (url, _requests) = common::serve_once("200 OK", "null");
    let transport = transport_for(&url, None);
    assert_eq!(fetch_devices(&transport).await.unwrap(), None);
}

#[tokio::test]
async fn server_error_maps_to_status() {
    let (url, _requests) = common::serve_once(
        "500 Internal Server Error",
        r#"{"status":"KO","message":"Operation failed."}"#,
    );
    let transport = transport_for(&url, None);

    match fetch_devices(&transport).await.unwrap_err() {
        AuthdevError::Status { path, status, body } => {
            assert_eq!(path, WEBAUTHN_DEVICES_PATH);
            assert_eq!(status.as_u16(), 500);
            assert!(body.contains("Operation failed."));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn bad_json_maps_to_decode() {
    let (url, _requests) = common::serve_once("200 OK", "<html>login</html>");
    let transport = transport_for(&url, None);
    let err = fetch_devices(&transport).await.unwrap_err();
    assert!(matches!(err, AuthdevError::Decode { .. }));
}

#[tokio::test]
async fn refused_connection_maps_to_transport() {
    // Bind then drop to get a port nothing listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let transport = transport_for(&format!("http://127.0.0.1:{port}"), None);
    let err = fetch_devices(&transport).await.unwrap_err();
    assert!(matches!(err, AuthdevError::Transport { .. }));
}
