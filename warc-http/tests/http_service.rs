use std::net::TcpListener;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use warc_core::service::{PredictionService, ServiceError};
use warc_http::HttpPredictionService;
use warp::{Filter, Reply, filters::BoxedFilter, http::StatusCode, reply::Response};

/// Serves `routes` on an ephemeral local port and returns its base URL.
fn spawn_server(routes: BoxedFilter<(Response,)>) -> String {
    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    format!("http://{addr}")
}

/// A local address nothing is listening on.
fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/predict")
}

#[tokio::test]
async fn posts_json_and_returns_decoded_body() {
    let routes = warp::post()
        .and(warp::path!("predict"))
        .and(warp::body::json())
        .map(|body: Value| {
            warp::reply::json(&json!({ "echo": body["pressure"], "ok": true })).into_response()
        })
        .boxed();
    let base = spawn_server(routes);
    let service = HttpPredictionService::new(None).unwrap();

    let reply = service
        .post_json(&format!("{base}/predict"), &json!({ "pressure": "80" }))
        .await
        .unwrap();

    assert_eq!(reply, json!({ "echo": "80", "ok": true }));
}

#[tokio::test]
async fn non_success_status_is_reported_with_body() {
    let routes = warp::post()
        .map(|| {
            warp::reply::with_status("model not loaded", StatusCode::INTERNAL_SERVER_ERROR)
                .into_response()
        })
        .boxed();
    let base = spawn_server(routes);
    let service = HttpPredictionService::new(None).unwrap();

    let err = service
        .post_json(&format!("{base}/predict"), &json!({}))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ServiceError::Status {
            code: 500,
            body: "model not loaded".to_string(),
        }
    );
}

#[tokio::test]
async fn not_found_is_a_status_error() {
    let routes = warp::post()
        .and(warp::path!("predict"))
        .map(|| warp::reply::json(&json!({})).into_response())
        .boxed();
    let base = spawn_server(routes);
    let service = HttpPredictionService::new(None).unwrap();

    let err = service
        .post_json(&format!("{base}/elsewhere"), &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Status { code: 404, .. }));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let routes = warp::post()
        .map(|| warp::reply::html("<html>not json</html>").into_response())
        .boxed();
    let base = spawn_server(routes);
    let service = HttpPredictionService::new(None).unwrap();

    let err = service
        .post_json(&format!("{base}/predict"), &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Decode(_)));
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    let service = HttpPredictionService::new(None).unwrap();

    let err = service
        .post_json(&closed_port_url(), &json!({}))
        .await
        .unwrap_err();

    match err {
        ServiceError::Transport(message) => assert!(
            message.to_lowercase().contains("refused"),
            "cause missing from '{message}'"
        ),
        other => panic!("expected Transport, got {other:?}"),
    }
}

#[tokio::test]
async fn https_urls_are_attempted_over_tls() {
    let routes = warp::post()
        .map(|| warp::reply::json(&json!({})).into_response())
        .boxed();
    let base = spawn_server(routes);
    let service = HttpPredictionService::new(Some(Duration::from_secs(5))).unwrap();

    let err = service
        .post_json(&format!("{}/predict", base.replacen("http", "https", 1)), &json!({}))
        .await
        .unwrap_err();

    // The server speaks plain HTTP, so the handshake fails after connecting.
    match err {
        ServiceError::Transport(message) => {
            assert!(!message.contains("scheme is not http"), "{message}")
        }
        other => panic!("expected Transport, got {other:?}"),
    }
}

#[tokio::test]
async fn slow_service_hits_the_configured_timeout() {
    let routes = warp::post()
        .and_then(|| async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Ok::<_, warp::Rejection>(warp::reply::json(&json!({})).into_response())
        })
        .boxed();
    let base = spawn_server(routes);
    let service = HttpPredictionService::new(Some(Duration::from_millis(50))).unwrap();

    let err = service
        .post_json(&format!("{base}/predict"), &json!({}))
        .await
        .unwrap_err();

    match err {
        ServiceError::Transport(message) => {
            assert!(message.contains("timed out"), "cause missing from '{message}'")
        }
        other => panic!("expected Transport, got {other:?}"),
    }
}
