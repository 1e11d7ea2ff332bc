//! The HTTP surface over a live socket.

use std::time::Duration;

use algoscope_engine::{EngineConfig, Session};
use algoscope_integration_tests::{http, seeded_graph, seeded_sequence};
use algoscope_vis::VisServer;
use serde_json::Value;
use tokio::net::TcpListener;

async fn spawn_server() -> std::net::SocketAddr {
    let graph = seeded_graph(20, 25);
    let session = Session::with_data(
        EngineConfig::defaults(),
        seeded_sequence(20, 50),
        std::sync::Arc::try_unwrap(graph).expect("sole owner"),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(VisServer::new(session).serve_on(listener));
    addr
}

#[tokio::test]
async fn catalogue_and_data_are_served() {
    let addr = spawn_server().await;

    let (code, body) = http(addr, "GET", "/api/algorithms", None).await;
    assert_eq!(code, 200);
    let list: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 14);

    let (code, body) = http(addr, "GET", "/api/graph", None).await;
    assert_eq!(code, 200);
    let graph: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(graph["points"].as_array().unwrap().len(), 25);
    assert_eq!(graph["goal"], 24);

    let (code, body) = http(addr, "GET", "/api/sequence", None).await;
    assert_eq!(code, 200);
    let sequence: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(sequence["values"].as_array().unwrap().len(), 50);
}

#[tokio::test]
async fn start_runs_and_status_reports_it() {
    let addr = spawn_server().await;

    let (code, body) = http(
        addr,
        "POST",
        "/api/run/start",
        Some(r#"{"algorithm":"shell","pace":"benchmark"}"#),
    )
    .await;
    assert_eq!(code, 200, "{body}");
    let started: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(started["run"], 1);

    let mut status = Value::Null;
    for _ in 0..50 {
        let (_, body) = http(addr, "GET", "/api/status", None).await;
        status = serde_json::from_str(&body).unwrap();
        if status["last"]["status"] == "completed" {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(status["last"]["status"], "completed");

    let (_, body) = http(addr, "GET", "/api/sequence", None).await;
    let sequence: Value = serde_json::from_str(&body).unwrap();
    let values: Vec<i64> = serde_json::from_value(sequence["values"].clone()).unwrap();
    assert!(values.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn bad_requests_are_rejected() {
    let addr = spawn_server().await;
    let (code, body) = http(
        addr,
        "POST",
        "/api/run/start",
        Some(r#"{"algorithm":"dijkstra","goal":999}"#),
    )
    .await;
    assert_eq!(code, 400);
    assert!(body.contains("error"));

    let (code, _) = http(addr, "POST", "/api/run/cancel", Some("")).await;
    assert_eq!(code, 200);
}
