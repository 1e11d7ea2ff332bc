//! Shared fixtures for the end-to-end tests.

use std::net::SocketAddr;
use std::sync::Arc;

use algoscope_core::{Metrics, RunEvent};
use algoscope_engine::{RunHandle, RunReport};
use algoscope_graph::{generate_with, Bounds, Graph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

pub fn seeded_sequence(seed: u64, len: usize) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(1..=150)).collect()
}

pub fn seeded_graph(seed: u64, nodes: usize) -> Arc<Graph> {
    Arc::new(generate_with(&mut StdRng::seed_from_u64(seed), nodes, Bounds::default()).expect("graph"))
}

/// Drain a run's channel and wait for its report.
pub async fn collect(mut handle: RunHandle) -> (Vec<RunEvent>, RunReport) {
    let mut events = Vec::new();
    if let Some(rx) = handle.events() {
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
    }
    (events, handle.wait().await)
}

/// Exactly one terminal event, and it comes last; counters never go down.
pub fn assert_well_formed(events: &[RunEvent]) {
    let terminals = events.iter().filter(|e| e.is_terminal()).count();
    assert_eq!(terminals, 1, "expected one terminal event");
    assert!(events.last().is_some_and(RunEvent::is_terminal), "terminal event is not last");

    let mut previous = Metrics::new();
    for event in events {
        if let RunEvent::Metrics(m) = event {
            assert!(m.comparisons >= previous.comparisons);
            assert!(m.accesses >= previous.accesses);
            assert!(m.swaps >= previous.swaps);
            assert!(m.visited >= previous.visited);
            previous = *m;
        }
    }
}

/// Minimal HTTP/1.1 exchange; returns the status code and body.
pub async fn http(addr: SocketAddr, method: &str, path: &str, body: Option<&str>) -> (u16, String) {
    let mut stream = TcpStream::connect(addr).await.expect("connect");
    let body = body.unwrap_or("");
    let request = format!(
        "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\
         Content-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(request.as_bytes()).await.expect("write");

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.expect("read");
    let text = String::from_utf8_lossy(&raw).into_owned();
    let status = text
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .unwrap_or(0);
    let body = text
        .split_once("\r\n\r\n")
        .map(|(_, b)| b.to_string())
        .unwrap_or_default();
    (status, body)
}
