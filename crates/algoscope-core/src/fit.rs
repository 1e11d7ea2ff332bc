//! Relay contract for the remote curve-fitting service.
//!
//! The fitting itself runs elsewhere. This side validates user intent,
//! forwards it over a [`FitTransport`], and hands every inbound frame back to
//! the UI exactly as received.

use std::future::Future;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Default upper bound on the polynomial degree accepted for forwarding.
pub const DEFAULT_MAX_DEGREE: u32 = 10;

/// Shape of the synthetic dataset the service generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionType {
    Sin,
    Linear,
    Quadratic,
    Exponential,
    Logarithmic,
}

/// Fitting method understood by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMethod {
    Polynomial,
}

/// Requests forwarded to the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FitRequest {
    GenerateDataset {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        function_type: Option<FunctionType>,
    },
    StartFitting {
        method: FitMethod,
        degree: u32,
        /// Seconds between progress updates.
        delay: f64,
    },
    Reset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Typed view of a frame sent by the service. Every field is optional
/// because the service sends one loosely-shaped object per update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FitEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<Dataset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coefficients: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mse: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_squared: Option<f64>,
    #[serde(default, rename = "isFitted", skip_serializing_if = "Option::is_none")]
    pub is_fitted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitEventKind {
    Dataset,
    Progress,
    Fitted,
    Message,
    Error,
    Unknown,
}

impl FitEvent {
    pub fn parse(frame: &str) -> Result<Self> {
        Ok(serde_json::from_str(frame)?)
    }

    pub fn kind(&self) -> FitEventKind {
        if self.error.is_some() {
            FitEventKind::Error
        } else if self.dataset.is_some() {
            FitEventKind::Dataset
        } else if self.is_fitted == Some(true) {
            FitEventKind::Fitted
        } else if self.progress.is_some() {
            FitEventKind::Progress
        } else if self.message.is_some() {
            FitEventKind::Message
        } else {
            FitEventKind::Unknown
        }
    }
}

/// What the relay hands to the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub enum FitNotice {
    /// A frame from the service, unmodified.
    Relay(String),
    /// The channel failed. Non-fatal; runs are unaffected.
    ChannelFailed(String),
}

/// Bidirectional text channel to the fitting service.
pub trait FitTransport: Send {
    fn send(&mut self, frame: String) -> impl Future<Output = Result<()>> + Send;

    /// Next inbound frame, or `None` once the channel is closed.
    fn recv(&mut self) -> impl Future<Output = Option<Result<String>>> + Send;
}

/// In-process transport over a pair of channels.
#[derive(Debug)]
pub struct ChannelTransport {
    outbound: mpsc::Sender<String>,
    inbound: mpsc::Receiver<String>,
}

impl ChannelTransport {
    /// Create two connected ends.
    pub fn pair(capacity: usize) -> (ChannelTransport, ChannelTransport) {
        let (a_tx, a_rx) = mpsc::channel(capacity);
        let (b_tx, b_rx) = mpsc::channel(capacity);
        (
            ChannelTransport { outbound: a_tx, inbound: b_rx },
            ChannelTransport { outbound: b_tx, inbound: a_rx },
        )
    }
}

impl FitTransport for ChannelTransport {
    async fn send(&mut self, frame: String) -> Result<()> {
        self.outbound
            .send(frame)
            .await
            .map_err(|_| Error::RemoteChannel("peer closed".into()))
    }

    async fn recv(&mut self) -> Option<Result<String>> {
        self.inbound.recv().await.map(Ok)
    }
}

/// Forwards fit requests and relays service frames.
pub struct FitRelay<T> {
    transport: T,
    max_degree: u32,
}

impl<T: FitTransport> FitRelay<T> {
    pub fn new(transport: T) -> Self {
        Self::with_max_degree(transport, DEFAULT_MAX_DEGREE)
    }

    pub fn with_max_degree(transport: T, max_degree: u32) -> Self {
        Self { transport, max_degree }
    }

    pub fn max_degree(&self) -> u32 {
        self.max_degree
    }

    /// Reject requests the service should never see.
    pub fn validate(&self, request: &FitRequest) -> Result<()> {
        match request {
            FitRequest::StartFitting { degree, delay, .. } => {
                if *degree == 0 || *degree > self.max_degree {
                    return Err(Error::InvalidInput(format!(
                        "degree {degree} outside 1..={}",
                        self.max_degree
                    )));
                }
                if !delay.is_finite() || *delay < 0.0 {
                    return Err(Error::InvalidInput(format!("invalid delay {delay}")));
                }
                Ok(())
            }
            FitRequest::GenerateDataset { .. } | FitRequest::Reset => Ok(()),
        }
    }

    /// Validate and send one request.
    pub async fn forward(&mut self, request: FitRequest) -> Result<()> {
        self.validate(&request)?;
        let frame = serde_json::to_string(&request)?;
        debug!(%frame, "forwarding fit request");
        self.transport.send(frame).await
    }

    /// Next notice for the UI, or `None` when the channel has closed.
    pub async fn next_notice(&mut self) -> Option<FitNotice> {
        match self.transport.recv().await? {
            Ok(frame) => Some(FitNotice::Relay(frame)),
            Err(e) => {
                warn!("fit channel failed: {}", e);
                Some(FitNotice::ChannelFailed(e.to_string()))
            }
        }
    }

    /// Pump requests out and notices back until either side closes.
    ///
    /// Invalid requests and send failures are reported as
    /// [`FitNotice::ChannelFailed`] instead of ending the pump.
    pub async fn run(
        mut self,
        mut requests: mpsc::Receiver<FitRequest>,
        notices: mpsc::Sender<FitNotice>,
    ) {
        loop {
            tokio::select! {
                request = requests.recv() => {
                    let Some(request) = request else { break };
                    if let Err(e) = self.forward(request).await {
                        warn!("fit request not forwarded: {}", e);
                        if notices.send(FitNotice::ChannelFailed(e.to_string())).await.is_err() {
                            break;
                        }
                    }
                }
                notice = self.next_notice() => {
                    let Some(notice) = notice else {
                        let _ = notices
                            .send(FitNotice::ChannelFailed("fit service closed the channel".into()))
                            .await;
                        break;
                    };
                    if notices.send(notice).await.is_err() {
                        break;
                    }
                }
            }
        }
        debug!("fit relay stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_use_action_tag() {
        let json = serde_json::to_string(&FitRequest::GenerateDataset {
            function_type: Some(FunctionType::Quadratic),
        })
        .unwrap();
        assert_eq!(json, r#"{"action":"generate_dataset","function_type":"quadratic"}"#);

        let json = serde_json::to_string(&FitRequest::GenerateDataset { function_type: None }).unwrap();
        assert_eq!(json, r#"{"action":"generate_dataset"}"#);
    }

    #[test]
    fn degree_is_bounded() {
        let (a, _b) = ChannelTransport::pair(4);
        let relay = FitRelay::with_max_degree(a, 5);
        let ok = FitRequest::StartFitting { method: FitMethod::Polynomial, degree: 5, delay: 0.1 };
        let too_high = FitRequest::StartFitting { method: FitMethod::Polynomial, degree: 6, delay: 0.1 };
        let zero = FitRequest::StartFitting { method: FitMethod::Polynomial, degree: 0, delay: 0.1 };
        assert!(relay.validate(&ok).is_ok());
        assert!(matches!(relay.validate(&too_high), Err(Error::InvalidInput(_))));
        assert!(relay.validate(&zero).is_err());
    }

    #[test]
    fn event_kinds() {
        let progress = FitEvent::parse(r#"{"progress":40,"coefficients":[1.0,2.0],"mse":0.1,"r_squared":0.9}"#).unwrap();
        assert_eq!(progress.kind(), FitEventKind::Progress);
        assert_eq!(progress.r_squared, Some(0.9));

        let fitted = FitEvent::parse(r#"{"isFitted":true,"coefficients":[1.0]}"#).unwrap();
        assert_eq!(fitted.kind(), FitEventKind::Fitted);

        let err = FitEvent::parse(r#"{"error":"Unknown function type: tan"}"#).unwrap();
        assert_eq!(err.kind(), FitEventKind::Error);

        let data = FitEvent::parse(r#"{"dataset":{"x":[0.0],"y":[1.0]}}"#).unwrap();
        assert_eq!(data.kind(), FitEventKind::Dataset);
    }

    #[tokio::test]
    async fn forwards_and_relays_unmodified() {
        let (local, mut remote) = ChannelTransport::pair(4);
        let mut relay = FitRelay::new(local);

        relay.forward(FitRequest::Reset).await.unwrap();
        assert_eq!(remote.recv().await.unwrap().unwrap(), r#"{"action":"reset"}"#);

        let raw = r#"{"progress": 10, "mse": 0.5}"#.to_string();
        remote.send(raw.clone()).await.unwrap();
        assert_eq!(relay.next_notice().await, Some(FitNotice::Relay(raw)));
    }

    #[tokio::test]
    async fn closed_peer_becomes_notice() {
        let (local, remote) = ChannelTransport::pair(4);
        drop(remote);
        let (req_tx, req_rx) = mpsc::channel(4);
        let (note_tx, mut note_rx) = mpsc::channel(4);
        let pump = tokio::spawn(FitRelay::new(local).run(req_rx, note_tx));

        let notice = note_rx.recv().await.unwrap();
        assert!(matches!(notice, FitNotice::ChannelFailed(_)));
        drop(req_tx);
        pump.await.unwrap();
    }
}
