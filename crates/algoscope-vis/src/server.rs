//! Axum web server exposing a session over HTTP and WebSocket.

use std::net::SocketAddr;
use std::sync::Arc;

use algoscope_engine::{AlgorithmId, AlgorithmInfo, Error, Session, SessionStatus, StartRequest};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, RwLock};
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

use crate::messages::{
    Cancelled, ErrorBody, GraphView, RegenerateRequest, RegenerateTarget, SequenceView, Started,
    WsCommand, WsReply,
};

/// Shared application state.
pub struct AppState {
    session: RwLock<Session>,
}

impl AppState {
    pub fn new(session: Session) -> Arc<Self> {
        Arc::new(Self {
            session: RwLock::new(session),
        })
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorBody>)>;

fn rejected(e: Error) -> (StatusCode, Json<ErrorBody>) {
    debug!("request rejected: {e}");
    (StatusCode::BAD_REQUEST, Json(ErrorBody { error: e.to_string() }))
}

/// Visualization server.
pub struct VisServer {
    state: Arc<AppState>,
}

impl VisServer {
    pub fn new(session: Session) -> Self {
        Self {
            state: AppState::new(session),
        }
    }

    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(index_handler))
            .route("/api/status", get(status_handler))
            .route("/api/algorithms", get(algorithms_handler))
            .route("/api/sequence", get(sequence_handler))
            .route("/api/graph", get(graph_handler))
            .route("/api/run/start", post(start_handler))
            .route("/api/run/cancel", post(cancel_handler))
            .route("/api/reset", post(reset_handler))
            .route("/api/regenerate", post(regenerate_handler))
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Bind `addr` and serve until the process ends.
    pub async fn serve(self, addr: SocketAddr) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(addr).await?;
        self.serve_on(listener).await
    }

    /// Serve on an already bound listener.
    pub async fn serve_on(self, listener: TcpListener) -> Result<(), std::io::Error> {
        info!("algoscope server running on http://{}", listener.local_addr()?);
        axum::serve(listener, self.router()).await
    }
}

async fn index_handler() -> &'static str {
    "algoscope: see /api/algorithms and /ws"
}

pub(crate) async fn status_handler(State(state): State<Arc<AppState>>) -> Json<SessionStatus> {
    let mut session = state.session.write().await;
    session.settle().await;
    Json(session.status())
}

pub(crate) async fn algorithms_handler() -> Json<Vec<AlgorithmInfo>> {
    Json(AlgorithmId::catalogue())
}

pub(crate) async fn sequence_handler(State(state): State<Arc<AppState>>) -> Json<SequenceView> {
    let mut session = state.session.write().await;
    session.settle().await;
    Json(SequenceView {
        values: session.sequence().to_vec(),
        baseline: session.baseline().to_vec(),
    })
}

pub(crate) async fn graph_handler(State(state): State<Arc<AppState>>) -> Json<GraphView> {
    let graph = state.session.read().await.graph();
    Json(GraphView::from(graph.as_ref()))
}

pub(crate) async fn start_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartRequest>,
) -> ApiResult<Started> {
    let mut session = state.session.write().await;
    let run = session.start(request).await.map_err(rejected)?;
    Ok(Json(Started { run }))
}

pub(crate) async fn cancel_handler(State(state): State<Arc<AppState>>) -> Json<Cancelled> {
    let session = state.session.read().await;
    Json(Cancelled {
        cancelled: session.cancel(),
    })
}

pub(crate) async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<SessionStatus> {
    let mut session = state.session.write().await;
    session.reset().await;
    Json(session.status())
}

pub(crate) async fn regenerate_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegenerateRequest>,
) -> ApiResult<SessionStatus> {
    // Generated outside the write lock.
    let config = state.session.read().await.config().clone();
    let sequence = match request.target {
        RegenerateTarget::Sequence | RegenerateTarget::Both => {
            Some(config.generate_sequence(request.sequence_len).map_err(rejected)?)
        }
        RegenerateTarget::Graph => None,
    };
    let graph = match request.target {
        RegenerateTarget::Graph | RegenerateTarget::Both => {
            let node_count = request.node_count;
            let graph = tokio::task::spawn_blocking(move || config.generate_graph(node_count))
                .await
                .map_err(|e| {
                    warn!("graph generation task failed: {e}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ErrorBody { error: e.to_string() }),
                    )
                })?
                .map_err(rejected)?;
            Some(graph)
        }
        RegenerateTarget::Sequence => None,
    };

    let mut session = state.session.write().await;
    if let Some(sequence) = sequence {
        session.replace_sequence(sequence).await;
    }
    if let Some(graph) = graph {
        session.replace_graph(graph).await;
    }
    Ok(Json(session.status()))
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket client connected");
    let (mut events, status) = {
        let session = state.session.read().await;
        (session.subscribe(), session.status())
    };
    if send_json(&mut socket, &WsReply::Status(status)).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = match serde_json::from_str::<WsCommand>(&text) {
                            Ok(cmd) => handle_ws_command(&state, cmd).await,
                            Err(e) => WsReply::Error { message: e.to_string() },
                        };
                        if send_json(&mut socket, &reply).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("WebSocket client disconnected");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!("WebSocket error: {e}");
                        break;
                    }
                    _ => {}
                }
            }
            event = events.recv() => {
                match event {
                    Ok(event) => {
                        if send_json(&mut socket, &event).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "WebSocket client lagging, events dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }
}

pub(crate) async fn handle_ws_command(state: &AppState, cmd: WsCommand) -> WsReply {
    match cmd {
        WsCommand::Start(request) => {
            let mut session = state.session.write().await;
            match session.start(request).await {
                Ok(run) => WsReply::Started { run },
                Err(e) => WsReply::Error { message: e.to_string() },
            }
        }
        WsCommand::Cancel => {
            let session = state.session.read().await;
            WsReply::CancelRequested {
                cancelled: session.cancel(),
            }
        }
        WsCommand::Reset => {
            state.session.write().await.reset().await;
            WsReply::Reset
        }
        WsCommand::GetStatus => {
            let mut session = state.session.write().await;
            session.settle().await;
            WsReply::Status(session.status())
        }
    }
}

async fn send_json<T: serde::Serialize>(socket: &mut WebSocket, value: &T) -> Result<(), axum::Error> {
    let json = serde_json::to_string(value).map_err(axum::Error::new)?;
    socket.send(Message::Text(json.into())).await
}
