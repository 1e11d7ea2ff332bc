//! Algoscope Visualization Server
//!
//! Serves one [`Session`](algoscope_engine::Session) to browser clients.
//!
//! # Architecture
//!
//! - **REST API**: catalogue, current data, start/cancel/reset/regenerate
//! - **WebSocket**: streams every run event of the session and accepts
//!   `start`, `cancel`, `reset` and `get_status` commands
//!
//! Rendering lives in the client; the server only relays state.
//!
//! # Usage
//!
//! ```ignore
//! let session = Session::new(EngineConfig::from_env())?;
//! VisServer::new(session).serve(addr).await?;
//! ```

mod messages;
mod server;

pub use messages::{
    Cancelled, ErrorBody, GraphView, RegenerateRequest, RegenerateTarget, SequenceView, Started,
    WsCommand, WsReply,
};
pub use server::{AppState, VisServer};
