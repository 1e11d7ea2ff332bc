//! Algoscope visualization server
//!
//! Generate a session from the environment and serve it.

use algoscope_engine::{EngineConfig, Session};
use algoscope_vis::VisServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    algoscope_logging::init(algoscope_logging::DEFAULT_DIRECTIVES);

    let config = EngineConfig::from_env();
    tracing::info!(
        sequence_len = config.sequence_len,
        node_count = config.node_count,
        pace = %config.pace,
        "starting algoscope"
    );

    let addr = config.bind_addr;
    let session = Session::new(config)?;
    VisServer::new(session).serve(addr).await?;

    Ok(())
}
