//! Engine and server configuration, read from the environment.

use std::net::SocketAddr;
use std::str::FromStr;

use algoscope_core::fit::{FitRelay, FitTransport, DEFAULT_MAX_DEGREE};
use algoscope_core::PaceTier;
use algoscope_graph::{generate, Bounds, Graph};
use tracing::warn;

use crate::error::{Error, Result};
use crate::session::random_sequence;

/// Configuration for a session and the server around it.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// HTTP/WebSocket listen address
    pub bind_addr: SocketAddr,

    /// Length of generated sequences
    pub sequence_len: usize,

    /// Generated values are uniform in `1..=value_max`
    pub value_max: i64,

    /// Nodes in generated graphs
    pub node_count: usize,

    /// Longest sequence a regenerate request may ask for
    pub max_sequence_len: usize,

    /// Largest graph a regenerate request may ask for
    pub max_node_count: usize,

    /// Area graph points are drawn from
    pub bounds: Bounds,

    /// Tier used when a start request names none
    pub pace: PaceTier,

    /// Largest polynomial degree forwarded to the fit service
    pub fit_max_degree: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl EngineConfig {
    /// Built-in values, ignoring the environment.
    pub fn defaults() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            sequence_len: 500,
            value_max: 150,
            node_count: 100,
            max_sequence_len: 10_000,
            max_node_count: 1_000,
            bounds: Bounds::default(),
            pace: PaceTier::Fast,
            fit_max_degree: DEFAULT_MAX_DEGREE,
        }
    }

    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::defaults();
        let bounds = Bounds {
            width: read(&lookup, "ALGOSCOPE_GRAPH_WIDTH", d.bounds.width),
            height: read(&lookup, "ALGOSCOPE_GRAPH_HEIGHT", d.bounds.height),
        };
        let bounds = match bounds.validate() {
            Ok(()) => bounds,
            Err(e) => {
                warn!("{e}, using {} x {}", d.bounds.width, d.bounds.height);
                d.bounds
            }
        };

        let max_sequence_len = positive(
            read(&lookup, "ALGOSCOPE_MAX_SEQUENCE_LEN", d.max_sequence_len),
            d.max_sequence_len,
        );
        let max_node_count = positive(
            read(&lookup, "ALGOSCOPE_MAX_NODE_COUNT", d.max_node_count),
            d.max_node_count,
        );

        Self {
            bind_addr: read(&lookup, "ALGOSCOPE_BIND_ADDR", d.bind_addr),
            sequence_len: capped(
                positive(read(&lookup, "ALGOSCOPE_SEQUENCE_LEN", d.sequence_len), d.sequence_len),
                max_sequence_len,
            ),
            value_max: read(&lookup, "ALGOSCOPE_VALUE_MAX", d.value_max).max(1),
            node_count: capped(
                positive(read(&lookup, "ALGOSCOPE_NODE_COUNT", d.node_count), d.node_count),
                max_node_count,
            ),
            max_sequence_len,
            max_node_count,
            bounds,
            pace: read(&lookup, "ALGOSCOPE_PACE", d.pace),
            fit_max_degree: read(&lookup, "ALGOSCOPE_FIT_MAX_DEGREE", d.fit_max_degree).max(1),
        }
    }
}

impl EngineConfig {
    /// A curve-fit relay over `transport`, bounded by the configured degree.
    pub fn fit_relay<T: FitTransport>(&self, transport: T) -> FitRelay<T> {
        FitRelay::with_max_degree(transport, self.fit_max_degree)
    }

    /// A random sequence of `len` values, the configured length when `None`.
    pub fn generate_sequence(&self, len: Option<usize>) -> Result<Vec<i64>> {
        let len = len.unwrap_or(self.sequence_len);
        if len > self.max_sequence_len {
            return Err(Error::invalid(format!(
                "sequence length {len} exceeds the limit of {}",
                self.max_sequence_len
            )));
        }
        random_sequence(&mut rand::thread_rng(), len, self.value_max)
    }

    /// A random graph of `node_count` nodes, the configured count when `None`.
    ///
    /// Triangulation is quadratic in the node count; call it off the async
    /// executor for large graphs.
    pub fn generate_graph(&self, node_count: Option<usize>) -> Result<Graph> {
        let node_count = node_count.unwrap_or(self.node_count);
        if node_count > self.max_node_count {
            return Err(Error::invalid(format!(
                "node count {node_count} exceeds the limit of {}",
                self.max_node_count
            )));
        }
        Ok(generate(node_count, self.bounds)?)
    }
}

fn read<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "unparseable setting, using default");
            default
        }),
    }
}

fn capped(value: usize, max: usize) -> usize {
    if value > max {
        warn!(value, max, "size above its limit, using the limit");
        max
    } else {
        value
    }
}

fn positive(value: usize, default: usize) -> usize {
    if value == 0 {
        warn!("zero is not a valid size, using {default}");
        default
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> EngineConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config(&[]), EngineConfig::defaults());
    }

    #[test]
    fn reads_overrides() {
        let c = config(&[
            ("ALGOSCOPE_BIND_ADDR", "127.0.0.1:8080"),
            ("ALGOSCOPE_SEQUENCE_LEN", "64"),
            ("ALGOSCOPE_PACE", "Slow"),
            ("ALGOSCOPE_GRAPH_WIDTH", "300"),
        ]);
        assert_eq!(c.bind_addr.port(), 8080);
        assert_eq!(c.sequence_len, 64);
        assert_eq!(c.pace, PaceTier::Slow);
        assert_eq!(c.bounds.width, 300.0);
        assert_eq!(c.bounds.height, 600.0);
    }

    #[test]
    fn fit_relay_uses_configured_degree() {
        let c = config(&[("ALGOSCOPE_FIT_MAX_DEGREE", "4")]);
        let (near, _far) = algoscope_core::fit::ChannelTransport::pair(1);
        assert_eq!(c.fit_relay(near).max_degree(), 4);
    }

    #[test]
    fn sizes_are_capped_by_their_limits() {
        let c = config(&[
            ("ALGOSCOPE_MAX_SEQUENCE_LEN", "100"),
            ("ALGOSCOPE_SEQUENCE_LEN", "5000"),
            ("ALGOSCOPE_MAX_NODE_COUNT", "50"),
        ]);
        assert_eq!(c.max_sequence_len, 100);
        assert_eq!(c.sequence_len, 100);
        assert_eq!(c.max_node_count, 50);
        assert_eq!(c.node_count, 50);
    }

    #[test]
    fn oversized_generation_is_rejected() {
        let c = config(&[("ALGOSCOPE_MAX_NODE_COUNT", "30"), ("ALGOSCOPE_MAX_SEQUENCE_LEN", "40")]);
        assert!(matches!(
            c.generate_graph(Some(1_000_000)),
            Err(Error::Core(algoscope_core::Error::InvalidInput(_)))
        ));
        assert!(matches!(
            c.generate_sequence(Some(41)),
            Err(Error::Core(algoscope_core::Error::InvalidInput(_)))
        ));
        assert_eq!(c.generate_graph(Some(30)).unwrap().node_count(), 30);
        assert_eq!(c.generate_sequence(None).unwrap().len(), 40);
        assert!(c.generate_sequence(Some(0)).is_err());
    }

    #[test]
    fn bad_values_fall_back() {
        let c = config(&[
            ("ALGOSCOPE_NODE_COUNT", "lots"),
            ("ALGOSCOPE_SEQUENCE_LEN", "0"),
            ("ALGOSCOPE_PACE", "ludicrous"),
            ("ALGOSCOPE_GRAPH_HEIGHT", "-5"),
        ]);
        let d = EngineConfig::defaults();
        assert_eq!(c.node_count, d.node_count);
        assert_eq!(c.sequence_len, d.sequence_len);
        assert_eq!(c.pace, d.pace);
        assert_eq!(c.bounds, d.bounds);
    }
}
