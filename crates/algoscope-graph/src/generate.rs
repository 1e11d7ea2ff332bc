//! Random planar graph generation.

use rand::Rng;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{EdgeKey, Graph};
use crate::point::{Bounds, Point};
use crate::triangulate::delaunay_edges;

/// Generate `node_count` uniform points in `bounds` joined by their Delaunay
/// neighbourhoods, using the thread-local RNG.
pub fn generate(node_count: usize, bounds: Bounds) -> Result<Graph> {
    generate_with(&mut rand::thread_rng(), node_count, bounds)
}

/// [`generate`] with a caller-supplied RNG.
pub fn generate_with<R: Rng + ?Sized>(
    rng: &mut R,
    node_count: usize,
    bounds: Bounds,
) -> Result<Graph> {
    if node_count == 0 {
        return Err(Error::InvalidNodeCount(node_count));
    }
    bounds.validate()?;

    let points: Vec<Point> = (0..node_count)
        .map(|_| Point::new(rng.gen_range(0.0..bounds.width), rng.gen_range(0.0..bounds.height)))
        .collect();

    let mut edges = delaunay_edges(&points);
    let bridges = bridge_components(&points, &mut edges);
    if bridges > 0 {
        debug!(bridges, "joined stray components");
    }

    debug!(nodes = node_count, edges = edges.len(), "generated graph");
    Graph::new(points, edges)
}

/// Join every component to the one holding node 0 through its closest pair of
/// points. A full triangulation is already connected; this only catches
/// numerically degenerate inputs. Returns the number of edges added.
fn bridge_components(points: &[Point], edges: &mut Vec<EdgeKey>) -> usize {
    let Ok(graph) = Graph::new(points.to_vec(), edges.iter().copied()) else {
        return 0;
    };
    let labels = graph.component_labels();
    let components = labels.iter().copied().max().map_or(0, |m| m + 1);
    if components <= 1 {
        return 0;
    }

    let mut joined: Vec<bool> = labels.iter().map(|&l| l == 0).collect();
    for label in 1..components {
        let mut best: Option<(f64, usize, usize)> = None;
        for (u, _) in joined.iter().enumerate().filter(|(_, &j)| j) {
            for v in (0..points.len()).filter(|&v| labels[v] == label) {
                let d = points[u].distance_sq(&points[v]);
                if best.map_or(true, |(bd, _, _)| d < bd) {
                    best = Some((d, u, v));
                }
            }
        }
        if let Some((_, u, v)) = best {
            edges.push(EdgeKey::new(u, v));
        }
        for (v, j) in joined.iter_mut().enumerate() {
            if labels[v] == label {
                *j = true;
            }
        }
    }
    components - 1
}
