//! Delaunay triangulation by incremental Bowyer-Watson insertion.
//!
//! Only the edge set matters here, so triangles are kept as plain index
//! triples with a cached circumcircle. Quadratic in the point count, which is
//! fine for the few hundred nodes a visual run uses.

use std::collections::{BTreeSet, HashMap};

use crate::graph::EdgeKey;
use crate::point::Point;

/// Margin of the enclosing super-triangle, in multiples of the point spread.
const SUPER_MARGIN: f64 = 64.0;

#[derive(Debug, Clone, Copy)]
struct Triangle {
    v: [usize; 3],
    center: Point,
    radius_sq: f64,
}

impl Triangle {
    fn new(v: [usize; 3], verts: &[Point]) -> Self {
        let (a, b, c) = (verts[v[0]], verts[v[1]], verts[v[2]]);
        let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
        if d.abs() < f64::EPSILON {
            // Collinear: any later point invalidates it.
            return Self {
                v,
                center: Point::new(f64::NAN, f64::NAN),
                radius_sq: f64::INFINITY,
            };
        }
        let a2 = a.x * a.x + a.y * a.y;
        let b2 = b.x * b.x + b.y * b.y;
        let c2 = c.x * c.x + c.y * c.y;
        let center = Point::new(
            (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
            (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
        );
        Self {
            v,
            center,
            radius_sq: center.distance_sq(&a),
        }
    }

    fn circumcircle_contains(&self, p: &Point) -> bool {
        if self.radius_sq.is_infinite() {
            return true;
        }
        p.distance_sq(&self.center) < self.radius_sq
    }

    fn edges(&self) -> [(usize, usize); 3] {
        [
            (self.v[0], self.v[1]),
            (self.v[1], self.v[2]),
            (self.v[2], self.v[0]),
        ]
    }
}

fn undirected(e: (usize, usize)) -> (usize, usize) {
    if e.0 <= e.1 {
        e
    } else {
        (e.1, e.0)
    }
}

/// Edges of the Delaunay triangulation of `points`, sorted and deduplicated.
///
/// Fewer than three points, or an all-collinear input, yields a chain through
/// the points in coordinate order instead.
pub fn delaunay_edges(points: &[Point]) -> Vec<EdgeKey> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }
    if n == 2 {
        return vec![EdgeKey::new(0, 1)];
    }

    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let spread = (max_x - min_x).max(max_y - min_y).max(1.0);
    let mid = Point::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);

    let mut verts = points.to_vec();
    verts.push(Point::new(mid.x - SUPER_MARGIN * spread, mid.y - spread));
    verts.push(Point::new(mid.x, mid.y + SUPER_MARGIN * spread));
    verts.push(Point::new(mid.x + SUPER_MARGIN * spread, mid.y - spread));

    let mut triangles = vec![Triangle::new([n, n + 1, n + 2], &verts)];

    for i in 0..n {
        let p = verts[i];
        let (bad, good): (Vec<Triangle>, Vec<Triangle>) = triangles
            .into_iter()
            .partition(|t| t.circumcircle_contains(&p));
        triangles = good;

        // Boundary of the cavity: edges belonging to exactly one bad triangle.
        let mut counts: HashMap<(usize, usize), usize> = HashMap::new();
        for t in &bad {
            for e in t.edges() {
                *counts.entry(undirected(e)).or_insert(0) += 1;
            }
        }
        for t in &bad {
            for (x, y) in t.edges() {
                if counts[&undirected((x, y))] == 1 {
                    triangles.push(Triangle::new([x, y, i], &verts));
                }
            }
        }
    }

    let mut edges = BTreeSet::new();
    for t in &triangles {
        if t.v.iter().all(|&v| v < n) {
            for (x, y) in t.edges() {
                if x != y {
                    edges.insert(EdgeKey::new(x, y));
                }
            }
        }
    }

    if edges.is_empty() {
        return chain(points);
    }
    edges.into_iter().collect()
}

/// Link points consecutively in `(x, y)` order.
fn chain(points: &[Point]) -> Vec<EdgeKey> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&i, &j| {
        points[i]
            .x
            .total_cmp(&points[j].x)
            .then(points[i].y.total_cmp(&points[j].y))
    });
    let mut edges: Vec<EdgeKey> = order.windows(2).map(|w| EdgeKey::new(w[0], w[1])).collect();
    edges.sort();
    edges
}
