//! Paths from a single source, and connected components.
//!
//! The searches are iterative, using this crate's [`Stack`] and [`Queue`], so
//! long paths don't overflow the call stack.

use super::{validate_vertex, Graph};
use crate::collections::{Queue, Stack};

/// Follows `edge_to` back from `v` to the source. `v` must be reachable.
fn walk_back(edge_to: &[Option<usize>], v: usize) -> Vec<usize> {
    let mut path = Stack::new();
    let mut x = v;
    path.push(x);
    while let Some(prev) = edge_to[x] {
        path.push(prev);
        x = prev;
    }
    path.iter().copied().collect()
}

/// Depth-first search from a source vertex.
#[derive(Clone, Debug)]
pub struct DepthFirstPaths {
    source: usize,
    marked: Vec<bool>,
    /// The vertex before each reached vertex on its path. `None` for the source and unreached vertices.
    edge_to: Vec<Option<usize>>,
}

impl DepthFirstPaths {
    pub fn new(g: &Graph, source: usize) -> Self {
        validate_vertex(source, g.vertices());
        let mut marked = vec![false; g.vertices()];
        let mut edge_to = vec![None; g.vertices()];
        // Each frame is a vertex and the position of the next neighbour to look at.
        let mut stack = Stack::new();
        marked[source] = true;
        stack.push((source, 0));
        while let Some((v, next)) = stack.pop() {
            let Some(&w) = g.adj(v).get(next) else {
                continue;
            };
            stack.push((v, next + 1));
            if !marked[w] {
                marked[w] = true;
                edge_to[w] = Some(v);
                stack.push((w, 0));
            }
        }
        DepthFirstPaths {
            source,
            marked,
            edge_to,
        }
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn has_path_to(&self, v: usize) -> bool {
        self.marked[v]
    }

    /// A path from the source to `v`, both included, or `None` if `v` can't be reached.
    pub fn path_to(&self, v: usize) -> Option<Vec<usize>> {
        self.has_path_to(v).then(|| walk_back(&self.edge_to, v))
    }
}

/// Breadth-first search from a source vertex. Its paths have the fewest edges.
#[derive(Clone, Debug)]
pub struct BreadthFirstPaths {
    source: usize,
    dist_to: Vec<Option<usize>>,
    edge_to: Vec<Option<usize>>,
}

impl BreadthFirstPaths {
    pub fn new(g: &Graph, source: usize) -> Self {
        validate_vertex(source, g.vertices());
        let mut dist_to = vec![None; g.vertices()];
        let mut edge_to = vec![None; g.vertices()];
        let mut queue = Queue::new();
        dist_to[source] = Some(0);
        queue.enqueue(source);
        while let Some(v) = queue.dequeue() {
            let dist = dist_to[v].map_or(0, |d| d + 1);
            for &w in g.adj(v) {
                if dist_to[w].is_none() {
                    dist_to[w] = Some(dist);
                    edge_to[w] = Some(v);
                    queue.enqueue(w);
                }
            }
        }
        BreadthFirstPaths {
            source,
            dist_to,
            edge_to,
        }
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn has_path_to(&self, v: usize) -> bool {
        self.dist_to[v].is_some()
    }

    /// The number of edges on a shortest path to `v`.
    pub fn dist_to(&self, v: usize) -> Option<usize> {
        self.dist_to[v]
    }

    /// A shortest path from the source to `v`, both included.
    pub fn path_to(&self, v: usize) -> Option<Vec<usize>> {
        self.has_path_to(v).then(|| walk_back(&self.edge_to, v))
    }
}

/// The connected components of an undirected graph.
#[derive(Clone, Debug)]
pub struct ConnectedComponents {
    id: Vec<usize>,
    count: usize,
}

impl ConnectedComponents {
    pub fn new(g: &Graph) -> Self {
        let mut id: Vec<Option<usize>> = vec![None; g.vertices()];
        let mut count = 0;
        for s in 0..g.vertices() {
            if id[s].is_some() {
                continue;
            }
            let mut stack = Stack::new();
            id[s] = Some(count);
            stack.push(s);
            while let Some(v) = stack.pop() {
                for &w in g.adj(v) {
                    if id[w].is_none() {
                        id[w] = Some(count);
                        stack.push(w);
                    }
                }
            }
            count += 1;
        }
        ConnectedComponents {
            id: id.into_iter().flatten().collect(),
            count,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// The component of `v`, between `0` and `count() - 1`.
    pub fn id(&self, v: usize) -> usize {
        self.id[v]
    }

    pub fn connected(&self, v: usize, w: usize) -> bool {
        self.id[v] == self.id[w]
    }
}
