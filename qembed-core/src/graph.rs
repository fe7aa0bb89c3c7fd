//! Minimal mutable undirected graph used by the decomposition pipeline.
//!
//! The store keeps ordered adjacency sets only; the edge set is derived from
//! them so the two can never diverge. Ordered containers keep iteration
//! deterministic, which in turn keeps seeded extractor runs reproducible.
//!
//! Removal comes in two flavours. [`Graph::remove_node`] is the plain
//! primitive. [`Graph::remove_node_preserving_ghosts`] additionally reports
//! the neighbours that were left isolated ("ghost" nodes) and guarantees they
//! remain members of the graph, so no node can drop out of the L/R/OCT
//! accounting while edges are being stripped away.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    hash::Hash,
};

use crate::error::{QembedError, Result};

/// Identifier bound for graph nodes.
///
/// Implemented for every `Copy + Ord + Hash + Debug` type, so plain integers
/// and `char` work out of the box.
pub trait NodeId: Copy + Ord + Hash + fmt::Debug {}

impl<T> NodeId for T where T: Copy + Ord + Hash + fmt::Debug {}

/// Undirected simple graph with ordered adjacency.
///
/// # Examples
/// ```
/// use qembed_core::Graph;
///
/// let graph = Graph::from_edges([(1_u32, 2), (2, 3), (3, 2)]).expect("no self-loops");
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.degree(&2), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph<N: NodeId> {
    adjacency: BTreeMap<N, BTreeSet<N>>,
}

impl<N: NodeId> Default for Graph<N> {
    fn default() -> Self {
        Self {
            adjacency: BTreeMap::new(),
        }
    }
}

impl<N: NodeId> Graph<N> {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from an edge list.
    ///
    /// Duplicate edges and reversed duplicates collapse into one edge.
    ///
    /// # Errors
    /// Returns [`QembedError::SelfLoop`] when an edge joins a node to itself.
    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, N)>,
    {
        let mut graph = Self::new();
        for (left, right) in edges {
            graph.add_edge(left, right)?;
        }
        Ok(graph)
    }

    /// Inserts `node` as an isolated node. No-op when it is already present.
    pub fn add_node(&mut self, node: N) {
        self.adjacency.entry(node).or_default();
    }

    /// Inserts the undirected edge `{left, right}`, adding missing endpoints.
    ///
    /// Returns `true` when the edge was not present before.
    ///
    /// # Errors
    /// Returns [`QembedError::SelfLoop`] when `left == right`.
    pub fn add_edge(&mut self, left: N, right: N) -> Result<bool> {
        if left == right {
            return Err(QembedError::SelfLoop {
                node: format!("{left:?}"),
            });
        }
        let inserted = self.adjacency.entry(left).or_default().insert(right);
        self.adjacency.entry(right).or_default().insert(left);
        Ok(inserted)
    }

    /// Removes `node` and every incident edge. No-op when it is absent.
    ///
    /// Neighbours of the removed node stay in the graph.
    pub fn remove_node(&mut self, node: &N) {
        let Some(neighbours) = self.adjacency.remove(node) else {
            return;
        };
        for neighbour in &neighbours {
            if let Some(adjacent) = self.adjacency.get_mut(neighbour) {
                adjacent.remove(node);
            }
        }
    }

    /// Removes `node` and returns the neighbours it orphaned.
    ///
    /// A neighbour is orphaned when `node` was its only neighbour. Orphans are
    /// re-inserted as isolated nodes, so they remain selectable as trivial
    /// degree-zero picks later on.
    ///
    /// # Examples
    /// ```
    /// use qembed_core::Graph;
    ///
    /// let mut graph = Graph::from_edges([(1_u32, 2), (2, 3), (3, 4)]).expect("valid");
    /// let ghosts = graph.remove_node_preserving_ghosts(&2);
    /// assert_eq!(ghosts, vec![1]);
    /// assert!(graph.contains_node(&1));
    /// assert_eq!(graph.degree(&1), 0);
    /// assert_eq!(graph.degree(&3), 1);
    /// ```
    pub fn remove_node_preserving_ghosts(&mut self, node: &N) -> Vec<N> {
        let orphans: Vec<N> = self
            .neighbors(node)
            .filter(|neighbour| self.degree(neighbour) == 1)
            .collect();
        self.remove_node(node);
        for orphan in &orphans {
            self.add_node(*orphan);
        }
        orphans
    }

    /// Returns a copy of the graph with `nodes` removed, preserving ghosts.
    ///
    /// The receiver is left untouched.
    #[must_use]
    pub fn without_nodes<'a, I>(&self, nodes: I) -> Self
    where
        I: IntoIterator<Item = &'a N>,
        N: 'a,
    {
        let mut reduced = self.clone();
        for node in nodes {
            reduced.remove_node_preserving_ghosts(node);
        }
        reduced
    }

    /// Returns `true` when `node` is a member of the graph.
    #[must_use]
    pub fn contains_node(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Returns `true` when the undirected edge `{left, right}` exists.
    #[must_use]
    pub fn has_edge(&self, left: &N, right: &N) -> bool {
        self.adjacency
            .get(left)
            .is_some_and(|adjacent| adjacent.contains(right))
    }

    /// Returns the degree of `node`, or zero when it is absent.
    #[must_use]
    pub fn degree(&self, node: &N) -> usize {
        self.adjacency.get(node).map_or(0, BTreeSet::len)
    }

    /// Iterates over the neighbours of `node` in ascending order.
    ///
    /// Yields nothing when `node` is absent.
    pub fn neighbors<'a>(&'a self, node: &N) -> impl Iterator<Item = N> + use<'a, N> {
        self.adjacency
            .get(node)
            .into_iter()
            .flat_map(|adjacent| adjacent.iter().copied())
    }

    /// Iterates over the nodes in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.adjacency.keys().copied()
    }

    /// Iterates over the edges as canonical `(min, max)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (N, N)> + '_ {
        self.adjacency.iter().flat_map(|(node, adjacent)| {
            adjacent
                .iter()
                .filter(move |other| *other > node)
                .map(move |other| (*node, *other))
        })
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Returns `true` when the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Returns every node that attains the minimum degree, in node order.
    ///
    /// Returns an empty vector for an empty graph.
    #[must_use]
    pub fn min_degree_nodes(&self) -> Vec<N> {
        let Some(minimum) = self.adjacency.values().map(BTreeSet::len).min() else {
            return Vec::new();
        };
        self.adjacency
            .iter()
            .filter(|(_, adjacent)| adjacent.len() == minimum)
            .map(|(node, _)| *node)
            .collect()
    }
}
