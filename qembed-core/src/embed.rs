//! Coordinate assignment onto the unit-cell grid.
//!
//! Slots are handed out densely in ascending node order: OCT connectors take
//! the first slots of both families, `L` continues in the column family and
//! `R` continues in the row family. Slot `s` of either family lies in grid
//! line `s / capacity` at offset `s % capacity`.
//!
//! A placement is reported through its anchor coordinate: the cell where the
//! chain crosses the grid diagonal (clamped to the grid when the grid is not
//! square). A connector's two anchors therefore share one unit cell, which is
//! where its vertical and horizontal chains are coupled. [`Embedding::chain`]
//! expands a placement into every qubit its chains occupy.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use tracing::{debug, instrument};

use crate::{
    error::{QembedError, Result},
    graph::NodeId,
    topology::TopologyDimensions,
};

/// Unit-cell shore, i.e. the sublattice bit of a coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Shore {
    /// Shore 0: qubits chained vertically along a grid column.
    Vertical,
    /// Shore 1: qubits chained horizontally along a grid row.
    Horizontal,
}

impl Shore {
    /// Returns the sublattice bit (`0` or `1`).
    #[must_use]
    pub const fn bit(self) -> u8 {
        match self {
            Self::Vertical => 0,
            Self::Horizontal => 1,
        }
    }
}

/// Address of one qubit: `(row, column, shore, offset)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    /// Grid row of the unit cell.
    pub row: usize,
    /// Grid column of the unit cell.
    pub column: usize,
    /// Shore inside the unit cell.
    pub shore: Shore,
    /// Index along the shore.
    pub offset: usize,
}

impl Coordinate {
    /// Returns the coordinate as a plain `(row, column, shore, offset)` tuple.
    #[must_use]
    pub const fn as_tuple(&self) -> (usize, usize, u8, usize) {
        (self.row, self.column, self.shore.bit(), self.offset)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.row,
            self.column,
            self.shore.bit(),
            self.offset
        )
    }
}

/// Role and anchor coordinate(s) of one logical node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Member of `L`, anchored in the column family.
    Left(Coordinate),
    /// Member of `R`, anchored in the row family.
    Right(Coordinate),
    /// Member of `OCT`, anchored in both families.
    Connector {
        /// Anchor of the vertical chain.
        column: Coordinate,
        /// Anchor of the horizontal chain.
        row: Coordinate,
    },
}

impl Placement {
    /// Iterates over the anchor coordinates of this placement.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> {
        let (first, second) = match *self {
            Self::Left(coordinate) | Self::Right(coordinate) => (coordinate, None),
            Self::Connector { column, row } => (column, Some(row)),
        };
        std::iter::once(first).chain(second)
    }
}

/// Label-to-coordinate mapping produced by [`embed_coordinates`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Embedding<N: NodeId> {
    dimensions: TopologyDimensions,
    placements: BTreeMap<N, Placement>,
}

impl<N: NodeId> Embedding<N> {
    /// Returns the topology the nodes were placed in.
    #[must_use]
    #[rustfmt::skip]
    pub fn dimensions(&self) -> TopologyDimensions { self.dimensions }

    /// Returns the placement of `node`, if it was embedded.
    #[must_use]
    pub fn placement(&self, node: &N) -> Option<&Placement> {
        self.placements.get(node)
    }

    /// Iterates over all placements in node order.
    pub fn placements(&self) -> impl Iterator<Item = (N, &Placement)> + '_ {
        self.placements
            .iter()
            .map(|(node, placement)| (*node, placement))
    }

    /// Iterates over every `(node, anchor coordinate)` pair in node order.
    pub fn coordinates(&self) -> impl Iterator<Item = (N, Coordinate)> + '_ {
        self.placements.iter().flat_map(|(node, placement)| {
            placement
                .coordinates()
                .map(move |coordinate| (*node, coordinate))
        })
    }

    /// Returns the reverse mapping from anchor coordinate to node.
    #[must_use]
    pub fn labels(&self) -> BTreeMap<Coordinate, N> {
        self.coordinates()
            .map(|(node, coordinate)| (coordinate, node))
            .collect()
    }

    /// Returns every qubit occupied by the chain(s) of `node`.
    ///
    /// Vertical chains run through every grid row of their column and
    /// horizontal chains through every grid column of their row. Returns an
    /// empty vector when `node` was not embedded.
    #[must_use]
    pub fn chain(&self, node: &N) -> Vec<Coordinate> {
        let Some(placement) = self.placements.get(node) else {
            return Vec::new();
        };
        placement
            .coordinates()
            .flat_map(|anchor| self.expand(anchor))
            .collect()
    }

    /// Returns the number of embedded nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Returns `true` when no node was embedded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    fn expand(&self, anchor: Coordinate) -> Vec<Coordinate> {
        match anchor.shore {
            Shore::Vertical => (0..self.dimensions.rows())
                .map(|row| Coordinate { row, ..anchor })
                .collect(),
            Shore::Horizontal => (0..self.dimensions.columns())
                .map(|column| Coordinate { column, ..anchor })
                .collect(),
        }
    }
}

/// Assigns grid coordinates to the nodes of `left`, `right` and `oct`.
///
/// Each set is placed in ascending node order. OCT nodes become connectors
/// with one anchor in each family; the other nodes get exactly one anchor.
/// All anchors are pairwise distinct.
///
/// # Errors
/// Returns [`QembedError::DuplicateNode`] when a node appears more than once
/// across the inputs and [`QembedError::SizingFailure`] when the sets do not
/// fit `dimensions`.
///
/// # Examples
/// ```
/// use qembed_core::{Placement, TopologyDimensions, embed_coordinates};
///
/// let dims = TopologyDimensions::new(1, 1, 2).expect("valid dimensions");
/// let embedding = embed_coordinates(&[1_u32, 2], &[3, 4], &[], dims).expect("fits");
/// let Some(Placement::Left(anchor)) = embedding.placement(&2) else {
///     panic!("node 2 belongs to L");
/// };
/// assert_eq!(anchor.as_tuple(), (0, 0, 0, 1));
/// ```
#[instrument(
    name = "core.embed",
    err,
    skip_all,
    fields(
        left = left.len(),
        right = right.len(),
        oct = oct.len(),
        dims = %dimensions,
    ),
)]
pub fn embed_coordinates<N: NodeId>(
    left: &[N],
    right: &[N],
    oct: &[N],
    dimensions: TopologyDimensions,
) -> Result<Embedding<N>> {
    ensure_unique(left.iter().chain(right).chain(oct))?;
    if !dimensions.fits(oct.len(), left.len(), right.len()) {
        return Err(QembedError::SizingFailure {
            oct: oct.len(),
            left: left.len(),
            right: right.len(),
        });
    }

    let slots = SlotAllocator { dimensions };
    let mut placements = BTreeMap::new();

    for (slot, node) in sorted(oct).into_iter().enumerate() {
        placements.insert(
            node,
            Placement::Connector {
                column: slots.column_anchor(slot),
                row: slots.row_anchor(slot),
            },
        );
    }
    for (index, node) in sorted(left).into_iter().enumerate() {
        placements.insert(node, Placement::Left(slots.column_anchor(oct.len() + index)));
    }
    for (index, node) in sorted(right).into_iter().enumerate() {
        placements.insert(node, Placement::Right(slots.row_anchor(oct.len() + index)));
    }

    debug!(placed = placements.len(), "embedding complete");
    Ok(Embedding {
        dimensions,
        placements,
    })
}

struct SlotAllocator {
    dimensions: TopologyDimensions,
}

impl SlotAllocator {
    fn column_anchor(&self, slot: usize) -> Coordinate {
        let column = slot / self.dimensions.capacity();
        Coordinate {
            row: column.min(self.dimensions.rows() - 1),
            column,
            shore: Shore::Vertical,
            offset: slot % self.dimensions.capacity(),
        }
    }

    fn row_anchor(&self, slot: usize) -> Coordinate {
        let row = slot / self.dimensions.capacity();
        Coordinate {
            row,
            column: row.min(self.dimensions.columns() - 1),
            shore: Shore::Horizontal,
            offset: slot % self.dimensions.capacity(),
        }
    }
}

fn sorted<N: NodeId>(nodes: &[N]) -> Vec<N> {
    let mut ordered = nodes.to_vec();
    ordered.sort_unstable();
    ordered
}

fn ensure_unique<'a, N, I>(nodes: I) -> Result<()>
where
    N: NodeId + 'a,
    I: IntoIterator<Item = &'a N>,
{
    let mut seen = BTreeSet::new();
    for node in nodes {
        if !seen.insert(*node) {
            return Err(QembedError::DuplicateNode {
                node: format!("{node:?}"),
            });
        }
    }
    Ok(())
}
