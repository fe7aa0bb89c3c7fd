//! Topology dimension solver.
//!
//! The target hardware is a grid of `rows × columns` unit cells, each a
//! complete bipartite block with `capacity` nodes per shore. Nodes on shore 0
//! chain vertically along a column ("column family"), nodes on shore 1 chain
//! horizontally along a row ("row family"), so a column family of
//! `columns · capacity` slots crosses a row family of `rows · capacity` slots.
//!
//! `L` lives in the column family, `R` in the row family, and every OCT node
//! takes one slot in each family so it can reach everything. The solver
//! therefore needs `|OCT| + |L|` column slots and `|OCT| + |R|` row slots.

use std::fmt;

use tracing::{debug, instrument};

use crate::error::{QembedError, Result};

/// Largest number of grid rows or columns the hardware offers.
pub const MAX_GRID_SIDE: usize = 8;
/// Largest number of slots along one axis (`side · capacity`).
pub const MAX_AXIS_SLOTS: usize = 64;
/// Smallest cell capacity explored by the incremental search.
pub const BASE_CAPACITY: usize = 2;
/// Largest cell capacity explored by the incremental search.
pub const MAX_SEARCH_CAPACITY: usize = MAX_AXIS_SLOTS / MAX_GRID_SIDE;

/// Validated grid dimensions of the target topology.
///
/// # Examples
/// ```
/// use qembed_core::TopologyDimensions;
///
/// let dims = TopologyDimensions::new(2, 2, 4).expect("within the ceiling");
/// assert_eq!(dims.column_slots(), 8);
/// assert!(TopologyDimensions::new(9, 1, 1).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TopologyDimensions {
    rows: usize,
    columns: usize,
    capacity: usize,
}

impl TopologyDimensions {
    /// Creates dimensions after checking them against the hardware ceiling.
    ///
    /// # Errors
    /// Returns [`QembedError::InvalidDimensions`] when any axis is zero, a
    /// grid side exceeds [`MAX_GRID_SIDE`], or an axis would hold more than
    /// [`MAX_AXIS_SLOTS`] slots.
    pub fn new(rows: usize, columns: usize, capacity: usize) -> Result<Self> {
        let within_ceiling = rows > 0
            && columns > 0
            && capacity > 0
            && rows <= MAX_GRID_SIDE
            && columns <= MAX_GRID_SIDE
            && rows.saturating_mul(capacity) <= MAX_AXIS_SLOTS
            && columns.saturating_mul(capacity) <= MAX_AXIS_SLOTS;
        if !within_ceiling {
            return Err(QembedError::InvalidDimensions {
                rows,
                columns,
                capacity,
            });
        }
        Ok(Self {
            rows,
            columns,
            capacity,
        })
    }

    /// Returns the number of grid rows.
    #[must_use]
    #[rustfmt::skip]
    pub fn rows(&self) -> usize { self.rows }

    /// Returns the number of grid columns.
    #[must_use]
    #[rustfmt::skip]
    pub fn columns(&self) -> usize { self.columns }

    /// Returns the shore size of each unit cell.
    #[must_use]
    #[rustfmt::skip]
    pub fn capacity(&self) -> usize { self.capacity }

    /// Returns the number of vertical (shore 0) chains.
    #[must_use]
    pub fn column_slots(&self) -> usize {
        self.columns * self.capacity
    }

    /// Returns the number of horizontal (shore 1) chains.
    #[must_use]
    pub fn row_slots(&self) -> usize {
        self.rows * self.capacity
    }

    /// Returns the number of connector slots on the grid diagonal.
    #[must_use]
    pub fn diagonal_slots(&self) -> usize {
        self.rows.min(self.columns) * self.capacity
    }

    /// Returns `true` when `oct`, `left` and `right` nodes fit.
    #[must_use]
    pub fn fits(&self, oct: usize, left: usize, right: usize) -> bool {
        oct <= self.diagonal_slots()
            && oct.saturating_add(left) <= self.column_slots()
            && oct.saturating_add(right) <= self.row_slots()
    }
}

impl fmt::Display for TopologyDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.rows, self.columns, self.capacity)
    }
}

/// Finds the smallest topology hosting `oct`, `left` and `right` nodes.
///
/// Without OCT nodes the graph is already bipartite and a single unit cell
/// of capacity `max(left, right)` hosts it whenever that stays within the
/// ceiling. Otherwise the search starts at `1×1×2`, grows the grid side
/// while the capacity stays at two, and then grows the capacity.
///
/// # Errors
/// Returns [`QembedError::EmptyCounts`] when every count is zero and
/// [`QembedError::SizingFailure`] when the counts exceed the `8×8×8`
/// ceiling.
///
/// # Examples
/// ```
/// use qembed_core::fit_topology;
///
/// let dims = fit_topology(0, 3, 3).expect("fits one cell");
/// assert_eq!((dims.rows(), dims.columns(), dims.capacity()), (1, 1, 3));
///
/// let dims = fit_topology(2, 3, 1).expect("fits a small grid");
/// assert_eq!((dims.rows(), dims.columns(), dims.capacity()), (3, 3, 2));
/// ```
#[instrument(name = "core.fit_topology", err, fields(dims = tracing::field::Empty))]
pub fn fit_topology(oct: usize, left: usize, right: usize) -> Result<TopologyDimensions> {
    if oct == 0 && left == 0 && right == 0 {
        return Err(QembedError::EmptyCounts);
    }

    if oct == 0 {
        let capacity = left.max(right);
        if capacity <= MAX_AXIS_SLOTS {
            let dims = TopologyDimensions::new(1, 1, capacity)?;
            tracing::Span::current().record("dims", tracing::field::display(dims));
            return Ok(dims);
        }
    }

    let demand = oct.saturating_add(left.max(right));
    let mut side = 1;
    let mut capacity = BASE_CAPACITY;
    while side * capacity < demand && side < MAX_GRID_SIDE {
        side += 1;
    }
    while side * capacity < demand && capacity < MAX_SEARCH_CAPACITY {
        capacity += 1;
    }

    if side * capacity < demand {
        debug!(demand, "demand exceeds the topology ceiling");
        return Err(QembedError::SizingFailure { oct, left, right });
    }

    let dims = TopologyDimensions::new(side, side, capacity)?;
    tracing::Span::current().record("dims", tracing::field::display(dims));
    Ok(dims)
}
