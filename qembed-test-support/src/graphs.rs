//! Named edge lists shared by unit tests, integration tests and benches.
//!
//! Nodes are numbered from zero unless stated otherwise.

/// Edges of the cycle `0 - 1 - ... - (n - 1) - 0`.
///
/// # Examples
/// ```
/// use qembed_test_support::graphs::cycle;
///
/// assert_eq!(cycle(3), vec![(0, 1), (1, 2), (2, 0)]);
/// ```
#[must_use]
pub fn cycle(n: u32) -> Vec<(u32, u32)> {
    (0..n).map(|node| (node, (node + 1) % n)).collect()
}

/// Edges of the complete graph on `n` nodes.
#[must_use]
pub fn complete(n: u32) -> Vec<(u32, u32)> {
    (0..n)
        .flat_map(|left| (left + 1..n).map(move |right| (left, right)))
        .collect()
}

/// Edges of the complete bipartite graph with sides `0..a` and `a..a + b`.
#[must_use]
pub fn complete_bipartite(a: u32, b: u32) -> Vec<(u32, u32)> {
    (0..a)
        .flat_map(|left| (a..a + b).map(move |right| (left, right)))
        .collect()
}

/// Edges of the Petersen graph: outer 5-cycle, inner pentagram, spokes.
#[must_use]
pub fn petersen() -> Vec<(u32, u32)> {
    let outer = (0..5).map(|i| (i, (i + 1) % 5));
    let inner = (0..5).map(|i| (5 + i, 5 + (i + 2) % 5));
    let spokes = (0..5).map(|i| (i, i + 5));
    outer.chain(inner).chain(spokes).collect()
}

/// Edges of the `rows x columns` grid graph.
#[must_use]
pub fn grid(rows: u32, columns: u32) -> Vec<(u32, u32)> {
    let id = move |row: u32, column: u32| row * columns + column;
    let mut edges = Vec::new();
    for row in 0..rows {
        for column in 0..columns {
            if column + 1 < columns {
                edges.push((id(row, column), id(row, column + 1)));
            }
            if row + 1 < rows {
                edges.push((id(row, column), id(row + 1, column)));
            }
        }
    }
    edges
}
