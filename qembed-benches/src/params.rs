//! Benchmark parameter types.

use std::fmt;

/// Size of a generated benchmark graph.
#[derive(Clone, Copy, Debug)]
pub struct GraphBenchParams {
    /// Number of nodes.
    pub nodes: u32,
    /// Average degree; the graph has `nodes * degree / 2` edges.
    pub degree: u32,
}

impl GraphBenchParams {
    /// Returns the number of edges to draw.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        let half_endpoints = (u64::from(self.nodes) * u64::from(self.degree)).div_euclid(2);
        usize::try_from(half_endpoints).unwrap_or(usize::MAX)
    }
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},d={}", self.nodes, self.degree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(10, 4, 20)]
    #[case(7, 3, 10)]
    #[case(1, 0, 0)]
    fn edge_count_halves_endpoint_total(
        #[case] nodes: u32,
        #[case] degree: u32,
        #[case] expected: usize,
    ) {
        assert_eq!(GraphBenchParams { nodes, degree }.edge_count(), expected);
    }

    #[test]
    fn display_is_a_compact_benchmark_id() {
        let params = GraphBenchParams { nodes: 40, degree: 6 };
        assert_eq!(params.to_string(), "n=40,d=6");
    }
}
