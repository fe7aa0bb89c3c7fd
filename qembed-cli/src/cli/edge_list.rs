//! Plain-text edge-list parsing.
//!
//! One edge per line as two unsigned integers separated by whitespace.
//! Blank lines are skipped and `#` starts a comment that runs to the end of
//! the line.

use std::{io::BufRead, num::ParseIntError};

use thiserror::Error;

/// Errors raised while parsing an edge list.
#[derive(Debug, Error)]
pub enum EdgeListError {
    /// Reading from the underlying source failed.
    #[error("failed to read line {line}: {source}")]
    Read {
        /// One-based line number.
        line: usize,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A line did not contain exactly two node ids.
    #[error("line {line}: expected two node ids, found `{content}`")]
    Malformed {
        /// One-based line number.
        line: usize,
        /// Line content with the comment stripped.
        content: String,
    },
    /// A node id was not an unsigned integer.
    #[error("line {line}: invalid node id `{token}`: {source}")]
    InvalidNode {
        /// One-based line number.
        line: usize,
        /// Offending token.
        token: String,
        /// Integer parse failure.
        #[source]
        source: ParseIntError,
    },
}

/// Reads `(u, v)` pairs from `reader`.
///
/// # Errors
/// Returns [`EdgeListError`] on I/O failure or on a malformed line.
///
/// # Examples
/// ```
/// use qembed_cli::cli::parse_edge_list;
///
/// let input = "# triangle\n1 2\n2 3\n\n3 1 # closing edge\n";
/// let edges = parse_edge_list(input.as_bytes()).expect("valid edge list");
/// assert_eq!(edges, vec![(1, 2), (2, 3), (3, 1)]);
/// ```
pub fn parse_edge_list<R: BufRead>(reader: R) -> Result<Vec<(u32, u32)>, EdgeListError> {
    let mut edges = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let number = index + 1;
        let line = line.map_err(|source| EdgeListError::Read {
            line: number,
            source,
        })?;
        let content = line.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }
        let mut tokens = content.split_whitespace();
        let (Some(left), Some(right), None) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(EdgeListError::Malformed {
                line: number,
                content: content.to_owned(),
            });
        };
        edges.push((parse_node(number, left)?, parse_node(number, right)?));
    }
    Ok(edges)
}

fn parse_node(line: usize, token: &str) -> Result<u32, EdgeListError> {
    token.parse().map_err(|source| EdgeListError::InvalidNode {
        line,
        token: token.to_owned(),
        source,
    })
}
