//! Error types for the qembed core library.
//!
//! Defines the error enum exposed by the public API, its stable codes, and a
//! convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr, $kind:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }

            /// Return the broad category this code belongs to.
            #[must_use]
            pub const fn kind(self) -> ErrorKind {
                match self {
                    $(Self::$CodeVariant => ErrorKind::$kind,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Broad error categories reported to callers.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// The operation needs a graph with at least one edge.
    EmptyGraph,
    /// An argument was malformed and rejected before any algorithm ran.
    InvalidArgument,
    /// The requested embedding exceeds the topology ceiling.
    SizingFailure,
}

/// Error type produced by the decomposition and embedding operations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum QembedError {
    /// The graph has no edges.
    #[error("graph has not been populated or has been cleared")]
    EmptyGraph,
    /// An edge joined a node to itself.
    #[error("edge ({node}, {node}) is a self-loop")]
    SelfLoop {
        /// Debug rendering of the offending node.
        node: String,
    },
    /// Topology sizing was requested for zero nodes.
    #[error("cannot size a topology for zero nodes")]
    EmptyCounts,
    /// Topology dimensions were zero or exceeded the hardware ceiling.
    #[error("invalid topology dimensions {rows}x{columns}x{capacity}")]
    InvalidDimensions {
        /// Requested grid rows.
        rows: usize,
        /// Requested grid columns.
        columns: usize,
        /// Requested unit-cell shore size.
        capacity: usize,
    },
    /// The ensurance retry budget must allow at least one attempt.
    #[error("retry budget must be at least 1")]
    InvalidRetryBudget,
    /// A node was supplied more than once to the embedder.
    #[error("node {node} was supplied more than once")]
    DuplicateNode {
        /// Debug rendering of the duplicated node.
        node: String,
    },
    /// The counts do not fit within the topology.
    #[error("cannot fit {oct} OCT, {left} left and {right} right nodes into the topology")]
    SizingFailure {
        /// Number of OCT connector nodes.
        oct: usize,
        /// Number of left-family nodes.
        left: usize,
        /// Number of right-family nodes.
        right: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`QembedError`] variants.
    enum QembedErrorCode for QembedError {
        /// The graph has no edges.
        EmptyGraph => EmptyGraph => "QEMBED_EMPTY_GRAPH", EmptyGraph,
        /// An edge joined a node to itself.
        SelfLoop => SelfLoop { .. } => "QEMBED_SELF_LOOP", InvalidArgument,
        /// Topology sizing was requested for zero nodes.
        EmptyCounts => EmptyCounts => "QEMBED_EMPTY_COUNTS", InvalidArgument,
        /// Topology dimensions were zero or exceeded the ceiling.
        InvalidDimensions => InvalidDimensions { .. } => "QEMBED_INVALID_DIMENSIONS", InvalidArgument,
        /// The ensurance retry budget was zero.
        InvalidRetryBudget => InvalidRetryBudget => "QEMBED_INVALID_RETRY_BUDGET", InvalidArgument,
        /// A node was supplied more than once to the embedder.
        DuplicateNode => DuplicateNode { .. } => "QEMBED_DUPLICATE_NODE", InvalidArgument,
        /// The counts do not fit within the topology.
        SizingFailure => SizingFailure { .. } => "QEMBED_SIZING_FAILURE", SizingFailure,
    }
}

impl QembedError {
    /// Retrieve the broad [`ErrorKind`] of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.code().kind()
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, QembedError>;
