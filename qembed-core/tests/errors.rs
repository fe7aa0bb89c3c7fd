use qembed_core::{ErrorKind, QembedError, QembedErrorCode};
use rstest::rstest;

#[rstest]
#[case(QembedError::EmptyGraph, QembedErrorCode::EmptyGraph, "QEMBED_EMPTY_GRAPH")]
#[case(
    QembedError::SelfLoop { node: "3".into() },
    QembedErrorCode::SelfLoop,
    "QEMBED_SELF_LOOP",
)]
#[case(QembedError::EmptyCounts, QembedErrorCode::EmptyCounts, "QEMBED_EMPTY_COUNTS")]
#[case(
    QembedError::InvalidDimensions { rows: 0, columns: 1, capacity: 1 },
    QembedErrorCode::InvalidDimensions,
    "QEMBED_INVALID_DIMENSIONS",
)]
#[case(
    QembedError::InvalidRetryBudget,
    QembedErrorCode::InvalidRetryBudget,
    "QEMBED_INVALID_RETRY_BUDGET",
)]
#[case(
    QembedError::DuplicateNode { node: "9".into() },
    QembedErrorCode::DuplicateNode,
    "QEMBED_DUPLICATE_NODE",
)]
#[case(
    QembedError::SizingFailure { oct: 70, left: 0, right: 0 },
    QembedErrorCode::SizingFailure,
    "QEMBED_SIZING_FAILURE",
)]
fn returns_expected_code(
    #[case] error: QembedError,
    #[case] expected: QembedErrorCode,
    #[case] rendered: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), rendered);
    assert_eq!(expected.to_string(), rendered);
}

#[rstest]
#[case(QembedError::EmptyGraph, ErrorKind::EmptyGraph)]
#[case(QembedError::EmptyCounts, ErrorKind::InvalidArgument)]
#[case(QembedError::InvalidRetryBudget, ErrorKind::InvalidArgument)]
#[case(QembedError::SelfLoop { node: "1".into() }, ErrorKind::InvalidArgument)]
#[case(
    QembedError::SizingFailure { oct: 1, left: 64, right: 0 },
    ErrorKind::SizingFailure,
)]
fn groups_codes_into_kinds(#[case] error: QembedError, #[case] expected: ErrorKind) {
    assert_eq!(error.kind(), expected);
    assert_eq!(error.code().kind(), expected);
}

#[test]
fn messages_carry_structured_fields() {
    let err = QembedError::SizingFailure {
        oct: 5,
        left: 60,
        right: 2,
    };
    assert_eq!(
        err.to_string(),
        "cannot fit 5 OCT, 60 left and 2 right nodes into the topology"
    );
    let err = QembedError::InvalidDimensions {
        rows: 9,
        columns: 9,
        capacity: 1,
    };
    assert_eq!(err.to_string(), "invalid topology dimensions 9x9x1");
}
