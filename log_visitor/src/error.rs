use std::fmt::{Display, Formatter};

/// Failure of a single invocation. The underlying cause is logged where it
/// happens; callers only ever see the generic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitorLogError {
    /// The event had no text `body`, or the body was not a visitor record.
    InvalidRequest,
    /// Marshalling the record or writing it to DynamoDB failed.
    InternalError,
}

impl std::error::Error for VisitorLogError {}

impl Display for VisitorLogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VisitorLogError::InvalidRequest => write!(f, "invalid request body"),
            VisitorLogError::InternalError => write!(f, "intenal server error"),
        }
    }
}

#[test]
fn test_error_messages() {
    assert_eq!(VisitorLogError::InvalidRequest.to_string(), "invalid request body");
    assert_eq!(VisitorLogError::InternalError.to_string(), "intenal server error");
}

#[test]
fn test_into_lambda_error() {
    let err: lambda_runtime::Error = VisitorLogError::InternalError.into();
    assert_eq!(err.to_string(), "intenal server error");
}
