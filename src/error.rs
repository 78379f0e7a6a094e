use thiserror::Error;

/// Errors returned by the cursor operations of a [`List`](crate::List).
///
/// Both variants are recoverable: the list is left exactly as it was
/// before the failing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
    /// The cursor rests on a position the operation is not defined for,
    /// e.g. deleting the head or moving before it.
    #[error("operation is not allowed at the current cursor position")]
    IllegalPosition,
    /// A node could not be allocated.
    #[error("out of memory while allocating a list node")]
    OutOfMemory,
}

/// Errors returned by [`OrderedSet`](crate::OrderedSet) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SetError {
    /// Heap exhaustion, or no set was supplied where one was required.
    #[error("allocation error")]
    Allocation,
    /// The underlying list rejected a cursor operation.
    #[error("list cursor error: {0}")]
    Cursor(ListError),
}

impl From<ListError> for SetError {
    fn from(err: ListError) -> Self {
        match err {
            ListError::OutOfMemory => SetError::Allocation,
            err @ ListError::IllegalPosition => SetError::Cursor(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ListError, SetError};

    #[test]
    fn list_error_converts_into_set_error() {
        assert_eq!(SetError::from(ListError::OutOfMemory), SetError::Allocation);
        assert_eq!(
            SetError::from(ListError::IllegalPosition),
            SetError::Cursor(ListError::IllegalPosition)
        );
    }

    #[test]
    fn errors_display() {
        assert_eq!(
            SetError::Cursor(ListError::IllegalPosition).to_string(),
            "list cursor error: operation is not allowed at the current cursor position"
        );
        assert_eq!(SetError::Allocation.to_string(), "allocation error");
    }
}
