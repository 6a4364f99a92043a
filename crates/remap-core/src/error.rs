/// An error that can occur while running the mapping pipeline.
///
/// Recoverable problems in user input never surface here; they are routed
/// through [`crate::Reporter`] as diagnostics. `Error` is reserved for the
/// two cases that abort a mapper outright: a refused [`crate::SourceWriter`]
/// and broken internal invariants.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
}

#[derive(Debug)]
enum ErrorKind {
    /// The output sink rejected a generated source file.
    Writer { mapper: String, message: String },

    /// An internal invariant did not hold. Always a programming error.
    Internal(String),
}

impl Error {
    pub fn writer(mapper: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Writer {
                mapper: mapper.into(),
                message: message.into(),
            },
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Internal(message.into()),
        }
    }

    /// True when the error was produced by the output sink.
    pub fn is_writer(&self) -> bool {
        matches!(self.kind, ErrorKind::Writer { .. })
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.kind {
            ErrorKind::Writer { mapper, message } => {
                write!(f, "failed to write generated source for {mapper}: {message}")
            }
            ErrorKind::Internal(message) => write!(f, "internal error: {message}"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_error_display() {
        let err = Error::writer("demo::TicketMapper", "disk full");
        assert_eq!(
            err.to_string(),
            "failed to write generated source for demo::TicketMapper: disk full"
        );
        assert!(err.is_writer());
    }

    #[test]
    fn internal_error_display() {
        let err = Error::internal("node arena handle out of range");
        assert_eq!(err.to_string(), "internal error: node arena handle out of range");
        assert!(!err.is_writer());
    }
}
