//! # status
//!
//! Latched stream error state

use std::fmt;

/// Last-error latch of a [`PyInputStream`](super::PyInputStream).
///
/// Operations record failures here instead of raising them; stream
/// consumers are expected to poll the latch after an operation returned
/// fewer bytes than requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamStatus {
    /// No failure recorded.
    #[default]
    NoError,
    /// A read got an empty reply from the wrapped object.
    Eof,
    /// A read raised, or returned something other than bytes.
    ReadError,
    /// A write was attempted; the stream is read-only.
    WriteError,
}

impl StreamStatus {
    /// Whether the latch records no hard failure. End of input is not a
    /// failure.
    pub fn is_ok(self) -> bool {
        matches!(self, StreamStatus::NoError | StreamStatus::Eof)
    }
}

impl fmt::Display for StreamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamStatus::NoError => write!(f, "no error"),
            StreamStatus::Eof => write!(f, "end of input"),
            StreamStatus::ReadError => write!(f, "read failure"),
            StreamStatus::WriteError => write!(f, "write failure"),
        }
    }
}

#[cfg(test)]
mod test {

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn should_default_to_no_error() {
        assert_eq!(StreamStatus::default(), StreamStatus::NoError);
    }

    #[test]
    fn should_treat_end_of_input_as_ok() {
        assert!(StreamStatus::NoError.is_ok());
        assert!(StreamStatus::Eof.is_ok());
        assert!(!StreamStatus::ReadError.is_ok());
        assert!(!StreamStatus::WriteError.is_ok());
    }

    #[test]
    fn should_format_status() {
        assert_eq!(StreamStatus::Eof.to_string(), "end of input");
        assert_eq!(StreamStatus::ReadError.to_string(), "read failure");
        assert_eq!(StreamStatus::WriteError.to_string(), "write failure");
    }
}
