// src/common/error.rs

/// Errors produced by the airtune read/write protocol.
///
/// `E` is the error type of the caller buffer used on the read path. Paths that
/// never touch caller memory (parsing, dispatch) use the default `E = ()`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AirtuneError<E = ()>
where
    E: core::fmt::Debug,
{
    /// Copying bytes to the caller's memory failed.
    #[error("transfer to caller memory failed: {0:?}")]
    TransferFault(E),

    /// Byte 1 of a command was not the `=` delimiter.
    #[error("missing '=' delimiter (found {0:#04x})")]
    MissingDelimiter(u8),

    /// No digit followed the delimiter.
    #[error("command carries no numeric value")]
    MissingValue,

    /// A value of zero was rejected by `ZeroValuePolicy::RejectZero`.
    #[error("command value 0 rejected by zero-value policy")]
    ZeroValueRejected,

    /// The numeric literal does not fit in an `i64`.
    #[error("command value out of range")]
    ValueOutOfRange,

    /// Well-formed command whose header is not G, O or R.
    #[error("invalid input header {0:#04x}")]
    InvalidParameter(u8),

    /// Device output was not a decimal integer line.
    #[error("reading is not a decimal integer")]
    InvalidReading,

    /// Rendered text did not fit its fixed-capacity buffer.
    #[error("formatted text exceeds its fixed capacity")]
    FormatOverflow,
}

impl<E: core::fmt::Debug> AirtuneError<E> {
    /// True for the malformed-write kinds that are silently accepted by default.
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            AirtuneError::MissingDelimiter(_)
                | AirtuneError::MissingValue
                | AirtuneError::ZeroValueRejected
                | AirtuneError::ValueOutOfRange
        )
    }

    /// True for any error the write path swallows under the silent policy.
    pub fn is_ignored_write(&self) -> bool {
        self.is_parse_failure() || matches!(self, AirtuneError::InvalidParameter(_))
    }

    /// Converts the transfer error type, leaving every other variant untouched.
    pub fn map_transfer<F, M>(self, f: M) -> AirtuneError<F>
    where
        F: core::fmt::Debug,
        M: FnOnce(E) -> F,
    {
        match self {
            AirtuneError::TransferFault(e) => AirtuneError::TransferFault(f(e)),
            AirtuneError::MissingDelimiter(b) => AirtuneError::MissingDelimiter(b),
            AirtuneError::MissingValue => AirtuneError::MissingValue,
            AirtuneError::ZeroValueRejected => AirtuneError::ZeroValueRejected,
            AirtuneError::ValueOutOfRange => AirtuneError::ValueOutOfRange,
            AirtuneError::InvalidParameter(b) => AirtuneError::InvalidParameter(b),
            AirtuneError::InvalidReading => AirtuneError::InvalidReading,
            AirtuneError::FormatOverflow => AirtuneError::FormatOverflow,
        }
    }
}

impl<E: core::fmt::Debug> From<core::fmt::Error> for AirtuneError<E> {
    fn from(_: core::fmt::Error) -> Self {
        AirtuneError::FormatOverflow
    }
}
