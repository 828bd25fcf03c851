// src/common/parameter.rs

use super::error::AirtuneError;
use core::convert::TryFrom;
use core::fmt;

/// The tuning parameter a command mutates.
///
/// The set is closed: a header byte outside `G`, `O`, `R` is an
/// `InvalidParameter` condition, never a new variant.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Parameter {
    /// `G`: sensor gain.
    Gain,
    /// `O`: sensor offset.
    Offset,
    /// `R`: output reference value.
    Reference,
}

impl Parameter {
    pub const ALL: [Parameter; 3] = [Parameter::Gain, Parameter::Offset, Parameter::Reference];

    /// Decodes a command header byte.
    #[inline]
    pub const fn from_header(byte: u8) -> Option<Self> {
        match byte {
            b'G' => Some(Parameter::Gain),
            b'O' => Some(Parameter::Offset),
            b'R' => Some(Parameter::Reference),
            _ => None,
        }
    }

    /// The header byte used on the wire.
    #[inline]
    pub const fn header(self) -> u8 {
        match self {
            Parameter::Gain => b'G',
            Parameter::Offset => b'O',
            Parameter::Reference => b'R',
        }
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Parameter::Gain => "gain",
            Parameter::Offset => "offset",
            Parameter::Reference => "reference",
        }
    }
}

impl TryFrom<u8> for Parameter {
    type Error = AirtuneError<()>;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_header(value).ok_or(AirtuneError::InvalidParameter(value))
    }
}

impl TryFrom<char> for Parameter {
    type Error = AirtuneError<()>;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        // Chars wider than a byte can never be a header; report them as '?'.
        let byte = u8::try_from(value).unwrap_or(b'?');
        Self::try_from(byte)
    }
}

impl From<Parameter> for char {
    fn from(value: Parameter) -> Self {
        value.header() as char
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_headers() {
        assert_eq!(Parameter::try_from(b'G').unwrap(), Parameter::Gain);
        assert_eq!(Parameter::try_from(b'O').unwrap(), Parameter::Offset);
        assert_eq!(Parameter::try_from(b'R').unwrap(), Parameter::Reference);
        assert_eq!(Parameter::try_from('R').unwrap(), Parameter::Reference);
    }

    #[test]
    fn test_invalid_headers() {
        // Headers are case sensitive.
        assert!(matches!(Parameter::try_from(b'g'), Err(AirtuneError::InvalidParameter(b'g'))));
        assert!(matches!(Parameter::try_from(b'Z'), Err(AirtuneError::InvalidParameter(b'Z'))));
        assert!(matches!(Parameter::try_from(0u8), Err(AirtuneError::InvalidParameter(0))));
        assert!(matches!(Parameter::try_from('λ'), Err(AirtuneError::InvalidParameter(b'?'))));
    }

    #[test]
    fn test_header_round_trip() {
        for parameter in Parameter::ALL {
            assert_eq!(Parameter::from_header(parameter.header()), Some(parameter));
            assert_eq!(char::from(parameter) as u8, parameter.header());
        }
    }
}
