//! Tuning command definitions.
//!
//! A write payload has the shape `<header>=<integer>`, e.g. `G=42` or `O=-5`.
//! Parsing yields a [`CommandFrame`], which still carries the raw header byte.
//! Decoding the header into a [`Parameter`] yields a [`Command`].

use core::fmt::{self, Write};

use arrayvec::ArrayString;

use super::{error::AirtuneError, limits::COMMAND_TEXT_CAPACITY, parameter::Parameter};

/// Fixed-capacity text of a formatted command.
pub type CommandText = ArrayString<COMMAND_TEXT_CAPACITY>;

/// A payload that passed the grammar check but whose header is not yet decoded.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CommandFrame {
    /// Byte 0 of the payload.
    pub header: u8,
    /// The integer literal following the delimiter.
    pub value: i64,
}

impl CommandFrame {
    /// Decodes the header, failing with `InvalidParameter` outside G/O/R.
    pub fn decode(self) -> Result<Command, AirtuneError> {
        let parameter = Parameter::try_from(self.header)?;
        Ok(Command { parameter, value: self.value })
    }
}

/// A validated instruction to set one tuning parameter.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Command {
    pub parameter: Parameter,
    pub value: i64,
}

impl Command {
    pub const fn new(parameter: Parameter, value: i64) -> Self {
        Command { parameter, value }
    }

    pub const fn gain(value: i64) -> Self {
        Self::new(Parameter::Gain, value)
    }

    pub const fn offset(value: i64) -> Self {
        Self::new(Parameter::Offset, value)
    }

    pub const fn reference(value: i64) -> Self {
        Self::new(Parameter::Reference, value)
    }

    /// Formats the command as wire text (e.g. `R=3000`) without allocating.
    pub fn format_into(&self) -> Result<CommandText, AirtuneError> {
        let mut text = CommandText::new();
        write!(text, "{}", self)?;
        Ok(text)
    }
}

impl From<Command> for CommandFrame {
    fn from(command: Command) -> Self {
        CommandFrame { header: command.parameter.header(), value: command.value }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", char::from(self.parameter), self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::String as HeaplessString;

    #[test]
    fn test_command_formatting() {
        let mut output = HeaplessString::<32>::new();
        write!(output, "{}", Command::gain(1000)).unwrap();
        assert_eq!(output.as_str(), "G=1000");

        output.clear();
        write!(output, "{}", Command::offset(-5)).unwrap();
        assert_eq!(output.as_str(), "O=-5");

        output.clear();
        write!(output, "{}", Command::reference(0)).unwrap();
        assert_eq!(output.as_str(), "R=0");
    }

    #[test]
    fn test_format_into_extremes() {
        assert_eq!(Command::gain(i64::MIN).format_into().unwrap().as_str(), "G=-9223372036854775808");
        assert_eq!(Command::reference(i64::MAX).format_into().unwrap().as_str(), "R=9223372036854775807");
    }

    #[test]
    fn test_frame_decode() {
        assert_eq!(CommandFrame { header: b'G', value: 42 }.decode(), Ok(Command::gain(42)));
        assert_eq!(CommandFrame { header: b'O', value: -5 }.decode(), Ok(Command::offset(-5)));
        assert_eq!(CommandFrame { header: b'R', value: 0 }.decode(), Ok(Command::reference(0)));
        assert_eq!(
            CommandFrame { header: b'Z', value: 7 }.decode(),
            Err(AirtuneError::InvalidParameter(b'Z'))
        );
    }

    #[test]
    fn test_command_into_frame() {
        let frame = CommandFrame::from(Command::offset(12));
        assert_eq!(frame, CommandFrame { header: b'O', value: 12 });
    }
}
