// src/device/parser.rs

use crate::common::{
    command::CommandFrame,
    config::ZeroValuePolicy,
    error::AirtuneError,
    limits::{COMMAND_BUFFER_CAPACITY, DELIMITER, DELIMITER_INDEX, HEADER_INDEX, VALUE_START},
};

/// Fixed-capacity holding area for the latest write payload of one session.
///
/// Every load zero-fills the whole buffer first, so bytes from a longer earlier
/// payload never reach the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBuffer {
    mem: [u8; COMMAND_BUFFER_CAPACITY],
    len: usize,
}

impl CommandBuffer {
    pub const fn new() -> Self {
        CommandBuffer { mem: [0; COMMAND_BUFFER_CAPACITY], len: 0 }
    }

    /// Clears the buffer and copies in `payload`, truncated to capacity.
    ///
    /// Returns the number of payload bytes kept.
    pub fn load(&mut self, payload: &[u8]) -> usize {
        self.mem.fill(0);
        let n = payload.len().min(COMMAND_BUFFER_CAPACITY);
        self.mem[..n].copy_from_slice(&payload[..n]);
        self.len = n;
        n
    }

    /// The bytes kept from the latest payload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.mem[..self.len]
    }

    /// The whole buffer, including the zero fill after the payload.
    #[inline]
    pub fn raw(&self) -> &[u8; COMMAND_BUFFER_CAPACITY] {
        &self.mem
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Loads `payload` and parses it in one step.
    pub fn parse(
        &mut self,
        payload: &[u8],
        zero_value: ZeroValuePolicy,
    ) -> Result<CommandFrame, AirtuneError> {
        self.load(payload);
        parse_command(self.raw(), zero_value)
    }
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a `<header>=<integer>` payload into a `CommandFrame`.
///
/// Only the shape is validated here: byte 1 must be `=` and at least one digit
/// must follow (after an optional sign). The integer is read greedily and
/// anything after it is ignored. The header byte is left for dispatch to decode.
/// Missing bytes read as zero, matching a zero-filled buffer.
///
/// # Arguments
///
/// * `bytes`: the payload, e.g. `b"G=42"`, `b"O=-5\n"`.
/// * `zero_value`: whether a value of zero is acceptable.
///
/// # Returns
///
/// * `Ok(CommandFrame)`: header byte plus the decoded value.
/// * `Err(AirtuneError)`: `MissingDelimiter`, `MissingValue`, `ValueOutOfRange`
///   or `ZeroValueRejected`.
pub fn parse_command(
    bytes: &[u8],
    zero_value: ZeroValuePolicy,
) -> Result<CommandFrame, AirtuneError> {
    let header = bytes.get(HEADER_INDEX).copied().unwrap_or(0);
    let delimiter = bytes.get(DELIMITER_INDEX).copied().unwrap_or(0);
    if delimiter != DELIMITER {
        return Err(AirtuneError::MissingDelimiter(delimiter));
    }

    let literal = bytes.get(VALUE_START..).unwrap_or(&[]);
    let (value, digits) = scan_integer(literal)?;

    if digits == 0 {
        return Err(AirtuneError::MissingValue);
    }
    if value == 0 && zero_value == ZeroValuePolicy::RejectZero {
        return Err(AirtuneError::ZeroValueRejected);
    }

    Ok(CommandFrame { header, value })
}

// --- Helper: greedy optionally-signed decimal scan ---
// Returns the value and the number of digits consumed (sign excluded).
fn scan_integer(bytes: &[u8]) -> Result<(i64, usize), AirtuneError> {
    let (negative, digits) = match bytes.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, bytes),
    };

    let mut value: i64 = 0;
    let mut consumed = 0;
    for &byte in digits.iter().take_while(|b| b.is_ascii_digit()) {
        let digit = i64::from(byte - b'0');
        // Accumulate towards the sign so i64::MIN stays representable.
        value = value
            .checked_mul(10)
            .and_then(|v| if negative { v.checked_sub(digit) } else { v.checked_add(digit) })
            .ok_or(AirtuneError::ValueOutOfRange)?;
        consumed += 1;
    }

    Ok((value, consumed))
}
