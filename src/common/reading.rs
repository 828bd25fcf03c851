// src/common/reading.rs

use core::fmt::Write;

use arrayvec::ArrayString;

use super::{error::AirtuneError, limits::READING_LINE_CAPACITY};

/// Fixed-capacity `"<decimal>\n"` line handed to readers.
pub type ReadingLine = ArrayString<READING_LINE_CAPACITY>;

/// Renders a reading as its decimal text followed by a single newline.
pub fn render_reading(reading: i64) -> Result<ReadingLine, core::fmt::Error> {
    let mut line = ReadingLine::new();
    writeln!(line, "{}", reading)?;
    Ok(line)
}

/// Parses device output back into a reading.
///
/// Surrounding newlines are stripped; anything else that is not a decimal
/// integer is rejected.
pub fn parse_reading(bytes: &[u8]) -> Result<i64, AirtuneError> {
    let text = core::str::from_utf8(bytes).map_err(|_| AirtuneError::InvalidReading)?;
    text.trim_matches(|c: char| c == '\n' || c == '\r')
        .parse::<i64>()
        .map_err(|_| AirtuneError::InvalidReading)
}
