// src/common/limits.rs

// === Command Buffer ===

/// Capacity of a session's command buffer. Longer writes are truncated, and
/// every write reports this many bytes accepted.
pub const COMMAND_BUFFER_CAPACITY: usize = 128;

// === Command Grammar (`<header>=<integer>`) ===

/// Index of the parameter header byte.
pub const HEADER_INDEX: usize = 0;
/// Index of the delimiter byte.
pub const DELIMITER_INDEX: usize = 1;
/// Separator between header and value.
pub const DELIMITER: u8 = b'=';
/// Index where the integer literal starts.
pub const VALUE_START: usize = 2;

// === Rendered Text ===

/// Room for the longest `i64` reading line: `-9223372036854775808\n` is 21 bytes.
pub const READING_LINE_CAPACITY: usize = 24;
/// Room for the longest command text: header, delimiter and an `i64` literal.
pub const COMMAND_TEXT_CAPACITY: usize = 24;

// === Device Naming ===

/// Name used in diagnostics when none is configured.
pub const DEFAULT_DEVICE_NAME: &str = "airtune";
/// Conventional device node for the user-side tools.
pub const DEFAULT_DEVICE_PATH: &str = "/dev/airtune";
