// src/common/config.rs

use super::limits::DEFAULT_DEVICE_NAME;

/// How a command value of exactly zero is treated.
///
/// The parsed number alone cannot tell "no value" from "value is zero"; the
/// policy picks which reading applies.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum ZeroValuePolicy {
    /// `R=0` is accepted because a digit was consumed. Only a missing value fails.
    #[default]
    AcceptLiteral,
    /// Any value of zero is a parse failure, whether or not a digit was present.
    RejectZero,
}

/// What a write reports when its payload is ignored.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum MalformedWritePolicy {
    /// Report the full buffer as accepted; the failure is only logged.
    #[default]
    Silent,
    /// Return the parse or header error to the caller.
    Reject,
}

/// Construction-time configuration of a [`Device`](crate::device::Device).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DeviceConfig {
    /// Name used in diagnostics.
    pub name: &'static str,
    pub zero_value: ZeroValuePolicy,
    pub malformed_write: MalformedWritePolicy,
}

impl DeviceConfig {
    pub const fn new(name: &'static str) -> Self {
        DeviceConfig {
            name,
            zero_value: ZeroValuePolicy::AcceptLiteral,
            malformed_write: MalformedWritePolicy::Silent,
        }
    }

    pub const fn with_zero_value(mut self, policy: ZeroValuePolicy) -> Self {
        self.zero_value = policy;
        self
    }

    pub const fn with_malformed_write(mut self, policy: MalformedWritePolicy) -> Self {
        self.malformed_write = policy;
        self
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DEVICE_NAME)
    }
}
