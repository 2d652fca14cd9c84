//! Severity levels shared by entries, targets and the wire protocol.
//!
//! Levels are ordered from most to least restrictive. A target's threshold is
//! a maximum verbosity: an entry qualifies when its level is numerically less
//! than or equal to the threshold.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::ConsoleColor;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u32)]
pub enum SeverityLevel {
    Fatal = 0,
    Error = 1,
    Warning = 2,
    #[default]
    Info = 3,
    Debug = 4,
}

/// A wire ordinal outside `0..=4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("invalid severity ordinal {0}")]
pub struct InvalidSeverity(pub u32);

/// A level name that does not match any known severity.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown severity level name: {0:?}")]
pub struct ParseSeverityError(pub String);

impl SeverityLevel {
    pub const ALL: [SeverityLevel; 5] = [
        Self::Fatal,
        Self::Error,
        Self::Warning,
        Self::Info,
        Self::Debug,
    ];

    /// Human readable name used by the text formatters.
    pub fn name(self) -> &'static str {
        match self {
            SeverityLevel::Fatal => "Fatal",
            SeverityLevel::Error => "Error",
            SeverityLevel::Warning => "Warning",
            SeverityLevel::Info => "Info",
            SeverityLevel::Debug => "Debug",
        }
    }

    /// Ordinal written to the network wire format.
    pub fn ordinal(self) -> u32 {
        self as u32
    }

    /// Return `true` when an entry at this level clears `threshold`.
    pub fn passes(self, threshold: SeverityLevel) -> bool {
        self <= threshold
    }

    /// Colour hint the call-site macros attach to entries of this level.
    pub fn default_color(self) -> ConsoleColor {
        match self {
            SeverityLevel::Fatal | SeverityLevel::Error => ConsoleColor::BrightRed,
            SeverityLevel::Warning => ConsoleColor::BrightYellow,
            SeverityLevel::Info => ConsoleColor::BrightWhite,
            SeverityLevel::Debug => ConsoleColor::BrightCyan,
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SeverityLevel {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fatal" => Ok(Self::Fatal),
            "error" => Ok(Self::Error),
            "warning" | "warn" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            _ => Err(ParseSeverityError(s.to_owned())),
        }
    }
}

impl TryFrom<u32> for SeverityLevel {
    type Error = InvalidSeverity;

    fn try_from(value: u32) -> Result<Self, InvalidSeverity> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(InvalidSeverity(value))
    }
}

impl From<SeverityLevel> for u32 {
    fn from(level: SeverityLevel) -> Self {
        level.ordinal()
    }
}
