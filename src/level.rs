// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Severity levels and sensitive-data modes.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::Error;
use crate::color::Color;

/// The severity of a log message.
///
/// Levels are ordered from the most verbose to the most severe:
///
/// - `DeepDebug`
/// - `Debug`
/// - `Info`
/// - `Warning`
/// - `Error`
/// - `Critical`
///
/// A message at level `L` is emitted on a target whose threshold is `T` iff `T <= L`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Level {
    /// Very detailed information, may contain sensitive information.
    DeepDebug,
    /// Debug information.
    Debug,
    /// Information about the normal execution of the program.
    Info,
    /// Non-blocking problems that may lead to errors.
    Warning,
    /// Errors that may lead to the termination of the program.
    Error,
    /// Errors that lead to the termination of the program.
    Critical,
}

impl Level {
    /// All levels, from the most verbose to the most severe.
    pub const ALL: [Level; 6] = [
        Level::DeepDebug,
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    /// Return the symbolic name of the level, e.g. `DEEP_DEBUG`.
    pub fn name(&self) -> &'static str {
        match self {
            Level::DeepDebug => "DEEP_DEBUG",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// Return the 10-character, centered label printed in log lines.
    ///
    /// `DeepDebug` shares the `DEBUG` label.
    pub fn label(&self) -> &'static str {
        match self {
            Level::DeepDebug | Level::Debug => "  DEBUG   ",
            Level::Info => "   INFO   ",
            Level::Warning => " WARNING  ",
            Level::Error => "  ERROR   ",
            Level::Critical => " CRITICAL ",
        }
    }

    /// Return the color used for the level label on terminal targets.
    pub fn color(&self) -> Color {
        match self {
            Level::DeepDebug | Level::Debug => Color::Blue,
            Level::Info => Color::Green,
            Level::Warning => Color::Yellow,
            Level::Error => Color::Red,
            Level::Critical => Color::DarkRed,
        }
    }

    /// Parse a level name, falling back to [`Level::Info`] for unrecognized input.
    ///
    /// Use [`str::parse`] when invalid input must be rejected.
    pub fn from_str_lenient(text: &str) -> Level {
        text.parse().unwrap_or(Level::Info)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deep_debug" | "deep-debug" | "deepdebug" => Ok(Level::DeepDebug),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warning" | "warn" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "critical" => Ok(Level::Critical),
            _ => Err(Error::validation("unknown level").with_context("input", s)),
        }
    }
}

/// How a target treats registered sensitive strings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensitiveMode {
    /// Mask every sensitive string with `*`.
    #[default]
    Hide,
    /// Print sensitive strings verbatim.
    Show,
}

impl SensitiveMode {
    /// Return the symbolic name of the mode.
    pub fn name(&self) -> &'static str {
        match self {
            SensitiveMode::Hide => "HIDE",
            SensitiveMode::Show => "SHOW",
        }
    }

    /// Parse a mode name, falling back to [`SensitiveMode::Hide`] for unrecognized input.
    pub fn from_str_lenient(text: &str) -> SensitiveMode {
        text.parse().unwrap_or(SensitiveMode::Hide)
    }

    /// `true` maps to [`SensitiveMode::Show`].
    pub fn from_bool(show: bool) -> SensitiveMode {
        if show {
            SensitiveMode::Show
        } else {
            SensitiveMode::Hide
        }
    }
}

impl fmt::Display for SensitiveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SensitiveMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hide" => Ok(SensitiveMode::Hide),
            "show" => Ok(SensitiveMode::Show),
            _ => Err(Error::validation("unknown sensitive mode").with_context("input", s)),
        }
    }
}
