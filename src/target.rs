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

//! Named output targets.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::Error;
use crate::Level;
use crate::SensitiveMode;
use crate::append;
use crate::append::Append;

/// Property key exposing a target's level threshold.
pub const LEVEL_PROPERTY: &str = "level";
/// Property key exposing a target's sensitive mode.
pub const SENSITIVE_MODE_PROPERTY: &str = "sensitiveMode";

/// What a target writes to. Only [`TargetKind::Terminal`] targets are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Terminal,
    File,
    Callback,
}

/// A well-known process stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminal {
    Stdout,
    Stderr,
}

impl Terminal {
    /// The name a terminal target gets by default.
    pub fn name(&self) -> &'static str {
        match self {
            Terminal::Stdout => "stdout",
            Terminal::Stderr => "stderr",
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Terminal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdout" => Ok(Terminal::Stdout),
            "stderr" => Ok(Terminal::Stderr),
            _ => Err(Error::validation("invalid terminal target").with_context("input", s)),
        }
    }
}

/// A named sink with its own level threshold and sensitive mode.
///
/// Writes to one target are serialized by a per-target lock, independently of every other
/// target.
pub struct Target {
    name: String,
    kind: TargetKind,
    sink: Mutex<Box<dyn Append>>,
    level: Level,
    sensitive_mode: SensitiveMode,
    properties: BTreeMap<String, String>,
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("level", &self.level)
            .field("sensitive_mode", &self.sensitive_mode)
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

impl Target {
    /// Create a target of the given kind around any [`Append`].
    ///
    /// The target starts at [`Level::Info`] and [`SensitiveMode::Hide`].
    pub fn new(
        name: impl Into<String>,
        kind: TargetKind,
        append: impl Into<Box<dyn Append>>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            sink: Mutex::new(append.into()),
            level: Level::Info,
            sensitive_mode: SensitiveMode::Hide,
            properties: BTreeMap::new(),
        }
    }

    /// A terminal target writing to stdout or stderr, named after the stream.
    pub fn from_terminal(terminal: Terminal) -> Self {
        match terminal {
            Terminal::Stdout => Target::new(
                terminal.name(),
                TargetKind::Terminal,
                append::Stdout::default(),
            ),
            Terminal::Stderr => Target::new(
                terminal.name(),
                TargetKind::Terminal,
                append::Stderr::default(),
            ),
        }
    }

    /// A file target named after its path. The file is truncated immediately.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::Io`](crate::ErrorKind::Io) error if the path is not writable.
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let name = path.display().to_string();
        let file = append::SingleFile::new(path)?;
        Ok(Target::new(name, TargetKind::File, file))
    }

    /// A callback target. Without a name, the name is derived from the function's type.
    pub fn from_callback(name: Option<String>, callback: append::Callback) -> Self {
        let name = name.unwrap_or_else(|| callback.default_name().to_string());
        Target::new(name, TargetKind::Callback, callback)
    }

    /// Replace the target's name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the target's level threshold.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Replace the target's sensitive mode.
    pub fn with_sensitive_mode(mut self, mode: SensitiveMode) -> Self {
        self.sensitive_mode = mode;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn sensitive_mode(&self) -> SensitiveMode {
        self.sensitive_mode
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    pub(crate) fn set_sensitive_mode(&mut self, mode: SensitiveMode) {
        self.sensitive_mode = mode;
    }

    /// Whether a message at `level` passes this target's threshold.
    pub fn accepts(&self, level: Level) -> bool {
        self.level <= level
    }

    /// Read a property.
    ///
    /// `level` and `sensitiveMode` report the typed settings by name.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::NotFound`](crate::ErrorKind::NotFound) error if the key was
    /// never set.
    pub fn property(&self, key: &str) -> Result<String, Error> {
        match key {
            LEVEL_PROPERTY => Ok(self.level.name().to_string()),
            SENSITIVE_MODE_PROPERTY => Ok(self.sensitive_mode.name().to_string()),
            _ => self.properties.get(key).cloned().ok_or_else(|| {
                Error::not_found("target property not found")
                    .with_context("target", &self.name)
                    .with_context("key", key)
            }),
        }
    }

    /// Set a property.
    ///
    /// `level` and `sensitiveMode` are parsed strictly and update the typed settings.
    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), Error> {
        let key = key.into();
        let value = value.into();
        match key.as_str() {
            LEVEL_PROPERTY => self.level = value.parse()?,
            SENSITIVE_MODE_PROPERTY => self.sensitive_mode = value.parse()?,
            _ => {
                self.properties.insert(key, value);
            }
        }
        Ok(())
    }

    /// Remove a free-form property, returning its value.
    pub fn remove_property(&mut self, key: &str) -> Option<String> {
        self.properties.remove(key)
    }

    /// Write one line while holding this target's lock.
    ///
    /// The lock is released on every exit path; a failure is returned with the target name as
    /// context.
    pub fn write(&self, line: &str) -> Result<(), Error> {
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        sink.append(line)
            .map_err(|err| err.with_context("target", &self.name))
    }

    /// Flush the underlying sink.
    pub fn flush(&self) -> Result<(), Error> {
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        sink.flush().map_err(|err| err.with_context("target", &self.name))
    }
}
