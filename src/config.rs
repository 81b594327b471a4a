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

//! Logger configuration, in memory and on disk.
//!
//! A configuration file is a JSON document:
//!
//! ```json
//! {
//!     "sensitiveDatas": ["password", "token"],
//!     "targets": [
//!         { "file": "app.log", "level": "debug", "sensitiveMode": "show" },
//!         { "name": "console", "terminal": "stdout" }
//!     ]
//! }
//! ```
//!
//! Targets default to level `info` and sensitive mode `hide`. Unknown level and mode strings
//! fall back to those defaults.

use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::ErrorKind;
use crate::Level;
use crate::SensitiveMode;
use crate::Target;
use crate::Terminal;
use crate::module::ModuleRegistry;

/// Everything a [`Logger`](crate::Logger) routes messages with.
#[derive(Debug)]
pub struct LoggerConfig {
    sensitive_datas: Vec<String>,
    targets: Vec<Target>,
    modules: ModuleRegistry,
    show_thread_name: bool,
    show_process_name: bool,
}

impl Default for LoggerConfig {
    /// One `stdout` terminal target at [`Level::Info`] and [`SensitiveMode::Hide`].
    fn default() -> Self {
        Self::empty().with_target(Target::from_terminal(Terminal::Stdout))
    }
}

impl LoggerConfig {
    /// A configuration without any target.
    pub fn empty() -> Self {
        Self {
            sensitive_datas: vec![],
            targets: vec![],
            modules: ModuleRegistry::new(),
            show_thread_name: false,
            show_process_name: false,
        }
    }

    /// Add a target, replacing any target of the same name.
    pub fn with_target(mut self, target: Target) -> Self {
        self.insert_target(target);
        self
    }

    /// Register a sensitive string.
    pub fn with_sensitive_data(mut self, value: impl Into<String>) -> Self {
        self.add_sensitive_data(value);
        self
    }

    /// Parse a JSON configuration document and build its targets.
    ///
    /// File targets are created, and their files truncated, right away.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::Validation`] error if the document is malformed or names an
    /// unknown terminal, or an [`ErrorKind::Io`] error if a file target cannot be created.
    pub fn from_json_str(text: &str) -> Result<Self, Error> {
        let file: ConfigFile = serde_json::from_str(text).map_err(|err| {
            Error::new(ErrorKind::Validation, "failed to parse logger config").with_source(err)
        })?;
        Self::try_from(file)
    }

    /// Load a `.json` configuration file.
    ///
    /// # Errors
    ///
    /// Besides the errors of [`LoggerConfig::from_json_str`], returns an
    /// [`ErrorKind::Validation`] error for any other extension and an [`ErrorKind::Io`] error
    /// if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if !is_json {
            return Err(Error::validation("config file must be a .json file")
                .with_context("path", path.display()));
        }

        let text = std::fs::read_to_string(path)
            .map_err(|err| Error::from_io_error(err).with_context("path", path.display()))?;
        Self::from_json_str(&text).map_err(|err| err.with_context("path", path.display()))
    }

    pub fn sensitive_datas(&self) -> &[String] {
        &self.sensitive_datas
    }

    /// Register a sensitive string. Empty strings are ignored.
    pub fn add_sensitive_data(&mut self, value: impl Into<String>) {
        let value = value.into();
        if !value.is_empty() {
            self.sensitive_datas.push(value);
        }
    }

    /// Replace every sensitive string. Empty strings are ignored.
    pub fn set_sensitive_datas<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sensitive_datas.clear();
        for value in values {
            self.add_sensitive_data(value);
        }
    }

    /// The targets, in registration order.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name() == name)
    }

    pub fn target_mut(&mut self, name: &str) -> Option<&mut Target> {
        self.targets.iter_mut().find(|t| t.name() == name)
    }

    /// Register a target. A target with the same name is replaced in place.
    pub fn insert_target(&mut self, target: Target) {
        match self.targets.iter_mut().find(|t| t.name() == target.name()) {
            Some(slot) => *slot = target,
            None => self.targets.push(target),
        }
    }

    pub fn remove_target(&mut self, name: &str) -> Option<Target> {
        let index = self.targets.iter().position(|t| t.name() == name)?;
        Some(self.targets.remove(index))
    }

    pub fn modules(&self) -> &ModuleRegistry {
        &self.modules
    }

    pub fn modules_mut(&mut self) -> &mut ModuleRegistry {
        &mut self.modules
    }

    pub fn show_thread_name(&self) -> bool {
        self.show_thread_name
    }

    pub fn set_show_thread_name(&mut self, show: bool) {
        self.show_thread_name = show;
    }

    pub fn show_process_name(&self) -> bool {
        self.show_process_name
    }

    pub fn set_show_process_name(&mut self, show: bool) {
        self.show_process_name = show;
    }
}

impl TryFrom<ConfigFile> for LoggerConfig {
    type Error = Error;

    fn try_from(file: ConfigFile) -> Result<Self, Error> {
        let mut config = LoggerConfig::empty();
        config.set_sensitive_datas(file.sensitive_datas);
        for target in &file.targets {
            config.insert_target(target.build()?);
        }
        Ok(config)
    }
}

/// The on-disk shape of a configuration file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    #[serde(default)]
    pub sensitive_datas: Vec<String>,
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

/// One target entry of a [`ConfigFile`]. Exactly one of `file` and `terminal` is expected;
/// `file` wins when both are present.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitive_mode: Option<String>,
}

impl TargetConfig {
    /// Create the target this entry describes.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::Validation`] error if the entry names neither a file nor a
    /// known terminal, or an [`ErrorKind::Io`] error if the file cannot be created.
    pub fn build(&self) -> Result<Target, Error> {
        let target = match (&self.file, &self.terminal) {
            (Some(path), _) => Target::from_file(path)?,
            (None, Some(terminal)) => Target::from_terminal(terminal.parse()?),
            (None, None) => {
                return Err(Error::validation("target must name a file or a terminal"));
            }
        };

        let target = match &self.name {
            Some(name) => target.with_name(name),
            None => target,
        };
        let level = self
            .level
            .as_deref()
            .map_or(Level::Info, Level::from_str_lenient);
        let mode = self
            .sensitive_mode
            .as_deref()
            .map_or(SensitiveMode::Hide, SensitiveMode::from_str_lenient);
        Ok(target.with_level(level).with_sensitive_mode(mode))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::TargetKind;

    #[test]
    fn test_default_has_stdout() {
        let config = LoggerConfig::default();
        assert_eq!(config.targets().len(), 1);
        let stdout = config.target("stdout").unwrap();
        assert_eq!(stdout.kind(), TargetKind::Terminal);
        assert_eq!(stdout.level(), Level::Info);
        assert_eq!(stdout.sensitive_mode(), SensitiveMode::Hide);
        assert!(config.sensitive_datas().is_empty());
        assert!(config.modules().is_empty());
        assert!(!config.show_thread_name());
        assert!(!config.show_process_name());
    }

    #[test]
    fn test_insert_replaces_by_name() {
        let mut config = LoggerConfig::default();
        config.insert_target(Target::from_terminal(Terminal::Stderr));
        config.insert_target(
            Target::from_terminal(Terminal::Stderr).with_name("stdout").with_level(Level::Error),
        );

        let names = config.targets().iter().map(Target::name).collect::<Vec<_>>();
        assert_eq!(names, ["stdout", "stderr"]);
        assert_eq!(config.target("stdout").unwrap().level(), Level::Error);

        assert!(config.remove_target("stderr").is_some());
        assert!(config.remove_target("stderr").is_none());
    }

    #[test]
    fn test_empty_sensitive_data_is_ignored() {
        let config = LoggerConfig::empty()
            .with_sensitive_data("")
            .with_sensitive_data("token");
        assert_eq!(config.sensitive_datas(), ["token"]);
    }

    #[test]
    fn test_from_json_str() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("app.log");
        let text = serde_json::json!({
            "sensitiveDatas": ["password"],
            "targets": [
                { "file": log, "level": "debug", "sensitiveMode": "show" },
                { "name": "console", "terminal": "stderr", "level": "loud" },
            ],
        })
        .to_string();

        let config = LoggerConfig::from_json_str(&text).unwrap();
        assert_eq!(config.sensitive_datas(), ["password"]);

        let file = config.target(&log.display().to_string()).unwrap();
        assert_eq!(file.kind(), TargetKind::File);
        assert_eq!(file.level(), Level::Debug);
        assert_eq!(file.sensitive_mode(), SensitiveMode::Show);

        let console = config.target("console").unwrap();
        assert_eq!(console.kind(), TargetKind::Terminal);
        assert_eq!(console.level(), Level::Info);
        assert_eq!(console.sensitive_mode(), SensitiveMode::Hide);
    }

    #[test]
    fn test_invalid_documents() {
        let err = LoggerConfig::from_json_str("{").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = LoggerConfig::from_json_str(r#"{"targets": [{"terminal": "console"}]}"#)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = LoggerConfig::from_json_str(r#"{"targets": [{"name": "x"}]}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_from_file_requires_json() {
        let dir = tempfile::tempdir().unwrap();

        let xml = dir.path().join("config.xml");
        fs::write(&xml, "<config/>").unwrap();
        let err = LoggerConfig::from_file(&xml).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let missing = dir.path().join("missing.json");
        let err = LoggerConfig::from_file(&missing).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);

        let json = dir.path().join("config.json");
        fs::write(&json, r#"{"sensitiveDatas": ["a"]}"#).unwrap();
        let config = LoggerConfig::from_file(&json).unwrap();
        assert_eq!(config.sensitive_datas(), ["a"]);
        assert!(config.targets().is_empty());
    }

    #[test]
    fn test_config_file_serializes_camel_case() {
        let file = ConfigFile {
            sensitive_datas: vec!["x".into()],
            targets: vec![TargetConfig {
                terminal: Some("stdout".into()),
                sensitive_mode: Some("show".into()),
                ..Default::default()
            }],
        };
        let text = serde_json::to_string(&file).unwrap();
        assert_eq!(
            text,
            r#"{"sensitiveDatas":["x"],"targets":[{"terminal":"stdout","sensitiveMode":"show"}]}"#
        );
    }
}
