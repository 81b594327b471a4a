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

use std::path::Path;
use std::sync::OnceLock;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;

use jiff::Timestamp;

use crate::Error;
use crate::ErrorKind;
use crate::Level;
use crate::LoggerConfig;
use crate::SensitiveMode;
use crate::Target;
use crate::TargetKind;
use crate::color::Color;
use crate::layout::LineContext;
use crate::layout::Payload;
use crate::layout::TextLayout;
use crate::logger::TargetSpec;
use crate::module::Module;
use crate::module::Scope;
use crate::redact::redact;
use crate::trap::DefaultTrap;
use crate::trap::Trap;

const SHOW_SENSITIVE_BANNER: &str = "Sensitive mode was disabled, this output may contain sensitive information, please do not share it with anyone";

/// The dispatcher: routes every message to each target whose threshold it passes.
///
/// Most programs use the process-wide instance returned by [`logger()`](crate::logger) through
/// the logging macros. A `Logger` can also be created and passed around explicitly.
///
/// Reads (`log`, `message`) share the configuration lock; every mutation takes it exclusively.
#[derive(Debug)]
pub struct Logger {
    config: RwLock<LoggerConfig>,
    layout: TextLayout,
    trap: Box<dyn Trap>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// A logger with the default configuration: one `stdout` terminal target at
    /// [`Level::Info`] and [`SensitiveMode::Hide`].
    pub fn new() -> Self {
        Self::with_config(LoggerConfig::default())
    }

    pub fn with_config(config: LoggerConfig) -> Self {
        Self {
            config: RwLock::new(config),
            layout: TextLayout::default(),
            trap: Box::new(DefaultTrap::default()),
        }
    }

    /// Replace the layout lines are rendered with.
    pub fn layout(mut self, layout: TextLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Replace the trap that receives per-target failures.
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, LoggerConfig> {
        self.config.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LoggerConfig> {
        self.config.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Log `payload` at `level` from the call site `scope`.
    ///
    /// The line is rendered once per style (colored for terminal targets, plain otherwise),
    /// redacted for each target in [`SensitiveMode::Hide`], and written to every target whose
    /// threshold is at most `level`. A target failing to write is reported to the trap and does
    /// not stop delivery to the others.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::Format`] error if the payload cannot be rendered, or an
    /// [`ErrorKind::Io`] error if every target that accepted the message failed.
    pub fn log(
        &self,
        level: Level,
        scope: Scope,
        payload: impl Into<Payload>,
    ) -> Result<(), Error> {
        let payload = payload.into();
        let config = self.read();

        let targets = config
            .targets()
            .iter()
            .filter(|target| target.accepts(level))
            .collect::<Vec<_>>();
        if targets.is_empty() {
            return Ok(());
        }

        let segments = config
            .modules()
            .resolve(&scope)
            .map(Module::segments)
            .unwrap_or_default();
        let process = config.show_process_name().then(process_name);
        let thread = config.show_thread_name().then(thread_name);
        let now = Timestamp::now();

        let render = |colored: bool| -> Result<Option<String>, Error> {
            if !targets.iter().any(|t| is_colored(t) == colored) {
                return Ok(None);
            }
            let ctx = LineContext {
                level,
                segments,
                process: process.as_deref(),
                thread: thread.as_deref(),
                colored,
            };
            self.layout.format(now, &ctx, &payload).map(Some)
        };
        let plain = render(false)?;
        let colored = render(true)?;

        self.deliver(
            &targets,
            config.sensitive_datas(),
            plain.as_deref(),
            colored.as_deref(),
        )
    }

    /// Like [`Logger::log`], reporting a rendering failure to the trap instead of returning it.
    ///
    /// Write failures have already reached the trap by then. This is what the logging macros
    /// call.
    pub fn emit(&self, level: Level, scope: Scope, payload: impl Into<Payload>) {
        if let Err(err) = self.log(level, scope, payload) {
            self.trap_unreported(err);
        }
    }

    /// Write `payload` as-is to every target, regardless of thresholds.
    ///
    /// Terminal targets paint the text with `color`; other targets receive it plain. The text
    /// is redacted per target like any log line.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::Io`] error if every target failed.
    pub fn message(&self, payload: impl Into<Payload>, color: Color) -> Result<(), Error> {
        let text = match payload.into() {
            Payload::Text(text) => text,
            payload => payload.to_text(usize::MAX)?,
        };
        let config = self.read();
        let targets = config.targets().iter().collect::<Vec<_>>();
        let plain = self.layout.format_message(&text, color, false);
        let colored = self.layout.format_message(&text, color, true);
        self.deliver(
            &targets,
            config.sensitive_datas(),
            Some(plain.as_str()),
            Some(colored.as_str()),
        )
    }

    /// Like [`Logger::message`], for the `message!` macro.
    pub fn emit_message(&self, payload: impl Into<Payload>, color: Color) {
        if let Err(err) = self.message(payload, color) {
            self.trap_unreported(err);
        }
    }

    fn trap_unreported(&self, err: Error) {
        if err.kind() != ErrorKind::Io {
            self.trap.trap(&err);
        }
    }

    fn deliver(
        &self,
        targets: &[&Target],
        secrets: &[String],
        plain: Option<&str>,
        colored: Option<&str>,
    ) -> Result<(), Error> {
        let mut last_err = None;
        let mut failures = 0;
        for target in targets {
            let line = if is_colored(target) { colored } else { plain };
            let line = redact(line.unwrap_or_default(), secrets, target.sensitive_mode());
            if let Err(err) = target.write(&line) {
                self.trap.trap(&err);
                failures += 1;
                last_err = Some(err);
            }
        }

        match last_err {
            Some(err) if failures == targets.len() => Err(Error::new(
                ErrorKind::Io,
                "every target failed to write",
            )
            .with_context("targets", failures)
            .with_source(err)),
            _ => Ok(()),
        }
    }

    /// Register a target built from `spec`, returning its name.
    ///
    /// A target with the same name is replaced in place. Registering a target in
    /// [`SensitiveMode::Show`] writes the same warning banner as
    /// [`Logger::set_sensitive_mode`].
    ///
    /// # Errors
    ///
    /// Returns the error of building the target, e.g. an [`ErrorKind::Io`] error for an
    /// unwritable file. Nothing is registered in that case.
    pub fn add_target(
        &self,
        spec: impl Into<TargetSpec>,
        level: Level,
        mode: SensitiveMode,
    ) -> Result<String, Error> {
        let mut target = spec.into().build()?;
        let previous = target.sensitive_mode();
        target.set_level(level);
        target.set_sensitive_mode(mode);
        let name = target.name().to_string();

        let mut config = self.write();
        config.insert_target(target);
        if previous == SensitiveMode::Hide && mode == SensitiveMode::Show {
            if let Some(target) = config.target(&name) {
                self.show_banner(target);
            }
        }
        Ok(name)
    }

    /// Unregister a target.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::NotFound`] error if no target has that name.
    pub fn remove_target(&self, name: &str) -> Result<(), Error> {
        let mut config = self.write();
        match config.remove_target(name) {
            Some(_) => Ok(()),
            None => Err(target_not_found(name)),
        }
    }

    /// Rename a target. A different target already named `new` is replaced.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::NotFound`] error if no target is named `old`.
    pub fn rename_target(&self, old: &str, new: impl Into<String>) -> Result<(), Error> {
        let new = new.into();
        let mut config = self.write();
        let mut target = config.remove_target(old).ok_or_else(|| target_not_found(old))?;
        target.set_name(new);
        config.insert_target(target);
        Ok(())
    }

    /// Set the threshold of a target.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::NotFound`] error if no target has that name.
    pub fn set_level(&self, name: &str, level: Level) -> Result<(), Error> {
        let mut config = self.write();
        let target = config.target_mut(name).ok_or_else(|| target_not_found(name))?;
        target.set_level(level);
        Ok(())
    }

    /// Set the sensitive mode of a target.
    ///
    /// Switching from [`SensitiveMode::Hide`] to [`SensitiveMode::Show`] writes a yellow
    /// warning banner to that target only, whatever its threshold.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::NotFound`] error if no target has that name.
    pub fn set_sensitive_mode(&self, name: &str, mode: SensitiveMode) -> Result<(), Error> {
        let mut config = self.write();
        let target = config.target_mut(name).ok_or_else(|| target_not_found(name))?;
        let previous = target.sensitive_mode();
        target.set_sensitive_mode(mode);
        if previous == SensitiveMode::Hide && mode == SensitiveMode::Show {
            self.show_banner(target);
        }
        Ok(())
    }

    fn show_banner(&self, target: &Target) {
        let line = self
            .layout
            .format_message(SHOW_SENSITIVE_BANNER, Color::Yellow, is_colored(target));
        if let Err(err) = target.write(&line) {
            self.trap.trap(&err);
        }
    }

    /// Read a target property, see [`Target::property`].
    pub fn target_property(&self, name: &str, key: &str) -> Result<String, Error> {
        let config = self.read();
        let target = config.target(name).ok_or_else(|| target_not_found(name))?;
        target.property(key)
    }

    /// Set a target property, see [`Target::set_property`].
    pub fn set_target_property(
        &self,
        name: &str,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), Error> {
        let mut config = self.write();
        let target = config.target_mut(name).ok_or_else(|| target_not_found(name))?;
        target.set_property(key, value)
    }

    /// Declare the module of the call site `scope`. An empty name removes it.
    ///
    /// # Errors
    ///
    /// See [`ModuleRegistry::declare`](crate::ModuleRegistry::declare).
    pub fn set_module(&self, scope: Scope, name: &str) -> Result<(), Error> {
        self.write().modules_mut().declare(name, scope)
    }

    /// Register a string to mask on targets in [`SensitiveMode::Hide`]. Empty strings are
    /// ignored.
    pub fn add_sensitive_data(&self, value: impl Into<String>) {
        self.write().add_sensitive_data(value);
    }

    pub fn show_thread_name(&self, show: bool) {
        self.write().set_show_thread_name(show);
    }

    pub fn show_process_name(&self, show: bool) {
        self.write().set_show_process_name(show);
    }

    /// Restore the default configuration, dropping every target, sensitive string and module.
    pub fn reset(&self) {
        *self.write() = LoggerConfig::default();
    }

    /// Replace the whole configuration.
    pub fn apply_config(&self, config: LoggerConfig) {
        *self.write() = config;
    }

    /// Replace the whole configuration with the content of a `.json` file.
    ///
    /// # Errors
    ///
    /// See [`LoggerConfig::from_file`]. The active configuration is kept on error.
    pub fn load_config_file(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let config = LoggerConfig::from_file(path)?;
        self.apply_config(config);
        Ok(())
    }

    /// Run `f` with shared access to the active configuration.
    pub fn with_config_ref<R>(&self, f: impl FnOnce(&LoggerConfig) -> R) -> R {
        f(&self.read())
    }

    /// Run `f` with exclusive access to the active configuration.
    pub fn with_config_mut<R>(&self, f: impl FnOnce(&mut LoggerConfig) -> R) -> R {
        f(&mut self.write())
    }

    /// The target names, in registration order.
    pub fn target_names(&self) -> Vec<String> {
        self.read()
            .targets()
            .iter()
            .map(|t| t.name().to_string())
            .collect()
    }

    pub fn level_of(&self, name: &str) -> Result<Level, Error> {
        let config = self.read();
        config
            .target(name)
            .map(Target::level)
            .ok_or_else(|| target_not_found(name))
    }

    pub fn sensitive_mode_of(&self, name: &str) -> Result<SensitiveMode, Error> {
        let config = self.read();
        config
            .target(name)
            .map(Target::sensitive_mode)
            .ok_or_else(|| target_not_found(name))
    }

    pub fn sensitive_datas(&self) -> Vec<String> {
        self.read().sensitive_datas().to_vec()
    }

    /// The module declared by the call site `scope`, if any.
    pub fn module_of(&self, scope: Scope) -> Option<Module> {
        self.read().modules().resolve(&scope).cloned()
    }

    /// Flush every target. Failures are reported to the trap; the last one is returned.
    pub fn flush(&self) -> Result<(), Error> {
        let config = self.read();
        let mut result = Ok(());
        for target in config.targets() {
            if let Err(err) = target.flush() {
                self.trap.trap(&err);
                result = Err(err);
            }
        }
        result
    }
}

fn is_colored(target: &Target) -> bool {
    target.kind() == TargetKind::Terminal
}

fn target_not_found(name: &str) -> Error {
    Error::not_found("target not found").with_context("name", name)
}

fn process_name() -> String {
    static PROCESS_NAME: OnceLock<String> = OnceLock::new();
    PROCESS_NAME
        .get_or_init(|| {
            std::env::current_exe()
                .ok()
                .and_then(|exe| Some(exe.file_stem()?.to_string_lossy().into_owned()))
                .unwrap_or_else(|| std::process::id().to_string())
        })
        .clone()
}

fn thread_name() -> String {
    let thread = std::thread::current();
    match thread.name() {
        Some(name) => name.to_string(),
        None => format!("{:?}", thread.id()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use super::*;
    use crate::append::Callback;
    use crate::append::Testing;

    #[derive(Debug, Default, Clone)]
    struct CountingTrap {
        errors: Arc<Mutex<Vec<String>>>,
    }

    impl Trap for CountingTrap {
        fn trap(&self, err: &Error) {
            self.errors.lock().unwrap().push(err.to_string());
        }
    }

    fn capture(logger: &Logger, name: &str, level: Level) -> Testing {
        let testing = Testing::default();
        logger
            .add_target(
                TargetSpec::append(name, testing.clone()),
                level,
                SensitiveMode::Hide,
            )
            .unwrap();
        testing
    }

    fn quiet() -> Logger {
        let logger = Logger::new();
        logger.remove_target("stdout").unwrap();
        logger
    }

    #[test]
    fn test_renders_once_per_style() {
        let logger = quiet();
        let a = capture(&logger, "a", Level::Debug);
        let b = capture(&logger, "b", Level::Debug);
        logger.log(Level::Info, crate::scope!(), "same").unwrap();
        assert_eq!(a.lines(), b.lines());
    }

    #[test]
    fn test_one_failing_target_does_not_stop_others() {
        let trap = CountingTrap::default();
        let logger = Logger::with_config(LoggerConfig::empty()).trap(trap.clone());
        logger
            .add_target(
                TargetSpec::Callback {
                    name: Some("broken".into()),
                    callback: Callback::fallible(|_: &str| {
                        Err(Error::new(ErrorKind::Io, "closed"))
                    }),
                },
                Level::Info,
                SensitiveMode::Hide,
            )
            .unwrap();
        let ok = capture(&logger, "ok", Level::Info);

        logger.log(Level::Info, crate::scope!(), "x").unwrap();
        assert_eq!(ok.lines().len(), 1);
        assert_eq!(trap.errors.lock().unwrap().len(), 1);

        logger.remove_target("ok").unwrap();
        let err = logger.log(Level::Info, crate::scope!(), "y").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(trap.errors.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_format_error_is_trapped_by_emit() {
        let trap = CountingTrap::default();
        let logger = quiet().trap(trap.clone());
        let testing = capture(&logger, "t", Level::Info);

        let word = "x".repeat(200);
        let err = logger.log(Level::Info, crate::scope!(), word.as_str()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(testing.lines().is_empty());

        logger.emit(Level::Info, crate::scope!(), word);
        assert_eq!(trap.errors.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_nothing_rendered_below_every_threshold() {
        let logger = quiet();
        let testing = capture(&logger, "t", Level::Error);
        // would be a format error if it were rendered
        logger
            .log(Level::Info, crate::scope!(), "y".repeat(200))
            .unwrap();
        assert!(testing.lines().is_empty());
    }

    #[test]
    fn test_message_bypasses_threshold_and_redacts() {
        let logger = quiet();
        logger.add_sensitive_data("s3cr3t");
        let testing = capture(&logger, "t", Level::Critical);
        logger.message("token s3cr3t", Color::Green).unwrap();
        assert_eq!(testing.lines(), ["token ******"]);
    }

    #[test]
    fn test_rename_target() {
        let logger = quiet();
        let testing = capture(&logger, "old", Level::Info);
        capture(&logger, "other", Level::Info);

        logger.rename_target("old", "other").unwrap();
        assert_eq!(logger.target_names(), ["other"]);
        logger.log(Level::Info, crate::scope!(), "x").unwrap();
        assert_eq!(testing.lines().len(), 1);

        let err = logger.rename_target("old", "new").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_target_properties_through_logger() {
        let logger = Logger::new();
        assert_eq!(logger.target_property("stdout", "level").unwrap(), "INFO");
        logger
            .set_target_property("stdout", "sensitiveMode", "show")
            .unwrap();
        assert_eq!(
            logger.sensitive_mode_of("stdout").unwrap(),
            SensitiveMode::Show
        );
        let err = logger.target_property("nope", "level").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_thread_name_shown() {
        let logger = quiet();
        let testing = capture(&logger, "t", Level::Info);
        logger.show_thread_name(true);

        std::thread::Builder::new()
            .name("worker".into())
            .spawn(move || logger.log(Level::Info, crate::scope!(), "x").unwrap())
            .unwrap()
            .join()
            .unwrap();
        assert!(testing.lines()[0].contains(&format!("[ {:^30} ]", "worker")));
    }
}
