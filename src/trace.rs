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

//! Helpers that log around a function call.

use std::fmt;
use std::time::Duration;
use std::time::Instant;

use crate::Level;
use crate::Logger;
use crate::Scope;

/// Log the call of `f` and its return value at `level`.
///
/// ```
/// use logweave::Level;
/// use logweave::Logger;
///
/// let logger = Logger::new();
/// let sum = logweave::trace::traced(&logger, Level::Debug, logweave::scope!(), "sum", || 1 + 2);
/// assert_eq!(sum, 3);
/// ```
pub fn traced<T, F>(logger: &Logger, level: Level, scope: Scope, name: &str, f: F) -> T
where
    T: fmt::Debug,
    F: FnOnce() -> T,
{
    logger.emit(level, scope, format!("Calling {name}"));
    let result = f();
    logger.emit(level, scope, format!("Function {name} returned \"{result:?}\""));
    result
}

/// Like [`traced`], for fallible functions: an error is logged at [`Level::Error`] and returned.
pub fn traced_result<T, E, F>(
    logger: &Logger,
    level: Level,
    scope: Scope,
    name: &str,
    f: F,
) -> Result<T, E>
where
    T: fmt::Debug,
    E: fmt::Display,
    F: FnOnce() -> Result<T, E>,
{
    logger.emit(level, scope, format!("Calling {name}"));
    match f() {
        Ok(value) => {
            logger.emit(level, scope, format!("Function {name} returned \"{value:?}\""));
            Ok(value)
        }
        Err(err) => {
            logger.emit(
                Level::Error,
                scope,
                format!("An error occured in function {name}: {err}"),
            );
            Err(err)
        }
    }
}

/// Log how long `f` took, at [`Level::Debug`].
pub fn chrono<T, F>(logger: &Logger, scope: Scope, name: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();
    logger.emit(
        Level::Debug,
        scope,
        format!("Function {name} took {} to execute", format_elapsed(elapsed)),
    );
    result
}

fn format_elapsed(elapsed: Duration) -> String {
    format!("{elapsed:?}")
}

/// A scoped timer logging its lifetime at [`Level::Debug`] when dropped.
///
/// ```
/// use logweave::trace::Stopwatch;
///
/// fn work() {
///     let _timer = Stopwatch::start(logweave::logger(), logweave::scope!(), "work");
///     // ...
/// }
/// # work();
/// ```
#[derive(Debug)]
#[must_use = "the elapsed time is logged when the stopwatch is dropped"]
pub struct Stopwatch<'a> {
    logger: &'a Logger,
    scope: Scope,
    name: String,
    start: Instant,
}

impl<'a> Stopwatch<'a> {
    pub fn start(logger: &'a Logger, scope: Scope, name: impl Into<String>) -> Self {
        Self {
            logger,
            scope,
            name: name.into(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Stopwatch<'_> {
    fn drop(&mut self) {
        self.logger.emit(
            Level::Debug,
            self.scope,
            format!(
                "{} took {} to execute",
                self.name,
                format_elapsed(self.elapsed())
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LoggerConfig;
    use crate::SensitiveMode;
    use crate::TargetSpec;
    use crate::append::Testing;

    fn logger(level: Level) -> (Logger, Testing) {
        let logger = Logger::with_config(LoggerConfig::empty());
        let testing = Testing::default();
        logger
            .add_target(
                TargetSpec::append("t", testing.clone()),
                level,
                SensitiveMode::Hide,
            )
            .unwrap();
        (logger, testing)
    }

    #[test]
    fn test_traced_logs_call_and_result() {
        let (logger, testing) = logger(Level::Debug);
        let value = traced(&logger, Level::Debug, crate::scope!(), "double", || 21 * 2);
        assert_eq!(value, 42);

        let lines = testing.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("] Calling double"));
        assert!(lines[1].ends_with("] Function double returned \"42\""));
    }

    #[test]
    fn test_traced_below_threshold_is_silent() {
        let (logger, testing) = logger(Level::Info);
        traced(&logger, Level::DeepDebug, crate::scope!(), "f", || ());
        assert!(testing.lines().is_empty());
    }

    #[test]
    fn test_traced_result_logs_error() {
        let (logger, testing) = logger(Level::Debug);
        let result: Result<(), String> =
            traced_result(&logger, Level::Debug, crate::scope!(), "parse", || {
                Err("bad input".to_string())
            });
        assert!(result.is_err());

        let lines = testing.lines();
        assert!(lines[1].contains("[  ERROR   ]"));
        assert!(lines[1].ends_with("An error occured in function parse: bad input"));
    }

    #[test]
    fn test_chrono_and_stopwatch() {
        let (logger, testing) = logger(Level::Debug);
        let value = chrono(&logger, crate::scope!(), "noop", || "done");
        assert_eq!(value, "done");
        {
            let _timer = Stopwatch::start(&logger, crate::scope!(), "block");
        }

        let lines = testing.lines();
        assert!(lines[0].contains("] Function noop took "));
        assert!(lines[0].ends_with(" to execute"));
        assert!(lines[1].contains("] block took "));
    }
}
