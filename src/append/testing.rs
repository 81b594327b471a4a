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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::Error;
use crate::append::Append;

/// An appender that keeps every line in memory so tests can assert on the output.
///
/// Clones share the same buffer: keep one clone and register the other as a target.
///
/// # Examples
///
/// ```
/// use logweave::Level;
/// use logweave::Logger;
/// use logweave::SensitiveMode;
/// use logweave::TargetSpec;
/// use logweave::append::Testing;
///
/// let logger = Logger::new();
/// let testing = Testing::default();
/// logger
///     .add_target(
///         TargetSpec::append("capture", testing.clone()),
///         Level::Info,
///         SensitiveMode::Hide,
///     )
///     .unwrap();
///
/// logger.log(Level::Info, logweave::scope!(), "hello").unwrap();
/// assert!(testing.lines()[0].ends_with("] hello"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct Testing {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Testing {
    /// A copy of every line written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain the lines written so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Every line written so far, each terminated by `\n`.
    pub fn contents(&self) -> String {
        self.lines().iter().map(|line| format!("{line}\n")).collect()
    }
}

impl Append for Testing {
    fn append(&mut self, line: &str) -> Result<(), Error> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
        Ok(())
    }
}
