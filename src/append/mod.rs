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

//! Sinks that rendered log lines are written to.

use std::fmt;

use crate::Error;

mod callback;
pub mod single_file;
mod stdio;
mod testing;

pub use self::callback::Callback;
pub use self::single_file::SingleFile;
pub use self::stdio::Stderr;
pub use self::stdio::Stdout;
pub use self::testing::Testing;

/// A sink receiving fully rendered, already redacted log lines.
///
/// Lines are passed without a trailing newline; stream and file sinks terminate each line with
/// `\n`. An [`Append`] is always driven through its owning [`Target`](crate::Target), which
/// serializes calls, so implementations need not synchronize themselves.
pub trait Append: fmt::Debug + Send + 'static {
    /// Write one line to the sink.
    fn append(&mut self, line: &str) -> Result<(), Error>;

    /// Flush any buffered lines.
    ///
    /// Default to a no-op.
    fn flush(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

impl<T: Append> From<T> for Box<dyn Append> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}
