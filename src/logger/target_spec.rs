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
use std::path::PathBuf;

use crate::Error;
use crate::Target;
use crate::TargetKind;
use crate::Terminal;
use crate::append::Append;
use crate::append::Callback;

/// What [`Logger::add_target`](crate::Logger::add_target) builds a target from.
#[derive(Debug)]
pub enum TargetSpec {
    /// A file, truncated when the target is built. The target is named after the path.
    File(PathBuf),
    /// `stdout` or `stderr`.
    Terminal(Terminal),
    /// A callback. Without a name, one is derived from the callback's type.
    Callback {
        name: Option<String>,
        callback: Callback,
    },
    /// A target built ahead of time.
    Target(Target),
}

impl TargetSpec {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        TargetSpec::File(path.into())
    }

    pub fn terminal(terminal: Terminal) -> Self {
        TargetSpec::Terminal(terminal)
    }

    /// An unnamed callback target.
    pub fn callback<F>(f: F) -> Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        TargetSpec::Callback {
            name: None,
            callback: Callback::new(f),
        }
    }

    /// A callback target with an explicit name.
    pub fn named_callback<F>(name: impl Into<String>, f: F) -> Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        TargetSpec::Callback {
            name: Some(name.into()),
            callback: Callback::new(f),
        }
    }

    /// A plain, uncolored target around any [`Append`].
    pub fn append(name: impl Into<String>, append: impl Into<Box<dyn Append>>) -> Self {
        TargetSpec::Target(Target::new(name, TargetKind::Callback, append))
    }

    pub(crate) fn build(self) -> Result<Target, Error> {
        match self {
            TargetSpec::File(path) => Target::from_file(path),
            TargetSpec::Terminal(terminal) => Ok(Target::from_terminal(terminal)),
            TargetSpec::Callback { name, callback } => Ok(Target::from_callback(name, callback)),
            TargetSpec::Target(target) => Ok(target),
        }
    }
}

impl From<Terminal> for TargetSpec {
    fn from(terminal: Terminal) -> Self {
        TargetSpec::Terminal(terminal)
    }
}

impl From<Target> for TargetSpec {
    fn from(target: Target) -> Self {
        TargetSpec::Target(target)
    }
}

impl From<PathBuf> for TargetSpec {
    fn from(path: PathBuf) -> Self {
        TargetSpec::File(path)
    }
}

impl From<&Path> for TargetSpec {
    fn from(path: &Path) -> Self {
        TargetSpec::File(path.to_path_buf())
    }
}
