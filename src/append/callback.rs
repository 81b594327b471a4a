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

use std::fmt;

use crate::Error;
use crate::append::Append;

type WriteFn = Box<dyn FnMut(&str) -> Result<(), Error> + Send + 'static>;

/// An appender that hands every line to a user supplied function.
///
/// # Examples
///
/// ```
/// use logweave::append::Callback;
///
/// let callback = Callback::new(|line: &str| {
///     eprintln!("{line}");
/// });
/// ```
pub struct Callback {
    name: &'static str,
    f: WriteFn,
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Callback {
    /// Wrap an infallible write function.
    pub fn new<F>(mut f: F) -> Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        Self {
            name: std::any::type_name::<F>(),
            f: Box::new(move |line| {
                f(line);
                Ok(())
            }),
        }
    }

    /// Wrap a write function whose failures are reported back to the caller of the log call.
    pub fn fallible<F>(f: F) -> Self
    where
        F: FnMut(&str) -> Result<(), Error> + Send + 'static,
    {
        Self {
            name: std::any::type_name::<F>(),
            f: Box::new(f),
        }
    }

    /// An identifier derived from the wrapped function's type, used when a target is not
    /// given an explicit name.
    pub fn default_name(&self) -> &'static str {
        self.name
    }
}

impl Append for Callback {
    fn append(&mut self, line: &str) -> Result<(), Error> {
        (self.f)(line)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use super::*;
    use crate::ErrorKind;

    fn sink(line: &str) {
        assert!(!line.is_empty());
    }

    #[test]
    fn test_callback_receives_lines() {
        let seen = Arc::new(Mutex::new(vec![]));
        let cloned = seen.clone();
        let mut callback = Callback::new(move |line: &str| {
            cloned.lock().unwrap().push(line.to_string());
        });

        callback.append("a").unwrap();
        callback.append("b").unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_fallible_callback() {
        let mut callback =
            Callback::fallible(|_: &str| Err(Error::new(ErrorKind::Io, "sink closed")));
        let err = callback.append("a").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_default_name_from_function() {
        let callback = Callback::new(sink);
        assert!(callback.default_name().ends_with("::sink"));
    }
}
