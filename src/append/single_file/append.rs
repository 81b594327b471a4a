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

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::Error;
use crate::append::Append;
use crate::append::single_file::single::SingleFileWriter;
use crate::append::single_file::single::SingleFileWriterBuilder;

/// An appender that writes log lines to a file.
#[derive(Debug)]
pub struct SingleFile {
    writer: SingleFileWriter,
}

impl SingleFile {
    /// Create the appender, truncating the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::Io`](crate::ErrorKind::Io) error if the file cannot be created
    /// or truncated.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let writer = SingleFileWriterBuilder::new(path).build()?;
        Ok(Self { writer })
    }

    /// The path of the backing file.
    pub fn path(&self) -> &Path {
        self.writer.path()
    }
}

impl Append for SingleFile {
    fn append(&mut self, line: &str) -> Result<(), Error> {
        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');
        self.writer
            .write_all(&bytes)
            .and_then(|()| self.writer.flush())
            .map_err(|err| {
                Error::from_io_error(err).with_context("path", self.writer.path().display())
            })
    }

    fn flush(&mut self) -> Result<(), Error> {
        self.writer.flush().map_err(Error::from_io_error)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_lines_are_newline_terminated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");

        let mut file = SingleFile::new(&path).unwrap();
        file.append("first").unwrap();
        file.append("second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
        assert_eq!(file.path(), path.as_path());
    }
}
