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

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::Error;
use crate::ErrorKind;

/// A writer for a single, truncated-on-open file.
#[derive(Debug)]
pub struct SingleFileWriter {
    filepath: PathBuf,
    writer: File,
}

impl SingleFileWriter {
    /// The path this writer was opened with.
    pub fn path(&self) -> &Path {
        &self.filepath
    }
}

impl Write for SingleFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// A builder for configuring [`SingleFileWriter`].
#[derive(Debug)]
pub struct SingleFileWriterBuilder {
    // required
    filepath: PathBuf,

    truncate: bool,
}

impl SingleFileWriterBuilder {
    /// Creates a new [`SingleFileWriterBuilder`].
    #[must_use]
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            filepath: filepath.into(),
            truncate: true,
        }
    }

    /// Keep the existing content of the file instead of truncating it.
    #[must_use]
    pub fn keep_existing(mut self) -> Self {
        self.truncate = false;
        self
    }

    /// Builds the [`SingleFileWriter`].
    ///
    /// The parent directory must already exist.
    pub fn build(self) -> Result<SingleFileWriter, Error> {
        let mut options = OpenOptions::new();
        options.create(true);
        if self.truncate {
            options.write(true).truncate(true);
        } else {
            options.append(true);
        }

        let writer = options.open(&self.filepath).map_err(|err| {
            Error::new(ErrorKind::Io, "failed to create log file")
                .with_context("path", self.filepath.display())
                .with_source(err)
        })?;
        Ok(SingleFileWriter {
            filepath: self.filepath,
            writer,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Write;

    use rand::Rng;
    use rand::distr::Alphanumeric;
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_single_file_truncates() {
        let temp_file = NamedTempFile::new().expect("failed to create a temporary file");
        fs::write(temp_file.path(), "stale content\n").unwrap();

        let mut writer = SingleFileWriterBuilder::new(temp_file.path())
            .build()
            .unwrap();
        assert_eq!(fs::read_to_string(temp_file.path()).unwrap(), "");

        let rand_str = generate_random_string();
        assert_eq!(writer.write(rand_str.as_bytes()).unwrap(), rand_str.len());
        writer.flush().unwrap();
        assert_eq!(fs::read_to_string(temp_file.path()).unwrap(), rand_str);
    }

    #[test]
    fn test_keep_existing() {
        let temp_file = NamedTempFile::new().expect("failed to create a temporary file");
        fs::write(temp_file.path(), "kept\n").unwrap();

        let mut writer = SingleFileWriterBuilder::new(temp_file.path())
            .keep_existing()
            .build()
            .unwrap();
        writer.write_all(b"added\n").unwrap();
        writer.flush().unwrap();
        assert_eq!(
            fs::read_to_string(temp_file.path()).unwrap(),
            "kept\nadded\n"
        );
    }

    #[test]
    fn test_unwritable_path() {
        let temp_file = NamedTempFile::new().expect("failed to create a temporary file");
        // a regular file cannot be a parent directory
        let path = temp_file.path().join("nested.log");

        let err = SingleFileWriterBuilder::new(&path).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    fn generate_random_string() -> String {
        let mut rng = rand::rng();
        let len = rng.random_range(50..=100);
        let random_string: String = std::iter::repeat(())
            .map(|()| rng.sample(Alphanumeric))
            .map(char::from)
            .take(len)
            .collect();

        random_string
    }
}
