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

//! Appender for writing log lines to a file.
//!
//! The file is truncated when the appender is built; every line is then appended to it,
//! uncolored and terminated by `\n`.
//!
//! # Example
//!
//!```no_run
//! use logweave::Level;
//! use logweave::SensitiveMode;
//! use logweave::TargetSpec;
//!
//! let name = logweave::logger()
//!     .add_target(TargetSpec::file("/path/to/file.log"), Level::Debug, SensitiveMode::Hide)
//!     .unwrap();
//! assert_eq!(name, "/path/to/file.log");
//!
//! logweave::info!("This log will be written to a file.");
//! ```

pub use append::SingleFile;
pub use single::SingleFileWriter;
pub use single::SingleFileWriterBuilder;

mod append;
mod single;
