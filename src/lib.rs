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

//! Logweave is a process-wide logging dispatcher: leveled, optionally module-tagged messages
//! are routed to any number of named targets, each with its own threshold and its own way of
//! treating sensitive data.
//!
//! # Overview
//!
//! - A [`Target`] is a named sink (a terminal stream, a file, or a callback) with a [`Level`]
//!   threshold and a [`SensitiveMode`].
//! - Registered sensitive strings are masked with `*` on every target in
//!   [`SensitiveMode::Hide`].
//! - [`set_module!`] tags every message logged from the declaring function; dotted names
//!   nest.
//! - Lines look like `[2024-08-11 22:44:57] [   INFO   ] message`; multi-line payloads are
//!   indented under the first line and terminal targets are colored.
//!
//! # Examples
//!
//! Log to the default `stdout` target:
//!
//! ```
//! logweave::info!("This is an info message.");
//! logweave::debug!("Not shown, the default threshold is INFO.");
//! ```
//!
//! Add a file target and mask a secret on the terminal only:
//!
//! ```no_run
//! use logweave::Level;
//! use logweave::SensitiveMode;
//! use logweave::TargetSpec;
//!
//! let logger = logweave::logger();
//! logger
//!     .add_target(TargetSpec::file("debug.log"), Level::Debug, SensitiveMode::Show)
//!     .unwrap();
//! logger.add_sensitive_data("hunter2");
//!
//! logweave::warning!("password is hunter2");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod bridge;
pub mod config;
pub mod layout;
pub mod module;
pub mod redact;
pub mod trace;
pub mod trap;

#[cfg(feature = "cli")]
pub mod cli;

mod color;
mod error;
mod level;
mod logger;
mod macros;
mod target;

pub use self::color::Color;
pub use self::config::LoggerConfig;
pub use self::error::Error;
pub use self::error::ErrorKind;
pub use self::layout::Payload;
pub use self::level::Level;
pub use self::level::SensitiveMode;
pub use self::logger::Logger;
pub use self::logger::TargetSpec;
pub use self::logger::logger;
pub use self::module::Module;
pub use self::module::ModuleRegistry;
pub use self::module::Scope;
pub use self::target::LEVEL_PROPERTY;
pub use self::target::SENSITIVE_MODE_PROPERTY;
pub use self::target::Target;
pub use self::target::TargetKind;
pub use self::target::Terminal;
