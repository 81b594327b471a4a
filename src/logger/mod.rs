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

use std::sync::OnceLock;

mod log_impl;
pub use self::log_impl::Logger;

mod target_spec;
pub use self::target_spec::TargetSpec;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// The process-wide logger the logging macros write to.
///
/// It is created on first use with the default configuration: one `stdout` terminal target at
/// [`Level::Info`](crate::Level::Info).
///
/// # Examples
///
/// ```
/// use logweave::Level;
///
/// logweave::logger().set_level("stdout", Level::Debug).unwrap();
/// logweave::debug!("now visible");
/// ```
pub fn logger() -> &'static Logger {
    LOGGER.get_or_init(Logger::new)
}
