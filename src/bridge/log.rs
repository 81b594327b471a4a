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

use crate::Level;
use crate::Logger;
use crate::Scope;

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warning,
            log::Level::Info => Self::Info,
            log::Level::Debug => Self::Debug,
            log::Level::Trace => Self::DeepDebug,
        }
    }
}

/// Forwards records of the `log` crate to a [`Logger`].
///
/// A record's scope is its file and module path, so modules declared with
/// [`Logger::set_module`] for that pair apply to bridged records too.
#[derive(Debug, Clone, Copy)]
pub struct LogBridge {
    logger: &'static Logger,
}

impl LogBridge {
    pub fn new(logger: &'static Logger) -> Self {
        Self { logger }
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        let level = Level::from(metadata.level());
        self.logger
            .with_config_ref(|config| config.targets().iter().any(|t| t.accepts(level)))
    }

    fn log(&self, record: &log::Record) {
        let scope = Scope::new(
            record.file_static().unwrap_or("<unknown>"),
            record.module_path_static().unwrap_or("<unknown>"),
        );
        self.logger
            .emit(record.level().into(), scope, record.args().to_string());
    }

    fn flush(&self) {
        let _ = self.logger.flush();
    }
}

/// Install a [`LogBridge`] to the global [`logger()`](crate::logger) as the `log` crate's
/// logger, with every level enabled.
///
/// # Errors
///
/// Return an error if the `log` crate already has a logger.
pub fn setup_log_crate() -> Result<(), log::SetLoggerError> {
    static BRIDGE: std::sync::OnceLock<LogBridge> = std::sync::OnceLock::new();
    let bridge = BRIDGE.get_or_init(|| LogBridge::new(crate::logger()));
    log::set_logger(bridge)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}
