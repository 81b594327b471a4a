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

//! Command line arguments configuring the logger.
//!
//! Flatten [`LogArgs`] into an application's own clap parser, then hand the parsed values to
//! a logger with [`LogArgs::apply`].
//!
//! ```
//! use clap::Parser;
//! use logweave::cli::LogArgs;
//!
//! #[derive(Parser)]
//! struct Cli {
//!     #[command(flatten)]
//!     log: LogArgs,
//! }
//!
//! let cli = Cli::parse_from(["app", "--log-level", "debug"]);
//! cli.log.apply(logweave::logger()).unwrap();
//! ```

use std::path::PathBuf;

use clap::ArgAction;
use clap::Args;

use crate::Error;
use crate::Level;
use crate::Logger;
use crate::SensitiveMode;
use crate::Target;
use crate::TargetSpec;
use crate::Terminal;

/// Logger configuration arguments.
#[derive(Debug, Clone, Args)]
#[command(next_help_heading = "Logger configuration")]
pub struct LogArgs {
    /// Level threshold of the target selected by --log-target
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Target that --log-level and --log-sensitive apply to
    #[arg(long, value_name = "NAME", default_value = "stdout")]
    pub log_target: String,

    /// Print sensitive data verbatim on the target selected by --log-target
    #[arg(long)]
    pub log_sensitive: bool,

    /// Path to a JSON logger configuration file, replacing the whole configuration
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Sensitive strings to mask, replacing the registered ones
    #[arg(short = 'd', long, alias = "sensitiveDatas", num_args = 1.., value_name = "DATA")]
    pub sensitive_datas: Option<Vec<String>>,

    /// Add a target: TARGET (stdout, stderr or a file path) [LEVEL] [MODE] [DATAS] [NAME]
    ///
    /// DATAS is a comma separated list of strings to mask.
    #[arg(
        short = 't',
        alias = "addTarget",
        long,
        num_args = 1..=5,
        action = ArgAction::Append,
        value_names = ["TARGET", "LEVEL", "MODE", "DATAS", "NAME"],
    )]
    pub add_target: Vec<Vec<String>>,
}

impl LogArgs {
    /// Apply the arguments to `logger`.
    ///
    /// The configuration file is loaded first, then the sensitive strings are replaced, then
    /// the extra targets are added, and finally --log-level and --log-sensitive are applied.
    ///
    /// # Errors
    ///
    /// Fails on the first configuration file, target or name that cannot be used. Steps
    /// applied before the failure are kept.
    pub fn apply(&self, logger: &Logger) -> Result<(), Error> {
        if let Some(path) = &self.config {
            logger.load_config_file(path)?;
        }

        if let Some(values) = &self.sensitive_datas {
            logger.with_config_mut(|config| config.set_sensitive_datas(values.iter().cloned()));
        }

        for params in &self.add_target {
            add_target(logger, params)?;
        }

        if let Some(level) = &self.log_level {
            logger.set_level(&self.log_target, Level::from_str_lenient(level))?;
        }
        if self.log_sensitive {
            logger.set_sensitive_mode(&self.log_target, SensitiveMode::Show)?;
        }
        Ok(())
    }
}

fn add_target(logger: &Logger, params: &[String]) -> Result<(), Error> {
    let param = |index: usize| params.get(index).map(String::as_str);

    let Some(target) = param(0) else {
        return Err(Error::validation("--add-target needs a target"));
    };
    let level = param(1).map_or(Level::Info, Level::from_str_lenient);
    let mode = param(2).map_or(SensitiveMode::Hide, SensitiveMode::from_str_lenient);

    let target = match target.parse::<Terminal>() {
        Ok(terminal) => Target::from_terminal(terminal),
        Err(_) => Target::from_file(target)?,
    };
    let target = match param(4) {
        Some(name) => target.with_name(name),
        None => target,
    };

    if let Some(datas) = param(3) {
        for value in datas.split(',') {
            logger.add_sensitive_data(value);
        }
    }

    logger.add_target(TargetSpec::Target(target), level, mode)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::ErrorKind;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        log: LogArgs,
    }

    fn parse(args: &[&str]) -> LogArgs {
        let mut argv = vec!["app"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().log
    }

    #[test]
    fn test_parse_add_target_groups() {
        let args = parse(&[
            "--add-target",
            "stderr",
            "error",
            "--add-target",
            "out.log",
            "debug",
            "show",
            "a,b",
            "file",
        ]);
        assert_eq!(args.add_target.len(), 2);
        assert_eq!(args.add_target[0], ["stderr", "error"]);
        assert_eq!(args.add_target[1].len(), 5);
        assert_eq!(args.log_target, "stdout");
    }

    #[test]
    fn test_apply() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        let path_arg = path.display().to_string();

        let args = parse(&[
            "--log-level",
            "warning",
            "--sensitive-datas",
            "pw",
            "--add-target",
            "stderr",
            "error",
            "--add-target",
            path_arg.as_str(),
            "debug",
            "hide",
            "tok,",
            "file",
        ]);

        let logger = Logger::new();
        args.apply(&logger).unwrap();

        assert_eq!(logger.target_names(), ["stdout", "stderr", "file"]);
        assert_eq!(logger.level_of("stdout").unwrap(), Level::Warning);
        assert_eq!(logger.level_of("stderr").unwrap(), Level::Error);
        assert_eq!(logger.level_of("file").unwrap(), Level::Debug);
        assert_eq!(logger.sensitive_datas(), ["pw", "tok"]);
        assert!(path.exists());
    }

    #[test]
    fn test_log_sensitive_on_unknown_target() {
        let args = parse(&["--log-target", "nope", "--log-sensitive"]);
        let err = args.apply(&Logger::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_config_file_replaces_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("logger.json");
        std::fs::write(
            &config,
            r#"{"targets": [{"terminal": "stderr", "level": "critical"}]}"#,
        )
        .unwrap();

        let config_arg = config.display().to_string();
        let args = parse(&["--config", config_arg.as_str()]);
        let logger = Logger::new();
        args.apply(&logger).unwrap();
        assert_eq!(logger.target_names(), ["stderr"]);
        assert_eq!(logger.level_of("stderr").unwrap(), Level::Critical);
    }
}
