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

use std::fs;

use logweave::Level;
use logweave::SensitiveMode;
use logweave::TargetSpec;

fn main() {
    let path = std::env::temp_dir().join("logweave-single-file.log");

    let logger = logweave::logger();
    logger.add_sensitive_data("hunter2");
    let name = logger
        .add_target(TargetSpec::file(&path), Level::Debug, SensitiveMode::Show)
        .unwrap();

    logweave::debug!("only in the file");
    // stdout masks the password, the file keeps it
    logweave::info!("login with password hunter2");

    logger.set_sensitive_mode(&name, SensitiveMode::Hide).unwrap();
    logweave::info!("masked everywhere now: hunter2");
    logger.flush().unwrap();

    println!("---- {} ----", path.display());
    print!("{}", fs::read_to_string(&path).unwrap());
}
