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

use logweave::Color;
use logweave::Level;

fn connect() {
    logweave::set_module!("net").unwrap();
    logweave::info!("connecting to {}", "example.org");
    tls();
}

fn tls() {
    logweave::set_module!("net.tls").unwrap();
    logweave::warning!("certificate expires in {} days", 3);
}

fn main() {
    let logger = logweave::logger();
    logger.set_level("stdout", Level::DeepDebug).unwrap();

    logweave::message!("==== simple stdout ====", Color::Magenta);
    logweave::critical!("Hello critical!");
    logweave::error!("Hello error!");
    logweave::warning!("Hello warning!");
    logweave::info!("Hello info!");
    logweave::debug!("Hello debug!");
    logweave::deep_debug!("Hello deep debug!\nwith a second line");
    logweave::info!(serde_json::json!({ "user": "ada", "roles": ["admin"] }));

    connect();
}
