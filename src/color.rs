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

//! Color utilities.

use colored::ColoredString;
use colored::Colorize;

/// Colors used on terminal targets.
///
/// Colorizing goes through [`colored`], so `NO_COLOR`, `CLICOLOR_FORCE` and
/// [`colored::control::set_override`] are honored.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Leave the text as is.
    #[default]
    None,
    Red,
    /// Bold bright red.
    DarkRed,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl Color {
    /// Colorize `text`.
    pub fn paint(&self, text: &str) -> ColoredString {
        let plain = ColoredString::from(text);
        match self {
            Color::None => plain,
            Color::Red => plain.bright_red(),
            Color::DarkRed => plain.bright_red().bold(),
            Color::Green => plain.bright_green(),
            Color::Yellow => plain.bright_yellow(),
            Color::Blue => plain.bright_blue(),
            Color::Magenta => plain.bright_magenta(),
            Color::Cyan => plain.bright_cyan(),
        }
    }
}
