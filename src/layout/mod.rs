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

//! Layouts for formatting log lines.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use crate::Error;
use crate::ErrorKind;

pub use text::LineContext;
pub use text::TextLayout;

mod text;

/// The default width text payloads are wrapped at.
pub const DEFAULT_WRAP_WIDTH: usize = 150;

/// The value carried by a log message.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    /// Free text, word-wrapped when longer than the wrap width.
    Text(String),
    /// A structured value, printed as indented JSON.
    Structured(serde_json::Value),
}

impl Payload {
    /// Capture any serializable value.
    ///
    /// Unit enum variants serialize by name. If the value cannot be represented as JSON, its
    /// [`Debug`](fmt::Debug) text is used instead.
    ///
    /// ```
    /// use logweave::Payload;
    ///
    /// #[derive(Debug, serde::Serialize)]
    /// enum State {
    ///     Ready,
    /// }
    ///
    /// assert_eq!(Payload::json(&State::Ready).to_text(150).unwrap(), "\"Ready\"");
    /// ```
    pub fn json<T>(value: &T) -> Payload
    where
        T: Serialize + fmt::Debug + ?Sized,
    {
        match serde_json::to_value(value) {
            Ok(value) => Payload::Structured(value),
            Err(_) => Payload::Text(format!("{value:?}")),
        }
    }

    /// Normalize the payload into the text printed after the line prefix.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::Format`] error if a text payload contains a word longer than
    /// `width`.
    pub fn to_text(&self, width: usize) -> Result<String, Error> {
        match self {
            Payload::Int(v) => Ok(v.to_string()),
            Payload::UInt(v) => Ok(v.to_string()),
            // `1.0` keeps its fractional part
            Payload::Float(v) => Ok(format!("{v:?}")),
            Payload::Bool(v) => Ok(v.to_string()),
            Payload::Text(text) => wrap_words(text, width).map(Cow::into_owned),
            Payload::Structured(value) => Ok(to_indented_json(value)),
        }
    }
}

fn to_indented_json(value: &serde_json::Value) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    match value.serialize(&mut ser) {
        Ok(()) => String::from_utf8(buf).unwrap_or_else(|_| value.to_string()),
        Err(_) => value.to_string(),
    }
}

/// Greedily wrap `text` on spaces so that no line exceeds `width` characters.
///
/// Text no longer than `width` is returned untouched. Embedded newlines are kept and each
/// line is wrapped on its own.
///
/// # Errors
///
/// Returns an [`ErrorKind::Format`] error if a single word is longer than `width`.
pub fn wrap_words(text: &str, width: usize) -> Result<Cow<'_, str>, Error> {
    if text.chars().count() <= width {
        return Ok(Cow::Borrowed(text));
    }

    let mut lines = vec![];
    for line in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;
        let mut first = true;
        for word in line.split(' ') {
            let word_len = word.chars().count();
            if word_len > width {
                return Err(Error::new(ErrorKind::Format, "a word is longer than the wrap width")
                    .with_context("width", width)
                    .with_context("word_len", word_len));
            }

            if first {
                first = false;
            } else if current_len + 1 + word_len > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            } else {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word_len;
        }
        lines.push(current);
    }
    Ok(Cow::Owned(lines.join("\n")))
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty, $($ty:ty),+) => {
        $(
            impl From<$ty> for Payload {
                fn from(value: $ty) -> Self {
                    Payload::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

impl_from_int!(Int, i64, i8, i16, i32, i64);
impl_from_int!(UInt, u64, u8, u16, u32, u64);
impl_from_int!(Float, f64, f32, f64);

impl From<isize> for Payload {
    fn from(value: isize) -> Self {
        Payload::Int(value as i64)
    }
}

impl From<usize> for Payload {
    fn from(value: usize) -> Self {
        Payload::UInt(value as u64)
    }
}

impl From<bool> for Payload {
    fn from(value: bool) -> Self {
        Payload::Bool(value)
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::Text(value.to_string())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::Text(value)
    }
}

impl From<&String> for Payload {
    fn from(value: &String) -> Self {
        Payload::Text(value.clone())
    }
}

impl From<Cow<'_, str>> for Payload {
    fn from(value: Cow<'_, str>) -> Self {
        Payload::Text(value.into_owned())
    }
}

impl From<fmt::Arguments<'_>> for Payload {
    fn from(value: fmt::Arguments<'_>) -> Self {
        Payload::Text(value.to_string())
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Payload::Structured(value)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde::Serialize;

    use super::*;

    #[derive(Debug, Serialize)]
    enum Role {
        Admin,
    }

    #[derive(Debug, Serialize)]
    struct User {
        name: &'static str,
        role: Role,
    }

    #[test]
    fn test_primitives() {
        assert_eq!(Payload::from(42).to_text(150).unwrap(), "42");
        assert_eq!(Payload::from(7usize).to_text(150).unwrap(), "7");
        assert_eq!(Payload::from(1.5).to_text(150).unwrap(), "1.5");
        assert_eq!(Payload::from(1.0).to_text(150).unwrap(), "1.0");
        assert_eq!(Payload::from(-3.0f32).to_text(150).unwrap(), "-3.0");
        assert_eq!(Payload::from(true).to_text(150).unwrap(), "true");
    }

    #[test]
    fn test_structured_is_indented_json_with_symbolic_enums() {
        let payload = Payload::json(&User {
            name: "ada",
            role: Role::Admin,
        });
        assert_eq!(
            payload.to_text(150).unwrap(),
            "{\n    \"name\": \"ada\",\n    \"role\": \"Admin\"\n}"
        );
    }

    #[test]
    fn test_unrepresentable_value_falls_back_to_debug() {
        let mut map = HashMap::new();
        map.insert((1, 2), 3);
        assert_eq!(Payload::json(&map), Payload::Text("{(1, 2): 3}".to_string()));
    }

    #[test]
    fn test_short_text_is_untouched() {
        assert!(matches!(wrap_words("a  b", 10).unwrap(), Cow::Borrowed("a  b")));
    }

    #[test]
    fn test_wrap_greedily_on_spaces() {
        let wrapped = wrap_words("aaa bbb ccc ddd", 7).unwrap();
        assert_eq!(wrapped, "aaa bbb\nccc ddd");

        let wrapped = wrap_words("aaaa bbbb\ncc dd ee", 8).unwrap();
        assert_eq!(wrapped, "aaaa\nbbbb\ncc dd ee");
    }

    #[test]
    fn test_wrap_keeps_lines_within_width() {
        let text = "lorem ipsum dolor sit amet ".repeat(20);
        let wrapped = wrap_words(&text, DEFAULT_WRAP_WIDTH).unwrap();
        assert!(wrapped.lines().count() > 1);
        for line in wrapped.lines() {
            assert!(line.chars().count() <= DEFAULT_WRAP_WIDTH);
        }
        assert_eq!(wrapped.replace('\n', " "), text);
    }

    #[test]
    fn test_overlong_word_is_an_error() {
        let text = format!("short {}", "x".repeat(DEFAULT_WRAP_WIDTH + 1));
        let err = Payload::from(text).to_text(DEFAULT_WRAP_WIDTH).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }
}
