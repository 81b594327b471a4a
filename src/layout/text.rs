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

use std::fmt::Write;

use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::Error;
use crate::Level;
use crate::color::Color;
use crate::layout::DEFAULT_WRAP_WIDTH;
use crate::layout::Payload;

const PROCESS_WIDTH: usize = 20;
const THREAD_WIDTH: usize = 30;
const MODULE_WIDTH: usize = 15;
const CONTINUATION: &str = "| ";

/// Everything about a line except its payload and timestamp.
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    pub level: Level,
    /// Module path segments, root first.
    pub segments: &'a [String],
    pub process: Option<&'a str>,
    pub thread: Option<&'a str>,
    /// Whether ANSI colors are emitted, i.e. the line goes to a terminal target.
    pub colored: bool,
}

/// A layout that formats log lines as text.
///
/// Output format:
///
/// ```text
/// [2024-08-11 22:44:57] [   INFO   ] Hello info!
/// [2024-08-11 22:44:57] [ WARNING  ] [       net       ] [       tls       ] Hello warn!
/// [2024-08-11 22:44:57] [  ERROR   ] first line
///                                  | second line
/// ```
///
/// Continuation lines of a multi-line payload are indented so that their text starts in the
/// same column as the payload on the first line. Colors never count toward that width.
///
/// You can customize the timezone of the timestamp with [`TextLayout::timezone`]. Otherwise,
/// the system timezone is used.
#[derive(Debug, Clone)]
pub struct TextLayout {
    timezone: TimeZone,
    timestamp_format: Option<fn(Timestamp, &TimeZone) -> String>,
    wrap_width: usize,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            timezone: TimeZone::system(),
            timestamp_format: None,
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }
}

fn default_timestamp_format(ts: Timestamp, tz: &TimeZone) -> String {
    ts.to_zoned(tz.clone()).strftime("%Y-%m-%d %H:%M:%S").to_string()
}

impl TextLayout {
    /// Set the timezone for timestamps.
    ///
    /// Defaults to the system timezone if not set.
    ///
    /// # Examples
    ///
    /// ```
    /// use jiff::tz::TimeZone;
    /// use logweave::layout::TextLayout;
    ///
    /// let layout = TextLayout::default().timezone(TimeZone::UTC);
    /// ```
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = tz;
        self
    }

    /// Set a user-defined timestamp format function.
    ///
    /// Default to `%Y-%m-%d %H:%M:%S` in the layout's timezone.
    pub fn timestamp_format(mut self, format: fn(Timestamp, &TimeZone) -> String) -> Self {
        self.timestamp_format = Some(format);
        self
    }

    /// Set the width text payloads are wrapped at. Default to 150.
    pub fn wrap_width(mut self, width: usize) -> Self {
        self.wrap_width = width;
        self
    }

    /// Render one log line, without a trailing newline.
    ///
    /// # Errors
    ///
    /// Fails if the payload cannot be normalized, see [`Payload::to_text`].
    pub fn format(
        &self,
        ts: Timestamp,
        ctx: &LineContext,
        payload: &Payload,
    ) -> Result<String, Error> {
        let message = payload.to_text(self.wrap_width)?;

        let time = match self.timestamp_format {
            Some(format) => format(ts, &self.timezone),
            None => default_timestamp_format(ts, &self.timezone),
        };

        let mut prefix = Prefix::new(ctx.colored);
        prefix.field("[", &time, "]", Color::Blue);
        if let Some(process) = ctx.process {
            prefix.field(" [", &center(process, PROCESS_WIDTH), "]", Color::Cyan);
        }
        if let Some(thread) = ctx.thread {
            prefix.field(" [ ", &center(thread, THREAD_WIDTH), " ]", Color::Cyan);
        }
        prefix.field(" [", ctx.level.label(), "]", ctx.level.color());
        for segment in ctx.segments {
            prefix.field(" [ ", &center(segment, MODULE_WIDTH), " ]", Color::Blue);
        }
        prefix.text.push(' ');
        prefix.width += 1;

        let indent = prefix.width.saturating_sub(CONTINUATION.len());
        let message = indent_continuation(&message, indent);

        let mut line = prefix.text;
        line.push_str(&message);
        Ok(line)
    }

    /// Render a decoration-only line: the text itself, colored on terminal targets.
    pub fn format_message(&self, text: &str, color: Color, colored: bool) -> String {
        if colored {
            color.paint(text).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Replace every newline with a newline, `indent` spaces and the continuation marker.
pub(crate) fn indent_continuation(message: &str, indent: usize) -> String {
    if !message.contains('\n') {
        return message.to_string();
    }
    let replacement = format!("\n{}{CONTINUATION}", " ".repeat(indent));
    message.replace('\n', &replacement)
}

/// Center `text` in `width` columns. When both the margin and the width are odd, the extra
/// space goes on the left.
fn center(text: &str, width: usize) -> String {
    let margin = width.saturating_sub(text.chars().count());
    let left = margin / 2 + (margin & width & 1);
    let right = margin - left;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

struct Prefix {
    text: String,
    // visible width, without escape sequences
    width: usize,
    colored: bool,
}

impl Prefix {
    fn new(colored: bool) -> Self {
        Self {
            text: String::new(),
            width: 0,
            colored,
        }
    }

    fn field(&mut self, open: &str, value: &str, close: &str, color: Color) {
        self.width += open.chars().count() + value.chars().count() + close.chars().count();
        self.text.push_str(open);
        if self.colored {
            // writing to a String never fails
            write!(&mut self.text, "{}", color.paint(value)).unwrap();
        } else {
            self.text.push_str(value);
        }
        self.text.push_str(close);
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    fn layout() -> TextLayout {
        TextLayout::default().timezone(TimeZone::UTC)
    }

    fn ts() -> Timestamp {
        Timestamp::from_second(1_700_000_000).unwrap()
    }

    fn plain(level: Level, segments: &[String]) -> LineContext<'_> {
        LineContext {
            level,
            segments,
            process: None,
            thread: None,
            colored: false,
        }
    }

    #[test]
    fn test_plain_line() {
        let line = layout()
            .format(ts(), &plain(Level::Info, &[]), &"hello".into())
            .unwrap();
        assert_snapshot!(line, @"[2023-11-14 22:13:20] [   INFO   ] hello");
    }

    #[test]
    fn test_module_segments_are_boxed_individually() {
        let segments = vec!["test".to_string(), "sub".to_string()];
        let line = layout()
            .format(ts(), &plain(Level::Warning, &segments), &"hi".into())
            .unwrap();
        assert_snapshot!(line, @"[2023-11-14 22:13:20] [ WARNING  ] [       test      ] [       sub       ] hi");
    }

    #[test]
    fn test_process_and_thread() {
        let ctx = LineContext {
            level: Level::Error,
            segments: &[],
            process: Some("app"),
            thread: Some("main"),
            colored: false,
        };
        let line = layout().format(ts(), &ctx, &42.into()).unwrap();
        assert_eq!(
            line,
            format!(
                "[2023-11-14 22:13:20] [{:^20}] [ {:^30} ] [  ERROR   ] 42",
                "app", "main"
            )
        );
    }

    #[test]
    fn test_multiline_default_indent_is_33() {
        let line = layout()
            .format(
                ts(),
                &plain(Level::Info, &[]),
                &"This is a message\nThis is a message".into(),
            )
            .unwrap();
        let expected = format!(
            "[2023-11-14 22:13:20] [   INFO   ] This is a message\n{}| This is a message",
            " ".repeat(33)
        );
        assert_eq!(line, expected);
    }

    #[test]
    fn test_multiline_indent_grows_with_modules() {
        let segments = vec!["test".to_string()];
        let line = layout()
            .format(ts(), &plain(Level::Info, &segments), &"a\nb".into())
            .unwrap();
        let (first, second) = line.split_once('\n').unwrap();
        let payload_column = first.find("] a").unwrap() + 2;
        assert_eq!(second, format!("{}| b", " ".repeat(payload_column - 2)));
        assert_eq!(payload_column - 2, 53);
    }

    #[test]
    fn test_colored_indent_ignores_escape_codes() {
        colored::control::set_override(true);
        let ctx = LineContext {
            colored: true,
            ..plain(Level::Info, &[])
        };
        let line = layout().format(ts(), &ctx, &"a\nb".into()).unwrap();
        assert!(line.contains("\u{1b}["));
        assert!(line.ends_with(&format!("\n{}| b", " ".repeat(33))));
    }

    #[test]
    fn test_format_is_deterministic() {
        let segments = vec!["api".to_string()];
        let ctx = plain(Level::Debug, &segments);
        let payload = Payload::json(&serde_json::json!({"k": [1, 2]}));
        let first = layout().format(ts(), &ctx, &payload).unwrap();
        let second = layout().format(ts(), &ctx, &payload).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_structured_payload_is_indented() {
        let payload = Payload::json(&serde_json::json!({"user": "ada"}));
        let line = layout()
            .format(ts(), &plain(Level::Info, &[]), &payload)
            .unwrap();
        let pad = " ".repeat(33);
        assert_eq!(
            line,
            format!(
                "[2023-11-14 22:13:20] [   INFO   ] {{\n{pad}|     \"user\": \"ada\"\n{pad}| }}"
            )
        );
    }

    #[test]
    fn test_custom_timestamp_format() {
        let layout = layout().timestamp_format(|ts, _| ts.as_second().to_string());
        let line = layout
            .format(ts(), &plain(Level::Critical, &[]), &true.into())
            .unwrap();
        assert_snapshot!(line, @"[1700000000] [ CRITICAL ] true");
    }

    #[test]
    fn test_center_puts_odd_margin_left_in_odd_width() {
        assert_eq!(center("test", 15), "      test     ");
        assert_eq!(center("sub", 15), "      sub      ");
        assert_eq!(center("app", 20), "        app         ");
        assert_eq!(center("a-name-longer-than-the-box", 15), "a-name-longer-than-the-box");
    }

    #[test]
    fn test_format_message() {
        assert_eq!(layout().format_message("banner", Color::Yellow, false), "banner");
    }
}
