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

//! Masking of registered sensitive strings.

use std::borrow::Cow;

use crate::SensitiveMode;

/// Mask every occurrence of every secret in `text` under [`SensitiveMode::Hide`].
///
/// Each occurrence is replaced by as many `*` as the secret has characters. Matches are
/// searched in the original text, so secrets that overlap or prefix each other are masked as
/// their union. Empty secrets are skipped.
///
/// ```
/// use logweave::SensitiveMode;
/// use logweave::redact::redact;
///
/// let secrets = vec!["hunter2".to_string()];
/// assert_eq!(redact("pw=hunter2", &secrets, SensitiveMode::Hide), "pw=*******");
/// assert_eq!(redact("pw=hunter2", &secrets, SensitiveMode::Show), "pw=hunter2");
/// ```
pub fn redact<'a>(text: &'a str, secrets: &[String], mode: SensitiveMode) -> Cow<'a, str> {
    if mode == SensitiveMode::Show {
        return Cow::Borrowed(text);
    }

    let mut ranges = vec![];
    for secret in secrets.iter().filter(|s| !s.is_empty()) {
        let mut from = 0;
        while let Some(pos) = text[from..].find(secret.as_str()) {
            let begin = from + pos;
            ranges.push((begin, begin + secret.len()));
            // step one char so overlapping occurrences are found too
            from = begin + text[begin..].chars().next().map_or(1, char::len_utf8);
        }
    }
    if ranges.is_empty() {
        return Cow::Borrowed(text);
    }

    ranges.sort_unstable();
    let mut merged: Vec<(usize, usize)> = vec![];
    for (begin, end) in ranges {
        match merged.last_mut() {
            Some(last) if begin <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((begin, end)),
        }
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (begin, end) in merged {
        out.push_str(&text[cursor..begin]);
        out.extend(std::iter::repeat_n('*', text[begin..end].chars().count()));
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    Cow::Owned(out)
}
