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

//! Logging macros.
//!
//! Every macro captures the [`Scope`](crate::Scope) of its call site, so messages pick up the
//! module declared by [`set_module!`] in the same function. By default they go to the global
//! [`logger()`](crate::logger); prefix the arguments with `logger: <expr>,` to use another one.
//!
//! A single string literal, or a literal followed by arguments, is formatted like
//! [`format!`]. Any other single expression is converted into a [`Payload`](crate::Payload);
//! wrap a bare numeric or boolean literal in parentheses to log it as such.

/// Log a message at the given level.
///
/// ```
/// use logweave::Level;
///
/// logweave::log!(Level::Warning, "disk {}% full", 91);
/// let answer = 42;
/// logweave::log!(Level::Info, answer);
/// logweave::log!(Level::Info, (7));
/// ```
#[macro_export]
macro_rules! log {
    (logger: $logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.emit($level, $crate::scope!(), $crate::__payload!($($arg)+))
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::logger().emit($level, $crate::scope!(), $crate::__payload!($($arg)+))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __payload {
    ($fmt:literal $(,)?) => {
        $crate::Payload::from(::std::format!($fmt))
    };
    ($fmt:literal, $($arg:tt)+) => {
        $crate::Payload::from(::std::format!($fmt, $($arg)+))
    };
    ($payload:expr $(,)?) => {
        $crate::Payload::from($payload)
    };
}

/// Log at [`Level::DeepDebug`](crate::Level::DeepDebug).
#[macro_export]
macro_rules! deep_debug {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log!(logger: $logger, $crate::Level::DeepDebug, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::DeepDebug, $($arg)+)
    };
}

/// Log at [`Level::Debug`](crate::Level::Debug).
#[macro_export]
macro_rules! debug {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log!(logger: $logger, $crate::Level::Debug, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Debug, $($arg)+)
    };
}

/// Log at [`Level::Info`](crate::Level::Info).
///
/// ```
/// let user = "ada";
/// logweave::info!("{user} logged in");
/// logweave::info!(serde_json::json!({ "user": user }));
/// ```
#[macro_export]
macro_rules! info {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log!(logger: $logger, $crate::Level::Info, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Info, $($arg)+)
    };
}

/// Log at [`Level::Warning`](crate::Level::Warning).
#[macro_export]
macro_rules! warning {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log!(logger: $logger, $crate::Level::Warning, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Warning, $($arg)+)
    };
}

/// Log at [`Level::Error`](crate::Level::Error).
#[macro_export]
macro_rules! error {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log!(logger: $logger, $crate::Level::Error, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Error, $($arg)+)
    };
}

/// Log at [`Level::Critical`](crate::Level::Critical).
#[macro_export]
macro_rules! critical {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log!(logger: $logger, $crate::Level::Critical, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Critical, $($arg)+)
    };
}

/// Write a decoration line to every target, regardless of thresholds.
///
/// ```
/// use logweave::Color;
///
/// logweave::message!("==== starting ====");
/// logweave::message!("done", Color::Green);
/// ```
#[macro_export]
macro_rules! message {
    (logger: $logger:expr, $payload:expr, $color:expr $(,)?) => {
        $logger.emit_message($payload, $color)
    };
    (logger: $logger:expr, $payload:expr $(,)?) => {
        $logger.emit_message($payload, $crate::Color::None)
    };
    ($payload:expr, $color:expr $(,)?) => {
        $crate::logger().emit_message($payload, $color)
    };
    ($payload:expr $(,)?) => {
        $crate::logger().emit_message($payload, $crate::Color::None)
    };
}

/// Declare the module of the enclosing function. An empty name removes it.
///
/// Evaluates to a `Result`; see [`ModuleRegistry::declare`](crate::ModuleRegistry::declare)
/// for the rules.
///
/// ```
/// fn connect() {
///     logweave::set_module!("net").unwrap();
///     logweave::info!("connecting");
/// }
/// # connect();
/// ```
#[macro_export]
macro_rules! set_module {
    (logger: $logger:expr, $name:expr $(,)?) => {
        $logger.set_module($crate::scope!(), $name)
    };
    ($name:expr $(,)?) => {
        $crate::logger().set_module($crate::scope!(), $name)
    };
}
