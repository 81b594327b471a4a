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

//! Hierarchical module tags keyed by call site.
//!
//! A module is declared from inside a function with [`set_module!`](crate::set_module) and is
//! then attached to every message logged from that same function. Tagging follows where the
//! code lives, not who calls it: a helper called from a tagged function is not tagged unless
//! it declares a module itself. Closures share the module of the function they are written
//! in.
//!
//! Dotted names nest: declaring `"net"` in one function and `"net.tls"` in another makes the
//! second a child of the first, and its messages carry the segments `net` and `tls`.

use std::collections::HashMap;
use std::fmt;

use crate::Error;

/// The longest accepted module name, in characters.
pub const MAX_MODULE_NAME_LEN: usize = 15;

/// A call-site key: the source file and the enclosing function path.
///
/// Build one with the [`scope!`](crate::scope) macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Scope {
    file: &'static str,
    function: &'static str,
}

impl Scope {
    pub const fn new(file: &'static str, function: &'static str) -> Self {
        Self { file, function }
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn function(&self) -> &'static str {
        self.function
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.function, self.file)
    }
}

/// The path of the function enclosing `marker`.
///
/// Closures share the scope of the function they are written in.
#[doc(hidden)]
pub fn enclosing_function<F>(_marker: F) -> &'static str {
    let name = std::any::type_name::<F>();
    let mut name = name.strip_suffix("::__logweave_scope").unwrap_or(name);
    while let Some(outer) = name.strip_suffix("::{{closure}}") {
        name = outer;
    }
    name
}

/// Capture the [`Scope`] of the current call site.
///
/// ```
/// fn handler() -> logweave::Scope {
///     logweave::scope!()
/// }
///
/// assert!(handler().function().ends_with("::handler"));
/// ```
#[macro_export]
macro_rules! scope {
    () => {
        $crate::Scope::new(::std::file!(), {
            fn __logweave_scope() {}
            $crate::module::enclosing_function(__logweave_scope)
        })
    };
}

/// A declared module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    path: Vec<String>,
    scope: Scope,
}

impl Module {
    /// The display name of this module, i.e. its last segment.
    pub fn name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }

    /// The segments from the root module down to this one.
    pub fn segments(&self) -> &[String] {
        &self.path
    }

    /// The dotted path of this module.
    pub fn full_name(&self) -> String {
        self.path.join(".")
    }

    /// The dotted path of the parent module, if any.
    pub fn parent_name(&self) -> Option<String> {
        match self.path.len() {
            0 | 1 => None,
            n => Some(self.path[..n - 1].join(".")),
        }
    }

    /// The call site that declared this module.
    pub fn scope(&self) -> Scope {
        self.scope
    }
}

/// Owns every declared [`Module`], keyed by the declaring [`Scope`].
#[derive(Debug, Default, Clone)]
pub struct ModuleRegistry {
    modules: HashMap<Scope, Module>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `name` for `scope`.
    ///
    /// An empty name removes the mapping of `scope`. Re-declaring the same name from the same
    /// scope is a no-op. When the part of `name` before its last `.` names a declared module,
    /// the new module becomes its child; otherwise it is a root module.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::Validation`](crate::ErrorKind::Validation) error, leaving the
    /// registry unchanged, if the name is longer than [`MAX_MODULE_NAME_LEN`], has an empty
    /// segment, or is already declared by another scope.
    pub fn declare(&mut self, name: &str, scope: Scope) -> Result<(), Error> {
        if name.is_empty() {
            self.modules.remove(&scope);
            return Ok(());
        }

        if name.chars().count() > MAX_MODULE_NAME_LEN {
            return Err(Error::validation(format!(
                "module name should be at most {MAX_MODULE_NAME_LEN} characters"
            ))
            .with_context("name", name));
        }

        if name.split('.').any(str::is_empty) {
            return Err(
                Error::validation("module name has an empty segment").with_context("name", name)
            );
        }

        if let Some(existing) = self.find(name) {
            if existing.scope == scope {
                return Ok(());
            }
            return Err(Error::validation("module already declared elsewhere")
                .with_context("name", name)
                .with_context("declared_at", existing.scope));
        }

        let path = match name.rsplit_once('.') {
            Some((parent, leaf)) => match self.find(parent) {
                Some(parent) => {
                    let mut path = parent.path.clone();
                    path.push(leaf.to_string());
                    path
                }
                None => vec![name.to_string()],
            },
            None => vec![name.to_string()],
        };

        self.modules.insert(scope, Module { path, scope });
        Ok(())
    }

    /// The module declared by `scope`, if any.
    pub fn resolve(&self, scope: &Scope) -> Option<&Module> {
        self.modules.get(scope)
    }

    /// Find a module by its dotted path.
    pub fn find(&self, full_name: &str) -> Option<&Module> {
        self.modules.values().find(|m| m.full_name() == full_name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn clear(&mut self) {
        self.modules.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn scope(function: &'static str) -> Scope {
        Scope::new("src/main.rs", function)
    }

    #[test]
    fn test_scope_macro_names_enclosing_function() {
        fn outer() -> Scope {
            crate::scope!()
        }

        let s = outer();
        assert!(s.function().ends_with("::outer"), "{}", s.function());
        assert!(s.file().ends_with("module.rs"));
        assert_eq!(outer(), outer());
        assert_ne!(outer(), crate::scope!());
    }

    #[test]
    fn test_closures_share_the_enclosing_scope() {
        fn outer() -> (Scope, Scope, Scope) {
            let direct = crate::scope!();
            let closure = (|| crate::scope!())();
            let nested = (|| (|| crate::scope!())())();
            (direct, closure, nested)
        }

        let (direct, closure, nested) = outer();
        assert_eq!(direct, closure);
        assert_eq!(direct, nested);
        assert!(!closure.function().contains("{{closure}}"));
    }

    #[test]
    fn test_nested_declaration() {
        let mut registry = ModuleRegistry::new();
        registry.declare("test", scope("a")).unwrap();
        registry.declare("test.sub", scope("b")).unwrap();
        registry.declare("test.sub.sub", scope("c")).unwrap();

        let leaf = registry.resolve(&scope("c")).unwrap();
        assert_eq!(leaf.segments(), ["test", "sub", "sub"]);
        assert_eq!(leaf.name(), "sub");
        assert_eq!(leaf.full_name(), "test.sub.sub");
        assert_eq!(leaf.parent_name().as_deref(), Some("test.sub"));
        assert_eq!(registry.resolve(&scope("a")).unwrap().parent_name(), None);
    }

    #[test]
    fn test_unknown_parent_is_root() {
        let mut registry = ModuleRegistry::new();
        registry.declare("db.pool", scope("a")).unwrap();
        assert_eq!(registry.resolve(&scope("a")).unwrap().segments(), ["db.pool"]);
    }

    #[test]
    fn test_redeclare_is_idempotent() {
        let mut registry = ModuleRegistry::new();
        registry.declare("api", scope("a")).unwrap();
        registry.declare("api", scope("a")).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_conflicting_scope() {
        let mut registry = ModuleRegistry::new();
        registry.declare("api", scope("a")).unwrap();
        let err = registry.declare("api", scope("b")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(registry.resolve(&scope("b")).is_none());
    }

    #[test]
    fn test_too_long_name_leaves_registry_unchanged() {
        let mut registry = ModuleRegistry::new();
        registry.declare("api", scope("a")).unwrap();

        let err = registry
            .declare("This module name is too long", scope("a"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(registry.resolve(&scope("a")).unwrap().full_name(), "api");
        assert_eq!(registry.len(), 1);

        // exactly fifteen characters is accepted
        registry.declare("fifteen_chars_x", scope("b")).unwrap();
    }

    #[test]
    fn test_empty_name_removes() {
        let mut registry = ModuleRegistry::new();
        registry.declare("api", scope("a")).unwrap();
        registry.declare("", scope("a")).unwrap();
        assert!(registry.resolve(&scope("a")).is_none());
        // removing an absent mapping is fine
        registry.declare("", scope("z")).unwrap();
    }

    #[test]
    fn test_empty_segment_rejected() {
        let mut registry = ModuleRegistry::new();
        assert!(registry.declare("api.", scope("a")).is_err());
        assert!(registry.declare(".api", scope("a")).is_err());
        assert!(registry.is_empty());
    }
}
