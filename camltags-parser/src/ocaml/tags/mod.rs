//! Declaration records
//!
//! A [`Tag`] is created once per recognized declaration, at the moment the automaton has
//! confirmed it, and handed to a [`TagSink`] right away. Tags are never revised afterwards:
//! tentative declarations (constructors that may turn out to be module paths) are staged by
//! the automaton and only become tags once confirmed.

pub mod kind;
pub mod sink;

pub use kind::{Kind, KindSet};
pub use sink::{FnSink, TagSink};

use serde::Serialize;

/// The named scope enclosing a declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scope {
    pub kind: Kind,
    /// Qualified name of the scope, e.g. `Outer/Inner`
    pub name: String,
}

/// One recognized declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub name: String,
    pub kind: Kind,
    /// 1-based line of the declaring token
    pub line: usize,
    /// 0-based byte column of the declaring token
    pub column: usize,
    pub byte_offset: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
}

impl Tag {
    /// Name joined to its scope, e.g. `Shape.Circle` or `counter#incr`
    pub fn qualified_name(&self) -> String {
        match &self.scope {
            Some(scope) => format!(
                "{}{}{}",
                scope.name,
                scope.kind.scope_separator(),
                self.name
            ),
            None => self.name.clone(),
        }
    }

    pub fn scope_name(&self) -> Option<&str> {
        self.scope.as_ref().map(|scope| scope.name.as_str())
    }

    pub fn scope_kind(&self) -> Option<Kind> {
        self.scope.as_ref().map(|scope| scope.kind)
    }
}
