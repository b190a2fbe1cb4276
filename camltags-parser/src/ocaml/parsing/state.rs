//! Automaton states
//!
//! Each state stands for one grammar production. The automaton holds the current state as a
//! plain value and dispatches on it for every token, context frames remember which state to
//! resume when they are popped.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum State {
    /// Module or file level: waits for the keywords opening a declaration
    TopLevel,
    /// `let` at top level, before the bound name
    LetHeader,
    /// `let` inside an expression
    LocalLet,
    /// Parameters of a binding, up to `=` or `->`
    ParamList,
    /// `~label`, `~label:pattern` or `~(label : type)`
    LabeledParam,
    /// `?label` or `?(label = default)`
    OptionalParam,
    /// Start of an expression, where a local declaration may appear
    BodyEntry,
    /// Inside an expression
    Expression,
    /// Alternatives after `with` or `function`
    MatchPattern,
    /// `type`, before the type name
    TypeHeader,
    /// Right hand side of a type definition
    TypeBody,
    /// Fields of a record type
    RecordBody,
    /// Capitalized name in a type body, constructor or module path
    ConstructorValidation,
    ExceptionDecl,
    /// `val` item of a signature
    ValSignature,
    /// `module`, before the module name
    ModuleHeader,
    /// After the module name, waiting for `struct`, `sig` or `functor`
    ModuleBody,
    /// `class`, before the class name
    ClassHeader,
    /// After `class name ... =`, expecting `object`
    ClassBody,
    /// `method`, before the method name
    MethodHeader,
    /// Skip to a token, bail out to the top level on `end`
    SkipUntil,
    /// Skip to a token outside of any bracket
    SkipBalanced,
    /// Skip to a token, letting the top level see everything else
    SkipOrFallback,
    /// As [`State::SkipOrFallback`], giving up on a terminating token
    SkipOrTerminate,
    /// Drop exactly one token
    SkipOne,
}
