//! The parsing automaton
//!
//! [`Automaton`] owns every piece of mutable parser state for one run: the current state, the
//! context stack, the skip targets and the names remembered between productions. Nothing is
//! global, so two runs never observe each other.
//!
//! The productions themselves live in [declarations](super::declarations) and
//! [expressions](super::expressions). Each one handles a `(current, next)` token pair and may
//! emit tags, touch the stack and pick the next state. Tokens a production does not expect are
//! usually handed to [`Automaton::top_level`], so a new declaration is never swallowed.

use super::context::{ContextStack, Role, Strength};
use super::state::State;
use super::ExtractOptions;
use crate::ocaml::diagnostics::Diagnostic;
use crate::ocaml::source::SourceLocation;
use crate::ocaml::tags::{Kind, Scope, Tag, TagSink};
use crate::ocaml::token::{Token, TokenKind};
use tracing::{debug, trace, warn};

/// Where a skipping state goes, and what it waits for.
#[derive(Debug, Clone, Copy)]
pub(super) struct Skip {
    pub waited: TokenKind,
    pub terminating: TokenKind,
    pub come_after: State,
}

/// Open bracket counts while skipping with [`State::SkipBalanced`].
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct Balance {
    pub parens: i32,
    pub brackets: i32,
    pub braces: i32,
}

impl Balance {
    fn is_even(&self) -> bool {
        self.parens == 0 && self.brackets == 0 && self.braces == 0
    }
}

pub(super) struct Automaton<'src, 'opt, S: TagSink> {
    pub(super) state: State,
    pub(super) stack: ContextStack,
    pub(super) skip: Skip,
    pub(super) balance: Balance,
    /// Production an `and` at the top level chains back into
    pub(super) chained: State,
    /// The innermost strong frame belongs to a finished declaration and goes with the next one
    pub(super) strong_pop_pending: bool,
    pub(super) last_module: String,
    pub(super) last_class: String,
    /// Constructor seen but not yet confirmed
    pub(super) staged: Option<Tag>,
    /// A `~label` or `?label` already named its variable
    pub(super) special_param_seen: bool,
    pub(super) label_depth: i32,
    pub(super) optional_depth: i32,
    pub(super) options: &'opt ExtractOptions,
    location: SourceLocation<'src>,
    sink: S,
    emitted: usize,
    offset: usize,
    first_overflow_line: Option<usize>,
}

impl<'src, 'opt, S: TagSink> Automaton<'src, 'opt, S> {
    pub(super) fn new(source: &'src str, options: &'opt ExtractOptions, sink: S) -> Self {
        Self {
            state: State::TopLevel,
            stack: ContextStack::with_capacity(options.max_depth),
            skip: Skip {
                waited: TokenKind::Eof,
                terminating: TokenKind::Eof,
                come_after: State::TopLevel,
            },
            balance: Balance::default(),
            chained: State::TopLevel,
            strong_pop_pending: false,
            last_module: String::new(),
            last_class: String::new(),
            staged: None,
            special_param_seen: false,
            label_depth: 0,
            optional_depth: 0,
            options,
            location: SourceLocation::new(source),
            sink,
            emitted: 0,
            offset: 0,
            first_overflow_line: None,
        }
    }

    /// Feed one token together with its successor.
    pub(super) fn step(&mut self, current: &Token<'src>, next: &Token<'src>) {
        self.offset = current.span.start;
        let before = self.state;

        match self.state {
            State::TopLevel => self.top_level(current, next),
            State::LetHeader => self.let_header(current, next),
            State::LocalLet => self.local_let(current, next),
            State::ParamList => self.param_list(current, next),
            State::LabeledParam => self.labeled_param(current, next),
            State::OptionalParam => self.optional_param(current, next),
            State::BodyEntry => self.body_entry(current, next),
            State::Expression => self.expression(current, next),
            State::MatchPattern => self.match_pattern(current, next),
            State::TypeHeader => self.type_header(current, next),
            State::TypeBody => self.type_body(current, next),
            State::RecordBody => self.record_body(current, next),
            State::ConstructorValidation => self.constructor_validation(current, next),
            State::ExceptionDecl => self.exception_decl(current, next),
            State::ValSignature => self.val_signature(current, next),
            State::ModuleHeader => self.module_header(current, next),
            State::ModuleBody => self.module_body(current, next),
            State::ClassHeader => self.class_header(current, next),
            State::ClassBody => self.class_body(current, next),
            State::MethodHeader => self.method_header(current, next),
            State::SkipUntil => self.skip_until(current),
            State::SkipBalanced => self.skip_balanced(current, next),
            State::SkipOrFallback => self.skip_or_fallback(current, next),
            State::SkipOrTerminate => self.skip_or_terminate(current, next),
            State::SkipOne => self.state = self.skip.come_after,
        }

        if before != self.state {
            trace!(token = %current.kind, from = ?before, to = ?self.state, "transition");
        }
    }

    /// Flush what end of input confirms and report how the run went.
    pub(super) fn finish(mut self) -> (S, Vec<Diagnostic>) {
        self.emit_staged();

        let mut diagnostics = Vec::new();
        if self.stack.refused() > 0 {
            diagnostics.push(Diagnostic::scope_overflow(
                self.stack.capacity(),
                self.stack.refused(),
                self.first_overflow_line.unwrap_or(1),
            ));
        }
        debug!(
            tags = self.emitted,
            diagnostics = diagnostics.len(),
            bytes = self.location.source_len(),
            "extracted declarations"
        );
        (self.sink, diagnostics)
    }

    // Tags

    /// Record for `name`, located at `token`, scoped by the innermost named frame.
    pub(super) fn prepare_tag(&self, name: &str, token: &Token<'_>, kind: Kind) -> Tag {
        let position = self.location.byte_to_position(token.span.start);
        let scope = self.stack.nearest_named().and_then(|frame| {
            frame.role.scope_kind().map(|kind| Scope {
                kind,
                name: frame.name.clone(),
            })
        });

        Tag {
            name: name.to_string(),
            kind,
            line: position.line + 1,
            column: position.column,
            byte_offset: token.span.start,
            scope,
        }
    }

    pub(super) fn add_tag(&mut self, token: &Token<'_>, kind: Kind) {
        self.add_named_tag(token.text, token, kind);
    }

    pub(super) fn add_named_tag(&mut self, name: &str, token: &Token<'_>, kind: Kind) {
        if self.options.kinds.contains(kind) && !name.is_empty() {
            let tag = self.prepare_tag(name, token, kind);
            self.emit(tag);
        }
    }

    /// Emit a tag for a binding local to an expression, if those are exported.
    pub(super) fn add_local_tag(&mut self, token: &Token<'_>, kind: Kind) {
        if self.options.export_local_info {
            self.add_tag(token, kind);
        }
    }

    /// Module tag named after the file, emitted before anything else.
    pub(super) fn add_file_module(&mut self, name: &str) {
        if self.options.kinds.contains(Kind::Module) && !name.is_empty() {
            self.emit(Tag {
                name: name.to_string(),
                kind: Kind::Module,
                line: 1,
                column: 0,
                byte_offset: 0,
                scope: None,
            });
        }
    }

    pub(super) fn stage_constructor(&mut self, token: &Token<'_>) {
        self.staged = if self.options.kinds.contains(Kind::Constructor) {
            Some(self.prepare_tag(token.text, token, Kind::Constructor))
        } else {
            None
        };
    }

    pub(super) fn emit_staged(&mut self) {
        if let Some(tag) = self.staged.take() {
            self.emit(tag);
        }
    }

    fn emit(&mut self, tag: Tag) {
        self.emitted += 1;
        self.sink.emit(tag);
    }

    // Context stack

    pub(super) fn push(
        &mut self,
        strength: Strength,
        role: Role,
        resume: State,
        name: Option<&str>,
    ) {
        if !self.stack.push(strength, role, resume, name) {
            self.note_overflow();
        }
    }

    pub(super) fn push_strong(&mut self, role: Role, name: Option<&str>) {
        self.push(Strength::Strong, role, State::TopLevel, name);
    }

    pub(super) fn push_soft(&mut self, resume: State, role: Role, name: Option<&str>) {
        self.push(Strength::Soft, role, resume, name);
    }

    pub(super) fn push_empty(&mut self, resume: State) {
        if !self.stack.push_empty(resume) {
            self.note_overflow();
        }
    }

    fn note_overflow(&mut self) {
        if self.first_overflow_line.is_none() {
            let line = self.location.byte_to_position(self.offset).line + 1;
            warn!(
                line,
                capacity = self.stack.capacity(),
                "scope stack is full, nested scopes are no longer tracked"
            );
            self.first_overflow_line = Some(line);
        }
    }

    pub(super) fn pop_to_nearest_named(&mut self) {
        self.state = self.stack.pop_to_nearest_named();
    }

    pub(super) fn pop_soft(&mut self) {
        self.state = self.stack.pop_soft();
    }

    pub(super) fn pop_strong(&mut self) -> Option<Role> {
        let (resume, role) = self.stack.pop_strong();
        self.state = resume;
        role
    }

    pub(super) fn jump_to_nearest_match(&mut self) {
        if let Some(resume) = self.stack.jump_to_nearest_match() {
            self.state = resume;
        }
    }

    /// Leave the declaration whose strong frame is still open, if one asked for it.
    pub(super) fn cleanup_previous(&mut self) {
        if self.strong_pop_pending {
            self.strong_pop_pending = false;
            self.pop_strong();
        }
    }

    /// Unwind after an `end`: frames of bindings, types and matches are not what an `end`
    /// closes, so unwinding continues past them to the enclosing strong frame.
    pub(super) fn kill_current_state(&mut self) -> Option<Role> {
        match self.pop_strong() {
            Some(Role::Value | Role::Function | Role::Method | Role::Type | Role::Match) => {
                self.pop_strong()
            }
            popped => popped,
        }
    }

    // Skipping

    /// Ignore tokens in `mode` until `waited`, then continue in `come_after`.
    pub(super) fn skip_to(&mut self, mode: State, waited: TokenKind, come_after: State) {
        self.skip.waited = waited;
        self.skip.come_after = come_after;
        if mode == State::SkipBalanced {
            self.balance = Balance::default();
        }
        self.state = mode;
    }

    /// As [`Automaton::skip_to`], also giving up on `terminating`.
    pub(super) fn skip_to_or_terminate(
        &mut self,
        waited: TokenKind,
        terminating: TokenKind,
        come_after: State,
    ) {
        self.skip.terminating = terminating;
        self.skip_to(State::SkipOrTerminate, waited, come_after);
    }

    fn skip_until(&mut self, current: &Token<'src>) {
        if current.kind == self.skip.waited {
            self.state = self.skip.come_after;
        } else if current.kind == TokenKind::End {
            self.pop_strong();
            self.state = State::TopLevel;
        }
    }

    pub(super) fn skip_balanced(&mut self, current: &Token<'src>, next: &Token<'src>) {
        match current.kind {
            TokenKind::ParenOpen => self.balance.parens -= 1,
            TokenKind::ParenClose => self.balance.parens += 1,
            TokenKind::BraceOpen => self.balance.braces -= 1,
            TokenKind::BraceClose => self.balance.braces += 1,
            TokenKind::BracketOpen => self.balance.brackets -= 1,
            TokenKind::BracketClose => self.balance.brackets += 1,
            _ => {}
        }

        if current.kind == self.skip.waited && self.balance.is_even() {
            self.state = self.skip.come_after;
        } else if current.kind == TokenKind::End {
            self.top_level(current, next);
        }
    }

    fn skip_or_fallback(&mut self, current: &Token<'src>, next: &Token<'src>) {
        if current.kind == self.skip.waited {
            self.state = self.skip.come_after;
        } else {
            self.top_level(current, next);
        }
    }

    fn skip_or_terminate(&mut self, current: &Token<'src>, next: &Token<'src>) {
        if current.kind == self.skip.waited {
            self.state = self.skip.come_after;
        } else if current.kind == self.skip.terminating {
            self.state = State::TopLevel;
        } else {
            self.top_level(current, next);
        }
    }
}
