//! Expression productions
//!
//! Expressions are not parsed, only walked: these states keep the context stack in step with
//! the nesting of local bindings, parentheses, `begin ... end` blocks and match arms, so that
//! declarations found later get the right scope.

use super::automaton::Automaton;
use super::context::{Role, Strength};
use super::state::State;
use crate::ocaml::tags::{Kind, TagSink};
use crate::ocaml::token::{Token, TokenKind};

impl<'src, S: TagSink> Automaton<'src, '_, S> {
    /// `let` inside an expression. Same decisions as a top level `let`, on soft frames.
    pub(super) fn local_let(&mut self, current: &Token<'src>, next: &Token<'src>) {
        match current.kind {
            TokenKind::ParenOpen | TokenKind::Rec => {}
            TokenKind::Operator => {
                self.add_local_tag(current, Kind::Function);
                self.push_soft(State::BodyEntry, Role::Function, Some(current.text));
                self.state = State::ParamList;
            }
            TokenKind::Ident | TokenKind::Literal => {
                let (kind, role) = if starts_parameters(next) {
                    (Kind::Function, Role::Function)
                } else {
                    (Kind::Variable, Role::Value)
                };
                if current.kind == TokenKind::Ident || current.text.starts_with('_') {
                    self.add_local_tag(current, kind);
                }
                self.push_soft(State::BodyEntry, role, Some(current.text));
                self.state = State::ParamList;
            }
            TokenKind::End => self.expression(current, next),
            _ => self.state = State::Expression,
        }
    }

    /// Parameters up to `=` or `->`.
    pub(super) fn param_list(&mut self, current: &Token<'src>, _next: &Token<'src>) {
        match current.kind {
            TokenKind::Arrow | TokenKind::Equals => self.state = State::BodyEntry,
            TokenKind::Ident => self.add_local_tag(current, Kind::Variable),
            TokenKind::Operator => match current.first_char() {
                // return type annotation
                Some(':') => {
                    self.skip_to(State::SkipOrFallback, TokenKind::Equals, State::BodyEntry)
                }
                Some('~') => {
                    self.special_param_seen = false;
                    self.state = State::LabeledParam;
                }
                Some('?') => {
                    self.special_param_seen = false;
                    self.state = State::OptionalParam;
                }
                _ => {}
            },
            _ => {}
        }
    }

    /// `~label`, `~label:pattern`, `~(label : t)`
    pub(super) fn labeled_param(&mut self, current: &Token<'src>, next: &Token<'src>) {
        match current.kind {
            TokenKind::Ident => {
                if !self.special_param_seen {
                    self.add_local_tag(current, Kind::Variable);
                    self.special_param_seen = true;
                }
            }
            TokenKind::ParenOpen => self.label_depth += 1,
            TokenKind::ParenClose => {
                self.label_depth -= 1;
                if self.label_depth == 0 {
                    self.state = State::ParamList;
                }
            }
            // `~label:pattern`, the pattern is not a parameter of its own
            TokenKind::Colon if self.label_depth == 0 && self.special_param_seen => {
                self.skip.come_after = State::ParamList;
                self.state = State::SkipOne;
            }
            TokenKind::Operator if current.first_char() == Some(':') => {
                self.skip.come_after = State::ParamList;
                self.state = State::SkipOne;
            }
            _ => {
                if self.label_depth == 0 && self.special_param_seen {
                    self.state = State::ParamList;
                    self.param_list(current, next);
                }
            }
        }
    }

    /// `?label`, `?(label = default)`
    pub(super) fn optional_param(&mut self, current: &Token<'src>, _next: &Token<'src>) {
        match current.kind {
            TokenKind::Ident => {
                if !self.special_param_seen {
                    self.add_local_tag(current, Kind::Variable);
                    self.special_param_seen = true;
                    if self.optional_depth == 0 {
                        self.state = State::ParamList;
                    }
                }
            }
            TokenKind::ParenOpen => self.optional_depth += 1,
            TokenKind::ParenClose => {
                self.optional_depth -= 1;
                if self.optional_depth == 0 {
                    self.state = State::ParamList;
                }
            }
            _ => {}
        }
    }

    /// Start of an expression, where local declarations and scope openers may appear.
    pub(super) fn body_entry(&mut self, current: &Token<'src>, next: &Token<'src>) {
        match current.kind {
            TokenKind::Value | TokenKind::Let => self.state = State::LocalLet,
            TokenKind::Val => self.state = State::ValSignature,
            // immediate object
            TokenKind::Object => {
                self.last_class.clear();
                self.push(Strength::Strong, Role::Class, State::Expression, None);
                self.strong_pop_pending = false;
                self.state = State::TopLevel;
            }
            TokenKind::For | TokenKind::While => {
                self.skip_to(State::SkipUntil, TokenKind::Do, State::BodyEntry)
            }
            TokenKind::Try => {
                self.state = State::BodyEntry;
                self.push_soft(State::MatchPattern, Role::Function, Some(current.text));
            }
            TokenKind::Function => {
                self.state = State::MatchPattern;
                self.push_soft(State::MatchPattern, Role::Match, None);
            }
            TokenKind::Fun => self.state = State::ParamList,
            // `and` right where an expression should start chains local bindings
            TokenKind::And => self.expression(current, next),
            _ => {
                self.state = State::Expression;
                self.expression(current, next);
            }
        }
    }

    /// Inside an expression: only tokens that open or close scopes matter.
    pub(super) fn expression(&mut self, current: &Token<'src>, next: &Token<'src>) {
        match current.kind {
            // back to the alternatives of the innermost match
            TokenKind::Pipe => self.jump_to_nearest_match(),
            TokenKind::ParenClose | TokenKind::BracketClose | TokenKind::BraceClose => {
                self.pop_soft()
            }
            // `end` closes too many things; a strong block frame gives it a target
            TokenKind::Begin => {
                self.push(Strength::Strong, Role::Block, State::Expression, None);
                self.state = State::BodyEntry;
            }
            // `let ... in`: the binding is over, its body follows
            TokenKind::In => {
                self.pop_to_nearest_named();
                self.push_empty(State::Expression);
                self.state = State::BodyEntry;
            }
            // a record may hold `with`, skip it whole
            TokenKind::BraceOpen => {
                self.skip_to(State::SkipBalanced, TokenKind::BraceClose, State::Expression);
                self.skip_balanced(current, next);
            }
            // `;;` ends everything up to the enclosing declaration
            TokenKind::Semicolon if next.kind == TokenKind::Semicolon => {
                self.pop_strong();
                self.state = State::TopLevel;
            }
            TokenKind::Semicolon | TokenKind::Operator => self.state = State::BodyEntry,
            TokenKind::ParenOpen | TokenKind::BracketOpen => {
                self.push_empty(State::Expression);
                self.state = State::BodyEntry;
            }
            TokenKind::And => {
                if self.state == State::BodyEntry {
                    self.pop_soft();
                    self.push_empty(State::Expression);
                    self.state = State::LocalLet;
                } else {
                    // only `let` chains with `and` inside expressions
                    self.pop_to_nearest_named();
                    self.state = if self.stack.is_empty() {
                        State::LetHeader
                    } else {
                        State::LocalLet
                    };
                }
            }
            TokenKind::Then | TokenKind::Else => {
                self.pop_soft();
                self.push_empty(State::Expression);
                self.state = State::BodyEntry;
            }
            TokenKind::If | TokenKind::Match => {
                self.push_empty(State::Expression);
                self.state = State::BodyEntry;
            }
            TokenKind::With => {
                self.pop_soft();
                self.state = State::MatchPattern;
                self.push_soft(State::MatchPattern, Role::Match, None);
            }
            TokenKind::Fun => self.state = State::ParamList,
            TokenKind::Function => self.body_entry(current, next),
            TokenKind::Done => {}
            _ => {
                self.strong_pop_pending = true;
                self.top_level(current, next);
            }
        }
    }

    /// Alternatives of a `match` or `function`; pattern variables are never tagged.
    pub(super) fn match_pattern(&mut self, current: &Token<'src>, next: &Token<'src>) {
        match current.kind {
            TokenKind::Arrow => {
                self.push_empty(State::MatchPattern);
                self.state = State::BodyEntry;
            }
            TokenKind::Value => {
                self.pop_to_nearest_named();
                self.expression(current, next);
            }
            TokenKind::And | TokenKind::End => self.expression(current, next),
            TokenKind::In => self.pop_to_nearest_named(),
            _ => {}
        }
    }
}

/// Whether the token after a bound name shows the binding takes parameters.
pub(super) fn starts_parameters(next: &Token<'_>) -> bool {
    match next.kind {
        TokenKind::Ident | TokenKind::ParenOpen => true,
        TokenKind::Operator => matches!(next.first_char(), Some('~' | '?')),
        _ => false,
    }
}
