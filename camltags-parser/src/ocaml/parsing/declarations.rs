//! Declaration productions
//!
//! The top level and everything that introduces a named declaration outside of expressions:
//! `let`, `type` with its constructors and record fields, `exception`, `val`, `module`,
//! `class` and `method`.

use super::automaton::Automaton;
use super::context::Role;
use super::expressions::starts_parameters;
use super::state::State;
use crate::ocaml::tags::{Kind, TagSink};
use crate::ocaml::token::{Token, TokenKind};

impl<'src, S: TagSink> Automaton<'src, '_, S> {
    /// Module or file level. Also the fallback of most other productions, so it only changes
    /// the state for the keywords it knows.
    pub(super) fn top_level(&mut self, current: &Token<'src>, next: &Token<'src>) {
        match current.kind {
            TokenKind::And => {
                self.cleanup_previous();
                // module M = struct ... end and N = ...
                self.state = self.chained;
            }
            TokenKind::Type => {
                self.cleanup_previous();
                self.state = State::TypeHeader;
                self.chained = State::TypeHeader;
            }
            TokenKind::Class => {
                self.cleanup_previous();
                self.state = State::ClassHeader;
                self.chained = State::ClassHeader;
            }
            TokenKind::Module => {
                self.cleanup_previous();
                self.state = State::ModuleHeader;
                self.chained = State::ModuleHeader;
            }
            TokenKind::End => {
                let popped = self.kill_current_state();

                // module M : sig ... end = struct ... end
                // module M = struct ... end and N = struct ... end
                if popped == Some(Role::Module) {
                    if next.kind == TokenKind::Equals {
                        self.chained = State::ModuleHeader;
                        self.state = State::ModuleBody;
                    } else if next.kind == TokenKind::And {
                        self.state = State::ModuleHeader;
                    }
                }
                self.strong_pop_pending = false;
            }
            TokenKind::Method => {
                self.cleanup_previous();
                self.state = State::MethodHeader;
            }
            TokenKind::Val => self.state = State::ValSignature,
            TokenKind::Let => {
                self.cleanup_previous();
                self.state = State::LetHeader;
                self.chained = State::LetHeader;
            }
            TokenKind::Exception => {
                self.cleanup_previous();
                self.state = State::ExceptionDecl;
                self.chained = State::TopLevel;
            }
            // `#` directives and anything else
            _ => {}
        }
    }

    /// `let` at the top level: decides between a function and a value from the lookahead.
    pub(super) fn let_header(&mut self, current: &Token<'src>, next: &Token<'src>) {
        match current.kind {
            // `let (x : t) = ...`, but `let () = ...` names a function `()`
            TokenKind::ParenOpen => {
                if next.kind == TokenKind::ParenClose {
                    self.add_named_tag("()", current, Kind::Function);
                    self.push_strong(Role::Function, Some("()"));
                    self.strong_pop_pending = true;
                    self.state = State::ParamList;
                }
            }
            TokenKind::Mutable | TokenKind::Virtual | TokenKind::Rec => {}
            // an operator definition is a function
            TokenKind::Operator => {
                self.add_tag(current, Kind::Function);
                self.push_strong(Role::Function, Some(current.text));
                self.state = State::ParamList;
            }
            // `let _ = ...` declares a function named `_`
            TokenKind::Literal => {
                if current.text.starts_with('_') {
                    self.add_tag(current, Kind::Function);
                }
                self.push_strong(Role::Function, Some(current.text));
                self.strong_pop_pending = true;
                self.state = State::ParamList;
            }
            TokenKind::Ident => {
                if starts_parameters(next) {
                    self.add_tag(current, Kind::Function);
                    self.push_strong(Role::Function, Some(current.text));
                } else {
                    self.add_tag(current, Kind::Variable);
                    self.push_strong(Role::Value, Some(current.text));
                }
                self.strong_pop_pending = true;
                self.state = State::ParamList;
            }
            TokenKind::End => self.top_level(current, next),
            _ => self.state = State::TopLevel,
        }
    }

    /// `type 'a t`, `type ('a, 'b) t`, up to the type name.
    pub(super) fn type_header(&mut self, current: &Token<'src>, next: &Token<'src>) {
        match current.kind {
            TokenKind::Prime => {
                self.skip.come_after = State::TypeHeader;
                self.state = State::SkipOne;
            }
            TokenKind::ParenOpen => {
                self.skip_to(State::SkipUntil, TokenKind::ParenClose, State::TypeHeader)
            }
            TokenKind::Rec => {}
            TokenKind::Ident => {
                self.add_tag(current, Kind::Type);
                if next.kind == TokenKind::Equals {
                    self.push_strong(Role::Type, Some(current.text));
                    self.strong_pop_pending = true;
                    self.state = State::TypeBody;
                } else {
                    // abstract type, as in a signature
                    self.state = State::TopLevel;
                }
            }
            _ => self.top_level(current, next),
        }
    }

    /// Right hand side of `type t = ...`: variants, records or an alias.
    pub(super) fn type_body(&mut self, current: &Token<'src>, _next: &Token<'src>) {
        match current.kind {
            TokenKind::Ident => {
                if current.is_capitalized() {
                    // may still turn out to be the module of `M.t`
                    self.stage_constructor(current);
                    self.state = State::ConstructorValidation;
                } else {
                    self.skip_to(State::SkipOrFallback, TokenKind::Pipe, State::TypeBody);
                }
            }
            TokenKind::And => self.state = State::TypeHeader,
            TokenKind::Val => self.state = State::ValSignature,
            TokenKind::BraceOpen => self.state = State::RecordBody,
            // revised syntax brackets and leading bars
            TokenKind::BracketOpen | TokenKind::BracketClose | TokenKind::Pipe => {}
            _ => {}
        }
    }

    /// Token after a capitalized name in a type body.
    pub(super) fn constructor_validation(&mut self, current: &Token<'src>, next: &Token<'src>) {
        match current.kind {
            // `M.t`: a type path, not a constructor
            TokenKind::Operator => {
                self.staged = None;
                self.state = State::TopLevel;
                self.pop_strong();
                self.strong_pop_pending = false;
            }
            TokenKind::Of => {
                self.emit_staged();
                self.skip_to(State::SkipOrFallback, TokenKind::Pipe, State::TypeBody);
            }
            TokenKind::Pipe => {
                self.emit_staged();
                self.state = State::TypeBody;
            }
            // the type may be over; a later `|` still resumes its body
            _ => {
                self.emit_staged();
                self.pop_strong();
                self.strong_pop_pending = false;
                self.skip_to(State::SkipOrFallback, TokenKind::Pipe, State::TypeBody);
                self.top_level(current, next);
            }
        }
    }

    /// `{ a : t; mutable b : u }`
    pub(super) fn record_body(&mut self, current: &Token<'src>, _next: &Token<'src>) {
        match current.kind {
            TokenKind::Ident => {
                self.add_tag(current, Kind::RecordField);
                self.skip_to_or_terminate(
                    TokenKind::Semicolon,
                    TokenKind::BraceClose,
                    State::RecordBody,
                );
            }
            TokenKind::Mutable => {}
            TokenKind::BraceClose => {
                self.pop_strong();
                // the enclosing module stays open
                self.strong_pop_pending = false;
                self.state = State::TopLevel;
            }
            _ => {}
        }
    }

    pub(super) fn exception_decl(&mut self, current: &Token<'src>, next: &Token<'src>) {
        if current.kind == TokenKind::Ident {
            self.add_tag(current, Kind::Exception);
        } else {
            self.top_level(current, next);
        }
        self.state = State::TopLevel;
    }

    /// `val name : type` in signatures.
    pub(super) fn val_signature(&mut self, current: &Token<'src>, _next: &Token<'src>) {
        match current.kind {
            TokenKind::ParenOpen | TokenKind::Rec => {}
            TokenKind::Ident | TokenKind::Operator => {
                self.add_tag(current, Kind::ValueSignature);
                self.state = State::TopLevel;
            }
            _ => self.state = State::TopLevel,
        }
    }

    /// `module M`, `module rec M`, `module type S`, up to the name.
    pub(super) fn module_header(&mut self, current: &Token<'src>, next: &Token<'src>) {
        match current.kind {
            TokenKind::Rec | TokenKind::Type => {}
            TokenKind::Ident => {
                self.add_tag(current, Kind::Module);
                self.last_module.clear();
                self.last_module.push_str(current.text);
                if matches!(next.kind, TokenKind::Colon | TokenKind::Equals) {
                    self.state = State::ModuleBody;
                } else {
                    // functor parameters, or `module M : S = ...`
                    self.skip_to(State::SkipBalanced, TokenKind::Equals, State::ModuleBody);
                }
            }
            _ => {}
        }
    }

    /// After the module name: `struct`, `sig`, `functor (X : S) ->` or an alias.
    pub(super) fn module_body(&mut self, current: &Token<'src>, next: &Token<'src>) {
        match current.kind {
            TokenKind::Functor => {
                self.skip_to(State::SkipBalanced, TokenKind::Arrow, State::ModuleBody)
            }
            TokenKind::Struct | TokenKind::Sig => {
                let name = std::mem::take(&mut self.last_module);
                self.push_strong(Role::Module, Some(&name));
                self.last_module = name;
                self.state = State::TopLevel;
                self.strong_pop_pending = false;
            }
            TokenKind::ParenOpen => {
                self.skip_to(State::SkipBalanced, TokenKind::ParenClose, State::TopLevel);
                self.skip_balanced(current, next);
            }
            TokenKind::Colon | TokenKind::Equals => {}
            _ => {
                self.last_module.clear();
                self.state = State::TopLevel;
            }
        }
    }

    /// `class name`, `class virtual ['a] name`, up to `=`.
    pub(super) fn class_header(&mut self, current: &Token<'src>, _next: &Token<'src>) {
        match current.kind {
            TokenKind::Ident => {
                self.add_tag(current, Kind::Class);
                self.last_class.clear();
                self.last_class.push_str(current.text);
                self.skip_to(State::SkipBalanced, TokenKind::Equals, State::ClassBody);
            }
            TokenKind::BracketOpen => {
                self.skip_to(State::SkipUntil, TokenKind::BracketClose, State::ClassHeader)
            }
            _ => {}
        }
    }

    /// `object` opens the class scope; anything else was a class type alias.
    pub(super) fn class_body(&mut self, current: &Token<'src>, _next: &Token<'src>) {
        if current.kind == TokenKind::Object {
            let name = std::mem::take(&mut self.last_class);
            self.push_strong(Role::Class, Some(&name));
            self.last_class = name;
        } else {
            self.last_class.clear();
        }
        self.state = State::TopLevel;
    }

    pub(super) fn method_header(&mut self, current: &Token<'src>, next: &Token<'src>) {
        match current.kind {
            TokenKind::ParenOpen
            | TokenKind::Mutable
            | TokenKind::Virtual
            | TokenKind::Private
            | TokenKind::Rec => {}
            TokenKind::Ident => {
                self.add_tag(current, Kind::Method);
                self.push_strong(Role::Method, Some(current.text));
                self.state = State::ParamList;
            }
            TokenKind::End => self.expression(current, next),
            _ => self.state = State::TopLevel,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ocaml::parsing::{extract_tags, ExtractOptions};
    use crate::ocaml::tags::{Kind, Tag};

    fn tags(source: &str) -> Vec<Tag> {
        extract_tags(source, &ExtractOptions::default()).tags
    }

    fn summary(tags: &[Tag]) -> Vec<(char, String)> {
        tags.iter()
            .map(|tag| (tag.kind.letter(), tag.qualified_name()))
            .collect()
    }

    fn expect(source: &str, expected: &[(char, &str)]) {
        let expected: Vec<(char, String)> = expected
            .iter()
            .map(|(letter, name)| (*letter, name.to_string()))
            .collect();
        assert_eq!(summary(&tags(source)), expected, "source: {}", source);
    }

    #[test]
    fn test_let_function_or_value() {
        expect("let f x = x", &[('f', "f")]);
        expect("let f (x, y) = x", &[('f', "f")]);
        expect("let v = 42", &[('v', "v")]);
        expect("let rec loop n = loop n", &[('f', "loop")]);
    }

    #[test]
    fn test_let_unit_and_wildcard() {
        expect("let () = print_endline \"hi\"", &[('f', "()")]);
        expect("let _ = run ()", &[('f', "_")]);
    }

    #[test]
    fn test_wildcard_binding_scopes_what_follows() {
        let options = ExtractOptions::default().with_local_info(true);
        let tags = extract_tags("let _ = let x = 1 in x
let y = 2", &options).tags;
        assert_eq!(
            summary(&tags),
            vec![
                ('f', "_".to_string()),
                ('v', "_/x".to_string()),
                ('v', "y".to_string())
            ]
        );
    }

    #[test]
    fn test_let_operator() {
        expect("let ( +! ) a b = a + b", &[('f', "+!")]);
    }

    #[test]
    fn test_let_chain_with_and() {
        expect("let a = 1 and b = 2", &[('v', "a"), ('v', "b")]);
        expect(
            "let rec even n = odd n and odd n = even n",
            &[('f', "even"), ('f', "odd")],
        );
    }

    #[test]
    fn test_type_constructors() {
        expect(
            "type t = A | B of int | C",
            &[('t', "t"), ('C', "t.A"), ('C', "t.B"), ('C', "t.C")],
        );
        expect(
            "type 'a option = None | Some of 'a",
            &[('t', "option"), ('C', "option.None"), ('C', "option.Some")],
        );
    }

    #[test]
    fn test_attribute_between_constructors() {
        let tags = tags("type t = Leaf [@attr] | Node of int\nlet x = 1");
        assert_eq!(
            summary(&tags),
            vec![
                ('t', "t".to_string()),
                ('C', "t.Leaf".to_string()),
                ('C', "Node".to_string()),
                ('v', "x".to_string())
            ]
        );
    }

    #[test]
    fn test_type_alias_to_module_path() {
        expect("type t = Foo.bar", &[('t', "t")]);
    }

    #[test]
    fn test_type_record_fields() {
        expect(
            "type r = { a : int; mutable b : string }",
            &[('t', "r"), ('r', "r.a"), ('r', "r.b")],
        );
    }

    #[test]
    fn test_type_chain_with_and() {
        expect(
            "type a = X and b = Y",
            &[('t', "a"), ('C', "a.X"), ('t', "b"), ('C', "b.Y")],
        );
    }

    #[test]
    fn test_abstract_type() {
        expect("type t\nlet x = 1", &[('t', "t"), ('v', "x")]);
    }

    #[test]
    fn test_exception() {
        expect("exception Not_found", &[('e', "Not_found")]);
        expect(
            "exception Error of string\nlet x = 1",
            &[('e', "Error"), ('v', "x")],
        );
    }

    #[test]
    fn test_module_struct() {
        expect("module M = struct let f x = x end", &[('M', "M"), ('f', "M/f")]);
    }

    #[test]
    fn test_module_signature_then_struct() {
        expect(
            "module M : sig val f : int -> int end = struct let f x = x end",
            &[('M', "M"), ('p', "M/f"), ('f', "M/f")],
        );
    }

    #[test]
    fn test_module_chain_with_and() {
        expect(
            "module rec A = struct let a = 1 end and B = struct let b = 2 end",
            &[('M', "A"), ('v', "A/a"), ('M', "B"), ('v', "B/b")],
        );
    }

    #[test]
    fn test_functor() {
        expect(
            "module F (X : S) = struct let g = X.x end",
            &[('M', "F"), ('v', "F/g")],
        );
        expect(
            "module F = functor (X : S) -> struct let g = 1 end",
            &[('M', "F"), ('v', "F/g")],
        );
    }

    #[test]
    fn test_nested_modules() {
        expect(
            "module A = struct module B = struct let x = 1 end let y = 2 end",
            &[('M', "A"), ('M', "A/B"), ('v', "A/B/x"), ('v', "A/y")],
        );
    }

    #[test]
    fn test_class_and_methods() {
        expect(
            "class c = object method m x = x end",
            &[('c', "c"), ('m', "c#m")],
        );
        expect(
            "class virtual ['a] stack = object method private virtual pop : 'a end",
            &[('c', "stack"), ('m', "stack#pop")],
        );
    }

    #[test]
    fn test_class_type_alias_opens_no_scope() {
        expect("class c = d\nlet x = 1", &[('c', "c"), ('v', "x")]);
    }

    #[test]
    fn test_val_signatures() {
        expect(
            "module type S = sig val length : t -> int val ( + ) : t -> t -> t end",
            &[('M', "S"), ('p', "S/length"), ('p', "S/+")],
        );
    }

    #[test]
    fn test_disabled_kind_keeps_scope() {
        let mut options = ExtractOptions::default();
        options.kinds.disable(Kind::Module);
        let tags = extract_tags("module M = struct let f x = x end", &options).tags;
        assert_eq!(summary(&tags), vec![('f', "M/f".to_string())]);
    }

    #[test]
    fn test_disabled_constructors_are_never_staged() {
        let mut options = ExtractOptions::default();
        options.kinds.disable(Kind::Constructor);
        let tags = extract_tags("type t = A | B", &options).tags;
        assert_eq!(summary(&tags), vec![('t', "t".to_string())]);
    }
}
