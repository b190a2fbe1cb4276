//! Core lexemes recognized by the logos lexer
//!
//! This is the only place that looks at raw characters. Comments are swallowed by a callback
//! that understands nesting and embedded strings, string literals are consumed by a callback
//! that honors backslash escapes. Both tolerate running off the end of the input.

use crate::ocaml::lexing::literals::{comment_body_len, string_body_len};
use logos::{Lexer, Logos, Skip};

/// Raw lexical classes, before keyword resolution and operator classification.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\x0C]+")]
pub enum Lexeme {
    /// `(* ... *)`, never produced: the callback skips the whole comment
    #[token("(*", skip_comment)]
    Comment,

    #[token("\"", eat_string)]
    Str,

    #[regex(r#"'(?:[^'\\]|\\(?:[\\'"ntbr ]|[0-9][0-9][0-9]|x[0-9a-fA-F][0-9a-fA-F]|o[0-7][0-7][0-7]))'"#)]
    Char,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_']*")]
    Word,

    #[regex(r"[0-9]+")]
    Number,

    /// A maximal run of operator characters
    #[regex(r"[!$%&*+\-./:<=>?@^~|]+")]
    Operator,

    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token("'")]
    Prime,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("#")]
    Sharp,
    #[token("\\")]
    Backslash,
}

fn skip_comment(lex: &mut Lexer<'_, Lexeme>) -> Skip {
    let consumed = comment_body_len(lex.remainder().as_bytes());
    lex.bump(consumed);
    Skip
}

fn eat_string(lex: &mut Lexer<'_, Lexeme>) {
    let consumed = string_body_len(lex.remainder().as_bytes());
    lex.bump(consumed);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexemes(source: &str) -> Vec<Lexeme> {
        Lexeme::lexer(source).filter_map(Result::ok).collect()
    }

    #[test]
    fn test_words_and_numbers() {
        assert_eq!(
            lexemes("let x' = 42"),
            vec![
                Lexeme::Word,
                Lexeme::Word,
                Lexeme::Operator,
                Lexeme::Number
            ]
        );
    }

    #[test]
    fn test_comment_is_skipped() {
        assert_eq!(
            lexemes("a (* b (* c *) d *) e"),
            vec![Lexeme::Word, Lexeme::Word]
        );
    }

    #[test]
    fn test_string_spans_escaped_quote() {
        let mut lexer = Lexeme::lexer(r#""a\"b" c"#);
        assert_eq!(lexer.next(), Some(Ok(Lexeme::Str)));
        assert_eq!(lexer.slice(), r#""a\"b""#);
        assert_eq!(lexer.next(), Some(Ok(Lexeme::Word)));
    }

    #[test]
    fn test_char_literal_versus_type_variable() {
        assert_eq!(lexemes("'\"'"), vec![Lexeme::Char]);
        assert_eq!(lexemes("'a list"), vec![Lexeme::Prime, Lexeme::Word, Lexeme::Word]);
    }
}
