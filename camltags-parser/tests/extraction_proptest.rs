//! Property-based tests for the extractor
//!
//! The extractor runs on whatever an editor hands it, so it must terminate without panicking
//! on any input, and it must not carry anything from one run into the next.

use camltags_parser::ocaml::lexing::tokenize;
use camltags_parser::ocaml::token::TokenKind;
use camltags_parser::ocaml::{extract_tags, ExtractOptions, Kind};
use proptest::prelude::*;

/// Fragments of OCaml, glued together in arbitrary order
fn fragment_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "let", "let rec", "and", "in", "=", "->", "|", ";", ";;", "(", ")", "[", "]", "{", "}",
        "begin", "end", "struct", "sig", "object", "module", "type", "class", "method", "val",
        "exception", "match", "with", "function", "fun", "if", "then", "else", "try", "of",
        "x", "f", "M", "Some", "'a", "~l", "?o", ":", ".", "1", "\"s\"", "(* c *)", "'\"'",
    ])
}

fn source_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment_strategy(), 0..60).prop_map(|parts| parts.join(" "))
}

fn lowercase_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}".prop_filter("keywords are not names", |name| {
        let tokens = tokenize(name);
        tokens.len() == 1 && tokens[0].kind == TokenKind::Ident
    })
}

proptest! {
    #[test]
    fn test_arbitrary_text_never_panics(source in "\\PC{0,200}") {
        let _ = extract_tags(&source, &ExtractOptions::default().with_local_info(true));
    }

    #[test]
    fn test_token_soup_never_panics(source in source_strategy()) {
        let options = ExtractOptions::default().with_local_info(true).with_max_depth(4);
        let _ = extract_tags(&source, &options);
    }

    #[test]
    fn test_runs_are_idempotent(source in source_strategy()) {
        let options = ExtractOptions::default().with_local_info(true);
        let first = extract_tags(&source, &options);
        let second = extract_tags(&source, &options);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_tags_point_at_their_names(source in source_strategy()) {
        let extraction = extract_tags(&source, &ExtractOptions::default());
        for tag in &extraction.tags {
            prop_assert!(tag.line >= 1);
            // `let ()` is named after the pair of tokens it spans
            if tag.name != "()" {
                prop_assert!(source[tag.byte_offset..].starts_with(tag.name.as_str()));
            }
        }
    }

    #[test]
    fn test_let_value_or_function(name in lowercase_name(), params in 0usize..3) {
        let args: Vec<String> = (0..params).map(|i| format!("a{}", i)).collect();
        let source = format!("let {} {} = 0", name, args.join(" "));
        let tags = extract_tags(&source, &ExtractOptions::default()).tags;

        prop_assert_eq!(tags.len(), 1);
        prop_assert_eq!(&tags[0].name, &name);
        let expected = if params == 0 { Kind::Variable } else { Kind::Function };
        prop_assert_eq!(tags[0].kind, expected);
    }
}
