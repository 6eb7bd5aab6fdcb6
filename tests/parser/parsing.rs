//! Tokenizer and alias expansion.

use delve_parser::stdlib::{DIRECTIONS, canonical_direction};
use delve_parser::{Alias, CommandParser, InputToken, InputTokenizer};
use proptest::prelude::*;

fn words(input: &str) -> Vec<String> {
    InputTokenizer::tokenize(input)
        .into_iter()
        .map(InputToken::into_string)
        .collect()
}

#[test]
fn punctuation_and_case_are_dropped() {
    assert_eq!(words("Attack the GOBLIN!"), vec!["attack", "the", "goblin"]);
    assert_eq!(words("  look,   around.  "), vec!["look", "around"]);
    assert_eq!(words("take steward's key"), vec!["take", "steward's", "key"]);
}

#[test]
fn quoted_phrases_stay_together() {
    let tokens = InputTokenizer::tokenize(r#"say "Hello There" twice"#);
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1], InputToken::Quoted("hello there".into()));
}

#[test]
fn every_direction_and_synonym_means_go() {
    let parser = CommandParser::with_directions();
    for dir in DIRECTIONS {
        for word in std::iter::once(&dir.name).chain(dir.synonyms) {
            let cmd = parser.parse(word).unwrap();
            assert_eq!(cmd.command, "go", "{word}");
            assert_eq!(cmd.args, vec![dir.name.to_string()], "{word}");
        }
        assert_eq!(canonical_direction(dir.synonyms[0]), dir.name);
    }
    assert_eq!(canonical_direction("sideways"), "sideways");
}

#[test]
fn aliases_expand_only_the_first_word_once() {
    let mut parser = CommandParser::with_directions();
    parser.add_alias("x", Alias::command("examine"));
    parser.add_alias("ex", Alias::command("x"));

    let cmd = parser.parse("X n").unwrap();
    assert_eq!(cmd.command, "examine");
    assert_eq!(cmd.args, vec!["n"]);
    assert_eq!(cmd.original, "X n");

    assert_eq!(parser.parse("ex lamp").unwrap().command, "x");
}

#[test]
fn targets_join_the_arguments() {
    let parser = CommandParser::new();
    let cmd = parser.parse("buy  Red   Potion").unwrap();
    assert_eq!(cmd.target, "red potion");
    assert_eq!(cmd.first_arg(), Some("red"));
    assert!(cmd.has_target());
    assert!(!parser.parse("inventory").unwrap().has_target());
}

proptest! {
    #[test]
    fn tokens_are_lowercase_and_non_empty(input in "[A-Za-z .,!?;]{0,40}") {
        for word in words(&input) {
            prop_assert!(!word.is_empty());
            prop_assert_eq!(word.clone(), word.to_lowercase());
            prop_assert!(!word.contains(['.', ',', '!', '?', ';', ' ']));
        }
    }

    #[test]
    fn parsing_never_panics(input in ".{0,60}") {
        let parser = CommandParser::with_directions();
        if let Some(cmd) = parser.parse(&input) {
            prop_assert!(!cmd.command.is_empty());
        }
    }
}
