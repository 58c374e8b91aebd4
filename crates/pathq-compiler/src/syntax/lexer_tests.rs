use rowan::TextSize;

use crate::syntax::{lex, text_size, token_text};

fn snapshot(input: &str) -> String {
    format_tokens(input, false)
}

fn snapshot_raw(input: &str) -> String {
    format_tokens(input, true)
}

fn format_tokens(input: &str, include_trivia: bool) -> String {
    let mut out = String::new();
    for token in lex(input) {
        if include_trivia || !token.kind.is_trivia() {
            out.push_str(&format!(
                "{:?} {:?}\n",
                token.kind,
                token_text(input, &token)
            ));
        }
    }
    out
}

#[test]
fn regex_operators() {
    insta::assert_snapshot!(snapshot("(a|b)* . c + $"), @r#"
    ParenOpen "("
    Word "a"
    Pipe "|"
    Word "b"
    ParenClose ")"
    Star "*"
    Dot "."
    Word "c"
    Plus "+"
    Epsilon "$"
    "#);
}

#[test]
fn epsilon_keyword_vs_word() {
    insta::assert_snapshot!(snapshot("epsilon epsilons"), @r#"
    Epsilon "epsilon"
    Word "epsilons"
    "#);
}

#[test]
fn grammar_line() {
    insta::assert_snapshot!(snapshot("S1 -> a S1 b | epsilon\n"), @r#"
    Word "S1"
    Arrow "->"
    Word "a"
    Word "S1"
    Word "b"
    Pipe "|"
    Epsilon "epsilon"
    Newline "\n"
    "#);
}

#[test]
fn trivia_is_kept_in_raw_stream() {
    insta::assert_snapshot!(snapshot_raw("a  # note\nb"), @r##"
    Word "a"
    Whitespace "  "
    Comment "# note"
    Newline "\n"
    Word "b"
    "##);
}

#[test]
fn garbage_is_coalesced() {
    insta::assert_snapshot!(snapshot("a ;;! b"), @r#"
    Word "a"
    Garbage ";;!"
    Word "b"
    "#);
}

#[test]
fn garbage_at_end() {
    insta::assert_snapshot!(snapshot("a ?"), @r#"
    Word "a"
    Garbage "?"
    "#);
}

#[test]
fn offsets_saturate_at_u32_max() {
    assert_eq!(text_size(7), TextSize::from(7));
    assert_eq!(text_size(u32::MAX as usize), TextSize::from(u32::MAX));
    assert_eq!(text_size(usize::MAX), TextSize::from(u32::MAX));
}
