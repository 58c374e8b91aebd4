use indoc::indoc;

use crate::ast::{Expr, ExprKind, Stmt};
use crate::parser::parse_program;

fn sexpr(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Str(s) => format!("{s:?}"),
        ExprKind::Int(n) => n.to_string(),
        ExprKind::Bool(b) => b.to_string(),
        ExprKind::Var(name) => name.clone(),
        ExprKind::Set(items) => {
            let items: Vec<String> = items.iter().map(sexpr).collect();
            format!("(set {})", items.join(" ")).replace("(set )", "(set)")
        }
        ExprKind::Binary { op, lhs, rhs } => {
            format!("({} {} {})", op.symbol(), sexpr(lhs), sexpr(rhs))
        }
        ExprKind::Call { builtin, args } => {
            let args: Vec<String> = args.iter().map(sexpr).collect();
            format!("({} {})", builtin.name(), args.join(" "))
        }
        ExprKind::Lambda(lambda) => format!("(lam {} {})", lambda.param, sexpr(&lambda.body)),
    }
}

fn dump(source: &str) -> String {
    let (program, diagnostics) = parse_program(source);
    assert!(!diagnostics.has_errors(), "{diagnostics}");
    program
        .stmts
        .iter()
        .map(|stmt| match stmt {
            Stmt::Bind { name, value, .. } => format!("(bind {name} {})", sexpr(value)),
            Stmt::Print { value, .. } => format!("(print {})", sexpr(value)),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn errors(source: &str) -> String {
    parse_program(source).1.to_string()
}

#[test]
fn precedence() {
    insta::assert_snapshot!(dump("print a || b && c == d;"), @"(print (|| a (&& b (== c d))))");
    insta::assert_snapshot!(dump("print a || b || c;"), @"(print (|| (|| a b) c))");
    insta::assert_snapshot!(dump("print (a || b) && c;"), @"(print (&& (|| a b) c))");
    insta::assert_snapshot!(dump("print x in s && t;"), @"(print (&& (in x s) t))");
}

#[test]
fn literals() {
    insta::assert_snapshot!(dump(r#"print {1, "a", true}; print {};"#), @r#"
    (print (set 1 "a" true))
    (print (set))
    "#);
}

#[test]
fn calls_and_lambdas() {
    let source = indoc! {r#"
        bind g = load("graph.txt");
        bind r = map(lam (x) -> { x in s }, getVertices(g));
        print setStart(g, {0});
    "#};
    insta::assert_snapshot!(dump(source), @r#"
    (bind g (load "graph.txt"))
    (bind r (map (lam x (in x s)) (getVertices g)))
    (print (setStart g (set 0)))
    "#);
}

#[test]
fn comments_are_ignored() {
    let source = indoc! {"
        // header
        bind x = 1; // trailing
        print x;
    "};
    insta::assert_snapshot!(dump(source), @r"
    (bind x 1)
    (print x)
    ");
}

#[test]
fn spans() {
    let (program, _) = parse_program("print a || b;");
    let Stmt::Print { value, span } = &program.stmts[0] else {
        panic!("expected print");
    };
    assert_eq!(format!("{span:?}"), "0..13");
    assert_eq!(format!("{:?}", value.span), "6..12");

    let (program, _) = parse_program("bind x = (1);");
    let Stmt::Bind {
        name_span, value, ..
    } = &program.stmts[0]
    else {
        panic!("expected bind");
    };
    assert_eq!(format!("{name_span:?}"), "5..6");
    assert_eq!(format!("{:?}", value.span), "9..12");
}

#[test]
fn missing_semicolon() {
    insta::assert_snapshot!(errors("print 1"), @"error at 7..7: expected token; expected `;`, found end of input");
}

#[test]
fn unknown_function() {
    insta::assert_snapshot!(errors("print foo(1);"), @"error at 6..9: unbound variable; no function named `foo`");
}

#[test]
fn wrong_arity() {
    insta::assert_snapshot!(errors("print getStart(a, b);"), @"error at 6..20: expected token; `getStart` takes 1 argument, found 2");
}

#[test]
fn unclosed_delimiters() {
    insta::assert_snapshot!(errors("print {1, 2;"), @"error at 11..12: missing closing `}` (related: opened here at 6..7)");
    insta::assert_snapshot!(errors("print (1;"), @"error at 8..9: missing closing `)` (related: opened here at 6..7)");
}

#[test]
fn invalid_characters() {
    insta::assert_snapshot!(errors("print 1 @ 2;"), @"error at 8..9: invalid characters");
}

#[test]
fn integer_out_of_range() {
    insta::assert_snapshot!(errors("print 99999999999999999999;"), @"error at 6..26: integer literal out of range");
}

#[test]
fn statement_must_start_with_keyword() {
    insta::assert_snapshot!(errors("x = 1;"), @"error at 0..1: unexpected token; expected `bind` or `print`, found identifier");
}

#[test]
fn recovers_at_next_statement() {
    let (program, diagnostics) = parse_program("print ); print 1; bind = 2; print 2;");
    insta::assert_snapshot!(diagnostics.to_string(), @r"
    error at 6..7: expected an expression; found `)`
    error at 23..24: expected an identifier; found `=`
    ");
    assert_eq!(program.stmts.len(), 2);
}

#[test]
fn nesting_limit() {
    let source = format!("print {}1{};", "(".repeat(300), ")".repeat(300));
    let (_, diagnostics) = parse_program(&source);
    assert!(diagnostics.has_errors());
    assert!(diagnostics.to_string().contains("expression nested too deeply"));
}
