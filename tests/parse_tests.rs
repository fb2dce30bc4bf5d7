use std::collections::BTreeMap;
use std::io::Cursor;

use fcall::{
    parse, parse_reader, render_source, Expected, FcallError, ParseError, Parser, Position,
    Registry, Scanner, Substitute, TokenKind, Verbatim,
};

fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn parse_error(source: &str) -> ParseError {
    match parse(source) {
        Err(FcallError::Parse(e)) => e,
        Err(e) => panic!("unexpected error kind: {}", e),
        Ok(stmt) => panic!("expected parse error, got {:?}", stmt),
    }
}

#[test]
fn test_hello_world() {
    let source = "f('hello {{ .foo }}', {\n\t\tbar: 'foo',\n\t});";
    let stmt = parse(source).unwrap();
    assert_eq!(stmt.template, "'hello {{ .foo }}'");
    assert_eq!(stmt.vars, vars(&[("bar", "'foo'")]));
}

#[test]
fn test_trailing_comma_on_one_line() {
    let stmt = parse("f('hello {{ .foo }}', { bar: 'foo', });").unwrap();
    assert_eq!(stmt.template, "'hello {{ .foo }}'");
    assert_eq!(stmt.vars["bar"], "'foo'");
}

#[test]
fn test_empty_pairs() {
    let stmt = parse("f('x', {});").unwrap();
    assert!(stmt.vars.is_empty());
}

#[test]
fn test_numbers_no_trailing_comma() {
    let stmt = parse("f('x', { a: 1, b: 2 });").unwrap();
    assert_eq!(stmt.vars, vars(&[("a", "1"), ("b", "2")]));
}

#[test]
fn test_duplicate_key_last_wins() {
    let stmt = parse("f('x', { a: 'one', a: 'two' });").unwrap();
    assert_eq!(stmt.vars, vars(&[("a", "'two'")]));
}

#[test]
fn test_mixed_values_multiline() {
    let source = "f('{{ .greeting }}, {{ .name }} #{{ .id }}', {\n  greeting: 'hi',\n  name: 'it''s me',\n  id: 007,\n});\n";
    let stmt = parse(source).unwrap();
    assert_eq!(stmt.template, "'{{ .greeting }}, {{ .name }} #{{ .id }}'");
    assert_eq!(
        stmt.vars,
        vars(&[("greeting", "'hi'"), ("name", "'it''s me'"), ("id", "007")])
    );
}

#[test]
fn test_embedded_quote_in_template() {
    let stmt = parse("f('it''s', {});").unwrap();
    assert_eq!(stmt.template, "'it''s'");

    let tokens: Vec<_> = Scanner::new("'it''s'".chars()).collect();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Template);
    assert_eq!(tokens[0].literal, "'it''s'");
}

#[test]
fn test_reparse_is_stable() {
    let source = "f('x {{ .a }}', { a: 'one', b: 2 });";
    assert_eq!(parse(source).unwrap(), parse(source).unwrap());
}

#[test]
fn test_parse_reader() {
    let stmt = parse_reader(Cursor::new("f('x', { n: 10 });")).unwrap();
    assert_eq!(stmt.vars["n"], "10");
}

#[test]
fn test_error_at_every_grammar_position() {
    let cases: &[(&str, &str, Expected)] = &[
        ("x = 1", "x", Expected::Token(TokenKind::Function)),
        ("f{", "f", Expected::Token(TokenKind::Function)),
        ("f(x, {})", "x", Expected::Token(TokenKind::Template)),
        ("f('x';", "", Expected::Token(TokenKind::Comma)),
        ("f('x', [", "[", Expected::Token(TokenKind::OpenBrace)),
        ("f('x', { : 1 })", ":", Expected::Key),
        ("f('x', { a 1 })", "1", Expected::Token(TokenKind::Colon)),
        ("f('x', { a: ; })", ";", Expected::Value),
        ("f('x', { a: 1; })", ";", Expected::Token(TokenKind::CloseBrace)),
        ("f('x', { a: 1 }", "", Expected::Token(TokenKind::CloseBracket)),
    ];

    for (source, found, expected) in cases {
        let err = parse_error(source);
        assert_eq!(err.found(), *found, "found literal for {:?}", source);
        assert_eq!(err.expected(), *expected, "expected kind for {:?}", source);
    }
}

#[test]
fn test_error_message_names_literal_and_kind() {
    let err = parse_error("f('x', {\n  a: 1\n  b: 2\n});");
    assert_eq!(err.position(), Position { line: 3, column: 3 });
    assert_eq!(
        FcallError::Parse(err).to_string(),
        "Parse error: found \"b\", expected CLOSE_BRACE at line 3, column 3"
    );
}

#[test]
fn test_last_value_cannot_hold_quote_comma() {
    // A comma-less last value ending early on `',` is a known limit of the
    // quote-comma delimiter rule.
    let err = parse_error("f('x', { a: 'p', q' });");
    assert_eq!(err.found(), "' });");
    assert_eq!(err.expected(), Expected::Token(TokenKind::Colon));
}

#[test]
fn test_parser_over_custom_scanner() {
    let chars = "f('x', { k: 'v' })".chars().collect::<Vec<_>>().into_iter();
    let stmt = Parser::from_scanner(Scanner::new(chars)).parse().unwrap();
    assert_eq!(stmt.vars["k"], "'v'");
}

#[test]
fn test_render_substitute() {
    let out = render_source(
        "f('hello {{ .foo }}', { foo: 'bar' });",
        &Substitute::default(),
    )
    .unwrap();
    assert_eq!(out, "hello bar");
}

#[test]
fn test_render_strict_unknown_variable() {
    let result = render_source("f('hello {{ .foo }}', { bar: 'foo' });", &Substitute::strict());
    assert!(matches!(result, Err(FcallError::UnknownVariable(ref name)) if name == "foo"));
}

#[test]
fn test_render_through_registry() {
    let registry = Registry::with_builtins();
    let stmt = parse("f('n = {{ .n }}', { n: 3 });").unwrap();

    let substitute = registry.get("substitute").unwrap();
    assert_eq!(stmt.execute(substitute.as_ref()).unwrap(), "n = 3");

    let verbatim = registry.get("verbatim").unwrap();
    assert_eq!(stmt.execute(verbatim.as_ref()).unwrap(), "n = {{ .n }}");
    assert_eq!(stmt.execute(&Verbatim).unwrap(), "n = {{ .n }}");
}
