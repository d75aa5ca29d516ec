use scripta::{
    ast::{Program, Statement},
    interpreter::{
        lexer::{Lexer, TokenKind},
        parser::Parser,
    },
};

fn parse_ok(source: &str) -> Program {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    assert!(parser.errors().is_empty(),
            "unexpected diagnostics for {source:?}: {:?}",
            parser.errors());
    program
}

fn parse_diagnostics(source: &str) -> Vec<String> {
    let mut parser = Parser::new(Lexer::new(source));
    parser.parse_program();
    let diagnostics: Vec<String> = parser.errors().iter().map(ToString::to_string).collect();
    assert!(!diagnostics.is_empty(), "expected diagnostics for {source:?}");
    diagnostics
}

#[test]
fn lexing_is_total() {
    let mut lexer = Lexer::new("let x = 5; @ ~ \"unterminated");
    let mut kinds = Vec::new();

    loop {
        let token = lexer.next_token();
        if token.kind == TokenKind::Eof {
            break;
        }
        kinds.push(token.kind);
        assert!(kinds.len() < 100, "lexer failed to terminate");
    }

    assert!(kinds.contains(&TokenKind::Illegal));
    assert!(kinds.contains(&TokenKind::Str));
    // EOF repeats forever once reached.
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn string_tokens_carry_the_interior_bytes() {
    let mut lexer = Lexer::new(r#""hello world""#);
    let token = lexer.next_token();
    assert_eq!(token.kind, TokenKind::Str);
    assert_eq!(token.literal, "hello world");

    let mut lexer = Lexer::new("\"open ended");
    let token = lexer.next_token();
    assert_eq!(token.kind, TokenKind::Str);
    assert_eq!(token.literal, "open ended");
}

#[test]
fn identifiers_reject_digits() {
    let mut lexer = Lexer::new("value1");
    let first = lexer.next_token();
    let second = lexer.next_token();

    assert_eq!((first.kind, first.literal.as_str()), (TokenKind::Ident, "value"));
    assert_eq!((second.kind, second.literal.as_str()), (TokenKind::Int, "1"));
}

#[test]
fn multi_byte_operators_lex_greedily() {
    let mut lexer = Lexer::new("== != ++ -- = ! + -");
    let kinds: Vec<TokenKind> = std::iter::from_fn(|| {
        let token = lexer.next_token();
        (token.kind != TokenKind::Eof).then_some(token.kind)
    }).collect();

    assert_eq!(kinds,
               [TokenKind::Equal,
                TokenKind::NotEqual,
                TokenKind::Increment,
                TokenKind::Decrement,
                TokenKind::Assign,
                TokenKind::Bang,
                TokenKind::Plus,
                TokenKind::Minus]);
}

#[test]
fn let_statements_bind_names() {
    let program = parse_ok("let x = 5; let y = 10; let foobar = 838383;");
    assert_eq!(program.statements.len(), 3);

    let names: Vec<&str> = program.statements
                                  .iter()
                                  .map(|statement| match statement {
                                      Statement::Let(binding) => binding.name.as_str(),
                                      other => panic!("expected let statement, got {other:?}"),
                                  })
                                  .collect();
    assert_eq!(names, ["x", "y", "foobar"]);
}

#[test]
fn return_statements_parse() {
    let program = parse_ok("return 5; return 10; return 993322;");
    assert_eq!(program.statements.len(), 3);
    for statement in &program.statements {
        assert!(matches!(statement, Statement::Return { .. }),
                "expected return statement, got {statement:?}");
    }
}

#[test]
fn function_statements_parse() {
    let program = parse_ok("function add(a, b) { a + b }");
    assert_eq!(program.statements.len(), 1);

    let Statement::Function(function) = &program.statements[0] else {
        panic!("expected function statement, got {:?}", program.statements[0]);
    };
    assert_eq!(function.name, "add");
    assert_eq!(function.function.parameters, ["a", "b"]);
}

#[test]
fn class_statements_split_members_and_methods() {
    let program = parse_ok(r#"class Dog { let name = "rex"; function bark() { name } }"#);
    assert_eq!(program.statements.len(), 1);

    let Statement::Class { name, class, .. } = &program.statements[0] else {
        panic!("expected class statement, got {:?}", program.statements[0]);
    };
    assert_eq!(name, "Dog");
    assert_eq!(class.members.len(), 1);
    assert_eq!(class.members[0].name, "name");
    assert!(class.methods.contains_key("bark"));
}

#[test]
fn operator_precedence_rendering() {
    let cases = [("-a * b", "((-a) * b)"),
                 ("!-a", "(!(-a))"),
                 ("a + b + c", "((a + b) + c)"),
                 ("a + b - c", "((a + b) - c)"),
                 ("a * b * c", "((a * b) * c)"),
                 ("a + b * c", "(a + (b * c))"),
                 ("3 + 4 * 5 == 3 * 1 + 4 * 5", "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))"),
                 ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
                 ("(5 + 5) * 2", "((5 + 5) * 2)"),
                 ("-(5 + 5)", "(-(5 + 5))"),
                 ("!(true == true)", "(!(true == true))"),
                 ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
                 ("add(a + b + c * d / f + g)", "add((((a + b) + ((c * d) / f)) + g))"),
                 ("a * [1, 2, 3, 4][b * c] * d", "((a * ([1, 2, 3, 4][(b * c)])) * d)"),
                 ("i++", "(i++)"),
                 ("x++ < 3", "((x++) < 3)"),
                 ("a = b", "a = b")];

    for (source, expected) in cases {
        assert_eq!(parse_ok(source).to_string(), expected, "source: {source}");
    }
}

#[test]
fn if_and_loop_rendering() {
    assert_eq!(parse_ok("if (x < y) { x }").to_string(), "if (x < y) x");
    assert_eq!(parse_ok("if (x < y) { x } else { y }").to_string(), "if (x < y) x else y");
    assert_eq!(parse_ok("while (x < y) { x++ }").to_string(), "while (x < y) (x++)");
    assert_eq!(parse_ok("for (i = 0; i < 3; i = i + 1) { i }").to_string(),
               "for (i = 0; (i < 3); i = (i + 1)) i");
}

#[test]
fn missing_identifier_in_let_is_reported() {
    let diagnostics = parse_diagnostics("let = 3");
    assert_eq!(diagnostics[0],
               "line 1: expected next token to be IDENT, got = instead");
}

#[test]
fn illegal_tokens_cannot_start_expressions() {
    let diagnostics = parse_diagnostics("@");
    assert_eq!(diagnostics[0], "line 1: no prefix parse function for ILLEGAL found");
}

#[test]
fn diagnostics_carry_line_numbers() {
    let diagnostics = parse_diagnostics("let a = 1;\nlet = 2;");
    assert_eq!(diagnostics[0],
               "line 2: expected next token to be IDENT, got = instead");
}

#[test]
fn oversized_integer_literals_are_reported() {
    let diagnostics = parse_diagnostics("99999999999999999999");
    assert_eq!(diagnostics[0],
               "line 1: could not parse 99999999999999999999 as integer");
}

#[test]
fn class_bodies_are_restricted() {
    let diagnostics = parse_diagnostics("class Dog { 5 }");
    assert_eq!(diagnostics[0],
               "line 1: class bodies may only contain let members and function methods");
}

#[test]
fn new_requires_a_constructor_call() {
    let diagnostics = parse_diagnostics("new 5");
    assert_eq!(diagnostics[0], "line 1: expected a constructor call after new");
}

#[test]
fn parsing_never_hangs_on_missing_semicolons() {
    // `return` recovery must stop at end of input.
    let program = parse_ok("return 5");
    assert_eq!(program.statements.len(), 1);
}

#[test]
fn a_lone_semicolon_is_an_empty_program() {
    let program = parse_ok(";");
    assert!(program.statements.is_empty());
}
