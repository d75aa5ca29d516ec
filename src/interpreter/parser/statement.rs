use crate::{
    ast::{Block, ClassLiteral, FunctionLiteral, LetBinding, NamedFunction, Statement},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{Parser, Precedence, parse_expression},
    },
};

/// Parses a single statement, dispatching on the current token.
///
/// `let`, `return`, `function` and `class` have dedicated forms; every
/// other token starts an expression statement. Returns `None` when the
/// statement is malformed; the diagnostics are already recorded.
pub(crate) fn parse_statement(p: &mut Parser<'_>) -> Option<Statement> {
    match p.current.kind {
        TokenKind::Let => parse_let_statement(p).map(Statement::Let),
        TokenKind::Return => parse_return_statement(p),
        TokenKind::FuncDecl => parse_function_statement(p).map(Statement::Function),
        TokenKind::Class => parse_class_statement(p),
        _ => parse_expression_statement(p),
    }
}

/// Parses `let <identifier> = <expression> ;?`.
pub(crate) fn parse_let_statement(p: &mut Parser<'_>) -> Option<LetBinding> {
    let line = p.current.line;

    if !p.expect_peek(TokenKind::Ident) {
        return None;
    }
    let name = p.current.literal.clone();

    if !p.expect_peek(TokenKind::Assign) {
        return None;
    }
    p.next_token();

    let value = parse_expression(p, Precedence::Lowest)?;

    if p.peek_is(TokenKind::Semicolon) {
        p.next_token();
    }
    Some(LetBinding { name, value, line })
}

/// Parses `return <expression>`, then skips ahead to the next `;`.
///
/// The skip stops at end of input as well, so a missing semicolon can
/// never hang the parser.
fn parse_return_statement(p: &mut Parser<'_>) -> Option<Statement> {
    let line = p.current.line;
    p.next_token();

    let value = parse_expression(p, Precedence::Lowest);

    while !p.current_is(TokenKind::Semicolon) && !p.current_is(TokenKind::Eof) {
        p.next_token();
    }

    value.map(|value| Statement::Return { value, line })
}

/// Parses `function <name>(params) { body } ;?`.
pub(crate) fn parse_function_statement(p: &mut Parser<'_>) -> Option<NamedFunction> {
    let line = p.current.line;

    if !p.expect_peek(TokenKind::Ident) {
        return None;
    }
    let name = p.current.literal.clone();

    let function = parse_function_literal(p, line)?;

    if p.peek_is(TokenKind::Semicolon) {
        p.next_token();
    }
    Some(NamedFunction { name, function, line })
}

/// Parses `class <name> { (letStmt | fnStmt)* } ;?`.
///
/// The class body is an ordinary block whose statements are then
/// restricted: `let` declarations become members, `function`
/// declarations become methods, and anything else fails the whole
/// statement.
fn parse_class_statement(p: &mut Parser<'_>) -> Option<Statement> {
    let line = p.current.line;

    if !p.expect_peek(TokenKind::Ident) {
        return None;
    }
    let name = p.current.literal.clone();

    let class = parse_class_literal(p, name.clone(), line)?;

    if p.peek_is(TokenKind::Semicolon) {
        p.next_token();
    }
    Some(Statement::Class { name, class, line })
}

/// Parses the `{ ... }` body of a class declaration.
fn parse_class_literal(p: &mut Parser<'_>, name: String, line: usize) -> Option<ClassLiteral> {
    if !p.expect_peek(TokenKind::Lbrace) {
        return None;
    }
    let block = parse_block(p);

    let mut class = ClassLiteral { name,
                                   members: Vec::new(),
                                   methods: std::collections::BTreeMap::new(),
                                   line };

    for statement in block.statements {
        match statement {
            Statement::Let(binding) => class.members.push(binding),
            Statement::Function(function) => {
                class.methods.insert(function.name.clone(), function);
            },
            _ => {
                p.record_error(ParseError::InvalidClassMember { line });
                return None;
            },
        }
    }
    Some(class)
}

/// Parses a bare expression in statement position.
fn parse_expression_statement(p: &mut Parser<'_>) -> Option<Statement> {
    let line = p.current.line;
    let expr = parse_expression(p, Precedence::Lowest)?;

    // The trailing semicolon is optional so the REPL stays pleasant.
    if p.peek_is(TokenKind::Semicolon) {
        p.next_token();
    }
    Some(Statement::Expression { expr, line })
}

/// Parses a `{ ... }` block.
///
/// The current token must be the opening brace. Statements that fail to
/// parse are dropped (their diagnostics are recorded); the loop also
/// stops at end of input, so an unterminated block yields a partial
/// result rather than an infinite loop.
pub(crate) fn parse_block(p: &mut Parser<'_>) -> Block {
    let line = p.current.line;
    let mut statements = Vec::new();

    p.next_token();
    while !p.current_is(TokenKind::Rbrace) && !p.current_is(TokenKind::Eof) {
        if let Some(statement) = parse_statement(p) {
            statements.push(statement);
        }
        p.next_token();
    }

    Block { statements, line }
}

/// Parses the parameter list and body of a function literal.
///
/// The current token is the one before `(`: either the `fn` keyword or
/// a declared function name.
pub(crate) fn parse_function_literal(p: &mut Parser<'_>, line: usize) -> Option<FunctionLiteral> {
    if !p.expect_peek(TokenKind::Lparen) {
        return None;
    }
    let parameters = parse_function_parameters(p)?;

    if !p.expect_peek(TokenKind::Lbrace) {
        return None;
    }
    let body = parse_block(p);

    Some(FunctionLiteral { parameters,
                           body,
                           line })
}

/// Parses a comma-separated parameter list up to the closing `)`.
fn parse_function_parameters(p: &mut Parser<'_>) -> Option<Vec<String>> {
    let mut parameters = Vec::new();

    if p.peek_is(TokenKind::Rparen) {
        p.next_token();
        return Some(parameters);
    }

    if !p.expect_peek(TokenKind::Ident) {
        return None;
    }
    parameters.push(p.current.literal.clone());

    while p.peek_is(TokenKind::Comma) {
        p.next_token();
        if !p.expect_peek(TokenKind::Ident) {
            return None;
        }
        parameters.push(p.current.literal.clone());
    }

    if !p.expect_peek(TokenKind::Rparen) {
        return None;
    }
    Some(parameters)
}
