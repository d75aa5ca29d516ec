use crate::{
    ast::{Expr, PrefixOperator},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::{
            core::{Parser, Precedence, parse_expression},
            statement::{parse_block, parse_function_literal},
        },
    },
};

/// Parses an identifier expression.
pub(crate) fn parse_identifier(p: &mut Parser<'_>) -> Option<Expr> {
    Some(Expr::Identifier { name: p.current.literal.clone(),
                            line: p.current.line, })
}

/// Parses a decimal integer literal into a 64-bit signed integer.
///
/// Overflow is a diagnostic, not a panic.
pub(crate) fn parse_integer_literal(p: &mut Parser<'_>) -> Option<Expr> {
    let line = p.current.line;
    match p.current.literal.parse::<i64>() {
        Ok(value) => Some(Expr::Integer { value, line }),
        Err(_) => {
            p.record_error(ParseError::InvalidIntegerLiteral { literal: p.current
                                                                         .literal
                                                                         .clone(),
                                                               line });
            None
        },
    }
}

/// Parses a string literal.
pub(crate) fn parse_string_literal(p: &mut Parser<'_>) -> Option<Expr> {
    Some(Expr::Str { value: p.current.literal.clone(),
                     line:  p.current.line, })
}

/// Parses `true` or `false`.
pub(crate) fn parse_boolean(p: &mut Parser<'_>) -> Option<Expr> {
    Some(Expr::Boolean { value: p.current_is(TokenKind::True),
                         line:  p.current.line, })
}

/// Parses a prefix operator application: `!x`, `-x`, `++x`, `--x`.
///
/// The operand binds at `Prefix` level, so `-a * b` groups as
/// `(-a) * b`.
pub(crate) fn parse_prefix_expression(p: &mut Parser<'_>) -> Option<Expr> {
    let line = p.current.line;
    let operator = match p.current.kind {
        TokenKind::Bang => PrefixOperator::Bang,
        TokenKind::Minus => PrefixOperator::Minus,
        TokenKind::Increment => PrefixOperator::Increment,
        _ => PrefixOperator::Decrement,
    };
    p.next_token();

    let right = parse_expression(p, Precedence::Prefix)?;
    Some(Expr::Prefix { operator,
                        right: Box::new(right),
                        line })
}

/// Parses a parenthesized expression.
pub(crate) fn parse_grouped_expression(p: &mut Parser<'_>) -> Option<Expr> {
    p.next_token();

    let expr = parse_expression(p, Precedence::Lowest)?;
    if !p.expect_peek(TokenKind::Rparen) {
        return None;
    }
    Some(expr)
}

/// Parses `if (cond) { ... }` with an optional `else { ... }`.
pub(crate) fn parse_if_expression(p: &mut Parser<'_>) -> Option<Expr> {
    let line = p.current.line;

    if !p.expect_peek(TokenKind::Lparen) {
        return None;
    }
    p.next_token();
    let condition = parse_expression(p, Precedence::Lowest)?;

    if !p.expect_peek(TokenKind::Rparen) {
        return None;
    }
    if !p.expect_peek(TokenKind::Lbrace) {
        return None;
    }
    let consequence = parse_block(p);

    let alternative = if p.peek_is(TokenKind::Else) {
        p.next_token();
        if !p.expect_peek(TokenKind::Lbrace) {
            return None;
        }
        Some(parse_block(p))
    } else {
        None
    };

    Some(Expr::If { condition: Box::new(condition),
                    consequence,
                    alternative,
                    line })
}

/// Parses `while (cond) { ... }`.
pub(crate) fn parse_while_expression(p: &mut Parser<'_>) -> Option<Expr> {
    let line = p.current.line;

    if !p.expect_peek(TokenKind::Lparen) {
        return None;
    }
    p.next_token();
    let condition = parse_expression(p, Precedence::Lowest)?;

    if !p.expect_peek(TokenKind::Rparen) {
        return None;
    }
    if !p.expect_peek(TokenKind::Lbrace) {
        return None;
    }
    let body = parse_block(p);

    Some(Expr::While { condition: Box::new(condition),
                       body,
                       line })
}

/// Parses `for (init; cond; update) { ... }`.
///
/// All three header slots are plain expressions; an assignment such as
/// `i = 0` is the usual initializer.
pub(crate) fn parse_for_expression(p: &mut Parser<'_>) -> Option<Expr> {
    let line = p.current.line;

    if !p.expect_peek(TokenKind::Lparen) {
        return None;
    }
    p.next_token();
    let init = parse_expression(p, Precedence::Lowest)?;

    if !p.expect_peek(TokenKind::Semicolon) {
        return None;
    }
    p.next_token();
    let condition = parse_expression(p, Precedence::Lowest)?;

    if !p.expect_peek(TokenKind::Semicolon) {
        return None;
    }
    p.next_token();
    let update = parse_expression(p, Precedence::Lowest)?;

    if !p.expect_peek(TokenKind::Rparen) {
        return None;
    }
    if !p.expect_peek(TokenKind::Lbrace) {
        return None;
    }
    let body = parse_block(p);

    Some(Expr::For { init: Box::new(init),
                     condition: Box::new(condition),
                     update: Box::new(update),
                     body,
                     line })
}

/// Parses an anonymous function literal: `fn(params) { body }`.
pub(crate) fn parse_function_literal_expression(p: &mut Parser<'_>) -> Option<Expr> {
    let line = p.current.line;
    parse_function_literal(p, line).map(Expr::Function)
}

/// Parses an array literal: `[e1, e2, ...]`.
pub(crate) fn parse_array_literal(p: &mut Parser<'_>) -> Option<Expr> {
    let line = p.current.line;
    let elements = parse_expression_list(p, TokenKind::Rbracket)?;
    Some(Expr::Array { elements, line })
}

/// Parses a hash literal: `{k1: v1, k2: v2, ...}`.
pub(crate) fn parse_hash_literal(p: &mut Parser<'_>) -> Option<Expr> {
    let line = p.current.line;
    let mut pairs = Vec::new();

    while !p.peek_is(TokenKind::Rbrace) {
        p.next_token();
        let key = parse_expression(p, Precedence::Lowest)?;

        if !p.expect_peek(TokenKind::Colon) {
            return None;
        }
        p.next_token();
        let value = parse_expression(p, Precedence::Lowest)?;

        pairs.push((key, value));

        if !p.peek_is(TokenKind::Rbrace) && !p.expect_peek(TokenKind::Comma) {
            return None;
        }
    }

    if !p.expect_peek(TokenKind::Rbrace) {
        return None;
    }
    Some(Expr::Hash { pairs, line })
}

/// Parses `new` followed by a constructor call.
///
/// The whole call is parsed, then desugared to a `New` node holding
/// only the callee; constructor arguments are not part of the language.
pub(crate) fn parse_new_expression(p: &mut Parser<'_>) -> Option<Expr> {
    let line = p.current.line;
    p.next_token();

    let expr = parse_expression(p, Precedence::Lowest)?;
    let Expr::Call { callee, .. } = expr else {
        p.record_error(ParseError::InvalidNewTarget { line });
        return None;
    };

    Some(Expr::New { class: callee,
                     line })
}

/// Parses a comma-separated expression list up to a closing delimiter.
///
/// Shared by array literals and call argument lists.
pub(crate) fn parse_expression_list(p: &mut Parser<'_>, end: TokenKind) -> Option<Vec<Expr>> {
    let mut list = Vec::new();

    if p.peek_is(end) {
        p.next_token();
        return Some(list);
    }

    p.next_token();
    list.push(parse_expression(p, Precedence::Lowest)?);

    while p.peek_is(TokenKind::Comma) {
        p.next_token();
        p.next_token();
        list.push(parse_expression(p, Precedence::Lowest)?);
    }

    if !p.expect_peek(end) {
        return None;
    }
    Some(list)
}
