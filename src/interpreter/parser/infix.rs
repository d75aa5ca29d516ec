use crate::{
    ast::{Expr, InfixOperator, PostfixOperator},
    interpreter::{
        lexer::TokenKind,
        parser::{
            core::{Parser, Precedence, parse_expression},
            prefix::parse_expression_list,
        },
    },
};

/// Maps a token onto its infix operator, if it is one.
#[must_use]
pub(crate) const fn token_to_infix_operator(kind: TokenKind) -> Option<InfixOperator> {
    match kind {
        TokenKind::Plus => Some(InfixOperator::Add),
        TokenKind::Minus => Some(InfixOperator::Sub),
        TokenKind::Asterisk => Some(InfixOperator::Mul),
        TokenKind::Slash => Some(InfixOperator::Div),
        TokenKind::Less => Some(InfixOperator::Less),
        TokenKind::Greater => Some(InfixOperator::Greater),
        TokenKind::Equal => Some(InfixOperator::Equal),
        TokenKind::NotEqual => Some(InfixOperator::NotEqual),
        _ => None,
    }
}

/// Parses a binary operator application.
///
/// The right side binds at the operator's own level (not one below), so
/// chains of one operator group to the left.
pub(crate) fn parse_infix_expression(p: &mut Parser<'_>, left: Expr) -> Option<Expr> {
    let line = p.current.line;
    let operator = token_to_infix_operator(p.current.kind)?;
    let precedence = p.current_precedence();
    p.next_token();

    let right = parse_expression(p, precedence)?;
    Some(Expr::Infix { left: Box::new(left),
                       operator,
                       right: Box::new(right),
                       line })
}

/// Parses a call expression: `left(arg1, arg2, ...)`.
pub(crate) fn parse_call_expression(p: &mut Parser<'_>, callee: Expr) -> Option<Expr> {
    let line = p.current.line;
    let arguments = parse_expression_list(p, TokenKind::Rparen)?;
    Some(Expr::Call { callee: Box::new(callee),
                      arguments,
                      line })
}

/// Parses an index expression: `left[index]`.
pub(crate) fn parse_index_expression(p: &mut Parser<'_>, left: Expr) -> Option<Expr> {
    let line = p.current.line;
    p.next_token();

    let index = parse_expression(p, Precedence::Lowest)?;
    if !p.expect_peek(TokenKind::Rbracket) {
        return None;
    }
    Some(Expr::Index { left: Box::new(left),
                       index: Box::new(index),
                       line })
}

/// Parses a member access or method call: `left.name` or
/// `left.name(args)`.
///
/// A call directly after the dot needs special handling: parsing the
/// member at `Call` level would stop in front of the `(`, since equal
/// binding powers do not extend.
pub(crate) fn parse_method_call_expression(p: &mut Parser<'_>, object: Expr) -> Option<Expr> {
    let line = p.current.line;
    p.next_token();

    let call = if p.current_is(TokenKind::Ident) && p.peek_is(TokenKind::Lparen) {
        let name = Expr::Identifier { name: p.current.literal.clone(),
                                      line: p.current.line, };
        p.next_token();
        parse_call_expression(p, name)?
    } else {
        parse_expression(p, Precedence::Call)?
    };

    Some(Expr::MethodCall { object: Box::new(object),
                            call: Box::new(call),
                            line })
}

/// Parses an assignment expression: `left = value`.
pub(crate) fn parse_assign_expression(p: &mut Parser<'_>, target: Expr) -> Option<Expr> {
    let line = p.current.line;
    p.next_token();

    let value = parse_expression(p, Precedence::Lowest)?;
    Some(Expr::Assign { target: Box::new(target),
                        value: Box::new(value),
                        line })
}

/// Parses a postfix operator application: `left++` or `left--`.
///
/// Nothing follows the operator, so no further tokens are consumed.
pub(crate) fn parse_postfix_expression(p: &mut Parser<'_>, left: Expr) -> Option<Expr> {
    let operator = if p.current_is(TokenKind::Increment) {
        PostfixOperator::Increment
    } else {
        PostfixOperator::Decrement
    };
    Some(Expr::Postfix { left: Box::new(left),
                         operator,
                         line: p.current.line, })
}
