use crate::{
    ast::{Expr, Program},
    error::ParseError,
    interpreter::{
        lexer::{Lexer, Token, TokenKind},
        parser::{infix, prefix, statement::parse_statement},
    },
};

/// A prefix rule: parses an expression starting at the current token.
pub(crate) type PrefixFn = for<'src> fn(&mut Parser<'src>) -> Option<Expr>;
/// An infix rule: extends `left` with the operator at the current
/// token.
pub(crate) type InfixFn = for<'src> fn(&mut Parser<'src>, Expr) -> Option<Expr>;

/// Operator binding powers, lowest to highest.
///
/// `parse_expression` keeps extending the left expression while the
/// next token binds tighter than the level it was called with. Equal
/// levels stop, which makes the binary operators left-associative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// The entry level; binds nothing.
    Lowest,
    /// `=`
    Assign,
    /// `==` and `!=`
    Equals,
    /// `<` and `>`
    LessGreater,
    /// `+` and `-`
    Sum,
    /// `*` and `/`
    Product,
    /// Prefix `-x` and `!x`.
    Prefix,
    /// Calls and member access.
    Call,
    /// Index expressions.
    Index,
    /// Postfix `++` and `--`.
    Increment,
}

/// Returns the binding power of a token when found in infix position.
#[must_use]
pub(crate) const fn token_precedence(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Assign => Precedence::Assign,
        TokenKind::Equal | TokenKind::NotEqual => Precedence::Equals,
        TokenKind::Less | TokenKind::Greater => Precedence::LessGreater,
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Slash | TokenKind::Asterisk => Precedence::Product,
        TokenKind::Lparen | TokenKind::Dot => Precedence::Call,
        TokenKind::Lbracket => Precedence::Index,
        TokenKind::Increment | TokenKind::Decrement => Precedence::Increment,
        _ => Precedence::Lowest,
    }
}

/// Looks up the prefix rule registered for a token kind.
pub(crate) const fn prefix_parse_fn(kind: TokenKind) -> Option<PrefixFn> {
    match kind {
        TokenKind::Ident => Some(prefix::parse_identifier),
        TokenKind::Int => Some(prefix::parse_integer_literal),
        TokenKind::Str => Some(prefix::parse_string_literal),
        TokenKind::True | TokenKind::False => Some(prefix::parse_boolean),
        TokenKind::Bang | TokenKind::Minus | TokenKind::Increment | TokenKind::Decrement => {
            Some(prefix::parse_prefix_expression)
        },
        TokenKind::Lparen => Some(prefix::parse_grouped_expression),
        TokenKind::If => Some(prefix::parse_if_expression),
        TokenKind::While => Some(prefix::parse_while_expression),
        TokenKind::For => Some(prefix::parse_for_expression),
        TokenKind::Function => Some(prefix::parse_function_literal_expression),
        TokenKind::Lbracket => Some(prefix::parse_array_literal),
        TokenKind::Lbrace => Some(prefix::parse_hash_literal),
        TokenKind::New => Some(prefix::parse_new_expression),
        _ => None,
    }
}

/// Looks up the infix rule registered for a token kind.
pub(crate) const fn infix_parse_fn(kind: TokenKind) -> Option<InfixFn> {
    match kind {
        TokenKind::Plus
        | TokenKind::Minus
        | TokenKind::Slash
        | TokenKind::Asterisk
        | TokenKind::Equal
        | TokenKind::NotEqual
        | TokenKind::Less
        | TokenKind::Greater => Some(infix::parse_infix_expression),
        TokenKind::Lparen => Some(infix::parse_call_expression),
        TokenKind::Lbracket => Some(infix::parse_index_expression),
        TokenKind::Dot => Some(infix::parse_method_call_expression),
        TokenKind::Assign => Some(infix::parse_assign_expression),
        TokenKind::Increment | TokenKind::Decrement => Some(infix::parse_postfix_expression),
        _ => None,
    }
}

/// A Pratt parser over a two-token lookahead window.
///
/// The parser pulls tokens from the lexer on demand and dispatches on
/// the current token: statements through `parse_statement`, expressions
/// through the prefix/infix rule tables. It never fails hard: every
/// problem is recorded as a diagnostic and parsing continues with a
/// partial result.
///
/// # Example
/// ```
/// use scripta::interpreter::{lexer::Lexer, parser::Parser};
///
/// let mut parser = Parser::new(Lexer::new("1 + 2 * 3"));
/// let program = parser.parse_program();
///
/// assert!(parser.errors().is_empty());
/// assert_eq!(program.to_string(), "(1 + (2 * 3))");
/// ```
pub struct Parser<'src> {
    lexer:              Lexer<'src>,
    /// The token under consideration.
    pub(crate) current: Token,
    /// One token of lookahead.
    pub(crate) peek:    Token,
    errors:             Vec<ParseError>,
}

impl<'src> Parser<'src> {
    /// Creates a parser and primes the two-token window.
    #[must_use]
    pub fn new(mut lexer: Lexer<'src>) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self { lexer,
               current,
               peek,
               errors: Vec::new() }
    }

    /// Parses the whole input into a program.
    ///
    /// Statements that fail to parse are dropped after recording their
    /// diagnostics; the loop always advances, so parsing terminates on
    /// every input.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        // A lone `;` is tolerated as an empty program.
        if self.current_is(TokenKind::Semicolon) && self.peek_is(TokenKind::Eof) {
            return program;
        }

        while !self.current_is(TokenKind::Eof) {
            if let Some(statement) = parse_statement(self) {
                program.statements.push(statement);
            }
            self.next_token();
        }
        program
    }

    /// Returns the diagnostics recorded so far.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Consumes the parser, returning all recorded diagnostics.
    #[must_use]
    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    /// Advances the window by one token.
    pub(crate) fn next_token(&mut self) {
        self.current = std::mem::replace(&mut self.peek, self.lexer.next_token());
    }

    /// Reports whether the current token has the given kind.
    pub(crate) fn current_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Reports whether the peek token has the given kind.
    pub(crate) fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Advances if the peek token matches, otherwise records a
    /// diagnostic.
    ///
    /// This is the parser's assertion primitive: the grammar requires
    /// `kind` next, and a mismatch is the caller's cue to abandon the
    /// current construct.
    pub(crate) fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_is(kind) {
            self.next_token();
            true
        } else {
            self.errors.push(ParseError::UnexpectedToken { expected: kind,
                                                           found:    self.peek.kind,
                                                           line:     self.peek.line, });
            false
        }
    }

    /// Returns the binding power of the peek token.
    pub(crate) fn peek_precedence(&self) -> Precedence {
        token_precedence(self.peek.kind)
    }

    /// Returns the binding power of the current token.
    pub(crate) fn current_precedence(&self) -> Precedence {
        token_precedence(self.current.kind)
    }

    /// Records a diagnostic for a token that cannot start an
    /// expression.
    pub(crate) fn no_prefix_rule_error(&mut self) {
        self.errors.push(ParseError::NoPrefixRule { kind: self.current.kind,
                                                    line: self.current.line, });
    }

    /// Records an arbitrary diagnostic.
    pub(crate) fn record_error(&mut self, error: ParseError) {
        self.errors.push(error);
    }
}

/// Parses one expression at the given minimum binding power.
///
/// The engine of the Pratt parser: the current token's prefix rule
/// produces the initial left expression, then infix rules fold in
/// operators for as long as the peek token binds tighter than
/// `min_precedence` and is not a `;`.
pub(crate) fn parse_expression(p: &mut Parser<'_>, min_precedence: Precedence) -> Option<Expr> {
    let Some(prefix) = prefix_parse_fn(p.current.kind) else {
        p.no_prefix_rule_error();
        return None;
    };
    let mut left = prefix(p)?;

    while !p.peek_is(TokenKind::Semicolon) && min_precedence < p.peek_precedence() {
        let Some(infix) = infix_parse_fn(p.peek.kind) else {
            return Some(left);
        };
        p.next_token();
        left = infix(p, left)?;
    }

    Some(left)
}
