use std::fmt;

use logos::Logos;

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for diagnostics. Incremented as
/// newlines are consumed, including newlines inside string literals.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Raw token produced by the logos scanner.
///
/// This is the machine-generated layer only: whitespace is skipped,
/// newlines update the line counter, and every other rule maps onto one
/// variant. [`Lexer::next_token`] converts raw tokens into the
/// parser-facing [`Token`], which additionally knows about `ILLEGAL`
/// and `EOF`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(extras = LexerExtras)]
#[logos(skip r"[ \t\r]+")]
enum RawToken {
    /// Newlines are skipped like other whitespace but counted.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    Newline,

    /// Identifier tokens; names such as `x` or `counter`. Digits are
    /// not part of identifiers in this language.
    #[regex(r"[A-Za-z_][A-Za-z_]*")]
    Ident,
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+")]
    Int,
    /// String literal tokens. The closing quote may be missing at end
    /// of input; the interior bytes still form the literal.
    #[regex(r#""[^"]*"?"#)]
    Str,

    /// `=`
    #[token("=")]
    Assign,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `!`
    #[token("!")]
    Bang,
    /// `*`
    #[token("*")]
    Asterisk,
    /// `/`
    #[token("/")]
    Slash,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `==`
    #[token("==")]
    Equal,
    /// `!=`
    #[token("!=")]
    NotEqual,
    /// `++`
    #[token("++")]
    Increment,
    /// `--`
    #[token("--")]
    Decrement,

    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `:`
    #[token(":")]
    Colon,
    /// `.`
    #[token(".")]
    Dot,
    /// `(`
    #[token("(")]
    Lparen,
    /// `)`
    #[token(")")]
    Rparen,
    /// `{`
    #[token("{")]
    Lbrace,
    /// `}`
    #[token("}")]
    Rbrace,
    /// `[`
    #[token("[")]
    Lbracket,
    /// `]`
    #[token("]")]
    Rbracket,

    /// `fn`, beginning an anonymous function literal.
    #[token("fn")]
    Function,
    /// `function`, beginning a named function statement.
    #[token("function")]
    FuncDecl,
    /// `while`
    #[token("while")]
    While,
    /// `let`
    #[token("let")]
    Let,
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `return`
    #[token("return")]
    Return,
    /// `class`
    #[token("class")]
    Class,
    /// `new`
    #[token("new")]
    New,
    /// `for`
    #[token("for")]
    For,
}

/// The closed set of token kinds understood by the parser.
///
/// Beyond the raw scanner's vocabulary this includes `Illegal` for
/// bytes no rule matches and `Eof` for the end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A byte sequence no lexer rule matches.
    Illegal,
    /// End of input. Produced indefinitely once the source is consumed.
    Eof,

    /// An identifier.
    Ident,
    /// An integer literal.
    Int,
    /// A string literal.
    Str,

    /// `=`
    Assign,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `!`
    Bang,
    /// `*`
    Asterisk,
    /// `/`
    Slash,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `++`
    Increment,
    /// `--`
    Decrement,

    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `:`
    Colon,
    /// `.`
    Dot,
    /// `(`
    Lparen,
    /// `)`
    Rparen,
    /// `{`
    Lbrace,
    /// `}`
    Rbrace,
    /// `[`
    Lbracket,
    /// `]`
    Rbracket,

    /// The `fn` keyword.
    Function,
    /// The `function` keyword.
    FuncDecl,
    /// The `while` keyword.
    While,
    /// The `let` keyword.
    Let,
    /// The `true` keyword.
    True,
    /// The `false` keyword.
    False,
    /// The `if` keyword.
    If,
    /// The `else` keyword.
    Else,
    /// The `return` keyword.
    Return,
    /// The `class` keyword.
    Class,
    /// The `new` keyword.
    New,
    /// The `for` keyword.
    For,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Illegal => "ILLEGAL",
            Self::Eof => "EOF",
            Self::Ident => "IDENT",
            Self::Int => "INT",
            Self::Str => "STRING",
            Self::Assign => "=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Bang => "!",
            Self::Asterisk => "*",
            Self::Slash => "/",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Increment => "++",
            Self::Decrement => "--",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::Dot => ".",
            Self::Lparen => "(",
            Self::Rparen => ")",
            Self::Lbrace => "{",
            Self::Rbrace => "}",
            Self::Lbracket => "[",
            Self::Rbracket => "]",
            Self::Function => "fn",
            Self::FuncDecl => "function",
            Self::While => "while",
            Self::Let => "let",
            Self::True => "true",
            Self::False => "false",
            Self::If => "if",
            Self::Else => "else",
            Self::Return => "return",
            Self::Class => "class",
            Self::New => "new",
            Self::For => "for",
        };
        write!(f, "{name}")
    }
}

/// A lexical token: a kind, the exact source lexeme, and its line.
///
/// For string tokens the literal holds the interior bytes without the
/// surrounding quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token's kind tag.
    pub kind:    TokenKind,
    /// The token's literal text.
    pub literal: String,
    /// The source line the token starts on.
    pub line:    usize,
}

/// A pull-based tokenizer over a source string.
///
/// Each [`next_token`] call yields the next token on demand. Lexing is
/// total: every source string produces a finite token sequence followed
/// by `EOF` forever, and unrecognized bytes become `ILLEGAL` tokens.
///
/// [`next_token`]: Lexer::next_token
///
/// # Example
/// ```
/// use scripta::interpreter::lexer::{Lexer, TokenKind};
///
/// let mut lexer = Lexer::new("let x = 5;");
///
/// assert_eq!(lexer.next_token().kind, TokenKind::Let);
/// assert_eq!(lexer.next_token().literal, "x");
/// assert_eq!(lexer.next_token().kind, TokenKind::Assign);
/// assert_eq!(lexer.next_token().kind, TokenKind::Int);
/// assert_eq!(lexer.next_token().kind, TokenKind::Semicolon);
/// assert_eq!(lexer.next_token().kind, TokenKind::Eof);
/// assert_eq!(lexer.next_token().kind, TokenKind::Eof);
/// ```
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, RawToken>,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer over the given source string.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { inner: RawToken::lexer_with_extras(source, LexerExtras { line: 1 }), }
    }

    /// Returns the next token.
    ///
    /// Once the source is exhausted every further call returns an `EOF`
    /// token with an empty literal.
    pub fn next_token(&mut self) -> Token {
        loop {
            let Some(result) = self.inner.next() else {
                return Token { kind:    TokenKind::Eof,
                               literal: String::new(),
                               line:    self.inner.extras.line, };
            };
            let line = self.inner.extras.line;

            match result {
                Ok(RawToken::Newline) => {},
                Ok(RawToken::Str) => {
                    let slice = self.inner.slice();
                    self.inner.extras.line += slice.matches('\n').count();
                    return Token { kind: TokenKind::Str,
                                   literal: unquote(slice).to_owned(),
                                   line };
                },
                Ok(raw) => {
                    return Token { kind: kind_of(raw),
                                   literal: self.inner.slice().to_owned(),
                                   line };
                },
                Err(()) => {
                    return Token { kind: TokenKind::Illegal,
                                   literal: self.inner.slice().to_owned(),
                                   line };
                },
            }
        }
    }
}

/// Strips the surrounding quotes from a string lexeme.
///
/// The trailing quote may be absent when the literal runs to the end of
/// the input.
fn unquote(slice: &str) -> &str {
    let interior = slice.strip_prefix('"').unwrap_or(slice);
    interior.strip_suffix('"').unwrap_or(interior)
}

/// Maps a raw scanner token onto its parser-facing kind.
const fn kind_of(raw: RawToken) -> TokenKind {
    match raw {
        // Newline and Str are handled before conversion.
        RawToken::Newline | RawToken::Str => TokenKind::Str,
        RawToken::Ident => TokenKind::Ident,
        RawToken::Int => TokenKind::Int,
        RawToken::Assign => TokenKind::Assign,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Asterisk => TokenKind::Asterisk,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Less => TokenKind::Less,
        RawToken::Greater => TokenKind::Greater,
        RawToken::Equal => TokenKind::Equal,
        RawToken::NotEqual => TokenKind::NotEqual,
        RawToken::Increment => TokenKind::Increment,
        RawToken::Decrement => TokenKind::Decrement,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Lparen => TokenKind::Lparen,
        RawToken::Rparen => TokenKind::Rparen,
        RawToken::Lbrace => TokenKind::Lbrace,
        RawToken::Rbrace => TokenKind::Rbrace,
        RawToken::Lbracket => TokenKind::Lbracket,
        RawToken::Rbracket => TokenKind::Rbracket,
        RawToken::Function => TokenKind::Function,
        RawToken::FuncDecl => TokenKind::FuncDecl,
        RawToken::While => TokenKind::While,
        RawToken::Let => TokenKind::Let,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::Return => TokenKind::Return,
        RawToken::Class => TokenKind::Class,
        RawToken::New => TokenKind::New,
        RawToken::For => TokenKind::For,
    }
}
