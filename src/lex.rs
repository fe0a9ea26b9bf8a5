use crate::value::Value;
use alloc::string::String;
use derive_more::Display;

pub type Result<'src, O> = nom::IResult<&'src str, O>;

///
/// A syntactic token of an expression.
///
#[derive(Debug, Clone, PartialEq, Display)]
pub enum Token<'src> {
    #[display("{_0}")]
    Literal(Literal),

    #[display("+")]
    Add,
    #[display("-")]
    Sub,
    #[display("*")]
    Mul,
    #[display("/")]
    Div,

    #[display("<")]
    Less,
    #[display("<=")]
    LessOrEqual,
    #[display("==")]
    Equal,
    #[display("!=")]
    NotEqual,
    #[display(">")]
    Greater,
    #[display(">=")]
    GreaterOrEqual,

    #[display("(")]
    LParen,
    #[display(")")]
    RParen,

    #[display("{_0}")]
    Ident(&'src str),

    // looks like a literal but cannot be one
    #[display("{_0}")]
    Invalid(&'src str),
    #[display("{_0}")]
    Unknown(&'src str),
}

///
/// A literal inside an expression.
///
#[derive(Debug, Clone, PartialEq, Display)]
pub enum Literal {
    #[display("{_0}")]
    Integer(i64),
    #[display("{_0:?}")]
    Float(f64),
    #[display("{_0}")]
    Boolean(bool),
    #[display("{_0:?}")]
    String(String),
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Integer(i) => Value::Integer(i),
            Literal::Float(f) => Value::Float(f),
            Literal::Boolean(b) => Value::Boolean(b),
            Literal::String(s) => Value::String(s),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    src: &'src str,
}

impl<'src> Token<'src> {
    ///
    /// Parse a [`Token`] from an input slice, assuming no preceding whitespace.
    ///
    #[allow(clippy::missing_errors_doc)]
    pub fn parse(src: &'src str) -> Result<Self> {
        use nom::{
            branch::alt,
            bytes::complete::{tag, take_till1},
            character::complete::char,
            combinator::{map, recognize, rest},
            sequence::pair,
        };

        fn sign(src: &str) -> Result<Token> {
            alt((
                map(tag("+"), |_| Token::Add),
                map(tag("-"), |_| Token::Sub),
                map(tag("*"), |_| Token::Mul),
                map(tag("/"), |_| Token::Div),
            ))(src)
        }

        fn comparison(src: &str) -> Result<Token> {
            alt((
                map(tag("<="), |_| Token::LessOrEqual),
                map(tag(">="), |_| Token::GreaterOrEqual),
                map(tag("=="), |_| Token::Equal),
                map(tag("!="), |_| Token::NotEqual),
                map(tag("<"), |_| Token::Less),
                map(tag(">"), |_| Token::Greater),
            ))(src)
        }

        fn paren(src: &str) -> Result<Token> {
            alt((
                map(tag("("), |_| Token::LParen),
                map(tag(")"), |_| Token::RParen),
            ))(src)
        }

        fn word(src: &str) -> Result<Token> {
            map(util::identifier, |ident| match ident {
                "true" => Token::Literal(Literal::Boolean(true)),
                "false" => Token::Literal(Literal::Boolean(false)),
                _ => Token::Ident(ident),
            })(src)
        }

        alt((
            map(Literal::parse, Token::Literal),
            map(util::number, Token::Invalid),
            map(recognize(pair(char('"'), rest)), Token::Invalid),
            sign,
            comparison,
            paren,
            word,
            map(
                take_till1(|c: char| c.is_ascii_whitespace()),
                Token::Unknown,
            ),
        ))(src)
    }
}

impl Literal {
    ///
    /// Parse a number or string [`Literal`] from an input slice, assuming no
    /// preceding whitespace.
    ///
    /// Numbers with a fraction or an exponent are floats, everything else is
    /// an integer. An integer that does not fit in an [`i64`] is rejected.
    ///
    #[allow(clippy::missing_errors_doc)]
    pub fn parse(src: &str) -> Result<Self> {
        use nom::{
            branch::alt,
            combinator::{map, map_opt},
        };

        alt((
            map_opt(util::number, |text: &str| {
                if text.contains(|c| matches!(c, '.' | 'e' | 'E')) {
                    text.parse().ok().map(Literal::Float)
                } else {
                    text.parse().ok().map(Literal::Integer)
                }
            }),
            map(util::string, Literal::String),
        ))(src)
    }
}

impl<'src> Lexer<'src> {
    #[must_use]
    pub fn new(src: &'src str) -> Self {
        Self { src }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let (src, _) =
            nom::bytes::complete::take_while::<_, _, nom::error::Error<_>>(
                char::is_whitespace,
            )(self.src)
            .ok()?;
        self.src = src;
        if src.is_empty() {
            return None;
        }
        let (src, tok) = Token::parse(src).ok()?;
        self.src = src;
        Some(tok)
    }
}

mod util {
    use super::Result;
    use alloc::string::String;

    ///
    /// Recognize the text of a number, assuming no preceding whitespace.
    ///
    /// Accepts `12`, `1.5`, `1.`, `.5` and an optional exponent such as
    /// `2e10` or `1.5E-3`. Signs are separate tokens.
    ///
    pub fn number(src: &str) -> Result<&str> {
        use nom::{
            branch::alt,
            character::complete::{char, digit0, digit1, one_of},
            combinator::{opt, recognize},
            sequence::{pair, tuple},
        };

        recognize(pair(
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))(src)
    }

    ///
    /// Parse a double-quoted string, resolving `\\`, `\"`, `\n` and `\t`.
    ///
    pub fn string(src: &str) -> Result<String> {
        use nom::{
            branch::alt,
            bytes::complete::{escaped_transform, is_not, tag},
            character::complete::char,
            combinator::{map, value},
            sequence::delimited,
        };

        alt((
            // `escaped_transform` refuses to match nothing
            map(tag("\"\""), |_| String::new()),
            delimited(
                char('"'),
                escaped_transform(
                    is_not("\\\""),
                    '\\',
                    alt((
                        value("\\", tag("\\")),
                        value("\"", tag("\"")),
                        value("\n", tag("n")),
                        value("\t", tag("t")),
                    )),
                ),
                char('"'),
            ),
        ))(src)
    }

    ///
    /// Recognize an identifier: an ASCII letter or `_`, then letters, digits
    /// or `_`.
    ///
    pub fn identifier(src: &str) -> Result<&str> {
        use nom::{
            bytes::complete::take_while,
            character::complete::satisfy,
            combinator::recognize,
            sequence::pair,
        };

        recognize(pair(
            satisfy(|c| c.is_ascii_alphabetic() || c == '_'),
            take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
        ))(src)
    }
}
