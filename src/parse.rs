//!
//! Turning source text into a [`Tree`].
//!
//! The [`Parser`] only tracks the outcome of the last parse. Tokenizing and
//! grammar belong to a [`Driver`], which assembles the tree bottom-up
//! through [`TreeNodeFactory`](crate::ast::TreeNodeFactory). [`Grammar`] is
//! the driver used unless another one is supplied.
//!

use crate::{
    ast::{BinaryOp, Node, Tree, TreeNodeFactory as F},
    config::Config,
    error::ParseError,
    lex::{Lexer, Token},
};
use alloc::string::ToString;
use core::iter::Peekable;
use derive_more::Display;

///
/// Where a [`Parser`] stands after its last call to [`Parser::parse`].
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum ParserState {
    #[default]
    #[display("undefined")]
    Undefined,
    #[display("error")]
    Error,
    #[display("ready")]
    Ready,
}

///
/// Builds a tree from source text.
///
/// Implementations are expected to create nodes with
/// [`TreeNodeFactory`](crate::ast::TreeNodeFactory) so that arity is
/// enforced; a [`ConstructionError`](crate::error::ConstructionError) then
/// surfaces as [`ParseError::Construction`].
///
pub trait Driver {
    #[allow(clippy::missing_errors_doc)]
    fn drive(&mut self, source: &str, config: &Config) -> Result<Tree, ParseError>;
}

///
/// The default expression grammar.
///
/// From loosest to tightest binding: comparisons, `+ -`, `* /`, unary `-`,
/// then literals, variables and parenthesized expressions. Every binary level
/// is left-associative, so `a < b < c` compares a boolean with `c`.
///
/// A tree deeper than [`Config::max_depth`] is rejected with
/// [`ParseError::NestingTooDeep`], so anything it accepts can be evaluated
/// under the same config.
///
#[derive(Debug, Clone, Copy, Default)]
pub struct Grammar;

impl Driver for Grammar {
    fn drive(&mut self, source: &str, config: &Config) -> Result<Tree, ParseError> {
        let mut cursor = Cursor {
            tokens: Lexer::new(source).peekable(),
            config,
            depth: 0,
        };

        let root = cursor.expression()?;
        if let Some(token) = cursor.tokens.next() {
            return Err(ParseError::TrailingInput {
                token: token.to_string(),
            });
        }

        // long chains stay flat in the grammar but not in the tree
        if root.depth() > config.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: config.max_depth,
            });
        }

        Ok(Tree::new(root))
    }
}

type Rule<'src, 'cfg> = fn(&mut Cursor<'src, 'cfg>) -> Result<Node, ParseError>;

struct Cursor<'src, 'cfg> {
    tokens: Peekable<Lexer<'src>>,
    config: &'cfg Config,
    depth: usize,
}

impl<'src, 'cfg> Cursor<'src, 'cfg> {
    fn expression(&mut self) -> Result<Node, ParseError> {
        self.comparison()
    }

    fn comparison(&mut self) -> Result<Node, ParseError> {
        self.binary_level(Self::additive, |token| match token {
            Token::Less => Some(BinaryOp::Less),
            Token::LessOrEqual => Some(BinaryOp::LessOrEqual),
            Token::Equal => Some(BinaryOp::Equal),
            Token::NotEqual => Some(BinaryOp::NotEqual),
            Token::Greater => Some(BinaryOp::Greater),
            Token::GreaterOrEqual => Some(BinaryOp::GreaterOrEqual),
            _ => None,
        })
    }

    fn additive(&mut self) -> Result<Node, ParseError> {
        self.binary_level(Self::term, |token| match token {
            Token::Add => Some(BinaryOp::Add),
            Token::Sub => Some(BinaryOp::Sub),
            _ => None,
        })
    }

    fn term(&mut self) -> Result<Node, ParseError> {
        self.binary_level(Self::unary, |token| match token {
            Token::Mul => Some(BinaryOp::Mul),
            Token::Div => Some(BinaryOp::Div),
            _ => None,
        })
    }

    fn binary_level(
        &mut self,
        operand: Rule<'src, 'cfg>,
        operator: fn(&Token<'src>) -> Option<BinaryOp>,
    ) -> Result<Node, ParseError> {
        let mut lhs = operand(self)?;

        while let Some(op) = self.tokens.peek().and_then(operator) {
            self.tokens.next();
            let rhs = operand(self)?;
            lhs = F::create_binary(op, lhs, rhs)?;
        }

        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Node, ParseError> {
        if self.tokens.next_if_eq(&Token::Sub).is_some() {
            let arg = self.nested(Self::unary)?;
            return Ok(F::create_neg(arg)?);
        }

        self.primary()
    }

    fn primary(&mut self) -> Result<Node, ParseError> {
        match self.tokens.next() {
            Some(Token::Literal(literal)) => Ok(F::create_constant(literal)),
            Some(Token::Ident(name)) => Ok(F::create_variable(name)?),
            Some(Token::LParen) => {
                let inner = self.nested(Self::expression)?;
                match self.tokens.next() {
                    Some(Token::RParen) => Ok(inner),
                    Some(token) => Err(ParseError::UnexpectedToken {
                        token: token.to_string(),
                    }),
                    None => Err(ParseError::UnexpectedEnd),
                }
            }
            Some(Token::Invalid(literal)) => Err(ParseError::InvalidLiteral {
                literal: literal.into(),
            }),
            Some(token) => Err(ParseError::UnexpectedToken {
                token: token.to_string(),
            }),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    fn nested(&mut self, rule: Rule<'src, 'cfg>) -> Result<Node, ParseError> {
        if self.depth >= self.config.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.config.max_depth,
            });
        }

        self.depth += 1;
        let node = rule(self);
        self.depth -= 1;
        node
    }
}

///
/// Parses expressions and keeps the outcome of the latest attempt.
///
/// Each call to [`Parser::parse`] starts over from [`ParserState::Undefined`],
/// dropping the previous tree or error.
///
#[derive(Debug, Clone, Default)]
pub struct Parser<D = Grammar> {
    driver: D,
    config: Config,
    state: ParserState,
    tree: Option<Tree>,
    error: Option<ParseError>,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self::with_driver(Grammar)
    }
}

impl<D: Driver> Parser<D> {
    #[must_use]
    pub fn with_driver(driver: D) -> Self {
        Self {
            driver,
            config: Config::default(),
            state: ParserState::Undefined,
            tree: None,
            error: None,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    ///
    /// Parse `expression`, returning whether a tree is now available.
    ///
    pub fn parse(&mut self, expression: &str) -> bool {
        self.state = ParserState::Undefined;
        self.tree = None;
        self.error = None;

        match self.driver.drive(expression, &self.config) {
            Ok(tree) => {
                tracing::debug!(target: "vast::parse", %tree, "parsed expression");
                self.tree = Some(tree);
                self.state = ParserState::Ready;
            }
            Err(error) => {
                tracing::debug!(target: "vast::parse", expression, %error, "parse failed");
                self.error = Some(error);
                self.state = ParserState::Error;
            }
        }

        self.state == ParserState::Ready
    }

    #[must_use]
    pub const fn state(&self) -> ParserState {
        self.state
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    ///
    /// Take the parsed tree out of the parser. The state stays
    /// [`ParserState::Ready`] until the next parse.
    ///
    pub fn take_tree(&mut self) -> Option<Tree> {
        self.tree.take()
    }

    #[must_use]
    pub const fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }
}
