//!
//! Errors raised while building and evaluating expression trees.
//!
//! Building a tree and evaluating it fail in different ways, so they get
//! different types: a [`ConstructionError`] means the tree itself is
//! malformed and must be thrown away, an [`EvaluationError`] means the tree
//! is fine but this particular evaluation could not produce a value.
//!

use crate::value::Kind;
use alloc::string::String;
use derive_more::{Display, From};

//
// `derive_more::Error` is spelled out in full, since `Error` below is ours.
//

///
/// A tree could not be assembled.
///
#[derive(Debug, Clone, PartialEq, Eq, Display, derive_more::Error)]
pub enum ConstructionError {
    #[display("too many arguments for {operator} operator (arity {arity})")]
    TooManyArguments {
        operator: &'static str,
        arity: usize,
    },

    #[display("`{name}` is not a valid variable name")]
    InvalidVariableName { name: String },
}

///
/// A value could not be computed.
///
#[derive(Debug, Clone, PartialEq, Eq, Display, derive_more::Error)]
pub enum EvaluationError {
    #[display("expected {expected} value, found {found}")]
    WrongKind { expected: Kind, found: Kind },

    #[display("cannot cast {from} to {to}")]
    InvalidCast { from: Kind, to: Kind },

    #[display("cannot combine {lhs} and {rhs}")]
    IncompatibleKinds { lhs: Kind, rhs: Kind },

    #[display("{operation} is not supported for {kind} values")]
    UnsupportedOperation { operation: &'static str, kind: Kind },

    #[display("division by zero")]
    DivisionByZero,

    #[display("integer overflow in {operation}")]
    Overflow { operation: &'static str },

    #[display("unknown variable `{name}`")]
    UnknownVariable { name: String },

    #[display("variable `{name}` is already bound")]
    DuplicateVariable { name: String },

    #[display("`{name}` is not a valid variable name")]
    InvalidVariableName { name: String },

    #[display("{operator} operator needs {expected} arguments, has {found}")]
    MissingArgument {
        operator: &'static str,
        expected: usize,
        found: usize,
    },

    #[display("expression nested deeper than {limit} levels")]
    DepthLimitExceeded { limit: usize },
}

///
/// Source text could not be turned into a tree.
///
#[derive(Debug, Clone, PartialEq, Eq, Display, From, derive_more::Error)]
pub enum ParseError {
    #[display("unexpected token `{token}`")]
    UnexpectedToken { token: String },

    #[display("unexpected end of input")]
    UnexpectedEnd,

    #[display("unexpected trailing input `{token}`")]
    TrailingInput { token: String },

    #[display("invalid literal `{literal}`")]
    InvalidLiteral { literal: String },

    #[display("expression nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    #[display("{error}")]
    #[from]
    Construction {
        #[error(source)]
        error: ConstructionError,
    },
}

///
/// Anything that can go wrong between source text and a final value.
///
#[derive(Debug, Clone, PartialEq, Eq, Display, From, derive_more::Error)]
pub enum Error {
    #[display("parse error: {_0}")]
    Parse(ParseError),

    #[display("evaluation error: {_0}")]
    Evaluation(EvaluationError),
}
