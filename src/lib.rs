#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod ast;
pub mod config;
pub mod error;
pub mod lex;
pub mod parse;
pub mod value;
pub mod variable;

pub mod prelude {
    pub use crate::ast::{Evaluate, Node, Tree, TreeNodeFactory};
    pub use crate::config::Config;
    pub use crate::error::{ConstructionError, Error, EvaluationError, ParseError};
    pub use crate::lex::{Lexer, Literal, Token};
    pub use crate::parse::{Driver, Grammar, Parser, ParserState};
    pub use crate::value::{Kind, Value};
    pub use crate::variable::{Variable, VariableTable};
}

use crate::prelude::*;

///
/// Parse `source` with the default grammar and evaluate it against
/// `variables`.
///
#[allow(clippy::missing_errors_doc)]
pub fn evaluate(source: &str, variables: &VariableTable) -> Result<Value, Error> {
    let tree = Grammar.drive(source, &Config::default())?;
    Ok(tree.evaluate(variables)?)
}

#[cfg(test)]
mod test {
    use crate::prelude::*;

    #[test]
    fn evaluate() {
        let mut vars = VariableTable::new();
        vars.add_variable("x", 3_i64).unwrap();

        assert_eq!(
            crate::evaluate("2 + x == 5", &vars),
            Ok(Value::Boolean(true))
        );
        assert_eq!(
            crate::evaluate("2 +", &vars),
            Err(Error::Parse(ParseError::UnexpectedEnd))
        );
        assert_eq!(
            crate::evaluate("y", &vars),
            Err(Error::Evaluation(EvaluationError::UnknownVariable {
                name: "y".into()
            }))
        );
    }
}
