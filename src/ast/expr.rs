//
// Operators represented in the tree.
//

use super::Node;
use crate::{
    config::Config,
    error::{ConstructionError, EvaluationError},
    value::Value,
    variable::VariableTable,
};
use core::cmp::Ordering;
use derive_more::Display;

///
/// An operation on one value.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum UnaryOp {
    #[display("-")]
    Neg,
}

impl UnaryOp {
    #[allow(clippy::missing_errors_doc)]
    pub fn apply(self, arg: &Value) -> Result<Value, EvaluationError> {
        match self {
            UnaryOp::Neg => arg.checked_neg(),
        }
    }
}

///
/// An operation on two values, left operand first.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BinaryOp {
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
}

impl BinaryOp {
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        !matches!(
            self,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div
        )
    }

    ///
    /// Apply the operation to already evaluated operands.
    ///
    /// Comparisons always produce a boolean; a NaN operand makes every
    /// ordering comparison false.
    ///
    #[allow(clippy::missing_errors_doc)]
    pub fn apply(self, lhs: &Value, rhs: &Value) -> Result<Value, EvaluationError> {
        let ordering = |lhs: &Value, rhs: &Value, accept: fn(Ordering) -> bool| {
            lhs.compare(rhs)
                .map(|ord| Value::Boolean(ord.is_some_and(accept)))
        };

        match self {
            BinaryOp::Add => lhs.checked_add(rhs),
            BinaryOp::Sub => lhs.checked_sub(rhs),
            BinaryOp::Mul => lhs.checked_mul(rhs),
            BinaryOp::Div => lhs.checked_div(rhs),
            BinaryOp::Less => ordering(lhs, rhs, Ordering::is_lt),
            BinaryOp::LessOrEqual => ordering(lhs, rhs, Ordering::is_le),
            BinaryOp::Equal => lhs.equals(rhs).map(Value::Boolean),
            BinaryOp::NotEqual => lhs.equals(rhs).map(|eq| Value::Boolean(!eq)),
            BinaryOp::Greater => ordering(lhs, rhs, Ordering::is_gt),
            BinaryOp::GreaterOrEqual => ordering(lhs, rhs, Ordering::is_ge),
        }
    }
}

macro_rules! operator_node {
    ($vis:vis $name:ident, $op:ty, $arity:literal, $label:literal) => {
        ///
        /// An operator node that collects its arguments one at a time.
        ///
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name {
            op: $op,
            arguments: ::alloc::vec::Vec<Node>,
        }

        impl $name {
            pub const ARITY: usize = $arity;

            #[must_use]
            pub const fn new(op: $op) -> Self {
                Self {
                    op,
                    arguments: ::alloc::vec::Vec::new(),
                }
            }

            #[must_use]
            pub const fn op(&self) -> $op {
                self.op
            }

            #[must_use]
            pub fn arguments(&self) -> &[Node] {
                &self.arguments
            }

            #[must_use]
            pub fn is_complete(&self) -> bool {
                self.arguments.len() == Self::ARITY
            }

            ///
            /// Append the next argument, failing once the arity is reached.
            ///
            #[allow(clippy::missing_errors_doc)]
            pub fn add_argument(&mut self, node: Node) -> Result<(), ConstructionError> {
                if self.arguments.len() >= Self::ARITY {
                    return Err(ConstructionError::TooManyArguments {
                        operator: $label,
                        arity: Self::ARITY,
                    });
                }

                self.arguments.push(node);
                Ok(())
            }

            fn complete_arguments(&self) -> Result<&[Node; $arity], EvaluationError> {
                <&[Node; $arity]>::try_from(self.arguments.as_slice()).map_err(|_| {
                    EvaluationError::MissingArgument {
                        operator: $label,
                        expected: Self::ARITY,
                        found: self.arguments.len(),
                    }
                })
            }
        }

        //
        // Arguments are moved onto a flat stack before they are dropped, so
        // a tree of any depth is freed without recursing.
        //
        impl Drop for $name {
            fn drop(&mut self) {
                let mut stack = ::core::mem::take(&mut self.arguments);

                while let Some(mut node) = stack.pop() {
                    match &mut node {
                        Node::Unary(op) => stack.append(&mut op.arguments),
                        Node::Binary(op) => stack.append(&mut op.arguments),
                        Node::Constant(_) | Node::Variable(_) => {}
                    }
                }
            }
        }
    };
}

operator_node!(pub UnaryOperator, UnaryOp, 1, "unary");
operator_node!(pub BinaryOperator, BinaryOp, 2, "binary");

impl UnaryOperator {
    pub(crate) fn evaluate_at(
        &self,
        variables: &VariableTable,
        config: &Config,
        depth: usize,
    ) -> Result<Value, EvaluationError> {
        let [arg] = self.complete_arguments()?;
        self.op
            .apply(&arg.evaluate_at(variables, config, depth + 1)?)
    }
}

impl BinaryOperator {
    pub(crate) fn evaluate_at(
        &self,
        variables: &VariableTable,
        config: &Config,
        depth: usize,
    ) -> Result<Value, EvaluationError> {
        let [lhs, rhs] = self.complete_arguments()?;
        let lhs = lhs.evaluate_at(variables, config, depth + 1)?;
        let rhs = rhs.evaluate_at(variables, config, depth + 1)?;
        self.op.apply(&lhs, &rhs)
    }
}
