//
// Construction of well-formed nodes.
//

use super::{BinaryOp, BinaryOperator, Node, UnaryOp, UnaryOperator};
use crate::{error::ConstructionError, value::Value, variable::is_identifier};
use alloc::string::String;

macro_rules! binary_factory {
    ($($fn_name:ident => $op:ident),+ $(,)?) => {
        $(
            #[doc = concat!("Create a `", stringify!($op), "` node, `left` being its first argument.")]
            #[allow(clippy::missing_errors_doc)]
            pub fn $fn_name(left: Node, right: Node) -> Result<Node, ConstructionError> {
                Self::create_binary(BinaryOp::$op, left, right)
            }
        )+
    };
}

///
/// Builds tree nodes bottom-up.
///
/// Every node handed out is complete: operators already hold exactly as many
/// arguments as their arity. Ownership passes to the caller, typically into
/// the next operator up and finally into a [`Tree`](super::Tree).
///
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeNodeFactory;

impl TreeNodeFactory {
    #[must_use]
    pub fn create_constant(value: impl Into<Value>) -> Node {
        Node::Constant(value.into())
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn create_variable(name: impl Into<String>) -> Result<Node, ConstructionError> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(ConstructionError::InvalidVariableName { name });
        }

        Ok(Node::Variable(name))
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn create_unary(op: UnaryOp, arg: Node) -> Result<Node, ConstructionError> {
        let mut node = UnaryOperator::new(op);
        node.add_argument(arg)?;
        Ok(Node::Unary(node))
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn create_binary(op: BinaryOp, left: Node, right: Node) -> Result<Node, ConstructionError> {
        let mut node = BinaryOperator::new(op);
        node.add_argument(left)?;
        node.add_argument(right)?;
        Ok(Node::Binary(node))
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn create_neg(arg: Node) -> Result<Node, ConstructionError> {
        Self::create_unary(UnaryOp::Neg, arg)
    }

    binary_factory! {
        create_add => Add,
        create_sub => Sub,
        create_mul => Mul,
        create_div => Div,
        create_less => Less,
        create_less_or_equal => LessOrEqual,
        create_equal => Equal,
        create_not_equal => NotEqual,
        create_greater => Greater,
        create_greater_or_equal => GreaterOrEqual,
    }
}
