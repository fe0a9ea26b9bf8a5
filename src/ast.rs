use crate::{
    config::Config, error::EvaluationError, value::Value, variable::VariableTable,
};
use alloc::{boxed::Box, string::String, vec, vec::Vec};
use core::fmt;

pub mod expr;
pub mod factory;

pub use expr::{BinaryOp, BinaryOperator, UnaryOp, UnaryOperator};
pub use factory::TreeNodeFactory;

///
/// Something that evaluates to a [`Value`] given a set of variables.
///
pub trait Evaluate {
    #[allow(clippy::missing_errors_doc)]
    fn evaluate(&self, variables: &VariableTable) -> Result<Value, EvaluationError>;
}

impl<T: Evaluate + ?Sized> Evaluate for Box<T> {
    fn evaluate(&self, variables: &VariableTable) -> Result<Value, EvaluationError> {
        (**self).evaluate(variables)
    }
}

impl Evaluate for Value {
    fn evaluate(&self, _: &VariableTable) -> Result<Value, EvaluationError> {
        Ok(self.clone())
    }
}

///
/// A node of an expression tree.
///
/// Operator nodes own their arguments, so a node owns its whole subtree.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Constant(Value),
    Variable(String),
    Unary(UnaryOperator),
    Binary(BinaryOperator),
}

impl Node {
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Constant(_) | Node::Variable(_) => &[],
            Node::Unary(op) => op.arguments(),
            Node::Binary(op) => op.arguments(),
        }
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Node::Constant(_) | Node::Variable(_))
    }

    ///
    /// Evaluate with explicit limits instead of the defaults.
    ///
    #[allow(clippy::missing_errors_doc)]
    pub fn evaluate_with(
        &self,
        variables: &VariableTable,
        config: &Config,
    ) -> Result<Value, EvaluationError> {
        self.evaluate_at(variables, config, 0)
    }

    pub(crate) fn evaluate_at(
        &self,
        variables: &VariableTable,
        config: &Config,
        depth: usize,
    ) -> Result<Value, EvaluationError> {
        if depth >= config.max_depth {
            return Err(EvaluationError::DepthLimitExceeded {
                limit: config.max_depth,
            });
        }

        match self {
            Node::Constant(value) => Ok(value.clone()),
            Node::Variable(name) => Ok(variables.get_variable(name)?.value().clone()),
            Node::Unary(op) => op.evaluate_at(variables, config, depth),
            Node::Binary(op) => op.evaluate_at(variables, config, depth),
        }
    }

    //
    // Measuring, printing and dropping keep their own stack so that they
    // never recurse, however deep the tree is.
    //

    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];

        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.children().iter().map(|child| (child, depth + 1)));
        }

        deepest
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&Node> = vec![self];

        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children());
        }

        count
    }
}

impl Evaluate for Node {
    fn evaluate(&self, variables: &VariableTable) -> Result<Value, EvaluationError> {
        self.evaluate_with(variables, &Config::default())
    }
}

//
// One step of printing a tree. A missing operator argument prints as `?`.
//
enum Piece<'a> {
    Node(Option<&'a Node>),
    Op(BinaryOp),
    Close,
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Piece::Node(Some(self))];

        while let Some(piece) = stack.pop() {
            match piece {
                Piece::Close => f.write_str(")")?,
                Piece::Op(op) => write!(f, " {op} ")?,
                Piece::Node(None) => f.write_str("?")?,
                Piece::Node(Some(node)) => match node {
                    Node::Constant(Value::String(s)) => write!(f, "{s:?}")?,
                    Node::Constant(value) => write!(f, "{value}")?,
                    Node::Variable(name) => f.write_str(name)?,
                    Node::Unary(op) => {
                        write!(f, "({}", op.op())?;
                        stack.push(Piece::Close);
                        stack.push(Piece::Node(op.arguments().first()));
                    }
                    Node::Binary(op) => {
                        f.write_str("(")?;
                        stack.push(Piece::Close);
                        stack.push(Piece::Node(op.arguments().get(1)));
                        stack.push(Piece::Op(op.op()));
                        stack.push(Piece::Node(op.arguments().first()));
                    }
                },
            }
        }

        Ok(())
    }
}

///
/// A complete expression: the root node and everything below it.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    root: Node,
}

impl Tree {
    #[must_use]
    pub const fn new(root: Node) -> Self {
        Self { root }
    }

    #[must_use]
    pub const fn root(&self) -> &Node {
        &self.root
    }

    #[must_use]
    pub fn into_root(self) -> Node {
        self.root
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn evaluate_with(
        &self,
        variables: &VariableTable,
        config: &Config,
    ) -> Result<Value, EvaluationError> {
        tracing::trace!(target: "vast::eval", tree = %self.root, "evaluating");

        let result = self.root.evaluate_with(variables, config);
        if let Err(error) = &result {
            tracing::debug!(target: "vast::eval", tree = %self.root, %error, "evaluation failed");
        }

        result
    }
}

impl Evaluate for Tree {
    fn evaluate(&self, variables: &VariableTable) -> Result<Value, EvaluationError> {
        self.evaluate_with(variables, &Config::default())
    }
}

impl From<Node> for Tree {
    fn from(root: Node) -> Self {
        Self::new(root)
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}
