use crate::{error::EvaluationError, value::Value};
use alloc::{collections::BTreeMap, string::String};

///
/// Whether `name` can be used as a variable name: an ASCII letter or `_`,
/// followed by ASCII letters, digits or `_`.
///
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();

    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

///
/// A named value.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    value: Value,
}

impl Variable {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }
}

///
/// The variables an expression is evaluated against.
///
/// A name is bound at most once; binding it again is an error rather than an
/// overwrite. Use [`VariableTable::remove_variable`] first to rebind.
///
#[derive(Debug, Clone, Default)]
pub struct VariableTable {
    variables: BTreeMap<String, Variable>,
}

impl VariableTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn add_variable(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), EvaluationError> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(EvaluationError::InvalidVariableName { name });
        }
        if self.variables.contains_key(&name) {
            return Err(EvaluationError::DuplicateVariable { name });
        }

        let value = value.into();
        tracing::trace!(target: "vast::variable", name = %name, value = %value, "bound variable");
        self.variables
            .insert(name.clone(), Variable { name, value });
        Ok(())
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn get_variable(&self, name: &str) -> Result<&Variable, EvaluationError> {
        self.variables
            .get(name)
            .ok_or_else(|| EvaluationError::UnknownVariable { name: name.into() })
    }

    pub fn remove_variable(&mut self, name: &str) -> Option<Variable> {
        self.variables.remove(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    ///
    /// Iterate over the bindings, ordered by name.
    ///
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }
}

#[cfg(test)]
mod test {
    use super::{is_identifier, VariableTable};
    use crate::{error::EvaluationError, value::Value};
    use alloc::vec::Vec;

    #[test]
    fn identifiers() {
        assert!(is_identifier("x"));
        assert!(is_identifier("_tmp1"));
        assert!(is_identifier("camelCase"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1x"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier("π"));
    }

    #[test]
    fn lookup_before_and_after_binding() {
        let mut table = VariableTable::new();

        assert_eq!(
            table.get_variable("x"),
            Err(EvaluationError::UnknownVariable { name: "x".into() })
        );

        table.add_variable("x", 3_i64).unwrap();
        let x = table.get_variable("x").unwrap();
        assert_eq!(x.name(), "x");
        assert_eq!(x.value(), &Value::Integer(3));
    }

    #[test]
    fn rebinding_is_rejected() {
        let mut table = VariableTable::new();
        table.add_variable("x", 1_i64).unwrap();

        assert_eq!(
            table.add_variable("x", 2.0),
            Err(EvaluationError::DuplicateVariable { name: "x".into() })
        );
        assert_eq!(table.get_variable("x").unwrap().value(), &Value::Integer(1));

        assert!(table.remove_variable("x").is_some());
        table.add_variable("x", 2.0).unwrap();
        assert_eq!(table.get_variable("x").unwrap().value(), &Value::Float(2.0));
    }

    #[test]
    fn invalid_names_are_rejected() {
        let mut table = VariableTable::new();

        assert_eq!(
            table.add_variable("", true),
            Err(EvaluationError::InvalidVariableName { name: "".into() })
        );
        assert!(table.add_variable("2x", true).is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn iterates_in_name_order() {
        let mut table = VariableTable::new();
        table.add_variable("b", "two").unwrap();
        table.add_variable("a", 1_i64).unwrap();
        table.add_variable("c", false).unwrap();

        let names: Vec<_> = table.iter().map(|v| v.name()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(table.len(), 3);
        assert!(table.contains("b"));
    }
}
