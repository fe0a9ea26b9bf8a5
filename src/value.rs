use crate::error::EvaluationError;
use alloc::string::String;
use core::cmp::Ordering;
use derive_more::Display;

///
/// The kind of a [`Value`].
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Kind {
    #[display("undefined")]
    Undefined,
    #[display("integer")]
    Integer,
    #[display("float")]
    Float,
    #[display("boolean")]
    Boolean,
    #[display("string")]
    String,
}

impl Kind {
    //
    // Position in the promotion order. Strings sit outside of it.
    //
    const fn rank(self) -> Option<u8> {
        match self {
            Kind::Undefined => Some(0),
            Kind::Boolean => Some(1),
            Kind::Integer => Some(2),
            Kind::Float => Some(3),
            Kind::String => None,
        }
    }
}

///
/// A dynamically typed value.
///
#[derive(Debug, Clone, Default, PartialEq, Display)]
pub enum Value {
    #[default]
    #[display("undefined")]
    Undefined,
    #[display("{_0}")]
    Integer(i64),
    #[display("{_0:?}")]
    Float(f64),
    #[display("{_0}")]
    Boolean(bool),
    #[display("{_0}")]
    String(String),
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

#[derive(Debug, Clone, Copy)]
enum Arithmetic {
    Add,
    Sub,
    Mul,
    Div,
}

impl Arithmetic {
    const fn name(self) -> &'static str {
        match self {
            Arithmetic::Add => "addition",
            Arithmetic::Sub => "subtraction",
            Arithmetic::Mul => "multiplication",
            Arithmetic::Div => "division",
        }
    }

    fn integer(self, a: i64, b: i64) -> Result<i64, EvaluationError> {
        let result = match self {
            Arithmetic::Add => a.checked_add(b),
            Arithmetic::Sub => a.checked_sub(b),
            Arithmetic::Mul => a.checked_mul(b),
            Arithmetic::Div if b == 0 => return Err(EvaluationError::DivisionByZero),
            // truncates toward zero
            Arithmetic::Div => a.checked_div(b),
        };

        result.ok_or(EvaluationError::Overflow {
            operation: self.name(),
        })
    }

    fn float(self, a: f64, b: f64) -> Result<f64, EvaluationError> {
        Ok(match self {
            Arithmetic::Add => a + b,
            Arithmetic::Sub => a - b,
            Arithmetic::Mul => a * b,
            Arithmetic::Div if b == 0.0 => return Err(EvaluationError::DivisionByZero),
            Arithmetic::Div => a / b,
        })
    }
}

impl Value {
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Value::Undefined => Kind::Undefined,
            Value::Integer(_) => Kind::Integer,
            Value::Float(_) => Kind::Float,
            Value::Boolean(_) => Kind::Boolean,
            Value::String(_) => Kind::String,
        }
    }

    const fn wrong_kind(&self, expected: Kind) -> EvaluationError {
        EvaluationError::WrongKind {
            expected,
            found: self.kind(),
        }
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn get_integer(&self) -> Result<i64, EvaluationError> {
        match self {
            Value::Integer(i) => Ok(*i),
            _ => Err(self.wrong_kind(Kind::Integer)),
        }
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn get_float(&self) -> Result<f64, EvaluationError> {
        match self {
            Value::Float(f) => Ok(*f),
            _ => Err(self.wrong_kind(Kind::Float)),
        }
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn get_boolean(&self) -> Result<bool, EvaluationError> {
        match self {
            Value::Boolean(b) => Ok(*b),
            _ => Err(self.wrong_kind(Kind::Boolean)),
        }
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn get_string(&self) -> Result<&str, EvaluationError> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.wrong_kind(Kind::String)),
        }
    }

    ///
    /// Convert this value to another kind.
    ///
    /// Numbers and booleans convert freely between each other: floats are
    /// truncated toward zero (saturating at the `i64` range) and booleans map
    /// to `0`/`1`, with any nonzero number becoming `true`. NaN becomes `0`
    /// as an integer and, being nonzero, `true` as a boolean. Strings and
    /// undefined values only "convert" to their own kind.
    ///
    #[allow(clippy::missing_errors_doc)]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn cast_to(&self, kind: Kind) -> Result<Self, EvaluationError> {
        match (self, kind) {
            (value, kind) if value.kind() == kind => Ok(value.clone()),
            (Value::Integer(i), Kind::Float) => Ok(Value::Float(*i as f64)),
            (Value::Integer(i), Kind::Boolean) => Ok(Value::Boolean(*i != 0)),
            (Value::Float(f), Kind::Integer) => Ok(Value::Integer(libm::trunc(*f) as i64)),
            (Value::Float(f), Kind::Boolean) => Ok(Value::Boolean(*f != 0.0)),
            (Value::Boolean(b), Kind::Integer) => Ok(Value::Integer(i64::from(*b))),
            (Value::Boolean(b), Kind::Float) => Ok(Value::Float(f64::from(u8::from(*b)))),
            (value, kind) => Err(EvaluationError::InvalidCast {
                from: value.kind(),
                to: kind,
            }),
        }
    }

    ///
    /// The kind both operands of a binary operation are promoted to.
    ///
    /// Follows `undefined < boolean < integer < float`; strings only pair
    /// with strings.
    ///
    #[allow(clippy::missing_errors_doc)]
    pub fn top_type(a: Kind, b: Kind) -> Result<Kind, EvaluationError> {
        match (a.rank(), b.rank()) {
            (Some(ra), Some(rb)) => Ok(if ra >= rb { a } else { b }),
            (None, None) => Ok(Kind::String),
            _ => Err(EvaluationError::IncompatibleKinds { lhs: a, rhs: b }),
        }
    }

    fn promote(&self, rhs: &Self) -> Result<(Self, Self), EvaluationError> {
        let kind = Self::top_type(self.kind(), rhs.kind())?;
        Ok((self.cast_to(kind)?, rhs.cast_to(kind)?))
    }

    fn arithmetic(&self, rhs: &Self, op: Arithmetic) -> Result<Self, EvaluationError> {
        match self.promote(rhs)? {
            (Value::Integer(a), Value::Integer(b)) => op.integer(a, b).map(Value::Integer),
            (Value::Float(a), Value::Float(b)) => op.float(a, b).map(Value::Float),
            (lhs, _) => Err(EvaluationError::UnsupportedOperation {
                operation: op.name(),
                kind: lhs.kind(),
            }),
        }
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn checked_add(&self, rhs: &Self) -> Result<Self, EvaluationError> {
        self.arithmetic(rhs, Arithmetic::Add)
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn checked_sub(&self, rhs: &Self) -> Result<Self, EvaluationError> {
        self.arithmetic(rhs, Arithmetic::Sub)
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn checked_mul(&self, rhs: &Self) -> Result<Self, EvaluationError> {
        self.arithmetic(rhs, Arithmetic::Mul)
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn checked_div(&self, rhs: &Self) -> Result<Self, EvaluationError> {
        self.arithmetic(rhs, Arithmetic::Div)
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn checked_neg(&self) -> Result<Self, EvaluationError> {
        match self {
            Value::Integer(i) => i
                .checked_neg()
                .map(Value::Integer)
                .ok_or(EvaluationError::Overflow {
                    operation: "negation",
                }),
            Value::Float(f) => Ok(Value::Float(-f)),
            _ => Err(EvaluationError::UnsupportedOperation {
                operation: "negation",
                kind: self.kind(),
            }),
        }
    }

    fn compare_promoted(lhs: &Self, rhs: &Self) -> Result<Option<Ordering>, EvaluationError> {
        match (lhs, rhs) {
            (Value::Integer(a), Value::Integer(b)) => Ok(Some(a.cmp(b))),
            (Value::Float(a), Value::Float(b)) => Ok(a.partial_cmp(b)),
            (Value::Boolean(a), Value::Boolean(b)) => Ok(Some(a.cmp(b))),
            (Value::String(a), Value::String(b)) => Ok(Some(a.cmp(b))),
            _ => Err(EvaluationError::UnsupportedOperation {
                operation: "ordering",
                kind: lhs.kind(),
            }),
        }
    }

    ///
    /// Order two values after promotion.
    ///
    /// `None` means the values are unordered, which only happens for a NaN
    /// float.
    ///
    #[allow(clippy::missing_errors_doc)]
    pub fn compare(&self, rhs: &Self) -> Result<Option<Ordering>, EvaluationError> {
        let (lhs, rhs) = self.promote(rhs)?;
        Self::compare_promoted(&lhs, &rhs)
    }

    ///
    /// Equality after promotion. Two undefined values are equal.
    ///
    #[allow(clippy::missing_errors_doc)]
    pub fn equals(&self, rhs: &Self) -> Result<bool, EvaluationError> {
        match self.promote(rhs)? {
            (Value::Undefined, Value::Undefined) => Ok(true),
            (lhs, rhs) => Ok(Self::compare_promoted(&lhs, &rhs)? == Some(Ordering::Equal)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Kind, Value};
    use crate::error::EvaluationError;
    use core::cmp::Ordering;

    const KINDS: [Kind; 5] = [
        Kind::Undefined,
        Kind::Integer,
        Kind::Float,
        Kind::Boolean,
        Kind::String,
    ];

    fn samples() -> [Value; 5] {
        [
            Value::Undefined,
            Value::Integer(-42),
            Value::Float(2.75),
            Value::Boolean(true),
            Value::from("text"),
        ]
    }

    #[test]
    fn top_type_commutes() {
        for a in KINDS {
            for b in KINDS {
                assert_eq!(Value::top_type(a, b), Value::top_type(b, a));
            }
        }
    }

    #[test]
    fn top_type_order() {
        assert_eq!(Value::top_type(Kind::Boolean, Kind::Integer), Ok(Kind::Integer));
        assert_eq!(Value::top_type(Kind::Integer, Kind::Float), Ok(Kind::Float));
        assert_eq!(Value::top_type(Kind::Boolean, Kind::Float), Ok(Kind::Float));
        assert_eq!(Value::top_type(Kind::Undefined, Kind::Boolean), Ok(Kind::Boolean));
        assert_eq!(Value::top_type(Kind::String, Kind::String), Ok(Kind::String));
        assert_eq!(
            Value::top_type(Kind::String, Kind::Integer),
            Err(EvaluationError::IncompatibleKinds {
                lhs: Kind::String,
                rhs: Kind::Integer,
            })
        );
    }

    #[test]
    fn cast_is_idempotent() {
        for value in samples() {
            for kind in KINDS {
                if let Ok(once) = value.cast_to(kind) {
                    assert_eq!(once.kind(), kind);
                    assert_eq!(once.cast_to(kind), Ok(once.clone()));
                }
            }
        }
    }

    #[test]
    fn numeric_casts() {
        assert_eq!(Value::Float(2.9).cast_to(Kind::Integer), Ok(Value::Integer(2)));
        assert_eq!(Value::Float(-2.9).cast_to(Kind::Integer), Ok(Value::Integer(-2)));
        assert_eq!(Value::Integer(3).cast_to(Kind::Float), Ok(Value::Float(3.0)));
        assert_eq!(Value::Boolean(true).cast_to(Kind::Integer), Ok(Value::Integer(1)));
        assert_eq!(Value::Boolean(false).cast_to(Kind::Float), Ok(Value::Float(0.0)));
        assert_eq!(Value::Integer(-5).cast_to(Kind::Boolean), Ok(Value::Boolean(true)));
        assert_eq!(Value::Integer(0).cast_to(Kind::Boolean), Ok(Value::Boolean(false)));
        assert_eq!(Value::Float(f64::MAX).cast_to(Kind::Integer), Ok(Value::Integer(i64::MAX)));
        assert_eq!(Value::Float(f64::MIN).cast_to(Kind::Integer), Ok(Value::Integer(i64::MIN)));
        assert_eq!(
            Value::Float(f64::NEG_INFINITY).cast_to(Kind::Integer),
            Ok(Value::Integer(i64::MIN))
        );
    }

    #[test]
    fn nan_casts() {
        let nan = Value::Float(f64::NAN);

        assert_eq!(nan.cast_to(Kind::Integer), Ok(Value::Integer(0)));
        assert_eq!(nan.cast_to(Kind::Boolean), Ok(Value::Boolean(true)));
    }

    #[test]
    fn string_and_undefined_casts_fail() {
        assert_eq!(
            Value::from("1").cast_to(Kind::Boolean),
            Err(EvaluationError::InvalidCast {
                from: Kind::String,
                to: Kind::Boolean,
            })
        );
        assert!(Value::Integer(1).cast_to(Kind::String).is_err());
        assert!(Value::Undefined.cast_to(Kind::Integer).is_err());
        assert!(Value::Integer(0).cast_to(Kind::Undefined).is_err());
    }

    #[test]
    fn accessors_check_kind() {
        for value in samples() {
            assert_eq!(value.get_integer().is_ok(), value.kind() == Kind::Integer);
            assert_eq!(value.get_float().is_ok(), value.kind() == Kind::Float);
            assert_eq!(value.get_boolean().is_ok(), value.kind() == Kind::Boolean);
            assert_eq!(value.get_string().is_ok(), value.kind() == Kind::String);
        }

        assert_eq!(
            Value::Integer(1).get_string(),
            Err(EvaluationError::WrongKind {
                expected: Kind::String,
                found: Kind::Integer,
            })
        );
    }

    #[test]
    fn integer_division_truncates() {
        let div = |a: i64, b: i64| Value::Integer(a).checked_div(&Value::Integer(b));

        assert_eq!(div(7, 2), Ok(Value::Integer(3)));
        assert_eq!(div(-7, 2), Ok(Value::Integer(-3)));
        assert_eq!(div(7, -2), Ok(Value::Integer(-3)));
    }

    #[test]
    fn division_by_zero() {
        let zeros = [
            Value::Integer(0),
            Value::Float(0.0),
            Value::Float(-0.0),
            Value::Boolean(false),
        ];

        for zero in &zeros {
            assert_eq!(
                Value::Integer(1).checked_div(zero),
                Err(EvaluationError::DivisionByZero)
            );
            assert_eq!(
                Value::Float(1.5).checked_div(zero),
                Err(EvaluationError::DivisionByZero)
            );
        }
    }

    #[test]
    fn promotion_sets_result_kind() {
        let one = Value::Integer(1);

        assert_eq!(one.checked_add(&Value::Boolean(true)), Ok(Value::Integer(2)));
        assert_eq!(one.checked_add(&Value::Float(0.5)), Ok(Value::Float(1.5)));
        assert_eq!(Value::Integer(3).checked_mul(&Value::Float(0.5)), Ok(Value::Float(1.5)));
        assert_eq!(Value::Float(7.0).checked_div(&Value::Integer(2)), Ok(Value::Float(3.5)));
    }

    #[test]
    fn unsupported_arithmetic() {
        assert_eq!(
            Value::from("a").checked_add(&Value::from("b")),
            Err(EvaluationError::UnsupportedOperation {
                operation: "addition",
                kind: Kind::String,
            })
        );
        assert!(Value::Boolean(true).checked_add(&Value::Boolean(true)).is_err());
        assert!(Value::Undefined.checked_sub(&Value::Undefined).is_err());
        assert!(Value::Integer(2).checked_add(&Value::from("3")).is_err());
    }

    #[test]
    fn integer_overflow() {
        assert_eq!(
            Value::Integer(i64::MAX).checked_add(&Value::Integer(1)),
            Err(EvaluationError::Overflow {
                operation: "addition",
            })
        );
        assert!(Value::Integer(i64::MIN).checked_div(&Value::Integer(-1)).is_err());
        assert!(Value::Integer(i64::MIN).checked_neg().is_err());
    }

    #[test]
    fn negation() {
        assert_eq!(Value::Integer(4).checked_neg(), Ok(Value::Integer(-4)));
        assert_eq!(Value::Float(1.5).checked_neg(), Ok(Value::Float(-1.5)));
        assert!(Value::Boolean(true).checked_neg().is_err());
    }

    #[test]
    fn comparisons() {
        assert_eq!(
            Value::Integer(2).compare(&Value::Float(2.5)),
            Ok(Some(Ordering::Less))
        );
        assert_eq!(
            Value::Boolean(false).compare(&Value::Boolean(true)),
            Ok(Some(Ordering::Less))
        );
        assert_eq!(
            Value::from("apple").compare(&Value::from("banana")),
            Ok(Some(Ordering::Less))
        );
        assert_eq!(Value::Float(f64::NAN).compare(&Value::Float(1.0)), Ok(None));
        assert!(Value::from("1").compare(&Value::Integer(1)).is_err());
        assert!(Value::Undefined.compare(&Value::Undefined).is_err());
    }

    #[test]
    fn equality() {
        assert_eq!(Value::Integer(1).equals(&Value::Float(1.0)), Ok(true));
        assert_eq!(Value::Integer(1).equals(&Value::Boolean(true)), Ok(true));
        assert_eq!(Value::from("a").equals(&Value::from("a")), Ok(true));
        assert_eq!(Value::Undefined.equals(&Value::Undefined), Ok(true));
        assert_eq!(Value::Float(f64::NAN).equals(&Value::Float(f64::NAN)), Ok(false));
        assert!(Value::Undefined.equals(&Value::Integer(0)).is_err());
        assert!(Value::from("0").equals(&Value::Integer(0)).is_err());
    }

    #[test]
    fn display() {
        use alloc::string::ToString;

        assert_eq!(Value::Integer(-3).to_string(), "-3");
        assert_eq!(Value::Float(3.0).to_string(), "3.0");
        assert_eq!(Value::from("hi").to_string(), "hi");
        assert_eq!(Value::Undefined.to_string(), "undefined");
    }
}
