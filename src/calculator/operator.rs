//! Binary operators and their floating-point semantics.

/// Binary operation applied while folding a precedence level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Operation {
    /// No operator selected. Evaluates to NaN.
    #[default]
    Unset,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl Operation {
    /// Apply the operation with IEEE-754 semantics. Never fails: division by
    /// zero gives an infinity or NaN, `Modulo` is the truncated remainder
    /// (result takes the sign of `left`) and `Power` follows `powf`.
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Subtract => left - right,
            Self::Multiply => left * right,
            Self::Divide => left / right,
            Self::Modulo => left % right,
            Self::Power => left.powf(right),
            Self::Unset => f64::NAN,
        }
    }
}
