use std::fmt;

use serde::{Deserialize, Serialize};

/// A loosely-typed JSON scalar.
///
/// The backend is inconsistent about ids, episode counts and release years:
/// the same field may arrive as `12`, `12.0` or `"12"`. Render helpers only
/// ever need the display form and whether the value counts as present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Zero, NaN and the empty string are treated as absent.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Int(n) => *n != 0,
            Self::Float(f) => *f != 0.0 && !f.is_nan(),
            Self::Text(s) => !s.is_empty(),
        }
    }

    /// Filter an optional scalar down to a present one.
    pub fn present(value: Option<&Scalar>) -> Option<&Scalar> {
        value.filter(|v| v.is_present())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) if x.fract() == 0.0 && x.is_finite() => write!(f, "{}", *x as i64),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}
