//! Script result values and their canonical string form.

/// A value returned by the embedded script environment.
///
/// Engines convert whatever their native result is into one of these
/// variants. Anything that is not an integer, boolean or string is
/// [`ScriptValue::Absent`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScriptValue {
    /// No value (`undefined`, `null`, unsupported type, or a fault).
    #[default]
    Absent,
    /// Integral number.
    Integer(i64),
    /// Boolean.
    Boolean(bool),
    /// String.
    Text(String),
}

impl ScriptValue {
    /// Canonical string form: absent is `""`, integers are decimal digits,
    /// booleans are `"true"`/`"false"`, strings are passed through.
    pub fn into_canonical(self) -> String {
        match self {
            Self::Absent => String::new(),
            Self::Integer(n) => n.to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::Text(s) => s,
        }
    }

    /// Convert a number reported as a float.
    ///
    /// Script numbers are doubles, so whole values are accepted as integers.
    pub fn from_number(n: f64) -> Self {
        if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
            Self::Integer(n as i64)
        } else {
            Self::Absent
        }
    }
}

impl From<serde_json::Value> for ScriptValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Bool(b) => Self::Boolean(b),
            Value::String(s) => Self::Text(s),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => n.as_f64().map_or(Self::Absent, Self::from_number),
            },
            Value::Null | Value::Array(_) | Value::Object(_) => Self::Absent,
        }
    }
}

impl From<i64> for ScriptValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for ScriptValue {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<bool> for ScriptValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<&str> for ScriptValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for ScriptValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Parse a canonical result as an integer.
pub fn canonical_int(canonical: &str) -> Option<i64> {
    canonical.trim().parse().ok()
}

/// Parse a canonical result as a boolean. Only `"true"` is true.
pub fn canonical_bool(canonical: &str) -> bool {
    canonical == "true"
}
