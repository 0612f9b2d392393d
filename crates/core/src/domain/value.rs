// Task values and argument sets
// A task is called with a slice of positional values; scalars and tuples dispatch the same way.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single task argument or result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view of the value (integers widen to f64)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(x) => Some(*x),
            Value::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Floats render as shortest round-trip decimals. Whole floats keep a trailing
/// `.0`, and exponents below -4 or from 16 up switch to `1e-05` / `1e+16` form.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => f.write_str(&render_float(*x)),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

fn render_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{:e}", x);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if x != 0.0 && !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    } else if x.fract() == 0.0 {
        format!("{:.1}", x)
    } else {
        x.to_string()
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

/// Parses integers first, then floats; anything else becomes a string
impl FromStr for Value {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return Ok(Value::Int(n));
        }
        if let Ok(x) = trimmed.parse::<f64>() {
            return Ok(Value::Float(x));
        }
        Ok(Value::Str(trimmed.to_string()))
    }
}

/// One argument set: a scalar passed as the sole argument, or a tuple unpacked positionally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskArgs {
    Tuple(Vec<Value>),
    Single(Value),
}

impl TaskArgs {
    pub fn int(n: i64) -> Self {
        TaskArgs::Single(Value::Int(n))
    }

    pub fn float(x: f64) -> Self {
        TaskArgs::Single(Value::Float(x))
    }

    pub fn tuple(values: impl IntoIterator<Item = Value>) -> Self {
        TaskArgs::Tuple(values.into_iter().collect())
    }

    /// Build a list of scalar integer argument sets
    pub fn ints(values: impl IntoIterator<Item = i64>) -> Vec<TaskArgs> {
        values.into_iter().map(TaskArgs::int).collect()
    }

    /// Build a list of scalar float argument sets
    pub fn floats(values: impl IntoIterator<Item = f64>) -> Vec<TaskArgs> {
        values.into_iter().map(TaskArgs::float).collect()
    }

    /// Positional arguments for the call
    pub fn as_slice(&self) -> &[Value] {
        match self {
            TaskArgs::Tuple(values) => values,
            TaskArgs::Single(value) => std::slice::from_ref(value),
        }
    }
}

impl From<Value> for TaskArgs {
    fn from(value: Value) -> Self {
        TaskArgs::Single(value)
    }
}
