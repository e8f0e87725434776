use crate::error::{Error, Result};

/// A parameter or response value in its generic form, as used by the
/// path-addressed accessors.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Float(f64),
    Int(i64),
    Bool(bool),
    Text(String),
    List(Vec<f64>),
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            _ => None,
        }
    }
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            Value::Int(0) => Some(false),
            Value::Int(1) => Some(true),
            _ => None,
        }
    }
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }
    pub fn as_list(&self) -> Option<&[f64]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Float(v) => f.write_str(&format_float(*v)),
            Value::Int(v) => write!(f, "{}", v),
            Value::Bool(v) => f.write_str(if *v { "1" } else { "0" }),
            Value::Text(v) => f.write_str(v),
            Value::List(v) => f.write_str(&format_list(v)),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}
impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}
impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}
impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}
impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}
impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}
impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Value::List(v)
    }
}
impl From<&[f64]> for Value {
    fn from(v: &[f64]) -> Self {
        Value::List(v.to_vec())
    }
}

/// Shortest round-trip form with a fractional part: `433000000.0`, `-16.5`,
/// `1.0e-9`.
pub fn format_float(v: f64) -> String {
    let text = format!("{:?}", v);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !mantissa.contains('.') => {
            format!("{}.0e{}", mantissa, exponent)
        }
        _ => text,
    }
}

pub fn format_list(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format_float(*v))
        .collect::<Vec<_>>()
        .join(",")
}

/// Conversion from a (trimmed) instrument response.
pub trait FromResponse: Sized {
    /// Shown in [`Error::Parse`] when the conversion fails.
    const EXPECTED: &'static str;
    fn from_response(response: &str) -> Option<Self>;
}

/// Parses the response to `command`, mapping failure to [`Error::Parse`].
pub fn parse<T: FromResponse>(command: &str, response: &str) -> Result<T> {
    T::from_response(response.trim()).ok_or_else(|| Error::Parse {
        command: command.to_string(),
        response: response.to_string(),
        expected: T::EXPECTED,
    })
}

impl FromResponse for f64 {
    const EXPECTED: &'static str = "number";
    fn from_response(response: &str) -> Option<Self> {
        response.trim().parse().ok()
    }
}

impl FromResponse for i64 {
    const EXPECTED: &'static str = "integer";
    fn from_response(response: &str) -> Option<Self> {
        let response = response.trim();
        response.parse().ok().or_else(|| {
            let v: f64 = response.parse().ok()?;
            (v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64).then(|| v as i64)
        })
    }
}

impl FromResponse for u32 {
    const EXPECTED: &'static str = "unsigned integer";
    fn from_response(response: &str) -> Option<Self> {
        i64::from_response(response).and_then(|v| u32::try_from(v).ok())
    }
}

impl FromResponse for bool {
    const EXPECTED: &'static str = "boolean (1/0/ON/OFF)";
    fn from_response(response: &str) -> Option<Self> {
        match response.trim().to_ascii_uppercase().as_str() {
            "1" | "+1" | "ON" => Some(true),
            "0" | "+0" | "OFF" => Some(false),
            _ => None,
        }
    }
}

impl FromResponse for String {
    const EXPECTED: &'static str = "text";
    fn from_response(response: &str) -> Option<Self> {
        let response = response.trim();
        let unquoted = response
            .strip_prefix('"')
            .and_then(|r| r.strip_suffix('"'))
            .unwrap_or(response);
        Some(unquoted.to_string())
    }
}

impl FromResponse for Vec<f64> {
    const EXPECTED: &'static str = "comma-separated numbers";
    fn from_response(response: &str) -> Option<Self> {
        let response = response.trim();
        if response.is_empty() {
            return Some(Vec::new());
        }
        response
            .split(',')
            .map(|item| item.trim().parse().ok())
            .collect()
    }
}
