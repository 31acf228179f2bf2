//! Conversions between field types and [`Value`] cells.
//!
//! Reading is lenient where a flat source loses type information: every scalar can become
//! a `String`, numbers and booleans parse from text, and an empty text cell reads as `None`
//! for optional fields whose inner type cannot hold it. Writing is exact, except for unsigned integers above `i64::MAX`
//! which are written as text so they survive a round trip.

use rowmap_domain::Value;
use std::borrow::Cow;

#[rowmap_derive::rowmap_error]
pub enum ConversionError {
    #[error("Type mismatch{}: expected {expected}, found {found}", format_context(.context))]
    Mismatch { expected: &'static str, found: &'static str, context: Option<Cow<'static, str>> },

    #[error("Parse error{}: `{input}` is not a valid {expected}", format_context(.context))]
    Parse { expected: &'static str, input: String, context: Option<Cow<'static, str>> },

    #[error("Out of range{}: {input} does not fit into {expected}", format_context(.context))]
    OutOfRange { expected: &'static str, input: String, context: Option<Cow<'static, str>> },
}

impl ConversionError {
    const fn mismatch(expected: &'static str, found: &Value) -> Self {
        Self::Mismatch { expected, found: found.kind(), context: None }
    }

    fn parse(expected: &'static str, input: impl Into<String>) -> Self {
        Self::Parse { expected, input: input.into(), context: None }
    }
}

/// Reads a field into a cell.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

/// Writes a cell into a field.
pub trait FromValue: Sized {
    /// # Errors
    /// Returns [`ConversionError`] when the cell cannot represent `Self`.
    fn from_value(value: Value) -> Result<Self, ConversionError>;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        Ok(value)
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Text(s) => Ok(s),
            Value::Null => Err(ConversionError::mismatch("string", &Value::Null)),
            other => Ok(other.to_string()),
        }
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Bool(b) => Ok(b),
            Value::Int(0) => Ok(false),
            Value::Int(1) => Ok(true),
            Value::Text(ref s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "1" => Ok(true),
                "false" | "no" | "n" | "0" => Ok(false),
                _ => Err(ConversionError::parse("bool", s.as_str())),
            },
            other => Err(ConversionError::mismatch("bool", &other)),
        }
    }
}

macro_rules! integer_conversions {
    ($($ty:ty),* $(,)?) => {$(
        impl ToValue for $ty {
            #[allow(clippy::unnecessary_fallible_conversions)]
            fn to_value(&self) -> Value {
                i64::try_from(*self).map_or_else(|_| Value::Text(self.to_string()), Value::Int)
            }
        }

        impl FromValue for $ty {
            #[allow(clippy::unnecessary_fallible_conversions)]
            fn from_value(value: Value) -> Result<Self, ConversionError> {
                match value {
                    Value::Int(i) => <$ty>::try_from(i).map_err(|_| ConversionError::OutOfRange {
                        expected: stringify!($ty),
                        input: i.to_string(),
                        context: None,
                    }),
                    // Whole floats print without a fraction, so they parse like integers.
                    Value::Float(x) => x
                        .to_string()
                        .parse()
                        .map_err(|_| ConversionError::parse(stringify!($ty), x.to_string())),
                    Value::Text(s) => {
                        s.trim().parse().map_err(|_| ConversionError::parse(stringify!($ty), s))
                    },
                    other => Err(ConversionError::mismatch(stringify!($ty), &other)),
                }
            }
        }
    )*};
}

integer_conversions!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl FromValue for f64 {
    #[allow(clippy::cast_precision_loss)]
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Float(x) => Ok(x),
            Value::Int(i) => Ok(i as Self),
            Value::Text(s) => s.trim().parse().map_err(|_| ConversionError::parse("f64", s)),
            other => Err(ConversionError::mismatch("f64", &other)),
        }
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl FromValue for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        f64::from_value(value).map(|x| x as Self)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Null => Ok(None),
            Value::Text(s) if s.is_empty() => Ok(T::from_value(Value::Text(s)).ok()),
            other => T::from_value(other).map(Some),
        }
    }
}
