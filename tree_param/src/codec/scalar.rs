//! Scalar rules: booleans, integers, floating point, characters and strings.
//!
//! Numbers are parsed from the whole scalar text; trailing garbage is an
//! error, as is a value that does not fit the target width.

use std::borrow::Cow;
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

use crate::error::{TraceError, TraceResult};
use crate::node::{Node, expect_scalar};

use super::{FromNode, ToNode};

fn scalar_text(node: &Node) -> TraceResult<&str> {
    expect_scalar(node)?;
    Ok(node.as_scalar().unwrap_or_default())
}

fn parse_integer<T>(text: &str, label: &str) -> TraceResult<T>
where
    T: FromStr<Err = ParseIntError>,
{
    let invalid = || TraceError::new(format!("invalid integer value: {text}"));
    text.parse::<T>()
        .or_else(|err| match (err.kind(), negative_digits(text)) {
            (IntErrorKind::PosOverflow | IntErrorKind::NegOverflow, _) => {
                Err(out_of_range(text, label))
            }
            // `-0` for an unsigned target.
            (IntErrorKind::InvalidDigit, Some(digits)) if digits.bytes().all(|b| b == b'0') => {
                "0".parse::<T>().map_err(|_| invalid())
            }
            // A well-formed negative number for an unsigned target.
            (IntErrorKind::InvalidDigit, Some(_)) => Err(out_of_range(text, label)),
            _ => Err(invalid()),
        })
}

/// Digits of a well-formed negative integer, without the sign.
fn negative_digits(text: &str) -> Option<&str> {
    text.strip_prefix('-')
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

fn out_of_range(text: &str, label: &str) -> TraceError {
    TraceError::new(format!("value out of range for {label}: {text}"))
}

macro_rules! integer_codec {
    ($($ty:ident),* $(,)?) => {$(
        impl FromNode for $ty {
            fn from_node(node: &Node) -> TraceResult<Self> {
                parse_integer(scalar_text(node)?, stringify!($ty))
            }

            fn type_label() -> Cow<'static, str> {
                Cow::Borrowed(stringify!($ty))
            }
        }

        impl ToNode for $ty {
            fn to_node(&self) -> Node {
                Node::scalar(self.to_string())
            }
        }
    )*};
}

integer_codec!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
);

enum SpecialFloat {
    Infinity,
    NegInfinity,
    NaN,
}

fn special_float(text: &str) -> Option<SpecialFloat> {
    match text {
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => Some(SpecialFloat::Infinity),
        "-.inf" | "-.Inf" | "-.INF" => Some(SpecialFloat::NegInfinity),
        ".nan" | ".NaN" | ".NAN" => Some(SpecialFloat::NaN),
        _ => None,
    }
}

fn looks_non_finite(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    lower.contains("inf") || lower.contains("nan")
}

macro_rules! float_codec {
    ($($ty:ident),* $(,)?) => {$(
        impl FromNode for $ty {
            fn from_node(node: &Node) -> TraceResult<Self> {
                let text = scalar_text(node)?;
                match special_float(text) {
                    Some(SpecialFloat::Infinity) => return Ok($ty::INFINITY),
                    Some(SpecialFloat::NegInfinity) => return Ok($ty::NEG_INFINITY),
                    Some(SpecialFloat::NaN) => return Ok($ty::NAN),
                    None => {}
                }
                if looks_non_finite(text) {
                    return Err(TraceError::new(format!("invalid floating point value: {text}")));
                }
                let value: $ty = text.parse().map_err(|_| {
                    TraceError::new(format!("invalid floating point value: {text}"))
                })?;
                if value.is_infinite() {
                    return Err(out_of_range(text, stringify!($ty)));
                }
                Ok(value)
            }

            fn type_label() -> Cow<'static, str> {
                Cow::Borrowed(stringify!($ty))
            }
        }

        impl ToNode for $ty {
            fn to_node(&self) -> Node {
                if self.is_nan() {
                    Node::scalar(".nan")
                } else if self.is_infinite() {
                    Node::scalar(if self.is_sign_positive() { ".inf" } else { "-.inf" })
                } else {
                    Node::scalar(self.to_string())
                }
            }
        }
    )*};
}

float_codec!(f32, f64);

impl FromNode for bool {
    fn from_node(node: &Node) -> TraceResult<Self> {
        let text = scalar_text(node)?;
        match text.to_ascii_lowercase().as_str() {
            "y" | "yes" | "true" | "on" | "1" => Ok(true),
            "n" | "no" | "false" | "off" | "0" => Ok(false),
            _ => Err(TraceError::new(format!("invalid boolean value: {text}"))),
        }
    }

    fn type_label() -> Cow<'static, str> {
        Cow::Borrowed("bool")
    }
}

impl ToNode for bool {
    fn to_node(&self) -> Node {
        Node::scalar(if *self { "true" } else { "false" })
    }
}

impl FromNode for char {
    fn from_node(node: &Node) -> TraceResult<Self> {
        let text = scalar_text(node)?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Ok(ch),
            _ => Err(TraceError::new(format!(
                "invalid character value, expected exactly one character: {text}"
            ))),
        }
    }

    fn type_label() -> Cow<'static, str> {
        Cow::Borrowed("char")
    }
}

impl ToNode for char {
    fn to_node(&self) -> Node {
        Node::scalar(self.to_string())
    }
}

impl FromNode for String {
    fn from_node(node: &Node) -> TraceResult<Self> {
        scalar_text(node).map(str::to_owned)
    }

    fn type_label() -> Cow<'static, str> {
        Cow::Borrowed("string")
    }
}

impl ToNode for String {
    fn to_node(&self) -> Node {
        Node::scalar(self.as_str())
    }
}

impl ToNode for str {
    fn to_node(&self) -> Node {
        Node::scalar(self)
    }
}
