//! Conversions between primitive kinds.
//!
//! | Destination  | Accepted sources                                   |
//! | ------------ | -------------------------------------------------- |
//! | `String`     | signed, unsigned, float                            |
//! | signed int   | string (`.000` suffix and `,` removed)             |
//! | unsigned int | string (`,` removed, float-truncated), `Dynamic`   |
//! | float        | string (`,` removed)                               |
//!
//! Numeric strings use `.` as decimal point and `,` as grouping separator.

use crate::config::NegativePolicy;
use crate::dynamic::Dynamic;
use crate::kind::{FloatWidth, IntWidth, Kind};
use crate::report::SkipReason;
use crate::value::Value;

/// Convert `from` into a value of kind `to`. Optionals are already unwrapped.
pub(crate) fn coerce(
    from_kind: &Kind,
    from: &Value,
    to: &Kind,
    negative: NegativePolicy,
) -> Result<Value, SkipReason> {
    let unsupported = || SkipReason::Unsupported {
        from: from_kind.clone(),
        to: to.clone(),
    };

    match to {
        Kind::String => format_number(from).map(Value::String).ok_or_else(unsupported),
        Kind::Int(width) => match from {
            Value::String(s) => parse_signed(s, *width),
            _ => Err(unsupported()),
        },
        Kind::UInt(width) => match from {
            Value::String(s) => parse_unsigned(s, *width),
            Value::Dynamic(d) => dynamic_unsigned(d, *width, negative),
            _ => Err(unsupported()),
        },
        Kind::Float(width) => match from {
            Value::String(s) => parse_float(s, *width),
            _ => Err(unsupported()),
        },
        _ => Err(unsupported()),
    }
}

/// Decimal text of a numeric value. Floats use the shortest representation
/// that round-trips at their own width, never exponent notation: `0.1f32` is
/// `"0.1"`, not the f64-widened `"0.10000000149011612"`. Infinity is `"inf"`.
fn format_number(value: &Value) -> Option<String> {
    match value {
        Value::F32(v) => Some(v.to_string()),
        Value::F64(v) => Some(v.to_string()),
        other => other
            .as_signed()
            .map(|v| v.to_string())
            .or_else(|| other.as_unsigned().map(|v| v.to_string())),
    }
}

/// `"42.000"` → `"42"`. A bare trailing `.` is kept.
fn trim_zero_fraction(s: &str) -> &str {
    match s.rfind('.') {
        Some(dot) => {
            let fraction = &s[dot + 1..];
            if !fraction.is_empty() && fraction.bytes().all(|b| b == b'0') {
                &s[..dot]
            } else {
                s
            }
        }
        None => s,
    }
}

fn strip_grouping(s: &str) -> String {
    s.replace(',', "")
}

fn parse_signed(input: &str, width: IntWidth) -> Result<Value, SkipReason> {
    let target = Kind::Int(width);
    let cleaned = strip_grouping(trim_zero_fraction(input));
    let parsed: i64 = cleaned.parse().map_err(|_| SkipReason::ParseFailed {
        input: input.to_string(),
        target: target.clone(),
    })?;
    Value::signed(width, parsed).ok_or(SkipReason::OutOfRange { target })
}

fn parse_unsigned(input: &str, width: IntWidth) -> Result<Value, SkipReason> {
    let parsed: f64 = strip_grouping(input).parse().map_err(|_| SkipReason::ParseFailed {
        input: input.to_string(),
        target: Kind::UInt(width),
    })?;
    truncate_unsigned(parsed, width)
}

/// Truncate toward zero. Values that land outside `width` are rejected.
fn truncate_unsigned(v: f64, width: IntWidth) -> Result<Value, SkipReason> {
    let out_of_range = || SkipReason::OutOfRange {
        target: Kind::UInt(width),
    };
    let truncated = v.trunc();
    // 2^64 is exactly representable; anything at or above it overflows u64.
    if !truncated.is_finite() || truncated < 0.0 || truncated >= 18_446_744_073_709_551_616.0 {
        return Err(out_of_range());
    }
    Value::unsigned(width, truncated as u64).ok_or_else(out_of_range)
}

fn parse_float(input: &str, width: FloatWidth) -> Result<Value, SkipReason> {
    let cleaned = strip_grouping(input);
    let target = Kind::Float(width);
    let parsed = match width {
        FloatWidth::F32 => cleaned.parse::<f32>().map(|v| (f64::from(v), Value::F32(v))),
        FloatWidth::F64 => cleaned.parse::<f64>().map(|v| (v, Value::F64(v))),
    };
    let (raw, value) = parsed.map_err(|_| SkipReason::ParseFailed {
        input: input.to_string(),
        target: target.clone(),
    })?;
    if overflowed(raw, &cleaned) {
        return Err(SkipReason::OutOfRange { target });
    }
    Ok(value)
}

/// Sequence element parse: plain `f32`, overflow counts as a failure.
pub(crate) fn parse_f32_element(s: &str) -> Option<Value> {
    let v = s.parse::<f32>().ok()?;
    (!overflowed(f64::from(v), s)).then_some(Value::F32(v))
}

/// A finite-looking literal that parsed to infinity exceeded the width.
fn overflowed(parsed: f64, input: &str) -> bool {
    parsed.is_infinite() && !spells_infinity(input)
}

fn spells_infinity(input: &str) -> bool {
    let unsigned = input.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Unsigned from a boxed value. Every variant produces a number: unparsable
/// strings and non-numeric variants yield 0.
fn dynamic_unsigned(
    value: &Dynamic,
    width: IntWidth,
    negative: NegativePolicy,
) -> Result<Value, SkipReason> {
    let widened = match value {
        Dynamic::Int(v) if *v < 0 => match negative {
            NegativePolicy::Saturate => 0,
            NegativePolicy::Reinterpret => *v as u64,
            NegativePolicy::Reject => return Err(SkipReason::NegativeDynamic { value: *v }),
        },
        Dynamic::Int(v) => *v as u64,
        Dynamic::UInt(v) => *v,
        Dynamic::Float32(v) => v.trunc() as u64,
        Dynamic::Float64(v) => v.trunc() as u64,
        Dynamic::Str(s) => s.parse::<f64>().map_or(0, |f| f.trunc() as u64),
        Dynamic::Bool(_) | Dynamic::Null => 0,
    };
    Value::unsigned(width, widened).ok_or(SkipReason::OutOfRange {
        target: Kind::UInt(width),
    })
}
