use std::fmt;

use crate::record::Record;
use crate::value::RecordValue;

/// Bit width of an integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
    /// `isize` / `usize`.
    Size,
}

impl IntWidth {
    pub fn bits(self) -> u32 {
        match self {
            IntWidth::W8 => 8,
            IntWidth::W16 => 16,
            IntWidth::W32 => 32,
            IntWidth::W64 => 64,
            IntWidth::Size => usize::BITS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    F32,
    F64,
}

/// Identity of a record type plus a constructor for a fresh default instance.
///
/// Two record types are the same kind when their type names match.
#[derive(Clone, Copy)]
pub struct RecordType {
    name: &'static str,
    new: fn() -> RecordValue,
}

impl RecordType {
    pub fn of<T: Record>() -> Self {
        Self {
            name: std::any::type_name::<T>(),
            new: fresh::<T>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Materialize `T::default()` as a record value.
    pub fn instantiate(&self) -> RecordValue {
        (self.new)()
    }
}

fn fresh<T: Record>() -> RecordValue {
    T::default().to_record()
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for RecordType {}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordType").field(&self.name).finish()
    }
}

/// Type tag of a field.
///
/// Two fields have the "same type" when their kinds compare equal, which is
/// what decides between a verbatim copy and a coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    Int(IntWidth),
    UInt(IntWidth),
    Float(FloatWidth),
    String,
    Bool,
    /// Boxed value whose concrete kind is only known at runtime.
    Dynamic,
    Record(RecordType),
    Sequence(Box<Kind>),
    Optional(Box<Kind>),
}

impl Kind {
    pub fn is_record(&self) -> bool {
        matches!(self, Kind::Record(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Kind::Sequence(_))
    }

    /// Element kind of a sequence.
    pub fn element(&self) -> Option<&Kind> {
        match self {
            Kind::Sequence(element) => Some(element),
            _ => None,
        }
    }

    /// Kind behind every optional layer.
    pub fn innermost(&self) -> &Kind {
        match self {
            Kind::Optional(inner) => inner.innermost(),
            other => other,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Int(IntWidth::Size) => f.write_str("isize"),
            Kind::Int(w) => write!(f, "i{}", w.bits()),
            Kind::UInt(IntWidth::Size) => f.write_str("usize"),
            Kind::UInt(w) => write!(f, "u{}", w.bits()),
            Kind::Float(FloatWidth::F32) => f.write_str("f32"),
            Kind::Float(FloatWidth::F64) => f.write_str("f64"),
            Kind::String => f.write_str("String"),
            Kind::Bool => f.write_str("bool"),
            Kind::Dynamic => f.write_str("Dynamic"),
            Kind::Record(ty) => f.write_str(ty.name()),
            Kind::Sequence(element) => write!(f, "Vec<{element}>"),
            Kind::Optional(inner) => write!(f, "Option<{inner}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        assert_eq!(Kind::Int(IntWidth::W32).to_string(), "i32");
        assert_eq!(Kind::UInt(IntWidth::Size).to_string(), "usize");
        assert_eq!(
            Kind::Sequence(Box::new(Kind::Optional(Box::new(Kind::Float(FloatWidth::F32))))).to_string(),
            "Vec<Option<f32>>"
        );
    }

    #[test]
    fn innermost_unwraps_every_layer() {
        let kind = Kind::Optional(Box::new(Kind::Optional(Box::new(Kind::String))));
        assert_eq!(kind.innermost(), &Kind::String);
        assert_eq!(Kind::Bool.innermost(), &Kind::Bool);
    }

    #[test]
    fn widths_differ_by_kind() {
        assert_ne!(Kind::UInt(IntWidth::W8), Kind::UInt(IntWidth::W16));
        assert_ne!(Kind::Int(IntWidth::W64), Kind::UInt(IntWidth::W64));
    }
}
