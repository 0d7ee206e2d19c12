use crate::dynamic::Dynamic;
use crate::kind::{FloatWidth, IntWidth, Kind};
use crate::value::{RecordValue, Value};

/// Description of one member of a record shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: Kind,
    /// `false` for `#[map(readonly)]` fields: the mapper never writes them.
    pub settable: bool,
}

impl FieldDescriptor {
    pub fn new(name: &'static str, kind: Kind, settable: bool) -> Self {
        Self {
            name,
            kind,
            settable,
        }
    }
}

/// A type that can live in a record field.
///
/// `from_value` returns `None` when the value does not have this type's kind.
pub trait Mappable: Sized {
    fn kind() -> Kind;
    fn to_value(&self) -> Value;
    fn from_value(value: Value) -> Option<Self>;
}

/// A record shape the mapper can introspect.
///
/// Implemented by `#[derive(Record)]`. `Default` provides the fresh instance
/// nested records are built from.
pub trait Record: Mappable + Default {
    /// Field descriptors in declaration order.
    fn shape() -> Vec<FieldDescriptor>;

    fn to_record(&self) -> RecordValue;

    /// Write back every described field whose value has the field's kind.
    fn apply_record(&mut self, record: RecordValue);
}

macro_rules! impl_scalar {
    ($($ty:ty => $variant:ident, $kind:expr;)+) => {
        $(
            impl Mappable for $ty {
                fn kind() -> Kind {
                    $kind
                }

                fn to_value(&self) -> Value {
                    Value::$variant(self.clone())
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )+
    };
}

impl_scalar! {
    i8 => I8, Kind::Int(IntWidth::W8);
    i16 => I16, Kind::Int(IntWidth::W16);
    i32 => I32, Kind::Int(IntWidth::W32);
    i64 => I64, Kind::Int(IntWidth::W64);
    isize => ISize, Kind::Int(IntWidth::Size);
    u8 => U8, Kind::UInt(IntWidth::W8);
    u16 => U16, Kind::UInt(IntWidth::W16);
    u32 => U32, Kind::UInt(IntWidth::W32);
    u64 => U64, Kind::UInt(IntWidth::W64);
    usize => USize, Kind::UInt(IntWidth::Size);
    f32 => F32, Kind::Float(FloatWidth::F32);
    f64 => F64, Kind::Float(FloatWidth::F64);
    bool => Bool, Kind::Bool;
    String => String, Kind::String;
    Dynamic => Dynamic, Kind::Dynamic;
}

impl<T: Mappable> Mappable for Vec<T> {
    fn kind() -> Kind {
        Kind::Sequence(Box::new(T::kind()))
    }

    fn to_value(&self) -> Value {
        Value::Sequence(self.iter().map(T::to_value).collect())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Sequence(items) => items.into_iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}

impl<T: Mappable> Mappable for Option<T> {
    fn kind() -> Kind {
        Kind::Optional(Box::new(T::kind()))
    }

    fn to_value(&self) -> Value {
        Value::Optional(self.as_ref().map(|v| Box::new(v.to_value())))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Optional(None) => Some(None),
            Value::Optional(Some(inner)) => T::from_value(*inner).map(Some),
            _ => None,
        }
    }
}

/// Boxes are transparent: a `Box<T>` field has the kind of `T`.
impl<T: Mappable> Mappable for Box<T> {
    fn kind() -> Kind {
        T::kind()
    }

    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn from_value(value: Value) -> Option<Self> {
        T::from_value(value).map(Box::new)
    }
}
