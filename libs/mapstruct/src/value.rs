use crate::dynamic::Dynamic;
use crate::kind::IntWidth;
use crate::record::FieldDescriptor;

/// Runtime value of a single field.
///
/// Mirrors `Kind`: one variant per primitive, plus recursive variants for
/// records, sequences and optionals. Element kinds of sequences live in the
/// field descriptor, not in the value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    ISize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    USize(usize),
    F32(f32),
    F64(f64),
    Bool(bool),
    String(String),
    Dynamic(Dynamic),

    Record(RecordValue),
    Sequence(Vec<Value>),
    Optional(Option<Box<Value>>),
}

impl Value {
    /// Signed integer family, widened to `i64`.
    pub fn as_signed(&self) -> Option<i64> {
        match *self {
            Value::I8(v) => Some(v.into()),
            Value::I16(v) => Some(v.into()),
            Value::I32(v) => Some(v.into()),
            Value::I64(v) => Some(v),
            Value::ISize(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Unsigned integer family, widened to `u64`.
    pub fn as_unsigned(&self) -> Option<u64> {
        match *self {
            Value::U8(v) => Some(v.into()),
            Value::U16(v) => Some(v.into()),
            Value::U32(v) => Some(v.into()),
            Value::U64(v) => Some(v),
            Value::USize(v) => u64::try_from(v).ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Build a signed integer of the given width. `None` if `v` does not fit.
    pub fn signed(width: IntWidth, v: i64) -> Option<Value> {
        match width {
            IntWidth::W8 => i8::try_from(v).ok().map(Value::I8),
            IntWidth::W16 => i16::try_from(v).ok().map(Value::I16),
            IntWidth::W32 => i32::try_from(v).ok().map(Value::I32),
            IntWidth::W64 => Some(Value::I64(v)),
            IntWidth::Size => isize::try_from(v).ok().map(Value::ISize),
        }
    }

    /// Build an unsigned integer of the given width. `None` if `v` does not fit.
    pub fn unsigned(width: IntWidth, v: u64) -> Option<Value> {
        match width {
            IntWidth::W8 => u8::try_from(v).ok().map(Value::U8),
            IntWidth::W16 => u16::try_from(v).ok().map(Value::U16),
            IntWidth::W32 => u32::try_from(v).ok().map(Value::U32),
            IntWidth::W64 => Some(Value::U64(v)),
            IntWidth::Size => usize::try_from(v).ok().map(Value::USize),
        }
    }
}

/// One field of a materialized record: its descriptor and current value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEntry {
    pub descriptor: FieldDescriptor,
    pub value: Value,
}

/// A record materialized as an ordered list of fields.
///
/// Field order follows declaration order of the record type.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValue {
    pub type_name: &'static str,
    pub fields: Vec<FieldEntry>,
}

impl RecordValue {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            fields: Vec::new(),
        }
    }

    pub fn push(&mut self, descriptor: FieldDescriptor, value: Value) {
        self.fields.push(FieldEntry { descriptor, value });
    }

    pub fn field(&self, name: &str) -> Option<&FieldEntry> {
        self.fields.iter().find(|e| e.descriptor.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FieldEntry> {
        self.fields.iter_mut().find(|e| e.descriptor.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.field(name).map(|e| &e.value)
    }
}
