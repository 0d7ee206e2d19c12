/// A value whose concrete kind is erased until mapping time.
///
/// Fields typed `Dynamic` play the role of "any". Only the variants below
/// exist; `Bool` and `Null` are carried but have no numeric meaning.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Dynamic {
    Int(i64),
    UInt(u64),
    Float32(f32),
    Float64(f64),
    Str(String),
    Bool(bool),
    #[default]
    Null,
}

impl Dynamic {
    pub fn is_null(&self) -> bool {
        matches!(self, Dynamic::Null)
    }
}

macro_rules! impl_from {
    ($variant:ident: $($ty:ty),+ => $target:ty) => {
        $(
            impl From<$ty> for Dynamic {
                fn from(v: $ty) -> Self {
                    Dynamic::$variant(<$target>::from(v))
                }
            }
        )+
    };
}

impl_from!(Int: i8, i16, i32, i64 => i64);
impl_from!(UInt: u8, u16, u32, u64 => u64);

impl From<f32> for Dynamic {
    fn from(v: f32) -> Self {
        Dynamic::Float32(v)
    }
}

impl From<f64> for Dynamic {
    fn from(v: f64) -> Self {
        Dynamic::Float64(v)
    }
}

impl From<bool> for Dynamic {
    fn from(v: bool) -> Self {
        Dynamic::Bool(v)
    }
}

impl From<&str> for Dynamic {
    fn from(v: &str) -> Self {
        Dynamic::Str(v.to_string())
    }
}

impl From<String> for Dynamic {
    fn from(v: String) -> Self {
        Dynamic::Str(v)
    }
}

/// JSON scalars map onto the matching variant; arrays and objects have no
/// scalar meaning and become `Null`.
impl From<serde_json::Value> for Dynamic {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Bool(b) => Dynamic::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Dynamic::UInt(u)
                } else if let Some(i) = n.as_i64() {
                    Dynamic::Int(i)
                } else {
                    n.as_f64().map_or(Dynamic::Null, Dynamic::Float64)
                }
            }
            serde_json::Value::String(s) => Dynamic::Str(s),
            serde_json::Value::Null
            | serde_json::Value::Array(_)
            | serde_json::Value::Object(_) => Dynamic::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_numbers_pick_narrowest_variant() {
        assert_eq!(Dynamic::from(serde_json::json!(7)), Dynamic::UInt(7));
        assert_eq!(Dynamic::from(serde_json::json!(-7)), Dynamic::Int(-7));
        assert_eq!(Dynamic::from(serde_json::json!(2.5)), Dynamic::Float64(2.5));
    }

    #[test]
    fn json_containers_are_null() {
        assert!(Dynamic::from(serde_json::json!([1, 2])).is_null());
        assert!(Dynamic::from(serde_json::json!({ "a": 1 })).is_null());
        assert_eq!(Dynamic::from(serde_json::json!("x")), Dynamic::Str("x".into()));
    }

    #[test]
    fn primitives_convert() {
        assert_eq!(Dynamic::from(3i16), Dynamic::Int(3));
        assert_eq!(Dynamic::from(3u8), Dynamic::UInt(3));
        assert_eq!(Dynamic::from(true), Dynamic::Bool(true));
    }
}
