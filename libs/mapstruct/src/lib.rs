//! Structural value mapper.
//!
//! Copies a source record into a destination record of a possibly different
//! shape, field by field and by name, converting between kinds where the
//! shapes diverge.
//!
//! ```ignore
//! #[derive(mapstruct::Record, Default)]
//! struct Input { id: String, tags: Vec<String> }
//!
//! #[derive(mapstruct::Record, Default)]
//! struct Output { id: u64, tags: Vec<u32> }
//!
//! let mut out = Output::default();
//! let report = mapstruct::map(&input, &mut out)?;
//! ```

extern crate self as mapstruct;

pub mod config;
pub mod dynamic;
pub mod engine;
pub mod error;
pub mod kind;
pub mod record;
pub mod report;
mod scalar;
mod sequence;
pub mod value;

pub use config::{MapOptions, NegativePolicy, SequenceMode};
pub use dynamic::Dynamic;
pub use engine::{map, Mapper};
pub use error::MapError;
pub use kind::{FloatWidth, IntWidth, Kind, RecordType};
pub use mapstruct_derive::Record;
pub use record::{FieldDescriptor, Mappable, Record};
pub use report::{MapReport, Skip, SkipReason};
pub use value::{FieldEntry, RecordValue, Value};
