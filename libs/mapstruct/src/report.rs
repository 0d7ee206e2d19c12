use std::fmt;

use crate::kind::Kind;

/// Why a field or sequence element was not transferred.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Destination has no field with this name.
    MissingField,
    /// Destination field is read-only.
    NotSettable,
    /// An optional layer on either side was `None`.
    NullOptional,
    ParseFailed { input: String, target: Kind },
    OutOfRange { target: Kind },
    /// Negative signed dynamic value rejected by `NegativePolicy::Reject`.
    NegativeDynamic { value: i64 },
    /// Sequence element that failed to convert and was left out.
    DroppedElement { index: usize, input: String },
    /// No rule for this kind pair.
    Unsupported { from: Kind, to: Kind },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingField => f.write_str("no destination field"),
            SkipReason::NotSettable => f.write_str("destination field is read-only"),
            SkipReason::NullOptional => f.write_str("optional value is None"),
            SkipReason::ParseFailed { input, target } => {
                write!(f, "cannot parse {input:?} as {target}")
            }
            SkipReason::OutOfRange { target } => write!(f, "value out of range for {target}"),
            SkipReason::NegativeDynamic { value } => {
                write!(f, "negative value {value} for unsigned field")
            }
            SkipReason::DroppedElement { index, input } => {
                write!(f, "element {index} ({input:?}) dropped")
            }
            SkipReason::Unsupported { from, to } => write!(f, "no conversion from {from} to {to}"),
        }
    }
}

/// A skipped field, addressed by its dotted path (`outer.inner`, `items[2]`).
#[derive(Debug, Clone, PartialEq)]
pub struct Skip {
    pub path: String,
    pub reason: SkipReason,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// Outcome of one mapping call.
///
/// Ignoring the report gives the classic best-effort behavior.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapReport {
    /// Source fields examined, at every nesting level.
    pub visited: usize,
    /// Destination slots written, at every nesting level.
    pub written: usize,
    pub skipped: Vec<Skip>,
}

impl MapReport {
    /// Nothing was skipped or dropped.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn skipped_at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a SkipReason> + 'a {
        self.skipped
            .iter()
            .filter(move |s| s.path == path)
            .map(|s| &s.reason)
    }
}
