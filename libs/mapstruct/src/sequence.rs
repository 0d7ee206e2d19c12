//! Sequence coercions. Only these element pairs are handled, first match wins:
//!
//! 1. `String` → unsigned: base-10 parse, failing elements dropped.
//! 2. `String` → `f32`: parse, failing elements dropped.
//! 3. identical elements: the whole sequence is copied.
//! 4. record → record: each element mapped into a fresh destination record.
//!
//! Everything else leaves the destination sequence as it was.

use crate::config::SequenceMode;
use crate::engine::Traversal;
use crate::error::MapError;
use crate::kind::{FloatWidth, IntWidth, Kind};
use crate::report::SkipReason;
use crate::scalar;
use crate::value::Value;

impl Traversal<'_> {
    pub(crate) fn sequence(
        &mut self,
        from_element: &Kind,
        from: &Value,
        to_element: &Kind,
        to: &mut Value,
        path: &str,
        depth: usize,
    ) -> Result<(), MapError> {
        let (Value::Sequence(items), Value::Sequence(out)) = (from, &mut *to) else {
            self.unsupported(
                path,
                &Kind::Sequence(Box::new(from_element.clone())),
                &Kind::Sequence(Box::new(to_element.clone())),
            );
            return Ok(());
        };

        match (from_element, to_element) {
            (Kind::String, Kind::UInt(width)) => {
                self.prepare(out);
                for (index, item) in items.iter().enumerate() {
                    let parsed = item.as_str().and_then(|s| parse_unsigned(s, *width));
                    self.push_or_drop(out, parsed, item, path, index);
                }
            }
            (Kind::String, Kind::Float(FloatWidth::F32)) => {
                self.prepare(out);
                for (index, item) in items.iter().enumerate() {
                    let parsed = item.as_str().and_then(scalar::parse_f32_element);
                    self.push_or_drop(out, parsed, item, path, index);
                }
            }
            _ if from_element == to_element => *out = items.clone(),
            (Kind::Record(_), Kind::Record(ty)) => {
                self.prepare(out);
                for (index, item) in items.iter().enumerate() {
                    let element_path = format!("{path}[{index}]");
                    let Value::Record(source) = item else {
                        self.unsupported(element_path, from_element, to_element);
                        continue;
                    };
                    let record = self.fresh_record(source, ty, &element_path, depth)?;
                    out.push(Value::Record(record));
                }
            }
            _ => {
                self.unsupported(
                    path,
                    &Kind::Sequence(Box::new(from_element.clone())),
                    &Kind::Sequence(Box::new(to_element.clone())),
                );
                return Ok(());
            }
        }

        tracing::trace!(field = %path, len = out.len(), "sequence written");
        self.report.written += 1;
        Ok(())
    }

    fn prepare(&self, out: &mut Vec<Value>) {
        if self.options.sequence_mode == SequenceMode::Replace {
            out.clear();
        }
    }

    fn push_or_drop(
        &mut self,
        out: &mut Vec<Value>,
        parsed: Option<Value>,
        item: &Value,
        path: &str,
        index: usize,
    ) {
        match parsed {
            Some(value) => out.push(value),
            None => self.skip(
                path,
                SkipReason::DroppedElement {
                    index,
                    input: item.as_str().unwrap_or_default().to_string(),
                },
            ),
        }
    }
}

/// Plain base-10 digits only: no sign, no grouping, no fraction.
fn parse_unsigned(s: &str, width: IntWidth) -> Option<Value> {
    if s.starts_with('+') {
        return None;
    }
    s.parse::<u64>().ok().and_then(|v| Value::unsigned(width, v))
}
