use crate::config::MapOptions;
use crate::error::MapError;
use crate::kind::{Kind, RecordType};
use crate::record::Record;
use crate::report::{MapReport, Skip, SkipReason};
use crate::scalar;
use crate::value::{RecordValue, Value};

/// Field-by-field mapper between two record shapes.
///
/// For each source field the destination field of the same name is located
/// and filled by, in order: verbatim copy (identical kinds), recursive record
/// mapping, sequence coercion, scalar coercion. Fields that cannot be
/// transferred are skipped and listed in the returned `MapReport`.
#[derive(Debug, Clone, Default)]
pub struct Mapper {
    options: MapOptions,
}

impl Mapper {
    pub fn new(options: MapOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Map `source` into `destination`.
    ///
    /// `source` is never modified. On `Err`, `destination` is left exactly as
    /// it was.
    pub fn map<S: Record, D: Record>(
        &self,
        source: &S,
        destination: &mut D,
    ) -> Result<MapReport, MapError> {
        let source = source.to_record();
        let mut target = destination.to_record();
        let report = self.map_records(&source, &mut target)?;
        destination.apply_record(target);
        Ok(report)
    }

    /// Map between materialized records.
    ///
    /// Unlike `map`, an `Err` may leave `destination` partially written.
    pub fn map_records(
        &self,
        source: &RecordValue,
        destination: &mut RecordValue,
    ) -> Result<MapReport, MapError> {
        let mut traversal = Traversal {
            options: &self.options,
            report: MapReport::default(),
        };
        traversal.record(source, destination, "", 0)?;
        tracing::debug!(
            source = source.type_name,
            destination = destination.type_name,
            visited = traversal.report.visited,
            written = traversal.report.written,
            skipped = traversal.report.skipped.len(),
            "mapped record"
        );
        Ok(traversal.report)
    }
}

/// Map `source` into `destination` with default options.
pub fn map<S: Record, D: Record>(source: &S, destination: &mut D) -> Result<MapReport, MapError> {
    Mapper::default().map(source, destination)
}

/// State of one mapping call.
pub(crate) struct Traversal<'a> {
    pub(crate) options: &'a MapOptions,
    pub(crate) report: MapReport,
}

impl Traversal<'_> {
    pub(crate) fn record(
        &mut self,
        source: &RecordValue,
        destination: &mut RecordValue,
        path: &str,
        depth: usize,
    ) -> Result<(), MapError> {
        let limit = self.options.max_depth;
        if depth >= limit {
            tracing::warn!(field = %path, limit, "record nesting limit reached");
            return Err(MapError::DepthExceeded {
                path: path.to_string(),
                limit,
            });
        }

        for entry in &source.fields {
            self.report.visited += 1;
            let name = entry.descriptor.name;
            let path = join(path, name);

            let Some(target) = destination.field_mut(name) else {
                self.skip(path, SkipReason::MissingField);
                continue;
            };
            if !target.descriptor.settable {
                self.skip(path, SkipReason::NotSettable);
                continue;
            }

            self.field(
                &entry.descriptor.kind,
                &entry.value,
                &target.descriptor.kind,
                &mut target.value,
                &path,
                depth,
            )?;
        }
        Ok(())
    }

    fn field(
        &mut self,
        from_kind: &Kind,
        from: &Value,
        to_kind: &Kind,
        to: &mut Value,
        path: &str,
        depth: usize,
    ) -> Result<(), MapError> {
        // Identical kinds copy as a whole, `None` included.
        if from_kind == to_kind {
            self.assign(to, from.clone(), path);
            return Ok(());
        }

        let Some((from_kind, from)) = unwrap_optional(from_kind, from) else {
            self.skip(path, SkipReason::NullOptional);
            return Ok(());
        };
        let Some((to_kind, to)) = unwrap_optional_mut(to_kind, to) else {
            self.skip(path, SkipReason::NullOptional);
            return Ok(());
        };

        match (from_kind, to_kind) {
            _ if from_kind == to_kind => self.assign(to, from.clone(), path),
            (Kind::Record(_), Kind::Record(ty)) => self.nested(from_kind, from, ty, to, path, depth)?,
            (Kind::Sequence(from_element), Kind::Sequence(to_element)) => {
                self.sequence(from_element, from, to_element, to, path, depth)?
            }
            _ => match scalar::coerce(from_kind, from, to_kind, self.options.negative_dynamic) {
                Ok(value) => self.assign(to, value, path),
                Err(reason) => self.skip(path, reason),
            },
        }
        Ok(())
    }

    /// Build a fresh `ty` record, map `from` into it, store it in `to`.
    fn nested(
        &mut self,
        from_kind: &Kind,
        from: &Value,
        ty: &RecordType,
        to: &mut Value,
        path: &str,
        depth: usize,
    ) -> Result<(), MapError> {
        let Value::Record(source) = from else {
            self.unsupported(path, from_kind, &Kind::Record(*ty));
            return Ok(());
        };
        let record = self.fresh_record(source, ty, path, depth)?;
        self.assign(to, Value::Record(record), path);
        Ok(())
    }

    pub(crate) fn fresh_record(
        &mut self,
        source: &RecordValue,
        ty: &RecordType,
        path: &str,
        depth: usize,
    ) -> Result<RecordValue, MapError> {
        let mut record = ty.instantiate();
        self.record(source, &mut record, path, depth + 1)?;
        Ok(record)
    }

    fn assign(&mut self, slot: &mut Value, value: Value, path: &str) {
        tracing::trace!(field = %path, "field written");
        *slot = value;
        self.report.written += 1;
    }

    pub(crate) fn skip(&mut self, path: impl Into<String>, reason: SkipReason) {
        let path = path.into();
        tracing::debug!(field = %path, reason = %reason, "field skipped");
        self.report.skipped.push(Skip { path, reason });
    }

    pub(crate) fn unsupported(&mut self, path: impl Into<String>, from: &Kind, to: &Kind) {
        self.skip(
            path,
            SkipReason::Unsupported {
                from: from.clone(),
                to: to.clone(),
            },
        );
    }
}

fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

/// Peel every optional layer. `None` if any layer is empty.
fn unwrap_optional<'v>(kind: &'v Kind, value: &'v Value) -> Option<(&'v Kind, &'v Value)> {
    let Kind::Optional(inner) = kind else {
        return Some((kind, value));
    };
    match value {
        Value::Optional(Some(boxed)) => unwrap_optional(inner, boxed),
        _ => None,
    }
}

fn unwrap_optional_mut<'v>(
    kind: &'v Kind,
    value: &'v mut Value,
) -> Option<(&'v Kind, &'v mut Value)> {
    let Kind::Optional(inner) = kind else {
        return Some((kind, value));
    };
    match value {
        Value::Optional(Some(boxed)) => unwrap_optional_mut(inner, boxed.as_mut()),
        _ => None,
    }
}
