//! Tracing hooks for marshalling.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate. The
//! macros expand to nothing when the feature is disabled, so call sites need
//! no `#[cfg]` of their own.

/// Emit the outcome of a public entry point: `soql.marshal` with the query,
/// or `soql.error` with the error kind.
///
/// ```ignore
/// trace_result!("marshal", schema.name(), result);
/// ```
macro_rules! trace_result {
    ($entry:expr, $record:expr, $result:expr) => {
        #[cfg(feature = "tracing")]
        match &$result {
            Ok(query) => {
                ::tracing::debug!(entry = $entry, record = $record, query = %query, "soql.marshal");
            },
            Err(err) => {
                ::tracing::debug!(entry = $entry, record = $record, kind = ?err.kind(), error = %err, "soql.error");
            },
        }
    };
}

/// Emit a trace-level `soql.skip` event for a field left out as absent.
///
/// ```ignore
/// trace_skip!(schema.name(), field.name(), directive.category());
/// ```
macro_rules! trace_skip {
    ($record:expr, $field:expr, $category:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!(record = $record, field = $field, category = %$category, "soql.skip");
    };
}

pub(crate) use {trace_result, trace_skip};
