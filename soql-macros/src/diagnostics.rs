//! Stderr diagnostics for the derive, compiled out unless asked for.
//!
//! - `debug-expand`: dump the impls generated for each record.
//! - `macro-trace`: log every annotated field the derive picks up.
//!
//! ```text
//! cargo build --features soql-macros/macro-trace 2>&1 | grep soql-derive
//! ```

use proc_macro2::TokenStream;
use syn::Ident;

/// Print the generated impls of `record`, pretty-printed when they parse as
/// a file.
#[cfg(feature = "debug-expand")]
pub fn dump_expansion(record: &Ident, expanded: &TokenStream) {
    let body = syn::parse2::<syn::File>(expanded.clone())
        .map_or_else(|_| expanded.to_string(), |file| prettyplease::unparse(&file));
    eprintln!("// ---- #[derive(Soql)] for {record} ----\n{body}");
}

#[cfg(not(feature = "debug-expand"))]
#[inline]
pub const fn dump_expansion(_record: &Ident, _expanded: &TokenStream) {}

/// Log one annotated field as `[soql-derive] Record.field <- "tag"`.
#[cfg(feature = "macro-trace")]
macro_rules! trace_field {
    ($record:expr, $field:expr, $tag:expr) => {
        eprintln!("[soql-derive] {}.{} <- {:?}", $record, $field, $tag)
    };
}

#[cfg(not(feature = "macro-trace"))]
macro_rules! trace_field {
    ($record:expr, $field:expr, $tag:expr) => {};
}

pub(crate) use trace_field;
