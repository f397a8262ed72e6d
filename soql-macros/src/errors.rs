//! Error helpers for consistent, informative compile-time errors.

use proc_macro2::Span;
use syn::Error;

/// Build an error for an unsupported construct with a suggestion.
pub fn unsupported(span: Span, what: &str, suggestion: &str) -> Error {
    Error::new(span, format!("{what}\n\n\u{2705} Try: {suggestion}"))
}

/// Build an error for a repeated attribute on one field.
pub fn duplicate_attr(span: Span, attr: &str) -> Error {
    Error::new(
        span,
        format!("Duplicate #[{attr}] attribute. Each field takes a single annotation."),
    )
}

/// Build an error for an attribute with the wrong argument syntax.
pub fn expected_syntax(span: Span, expected: &str, context: &str, example: &str) -> Error {
    Error::new(
        span,
        format!("Expected {expected} {context}.\n\nExample: {example}"),
    )
}
