//! Field values and the presence rules applied before rendering.
//!
//! A field contributes to a WHERE clause only when it is *present*: empty
//! text, `0`, `0.0`, `false`, an empty list and `None` are absent, and
//! `Some(v)` is judged on `v`. `nullClause` is the exception: it looks at
//! whether its `Option<bool>` is `Some`, and renders from the boolean inside.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::order::Order;
use crate::schema::{Record, Schema};

/// A borrowed view of one field's runtime value.
#[non_exhaustive]
pub enum Value<'a> {
    /// Text, rendered single-quoted.
    Text(&'a str),
    /// Integer, rendered bare.
    Int(i64),
    /// Float, rendered bare.
    Float(f64),
    /// Boolean, rendered `true` / `false`.
    Bool(bool),
    /// A sequence; each element is resolved on its own.
    List(Vec<Value<'a>>),
    /// A nested annotated record.
    Record(&'a dyn Record),
    /// The pointer analogue: `None` is nil, `Some` is dereferenced.
    Optional(Option<Box<Value<'a>>>),
    /// An ordering term.
    Order(&'a Order),
    /// A value with no defined rendering.
    Unsupported,
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Self::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Self::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Record(record) => f
                .debug_tuple("Record")
                .field(&record.schema().name())
                .finish(),
            Self::Optional(inner) => f.debug_tuple("Optional").field(inner).finish(),
            Self::Order(order) => f.debug_tuple("Order").field(order).finish(),
            Self::Unsupported => f.write_str("Unsupported"),
        }
    }
}

/// A present scalar, ready to render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Literal<'a> {
    Text(&'a str),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl<'a> Literal<'a> {
    pub(crate) const fn text(self) -> Option<&'a str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Literal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "'{s}'"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl<'a> Value<'a> {
    /// Follow `Optional` to the pointee; `None` for a nil optional.
    fn pointee(self) -> Option<Self> {
        let mut value = self;
        loop {
            match value {
                Self::Optional(Some(inner)) => value = *inner,
                Self::Optional(None) => return None,
                other => return Some(other),
            }
        }
    }

    /// The scalar, if present.
    #[allow(clippy::float_cmp)]
    pub(crate) fn literal(self) -> Option<Literal<'a>> {
        match self.pointee()? {
            Self::Text(s) if !s.is_empty() => Some(Literal::Text(s)),
            Self::Int(n) if n != 0 => Some(Literal::Int(n)),
            Self::Float(x) if x != 0.0 => Some(Literal::Float(x)),
            Self::Bool(true) => Some(Literal::Bool(true)),
            _ => None,
        }
    }

    /// Present scalars of a sequence, or the single present scalar.
    ///
    /// Empty means absent.
    pub(crate) fn literals(self) -> Vec<Literal<'a>> {
        match self.pointee() {
            Some(Self::List(items)) => items.into_iter().filter_map(Value::literal).collect(),
            Some(other) => other.literal().into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// The nested record, if the value is a non-nil record.
    pub(crate) fn record(self) -> Option<&'a dyn Record> {
        match self.pointee()? {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// The nested record, or the first element of a sequence of records.
    pub(crate) fn first_record(self) -> Option<&'a dyn Record> {
        match self.pointee()? {
            Self::List(items) => items.into_iter().next()?.record(),
            other => other.record(),
        }
    }

    /// The `nullClause` reading: `Some(b)` only for a non-nil optional boolean.
    pub(crate) fn flag(self) -> Option<bool> {
        match self {
            Self::Optional(Some(inner)) => match (*inner).pointee()? {
                Self::Bool(b) => Some(b),
                _ => None,
            },
            _ => None,
        }
    }

    /// Ordering terms of an `Order` or a sequence of them.
    pub(crate) fn orders(self) -> Vec<&'a Order> {
        match self.pointee() {
            Some(Self::Order(order)) => vec![order],
            Some(Self::List(items)) => items
                .into_iter()
                .filter_map(|item| match item.pointee()? {
                    Self::Order(order) => Some(order),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Static shape of a field type, known without a value.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Shape {
    /// Text, number or boolean.
    Scalar,
    /// A sequence of the inner shape.
    Sequence(Box<Shape>),
    /// A nested annotated record.
    Record(fn() -> &'static Schema),
    /// An optional of the inner shape.
    Optional(Box<Shape>),
    /// An ordering term.
    Order,
    /// No defined rendering.
    Opaque,
}

impl Shape {
    /// Whether this is a record, possibly behind optionals.
    ///
    /// Does not touch the nested schema, so it is safe while that schema is
    /// still being built.
    #[must_use]
    pub fn is_record(&self) -> bool {
        match self {
            Self::Record(_) => true,
            Self::Optional(inner) => inner.is_record(),
            _ => false,
        }
    }

    /// Whether this is a record or a sequence of records, possibly behind
    /// optionals.
    #[must_use]
    pub fn holds_records(&self) -> bool {
        match self {
            Self::Sequence(inner) | Self::Optional(inner) => inner.holds_records(),
            other => other.is_record(),
        }
    }

    /// Whether this is a sequence, possibly behind optionals.
    #[must_use]
    pub fn is_sequence(&self) -> bool {
        match self {
            Self::Sequence(_) => true,
            Self::Optional(inner) => inner.is_sequence(),
            _ => false,
        }
    }

    /// Schema of the nested record, possibly behind optionals.
    #[must_use]
    pub fn record_schema(&self) -> Option<&'static Schema> {
        match self {
            Self::Record(describe) => Some(describe()),
            Self::Optional(inner) => inner.record_schema(),
            _ => None,
        }
    }

    /// Schema of the nested record or of the sequence elements.
    #[must_use]
    pub fn element_schema(&self) -> Option<&'static Schema> {
        match self {
            Self::Sequence(inner) | Self::Optional(inner) => inner.element_schema(),
            other => other.record_schema(),
        }
    }
}

/// Conversion of a field type into a [`Value`].
///
/// Implemented for text, numbers, booleans, `Option`, sequences, smart
/// pointers, [`Order`], and every `#[derive(Soql)]` struct.
pub trait ToValue {
    /// Borrow the runtime value.
    fn to_value(&self) -> Value<'_>;

    /// The static shape of this type.
    fn shape() -> Shape;
}

impl ToValue for str {
    fn to_value(&self) -> Value<'_> {
        Value::Text(self)
    }

    fn shape() -> Shape {
        Shape::Scalar
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value<'_> {
        Value::Text(self)
    }

    fn shape() -> Shape {
        Shape::Scalar
    }
}

impl ToValue for Cow<'_, str> {
    fn to_value(&self) -> Value<'_> {
        Value::Text(self)
    }

    fn shape() -> Shape {
        Shape::Scalar
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }

    fn shape() -> Shape {
        Shape::Scalar
    }
}

/// `NaN` and infinities have no SOQL literal.
fn float(x: f64) -> Value<'static> {
    if x.is_finite() {
        Value::Float(x)
    } else {
        Value::Unsupported
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value<'_> {
        float(f64::from(*self))
    }

    fn shape() -> Shape {
        Shape::Scalar
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value<'_> {
        float(*self)
    }

    fn shape() -> Shape {
        Shape::Scalar
    }
}

macro_rules! lossless_int {
    ($($ty:ty),*) => {$(
        impl ToValue for $ty {
            fn to_value(&self) -> Value<'_> {
                Value::Int(i64::from(*self))
            }

            fn shape() -> Shape {
                Shape::Scalar
            }
        }
    )*};
}

macro_rules! checked_int {
    ($($ty:ty),*) => {$(
        impl ToValue for $ty {
            fn to_value(&self) -> Value<'_> {
                i64::try_from(*self).map_or(Value::Unsupported, Value::Int)
            }

            fn shape() -> Shape {
                Shape::Scalar
            }
        }
    )*};
}

lossless_int!(i8, i16, i32, i64, u8, u16, u32);
checked_int!(isize, u64, usize);

impl ToValue for Order {
    fn to_value(&self) -> Value<'_> {
        Value::Order(self)
    }

    fn shape() -> Shape {
        Shape::Order
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value<'_> {
        Value::Optional(self.as_ref().map(|inner| Box::new(inner.to_value())))
    }

    fn shape() -> Shape {
        Shape::Optional(Box::new(T::shape()))
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value<'_> {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }

    fn shape() -> Shape {
        Shape::Sequence(Box::new(T::shape()))
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value<'_> {
        self.as_slice().to_value()
    }

    fn shape() -> Shape {
        <[T]>::shape()
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value<'_> {
        self.as_slice().to_value()
    }

    fn shape() -> Shape {
        <[T]>::shape()
    }
}

macro_rules! transparent {
    ($($ptr:ident),*) => {$(
        impl<T: ToValue + ?Sized> ToValue for $ptr<T> {
            fn to_value(&self) -> Value<'_> {
                (**self).to_value()
            }

            fn shape() -> Shape {
                T::shape()
            }
        }
    )*};
}

transparent!(Box, Rc, Arc);

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }

    fn shape() -> Shape {
        T::shape()
    }
}
