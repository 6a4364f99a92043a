use super::ScalarKind;
use std::fmt;

/// Neutral rendering of a nominal type.
///
/// `Option` and `Vec` are modeled structurally because conversion providers
/// need to see through them; every other named type is an opaque path whose
/// semantics live in the [`super::TypeModel`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// `()`; methods returning unit are never registered.
    Unit,
    Scalar(ScalarKind),
    /// `String` (and `std::string::String`).
    String,
    Option(Box<TypeRef>),
    Vec(Box<TypeRef>),
    /// Any other nominal type, e.g. `Venue` or `flat_ticket::TicketVenue`.
    Named(Vec<String>),
}

impl TypeRef {
    pub fn named<I, S>(segments: I) -> TypeRef
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TypeRef::Named(segments.into_iter().map(Into::into).collect())
    }

    pub fn option(inner: TypeRef) -> TypeRef {
        TypeRef::Option(Box::new(inner))
    }

    pub fn vec(inner: TypeRef) -> TypeRef {
        TypeRef::Vec(Box::new(inner))
    }

    /// The canonical string rendering, used as a stable hash key for the
    /// method registry and conversion caches.
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// The unqualified name of a named type, `None` otherwise.
    pub fn simple_name(&self) -> Option<&str> {
        match self {
            TypeRef::Named(segments) => segments.last().map(String::as_str),
            _ => None,
        }
    }

    /// The single type argument of `Option`/`Vec`.
    pub fn first_type_argument(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::Option(inner) | TypeRef::Vec(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn is_option(&self) -> bool {
        matches!(self, TypeRef::Option(_))
    }

    pub fn is_vec(&self) -> bool {
        matches!(self, TypeRef::Vec(_))
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, TypeRef::Unit)
    }

    pub fn as_scalar(&self) -> Option<ScalarKind> {
        match self {
            TypeRef::Scalar(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Unit => f.write_str("()"),
            TypeRef::Scalar(kind) => fmt::Display::fmt(kind, f),
            TypeRef::String => f.write_str("String"),
            TypeRef::Option(inner) => write!(f, "Option<{inner}>"),
            TypeRef::Vec(inner) => write!(f, "Vec<{inner}>"),
            TypeRef::Named(segments) => f.write_str(&segments.join("::")),
        }
    }
}
