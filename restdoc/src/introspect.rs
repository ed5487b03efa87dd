//! Type introspection.
//!
//! Route tables refer to request samples and response models through
//! [`TypeDescriptor`]s instead of runtime reflection. Descriptors are either
//! spelled out by hand, derived from [`TypeInfo`] (implemented here for the
//! standard library and by `#[api_model]` for user types), or taken from a
//! `utoipa::ToSchema` implementation.

use std::borrow::Cow;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// Structural kind of a described type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Primitive,
    Composite,
    Pointer,
    Array,
    Sequence,
}

/// A registered, structural description of a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// A scalar such as `int64` or `string`.
    Primitive(Cow<'static, str>),
    /// A named struct or enum, documented through a `$ref`.
    Composite(Cow<'static, str>),
    /// An indirection to another type (`Box<T>`, `&T`, `Option<T>`).
    Pointer(Box<TypeDescriptor>),
    /// A fixed-size array.
    Array(Box<TypeDescriptor>),
    /// A growable sequence.
    Sequence(Box<TypeDescriptor>),
}

impl TypeDescriptor {
    pub fn primitive(name: impl Into<Cow<'static, str>>) -> Self {
        TypeDescriptor::Primitive(name.into())
    }

    pub fn composite(name: impl Into<Cow<'static, str>>) -> Self {
        TypeDescriptor::Composite(name.into())
    }

    pub fn pointer_to(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Pointer(Box::new(inner))
    }

    pub fn array_of(element: TypeDescriptor) -> Self {
        TypeDescriptor::Array(Box::new(element))
    }

    pub fn sequence_of(element: TypeDescriptor) -> Self {
        TypeDescriptor::Sequence(Box::new(element))
    }

    /// Descriptor of a type implementing [`TypeInfo`].
    pub fn of<T: TypeInfo + ?Sized>() -> Self {
        T::type_descriptor()
    }

    /// Composite descriptor named after a `utoipa` schema.
    pub fn of_schema<T: utoipa::ToSchema>() -> Self {
        TypeDescriptor::Composite(Cow::Owned(T::name().into_owned()))
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            TypeDescriptor::Primitive(_) => TypeKind::Primitive,
            TypeDescriptor::Composite(_) => TypeKind::Composite,
            TypeDescriptor::Pointer(_) => TypeKind::Pointer,
            TypeDescriptor::Array(_) => TypeKind::Array,
            TypeDescriptor::Sequence(_) => TypeKind::Sequence,
        }
    }

    /// The pointee or element, if this is an indirection or a collection.
    pub fn element_type(&self) -> Option<&TypeDescriptor> {
        match self {
            TypeDescriptor::Pointer(inner)
            | TypeDescriptor::Array(inner)
            | TypeDescriptor::Sequence(inner) => Some(inner),
            TypeDescriptor::Primitive(_) | TypeDescriptor::Composite(_) => None,
        }
    }

    /// Stable textual name: `*T` for pointers and `[]T` for arrays and sequences.
    pub fn canonical_name(&self) -> Cow<'_, str> {
        match self {
            TypeDescriptor::Primitive(name) | TypeDescriptor::Composite(name) => {
                Cow::Borrowed(name.as_ref())
            }
            TypeDescriptor::Pointer(inner) => Cow::Owned(format!("*{}", inner.canonical_name())),
            TypeDescriptor::Array(inner) | TypeDescriptor::Sequence(inner) => {
                Cow::Owned(format!("[]{}", inner.canonical_name()))
            }
        }
    }

    pub fn is_array_like(&self) -> bool {
        matches!(self.kind(), TypeKind::Array | TypeKind::Sequence)
    }

    /// Follows pointer indirections down to the first non-pointer type.
    pub fn dereference(&self) -> &TypeDescriptor {
        let mut current = self;
        while let TypeDescriptor::Pointer(inner) = current {
            current = inner;
        }
        current
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())
    }
}

/// Types that can describe themselves to the document builder.
pub trait TypeInfo {
    fn type_descriptor() -> TypeDescriptor;
}

macro_rules! primitive_type_info {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl TypeInfo for $ty {
                fn type_descriptor() -> TypeDescriptor {
                    TypeDescriptor::Primitive(Cow::Borrowed($name))
                }
            }
        )*
    };
}

primitive_type_info! {
    i8 => "int8",
    i16 => "int16",
    i32 => "int32",
    i64 => "int64",
    isize => "int",
    u8 => "uint8",
    u16 => "uint16",
    u32 => "uint32",
    u64 => "uint64",
    usize => "uint",
    f32 => "float32",
    f64 => "float64",
    bool => "bool",
    char => "rune",
    String => "string",
    str => "string",
    SystemTime => "datetime",
    Duration => "duration",
}

impl<T: TypeInfo> TypeInfo for Vec<T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence_of(T::type_descriptor())
    }
}

impl<T: TypeInfo> TypeInfo for VecDeque<T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence_of(T::type_descriptor())
    }
}

impl<T: TypeInfo> TypeInfo for [T] {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence_of(T::type_descriptor())
    }
}

impl<T: TypeInfo, const N: usize> TypeInfo for [T; N] {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::array_of(T::type_descriptor())
    }
}

macro_rules! pointer_type_info {
    ($($wrapper:ident),* $(,)?) => {
        $(
            impl<T: TypeInfo + ?Sized> TypeInfo for $wrapper<T> {
                fn type_descriptor() -> TypeDescriptor {
                    TypeDescriptor::pointer_to(T::type_descriptor())
                }
            }
        )*
    };
}

pointer_type_info!(Box, Rc, Arc);

impl<T: TypeInfo> TypeInfo for Option<T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::pointer_to(T::type_descriptor())
    }
}

impl<T: TypeInfo + ?Sized> TypeInfo for &T {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::pointer_to(T::type_descriptor())
    }
}
