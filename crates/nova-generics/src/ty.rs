//! The algebraic type representation shared by every resolution step.
//!
//! Types are plain values: cloning is cheap enough (names are `Arc<str>`) and nothing is ever
//! mutated in place, so they can be shared freely between analysis threads.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::model::MethodId;

pub const OBJECT: &str = "java.lang.Object";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimitiveType {
    pub fn java_name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Char => "char",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Void => "void",
        }
    }
}

/// A class reference, optionally applied to type arguments.
///
/// `name` is the binary name (`java.util.Map$Entry`). An empty `args` list means the class is
/// either non-generic or used raw; the two are indistinguishable without the declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassType {
    pub name: Arc<str>,
    pub args: Vec<Type>,
}

/// The declaration scope a type variable belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeVarOwner {
    Class(Arc<str>),
    Method(MethodId),
}

/// A reference to a declared type parameter.
///
/// Identity is `(owner, index)`: the `T` of `List` and the `T` of `Optional` are different
/// variables even though they share a name. `name` is carried for display only.
#[derive(Debug, Clone)]
pub struct TypeVar {
    pub owner: TypeVarOwner,
    pub index: u32,
    pub name: Arc<str>,
}

impl TypeVar {
    pub fn new(owner: TypeVarOwner, index: u32, name: impl Into<Arc<str>>) -> Self {
        Self {
            owner,
            index,
            name: name.into(),
        }
    }

    pub fn of_class(class: impl Into<Arc<str>>, index: u32, name: impl Into<Arc<str>>) -> Self {
        Self::new(TypeVarOwner::Class(class.into()), index, name)
    }
}

impl PartialEq for TypeVar {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.owner == other.owner
    }
}

impl Eq for TypeVar {}

impl Hash for TypeVar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.index.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WildcardBound {
    Unbounded,
    Extends(Box<Type>),
    Super(Box<Type>),
}

impl WildcardBound {
    pub fn bound(&self) -> Option<&Type> {
        match self {
            WildcardBound::Unbounded => None,
            WildcardBound::Extends(ty) | WildcardBound::Super(ty) => Some(ty),
        }
    }

    /// Same bound direction, new bound type. `Unbounded` stays unbounded.
    pub fn with_bound(&self, bound: Type) -> WildcardBound {
        match self {
            WildcardBound::Unbounded => WildcardBound::Unbounded,
            WildcardBound::Extends(_) => WildcardBound::Extends(Box::new(bound)),
            WildcardBound::Super(_) => WildcardBound::Super(Box::new(bound)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Primitive(PrimitiveType),
    Class(ClassType),
    Array(Box<Type>),
    TypeVar(TypeVar),
    Wildcard(WildcardBound),
}

impl Type {
    pub fn class(name: impl Into<Arc<str>>, args: Vec<Type>) -> Type {
        Type::Class(ClassType {
            name: name.into(),
            args,
        })
    }

    pub fn object() -> Type {
        Type::class(OBJECT, vec![])
    }

    pub fn array(elem: Type) -> Type {
        Type::Array(Box::new(elem))
    }

    /// A class type applied to at least one type argument.
    pub fn is_generic(&self) -> bool {
        matches!(self, Type::Class(ClassType { args, .. }) if !args.is_empty())
    }

    pub fn class_name(&self) -> Option<&str> {
        match self {
            Type::Class(ClassType { name, .. }) => Some(name),
            _ => None,
        }
    }

    /// Actual type arguments of a class type; `None` for every other kind of type.
    pub fn generic_args(&self) -> Option<&[Type]> {
        match self {
            Type::Class(ClassType { args, .. }) => Some(args),
            _ => None,
        }
    }

    pub fn array_element(&self) -> Option<&Type> {
        match self {
            Type::Array(elem) => Some(elem),
            _ => None,
        }
    }

    pub fn contains_type_var(&self) -> bool {
        match self {
            Type::Primitive(_) => false,
            Type::TypeVar(_) => true,
            Type::Array(elem) => elem.contains_type_var(),
            Type::Wildcard(bound) => bound.bound().is_some_and(Type::contains_type_var),
            Type::Class(ClassType { args, .. }) => args.iter().any(Type::contains_type_var),
        }
    }

    /// Every type variable referenced anywhere in this type.
    pub fn type_vars(&self) -> HashSet<TypeVar> {
        fn collect(ty: &Type, out: &mut HashSet<TypeVar>) {
            match ty {
                Type::Primitive(_) => {}
                Type::TypeVar(tv) => {
                    out.insert(tv.clone());
                }
                Type::Array(elem) => collect(elem, out),
                Type::Wildcard(bound) => {
                    if let Some(bound) = bound.bound() {
                        collect(bound, out);
                    }
                }
                Type::Class(ClassType { args, .. }) => {
                    for arg in args {
                        collect(arg, out);
                    }
                }
            }
        }

        let mut out = HashSet::new();
        collect(self, &mut out);
        out
    }

    /// The erased (descriptor-level) view of this type.
    ///
    /// Type variables erase to `java.lang.Object`; declared bounds are not consulted here.
    pub fn erasure(&self) -> Type {
        match self {
            Type::Primitive(p) => Type::Primitive(*p),
            Type::Class(ClassType { name, .. }) => Type::class(name.clone(), vec![]),
            Type::Array(elem) => Type::array(elem.erasure()),
            Type::TypeVar(_) | Type::Wildcard(WildcardBound::Unbounded) => Type::object(),
            Type::Wildcard(WildcardBound::Extends(bound)) => bound.erasure(),
            Type::Wildcard(WildcardBound::Super(_)) => Type::object(),
        }
    }
}

impl From<PrimitiveType> for Type {
    fn from(value: PrimitiveType) -> Self {
        Type::Primitive(value)
    }
}

impl From<TypeVar> for Type {
    fn from(value: TypeVar) -> Self {
        Type::TypeVar(value)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(p) => f.write_str(p.java_name()),
            Type::TypeVar(tv) => f.write_str(&tv.name),
            Type::Array(elem) => write!(f, "{elem}[]"),
            Type::Wildcard(WildcardBound::Unbounded) => f.write_str("?"),
            Type::Wildcard(WildcardBound::Extends(bound)) => write!(f, "? extends {bound}"),
            Type::Wildcard(WildcardBound::Super(bound)) => write!(f, "? super {bound}"),
            Type::Class(ClassType { name, args }) => {
                f.write_str(&name.replace('$', "."))?;
                if args.is_empty() {
                    return Ok(());
                }
                f.write_str("<")?;
                for (idx, arg) in args.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
        }
    }
}
