//! Generic type resolution for decompiled Java bytecode.
//!
//! Bytecode erases most generic type arguments. This crate reconstructs what it can: it binds a
//! generic class's type parameters from an instantiated type (`Set<String>` binds `E`), substitutes
//! those bindings through arbitrary type expressions, collects the type variables visible inside
//! a method (walking decompiled classes and classpath metadata alike), and makes a narrow,
//! best-effort guess at a generic method's own type variables from its call arguments.
//!
//! Nothing here guesses when information is missing: an unknown class, a raw type or an arity
//! mismatch yields no bindings, and callers keep the erased type.

#![forbid(unsafe_code)]

mod binding;
mod classpath;
mod config;
mod env;
mod error;
mod hierarchy;
mod infer;
mod model;
mod resolver;
mod signature;
mod subst;
mod ty;

pub use crate::binding::{class_generics, type_variables_mapping, BindingMap};
pub use crate::classpath::{ClasspathClass, ClasspathClassStub, ClasspathProvider, StubClasspath};
pub use crate::config::GenericsConfig;
pub use crate::env::{
    collect_type_vars_at_method, type_vars_at_method, MethodTypeVarsCache, TypeVarEnv,
};
pub use crate::error::{GenericsError, Result};
pub use crate::hierarchy::{ancestors, instantiate_as_supertype};
pub use crate::infer::{replace_method_generics, CallSite, Invocation, InvokeKind, MethodDetails};
pub use crate::model::{
    ClassDef, ClassInfo, ClassKind, ClassRegistry, ClassSource, ClassStore, MethodDef, MethodId,
    TypeEnv, TypeParamDef,
};
pub use crate::resolver::TypeResolver;
pub use crate::signature::{
    parse_class_signature, parse_field_descriptor, parse_field_signature,
    parse_method_descriptor, parse_method_signature, ClassSignature, MethodSignature,
};
pub use crate::subst::{replace_class_generics, substitute, Substitution};
pub use crate::ty::{ClassType, PrimitiveType, Type, TypeVar, TypeVarOwner, WildcardBound, OBJECT};
