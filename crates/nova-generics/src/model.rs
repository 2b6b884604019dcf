//! Declarations of locally decompiled classes and methods, and the registry that serves them.

use std::collections::HashMap;
use std::sync::Arc;

use crate::ty::{Type, TypeVar, TypeVarOwner};

/// Identity of a method: declaring class, name and erased descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodId {
    pub class: Arc<str>,
    pub name: Arc<str>,
    pub descriptor: Arc<str>,
}

impl MethodId {
    pub fn new(
        class: impl Into<Arc<str>>,
        name: impl Into<Arc<str>>,
        descriptor: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            class: class.into(),
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }
}

/// A declared generic type parameter. Its position is `var.index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParamDef {
    pub var: TypeVar,
    pub bounds: Vec<Type>,
}

impl TypeParamDef {
    /// Declare `names` in order on `owner`, each bounded by `java.lang.Object`.
    pub fn declare(owner: TypeVarOwner, names: &[&str]) -> Vec<TypeParamDef> {
        names
            .iter()
            .enumerate()
            .map(|(idx, name)| TypeParamDef {
                var: TypeVar::new(owner.clone(), idx as u32, *name),
                bounds: vec![Type::object()],
            })
            .collect()
    }

    pub fn as_type(&self) -> Type {
        Type::TypeVar(self.var.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
    pub id: MethodId,
    pub type_params: Vec<TypeParamDef>,
    pub params: Vec<Type>,
    pub return_type: Type,
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub name: Arc<str>,
    pub kind: ClassKind,
    pub type_params: Vec<TypeParamDef>,
    pub super_class: Option<Type>,
    pub interfaces: Vec<Type>,
    pub methods: Vec<MethodDef>,
}

impl ClassDef {
    pub fn method(&self, name: &str) -> Option<&MethodDef> {
        self.methods.iter().find(|m| &*m.id.name == name)
    }

    /// The class viewed as its own generic instantiation (`List<E>` for `List`).
    pub fn self_type(&self) -> Type {
        Type::class(
            self.name.clone(),
            self.type_params.iter().map(TypeParamDef::as_type).collect(),
        )
    }
}

/// Where a class's declaration data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassSource {
    /// Decompiled from the input.
    Local,
    /// Known only through classpath metadata.
    Classpath,
}

/// Borrowed view of the declaration data the resolver needs, independent of its source.
#[derive(Debug, Clone, Copy)]
pub struct ClassInfo<'a> {
    pub name: &'a str,
    pub kind: ClassKind,
    pub type_params: &'a [TypeParamDef],
    pub super_class: Option<&'a Type>,
    pub interfaces: &'a [Type],
    pub source: ClassSource,
}

impl<'a> ClassInfo<'a> {
    /// Direct supertypes: the superclass first, then interfaces in declaration order.
    pub fn supertypes(&self) -> impl Iterator<Item = &'a Type> {
        self.super_class.into_iter().chain(self.interfaces.iter())
    }
}

impl<'a> From<&'a ClassDef> for ClassInfo<'a> {
    fn from(def: &'a ClassDef) -> Self {
        ClassInfo {
            name: &def.name,
            kind: def.kind,
            type_params: &def.type_params,
            super_class: def.super_class.as_ref(),
            interfaces: &def.interfaces,
            source: ClassSource::Local,
        }
    }
}

/// Class lookup across the decompiled input and the classpath.
pub trait TypeEnv {
    fn class_info(&self, name: &str) -> Option<ClassInfo<'_>>;
}

/// Lookup of classes that are part of the decompiled input.
///
/// Returns `None` for classes that are external (classpath only) or unknown.
pub trait ClassRegistry {
    fn class(&self, name: &str) -> Option<&ClassDef>;
}

/// In-memory [`ClassRegistry`] keyed by binary name.
#[derive(Debug, Clone, Default)]
pub struct ClassStore {
    classes: HashMap<Arc<str>, ClassDef>,
}

impl ClassStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `def` unless a class with the same name is already defined.
    ///
    /// Returns `false` (and keeps the existing definition) on a duplicate name.
    pub fn add_class(&mut self, def: ClassDef) -> bool {
        if self.classes.contains_key(&def.name) {
            return false;
        }
        self.classes.insert(def.name.clone(), def);
        true
    }

    /// Insert or replace the definition for `def.name`.
    pub fn upsert_class(&mut self, def: ClassDef) -> Option<ClassDef> {
        self.classes.insert(def.name.clone(), def)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassRegistry for ClassStore {
    fn class(&self, name: &str) -> Option<&ClassDef> {
        self.classes.get(name)
    }
}
