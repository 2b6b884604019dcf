use std::collections::HashMap;

use crate::model::{TypeEnv, TypeParamDef};
use crate::ty::{ClassType, Type, TypeVar};

/// Type variables bound to the actual types they stand for.
///
/// An empty map means "no generic information"; it is a normal result, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingMap {
    bindings: HashMap<TypeVar, Type>,
}

impl BindingMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, var: &TypeVar) -> Option<&Type> {
        self.bindings.get(var)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TypeVar, &Type)> {
        self.bindings.iter()
    }
}

impl FromIterator<(TypeVar, Type)> for BindingMap {
    fn from_iter<I: IntoIterator<Item = (TypeVar, Type)>>(iter: I) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}

/// Declared type parameters of the class `name`, in declaration order.
///
/// Decompiled classes win over classpath metadata. Unknown and non-generic classes yield an empty
/// slice.
pub fn class_generics<'e>(env: &'e dyn TypeEnv, name: &str) -> &'e [TypeParamDef] {
    env.class_info(name).map(|info| info.type_params).unwrap_or(&[])
}

/// Bind the declared type parameters of `class_type`'s class to its actual type arguments.
///
/// `Set<String>` yields `{E -> String}`. Binding is strictly positional. When the number of
/// actual arguments differs from the number of declared parameters nothing is bound.
pub fn type_variables_mapping(env: &dyn TypeEnv, class_type: &Type) -> BindingMap {
    let Type::Class(ClassType { name, args }) = class_type else {
        return BindingMap::new();
    };
    if args.is_empty() {
        return BindingMap::new();
    }

    let params = class_generics(env, name);
    if params.is_empty() {
        return BindingMap::new();
    }
    if params.len() != args.len() {
        tracing::debug!(
            target: "nova.generics",
            class = %name,
            declared = params.len(),
            actual = args.len(),
            "type argument count does not match declaration; skipping binding"
        );
        return BindingMap::new();
    }

    params
        .iter()
        .zip(args)
        .map(|(param, arg)| (param.var.clone(), arg.clone()))
        .collect()
}
