//! Structural replacement of bound type variables.

use crate::binding::{type_variables_mapping, BindingMap};
use crate::model::TypeEnv;
use crate::ty::{ClassType, Type};

/// Outcome of a substitution request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substitution {
    /// The instance type carried no usable generic information, so there was nothing to
    /// substitute with. Only produced by [`replace_class_generics`].
    NoBindings,
    /// Bindings were available, but none of them applies to the type.
    Unchanged,
    Replaced(Type),
}

impl Substitution {
    pub fn is_replaced(&self) -> bool {
        matches!(self, Substitution::Replaced(_))
    }

    pub fn replaced(self) -> Option<Type> {
        match self {
            Substitution::Replaced(ty) => Some(ty),
            Substitution::NoBindings | Substitution::Unchanged => None,
        }
    }

    /// The substituted type, or `original` when nothing was replaced.
    pub fn unwrap_or_original(self, original: &Type) -> Type {
        self.replaced().unwrap_or_else(|| original.clone())
    }
}

/// Replace every variable of `ty` that `bindings` binds.
///
/// - A variable is replaced by its binding; an unbound variable cannot be substituted.
/// - An array is substituted through its element type and fails with it.
/// - A wildcard is substituted through its bound, and only when the bound mentions a variable.
/// - A parameterized class is substituted argument by argument. Arguments that cannot be
///   substituted are kept as they are, so `Map<E, T>` with only `E` bound becomes
///   `Map<String, T>`. If no argument changes, neither does the class: it reports
///   [`Substitution::Unchanged`] instead of an equal copy, and enclosing arrays and wildcards
///   follow suit (`List<T>[]` and `? extends List<T>` with `T` unbound are `Unchanged`).
///   [`Substitution::unwrap_or_original`] yields the same type either way.
/// - Everything else (primitives, raw classes) is left alone.
///
/// An empty binding map short-circuits to [`Substitution::Unchanged`]. Subtrees nested deeper
/// than `max_depth` are treated as unsubstitutable.
pub fn substitute(ty: &Type, bindings: &BindingMap, max_depth: usize) -> Substitution {
    if bindings.is_empty() {
        return Substitution::Unchanged;
    }
    match substitute_at(ty, bindings, 0, max_depth) {
        Some(ty) => Substitution::Replaced(ty),
        None => Substitution::Unchanged,
    }
}

fn substitute_at(ty: &Type, bindings: &BindingMap, depth: usize, max_depth: usize) -> Option<Type> {
    if depth > max_depth {
        tracing::warn!(
            target: "nova.generics",
            max_depth,
            "type nesting exceeds substitution depth limit"
        );
        return None;
    }

    match ty {
        Type::TypeVar(var) => bindings.get(var).cloned(),
        Type::Array(elem) => substitute_at(elem, bindings, depth + 1, max_depth).map(Type::array),
        Type::Wildcard(bound) => {
            let inner = bound.bound().filter(|inner| inner.contains_type_var())?;
            let replaced = substitute_at(inner, bindings, depth + 1, max_depth)?;
            Some(Type::Wildcard(bound.with_bound(replaced)))
        }
        Type::Class(ClassType { name, args }) if !args.is_empty() => {
            let mut changed = false;
            let new_args: Vec<Type> = args
                .iter()
                .map(|arg| match substitute_at(arg, bindings, depth + 1, max_depth) {
                    Some(replaced) => {
                        changed = true;
                        replaced
                    }
                    None => arg.clone(),
                })
                .collect();
            changed.then(|| Type::class(name.clone(), new_args))
        }
        Type::Class(_) | Type::Primitive(_) => None,
    }
}

/// Resolve the type variables of `ty` using the type arguments of `instance_type`.
///
/// Example: with `instance_type = Set<String>` and `ty = Iterator<E>` (where `E` is `Set`'s type
/// parameter) this returns `Iterator<String>`. [`Substitution::NoBindings`] means
/// `instance_type` carried no usable generic information, which callers must not mistake for
/// an identity substitution.
pub fn replace_class_generics(
    env: &dyn TypeEnv,
    instance_type: &Type,
    ty: &Type,
    max_depth: usize,
) -> Substitution {
    let bindings = type_variables_mapping(env, instance_type);
    if bindings.is_empty() {
        return Substitution::NoBindings;
    }
    substitute(ty, &bindings, max_depth)
}
