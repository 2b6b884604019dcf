use std::collections::{HashSet, VecDeque};

use crate::binding::type_variables_mapping;
use crate::config::GenericsConfig;
use crate::model::{ClassInfo, ClassSource, TypeEnv};
use crate::subst::{substitute, Substitution};
use crate::ty::{ClassType, Type};

/// All transitive superclasses and superinterfaces of `class`, breadth-first.
///
/// Each ancestor is reported once and `class` itself is never reported, even when malformed
/// metadata makes the hierarchy cyclic. Ancestors that neither the registry nor the classpath
/// know about are skipped (along with everything above them). With
/// [`GenericsConfig::classpath_ancestors`] off, classpath-only classes are skipped the same way.
pub fn ancestors<'e>(env: &'e dyn TypeEnv, class: &str, config: &GenericsConfig) -> Vec<ClassInfo<'e>> {
    let mut out = Vec::new();
    let Some(start) = env.class_info(class) else {
        return out;
    };

    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(start.name);
    let mut queue: VecDeque<&str> = start.supertypes().filter_map(Type::class_name).collect();

    while let Some(name) = queue.pop_front() {
        if !seen.insert(name) {
            continue;
        }
        let Some(info) = env.class_info(name) else {
            continue;
        };
        if info.source == ClassSource::Classpath && !config.classpath_ancestors {
            continue;
        }
        if out.len() >= config.max_ancestors {
            tracing::warn!(
                target: "nova.generics",
                class,
                limit = config.max_ancestors,
                "ancestor walk truncated"
            );
            break;
        }
        queue.extend(info.supertypes().filter_map(Type::class_name));
        out.push(info);
    }

    out
}

/// View `ty` as an instantiation of the supertype `target`, substituting type arguments along
/// the way.
///
/// Example: `ArrayList<String>` viewed as `java.util.List` is `List<String>`. Raw instantiations
/// (`ArrayList`) yield raw supertypes. Returns `None` when `target` is not reachable.
pub fn instantiate_as_supertype(
    env: &dyn TypeEnv,
    ty: &Type,
    target: &str,
    config: &GenericsConfig,
) -> Option<Type> {
    let Type::Class(_) = ty else {
        return None;
    };

    let mut queue: VecDeque<Type> = VecDeque::new();
    let mut seen: HashSet<Type> = HashSet::new();
    queue.push_back(ty.clone());

    while let Some(current) = queue.pop_front() {
        let Type::Class(ClassType { name, .. }) = &current else {
            continue;
        };
        if &**name == target {
            return Some(current);
        }
        if !seen.insert(current.clone()) {
            continue;
        }
        if seen.len() > config.max_ancestors {
            tracing::warn!(
                target: "nova.generics",
                ty = %ty,
                target_class = target,
                limit = config.max_ancestors,
                "supertype search truncated"
            );
            return None;
        }

        let Some(info) = env.class_info(name) else {
            continue;
        };

        let bindings = type_variables_mapping(env, &current);
        // Raw use of a generic class (or an arity mismatch): nothing is known about the
        // arguments, so supertypes are walked erased.
        let raw = !info.type_params.is_empty() && bindings.is_empty();
        for sup in info.supertypes() {
            let next = if raw {
                sup.erasure()
            } else {
                match substitute(sup, &bindings, config.max_substitution_depth) {
                    Substitution::Replaced(replaced) => replaced,
                    Substitution::Unchanged | Substitution::NoBindings => sup.clone(),
                }
            };
            queue.push_back(next);
        }
    }

    None
}
