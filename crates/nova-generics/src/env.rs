//! The set of type variables visible inside a method, and its per-run cache.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use crate::config::GenericsConfig;
use crate::hierarchy::ancestors;
use crate::model::{MethodDef, MethodId, TypeEnv, TypeParamDef};
use crate::ty::TypeVar;

/// Immutable, shareable set of type variables.
///
/// Every empty environment shares one allocation, so `ptr_eq` against [`TypeVarEnv::empty`] is a
/// cheap emptiness check.
#[derive(Debug, Clone)]
pub struct TypeVarEnv(Arc<HashSet<TypeVar>>);

impl TypeVarEnv {
    pub fn empty() -> Self {
        static EMPTY: OnceLock<Arc<HashSet<TypeVar>>> = OnceLock::new();
        Self(EMPTY.get_or_init(|| Arc::new(HashSet::new())).clone())
    }

    fn from_set(vars: HashSet<TypeVar>) -> Self {
        if vars.is_empty() {
            return Self::empty();
        }
        Self(Arc::new(vars))
    }

    pub fn contains(&self, var: &TypeVar) -> bool {
        self.0.contains(var)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeVar> {
        self.0.iter()
    }

    /// Whether both handles point at the same cached set.
    pub fn ptr_eq(&self, other: &TypeVarEnv) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for TypeVarEnv {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl Eq for TypeVarEnv {}

/// Compute the type variables visible in `method`: those of its declaring class, of every
/// ancestor of that class, and the method's own type parameters.
pub fn collect_type_vars_at_method(
    env: &dyn TypeEnv,
    method: &MethodDef,
    config: &GenericsConfig,
) -> TypeVarEnv {
    fn add(vars: &mut HashSet<TypeVar>, params: &[TypeParamDef]) {
        vars.extend(params.iter().map(|tp| tp.var.clone()));
    }

    let mut vars = HashSet::new();
    let class = &method.id.class;
    if let Some(info) = env.class_info(class) {
        add(&mut vars, info.type_params);
    }
    for ancestor in ancestors(env, class, config) {
        add(&mut vars, ancestor.type_params);
    }
    add(&mut vars, &method.type_params);

    TypeVarEnv::from_set(vars)
}

/// Per-analysis-run memo of [`collect_type_vars_at_method`] results, keyed by method.
///
/// The computation is a pure function of immutable declarations, so two threads racing on the
/// same method may both compute it; the first stored value wins and both callers get it back.
#[derive(Debug, Default)]
pub struct MethodTypeVarsCache {
    inner: Mutex<HashMap<MethodId, TypeVarEnv>>,
}

impl MethodTypeVarsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, method: &MethodId) -> Option<TypeVarEnv> {
        self.lock_inner().get(method).cloned()
    }

    /// Store `vars` for `method` unless a value is already present; returns the stored value.
    pub fn attach(&self, method: MethodId, vars: TypeVarEnv) -> TypeVarEnv {
        self.lock_inner().entry(method).or_insert(vars).clone()
    }

    pub fn len(&self) -> usize {
        self.lock_inner().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_inner().is_empty()
    }

    pub fn clear(&self) {
        self.lock_inner().clear();
    }

    #[track_caller]
    fn lock_inner(&self) -> MutexGuard<'_, HashMap<MethodId, TypeVarEnv>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(err) => {
                let loc = std::panic::Location::caller();
                tracing::error!(
                    target: "nova.generics",
                    file = loc.file(),
                    line = loc.line(),
                    column = loc.column(),
                    error = %err,
                    "mutex poisoned; continuing with recovered guard"
                );
                err.into_inner()
            }
        }
    }
}

/// Cached [`collect_type_vars_at_method`].
pub fn type_vars_at_method(
    env: &dyn TypeEnv,
    cache: &MethodTypeVarsCache,
    method: &MethodDef,
    config: &GenericsConfig,
) -> TypeVarEnv {
    if let Some(cached) = cache.get(&method.id) {
        tracing::trace!(target: "nova.generics", method = %method.id.name, "type var env cache hit");
        return cached;
    }

    // Computed outside the lock: a concurrent duplicate computation is harmless.
    let vars = collect_type_vars_at_method(env, method, config);
    tracing::debug!(
        target: "nova.generics",
        class = %method.id.class,
        method = %method.id.name,
        count = vars.len(),
        "computed type var env"
    );
    cache.attach(method.id.clone(), vars)
}
