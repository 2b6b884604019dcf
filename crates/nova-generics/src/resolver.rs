use crate::binding::{self, BindingMap};
use crate::classpath::ClasspathProvider;
use crate::config::GenericsConfig;
use crate::env::{self, MethodTypeVarsCache, TypeVarEnv};
use crate::error::Result;
use crate::hierarchy;
use crate::infer::{self, Invocation, MethodDetails};
use crate::model::{ClassInfo, ClassRegistry, MethodDef, TypeEnv, TypeParamDef};
use crate::subst::{self, Substitution};
use crate::ty::Type;

/// Generic type resolution for one analysis run.
///
/// Bundles the decompiled class registry, the classpath metadata and the per-method
/// type-variable cache. The resolver is `Sync`: per-class work may share one instance across
/// worker threads.
pub struct TypeResolver<'a> {
    registry: &'a (dyn ClassRegistry + Sync),
    classpath: &'a (dyn ClasspathProvider + Sync),
    config: GenericsConfig,
    method_type_vars: MethodTypeVarsCache,
}

impl<'a> TypeResolver<'a> {
    pub fn new(
        registry: &'a (dyn ClassRegistry + Sync),
        classpath: &'a (dyn ClasspathProvider + Sync),
    ) -> Self {
        Self::with_config(registry, classpath, GenericsConfig::default())
    }

    pub fn with_config(
        registry: &'a (dyn ClassRegistry + Sync),
        classpath: &'a (dyn ClasspathProvider + Sync),
        config: GenericsConfig,
    ) -> Self {
        Self {
            registry,
            classpath,
            config,
            method_type_vars: MethodTypeVarsCache::new(),
        }
    }

    pub fn config(&self) -> &GenericsConfig {
        &self.config
    }

    /// Declared type parameters of `ty`'s class; empty for unknown, non-generic and non-class
    /// types.
    pub fn class_generics(&self, ty: &Type) -> &'a [TypeParamDef] {
        match ty.class_name() {
            Some(name) => self.lookup(name).map(|info| info.type_params).unwrap_or(&[]),
            None => &[],
        }
    }

    /// All type variables visible inside `method`, computed once per method for this run.
    pub fn known_type_vars_at_method(&self, method: &MethodDef) -> TypeVarEnv {
        env::type_vars_at_method(self, &self.method_type_vars, method, &self.config)
    }

    pub fn type_variables_mapping(&self, class_type: &Type) -> BindingMap {
        binding::type_variables_mapping(self, class_type)
    }

    pub fn replace_type_variables_using_map(&self, ty: &Type, bindings: &BindingMap) -> Substitution {
        subst::substitute(ty, bindings, self.config.max_substitution_depth)
    }

    /// See [`subst::replace_class_generics`].
    pub fn replace_class_generics(&self, instance_type: &Type, ty: &Type) -> Substitution {
        subst::replace_class_generics(self, instance_type, ty, self.config.max_substitution_depth)
    }

    /// See [`infer::replace_method_generics`].
    pub fn replace_method_generics(
        &self,
        call: &dyn Invocation,
        callee: &dyn MethodDetails,
        ty: &Type,
    ) -> Result<Option<Type>> {
        infer::replace_method_generics(call, callee, ty)
    }

    pub fn ancestors(&self, class: &str) -> Vec<ClassInfo<'_>> {
        hierarchy::ancestors(self, class, &self.config)
    }

    pub fn instantiate_as_supertype(&self, ty: &Type, target: &str) -> Option<Type> {
        hierarchy::instantiate_as_supertype(self, ty, target, &self.config)
    }

    fn lookup(&self, name: &str) -> Option<ClassInfo<'a>> {
        let registry = self.registry;
        if let Some(def) = registry.class(name) {
            return Some(def.into());
        }
        let classpath = self.classpath;
        let class = classpath.class_details(name)?;
        tracing::trace!(target: "nova.generics", class = name, "using classpath metadata");
        Some(class.into())
    }
}

impl TypeEnv for TypeResolver<'_> {
    fn class_info(&self, name: &str) -> Option<ClassInfo<'_>> {
        self.lookup(name)
    }
}
