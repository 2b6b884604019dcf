use std::collections::HashSet;

use nova_generics::{
    parse_method_signature, ClassDef, ClassKind, ClassRegistry, ClassStore, ClasspathClassStub,
    GenericsConfig, MethodDef, MethodId, PrimitiveType, StubClasspath, Type, TypeResolver,
    TypeVar, TypeVarEnv, TypeVarOwner,
};
use pretty_assertions::assert_eq;

use super::support::{class_def, class_var, init_tracing, jdk_classpath, string};

/// `<U> U pick(K key)` declared on `class`, whose type parameters are `class_params`.
fn pick_method(class: &ClassDef) -> MethodDef {
    let id = MethodId::new(
        class.name.clone(),
        "pick",
        "(Ljava/lang/Object;)Ljava/lang/Object;",
    );
    let sig = parse_method_signature(&id, &class.type_params, "<U:Ljava/lang/Object;>(TK;)TU;")
        .expect("valid method signature");
    MethodDef {
        id,
        type_params: sig.type_params,
        params: sig.params,
        return_type: sig.return_type,
        is_static: false,
    }
}

/// `interface Source<T>` and `class Impl<K> implements Source<String>`.
fn source_and_impl() -> ClassStore {
    let mut store = ClassStore::new();
    store.add_class(class_def(
        "com.example.Source",
        ClassKind::Interface,
        &["T"],
        None,
        vec![],
    ));
    let mut imp = class_def(
        "com.example.Impl",
        ClassKind::Class,
        &["K"],
        Some(Type::object()),
        vec![Type::class("com.example.Source", vec![string()])],
    );
    let pick = pick_method(&imp);
    imp.methods.push(pick);
    store.add_class(imp);
    store
}

fn var_set(env: &TypeVarEnv) -> HashSet<TypeVar> {
    env.iter().cloned().collect()
}

#[test]
fn environment_covers_class_ancestors_and_method() {
    init_tracing();
    let store = source_and_impl();
    let classpath = jdk_classpath();
    let resolver = TypeResolver::new(&store, &classpath);

    let imp = store_class(&store, "com.example.Impl");
    let pick = imp.method("pick").expect("pick is declared");
    let env = resolver.known_type_vars_at_method(pick);

    let expected: HashSet<TypeVar> = [
        TypeVar::of_class("com.example.Impl", 0, "K"),
        TypeVar::of_class("com.example.Source", 0, "T"),
        TypeVar::new(TypeVarOwner::Method(pick.id.clone()), 0, "U"),
    ]
    .into_iter()
    .collect();
    assert_eq!(var_set(&env), expected);

    // The parsed parameter refers to the class's `K`, the return type to the method's `U`.
    assert_eq!(pick.params, vec![class_var("com.example.Impl", 0, "K")]);
    assert!(env.contains(&TypeVar::new(TypeVarOwner::Method(pick.id.clone()), 0, "U")));
}

fn store_class<'s>(store: &'s ClassStore, name: &str) -> &'s ClassDef {
    store.class(name).expect("class is registered")
}

#[test]
fn classpath_only_ancestors_contribute_their_variables() {
    let mut store = ClassStore::new();
    let mut names = class_def(
        "com.example.Names",
        ClassKind::Class,
        &[],
        Some(Type::class("java.util.ArrayList", vec![string()])),
        vec![],
    );
    let id = MethodId::new("com.example.Names", "first", "()Ljava/lang/String;");
    names.methods.push(MethodDef {
        id,
        type_params: vec![],
        params: vec![],
        return_type: string(),
        is_static: false,
    });
    let first = names.methods[0].clone();
    store.add_class(names);
    let classpath = jdk_classpath();

    let resolver = TypeResolver::new(&store, &classpath);
    let env = resolver.known_type_vars_at_method(&first);
    let expected: HashSet<TypeVar> = [
        TypeVar::of_class("java.util.ArrayList", 0, "E"),
        TypeVar::of_class("java.util.AbstractList", 0, "E"),
        TypeVar::of_class("java.util.List", 0, "E"),
        TypeVar::of_class("java.util.Collection", 0, "E"),
        TypeVar::of_class("java.lang.Iterable", 0, "T"),
    ]
    .into_iter()
    .collect();
    assert_eq!(var_set(&env), expected);

    let config = GenericsConfig {
        classpath_ancestors: false,
        ..GenericsConfig::default()
    };
    let local_only = TypeResolver::with_config(&store, &classpath, config);
    let env = local_only.known_type_vars_at_method(&first);
    assert!(env.is_empty());
    assert!(env.ptr_eq(&TypeVarEnv::empty()));
}

#[test]
fn second_lookup_returns_the_cached_set() {
    let store = source_and_impl();
    let classpath = jdk_classpath();
    let resolver = TypeResolver::new(&store, &classpath);
    let pick = store_class(&store, "com.example.Impl")
        .method("pick")
        .expect("pick is declared")
        .clone();

    let first = resolver.known_type_vars_at_method(&pick);
    let second = resolver.known_type_vars_at_method(&pick);
    assert!(first.ptr_eq(&second));
}

#[test]
fn concurrent_lookups_agree() {
    let store = source_and_impl();
    let classpath = jdk_classpath();
    let resolver = TypeResolver::new(&store, &classpath);
    let pick = store_class(&store, "com.example.Impl")
        .method("pick")
        .expect("pick is declared")
        .clone();

    let (shared, method) = (&resolver, &pick);
    let results: Vec<TypeVarEnv> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(move || shared.known_type_vars_at_method(method)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker panicked"))
            .collect()
    });

    let stored = resolver.known_type_vars_at_method(&pick);
    assert_eq!(stored.len(), 3);
    for env in &results {
        assert!(env.ptr_eq(&stored));
    }
}

#[test]
fn cyclic_metadata_terminates() {
    let stubs = [
        ClasspathClassStub {
            binary_name: "broken.A".to_string(),
            access_flags: 0x0001,
            super_binary_name: Some("broken.B".to_string()),
            interfaces: vec![],
            signature: Some("<X:Ljava/lang/Object;>Lbroken/B;".to_string()),
        },
        ClasspathClassStub {
            binary_name: "broken.B".to_string(),
            access_flags: 0x0001,
            super_binary_name: Some("broken.A".to_string()),
            interfaces: vec![],
            signature: None,
        },
    ];
    let classpath = StubClasspath::from_stubs(&stubs);
    let mut store = ClassStore::new();
    let mut child = class_def(
        "com.example.Child",
        ClassKind::Class,
        &[],
        Some(Type::class("broken.A", vec![string()])),
        vec![],
    );
    let id = MethodId::new("com.example.Child", "run", "()V");
    child.methods.push(MethodDef {
        id,
        type_params: vec![],
        params: vec![],
        return_type: Type::Primitive(PrimitiveType::Void),
        is_static: false,
    });
    let run = child.methods[0].clone();
    store.add_class(child);

    let resolver = TypeResolver::new(&store, &classpath);
    let names: Vec<&str> = resolver
        .ancestors("com.example.Child")
        .iter()
        .map(|info| info.name)
        .collect();
    assert_eq!(names, vec!["broken.A", "broken.B"]);

    let env = resolver.known_type_vars_at_method(&run);
    assert_eq!(
        var_set(&env),
        [TypeVar::of_class("broken.A", 0, "X")].into_iter().collect()
    );
}

#[test]
fn self_referential_hierarchy_never_reports_the_start_class() {
    let mut store = ClassStore::new();
    store.add_class(class_def(
        "com.example.X",
        ClassKind::Class,
        &[],
        Some(Type::class("com.example.Y", vec![])),
        vec![],
    ));
    store.add_class(class_def(
        "com.example.Y",
        ClassKind::Class,
        &[],
        Some(Type::class("com.example.X", vec![])),
        vec![],
    ));
    let classpath = StubClasspath::new();
    let resolver = TypeResolver::new(&store, &classpath);

    let names: Vec<&str> = resolver
        .ancestors("com.example.X")
        .iter()
        .map(|info| info.name)
        .collect();
    assert_eq!(names, vec!["com.example.Y"]);
}

#[test]
fn ancestor_walk_is_bounded() {
    let mut store = ClassStore::new();
    for idx in 0..5 {
        store.add_class(class_def(
            &format!("com.example.C{idx}"),
            ClassKind::Class,
            &[],
            Some(Type::class(format!("com.example.C{}", idx + 1), vec![])),
            vec![],
        ));
    }
    let classpath = StubClasspath::new();
    let config = GenericsConfig {
        max_ancestors: 2,
        ..GenericsConfig::default()
    };
    let resolver = TypeResolver::with_config(&store, &classpath, config);

    let names: Vec<&str> = resolver
        .ancestors("com.example.C0")
        .iter()
        .map(|info| info.name)
        .collect();
    assert_eq!(names, vec!["com.example.C1", "com.example.C2"]);
}
