//! Shared fixtures: a small slice of the JDK as classpath metadata, plus helpers for declaring
//! decompiled classes.

use nova_generics::{
    ClassDef, ClassKind, ClasspathClassStub, StubClasspath, Type, TypeParamDef, TypeVar,
    TypeVarOwner,
};

const ACC_PUBLIC: u16 = 0x0001;
const ACC_INTERFACE: u16 = 0x0200;
const ACC_ABSTRACT: u16 = 0x0400;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn stub(name: &str, flags: u16, super_name: Option<&str>, signature: Option<&str>) -> ClasspathClassStub {
    ClasspathClassStub {
        binary_name: name.to_string(),
        access_flags: flags,
        super_binary_name: super_name.map(str::to_string),
        interfaces: Vec::new(),
        signature: signature.map(str::to_string),
    }
}

pub fn jdk_stubs() -> Vec<ClasspathClassStub> {
    let iface = ACC_PUBLIC | ACC_INTERFACE | ACC_ABSTRACT;
    let object = Some("java.lang.Object");
    vec![
        stub("java.lang.Object", ACC_PUBLIC, None, None),
        stub(
            "java.lang.String",
            ACC_PUBLIC,
            object,
            Some("Ljava/lang/Object;Ljava/lang/Comparable<Ljava/lang/String;>;"),
        ),
        stub(
            "java.lang.Comparable",
            iface,
            object,
            Some("<T:Ljava/lang/Object;>Ljava/lang/Object;"),
        ),
        stub(
            "java.lang.Iterable",
            iface,
            object,
            Some("<T:Ljava/lang/Object;>Ljava/lang/Object;"),
        ),
        stub(
            "java.util.Iterator",
            iface,
            object,
            Some("<E:Ljava/lang/Object;>Ljava/lang/Object;"),
        ),
        stub(
            "java.util.Collection",
            iface,
            object,
            Some("<E:Ljava/lang/Object;>Ljava/lang/Object;Ljava/lang/Iterable<TE;>;"),
        ),
        stub(
            "java.util.Set",
            iface,
            object,
            Some("<E:Ljava/lang/Object;>Ljava/lang/Object;Ljava/util/Collection<TE;>;"),
        ),
        stub(
            "java.util.List",
            iface,
            object,
            Some("<E:Ljava/lang/Object;>Ljava/lang/Object;Ljava/util/Collection<TE;>;"),
        ),
        stub(
            "java.util.AbstractList",
            ACC_PUBLIC | ACC_ABSTRACT,
            object,
            Some("<E:Ljava/lang/Object;>Ljava/lang/Object;Ljava/util/List<TE;>;"),
        ),
        stub(
            "java.util.ArrayList",
            ACC_PUBLIC,
            Some("java.util.AbstractList"),
            Some("<E:Ljava/lang/Object;>Ljava/util/AbstractList<TE;>;Ljava/util/List<TE;>;"),
        ),
        stub(
            "java.util.Map",
            iface,
            object,
            Some("<K:Ljava/lang/Object;V:Ljava/lang/Object;>Ljava/lang/Object;"),
        ),
    ]
}

pub fn jdk_classpath() -> StubClasspath {
    StubClasspath::from_stubs(&jdk_stubs())
}

pub fn string() -> Type {
    Type::class("java.lang.String", vec![])
}

pub fn integer() -> Type {
    Type::class("java.lang.Integer", vec![])
}

/// The `index`-th type parameter of `class`, as a type.
pub fn class_var(class: &str, index: u32, name: &str) -> Type {
    Type::TypeVar(TypeVar::of_class(class, index, name))
}

pub fn class_def(
    name: &str,
    kind: ClassKind,
    type_params: &[&str],
    super_class: Option<Type>,
    interfaces: Vec<Type>,
) -> ClassDef {
    ClassDef {
        name: name.into(),
        kind,
        type_params: TypeParamDef::declare(TypeVarOwner::Class(name.into()), type_params),
        super_class,
        interfaces,
        methods: Vec::new(),
    }
}
