//! Declaration metadata for classes outside the decompiled input.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::model::{ClassInfo, ClassKind, ClassSource, TypeParamDef};
use crate::signature::parse_class_signature;
use crate::ty::Type;

const ACC_INTERFACE: u16 = 0x0200;

/// Raw per-class classpath record, as produced by a classpath indexer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClasspathClassStub {
    pub binary_name: String,
    pub access_flags: u16,
    pub super_binary_name: Option<String>,
    pub interfaces: Vec<String>,
    /// The class `Signature` attribute, if the class was compiled with generics.
    pub signature: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClasspathClass {
    pub name: Arc<str>,
    pub kind: ClassKind,
    pub type_params: Vec<TypeParamDef>,
    pub super_class: Option<Type>,
    pub interfaces: Vec<Type>,
}

impl<'a> From<&'a ClasspathClass> for ClassInfo<'a> {
    fn from(class: &'a ClasspathClass) -> Self {
        ClassInfo {
            name: &class.name,
            kind: class.kind,
            type_params: &class.type_params,
            super_class: class.super_class.as_ref(),
            interfaces: &class.interfaces,
            source: ClassSource::Classpath,
        }
    }
}

/// Supplies metadata for classes that were not decompiled.
///
/// Returns `None` for unknown classes. A known class with no type parameters is non-generic.
pub trait ClasspathProvider {
    fn class_details(&self, name: &str) -> Option<&ClasspathClass>;
}

/// In-memory [`ClasspathProvider`].
#[derive(Debug, Clone, Default)]
pub struct StubClasspath {
    classes: HashMap<Arc<str>, ClasspathClass>,
}

impl StubClasspath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_stubs<'s>(stubs: impl IntoIterator<Item = &'s ClasspathClassStub>) -> Self {
        let mut classpath = Self::new();
        for stub in stubs {
            classpath.insert_stub(stub);
        }
        classpath
    }

    pub fn insert(&mut self, class: ClasspathClass) {
        self.classes.insert(class.name.clone(), class);
    }

    /// Record `stub`, parsing its generic signature when present.
    ///
    /// A malformed signature does not drop the class: it is recorded from its raw super names,
    /// without type parameters.
    pub fn insert_stub(&mut self, stub: &ClasspathClassStub) {
        let kind = if stub.access_flags & ACC_INTERFACE != 0 {
            ClassKind::Interface
        } else {
            ClassKind::Class
        };

        let parsed = match stub.signature.as_deref() {
            Some(sig) => match parse_class_signature(&stub.binary_name, sig) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    tracing::warn!(
                        target: "nova.generics",
                        class = %stub.binary_name,
                        error = %err,
                        "ignoring malformed class signature"
                    );
                    None
                }
            },
            None => None,
        };

        let class = match parsed {
            Some(sig) => ClasspathClass {
                name: stub.binary_name.as_str().into(),
                kind,
                type_params: sig.type_params,
                // Interface signatures still name `java.lang.Object` as their superclass.
                super_class: match kind {
                    ClassKind::Interface => None,
                    ClassKind::Class => Some(sig.super_class),
                },
                interfaces: sig.interfaces,
            },
            None => ClasspathClass {
                name: stub.binary_name.as_str().into(),
                kind,
                type_params: Vec::new(),
                super_class: match kind {
                    ClassKind::Interface => None,
                    ClassKind::Class => stub
                        .super_binary_name
                        .as_deref()
                        .map(|name| Type::class(name, vec![])),
                },
                interfaces: stub
                    .interfaces
                    .iter()
                    .map(|name| Type::class(name.as_str(), vec![]))
                    .collect(),
            },
        };
        self.insert(class);
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClasspathProvider for StubClasspath {
    fn class_details(&self, name: &str) -> Option<&ClasspathClass> {
        self.classes.get(name)
    }
}
