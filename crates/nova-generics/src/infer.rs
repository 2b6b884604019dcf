//! Best-effort resolution of a method's own type variables at a call site.

use crate::error::{GenericsError, Result};
use crate::model::MethodDef;
use crate::ty::Type;

/// A method invocation in the reconstructed code.
pub trait Invocation {
    /// Number of leading arguments that are not declared parameters (the receiver of an
    /// instance call).
    fn first_arg_offset(&self) -> usize;

    fn arg_count(&self) -> usize;

    /// Static type of the argument at `index`, counting from the first (implicit) argument.
    fn arg_type(&self, index: usize) -> Option<&Type>;
}

/// The callee side of an invocation.
pub trait MethodDetails {
    /// Declared parameter types, in order, without the receiver.
    fn arg_types(&self) -> &[Type];
}

impl MethodDetails for MethodDef {
    fn arg_types(&self) -> &[Type] {
        &self.params
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvokeKind {
    Static,
    Virtual,
    Interface,
    Special,
}

/// A decoded invoke instruction: the receiver (for non-static calls) followed by the arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct CallSite {
    pub kind: InvokeKind,
    pub args: Vec<Type>,
}

impl Invocation for CallSite {
    fn first_arg_offset(&self) -> usize {
        match self.kind {
            InvokeKind::Static => 0,
            InvokeKind::Virtual | InvokeKind::Interface | InvokeKind::Special => 1,
        }
    }

    fn arg_count(&self) -> usize {
        self.args.len()
    }

    fn arg_type(&self, index: usize) -> Option<&Type> {
        self.args.get(index)
    }
}

/// Resolve `ty` (expected to be one of the callee's own type variables) from the call arguments.
///
/// Returns the static type of the first argument whose declared parameter type is exactly `ty`.
/// Only whole-parameter matches count: a parameter declared as `List<T>` says nothing about `T`
/// here. `Ok(None)` means the variable could not be resolved; an error means the call site has
/// fewer arguments than the callee declares.
pub fn replace_method_generics(
    call: &dyn Invocation,
    callee: &dyn MethodDetails,
    ty: &Type,
) -> Result<Option<Type>> {
    let offset = call.first_arg_offset();
    for (idx, param) in callee.arg_types().iter().enumerate() {
        let index = idx + offset;
        let Some(arg) = call.arg_type(index) else {
            return Err(GenericsError::MissingCallArgument {
                index,
                arg_count: call.arg_count(),
            });
        };
        if param == ty {
            return Ok(Some(arg.clone()));
        }
    }
    Ok(None)
}
