//! JVM descriptors and generic signatures (JVMS 4.3, 4.7.9.1) parsed straight into [`Type`]s.
//!
//! Classpath metadata only carries signature strings; this is how external classes get their
//! declared type parameters.

use crate::error::{GenericsError, Result};
use crate::model::{MethodId, TypeParamDef};
use crate::ty::{PrimitiveType, Type, TypeVar, TypeVarOwner, WildcardBound};

#[derive(Debug, Clone, PartialEq)]
pub struct ClassSignature {
    pub type_params: Vec<TypeParamDef>,
    pub super_class: Type,
    pub interfaces: Vec<Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodSignature {
    pub type_params: Vec<TypeParamDef>,
    pub params: Vec<Type>,
    pub return_type: Type,
    pub throws: Vec<Type>,
}

pub fn parse_field_descriptor(desc: &str) -> Result<Type> {
    let mut parser = Parser::new(desc, Grammar::Descriptor, Vec::new());
    let ty = parser.java_type()?;
    parser.expect_end()?;
    Ok(ty)
}

/// Parse `(ILjava/lang/String;)V` into parameter types and the return type.
pub fn parse_method_descriptor(desc: &str) -> Result<(Vec<Type>, Type)> {
    let mut parser = Parser::new(desc, Grammar::Descriptor, Vec::new());
    let (params, return_type) = parser.method_types()?;
    parser.expect_end()?;
    Ok((params, return_type))
}

pub fn parse_field_signature(scope: &[TypeParamDef], sig: &str) -> Result<Type> {
    let mut parser = Parser::new(sig, Grammar::Signature, scope.to_vec());
    let ty = parser.reference_type()?;
    parser.expect_end()?;
    Ok(ty)
}

/// Parse a `Signature` attribute of the class `owner` (binary name).
pub fn parse_class_signature(owner: &str, sig: &str) -> Result<ClassSignature> {
    let mut parser = Parser::new(sig, Grammar::Signature, Vec::new());
    let type_params = parser.type_params(&TypeVarOwner::Class(owner.into()))?;
    let super_class = parser.class_type()?;
    let mut interfaces = Vec::new();
    while !parser.at_end() {
        interfaces.push(parser.class_type()?);
    }
    Ok(ClassSignature {
        type_params,
        super_class,
        interfaces,
    })
}

/// Parse a method `Signature` attribute. Method type parameters shadow `class_params`.
pub fn parse_method_signature(
    method: &MethodId,
    class_params: &[TypeParamDef],
    sig: &str,
) -> Result<MethodSignature> {
    let mut parser = Parser::new(sig, Grammar::Signature, class_params.to_vec());
    let type_params = parser.type_params(&TypeVarOwner::Method(method.clone()))?;
    let (params, return_type) = parser.method_types()?;
    let mut throws = Vec::new();
    while parser.eat(b'^') {
        throws.push(parser.reference_type()?);
    }
    parser.expect_end()?;
    Ok(MethodSignature {
        type_params,
        params,
        return_type,
        throws,
    })
}

/// Nesting limit for array dimensions, type arguments and wildcard bounds combined.
///
/// JVMS 4.3.2 allows at most 255 array dimensions.
const MAX_NESTING: usize = 300;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Grammar {
    Descriptor,
    Signature,
}

struct Parser<'s> {
    input: &'s str,
    pos: usize,
    grammar: Grammar,
    /// Visible type parameters; later entries shadow earlier ones.
    scope: Vec<TypeParamDef>,
    /// Off while scanning type parameter names, before the names can be resolved.
    resolve_vars: bool,
    depth: usize,
}

impl<'s> Parser<'s> {
    fn new(input: &'s str, grammar: Grammar, scope: Vec<TypeParamDef>) -> Self {
        Self {
            input,
            pos: 0,
            grammar,
            scope,
            resolve_vars: true,
            depth: 0,
        }
    }

    fn error(&self) -> GenericsError {
        match self.grammar {
            Grammar::Descriptor => GenericsError::InvalidDescriptor(self.input.to_string()),
            Grammar::Signature => GenericsError::InvalidSignature(self.input.to_string()),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn expect(&mut self, b: u8) -> Result<()> {
        if self.eat(b) {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    fn expect_end(&self) -> Result<()> {
        if self.at_end() {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    /// A non-empty run of bytes up to (not including) the first of `stops`.
    fn identifier(&mut self, stops: &[u8]) -> Result<&'s str> {
        let input = self.input;
        let start = self.pos;
        loop {
            match self.peek() {
                None => return Err(self.error()),
                Some(b) if stops.contains(&b) => break,
                Some(_) => self.pos += 1,
            }
        }
        if self.pos == start {
            return Err(self.error());
        }
        Ok(&input[start..self.pos])
    }

    fn method_types(&mut self) -> Result<(Vec<Type>, Type)> {
        self.expect(b'(')?;
        let mut params = Vec::new();
        while !self.eat(b')') {
            if self.at_end() {
                return Err(self.error());
            }
            params.push(self.java_type()?);
        }
        let return_type = if self.eat(b'V') {
            Type::Primitive(PrimitiveType::Void)
        } else {
            self.java_type()?
        };
        Ok((params, return_type))
    }

    fn java_type(&mut self) -> Result<Type> {
        let primitive = match self.peek() {
            Some(b'B') => PrimitiveType::Byte,
            Some(b'C') => PrimitiveType::Char,
            Some(b'D') => PrimitiveType::Double,
            Some(b'F') => PrimitiveType::Float,
            Some(b'I') => PrimitiveType::Int,
            Some(b'J') => PrimitiveType::Long,
            Some(b'S') => PrimitiveType::Short,
            Some(b'Z') => PrimitiveType::Boolean,
            _ => return self.reference_type(),
        };
        self.pos += 1;
        Ok(Type::Primitive(primitive))
    }

    /// Run `parse` one nesting level deeper, failing past [`MAX_NESTING`].
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_NESTING {
            return Err(self.error());
        }
        self.depth += 1;
        let out = parse(self);
        self.depth -= 1;
        out
    }

    fn reference_type(&mut self) -> Result<Type> {
        self.nested(Self::reference_type_at)
    }

    fn reference_type_at(&mut self) -> Result<Type> {
        match self.peek() {
            Some(b'L') => self.class_type(),
            Some(b'[') => {
                self.pos += 1;
                Ok(Type::array(self.java_type()?))
            }
            Some(b'T') if self.grammar == Grammar::Signature => self.type_var(),
            _ => Err(self.error()),
        }
    }

    fn class_type(&mut self) -> Result<Type> {
        self.expect(b'L')?;
        let mut name = String::new();
        let mut args: Vec<Type>;
        loop {
            let segment = self.identifier(b"<.;")?;
            if name.is_empty() {
                name.push_str(&segment.replace('/', "."));
            } else {
                name.push('$');
                name.push_str(segment);
            }
            // Only the innermost segment keeps its arguments.
            args = if self.peek() == Some(b'<') {
                if self.grammar == Grammar::Descriptor {
                    return Err(self.error());
                }
                self.type_args()?
            } else {
                Vec::new()
            };
            if self.eat(b'.') {
                continue;
            }
            self.expect(b';')?;
            break;
        }
        Ok(Type::class(name, args))
    }

    fn type_args(&mut self) -> Result<Vec<Type>> {
        self.nested(Self::type_args_at)
    }

    fn type_args_at(&mut self) -> Result<Vec<Type>> {
        self.expect(b'<')?;
        let mut args = Vec::new();
        while !self.eat(b'>') {
            let arg = match self.peek() {
                Some(b'*') => {
                    self.pos += 1;
                    Type::Wildcard(WildcardBound::Unbounded)
                }
                Some(b'+') => {
                    self.pos += 1;
                    Type::Wildcard(WildcardBound::Extends(Box::new(self.reference_type()?)))
                }
                Some(b'-') => {
                    self.pos += 1;
                    Type::Wildcard(WildcardBound::Super(Box::new(self.reference_type()?)))
                }
                Some(_) => self.reference_type()?,
                None => return Err(self.error()),
            };
            args.push(arg);
        }
        if args.is_empty() {
            return Err(self.error());
        }
        Ok(args)
    }

    fn type_var(&mut self) -> Result<Type> {
        self.expect(b'T')?;
        let name = self.identifier(b";")?;
        self.expect(b';')?;
        if !self.resolve_vars {
            return Ok(Type::object());
        }
        self.scope
            .iter()
            .rev()
            .find(|tp| &*tp.var.name == name)
            .map(TypeParamDef::as_type)
            .ok_or_else(|| self.error())
    }

    /// `<T:Ljava/lang/Object;U::Ljava/lang/Comparable<TT;>;>`
    ///
    /// Bounds may mention any parameter of the same list, including later ones, so the header
    /// is scanned twice: once for the names, once for the bounds.
    fn type_params(&mut self, owner: &TypeVarOwner) -> Result<Vec<TypeParamDef>> {
        if self.peek() != Some(b'<') {
            return Ok(Vec::new());
        }
        let start = self.pos;

        self.resolve_vars = false;
        let names: Vec<&'s str> = self
            .type_param_header()?
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        let mut defs: Vec<TypeParamDef> = names
            .iter()
            .enumerate()
            .map(|(idx, name)| TypeParamDef {
                var: TypeVar::new(owner.clone(), idx as u32, *name),
                bounds: Vec::new(),
            })
            .collect();
        self.scope.extend(defs.iter().cloned());

        self.pos = start;
        self.resolve_vars = true;
        for (def, (_, bounds)) in defs.iter_mut().zip(self.type_param_header()?) {
            def.bounds = bounds;
        }
        Ok(defs)
    }

    fn type_param_header(&mut self) -> Result<Vec<(&'s str, Vec<Type>)>> {
        self.expect(b'<')?;
        let mut out = Vec::new();
        while !self.eat(b'>') {
            let name = self.identifier(b":")?;
            self.expect(b':')?;
            let mut bounds = Vec::new();
            if self.peek() != Some(b':') {
                bounds.push(self.reference_type()?);
            }
            while self.eat(b':') {
                bounds.push(self.reference_type()?);
            }
            if bounds.is_empty() {
                bounds.push(Type::object());
            }
            out.push((name, bounds));
        }
        if out.is_empty() {
            return Err(self.error());
        }
        Ok(out)
    }
}
