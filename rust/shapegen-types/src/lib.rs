#![deny(unsafe_code)]

//! Declaration model for shapegen.
//!
//! These types describe what the code generator is given, not what it
//! produces: class declarations with their method signatures, and the
//! envelope configuration attached to a class. Whatever reads the user's
//! source (an analyzer plugin, a build step, a hand-written manifest) fills
//! these in; `shapegen-codegen` consumes them.
//!
//! Everything derives [`Facet`] so a declaration registry can be loaded from
//! JSON.

use facet::Facet;

/// Factory method used when the envelope configuration does not name one.
pub const DEFAULT_FACTORY_NAME: &str = "fromJson";

/// One declared parameter, in declaration order.
#[derive(Facet, Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    /// Type expression exactly as written (e.g. "Map<String, dynamic>").
    pub ty: String,
    pub name: String,
}

impl Parameter {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

/// Signature of a method, copied verbatim into generated code.
#[derive(Facet, Clone, Debug, PartialEq, Eq)]
pub struct MethodSignature {
    /// Method name (e.g. "getTasks"). Unique within its class.
    pub name: String,

    /// Declared return type, generics included (e.g. "Future<List<Task>>").
    pub return_type: String,

    /// Parameters in declaration order.
    #[facet(default)]
    pub params: Vec<Parameter>,
}

impl MethodSignature {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            params: Vec::new(),
        }
    }

    /// Append a parameter.
    pub fn param(mut self, ty: impl Into<String>, name: impl Into<String>) -> Self {
        self.params.push(Parameter::new(ty, name));
        self
    }

    /// The parameter holding the decoded JSON value: the first one declared.
    pub fn input_param(&self) -> Option<&Parameter> {
        self.params.first()
    }
}

/// A method as declared on a class.
#[derive(Facet, Clone, Debug, PartialEq, Eq)]
pub struct MethodDecl {
    pub signature: MethodSignature,

    /// Abstract methods get generated bodies; concrete ones are left alone.
    #[facet(default)]
    pub is_abstract: bool,

    /// Doc comment text, without comment markers.
    #[facet(default)]
    pub doc: Option<String>,
}

impl MethodDecl {
    pub fn abstract_method(signature: MethodSignature) -> Self {
        Self {
            signature,
            is_abstract: true,
            doc: None,
        }
    }

    pub fn concrete_method(signature: MethodSignature) -> Self {
        Self {
            signature,
            is_abstract: false,
            doc: None,
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

/// Envelope configuration attached to a class.
///
/// An absent or empty `wrapper_type` disables envelope matching entirely.
#[derive(Facet, Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvelopeConfig {
    /// Name of the envelope type (e.g. "BaseResult").
    #[facet(default)]
    pub wrapper_type: Option<String>,

    /// Method that builds the envelope from raw data. Defaults to
    /// [`DEFAULT_FACTORY_NAME`] when absent.
    #[facet(default)]
    pub wrapper_factory_name: Option<String>,
}

impl EnvelopeConfig {
    /// Config with envelope matching turned on for `wrapper_type`.
    pub fn wrapped(wrapper_type: impl Into<String>) -> Self {
        Self {
            wrapper_type: Some(wrapper_type.into()),
            wrapper_factory_name: None,
        }
    }

    pub fn with_factory_name(mut self, name: impl Into<String>) -> Self {
        self.wrapper_factory_name = Some(name.into());
        self
    }

    /// The envelope type name, if envelope matching is enabled.
    pub fn wrapper(&self) -> Option<&str> {
        self.wrapper_type
            .as_deref()
            .map(str::trim)
            .filter(|w| !w.is_empty())
    }

    /// The envelope factory name. An explicitly empty name stays empty.
    pub fn factory_name(&self) -> &str {
        self.wrapper_factory_name
            .as_deref()
            .map(str::trim)
            .unwrap_or(DEFAULT_FACTORY_NAME)
    }
}

/// What kind of declaration a registry entry is.
#[derive(Facet, Clone, Copy, Debug, PartialEq, Eq)]
#[facet(rename_all = "snake_case")]
#[repr(u8)]
pub enum DeclarationKind {
    Class,
    AbstractClass,
    Mixin,
    Function,
    Enum,
}

impl DeclarationKind {
    /// Whether generated code can implement this declaration.
    pub fn is_class_like(self) -> bool {
        matches!(
            self,
            DeclarationKind::Class | DeclarationKind::AbstractClass
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeclarationKind::Class => "class",
            DeclarationKind::AbstractClass => "abstract class",
            DeclarationKind::Mixin => "mixin",
            DeclarationKind::Function => "function",
            DeclarationKind::Enum => "enum",
        }
    }
}

/// A class declaration as the generator sees it.
#[derive(Facet, Clone, Debug, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: String,

    /// Methods in declaration order.
    #[facet(default)]
    pub methods: Vec<MethodDecl>,

    #[facet(default)]
    pub doc: Option<String>,
}

impl ClassDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            doc: None,
        }
    }

    pub fn method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    /// Methods that need a generated body.
    pub fn abstract_methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.methods.iter().filter(|m| m.is_abstract)
    }
}

/// An entry in the declaration registry.
///
/// Only entries carrying a `config` are generation targets; the config plays
/// the role of the marker annotation on the original declaration.
#[derive(Facet, Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclarationKind,

    #[facet(default)]
    pub config: Option<EnvelopeConfig>,

    #[facet(default)]
    pub methods: Vec<MethodDecl>,

    #[facet(default)]
    pub doc: Option<String>,
}

impl Declaration {
    pub fn class(class: ClassDecl, config: Option<EnvelopeConfig>) -> Self {
        Self {
            name: class.name,
            kind: DeclarationKind::AbstractClass,
            config,
            methods: class.methods,
            doc: class.doc,
        }
    }

    /// This declaration as a class, if it is class-like.
    pub fn to_class(&self) -> Option<ClassDecl> {
        if !self.kind.is_class_like() {
            return None;
        }
        Some(ClassDecl {
            name: self.name.clone(),
            methods: self.methods.clone(),
            doc: self.doc.clone(),
        })
    }
}

/// A registry of declarations, as stored in a manifest file.
#[derive(Facet, Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifest {
    #[facet(default)]
    pub declarations: Vec<Declaration>,
}
