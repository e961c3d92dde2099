//! Dart implementation generation.
//!
//! For a class whose abstract methods return JSON-backed models, generates a
//! subclass where every abstract method decodes its input:
//!
//! ```dart
//! abstract class TaskApi {
//!   Future<BaseResult<List<Task>>> getTasks(dynamic json);
//! }
//! ```
//!
//! becomes
//!
//! ```dart
//! class _$TaskApi extends TaskApi {
//!   @override
//!   Future<BaseResult<List<Task>>> getTasks(dynamic json) {
//!     return BaseResult<List<Task>>.fromJson(json, (data) => (data as List).map((e) => Task.fromJson(e)).toList());
//!   }
//! }
//! ```
//!
//! Signatures are copied verbatim; only bodies are generated. Concrete
//! methods never appear in the output; with the default `extends` relation
//! the generated class inherits them. [`ClassRelation::Implements`] suits
//! declarations with only abstract members and no generative constructor.

pub mod decode;
pub mod types;

use shapegen_types::{ClassDecl, EnvelopeConfig, MethodDecl, MethodSignature};

use self::decode::generate_return_stmt;
use self::types::PrimitiveTable;
use crate::classify::{TypeShape, classify};
use crate::code_writer::CodeWriter;
use crate::cw_write;
use crate::error::CodegenError;

/// Prefix that turns a class name into its generated implementation's name.
pub const DEFAULT_IMPL_PREFIX: &str = "_$";

/// How the generated class relates to the declared one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClassRelation {
    #[default]
    Extends,
    Implements,
}

impl ClassRelation {
    pub fn keyword(self) -> &'static str {
        match self {
            ClassRelation::Extends => "extends",
            ClassRelation::Implements => "implements",
        }
    }
}

/// Options for Dart code generation.
#[derive(Clone, Debug)]
pub struct DartCodegenOptions {
    /// Coerce lists of built-in scalars with a cast instead of `fromJson`.
    pub primitive_handling: bool,

    /// Prepended to the declared class name (e.g. `_$TaskApi`).
    pub impl_prefix: String,

    /// `extends` or `implements` the declared class.
    pub relation: ClassRelation,

    /// Spaces per indentation level.
    pub indent: usize,
}

impl Default for DartCodegenOptions {
    fn default() -> Self {
        Self {
            primitive_handling: true,
            impl_prefix: DEFAULT_IMPL_PREFIX.to_string(),
            relation: ClassRelation::default(),
            indent: 2,
        }
    }
}

impl DartCodegenOptions {
    pub fn primitives(&self) -> PrimitiveTable {
        if self.primitive_handling {
            PrimitiveTable::dart()
        } else {
            PrimitiveTable::empty()
        }
    }

    pub fn impl_name(&self, class_name: &str) -> String {
        format!("{}{class_name}", self.impl_prefix)
    }
}

/// One generated method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedMethod {
    pub signature: MethodSignature,
    pub shape: TypeShape,
    /// The `return` statement.
    pub body: String,
    pub doc: Option<String>,
}

/// A generated implementation class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedClass {
    /// Name of the generated class (`_$TaskApi`).
    pub name: String,
    /// Name of the declared class it extends (`TaskApi`).
    pub base: String,
    pub methods: Vec<GeneratedMethod>,
    /// Rendered class definition.
    pub source: String,
}

/// Classify and generate one abstract method.
pub fn generate_method(
    method: &MethodDecl,
    config: &EnvelopeConfig,
    primitives: &PrimitiveTable,
) -> Result<GeneratedMethod, CodegenError> {
    let signature = &method.signature;
    let shape = classify(&signature.return_type, config);
    tracing::debug!(
        method = %signature.name,
        return_type = %signature.return_type,
        shape = %shape,
        wrapped = shape.is_wrapped(),
        "classified return type"
    );
    let body = generate_return_stmt(signature, &shape, config, primitives)?;
    Ok(GeneratedMethod {
        signature: signature.clone(),
        shape,
        body,
        doc: method.doc.clone(),
    })
}

/// Generate the implementation of `class`.
///
/// Fails on the first method whose body cannot be generated; nothing is
/// emitted for the class in that case.
pub fn generate_class(
    class: &ClassDecl,
    config: &EnvelopeConfig,
    options: &DartCodegenOptions,
) -> Result<GeneratedClass, CodegenError> {
    let primitives = options.primitives();

    let methods = class
        .abstract_methods()
        .map(|method| generate_method(method, config, &primitives))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::trace!(
        class = %class.name,
        skipped = class.methods.len() - methods.len(),
        "concrete methods left to the declared class"
    );

    let name = options.impl_name(&class.name);
    let source = render_class(&name, &class.name, &methods, options);
    tracing::debug!(class = %class.name, methods = methods.len(), "generated class");

    Ok(GeneratedClass {
        name,
        base: class.name.clone(),
        methods,
        source,
    })
}

fn render_class(
    name: &str,
    base: &str,
    methods: &[GeneratedMethod],
    options: &DartCodegenOptions,
) -> String {
    let mut out = String::new();
    let mut w = CodeWriter::with_indent_spaces(&mut out, options.indent);
    let relation = options.relation.keyword();
    w.block(&format!("class {name} {relation} {base}"), |w| {
        for (i, method) in methods.iter().enumerate() {
            if i > 0 {
                w.blank_line()?;
            }
            write_method(w, method)?;
        }
        Ok(())
    })
    .unwrap();
    out
}

/// Render one method with its `@override` annotation.
pub fn render_method(method: &GeneratedMethod, indent: usize) -> String {
    let mut out = String::new();
    let mut w = CodeWriter::with_indent_spaces(&mut out, indent);
    write_method(&mut w, method).unwrap();
    out
}

fn write_method(w: &mut CodeWriter<&mut String>, method: &GeneratedMethod) -> std::fmt::Result {
    let signature = &method.signature;
    if let Some(doc) = &method.doc {
        w.doc_comment(doc)?;
    }
    w.writeln("@override")?;
    cw_write!(w, "{} {}(", signature.return_type, signature.name)?;
    w.write_separated(&signature.params, ", ", |w, param| {
        cw_write!(w, "{} {}", param.ty, param.name)
    })?;
    w.writeln(") {")?;
    {
        let _indent = w.indent();
        w.writeln(&method.body)?;
    }
    w.writeln("}")
}
