#![deny(unsafe_code)]

//! Deserialization code generation for JSON-backed method declarations.
//!
//! Given a class whose abstract methods return models decoded from JSON, this
//! crate works out how each return type must be decoded and generates a class
//! implementing those methods.
//!
//! # The Pipeline
//!
//! ```text
//! Declaration   →   classify()    →   generate_return_stmt()   →   generate_class()
//!  (registry)       (TypeShape)       (one `return` per method)     (class source)
//! ```
//!
//! Classification is the only step with real decisions in it. A return type,
//! with any outer `Future<..>` removed, falls into exactly one of four shapes:
//!
//! - `BaseResult<List<Task>>` → [`TypeShape::WrappedList`]
//! - `BaseResult<Task>` → [`TypeShape::WrappedModel`]
//! - `List<Task>` → [`TypeShape::DirectList`]
//! - anything else → [`TypeShape::DirectModel`]
//!
//! where `BaseResult` is the envelope type named by the class's
//! [`EnvelopeConfig`](shapegen_types::EnvelopeConfig).
//!
//! # Usage
//!
//! ```
//! use shapegen_codegen::targets::dart::{DartCodegenOptions, generate_class};
//! use shapegen_types::{ClassDecl, EnvelopeConfig, MethodDecl, MethodSignature};
//!
//! let class = ClassDecl::new("TaskApi").method(MethodDecl::abstract_method(
//!     MethodSignature::new("getTasks", "BaseResult<List<Task>>").param("dynamic", "json"),
//! ));
//! let generated = generate_class(
//!     &class,
//!     &EnvelopeConfig::wrapped("BaseResult"),
//!     &DartCodegenOptions::default(),
//! )
//! .unwrap();
//!
//! assert!(generated.source.contains(
//!     "return BaseResult<List<Task>>.fromJson(json, (data) => (data as List).map((e) => Task.fromJson(e)).toList());"
//! ));
//! ```
//!
//! Nothing here does I/O. Reading declarations and writing files is the
//! caller's job (see `shapegen-cli`).

mod classify;
pub mod code_writer;
mod driver;
mod error;
pub mod targets;

pub use classify::{TypeShape, classify, strip_future};
pub use driver::{Generation, generate_declarations};
pub use error::CodegenError;
