use shapegen_codegen::targets::dart::{DartCodegenOptions, generate_class};
use shapegen_codegen::{CodegenError, TypeShape, classify, generate_declarations};
use shapegen_types::{
    ClassDecl, Declaration, DeclarationKind, EnvelopeConfig, MethodDecl, MethodSignature,
};

fn no_envelope() -> EnvelopeConfig {
    EnvelopeConfig {
        wrapper_type: Some(String::new()),
        wrapper_factory_name: Some("fromJson".into()),
    }
}

fn base_result() -> EnvelopeConfig {
    EnvelopeConfig {
        wrapper_type: Some("BaseResult".into()),
        wrapper_factory_name: Some("fromJson".into()),
    }
}

#[test]
fn classification_examples() {
    assert_eq!(
        classify("Future<Task>", &no_envelope()),
        TypeShape::DirectModel {
            type_name: "Task".into()
        }
    );
    assert_eq!(
        classify("BaseResult<List<Task>>", &base_result()),
        TypeShape::WrappedList {
            list_item_type: "Task".into()
        }
    );
    assert_eq!(
        classify("BaseResult<Task>", &base_result()),
        TypeShape::WrappedModel {
            inner_type: "Task".into()
        }
    );
    assert_eq!(
        classify("List<Task>", &base_result()),
        TypeShape::DirectList {
            list_item_type: "Task".into()
        }
    );
    assert_eq!(
        classify("List<int>", &no_envelope()),
        TypeShape::DirectList {
            list_item_type: "int".into()
        }
    );
}

#[test]
fn primitive_list_uses_bulk_cast() {
    let class = ClassDecl::new("Numbers").method(MethodDecl::abstract_method(
        MethodSignature::new("ids", "List<int>").param("dynamic", "json"),
    ));
    let generated =
        generate_class(&class, &no_envelope(), &DartCodegenOptions::default()).unwrap();
    let body = &generated.methods[0].body;
    assert!(body.contains("List<int>.from("), "{body}");
    assert!(!body.contains("fromJson"), "{body}");
}

fn task_api() -> ClassDecl {
    ClassDecl::new("TaskApi")
        .method(MethodDecl::abstract_method(
            MethodSignature::new("getTasks", "BaseResult<List<Task>>").param("dynamic", "json"),
        ))
        .method(MethodDecl::concrete_method(
            MethodSignature::new("cacheKey", "String").param("String", "id"),
        ))
}

#[test]
fn end_to_end_wrapped_list() {
    let generated = generate_class(&task_api(), &base_result(), &DartCodegenOptions::default())
        .unwrap();

    assert_eq!(generated.methods.len(), 1);
    insta::assert_snapshot!(generated.source, @r"
    class _$TaskApi extends TaskApi {
      @override
      BaseResult<List<Task>> getTasks(dynamic json) {
        return BaseResult<List<Task>>.fromJson(json, (data) => (data as List).map((e) => Task.fromJson(e)).toList());
      }
    }
    ");
}

#[test]
fn concrete_method_appears_nowhere() {
    let generated = generate_class(&task_api(), &base_result(), &DartCodegenOptions::default())
        .unwrap();
    assert!(!generated.source.contains("cacheKey"));
}

#[test]
fn pipeline_is_idempotent() {
    let decls = vec![
        Declaration::class(task_api(), Some(base_result())),
        Declaration {
            name: "parse".into(),
            kind: DeclarationKind::Function,
            config: Some(base_result()),
            methods: Vec::new(),
            doc: None,
        },
    ];
    let options = DartCodegenOptions::default();
    let first = generate_declarations(&decls, &options).unwrap();
    let second = generate_declarations(&decls, &options).unwrap();

    let sources = |g: &shapegen_codegen::Generation| {
        g.classes
            .iter()
            .map(|c| c.source.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(sources(&first), sources(&second));
    assert_eq!(first.skipped, second.skipped);
    assert!(matches!(
        first.skipped.as_slice(),
        [CodegenError::UnsupportedTarget { .. }]
    ));
}
