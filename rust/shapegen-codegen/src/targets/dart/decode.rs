//! Dart decoding statement generation.
//!
//! Generates the single `return` statement that turns the raw JSON value held
//! by a method's input parameter into the declared return type.

use shapegen_parse::parse_type;
use shapegen_types::{EnvelopeConfig, MethodSignature};

use super::types::PrimitiveTable;
use crate::classify::TypeShape;
use crate::error::CodegenError;

/// Factory used to build individual models. Not configurable; only the
/// envelope factory is.
pub const ITEM_FACTORY: &str = "fromJson";

/// Field a bare list is read from when there is no envelope to unwrap it.
pub const DIRECT_LIST_FIELD: &str = "data";

/// Expression producing `List<item>` from `source`, which must evaluate to a
/// raw `List`.
///
/// Primitive items are coerced in one go; anything else is mapped through
/// `Item.fromJson`.
pub fn generate_list_expr(item: &str, source: &str, primitives: &PrimitiveTable) -> String {
    if primitives.contains(item) {
        format!("List<{item}>.from({source})")
    } else {
        format!("({source}).map((e) => {item}.{ITEM_FACTORY}(e)).toList()")
    }
}

/// `Type.fromJson(source)`. A nullable type (`Task?`) is null-guarded and
/// built through its non-null spelling.
pub fn generate_model_expr(ty: &str, source: &str) -> String {
    match parse_type(ty) {
        Ok(parsed) if parsed.nullable => {
            let base = parsed.non_null_text(ty);
            format!("{source} == null ? null : {base}.{ITEM_FACTORY}({source})")
        }
        _ => format!("{ty}.{ITEM_FACTORY}({source})"),
    }
}

/// Generate the body statement for `signature`, classified as `shape`.
pub fn generate_return_stmt(
    signature: &MethodSignature,
    shape: &TypeShape,
    config: &EnvelopeConfig,
    primitives: &PrimitiveTable,
) -> Result<String, CodegenError> {
    let param = &signature
        .input_param()
        .ok_or_else(|| CodegenError::MissingInputParameter {
            method: signature.name.clone(),
        })?
        .name;

    let expr = match shape {
        TypeShape::WrappedList { list_item_type } => {
            let (wrapper, factory) = envelope(signature, config)?;
            let items = generate_list_expr(list_item_type, "data as List", primitives);
            format!(
                "{wrapper}<List<{list_item_type}>>.{factory}({param}, (data) => {items})"
            )
        }
        TypeShape::WrappedModel { inner_type } => {
            let (wrapper, factory) = envelope(signature, config)?;
            if !parse_type(inner_type).is_ok_and(|ty| ty.is_bare()) {
                tracing::warn!(
                    method = %signature.name,
                    inner_type = %inner_type,
                    "envelope wraps a compound type; `{inner_type}.{ITEM_FACTORY}` is emitted as-is"
                );
            }
            let model = generate_model_expr(inner_type, "data");
            format!("{wrapper}<{inner_type}>.{factory}({param}, (data) => {model})")
        }
        TypeShape::DirectList { list_item_type } => generate_list_expr(
            list_item_type,
            &format!("{param}['{DIRECT_LIST_FIELD}'] as List"),
            primitives,
        ),
        TypeShape::DirectModel { type_name } => generate_model_expr(type_name, param),
    };

    Ok(format!("return {expr};"))
}

/// Envelope type and factory for a wrapped shape.
fn envelope<'c>(
    signature: &MethodSignature,
    config: &'c EnvelopeConfig,
) -> Result<(&'c str, &'c str), CodegenError> {
    let wrapper = config
        .wrapper()
        .ok_or_else(|| CodegenError::InvalidConfiguration {
            method: signature.name.clone(),
            reason: "return type is wrapped but no envelope type is configured",
        })?;
    let factory = config.factory_name();
    if factory.is_empty() {
        return Err(CodegenError::InvalidConfiguration {
            method: signature.name.clone(),
            reason: "envelope factory name is empty",
        });
    }
    Ok((wrapper, factory))
}
