//! Return-type classification.
//!
//! Maps a declared return type to one of four deserialization shapes. Rules
//! are checked in a fixed order and earlier rules shadow later ones:
//!
//! | Rule | Condition                                          | Shape          |
//! |------|----------------------------------------------------|----------------|
//! | a    | outer type is the envelope, inner is `List<Ident>` | `WrappedList`  |
//! | b    | outer type is the envelope                         | `WrappedModel` |
//! | c    | type is `List<Ident>`                              | `DirectList`   |
//! | d    | anything else                                      | `DirectModel`  |
//!
//! An outer `Future<..>` is stripped first, so synchronous and asynchronous
//! declarations classify the same way. Classification is purely syntactic and
//! never fails.

use std::fmt;

use shapegen_parse::{TypeExpr, parse_type};
use shapegen_types::EnvelopeConfig;

/// How a return type is deserialized.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeShape {
    /// Envelope around a list of a named type: `BaseResult<List<Task>>`.
    WrappedList { list_item_type: String },
    /// Envelope around a single type: `BaseResult<Task>`.
    WrappedModel { inner_type: String },
    /// Bare list of a named type: `List<Task>`.
    DirectList { list_item_type: String },
    /// Anything else, constructed directly: `Task`.
    DirectModel { type_name: String },
}

impl TypeShape {
    pub fn is_wrapped(&self) -> bool {
        matches!(
            self,
            TypeShape::WrappedList { .. } | TypeShape::WrappedModel { .. }
        )
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            TypeShape::WrappedList { .. } => "wrapped-list",
            TypeShape::WrappedModel { .. } => "wrapped-model",
            TypeShape::DirectList { .. } => "direct-list",
            TypeShape::DirectModel { .. } => "direct-model",
        }
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeShape::WrappedList { list_item_type } => {
                write!(f, "{}<{list_item_type}>", self.label())
            }
            TypeShape::WrappedModel { inner_type } => write!(f, "{}<{inner_type}>", self.label()),
            TypeShape::DirectList { list_item_type } => {
                write!(f, "{}<{list_item_type}>", self.label())
            }
            TypeShape::DirectModel { type_name } => write!(f, "{}<{type_name}>", self.label()),
        }
    }
}

/// Strip an outer `Future<..>`, textually.
pub fn strip_future(return_type: &str) -> &str {
    let trimmed = return_type.trim();
    trimmed
        .strip_prefix("Future<")
        .and_then(|rest| rest.strip_suffix('>'))
        .map(str::trim)
        .unwrap_or(trimmed)
}

/// Classify a declared return type.
pub fn classify(return_type: &str, config: &EnvelopeConfig) -> TypeShape {
    let effective = strip_future(return_type);
    let parsed = parse_type(effective).ok();

    // Outer<Inner>: inner is the verbatim text inside the balancing brackets.
    let outer_inner = parsed
        .as_ref()
        .and_then(|ty| ty.args_text(effective).map(|inner| (ty.name.as_str(), inner)));

    if let Some(wrapper) = config.wrapper()
        && let Some((outer, inner)) = outer_inner
        && outer == wrapper
    {
        let inner_ty = parse_type(inner).ok();
        if let Some(item) = inner_ty.as_ref().and_then(TypeExpr::as_list_item) {
            return TypeShape::WrappedList {
                list_item_type: item.to_string(),
            };
        }
        return TypeShape::WrappedModel {
            inner_type: inner.to_string(),
        };
    }

    if effective.starts_with("List<")
        && let Some(item) = parsed.as_ref().and_then(TypeExpr::as_list_item)
    {
        return TypeShape::DirectList {
            list_item_type: item.to_string(),
        };
    }

    TypeShape::DirectModel {
        type_name: effective.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> EnvelopeConfig {
        EnvelopeConfig::default()
    }

    fn base_result() -> EnvelopeConfig {
        EnvelopeConfig::wrapped("BaseResult")
    }

    #[test]
    fn future_is_stripped() {
        assert_eq!(
            classify("Future<Task>", &plain()),
            TypeShape::DirectModel {
                type_name: "Task".into()
            }
        );
        assert_eq!(strip_future("  Future< Task >  "), "Task");
        assert_eq!(strip_future("FutureOr<Task>"), "FutureOr<Task>");
    }

    #[test]
    fn wrapped_list() {
        assert_eq!(
            classify("BaseResult<List<Task>>", &base_result()),
            TypeShape::WrappedList {
                list_item_type: "Task".into()
            }
        );
        assert_eq!(
            classify("Future<BaseResult<List<Task>>>", &base_result()),
            TypeShape::WrappedList {
                list_item_type: "Task".into()
            }
        );
    }

    #[test]
    fn wrapped_model() {
        assert_eq!(
            classify("BaseResult<Task>", &base_result()),
            TypeShape::WrappedModel {
                inner_type: "Task".into()
            }
        );
    }

    #[test]
    fn wrapped_model_keeps_compound_inner_verbatim() {
        assert_eq!(
            classify("BaseResult<Map<String,  Task>>", &base_result()),
            TypeShape::WrappedModel {
                inner_type: "Map<String,  Task>".into()
            }
        );
        assert_eq!(
            classify("BaseResult<List<List<int>>>", &base_result()),
            TypeShape::WrappedModel {
                inner_type: "List<List<int>>".into()
            }
        );
    }

    #[test]
    fn bare_list_is_not_wrapped() {
        assert_eq!(
            classify("List<Task>", &base_result()),
            TypeShape::DirectList {
                list_item_type: "Task".into()
            }
        );
        assert_eq!(
            classify("Future<List<int>>", &plain()),
            TypeShape::DirectList {
                list_item_type: "int".into()
            }
        );
    }

    #[test]
    fn empty_wrapper_disables_envelope_rules() {
        let config = EnvelopeConfig::wrapped("");
        assert_eq!(
            classify("BaseResult<Task>", &config),
            TypeShape::DirectModel {
                type_name: "BaseResult<Task>".into()
            }
        );
        assert_eq!(
            classify("BaseResult<List<Task>>", &plain()),
            TypeShape::DirectModel {
                type_name: "BaseResult<List<Task>>".into()
            }
        );
    }

    #[test]
    fn other_generics_fall_through() {
        assert_eq!(
            classify("Response<List<Task>>", &base_result()),
            TypeShape::DirectModel {
                type_name: "Response<List<Task>>".into()
            }
        );
        assert_eq!(
            classify("List<List<int>>", &plain()),
            TypeShape::DirectModel {
                type_name: "List<List<int>>".into()
            }
        );
    }

    #[test]
    fn unparseable_types_are_direct_models() {
        for ty in ["Task??", "", "List<Task", "void Function()"] {
            assert_eq!(
                classify(ty, &base_result()),
                TypeShape::DirectModel {
                    type_name: ty.to_string()
                },
                "{ty:?}"
            );
        }
    }

    #[test]
    fn nullable_payloads_stay_wrapped() {
        assert_eq!(
            classify("BaseResult<Task?>", &base_result()),
            TypeShape::WrappedModel {
                inner_type: "Task?".into()
            }
        );
        assert_eq!(
            classify("Future<BaseResult<List<Task>?>>", &base_result()),
            TypeShape::WrappedModel {
                inner_type: "List<Task>?".into()
            }
        );
        assert_eq!(
            classify("Task?", &base_result()),
            TypeShape::DirectModel {
                type_name: "Task?".into()
            }
        );
        assert_eq!(
            classify("List<Task>?", &plain()),
            TypeShape::DirectModel {
                type_name: "List<Task>?".into()
            }
        );
    }

    #[test]
    fn deeply_nested_input_is_a_direct_model() {
        let ty = format!("{}Task{}", "A<".repeat(100_000), ">".repeat(100_000));
        assert_eq!(
            classify(&ty, &base_result()),
            TypeShape::DirectModel {
                type_name: ty.clone()
            }
        );

        let wrapped = format!("BaseResult<{ty}>");
        assert_eq!(
            classify(&wrapped, &base_result()),
            TypeShape::DirectModel { type_name: wrapped }
        );
    }

    #[test]
    fn classification_is_total_and_deterministic() {
        let inputs = [
            "Future<Task>",
            "BaseResult<List<Task>>",
            "BaseResult<Task>",
            "List<Task>",
            "List<int>",
            "Future<BaseResult<Map<String, dynamic>>>",
            "<>",
            "Future<",
            ">>><<<",
        ];
        for config in [plain(), base_result()] {
            for ty in inputs {
                assert_eq!(classify(ty, &config), classify(ty, &config));
            }
        }
    }

    #[test]
    fn shape_display() {
        let shape = classify("BaseResult<List<Task>>", &base_result());
        assert_eq!(shape.to_string(), "wrapped-list<Task>");
        assert!(shape.is_wrapped());
    }
}
