//! Grammar for generic type expressions as they appear in method signatures.
//!
//! # This Is Just a Grammar
//!
//! This crate parses **only** type-expression strings such as
//! `Future<BaseResult<List<Task>>>`. It does not:
//!
//! - Decide how a type should be deserialized
//! - Generate any code
//! - Know which names are primitives, envelopes, or models
//!
//! The grammar is deliberately small:
//!
//! ```text
//! TypeExpr := Ident ('<' TypeExpr (',' TypeExpr)* '>')? '?'?
//! Ident    := Segment ('.' Segment)*
//! Segment  := [A-Za-z_$] [A-Za-z0-9_$]*
//! ```
//!
//! A trailing `?` marks a nullable type (`Task?`, `List<Task>?`). Nesting is
//! limited to [`MAX_DEPTH`] levels.
//!
//! Whitespace between tokens is ignored. Every node remembers the byte span it
//! was parsed from, so callers can always get back the text exactly as the user
//! wrote it (see [`TypeExpr::source_text`] and [`TypeExpr::args_text`]).
//!
//! # Why Not a Regex?
//!
//! `(\w+)<(.+)>` works until the inner type contains brackets of its own. A
//! non-greedy match cuts `Response<List<Task>>` after `List<Task`, a greedy one
//! swallows trailing garbage. Recursive descent always closes the bracket that
//! balances the one it opened.
//!
//! ```
//! use shapegen_parse::parse_type;
//!
//! let src = "Response<List<Task>>";
//! let ty = parse_type(src).unwrap();
//! assert_eq!(ty.name, "Response");
//! assert_eq!(ty.args_text(src), Some("List<Task>"));
//! assert_eq!(ty.args[0].as_list_item(), Some("Task"));
//! ```

use std::fmt;
use std::ops::Range;

/// Deepest generic nesting the parser accepts.
pub const MAX_DEPTH: usize = 64;

/// A parsed type expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeExpr {
    /// Identifier, including any `prefix.` qualification.
    pub name: String,
    /// Generic arguments, in order. Empty for bare identifiers.
    pub args: Vec<TypeExpr>,
    /// Byte range of the whole expression in the source.
    pub span: Range<usize>,
    /// Byte range between `<` and the `>` that balances it.
    pub args_span: Option<Range<usize>>,
    /// Followed by `?`.
    pub nullable: bool,
}

impl TypeExpr {
    /// True if the expression has no generic arguments.
    pub fn is_bare(&self) -> bool {
        self.args_span.is_none()
    }

    /// The text this expression was parsed from.
    pub fn source_text<'s>(&self, src: &'s str) -> &'s str {
        &src[self.span.clone()]
    }

    /// The source text without the trailing `?`: `List<Task>` for `List<Task>?`.
    pub fn non_null_text<'s>(&self, src: &'s str) -> &'s str {
        let text = self.source_text(src);
        if self.nullable {
            text.strip_suffix('?').unwrap_or(text).trim_end()
        } else {
            text
        }
    }

    /// The verbatim text of the generic argument list, without the brackets.
    pub fn args_text<'s>(&self, src: &'s str) -> Option<&'s str> {
        self.args_span.clone().map(|span| src[span].trim())
    }

    /// Arguments of `name<...>`, if this expression is a generic named `name`.
    pub fn as_generic(&self, name: &str) -> Option<&[TypeExpr]> {
        if self.name == name && !self.is_bare() {
            Some(&self.args)
        } else {
            None
        }
    }

    /// The element identifier of `List<Ident>`.
    ///
    /// Returns `None` when the element is itself generic (`List<List<int>>`),
    /// when the list has more than one argument, or when the list or its
    /// element is nullable.
    pub fn as_list_item(&self) -> Option<&str> {
        if self.nullable {
            return None;
        }
        match self.as_generic("List") {
            Some([item]) if item.is_bare() && !item.nullable => Some(item.name.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.is_bare() {
            f.write_str("<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// What the parser was looking for when it gave up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expected {
    Identifier,
    /// `,` or `>` inside a generic argument list.
    CommaOrClose,
    EndOfInput,
    /// Generic arguments nested deeper than [`MAX_DEPTH`].
    DepthLimit,
}

/// A parse failure, pointing at a byte offset in the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub offset: usize,
    pub expected: Expected,
    pub found: Option<char>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expected = match self.expected {
            Expected::Identifier => "identifier",
            Expected::CommaOrClose => "',' or '>'",
            Expected::EndOfInput => "end of input",
            Expected::DepthLimit => {
                return write!(
                    f,
                    "type nested deeper than {MAX_DEPTH} levels at offset {}",
                    self.offset
                );
            }
        };
        match self.found {
            Some(c) => write!(
                f,
                "expected {expected} at offset {}, found {c:?}",
                self.offset
            ),
            None => write!(
                f,
                "expected {expected} at offset {}, found end of input",
                self.offset
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a complete type expression. Trailing input is an error.
pub fn parse_type(src: &str) -> Result<TypeExpr, ParseError> {
    let mut parser = Parser {
        src,
        pos: 0,
        depth: 0,
    };
    let ty = parser.type_expr()?;
    parser.skip_ws();
    if parser.pos != src.len() {
        return Err(parser.error(Expected::EndOfInput));
    }
    Ok(ty)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn error(&self, expected: Expected) -> ParseError {
        ParseError {
            offset: self.pos,
            expected,
            found: self.peek(),
        }
    }

    fn type_expr(&mut self) -> Result<TypeExpr, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(Expected::DepthLimit));
        }
        self.depth += 1;
        let ty = self.type_expr_inner();
        self.depth -= 1;
        ty
    }

    fn type_expr_inner(&mut self) -> Result<TypeExpr, ParseError> {
        self.skip_ws();
        let start = self.pos;
        let name = self.ident()?;
        let mut end = self.pos;

        let mut args = Vec::new();
        let mut args_span = None;
        if self.eat('<') {
            let args_start = self.pos;
            loop {
                args.push(self.type_expr()?);
                self.skip_ws();
                let args_end = self.pos;
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    args_span = Some(args_start..args_end);
                    end = self.pos;
                    break;
                }
                return Err(self.error(Expected::CommaOrClose));
            }
        }

        let nullable = self.eat('?');
        if nullable {
            end = self.pos;
        }

        Ok(TypeExpr {
            name: name.to_string(),
            args,
            span: start..end,
            args_span,
            nullable,
        })
    }

    fn ident(&mut self) -> Result<&'a str, ParseError> {
        let src = self.src;
        let start = self.pos;
        loop {
            self.segment()?;
            // A dot only continues the name when a segment follows it.
            let rest = &src[self.pos..];
            match rest.strip_prefix('.').and_then(|r| r.chars().next()) {
                Some(c) if is_ident_start(c) => self.pos += 1,
                _ => break,
            }
        }
        Ok(&src[start..self.pos])
    }

    fn segment(&mut self) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if is_ident_start(c) => self.pos += c.len_utf8(),
            _ => return Err(self.error(Expected::Identifier)),
        }
        while let Some(c) = self.peek() {
            if !is_ident_continue(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        Ok(())
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_identifier() {
        let ty = parse_type("Task").unwrap();
        assert_eq!(ty.name, "Task");
        assert!(ty.is_bare());
        assert_eq!(ty.span, 0..4);
    }

    #[test]
    fn list_of_identifier() {
        insta::assert_debug_snapshot!(parse_type("List<Task>").unwrap(), @r#"
        TypeExpr {
            name: "List",
            args: [
                TypeExpr {
                    name: "Task",
                    args: [],
                    span: 5..9,
                    args_span: None,
                    nullable: false,
                },
            ],
            span: 0..10,
            args_span: Some(
                5..9,
            ),
            nullable: false,
        }
        "#);
    }

    #[test]
    fn nested_generics_close_on_balancing_bracket() {
        let src = "Response<List<Task>>";
        let ty = parse_type(src).unwrap();
        assert_eq!(ty.name, "Response");
        assert_eq!(ty.args.len(), 1);
        assert_eq!(ty.args_text(src), Some("List<Task>"));
        assert_eq!(ty.args[0].as_list_item(), Some("Task"));
        assert_eq!(ty.source_text(src), src);
    }

    #[test]
    fn args_text_is_verbatim() {
        let src = "Map< String,  List<Task> >";
        let ty = parse_type(src).unwrap();
        assert_eq!(ty.args_text(src), Some("String,  List<Task>"));
        assert_eq!(ty.to_string(), "Map<String, List<Task>>");
    }

    #[test]
    fn qualified_names() {
        let ty = parse_type("models.Task").unwrap();
        assert_eq!(ty.name, "models.Task");
        assert!(ty.is_bare());
    }

    #[test]
    fn list_item_requires_bare_element() {
        assert_eq!(parse_type("List<int>").unwrap().as_list_item(), Some("int"));
        assert_eq!(parse_type("List<List<int>>").unwrap().as_list_item(), None);
        assert_eq!(parse_type("List<int, int>").unwrap().as_list_item(), None);
        assert_eq!(parse_type("Set<int>").unwrap().as_list_item(), None);
        assert_eq!(parse_type("List<int>?").unwrap().as_list_item(), None);
        assert_eq!(parse_type("List<int?>").unwrap().as_list_item(), None);
    }

    #[test]
    fn unbalanced_brackets_are_rejected() {
        let err = parse_type("List<Task").unwrap_err();
        assert_eq!(err.expected, Expected::CommaOrClose);
        assert_eq!(err.offset, 9);
        assert_eq!(err.found, None);

        let err = parse_type("List<Task>>").unwrap_err();
        assert_eq!(err.expected, Expected::EndOfInput);
        assert_eq!(err.found, Some('>'));
    }

    #[test]
    fn nullable_suffix() {
        let src = "Task?";
        let ty = parse_type(src).unwrap();
        assert!(ty.nullable);
        assert!(ty.is_bare());
        assert_eq!(ty.span, 0..5);
        assert_eq!(ty.non_null_text(src), "Task");
        assert_eq!(ty.to_string(), "Task?");

        let src = "BaseResult<List<Task>?>";
        let ty = parse_type(src).unwrap();
        assert!(!ty.nullable);
        assert_eq!(ty.args_text(src), Some("List<Task>?"));
        assert!(ty.args[0].nullable);
        assert_eq!(ty.args[0].non_null_text(src), "List<Task>");
    }

    #[test]
    fn double_nullable_is_rejected() {
        let err = parse_type("Task??").unwrap_err();
        assert_eq!(err.expected, Expected::EndOfInput);
        assert_eq!(err.to_string(), "expected end of input at offset 5, found '?'");
    }

    #[test]
    fn nesting_is_limited() {
        let at_limit = format!("{}Task{}", "A<".repeat(MAX_DEPTH - 1), ">".repeat(MAX_DEPTH - 1));
        assert!(parse_type(&at_limit).is_ok());

        let deep = format!("{}Task{}", "A<".repeat(100_000), ">".repeat(100_000));
        let err = parse_type(&deep).unwrap_err();
        assert_eq!(err.expected, Expected::DepthLimit);
        assert_eq!(err.offset, MAX_DEPTH * 2);
        assert_eq!(
            err.to_string(),
            format!("type nested deeper than {MAX_DEPTH} levels at offset {}", MAX_DEPTH * 2)
        );
    }

    #[test]
    fn empty_input() {
        let err = parse_type("   ").unwrap_err();
        assert_eq!(err.expected, Expected::Identifier);
        assert_eq!(err.offset, 3);
    }
}
