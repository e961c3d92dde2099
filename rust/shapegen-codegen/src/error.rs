use std::fmt;

/// Error type for code generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodegenError {
    /// The envelope configuration cannot produce valid code for a method.
    InvalidConfiguration {
        /// Method whose body could not be generated.
        method: String,
        reason: &'static str,
    },

    /// An abstract method declares no parameter to read the decoded value from.
    MissingInputParameter { method: String },

    /// A configured declaration is not something an implementation can be
    /// generated for (e.g. a free function).
    UnsupportedTarget { name: String, kind: &'static str },
}

impl fmt::Display for CodegenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodegenError::InvalidConfiguration { method, reason } => {
                write!(f, "invalid configuration for `{method}`: {reason}")
            }
            CodegenError::MissingInputParameter { method } => {
                write!(f, "`{method}` has no parameter to decode from")
            }
            CodegenError::UnsupportedTarget { name, kind } => {
                write!(f, "`{name}` is a {kind}, only classes can be generated")
            }
        }
    }
}

impl std::error::Error for CodegenError {}
