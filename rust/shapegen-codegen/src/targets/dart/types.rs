//! Dart type spellings the generator treats specially.

use std::collections::BTreeSet;

/// Built-in Dart scalars: decoded by a cast, never by a `fromJson` factory.
pub const DART_PRIMITIVES: &[&str] = &["int", "double", "num", "String", "bool"];

/// Set of type names whose list elements are coerced in bulk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimitiveTable {
    names: BTreeSet<String>,
}

impl PrimitiveTable {
    /// The Dart scalar set.
    pub fn dart() -> Self {
        Self::from_names(DART_PRIMITIVES.iter().copied())
    }

    /// No primitives: every list element goes through `fromJson`.
    pub fn empty() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            names: names.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.names.contains(type_name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for PrimitiveTable {
    fn default() -> Self {
        Self::dart()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dart_scalars() {
        let table = PrimitiveTable::dart();
        for name in ["int", "double", "num", "String", "bool"] {
            assert!(table.contains(name), "{name}");
        }
        assert!(!table.contains("Task"));
        assert!(!table.contains("string"));
        assert!(PrimitiveTable::empty().is_empty());
    }
}
