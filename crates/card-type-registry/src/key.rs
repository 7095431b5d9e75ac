use std::fmt;

/// Canonical, case-folded form of a type name.
///
/// Every insertion and lookup goes through [`type_key`], so two spellings
/// that differ only in ASCII case always land on the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(String);

impl TypeKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fold a type name to its canonical key.
pub fn type_key(type_name: &str) -> TypeKey {
    TypeKey(type_name.trim().to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_ascii_case() {
        assert_eq!(type_key("TextBlock"), type_key("textblock"));
        assert_eq!(type_key("Action.Submit"), type_key("ACTION.SUBMIT"));
        assert_eq!(type_key("Input.Text").as_str(), "input.text");
    }

    #[test]
    fn ignores_surrounding_whitespace() {
        assert_eq!(type_key(" Image "), type_key("Image"));
    }

    #[test]
    fn distinct_names_stay_distinct() {
        assert_ne!(type_key("Image"), type_key("ImageSet"));
    }
}
