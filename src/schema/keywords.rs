//! Keyword classification: the single source of truth for how the
//! compiler treats each statement keyword.

/// How a keyword is transduced into the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordClass {
    /// Introduces a new named node linked from its parent via `hasChild`.
    Structural,
    /// Attaches its argument as a property of the parent; never becomes a
    /// node itself.
    Literal,
    /// `enum` is always materialized as its own node, labeled even when
    /// the argument is absent.
    Enum,
    /// Anything else: argument (and the arguments of direct children)
    /// attach to the parent, one level deep only.
    Other,
}

pub fn classify(keyword: &str) -> KeywordClass {
    match keyword {
        "module" | "submodule" | "container" | "list" | "leaf" | "leaf-list" | "choice"
        | "case" | "grouping" | "augment" | "uses" | "rpc" | "input" | "output" | "typedef"
        | "identity" | "notification" => KeywordClass::Structural,
        "type" | "default" | "units" | "description" | "config" | "mandatory" | "range"
        | "length" | "pattern" | "value" | "status" | "when" | "if-feature" | "must"
        | "reference" | "min-elements" | "max-elements" | "fraction-digits" | "bit"
        | "position" => KeywordClass::Literal,
        "enum" => KeywordClass::Enum,
        _ => KeywordClass::Other,
    }
}

/// Graph-facing name for a keyword: `leaf-list` becomes `LeafList`,
/// `min-elements` becomes `MinElements`.
pub fn type_name(keyword: &str) -> String {
    keyword
        .split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_cover_the_keyword_sets() {
        assert_eq!(classify("container"), KeywordClass::Structural);
        assert_eq!(classify("leaf-list"), KeywordClass::Structural);
        assert_eq!(classify("pattern"), KeywordClass::Literal);
        assert_eq!(classify("min-elements"), KeywordClass::Literal);
        assert_eq!(classify("enum"), KeywordClass::Enum);
        assert_eq!(classify("presence"), KeywordClass::Other);
    }

    #[test]
    fn type_names_are_camel_cased() {
        assert_eq!(type_name("module"), "Module");
        assert_eq!(type_name("leaf-list"), "LeafList");
        assert_eq!(type_name("fraction-digits"), "FractionDigits");
        assert_eq!(type_name("if-feature"), "IfFeature");
    }
}
