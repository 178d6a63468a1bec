//! The parsed statement tree.
//!
//! Parsing YANG text is owned by an external collaborator; the compiler
//! consumes an already-parsed tree of `{keyword, argument, children}`
//! nodes. The tree deserializes from JSON, which is the interchange form
//! the `compile` command reads.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One statement in the tree: a keyword, an optional argument, and an
/// ordered sequence of child statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub keyword: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Statement>,
}

impl Statement {
    pub fn new(keyword: impl Into<String>, argument: Option<&str>) -> Self {
        Self {
            keyword: keyword.into(),
            argument: argument.map(str::to_string),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: Statement) -> Self {
        self.children.push(child);
        self
    }
}

/// Load a statement tree from its JSON interchange form.
pub fn read_tree(path: &Path) -> Result<Statement> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| Error::Parse {
        source_name: path.display().to_string(),
        line: e.line(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_sparse_nodes() {
        let tree: Statement = serde_json::from_str(
            r#"{"keyword": "module", "argument": "m", "children": [{"keyword": "container", "argument": "c"}]}"#,
        )
        .unwrap();
        assert_eq!(tree.keyword, "module");
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].argument.as_deref(), Some("c"));
        assert!(tree.children[0].children.is_empty());
    }
}
