//! Transduces a statement tree into schema triples.
//!
//! Every structural statement becomes a node with a `type` edge, an
//! optional `label`, and a `hasChild` edge from its parent. Literal
//! statements never become nodes: their argument attaches to the parent,
//! and their own children attach one level up — callers expecting a
//! dedicated node under a `type` or `pattern` statement will not find one.

use super::keywords::{classify, type_name, KeywordClass};
use super::statement::Statement;
use crate::graph::ns::{vocab, YANG};
use crate::graph::{sanitize_fragment, Graph, Literal, Triple, Uri};
use std::collections::HashMap;

pub struct SchemaCompiler<'g> {
    graph: &'g mut Graph,
    anon_counter: u64,
    fragments: HashMap<String, Option<String>>,
    collisions: Vec<String>,
}

impl<'g> SchemaCompiler<'g> {
    pub fn new(graph: &'g mut Graph) -> Self {
        Self {
            graph,
            anon_counter: 0,
            fragments: HashMap::new(),
            collisions: Vec::new(),
        }
    }

    /// Compile a whole tree, materializing the root statement as a node
    /// and recursing into its children. Returns the root URI.
    pub fn compile(mut self, root: &Statement) -> Uri {
        let root_uri = self.structural_node(root);
        self.process_children(root, &root_uri);
        if !self.collisions.is_empty() {
            tracing::warn!(
                count = self.collisions.len(),
                fragments = ?self.collisions,
                "distinct statement names sanitized to the same fragment"
            );
        }
        root_uri
    }

    fn process_children(&mut self, statement: &Statement, parent: &Uri) {
        for child in &statement.children {
            if child.keyword.is_empty() {
                continue;
            }
            match classify(&child.keyword) {
                KeywordClass::Structural => self.structural_child(child, parent),
                KeywordClass::Literal => self.literal_child(child, parent),
                KeywordClass::Enum => self.enum_child(child, parent),
                KeywordClass::Other => self.other_child(child, parent),
            }
        }
    }

    fn structural_child(&mut self, child: &Statement, parent: &Uri) {
        let node = self.structural_node(child);
        self.graph
            .insert(Triple::new(parent.clone(), vocab::HAS_CHILD.clone(), node.clone()));
        self.process_children(child, &node);
    }

    /// Allocate the node for a structural statement: `type` edge, and a
    /// `label` when the statement is named.
    fn structural_node(&mut self, statement: &Statement) -> Uri {
        let fragment = match &statement.argument {
            Some(arg) => self.named_fragment(arg),
            None => self.anonymous_fragment(&statement.keyword),
        };
        let node = YANG.uri(&fragment);
        self.graph.insert(Triple::new(
            node.clone(),
            vocab::TYPE.clone(),
            YANG.uri(&type_name(&statement.keyword)),
        ));
        if let Some(arg) = &statement.argument {
            self.graph.insert(Triple::new(
                node.clone(),
                vocab::LABEL.clone(),
                Literal::from(arg.as_str()),
            ));
        }
        node
    }

    /// A literal statement attaches to the parent and is skipped as a
    /// node: structural grandchildren are compiled as children of the
    /// same parent, everything else attaches its argument one level up.
    fn literal_child(&mut self, child: &Statement, parent: &Uri) {
        if let Some(arg) = &child.argument {
            self.attach_property(parent, &child.keyword, arg);
        }
        for grand in &child.children {
            if classify(&grand.keyword) == KeywordClass::Structural {
                self.structural_child(grand, parent);
            } else if let Some(arg) = &grand.argument {
                self.attach_property(parent, &grand.keyword, arg);
            }
        }
    }

    fn enum_child(&mut self, child: &Statement, parent: &Uri) {
        let fragment = match &child.argument {
            Some(arg) => self.named_fragment(&format!("enum_{arg}")),
            None => self.anonymous_fragment("enum"),
        };
        let node = YANG.uri(&fragment);
        self.graph.insert(Triple::new(
            node.clone(),
            vocab::TYPE.clone(),
            YANG.uri("Enum"),
        ));
        self.graph.insert(Triple::new(
            node.clone(),
            vocab::LABEL.clone(),
            Literal::from(child.argument.as_deref().unwrap_or("")),
        ));
        self.graph
            .insert(Triple::new(parent.clone(), vocab::HAS_CHILD.clone(), node.clone()));
        self.process_children(child, &node);
    }

    /// Unrecognized keywords attach shallowly: the statement's argument
    /// and the arguments of its direct children all land on the parent.
    fn other_child(&mut self, child: &Statement, parent: &Uri) {
        if let Some(arg) = &child.argument {
            self.attach_property(parent, &child.keyword, arg);
        }
        for grand in &child.children {
            if let Some(arg) = &grand.argument {
                self.attach_property(parent, &grand.keyword, arg);
            }
        }
    }

    fn attach_property(&mut self, parent: &Uri, keyword: &str, argument: &str) {
        self.graph.insert(Triple::new(
            parent.clone(),
            YANG.uri(&type_name(keyword)),
            Literal::from(argument),
        ));
    }

    /// Sanitized fragment for a named statement, tracking collisions
    /// between distinct names.
    fn named_fragment(&mut self, name: &str) -> String {
        let fragment = sanitize_fragment(name);
        match self.fragments.get(&fragment) {
            Some(Some(existing)) if existing != name => {
                self.collisions.push(fragment.clone());
            }
            _ => {
                self.fragments
                    .insert(fragment.clone(), Some(name.to_string()));
            }
        }
        fragment
    }

    /// Fragments for unnamed statements come from a per-compilation
    /// counter, so compiled graphs are reproducible and diffable.
    fn anonymous_fragment(&mut self, keyword: &str) -> String {
        self.anon_counter += 1;
        format!("{}_anon{}", sanitize_fragment(keyword), self.anon_counter)
    }
}
