//! Schema compilation: statement trees in, schema triples out.

pub mod compiler;
pub mod keywords;
pub mod statement;

pub use compiler::SchemaCompiler;
pub use keywords::{classify, type_name, KeywordClass};
pub use statement::{read_tree, Statement};
