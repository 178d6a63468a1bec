//! The triple store and everything that speaks its terms.
//!
//! - [`term`] - URIs, literals, triples
//! - [`ns`] - namespaces and the shared vocabulary
//! - [`pattern`] - pattern matching and query filters
//! - [`store`] - the set-semantics store and its shared lock wrapper
//! - [`turtle`] - the Turtle serialization boundary

pub mod ns;
pub mod pattern;
pub mod store;
pub mod term;
pub mod turtle;

pub use ns::Namespace;
pub use pattern::{
    EntityConstraint, Filter, FilterEntity, FilterTerm, Query, SubPattern, TermPattern,
    TriplePattern, UriPattern,
};
pub use store::{Graph, SharedGraph, UpdateOutcome};
pub use term::{sanitize_fragment, Literal, Term, Triple, Uri};
