//! Read-only analysis over a populated graph.

pub mod consistency;

pub use consistency::{
    ConsistencyChecker, ConsistencyReport, MissingAddress, PrefixInfo, PrefixPair,
};
