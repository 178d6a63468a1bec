//! Synthetic instance data: subnet arithmetic and the defect-injecting
//! generator.

pub mod generator;
pub mod subnet;

pub use generator::{GenerationSummary, GeneratorConfig, InstanceGenerator};
pub use subnet::{format_address, Subnet};
