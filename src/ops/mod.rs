//! Named operations over the instance graph: queries and atomic
//! mutations.

pub mod interfaces;
pub mod mutations;

pub use interfaces::{count_interfaces, interface_details, list_interfaces};
pub use mutations::{set_enabled, set_oper_status, validate_interface_name};
