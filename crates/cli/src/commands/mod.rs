//! Command implementations.

mod compare;
mod info;
mod validate;

pub use compare::run_compare;
pub use info::run_info;
pub use validate::run_validate;
