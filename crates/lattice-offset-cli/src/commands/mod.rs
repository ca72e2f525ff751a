//! CLI command implementations.

pub mod bounds;
pub mod compare;
pub mod search;
