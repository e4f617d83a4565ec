//! Cineteca core library.
//!
//! Domain logic with zero internal dependencies: the error taxonomy, shared
//! type aliases, the search filter validator, and pagination math. This crate
//! knows nothing about the database or HTTP layers so both the repository
//! layer and any future CLI tooling can use it.

pub mod error;
pub mod filters;
pub mod pagination;
pub mod types;
