//! Domain-level error taxonomy.
//!
//! Validation anomalies in search filters are deliberately NOT part of this
//! taxonomy: the filter validator absorbs them at the boundary (see
//! [`crate::filters`]) and they never propagate as errors.

use crate::types::DbId;

/// Errors surfaced by domain logic, independent of HTTP or the database.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested entity does not exist (or is hidden by a data-quality
    /// guard, e.g. a movie with an empty name).
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },
}
