//! Shared type aliases used across the workspace.

/// Database identifier type. Matches BIGINT columns in PostgreSQL.
pub type DbId = i64;
