//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async read methods
//! that accept `&PgPool` as the first argument. The catalog is read-only:
//! data is bulk-loaded out-of-band and never mutated here.

pub mod movie_repo;

pub use movie_repo::MovieRepo;
