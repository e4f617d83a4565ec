//! Domain model structs and response shapes.
//!
//! Row structs derive `FromRow` and mirror the database schema; the
//! assembled shapes (`MovieListItem`, `MovieDetail`, `Suggestion`) are what
//! the API layer serializes.

pub mod movie;
