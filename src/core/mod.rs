//! Core business logic, independent of any presentation layer.
//!
//! Store operations take a `DatabaseConnection`; aggregations in [`summary`] and
//! [`category`] are pure functions over loaded records.

pub mod balance;
pub mod category;
pub mod group;
pub mod seed;
pub mod summary;
pub mod transaction;
pub mod user;
pub mod validate;
