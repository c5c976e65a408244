//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod broken_car_repo;

pub use broken_car_repo::BrokenCarRepo;
