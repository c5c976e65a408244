//! Row models.

pub mod broken_car;
