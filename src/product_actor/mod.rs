//! Product-specific store logic: how records are built and which records may
//! be added.

pub mod entity;
mod validation;

pub use validation::*;
