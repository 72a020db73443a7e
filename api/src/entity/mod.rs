//! SeaORM table models
//!
//! Database-facing models, kept separate from the domain entities in
//! `domain::entities`.

pub mod categories;
pub mod products;
