//! PostgreSQL adapters
//!
//! Implementations of the repository traits using SeaORM and PostgreSQL.

pub mod category_repo;
pub mod product_repo;

#[cfg(test)]
mod integration_tests;

pub use category_repo::PostgresCategoryRepository;
pub use product_repo::PostgresProductRepository;
