//! # Repositories
//!
//! One repository per aggregate. Each holds a clone of the pool and
//! exposes `DbResult` operations; transactions that span aggregates
//! (checkout) live in [`crate::checkout`].

pub mod order;
pub mod product;

pub use order::OrderRepository;
pub use product::ProductRepository;
