//! Core business logic module
//!
//! This module contains the account ledger components:
//! - `traits` - Trait abstraction over account storage
//! - `store` - Ordered account collection with lookup, transfer and sorting
//! - `engine` - Applies operation records to a store

pub mod engine;
pub mod store;
pub mod traits;

pub use engine::LedgerEngine;
pub use store::AccountStore;
pub use traits::AccountRepository;
