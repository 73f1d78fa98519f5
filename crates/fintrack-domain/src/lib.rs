//! fintrack-domain
//!
//! Pure domain models (Transaction, Category, drafts, seed data).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod category;
pub mod common;
pub mod seed;
pub mod transaction;

pub use category::*;
pub use common::*;
pub use seed::*;
pub use transaction::*;
