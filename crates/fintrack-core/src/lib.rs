//! fintrack-core
//!
//! Aggregation, filtering, and export engines plus the owned application
//! state they run against. Depends on fintrack-domain. No CLI, no terminal
//! I/O, no filesystem access.

pub mod book;
pub mod category_service;
pub mod error;
pub mod export_service;
pub mod format;
pub mod query_service;
pub mod storage;
pub mod summary_service;
pub mod time;
pub mod transaction_service;

#[cfg(test)]
mod tests;

pub use book::*;
pub use category_service::*;
pub use error::{CoreError, CoreResult};
pub use export_service::*;
pub use query_service::*;
pub use summary_service::*;
pub use transaction_service::*;
