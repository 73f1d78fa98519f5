#![doc(test(attr(deny(warnings))))]

//! fintrack keeps a personal income and expense log, summarizes it, and
//! exports CSV reports from an interactive shell.

pub mod cli;
pub mod core;
pub mod errors;
pub mod notice;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("fintrack tracing initialized.");
    });
}
