//! Finance data sources for Tallybook.
//!
//! This crate provides:
//! - The [`FinanceSource`] abstraction over the four record lists and settings
//! - A JSON snapshot directory source and an in-memory source
//! - [`load_state`], which turns a source into a [`FinanceState`] without failing
//!
//! [`FinanceState`]: tallybook_core::finance::FinanceState

pub mod error;
pub mod json;
pub mod loader;
pub mod memory;
pub mod source;

pub use error::StoreError;
pub use json::JsonFileSource;
pub use loader::load_state;
pub use memory::InMemorySource;
pub use source::FinanceSource;
