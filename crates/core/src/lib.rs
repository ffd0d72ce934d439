//! Core business logic for Tallybook.
//!
//! This crate contains pure business logic with ZERO network or filesystem dependencies.
//! All domain types and financial derivations live here.
//!
//! # Modules
//!
//! - `records` - Income, expense, invoice and transfer records plus business settings
//! - `period` - Calendar period resolution (month, quarter, year)
//! - `finance` - Immutable finance state snapshots and their mutations
//! - `aggregate` - Totals, balances, trends and breakdowns derived from a snapshot
//! - `dashboard` - Dashboard summary assembly
//! - `reports` - Profit & loss and balance sheet reports

pub mod aggregate;
pub mod dashboard;
pub mod finance;
pub mod period;
pub mod records;
pub mod reports;
