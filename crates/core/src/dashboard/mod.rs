//! Dashboard summary.
//!
//! Builds the figures shown on the home screen for the selected period: headline
//! totals compared with the previous period, balances, receivables, the tax
//! estimate, the trend chart and the category breakdown.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::DashboardService;
pub use types::*;
