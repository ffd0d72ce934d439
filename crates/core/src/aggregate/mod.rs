//! Financial aggregation.
//!
//! Period totals, cash/bank balances, receivables, tax estimates, trend series and
//! category breakdowns, all derived on demand from a [`FinanceState`] snapshot.
//!
//! [`FinanceState`]: crate::finance::FinanceState

pub mod service;
pub mod trend;
pub mod types;


pub use service::{Aggregator, WALK_IN_CLIENT, percent_change};
pub use trend::TrendSeries;
pub use types::*;
