//! Financial reports.
//!
//! - Profit and loss over a period
//! - Balance sheet as of a day

pub mod service;
pub mod types;


pub use service::ReportService;
pub use types::*;
