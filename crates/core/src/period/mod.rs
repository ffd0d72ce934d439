//! Calendar period resolution.
//!
//! Resolves month, quarter and year ranges around a reference instant, and the
//! period immediately before it. All bounds are local day boundaries in the
//! reference instant's timezone.

pub mod resolver;
pub mod types;

#[cfg(test)]
mod tests;

pub use resolver::{
    contains_day, end_of_day, in_range, resolve_custom, resolve_period, resolve_previous_period,
    resolve_shifted, start_of_day,
};
pub use types::{DateRange, PeriodKind};
