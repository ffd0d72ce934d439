//! Finance state held by the client.

pub mod error;
pub mod state;

pub use error::FinanceError;
pub use state::FinanceState;
