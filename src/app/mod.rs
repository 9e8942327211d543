pub mod state;
pub mod valuation;

pub use state::*;
pub use valuation::*;
